//! `cutplan export` command - write the cut list as CSV

use std::io::Write;
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::core::catalog::validate_rows;
use crate::cutlist;
use crate::entities::part::Part;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Cut-list YAML file
    pub cutlist: PathBuf,

    /// Output CSV file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Export table contract: one row per part, `length` is the part height
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    length: f64,
    width: f64,
    quantity: u32,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let list = cutlist::load(&args.cutlist).into_diagnostic()?;
    let report = validate_rows(&list.parts);

    for rejection in &report.rejected {
        eprintln!(
            "{} {}: {}",
            style("skipped:").yellow().bold(),
            rejection.name,
            rejection.reason
        );
    }

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).into_diagnostic()?;
            write_csv(file, &report.parts)?;
            println!(
                "{} {} part(s) to {}",
                style("Exported").green().bold(),
                report.parts.len(),
                path.display()
            );
        }
        None => {
            write_csv(std::io::stdout(), &report.parts)?;
        }
    }

    Ok(())
}

fn write_csv<W: Write>(writer: W, parts: &[Part]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for part in parts {
        wtr.serialize(ExportRow {
            name: &part.name,
            length: part.height,
            width: part.width,
            quantity: part.quantity,
        })
        .into_diagnostic()?;
    }
    wtr.flush().into_diagnostic()?;
    Ok(())
}
