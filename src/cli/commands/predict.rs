//! `cutplan predict` command - infer a part list from saved jobs

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::Tabled;

use crate::cli::commands::history::open_store;
use crate::cli::table::{fmt_mm, render};
use crate::core::predict::{predict, PredictionResult, MIN_SAMPLES};
use crate::cutlist::CutList;
use crate::entities::part::Part;

#[derive(clap::Args, Debug)]
pub struct PredictArgs {
    /// Cabinet category to predict for
    #[arg(long)]
    pub cabinet_type: String,

    /// New cabinet's overall width, mm
    #[arg(long)]
    pub base_width: f64,

    /// New cabinet's overall height, mm
    #[arg(long)]
    pub base_height: f64,

    /// Write the prediction as a cut-list YAML file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// History database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Tabled)]
struct PredictedRow {
    name: String,
    width: String,
    height: String,
    quantity: u32,
    edge: String,
}

pub fn run(args: PredictArgs) -> Result<()> {
    let store = open_store(&args.db)?;
    let outcome = predict(
        &store,
        &args.cabinet_type,
        args.base_width,
        args.base_height,
    )
    .into_diagnostic()?;

    for warning in &outcome.warnings {
        eprintln!(
            "{} saved job {} has an unreadable snapshot and was skipped ({})",
            style("warning:").yellow().bold(),
            warning.id,
            warning.detail
        );
    }

    match outcome.result {
        PredictionResult::Insufficient { matching } => {
            println!(
                "{} only {} saved {} job(s) found; {} are needed to predict",
                style("Not enough history:").yellow().bold(),
                matching,
                args.cabinet_type,
                MIN_SAMPLES
            );
        }
        PredictionResult::Predicted { parts } => {
            print_prediction(&parts, &args)?;
        }
    }

    Ok(())
}

fn print_prediction(parts: &[Part], args: &PredictArgs) -> Result<()> {
    println!(
        "{} {} at {} × {} mm",
        style("Predicted parts for").bold(),
        style(&args.cabinet_type).cyan(),
        fmt_mm(args.base_width),
        fmt_mm(args.base_height)
    );

    let rows: Vec<PredictedRow> = parts
        .iter()
        .map(|p| PredictedRow {
            name: p.name.clone(),
            width: fmt_mm(p.width),
            height: fmt_mm(p.height),
            quantity: p.quantity,
            edge: p.edge.to_string(),
        })
        .collect();
    println!("{}", render(&rows, "(no parts predicted)"));

    if let Some(ref path) = args.output {
        let yaml = CutList::from_parts(parts).to_yaml().into_diagnostic()?;
        std::fs::write(path, yaml).into_diagnostic()?;
        println!(
            "{} cut list to {}",
            style("Wrote").green().bold(),
            path.display()
        );
    }
    Ok(())
}
