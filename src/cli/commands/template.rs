//! `cutplan template` commands - browse the built-in cabinet templates

use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::Tabled;

use crate::cli::table::{fmt_mm, render};
use crate::cutlist::CutList;
use crate::templates;

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List built-in templates
    List,

    /// Show a template's part list
    Show(ShowArgs),

    /// Write a template as an editable cut-list YAML file
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Template slug, e.g. "wardrobe"
    pub slug: String,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Template slug, e.g. "wardrobe"
    pub slug: String,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Tabled)]
struct TemplateRow {
    slug: String,
    title: String,
    #[tabled(rename = "parts")]
    part_count: usize,
}

#[derive(Tabled)]
struct PartRowDisplay {
    name: String,
    width: String,
    height: String,
    quantity: i64,
    edge: String,
}

pub fn run(cmd: TemplateCommands) -> Result<()> {
    match cmd {
        TemplateCommands::List => list(),
        TemplateCommands::Show(args) => show(args),
        TemplateCommands::Export(args) => export(args),
    }
}

fn list() -> Result<()> {
    let rows: Vec<TemplateRow> = templates::names()
        .iter()
        .filter_map(|slug| templates::get(slug))
        .map(|t| TemplateRow {
            slug: t.slug,
            title: t.title,
            part_count: t.parts.len(),
        })
        .collect();
    println!("{}", render(&rows, "No templates available"));
    Ok(())
}

fn lookup(slug: &str) -> Result<templates::Template> {
    templates::get(slug).ok_or_else(|| {
        miette::miette!(
            "unknown template '{}' (available: {})",
            slug,
            templates::names().join(", ")
        )
    })
}

fn show(args: ShowArgs) -> Result<()> {
    let template = lookup(&args.slug)?;
    println!("{}", style(&template.title).bold());

    let rows: Vec<PartRowDisplay> = template
        .parts
        .iter()
        .map(|p| PartRowDisplay {
            name: p.name.clone(),
            width: fmt_mm(p.width),
            height: fmt_mm(p.height),
            quantity: p.quantity,
            edge: p.edge.clone(),
        })
        .collect();
    println!("{}", render(&rows, "(empty template)"));
    Ok(())
}

fn export(args: ExportArgs) -> Result<()> {
    let template = lookup(&args.slug)?;
    let list = CutList {
        sheet: None,
        parts: template.parts,
    };
    let yaml = list.to_yaml().into_diagnostic()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, yaml).into_diagnostic()?;
            println!(
                "{} template '{}' to {}",
                style("Wrote").green().bold(),
                args.slug,
                path.display()
            );
        }
        None => print!("{}", yaml),
    }
    Ok(())
}
