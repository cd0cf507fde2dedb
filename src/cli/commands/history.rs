//! `cutplan history` commands - save, inspect, and prune job history

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};
use tabled::Tabled;

use crate::cli::table::{fmt_mm, render};
use crate::core::catalog::validate_rows;
use crate::core::config::Config;
use crate::cutlist;
use crate::history::HistoryStore;

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Save a cut list as a historical job
    Save(SaveArgs),

    /// List saved jobs
    List(ListArgs),

    /// Show one saved job's part list
    Show(ShowArgs),

    /// Delete one saved job
    Delete(DeleteArgs),

    /// Delete all saved jobs
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct SaveArgs {
    /// Cut-list YAML file to snapshot
    pub cutlist: PathBuf,

    /// Cabinet category, e.g. "wardrobe"
    #[arg(long)]
    pub cabinet_type: String,

    /// Overall cabinet width, mm
    #[arg(long)]
    pub base_width: f64,

    /// Overall cabinet height, mm
    #[arg(long)]
    pub base_height: f64,

    /// Board thickness, mm
    #[arg(long, default_value_t = 18.0)]
    pub thickness: f64,

    /// History database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only list jobs of this cabinet type
    #[arg(long)]
    pub cabinet_type: Option<String>,

    /// History database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Saved job id
    pub id: i64,

    /// History database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Saved job id
    pub id: i64,

    /// History database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// History database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Tabled)]
struct JobRow {
    id: i64,
    #[tabled(rename = "cabinet type")]
    cabinet_type: String,
    #[tabled(rename = "base size")]
    base: String,
    #[tabled(rename = "thickness")]
    thickness: String,
    #[tabled(rename = "parts")]
    parts: String,
    created: String,
}

#[derive(Tabled)]
struct PartTableRow {
    name: String,
    width: String,
    height: String,
    quantity: u32,
    edge: String,
}

/// Open the store at the flag, env, config, or default path (that order)
pub fn open_store(db: &Option<PathBuf>) -> Result<HistoryStore> {
    let config = Config::load();
    let path = db.clone().unwrap_or_else(|| config.db_path());
    HistoryStore::open(&path).into_diagnostic()
}

pub fn run(cmd: HistoryCommands) -> Result<()> {
    match cmd {
        HistoryCommands::Save(args) => save(args),
        HistoryCommands::List(args) => list(args),
        HistoryCommands::Show(args) => show(args),
        HistoryCommands::Delete(args) => delete(args),
        HistoryCommands::Clear(args) => clear(args),
    }
}

fn save(args: SaveArgs) -> Result<()> {
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
    if report.parts.is_empty() {
        return Err(miette::miette!("no valid parts to save"));
    }

    let store = open_store(&args.db)?;
    let id = store
        .save(
            &args.cabinet_type,
            args.base_width,
            args.base_height,
            args.thickness,
            &report.parts,
            Utc::now(),
        )
        .into_diagnostic()?;

    println!(
        "{} job {} ({}, {} part(s))",
        style("Saved").green().bold(),
        style(id).cyan(),
        args.cabinet_type,
        report.parts.len()
    );
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let store = open_store(&args.db)?;
    let jobs = store
        .list(args.cabinet_type.as_deref())
        .into_diagnostic()?;

    let rows: Vec<JobRow> = jobs
        .iter()
        .map(|j| JobRow {
            id: j.id,
            cabinet_type: j.cabinet_type.clone(),
            base: format!("{} × {}", fmt_mm(j.base_width), fmt_mm(j.base_height)),
            thickness: fmt_mm(j.thickness),
            // A corrupt snapshot is still listable; its count is unknown.
            parts: j
                .part_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string()),
            created: j.created.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    println!("{}", render(&rows, "No saved jobs found"));
    Ok(())
}

fn show(args: ShowArgs) -> Result<()> {
    let store = open_store(&args.db)?;
    let job = store
        .get(args.id)
        .into_diagnostic()?
        .ok_or_else(|| miette::miette!("no saved job with id {}", args.id))?;

    println!(
        "{} {} ({}, {} × {} mm, {} mm board)",
        style("Job").bold(),
        style(job.id).cyan(),
        job.cabinet_type,
        fmt_mm(job.base_width),
        fmt_mm(job.base_height),
        fmt_mm(job.thickness)
    );

    let rows: Vec<PartTableRow> = job
        .parts
        .iter()
        .map(|p| PartTableRow {
            name: p.name.clone(),
            width: fmt_mm(p.width),
            height: fmt_mm(p.height),
            quantity: p.quantity,
            edge: p.edge.to_string(),
        })
        .collect();
    println!("{}", render(&rows, "(no parts)"));
    Ok(())
}

fn delete(args: DeleteArgs) -> Result<()> {
    let store = open_store(&args.db)?;
    if store.delete(args.id).into_diagnostic()? {
        println!("{} job {}", style("Deleted").green().bold(), args.id);
        Ok(())
    } else {
        Err(miette::miette!("no saved job with id {}", args.id))
    }
}

fn clear(args: ClearArgs) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete ALL saved jobs?")
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let store = open_store(&args.db)?;
    let removed = store.clear().into_diagnostic()?;
    println!(
        "{} {} saved job(s)",
        style("Deleted").green().bold(),
        removed
    );
    Ok(())
}
