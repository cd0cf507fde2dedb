//! `cutplan pack` command - nest a cut list and report the plan

use std::path::PathBuf;

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::table::{fmt_mm, render};
use crate::cli::viz;
use crate::core::catalog::validate_rows;
use crate::core::config::Config;
use crate::core::cost::{self, CostBreakdown};
use crate::core::edgeband::apply_banding;
use crate::core::packing::{pack, PackSettings, Rejection};
use crate::cutlist;
use crate::entities::layout::{Sheet, SheetLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Renderer-facing JSON document
    Json,
}

#[derive(clap::Args, Debug)]
pub struct PackArgs {
    /// Cut-list YAML file
    pub cutlist: PathBuf,

    /// Stock sheet width in mm (overrides file and config)
    #[arg(long)]
    pub sheet_width: Option<f64>,

    /// Stock sheet height in mm (overrides file and config)
    #[arg(long)]
    pub sheet_height: Option<f64>,

    /// Saw kerf in mm
    #[arg(long)]
    pub kerf: Option<f64>,

    /// Forbid rotating panels
    #[arg(long)]
    pub no_rotate: bool,

    /// Maximum number of stock sheets
    #[arg(long)]
    pub max_bins: Option<usize>,

    /// Board price per sheet
    #[arg(long)]
    pub board_price: Option<f64>,

    /// Skin surcharge per m²
    #[arg(long)]
    pub skin_cost: Option<f64>,

    /// Draw each sheet as a terminal diagram
    #[arg(long)]
    pub diagram: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "table")]
    pub format: OutputFormat,
}

/// The renderer-facing JSON document
#[derive(Debug, Serialize)]
struct PackReport<'a> {
    sheets: &'a [SheetLayout],
    rejections: &'a [Rejection],
    bins_used: usize,
    utilization: f64,
    cost: CostBreakdown,
}

#[derive(Tabled)]
struct PlacementRow {
    #[tabled(rename = "part")]
    name: String,
    x: String,
    y: String,
    #[tabled(rename = "width")]
    width: String,
    #[tabled(rename = "height")]
    height: String,
    #[tabled(rename = "rot")]
    rotated: String,
    #[tabled(rename = "banded sides")]
    banded: String,
}

pub fn run(args: PackArgs) -> Result<()> {
    let config = Config::load();

    let list = cutlist::load(&args.cutlist).into_diagnostic()?;

    let sheet = Sheet::new(
        args.sheet_width
            .or(list.sheet.map(|s| s.width))
            .unwrap_or(config.sheet_width),
        args.sheet_height
            .or(list.sheet.map(|s| s.height))
            .unwrap_or(config.sheet_height),
    );

    let settings = PackSettings::new(sheet)
        .with_kerf(args.kerf.unwrap_or(config.kerf))
        .with_rotation(if args.no_rotate {
            false
        } else {
            config.rotation_allowed
        })
        .with_max_bins(args.max_bins.unwrap_or(config.max_bins));

    let report = validate_rows(&list.parts);
    let mut result = pack(&report.parts, &settings);
    apply_banding(&mut result.layouts);

    // Catalog rejections and packer rejections belong in one attributable
    // report.
    let mut rejections = report.rejected;
    rejections.extend(result.rejections.iter().cloned());

    let cost = cost::estimate(
        result.bins_used(),
        args.board_price.unwrap_or(config.board_price),
        result.placed_area(),
        args.skin_cost.unwrap_or(config.skin_cost_m2),
    )
    .into_diagnostic()?;

    match args.format {
        OutputFormat::Json => {
            let doc = PackReport {
                sheets: &result.layouts,
                rejections: &rejections,
                bins_used: result.bins_used(),
                utilization: result.utilization(),
                cost,
            };
            println!("{}", serde_json::to_string_pretty(&doc).into_diagnostic()?);
        }
        OutputFormat::Table => {
            print_report(&result.layouts, &rejections, result.utilization(), cost, &args);
        }
    }

    Ok(())
}

fn print_report(
    layouts: &[SheetLayout],
    rejections: &[Rejection],
    utilization: f64,
    cost: CostBreakdown,
    args: &PackArgs,
) {
    if layouts.is_empty() {
        println!("{}", style("Nothing was placed.").yellow());
    }

    for (i, layout) in layouts.iter().enumerate() {
        println!(
            "{} {} ({} × {} mm)",
            style("Sheet").bold(),
            style(i + 1).cyan(),
            fmt_mm(layout.sheet.width),
            fmt_mm(layout.sheet.height)
        );

        let rows: Vec<PlacementRow> = layout
            .placed
            .iter()
            .map(|r| PlacementRow {
                name: r.name.clone(),
                x: fmt_mm(r.x),
                y: fmt_mm(r.y),
                width: fmt_mm(r.width),
                height: fmt_mm(r.height),
                rotated: if r.rotated { "yes" } else { "" }.to_string(),
                banded: r
                    .banded
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            })
            .collect();
        println!("{}", render(&rows, "  (empty sheet)"));

        if args.diagram {
            println!("{}", viz::render_sheet(layout));
        }
        println!();
    }

    for rejection in rejections {
        println!(
            "{} {} × {} ({} × {} mm): {}",
            style("rejected:").yellow().bold(),
            rejection.name,
            rejection.count,
            fmt_mm(rejection.width),
            fmt_mm(rejection.height),
            rejection.reason
        );
    }

    println!(
        "{} {} sheet(s), {:.1}% used",
        style("Material:").bold(),
        layouts.len(),
        utilization * 100.0
    );
    println!(
        "{} board {:.0} + skin {:.0} = {}",
        style("Cost:").bold(),
        cost.board_cost,
        cost.skin_cost,
        style(format!("{:.0}", cost.total)).green().bold()
    );
}
