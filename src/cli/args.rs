//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    completions::CompletionsArgs, export::ExportArgs, history::HistoryCommands, pack::PackArgs,
    predict::PredictArgs, template::TemplateCommands,
};

#[derive(Parser)]
#[command(name = "cutplan")]
#[command(author, version, about = "Cabinet shop panel cutting planner")]
#[command(
    long_about = "Turns a cut list into a nesting plan on stock sheets, derives edge-banding per placed panel, estimates material cost, and predicts part lists for new jobs from saved history."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Nest a cut list onto stock sheets and report the plan
    Pack(PackArgs),

    /// Export a cut list as CSV
    Export(ExportArgs),

    /// Built-in cabinet templates
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Saved job history
    #[command(subcommand)]
    History(HistoryCommands),

    /// Predict a part list from saved jobs of a cabinet type
    Predict(PredictArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
