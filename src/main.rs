use clap::Parser;
use cutplan::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Pack(args) => cutplan::cli::commands::pack::run(args),
        Commands::Export(args) => cutplan::cli::commands::export::run(args),
        Commands::Template(cmd) => cutplan::cli::commands::template::run(cmd),
        Commands::History(cmd) => cutplan::cli::commands::history::run(cmd),
        Commands::Predict(args) => cutplan::cli::commands::predict::run(args),
        Commands::Completions(args) => cutplan::cli::commands::completions::run(args),
    }
}
