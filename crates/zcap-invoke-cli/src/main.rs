use self::args::{ToolArgs, ToolSubcommand};
use clap::Parser;
use miette::IntoDiagnostic;

mod args;
mod config;
mod logging;
mod parse_header;
mod sign;
mod util;

fn main() -> miette::Result<()> {
    let args = ToolArgs::parse();
    logging::initialise()?;

    match args.subcommand {
        ToolSubcommand::Sign(args) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .into_diagnostic()?;

            runtime.block_on(sign::do_it(args))
        }
        ToolSubcommand::ParseHeader(args) => parse_header::do_it(args),
    }
}
