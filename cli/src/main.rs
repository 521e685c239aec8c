mod commands;
mod terminal;

use commands::{CommandLine, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose, commands.quiet);

    let cfg = commands.to_config()?;

    print::header("netmap", commands.quiet);
    scan::scan(cfg, &commands.output, commands.quiet).await
}
