mod commands;
mod export;
mod terminal;

use commands::{CommandLine, Commands, discover, scan};
use lanaudit_common::config::Config;
use lanaudit_common::warn;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init()?;

    let cfg: Config = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    if !is_root::is_root() {
        warn!("Not running as root: raw ARP sockets will fail and no hosts will be found");
    }

    let result = match commands.command {
        Commands::Discover { target } => {
            print::section("host discovery", cfg.quiet);
            discover::discover(target, &cfg).await
        }
        Commands::Scan {
            target,
            profile,
            output,
            ..
        } => {
            print::section("security audit", cfg.quiet);
            scan::scan(target, profile, output.as_deref(), &cfg).await
        }
    };

    print::rule();
    result
}
