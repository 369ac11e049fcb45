mod cli;
mod core;
mod util;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    util::init_logging(cli.verbose);

    if let Err(err) = cli::execute(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
