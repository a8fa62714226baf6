use clap::Parser;
use tidyfan_core::cli::{self, Cli};
use tidyfan_core::exit::TidyExit;
use tidyfan_core::logging;

fn main() -> TidyExit {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    TidyExit::from(cli::dispatch::execute(cli))
}
