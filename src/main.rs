use clap::Parser;

use gpis_scout::TableStore;
use gpis_scout::cli::{Cli, execute};
use gpis_scout::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let store = TableStore::new(cli.data.sources());
    match execute(&cli, &store) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
