use anyhow::Result;
use clap::{crate_version, App as Cli, Arg};
use flowboard::app::{App, StartOptions};
use flowboard::config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("flowboard")
        .version(crate_version!())
        .about("A terminal kanban board with drag-and-drop task ordering")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("board")
                .short("b")
                .long("board")
                .value_name("FILE")
                .help("Read and write the board at this path")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("reset")
                .long("reset")
                .help("Ignore the stored board and start from the seed board"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    let options = StartOptions {
        board: matches.value_of("board").map(PathBuf::from),
        reset: matches.is_present("reset"),
    };
    App::start(config, options).await
}
