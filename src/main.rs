use anyhow::Result;
use clap::{crate_version, Arg};
use patto_nav::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = clap::App::new("patto-nav")
        .version(crate_version!())
        .about("Browse and edit patto notes from the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("workspace")
                .short("w")
                .long("workspace")
                .value_name("DIR")
                .help("Open this workspace instead of the configured one")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config, matches.value_of("workspace")).await
}
