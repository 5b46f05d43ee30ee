//! Hello Flags demo entry-point: resolve flags, print the configuration.

use futures::executor::block_on;
use tracing_subscriber::EnvFilter;

use flagwise::is_display_request;
use hello_flags::cli::{flags, print_config};
use hello_flags::error::Result;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let set = flags();
    let args = match set.tokenize(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            if is_display_request(&err)
                && let flagwise::FlagError::CliParsing(clap_err) = &*err
            {
                clap_err.exit();
            }
            return Err(err.into());
        }
    };
    let config = block_on(set.compile(&args))?;
    tracing::debug!(flags = config.len(), "configuration resolved");
    print_config(&config)?;
    Ok(())
}
