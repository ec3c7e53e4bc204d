//! layer — command-line client for the Layer Platform API.

#![allow(
    missing_docs,
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

mod cmd;

use std::process;

use clap::Parser;
use layer_api::Error;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{ProfileConfig, profile_path};
use crate::cmd::{Cli, Command, resource};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("fatal: tokio runtime: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(cli)) {
        eprintln!("error: {e}");
        if let Error::Response(r) = &e
            && !r.body.is_empty()
        {
            eprintln!("{}", r.body.clone().into_json());
        }
        process::exit(1);
    }
}

/// Route `layer_api` debug events to stderr when `--debug` is set.
/// `RUST_LOG` takes precedence when present.
fn init_logger(debug: bool) {
    let fallback = if debug { "layer_api=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> layer_api::Result<()> {
    let profile = cli.profile.clone().unwrap_or_else(|| "default".to_owned());
    let cfg = ProfileConfig::load(&profile)?.merged(&cli);

    let res = match cli.command {
        Command::Init => {
            // Build once so a bad token / app ID is rejected before saving.
            cfg.client(false)?;
            cfg.save(&profile)?;
            eprintln!("saved {}", profile_path(&profile).display());
            return Ok(());
        }
        Command::Show => {
            print!("{}", cfg.redacted());
            return Ok(());
        }
        cmd => {
            let client = cfg.client(cli.debug)?;
            match cmd {
                Command::Conversation(c) => resource::conversation(&client, c).await?,
                Command::Message(c) => resource::message(&client, c).await?,
                Command::Announce(a) => resource::announce(&client, a).await?,
                Command::Block(c) => resource::block(&client, c).await?,
                Command::Identity(c) => resource::identity(&client, c).await?,
                Command::Badge(c) => resource::badge(&client, c).await?,
                Command::Init | Command::Show => return Ok(()),
            }
        }
    };
    println!("{}", resource::render(res));
    Ok(())
}
