//! Offline operator tool for ERC-7913 multisig configurations.
//!
//! Computes signer ids, assembles multisignature blobs in the order the validator expects,
//! and checks blobs against a JSON snapshot of account configurations.

mod args;
mod cmd;
mod config;
mod logging;
mod snapshot;

use std::process;

use cmd::exec_subc;
use config::ToolConfig;

fn main() {
    let args: args::Args = argh::from_env();
    let inner = move || -> anyhow::Result<()> {
        let config = ToolConfig::load(args.config.as_deref())?;
        logging::init(&config.logging);
        exec_subc(args.subc, &config)
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}
