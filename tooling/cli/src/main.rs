#![allow(missing_docs)]
mod cmd;

use {self::cmd::Command, anyhow::Result, tracing_subscriber::EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = argh::from_env::<cmd::Args>();
    args.run()
}
