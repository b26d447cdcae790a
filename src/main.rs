use clap::Parser;

mod aws;
mod cli;
mod error;
mod ssh;
mod ui;

pub use error::{OwSshError, Result};

#[derive(Parser)]
#[command(name = "opsworks-ssh")]
#[command(about = "Interactive SSH menu for AWS OpsWorks stacks")]
#[command(version)]
struct Cli {
    /// AWS credentials profile name
    profile: String,

    /// AWS region (e.g. us-east-1)
    region: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli::commands::connect::execute(cli.profile, cli.region).await? {
        // Cancelling a picker is a deliberate no-op, not an error
        None => Ok(()),
        // The session ran; our exit status is whatever ssh produced
        Some(status) => std::process::exit(status.code().unwrap_or(1)),
    }
}
