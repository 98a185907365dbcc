use std::path::Path;

use clap::{Parser, Subcommand};

use acaplan_core::PlanChoice;

mod commands;
mod output;
mod report;

use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "acaplan",
    about = "Capacity planner for Azure Container Apps environments",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate node and IP usage for a planning request.
    ///
    /// The request is a TOML file listing apps, a subnet size, and the
    /// hosting plan; --subnet and --plan override the file's values.
    /// Peak load (every app at max replicas) and the zero-downtime
    /// upgrade phase (two baseline-sized revisions) are budgeted
    /// separately and each compared against the subnet.
    Plan {
        /// Path to the request file
        #[arg(short, long, default_value = "plan.toml")]
        file: String,
        /// Subnet size override: /N, bare N, or a dotted-decimal mask
        #[arg(short, long)]
        subnet: Option<String>,
        /// Hosting plan override (consumption, dedicated, mix)
        #[arg(short, long)]
        plan: Option<PlanChoice>,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List the workload-profile node catalog
    Skus {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the rendered plan so that
    // --format json stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("acaplan=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { file, subnet, plan, format } => {
            commands::plan::run(Path::new(&file), subnet, plan, format)
        }
        Commands::Skus { format } => commands::skus::run(format),
    }
}
