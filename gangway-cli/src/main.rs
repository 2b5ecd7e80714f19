use clap::{Parser, Subcommand};
use gangway_core::{LaunchSpec, DEFAULT_BINARY};
use gangway_runner::BinaryLauncher;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "gangway")]
#[command(about = "Hosting shim that launches a pre-built application binary", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the application binary and wait for it to exit
    Launch {
        /// Path or name of the application binary
        #[arg(short, long, default_value = DEFAULT_BINARY)]
        binary: String,

        /// Listen port exported to the binary (defaults to $PORT, then 8080)
        #[arg(short, long)]
        port: Option<String>,

        /// Working directory for the binary
        #[arg(short, long)]
        workdir: Option<PathBuf>,
    },

    /// Print the environment that would be exported to the binary
    Env {
        /// Listen port to export (defaults to $PORT, then 8080)
        #[arg(short, long)]
        port: Option<String>,

        /// Emit as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Invoked directly with no subcommand: behave like the platform's
    // start command and launch the pre-built binary.
    let command = cli.command.unwrap_or(Commands::Launch {
        binary: DEFAULT_BINARY.to_string(),
        port: None,
        workdir: None,
    });

    match command {
        Commands::Launch {
            binary,
            port,
            workdir,
        } => run_launch(binary, port, workdir),
        Commands::Env { port, json } => print_env(port, json),
    }
}

fn build_spec(binary: String, port: Option<String>, workdir: Option<PathBuf>) -> LaunchSpec {
    let mut spec = LaunchSpec::new(binary);
    if let Some(port) = port {
        spec = spec.with_port(port);
    }
    if let Some(dir) = workdir {
        spec = spec.with_work_dir(dir);
    }
    spec
}

fn run_launch(binary: String, port: Option<String>, workdir: Option<PathBuf>) -> anyhow::Result<()> {
    let spec = build_spec(binary, port, workdir);
    let report = BinaryLauncher::new().launch(&spec)?;

    // The exit code is logged for the operator, not acted upon; the
    // platform supervisor decides what a dead child means.
    info!(
        launch_id = %report.id,
        exit_code = ?report.exit_code,
        duration_ms = report.duration_ms,
        "Launch finished"
    );

    Ok(())
}

fn print_env(port: Option<String>, json: bool) -> anyhow::Result<()> {
    let spec = build_spec(DEFAULT_BINARY.to_string(), port, None);
    let exports: BTreeMap<String, String> = spec.exports().into_iter().collect();

    if json {
        let doc = serde_json::json!({ "spec": spec, "exports": exports });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for (key, value) in &exports {
            println!("{key}={value}");
        }
    }

    Ok(())
}
