use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evidently_constructs::app::{self, AppConfig, SynthOptions};

#[derive(Parser)]
#[command(name = "evctl")]
#[command(about = "Render CloudWatch Evidently app configs as CloudFormation templates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a config file into a template
    Synth {
        /// Path to the app config (JSON)
        config: PathBuf,

        /// Write the template here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Fail on dangling feature, variation, treatment or group names
        #[arg(long)]
        strict: bool,

        /// Add an ARN output for every created resource
        #[arg(long)]
        outputs: bool,
    },
    /// Validate a config file without writing a template
    Check {
        config: PathBuf,

        #[arg(long)]
        strict: bool,
    },
    /// Print the JSON Schema for config files
    Schema,
}

/// Logs go to stderr so stdout stays clean for template output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "evidently_constructs=info,evctl=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            config,
            out,
            strict,
            outputs,
        } => {
            let app_config = AppConfig::load(&config)?;
            let stack = app::synth(app_config, SynthOptions { strict, outputs })
                .with_context(|| format!("Failed to synthesize {}", config.display()))?;
            let template = stack.to_json_pretty()?;

            match out {
                Some(path) => {
                    fs::write(&path, template)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Template written to {}", path.display());
                }
                None => println!("{}", template),
            }
        }
        Commands::Check { config, strict } => {
            let app_config = AppConfig::load(&config)?;
            // Synthesize into a throwaway stack so cardinality checks run too.
            let stack = app::synth(
                app_config,
                SynthOptions {
                    strict,
                    outputs: false,
                },
            )
            .with_context(|| format!("{} is invalid", config.display()))?;
            println!("{}: ok ({} resources)", config.display(), stack.len());
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&AppConfig::json_schema())?);
        }
    }

    Ok(())
}
