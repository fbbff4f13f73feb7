//! scholar-query CLI
//!
//! Lists the searchable field catalogue and builds combined queries from
//! query documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use scholar_query::{build_document, resolve, FieldDefinition, GroupTag};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scholar-query", version)]
#[command(about = "Build Lens Scholar boolean queries from field directives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List field groups, or the fields of one group
    Fields {
        /// Group name, e.g. AUTHOR or open_access
        group: Option<String>,
    },
    /// Build a combined query from a query document
    Build {
        /// JSON file mapping group names to field arguments
        file: PathBuf,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Fields { group: None } => {
            for tag in GroupTag::ALL {
                println!("{:<16} {:?}", tag.as_str(), tag.shape());
            }
        }
        Commands::Fields { group: Some(group) } => {
            let schema = resolve(&group)?;
            for def in schema.fields() {
                println!("{}", describe(def));
            }
        }
        Commands::Build { file, pretty } => {
            debug!(file = %file.display(), "reading query document");
            let text = std::fs::read_to_string(&file)?;
            let query = build_document(&text)?;
            let output = if pretty {
                serde_json::to_string_pretty(&query)?
            } else {
                serde_json::to_string(&query)?
            };
            println!("{}", output);
        }
    }
    Ok(())
}

fn describe(def: &FieldDefinition) -> String {
    let mut line = format!("{:<42} {:<40} {}", def.name, def.wire_name, def.accepted_type);
    if let Some(format) = def.date_format {
        line.push_str(&format!(" date={}", format));
    }
    if let Some(allowed) = def.allowed_values {
        line.push_str(&format!(" one of {} values", allowed.len()));
    }
    if def.normalizer.is_some() {
        line.push_str(" normalized");
    }
    line
}
