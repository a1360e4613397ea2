//! # minicfg demo application
//!
//! A sample CLI tool that showcases how to integrate minicfg into a real
//! application. It exists purely to demonstrate and manually verify
//! minicfg's features.
//!
//! ## Running
//!
//! ```sh
//! DEMO_SERVER_TOKEN=secret cargo run --example minicfg_demo -- show
//! cargo run --example minicfg_demo -- docs --format plaintext
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature            | How to exercise it                                                        |
//! |--------------------|---------------------------------------------------------------------------|
//! | Defaults           | `DEMO_SERVER_TOKEN=x cargo run --example minicfg_demo -- show`            |
//! | Env var value      | `DEMO_SERVER_PORT=9999 DEMO_SERVER_TOKEN=x ... -- show`                   |
//! | File field         | `echo secret > /tmp/tok; DEMO_SERVER_TOKEN_FILE=/tmp/tok ... -- show`     |
//! | Conflict error     | set both `DEMO_SERVER_TOKEN` and `DEMO_SERVER_TOKEN_FILE`                 |
//! | Missing value      | run `show` without any token                                              |
//! | Casting error      | `DEMO_SERVER_PORT=abc DEMO_SERVER_TOKEN=x ... -- show`                    |
//! | List / JSON        | `DEMO_SERVER_ALLOWED_ORIGINS=a.com,b.com DEMO_DISPLAY_LABELS='{"k":1}'`    |
//! | Provenance         | `... -- show --sources`                                                   |
//! | Single key         | `... -- show --key Server.PORT`                                           |
//! | Docs               | `cargo run --example minicfg_demo -- docs -f markdown -o CONFIG.md`       |
//! | Tracing            | `RUST_LOG=minicfg=trace ... -- show`                                      |

mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use minicfg::{ConfigGroup, DocsArgs, MinicfgError, Populated};

use config::{DemoConfig, demo_config};

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// minicfg demo, a sample CLI app for showcasing minicfg integration.
#[derive(Parser, Debug)]
#[command(name = "minicfg-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Populate the configuration from the environment and print it.
    Show {
        /// Print only this dotted declared key (e.g. `Server.PORT`).
        #[arg(long)]
        key: Option<String>,

        /// Print where each value came from.
        #[arg(long)]
        sources: bool,
    },
    /// Print configuration documentation.
    Docs(DocsArgs),
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn show(config: &ConfigGroup, key: Option<&str>, sources: bool) -> Result<(), MinicfgError> {
    let values = config.values()?;

    if let Some(key) = key {
        println!("{}", values.require_path(key)?);
        return Ok(());
    }

    let typed: DemoConfig = values.extract()?;
    println!("{} (color: {})", typed.name, typed.display.color);
    println!();
    println!("{}", values.listing());

    if sources || typed.verbose {
        println!();
        print_sources(values, config);
    }
    Ok(())
}

fn print_sources(values: Populated<'_>, group: &ConfigGroup) {
    for (key, field) in group.fields() {
        if let Some(source) = values.source(key) {
            println!("{} <- {source}", field.name().unwrap_or(key));
        }
    }
    for (key, child) in group.children() {
        if let Some(child_values) = values.group(key) {
            print_sources(child_values, child);
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { key, sources } => {
            let config = demo_config().populated().unwrap_or_else(|e| {
                eprintln!("Failed to load config:\n{e}");
                std::process::exit(1);
            });
            show(&config, key.as_deref(), sources).unwrap_or_else(|e| {
                eprintln!("Config error:\n{e}");
                std::process::exit(1);
            });
        }
        Commands::Docs(args) => {
            let output = args.render(&demo_config().instantiate()).unwrap_or_else(|e| {
                eprintln!("Docs error:\n{e}");
                std::process::exit(1);
            });
            println!("{output}");
        }
    }
}
