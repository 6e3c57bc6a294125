//! CLI argument parsing and subcommand dispatch.

use crate::{config, modules};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use models::ModelRegistry;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod call;
pub mod init;
pub mod methods;

/// Inspect and invoke layered model methods.
#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Inspect and invoke layered model methods")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List models, their methods and layer stacks.
    Methods {
        /// Only show this model.
        model: Option<String>,
    },
    /// Invoke a method on a set of records.
    Call {
        /// Model name.
        model: String,
        /// Method name.
        method: String,
        /// Record ids.
        ids: Vec<i64>,
    },
    /// Write the default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Initialize tracing subscriber based on verbosity.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        tracing_subscriber::fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose > 1)
            .init();
    }

    /// Run the parsed command.
    pub fn run(self) -> Result<()> {
        let Cli {
            command,
            config: config_path,
            ..
        } = self;
        match command {
            Command::Init { force } => {
                let path = config_path.unwrap_or_else(config::global_config_path);
                init::run(&path, force)
            }
            Command::Methods { model } => {
                let registry = bootstrap(&config::resolve_config(config_path.as_deref())?)?;
                print!("{}", methods::describe(&registry, model.as_deref())?);
                Ok(())
            }
            Command::Call { model, method, ids } => {
                let registry = bootstrap(&config::resolve_config(config_path.as_deref())?)?;
                println!("{}", call::invoke(&registry, &model, &method, &ids)?);
                Ok(())
            }
        }
    }
}

/// Build a registry from the config: declare models, load modules in order,
/// then lock it.
pub fn bootstrap(config: &config::Config) -> Result<ModelRegistry> {
    let mut registry = ModelRegistry::new();
    for model in &config.models {
        registry.add_model(model.clone())?;
    }

    let modules = modules::resolve(&config.modules.load)?;
    for module in modules {
        registry
            .load(module)
            .with_context(|| format!("failed to load module '{}'", module.name()))?;
    }

    registry.bootstrap();
    Ok(registry)
}
