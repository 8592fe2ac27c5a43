use crate::{Cli, Commands, SubmitArgs};
use chrono::Utc;
use recyclafy_core::RecyclafyCore;
use recyclafy_core::RecyclafyError;
use recyclafy_core::demo::DemoOptions;
use recyclafy_core::types::{AppConfig, AppConfigError, Config, NewDelivery, format_date};
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Core(#[from] RecyclafyError),

    #[error("config error: {0}")]
    Config(#[from] AppConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads config.toml from the data directory, repairing invalid values.
fn load_config(data_dir: &Path) -> Result<AppConfig, CliError> {
    let config = AppConfig::load(&AppConfig::path(data_dir))?;
    for problem in config.validate() {
        warn!(%problem, "invalid config value, using default");
    }
    Ok(config.with_defaults_for_invalid())
}

pub(crate) fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let app_config = load_config(&cli.data_dir)?;
    let data_dir = cli.data_dir.as_path();

    match cli.command {
        Commands::Submit(args) => {
            let core = open_core(data_dir, &app_config)?;
            let stored = core.submit_delivery(new_delivery(args), Utc::now())?;
            writeln!(out, "{}", serde_json::to_string_pretty(&stored)?)?;
        }
        Commands::List => {
            let deliveries = open_core(data_dir, &app_config)?.deliveries()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&deliveries)?)?;
        }
        Commands::Summary => {
            let summary = open_core(data_dir, &app_config)?.summary()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
        Commands::Demo { count } => {
            let options = DemoOptions {
                count: count.unwrap_or(app_config.demo.batch_size),
                window_days: app_config.demo.window_days,
            };
            let today = Utc::now().date_naive();
            let seeded = open_core(data_dir, &app_config)?.add_demo_data(
                options,
                today,
                &mut rand::thread_rng(),
            )?;
            writeln!(out, "seeded {seeded} demo deliveries")?;
        }
        Commands::Clear => {
            open_core(data_dir, &app_config)?.clear_all_data()?;
            writeln!(out, "all deliveries removed")?;
        }
        Commands::Config => {
            write!(out, "{}", toml::to_string_pretty(&app_config)?)?;
        }
    }

    Ok(())
}

fn open_core(data_dir: &Path, app_config: &AppConfig) -> Result<RecyclafyCore, CliError> {
    Ok(RecyclafyCore::open(Config {
        base_path: data_dir.to_path_buf(),
        write_mode: app_config.store.write_mode,
    })?)
}

fn new_delivery(args: SubmitArgs) -> NewDelivery {
    NewDelivery {
        date: args
            .date
            .unwrap_or_else(|| format_date(Utc::now().date_naive())),
        class_id: args.class_id,
        class_name: args.class_name,
        unit: args.unit,
        materials: args.materials,
        notes: args.notes,
    }
}
