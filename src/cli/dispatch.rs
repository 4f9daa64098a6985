//! Command dispatch logic extracted from binary to reduce main function size.

use super::{
    args::{Cli, Commands, RepairOverrides},
    handlers::{handle_check, handle_config, handle_repair},
};
use crate::config::Config;
use crate::error::GatexError;
use crate::exit::GatexExit;
use anyhow::{Context, Result};

/// Loads configuration, applies global flags, and runs the command.
///
/// # Errors
/// Returns error if configuration is invalid or the handler fails.
pub fn execute(cli: Cli) -> Result<GatexExit> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(threads) = cli.threads {
        config.engine.threads = threads;
    }

    let Some(command) = cli.command else {
        return Ok(GatexExit::Success);
    };

    match command {
        Commands::Check {
            input,
            catalog,
            json,
        } => {
            configure_pool(&config)?;
            handle_check(&config, &input, &catalog, json)
        }
        Commands::Repair {
            input,
            catalog,
            strategy,
            mode,
            constraints,
            report,
            time_limit,
        } => {
            let overrides = RepairOverrides {
                strategy,
                mode,
                constraints,
                report,
                time_limit,
            };
            apply_overrides(&mut config, overrides);
            config.validate()?;
            configure_pool(&config)?;
            handle_repair(&config, &input, &catalog)
        }
        Commands::Config => handle_config(&config),
    }
}

/// Flags win over the file.
pub fn apply_overrides(config: &mut Config, overrides: RepairOverrides) {
    let engine = &mut config.engine;
    engine.strategy = overrides.strategy.unwrap_or(engine.strategy);
    engine.mode = overrides.mode.unwrap_or(engine.mode);
    engine.constraints = overrides.constraints.unwrap_or(engine.constraints);
    engine.time_limit_secs = overrides.time_limit.unwrap_or(engine.time_limit_secs);
    if let Some(path) = overrides.report {
        config.report.path = path;
    }
}

/// Maps a failure to the process exit code.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> GatexExit {
    match err.downcast_ref::<GatexError>() {
        Some(e) if e.is_input_error() => GatexExit::InvalidInput,
        _ => GatexExit::Error,
    }
}

fn configure_pool(config: &Config) -> Result<()> {
    if config.engine.threads == 0 {
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.engine.threads)
        .build_global()
        .context("failed to configure worker threads")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{EditMode, Strategy};

    #[test]
    fn flags_override_file_values() {
        let mut config = Config::parse_toml("[engine]\nmode = \"add\"\n").unwrap();
        apply_overrides(
            &mut config,
            RepairOverrides {
                strategy: Some(Strategy::Heuristic),
                mode: Some(EditMode::Delete),
                ..RepairOverrides::default()
            },
        );
        assert_eq!(config.engine.strategy, Strategy::Heuristic);
        assert_eq!(config.engine.mode, EditMode::Delete);
        assert_eq!(config.report.path, std::path::PathBuf::from("gatex-report.txt"));
    }

    #[test]
    fn input_errors_map_to_invalid_input() {
        let err = anyhow::Error::new(GatexError::InputParse {
            line: 1,
            reason: "bad".into(),
        });
        assert_eq!(exit_code_for(&err), GatexExit::InvalidInput);
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), GatexExit::Error);
    }
}
