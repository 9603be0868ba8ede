//! CLI configuration: thin wrapper around `keygo_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (`--profile`, `--api-url`, `--timeout`, `--output`, `--color`).

use std::time::Duration;

use clap::ValueEnum;

use keygo_config::{Config, Profile};
use keygo_core::SessionConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use keygo_config::{config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill unset output and color flags from the config defaults.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// Build a `SessionConfig` from the config file, profile, and CLI overrides.
///
/// `--api-url` alone is enough; without it a profile must exist.
pub fn build_session_config(global: &GlobalOpts, config: &Config) -> Result<SessionConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut profile = match (config.profiles.get(&profile_name), &global.api_url) {
        (Some(profile), _) => profile.clone(),
        (None, Some(url)) => Profile::new(url.clone()),
        (None, None) if global.profile.is_some() => {
            return Err(profile_not_found(&profile_name, config));
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }

    let mut session = keygo_config::profile_to_session_config(&profile, &profile_name, &config.defaults)?;
    if let Some(secs) = global.timeout {
        session.timeout = Some(Duration::from_secs(secs));
    }
    Ok(session)
}

pub fn profile_not_found(name: &str, config: &Config) -> CliError {
    let mut available: Vec<_> = config.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name: name.into(),
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}
