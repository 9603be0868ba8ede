//! Config subcommand handlers.

use keygo_config::{Profile, load_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { url, name, force } => {
            // Unlike other commands, a broken config file is an error here
            // rather than silently replaced by defaults.
            let mut cfg = if config::config_path().exists() {
                load_config()?
            } else {
                keygo_config::Config::default()
            };
            let profile_name = name
                .or_else(|| global.profile.clone())
                .unwrap_or_else(|| "default".into());

            if cfg.profiles.contains_key(&profile_name) && !force {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: format!("profile '{profile_name}' already exists; pass --force to replace it"),
                });
            }

            let profile = Profile::new(url);
            // Validate the URL before anything is written.
            keygo_config::profile_to_session_config(&profile, &profile_name, &cfg.defaults)?;

            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }

            let path = config::save_config(&cfg)?;
            output::status(
                &format!("Profile '{profile_name}' written to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                global.format(),
                &cfg,
                |c| format!("{c:#?}"),
                |c| {
                    let mut names: Vec<_> = c.profiles.keys().cloned().collect();
                    names.sort();
                    names.join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
