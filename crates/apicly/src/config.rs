//! CLI-side configuration: profile selection and flag overrides on top of
//! `apicly_config`.
//!
//! Core never sees these types -- it receives a pre-built `ControllerConfig`.

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::SecretString;

use apicly_config::{
    Config, ConfigError, Profile, profile_tls, resolve_password, resolve_username,
};
use apicly_core::{ControllerConfig, TlsVerification};

pub use apicly_config::{config_path, load_config_or_default, parse_controller_url, save_config};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Comma-separated profile names for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build a `ControllerConfig` from the config file, profile, and CLI overrides.
pub fn build_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg, global);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    // No profile -- build from CLI flags / env vars alone
    let url_str = global
        .controller
        .as_deref()
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let url = parse_controller_url(url_str)?;

    let username = global
        .username
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;
    let password = password_or_prompt(&Profile::default(), &profile_name)?;

    let mut config = ControllerConfig::new(url, username, password);
    config.tls = if global.insecure || cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };
    config.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    config.concurrency = cfg.defaults.concurrency.max(1);
    Ok(config)
}

/// Translate a `Profile` + global flags into a `ControllerConfig`.
///
/// Flags win over the profile, the profile wins over `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ControllerConfig, CliError> {
    let url_str = global.controller.as_deref().unwrap_or(&profile.controller);
    let url = parse_controller_url(url_str)?;

    let username = match global.username {
        Some(ref user) => user.clone(),
        None => resolve_username(profile, profile_name)?,
    };
    let password = password_or_prompt(profile, profile_name)?;

    let mut config = ControllerConfig::new(url, username, password);
    config.tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        profile_tls(profile, &cfg.defaults)
    };
    config.timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );
    config.concurrency = profile
        .concurrency
        .unwrap_or(cfg.defaults.concurrency)
        .max(1);
    Ok(config)
}

/// Run the password chain; if it comes up empty and we have a terminal,
/// ask for the password instead of failing.
fn password_or_prompt(profile: &Profile, profile_name: &str) -> Result<SecretString, CliError> {
    match resolve_password(profile, profile_name) {
        Ok(password) => Ok(password),
        Err(ConfigError::NoCredentials { .. }) if std::io::stdin().is_terminal() => {
            let password = rpassword::prompt_password("Password: ")?;
            if password.is_empty() {
                return Err(CliError::NoCredentials {
                    profile: profile_name.into(),
                });
            }
            Ok(SecretString::from(password))
        }
        Err(e) => Err(e.into()),
    }
}
