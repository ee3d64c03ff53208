use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://xamil.chickenkiller.com/api";
pub const SETTINGS_FILE: &str = "user_admin.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

/// Defaults, then `user_admin.toml`, then environment, then the command line.
pub fn load_settings(cli_api_url: Option<&str>) -> Settings {
    load_settings_from(
        Path::new(SETTINGS_FILE),
        |name| std::env::var(name).ok(),
        cli_api_url,
    )
}

fn load_settings_from(
    settings_path: &Path,
    env: impl Fn(&str) -> Option<String>,
    cli_api_url: Option<&str>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(settings_path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_url") {
                    settings.api_url = v.clone();
                }
            }
            Err(err) => tracing::warn!(
                path = %settings_path.display(),
                "ignoring unreadable settings file: {err}"
            ),
        }
    }

    if let Some(v) = env("USER_ADMIN_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = cli_api_url {
        settings.api_url = v.to_string();
    }

    settings
}

/// Trims the configured base URL and rejects anything that is not http(s).
pub fn normalize_api_url(raw_api_url: &str) -> anyhow::Result<String> {
    let trimmed = raw_api_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("API base URL is empty");
    }
    let parsed = Url::parse(trimmed).with_context(|| format!("'{trimmed}' is not a URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported API URL scheme '{}'", parsed.scheme());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
