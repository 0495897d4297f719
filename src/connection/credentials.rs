//! Resolution of the LSD user and password.
//!
//! Each field is looked up on its own, first present non-empty value wins:
//!
//! 1. the explicit [`ConnectionConfiguration`]
//! 2. the `LSD_USER` / `LSD_PASSWORD` environment variables
//! 3. the per-user config file, `$LSD_CONFIG` or `~/.lsd/config.toml`
//!
//! ```toml
//! user = "yev"
//! password = "..."
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::ConfigurationError;

pub const USER_VAR: &str = "LSD_USER";
pub const PASSWORD_VAR: &str = "LSD_PASSWORD";
pub const CONFIG_VAR: &str = "LSD_CONFIG";

/// Credentials supplied by the caller. Empty fields fall through to the
/// next source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionConfiguration {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl ConnectionConfiguration {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        ConnectionConfiguration {
            user: user.into(),
            password: password.into(),
        }
    }
}

/// A fully resolved user and password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Resolves credentials from the process environment and the default
    /// config file location.
    pub fn resolve(explicit: Option<&ConnectionConfiguration>) -> Result<Self, ConfigurationError> {
        let config_file = default_config_file(|name| std::env::var(name).ok());
        Self::resolve_from(explicit, |name| std::env::var(name).ok(), config_file.as_deref())
    }

    /// Resolves credentials from explicit sources. `env` looks up an
    /// environment variable; `config_file` is only read when the first two
    /// sources leave a field empty.
    pub fn resolve_from<F>(
        explicit: Option<&ConnectionConfiguration>,
        env: F,
        config_file: Option<&Path>,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut user = first_present([explicit.map(|c| c.user.clone()), env(USER_VAR)]);
        let mut password = first_present([explicit.map(|c| c.password.clone()), env(PASSWORD_VAR)]);

        if user.is_none() || password.is_none() {
            if let Some(from_file) = config_file.map(read_config_file).transpose()?.flatten() {
                user = user.or(non_empty(from_file.user));
                password = password.or(non_empty(from_file.password));
            }
        }

        let config_file = config_file
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.lsd/config.toml".to_string());

        match (user, password) {
            (Some(user), Some(password)) => Ok(Credentials { user, password }),
            (None, _) => Err(ConfigurationError::MissingUser { config_file }),
            (_, None) => Err(ConfigurationError::MissingPassword { config_file }),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// `$LSD_CONFIG` if set, otherwise `$HOME/.lsd/config.toml`.
pub fn default_config_file<F>(env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env(CONFIG_VAR).and_then(non_empty) {
        return Some(PathBuf::from(path));
    }
    env("HOME")
        .and_then(non_empty)
        .map(|home| Path::new(&home).join(".lsd").join("config.toml"))
}

/// A missing file is not an error; an unreadable or malformed one is.
fn read_config_file(path: &Path) -> Result<Option<ConnectionConfiguration>, ConfigurationError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigurationError::ConfigFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| ConfigurationError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|value| !value.is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
