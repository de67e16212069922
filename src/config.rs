use std::path::PathBuf;

use url::Url;

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    pub api: Api,
    #[serde(default)]
    pub schedule: Schedule,
}

#[derive(serde::Deserialize)]
pub struct Api {
    pub url: Url,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password_file: Option<PathBuf>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl core::fmt::Debug for Api {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Api")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password_file", &self.password_file)
            .field("password", &"<hidden>")
            .field("token", &"<hidden>")
            .finish()
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Schedule {
    /// Months fetched on either side of the pivot date.
    #[serde(default = "default_window_months")]
    pub window_months: u32,
    /// Only offer functional equipment for assignment.
    #[serde(default = "default_functional_only")]
    pub functional_only: bool,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            window_months: default_window_months(),
            functional_only: default_functional_only(),
        }
    }
}

pub fn init(path: PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
    let string = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&string)?;

    if let Some(file) = &config.api.password_file {
        let password = std::fs::read_to_string(file)?;

        config.api.password = Some(password.trim_end().to_string());
    }

    if config.api.token.is_none()
        && (config.api.username.is_none() || config.api.password.is_none())
    {
        return Err("api credentials missing: set token, or username and password".into());
    }

    // Url::join drops the last path segment without this.
    if !config.api.url.path().ends_with('/') {
        let path = format!("{}/", config.api.url.path());
        config.api.url.set_path(&path);
    }

    Ok(config)
}

const fn default_window_months() -> u32 {
    6
}

const fn default_functional_only() -> bool {
    true
}
