use crate::classifier::{priority_order, DEFAULT_BROWSERS};
use std::env::var;
use tracing::warn;

/// Reorders the fixed browser list, e.g. `Chrome,Firefox`.
/// Browsers not listed keep their default order after the listed ones.
const BROWSERS_ENV_VAR: &str = "LOG_ETL_BROWSERS";

pub struct Config {
    /// The five known browser tokens in priority order. The first one found in a user agent wins.
    pub browsers: Vec<String>,
}

impl Config {
    /// Creates a new Config instance from the environment variables.
    /// Uses the default order if the env var is not set or names no known browser.
    pub fn from_env() -> Self {
        Self::from_browser_list(var(BROWSERS_ENV_VAR).ok().as_deref())
    }

    fn from_browser_list(list: Option<&str>) -> Self {
        let list = match list {
            Some(v) => v,
            None => return Self::default(),
        };

        let names: Vec<&str> = list.split(',').map(str::trim).filter(|b| !b.is_empty()).collect();
        for name in names.iter().filter(|name| !DEFAULT_BROWSERS.contains(*name)) {
            warn!("{BROWSERS_ENV_VAR}: ignoring unknown browser {name}");
        }

        let browsers = priority_order(&names);
        if browsers == Self::default().browsers {
            warn!("{BROWSERS_ENV_VAR} does not change the priority. Using the default list.");
        }

        Self { browsers }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browsers: DEFAULT_BROWSERS.iter().map(|b| b.to_string()).collect(),
        }
    }
}
