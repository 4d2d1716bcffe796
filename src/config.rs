use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Optional TOML file read from the working directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Process-wide settings, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// SQLite connection string pointing at the storage file.
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:items.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `DATABASE_URL` / `LISTEN_ADDR` / `LOGLEVEL`.
    pub fn load() -> Result<Self, ApiError> {
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(&["database_url", "listen_addr", "loglevel"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_items_db() {
        figment::Jail::expect_with(|_jail| {
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.database_url, "sqlite:items.db");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                database_url = "sqlite:from-file.db"
                loglevel = "debug"
                "#,
            )?;
            jail.set_env("DATABASE_URL", "sqlite:from-env.db");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.database_url, "sqlite:from-env.db");
            assert_eq!(cfg.loglevel, "debug");
            assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
            Ok(())
        });
    }
}
