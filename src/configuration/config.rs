#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ChatID,
    ConfigFile,
    RequestTimeout,
}

impl ConfigKey {
    /// Keys that only exist for the lifetime of a single invocation and are
    /// never read from or written to the config file.
    fn is_runtime_only(&self) -> bool {
        return *self == ConfigKey::ChatID || *self == ConfigKey::ConfigFile;
    }

    fn is_integer(&self) -> bool {
        return *self == ConfigKey::RequestTimeout;
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("threadchat/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(env::var("HOME").unwrap_or_default())
            .join(".config/threadchat/config.toml");

        let res = match key {
            ConfigKey::ApiURL => "http://localhost:8000".to_string(),
            ConfigKey::RequestTimeout => "10000".to_string(),

            // Special
            ConfigKey::ChatID => "".to_string(),
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key.is_runtime_only() {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if key.is_integer() && val_str.parse::<u64>().is_err() {
                            bail!(format!(
                                "config.toml has an invalid value for key '{key}': {val_str}\nExpected a number of milliseconds."
                            ));
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!("config.toml has an invalid value for key '{key}'"));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        if Config::get(ConfigKey::RequestTimeout).parse::<u64>().is_err() {
            bail!(format!(
                "Invalid value for '{}': {}",
                ConfigKey::RequestTimeout,
                Config::get(ConfigKey::RequestTimeout)
            ));
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            chat_id = Config::get(ConfigKey::ChatID),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key.is_runtime_only() {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if key.is_integer() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
