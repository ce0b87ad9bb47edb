use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use storage::DEFAULT_INTERNS_FILE;

pub const CONFIG_FILE: &str = "interns_guide.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_host: String,
    pub port: u16,
    pub interns_file: PathBuf,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".into(),
            port: 10000,
            interns_file: DEFAULT_INTERNS_FILE.into(),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .with_context(|| format!("invalid bind host '{}'", self.bind_host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Defaults, then `interns_guide.toml`, then `APP__*` variables, then `PORT`.
pub fn load_settings() -> anyhow::Result<Settings> {
    let env: HashMap<String, String> = std::env::vars().collect();
    settings_from(Path::new(CONFIG_FILE), env)
}

fn settings_from(file: &Path, env: HashMap<String, String>) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let port_override = env.get("PORT").cloned();

    let mut builder = Config::builder()
        .set_default("bind_host", defaults.bind_host)?
        .set_default("port", i64::from(defaults.port))?
        .set_default(
            "interns_file",
            defaults.interns_file.to_string_lossy().into_owned(),
        )?
        .set_default("log_filter", defaults.log_filter)?
        .add_source(File::from(file).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true)
                .source(Some(env)),
        );

    if let Some(port) = port_override.filter(|p| !p.trim().is_empty()) {
        builder = builder.set_override("port", port.trim().to_string())?;
    }

    builder
        .build()
        .with_context(|| format!("failed to read settings (config file '{}')", file.display()))?
        .try_deserialize()
        .context("invalid interns guide settings")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
