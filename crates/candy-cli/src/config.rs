// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use candy_fetch::DEFAULT_DATASET_URL;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "candy";
const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source: Source::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub url: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_DATASET_URL.to_owned()),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub show_legend: Option<bool>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("CANDY_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set CANDY_CONFIG_PATH to the config file")
        })?;

        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [source] and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(url) = &self.source.url {
            candy_fetch::parse_dataset_url(url)
                .with_context(|| format!("invalid source.url in {}", path.display()))?;
        }

        if let Some(timeout) = &self.source.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "source.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        Ok(())
    }

    pub fn source_url(&self) -> &str {
        self.source.url.as_deref().unwrap_or(DEFAULT_DATASET_URL)
    }

    /// `None` when no timeout is configured; the fetch then waits forever.
    pub fn source_timeout(&self) -> Result<Option<Duration>> {
        self.source
            .timeout
            .as_deref()
            .map(parse_duration)
            .transpose()
    }

    pub fn show_legend(&self) -> bool {
        self.ui.show_legend.unwrap_or(false)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# candy config\n# Place this file at: {}\n\nversion = 1\n\n[source]\nurl = \"{}\"\n# Optional. Omit to wait for the response indefinitely.\n# timeout = \"30s\"\n\n[ui]\nshow_legend = false\n",
            path.display(),
            DEFAULT_DATASET_URL,
        )
    }
}

/// Suffix and its length in milliseconds. `ms` must be tried before `s`.
const DURATION_UNITS: [(&str, u64); 3] = [("ms", 1), ("s", 1_000), ("m", 60_000)];

fn parse_duration(raw: &str) -> Result<Duration> {
    let Some((count, unit_millis)) = DURATION_UNITS
        .iter()
        .find_map(|&(suffix, millis)| raw.strip_suffix(suffix).map(|count| (count, millis)))
    else {
        bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 30s)");
    };

    let count: u64 = count
        .parse()
        .with_context(|| format!("invalid timeout duration {raw:?}"))?;
    let millis = count
        .checked_mul(unit_millis)
        .ok_or_else(|| anyhow!("timeout duration {raw:?} is too large"))?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_duration};
    use anyhow::Result;
    use candy_fetch::DEFAULT_DATASET_URL;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.source_url(), DEFAULT_DATASET_URL);
        assert_eq!(config.source_timeout()?, None);
        assert!(!config.show_legend());
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[source]\nurl = \"https://example.com/a.csv\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[source] and [ui]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[source]\nurl = \"http://localhost:8000/candy.csv\"\ntimeout = \"2s\"\n[ui]\nshow_legend = true\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.source_url(), "http://localhost:8000/candy.csv");
        assert_eq!(config.source_timeout()?, Some(Duration::from_secs(2)));
        assert!(config.show_legend());
        Ok(())
    }

    #[test]
    fn partial_config_keeps_default_url() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nshow_legend = true\n")?;
        let config = Config::load(&path)?;
        assert_eq!(config.source_url(), DEFAULT_DATASET_URL);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn non_http_url_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[source]\nurl = \"ftp://example.com/a.csv\"\n")?;
        let error = Config::load(&path).expect_err("ftp url should fail");
        let message = format!("{error:#}");
        assert!(message.contains("invalid source.url"), "unexpected message: {message}");
        assert!(message.contains("unsupported scheme"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("CANDY_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("CANDY_CONFIG_PATH");
        }
        assert_eq!(resolved?, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("CANDY_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("candy/config.toml"));
        Ok(())
    }

    #[test]
    fn timeout_parses_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("30s")?, Duration::from_secs(30));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        Ok(())
    }

    #[test]
    fn timeout_rejects_invalid_duration() {
        let error = parse_duration("soon").expect_err("invalid duration should fail");
        let message = error.to_string();
        assert!(
            message.contains("invalid duration") || message.contains("invalid timeout duration"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn timeout_rejects_non_positive_values_in_config() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[source]\ntimeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn timeout_rejects_overflowing_values_in_config() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[source]\ntimeout = \"307445734561825861m\"\n")?;
        let error = Config::load(&path).expect_err("overflowing timeout should fail");
        assert!(error.to_string().contains("too large"), "unexpected message: {error:#}");
        Ok(())
    }

    #[test]
    fn timeout_rejects_overflow_in_every_unit() {
        for raw in ["18446744073709552s", "307445734561825861m"] {
            let error = parse_duration(raw).expect_err("overflow should fail");
            assert!(error.to_string().contains("too large"));
        }
        assert_eq!(
            parse_duration("18446744073709551615ms").ok(),
            Some(Duration::from_millis(u64::MAX))
        );
    }

    #[test]
    fn example_config_round_trips() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[source]"));
        assert!(example.contains("[ui]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.source_url(), DEFAULT_DATASET_URL);
        Ok(())
    }
}
