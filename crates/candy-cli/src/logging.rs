// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::APP_NAME;

const DEFAULT_FILTER: &str = "info";

pub fn log_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os("CANDY_LOG_PATH") {
        return Ok(PathBuf::from(path));
    }

    let cache_root = dirs::cache_dir().ok_or_else(|| {
        anyhow!("cannot resolve cache directory; set CANDY_LOG_PATH to the log file")
    })?;
    Ok(cache_root.join(APP_NAME).join("candy.log"))
}

/// Sends `tracing` output to a log file; the terminal belongs to the viewer.
/// Verbosity comes from `CANDY_LOG` using `EnvFilter` syntax.
pub fn init() -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CANDY_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(path)
}
