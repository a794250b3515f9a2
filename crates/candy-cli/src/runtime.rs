// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use candy_app::Dataset;
use candy_tui::InternalEvent;
use std::sync::mpsc::Sender;
use std::thread;
use tracing::warn;

/// Where the one dataset load comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    Remote(candy_fetch::Client),
    Bundled,
}

pub struct LoaderRuntime {
    source: DatasetSource,
}

impl LoaderRuntime {
    pub fn new(source: DatasetSource) -> Self {
        Self { source }
    }
}

impl DatasetSource {
    pub fn load(&self) -> Result<Dataset> {
        match self {
            Self::Remote(client) => client.fetch_dataset(),
            Self::Bundled => Ok(candy_testkit::sample_dataset()),
        }
    }
}

impl candy_tui::AppRuntime for LoaderRuntime {
    fn load_dataset(&mut self) -> Result<Dataset> {
        self.source.load()
    }

    fn spawn_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let source = self.source.clone();
        thread::Builder::new()
            .name("dataset-load".to_owned())
            .spawn(move || {
                let event = match source.load() {
                    Ok(dataset) => InternalEvent::DatasetLoaded(dataset),
                    Err(error) => InternalEvent::DatasetFailed(format!("{error:#}")),
                };
                if tx.send(event).is_err() {
                    warn!("dataset load finished after the viewer exited");
                }
            })
            .map_err(|error| anyhow!("spawn dataset loader: {error}"))?;
        Ok(())
    }
}
