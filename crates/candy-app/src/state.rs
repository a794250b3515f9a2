// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Dataset, Filter, FilterSet, LegendVisibility, Record, SortDirective, table};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
    pub sort: SortDirective,
    pub filters: FilterSet,
    pub legend: LegendVisibility,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    DataLoaded(Dataset),
    ToggleSort(String),
    ToggleFilter(Filter),
    ToggleLegend,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    DataReplaced { rows: usize },
    SortChanged(SortDirective),
    FilterChanged(Filter),
    LegendVisibilityChanged(LegendVisibility),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::DataLoaded(dataset) => self.replace_data(dataset),
            AppCommand::ToggleSort(column) => {
                self.sort = self.sort.toggled(&column);
                let status = format!("sort {column} {}", self.sort.direction().as_str());
                vec![
                    AppEvent::SortChanged(self.sort.clone()),
                    self.set_status(&status),
                ]
            }
            AppCommand::ToggleFilter(filter) => {
                if !self.filters.set(filter.clone()) {
                    debug!(column = filter.column(), "ignoring filter for unfilterable column");
                    return Vec::new();
                }
                let status = format!("{} {}", filter.column(), filter.label());
                vec![AppEvent::FilterChanged(filter), self.set_status(&status)]
            }
            AppCommand::ToggleLegend => {
                self.legend = self.legend.toggled();
                vec![AppEvent::LegendVisibilityChanged(self.legend)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// By-value form of [`AppState::dispatch`] for callers that thread state
    /// through a reducer.
    pub fn reduce(mut self, command: AppCommand) -> Self {
        self.dispatch(command);
        self
    }

    /// Rows passing every active filter, in the active sort order.
    pub fn visible_rows(&self) -> Vec<&Record> {
        table::visible_rows(&self.rows, &self.filters, &self.sort)
    }

    fn replace_data(&mut self, dataset: Dataset) -> Vec<AppEvent> {
        let Dataset { headers, rows } = dataset;
        debug!(headers = headers.len(), rows = rows.len(), "dataset replaced");

        self.sort = SortDirective::Ascending(headers.first().cloned());
        self.headers = headers;
        self.rows = rows;
        vec![
            AppEvent::DataReplaced {
                rows: self.rows.len(),
            },
            AppEvent::SortChanged(self.sort.clone()),
        ]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
