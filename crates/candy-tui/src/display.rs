// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Pure projection of [`AppState`] into a display tree.
//!
//! Every activatable element is a [`Target`] bound to an [`Intent`]; the
//! terminal front end only decides which target is focused and turns an
//! activation into the intent's command.

use candy_app::{
    AppCommand, AppState, DISPLAYED_COLUMNS, Filter, FilterKind, LEGEND, SortDirection,
    is_displayed,
};
use serde::Serialize;

pub const TITLE: &str = "Candy Power Ranking";
pub const BLURB: &str = "Which Halloween candy reigns supreme? Visitors picked the better of two \
randomly paired treats across roughly 269,000 matchups. Sort by any column and narrow the field \
with the ingredient filters.";
pub const SOURCE_LINK: Link = Link {
    label: "FiveThirtyEight: The Ultimate Halloween Candy Power Ranking",
    url: "https://fivethirtyeight.com/features/the-ultimate-halloween-candy-power-ranking/",
};

const SHOW_LEGEND: &str = "show legend";
const HIDE_LEGEND: &str = "hide legend";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", content = "value", rename_all = "snake_case")]
pub enum Intent {
    SortBy(String),
    SetFilter(Filter),
    ToggleLegend,
}

impl Intent {
    pub fn command(&self) -> AppCommand {
        match self {
            Self::SortBy(column) => AppCommand::ToggleSort(column.clone()),
            Self::SetFilter(filter) => AppCommand::ToggleFilter(filter.clone()),
            Self::ToggleLegend => AppCommand::ToggleLegend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub label: String,
    pub intent: Intent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blurb {
    pub text: &'static str,
    pub link: Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub column: &'static str,
    pub meaning: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub target: Target,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterGroup {
    pub column: String,
    pub chips: Vec<FilterChip>,
}

impl FilterGroup {
    pub fn active_chip(&self) -> Option<&FilterChip> {
        self.chips.iter().find(|chip| chip.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub column: String,
    pub target: Target,
    /// Not one of the displayed columns; still a sort target.
    pub hidden: bool,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn header(&self, column: &str) -> Option<&HeaderCell> {
        self.headers.iter().find(|header| header.column == column)
    }

    pub fn hidden_headers(&self) -> impl Iterator<Item = &HeaderCell> {
        self.headers.iter().filter(|header| header.hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub title: &'static str,
    pub blurb: Blurb,
    pub legend_toggle: Target,
    pub legend: Option<Vec<LegendEntry>>,
    pub filters: Vec<FilterGroup>,
    pub table: TableView,
    pub status: Option<String>,
}

impl Screen {
    /// Activatable targets in focus order.
    pub fn targets(&self) -> Vec<&Target> {
        let mut targets = vec![&self.legend_toggle];
        targets.extend(
            self.filters
                .iter()
                .flat_map(|group| group.chips.iter().map(|chip| &chip.target)),
        );
        targets.extend(self.table.headers.iter().map(|header| &header.target));
        targets
    }
}

pub fn present(state: &AppState) -> Screen {
    Screen {
        title: TITLE,
        blurb: Blurb {
            text: BLURB,
            link: SOURCE_LINK,
        },
        legend_toggle: Target {
            label: if state.legend.is_visible() {
                HIDE_LEGEND
            } else {
                SHOW_LEGEND
            }
            .to_owned(),
            intent: Intent::ToggleLegend,
        },
        legend: state.legend.is_visible().then(|| {
            LEGEND
                .iter()
                .map(|&(column, meaning)| LegendEntry { column, meaning })
                .collect()
        }),
        filters: present_filters(state),
        table: present_table(state),
        status: state.status_line.clone(),
    }
}

fn present_filters(state: &AppState) -> Vec<FilterGroup> {
    state
        .filters
        .iter()
        .map(|active| {
            let column = active.column();
            let chips = FilterKind::ALL
                .iter()
                .map(|kind| FilterChip {
                    target: Target {
                        label: kind.as_str().to_owned(),
                        intent: Intent::SetFilter(Filter::new(*kind, column)),
                    },
                    active: active.kind() == *kind,
                })
                .collect();
            FilterGroup {
                column: column.to_owned(),
                chips,
            }
        })
        .collect()
}

fn present_table(state: &AppState) -> TableView {
    let headers = state
        .headers
        .iter()
        .map(|column| {
            let sort = (state.sort.column() == Some(column.as_str()))
                .then(|| state.sort.direction());
            HeaderCell {
                column: column.clone(),
                target: Target {
                    label: header_label(column, sort),
                    intent: Intent::SortBy(column.clone()),
                },
                hidden: !is_displayed(column),
                sort,
            }
        })
        .collect();

    let rows = state
        .visible_rows()
        .into_iter()
        .map(|row| {
            DISPLAYED_COLUMNS
                .iter()
                .map(|column| row.get(column).unwrap_or_default().to_owned())
                .collect()
        })
        .collect();

    TableView {
        columns: DISPLAYED_COLUMNS.to_vec(),
        headers,
        rows,
    }
}

fn header_label(column: &str, sort: Option<SortDirection>) -> String {
    match sort {
        Some(SortDirection::Asc) => format!("{column} ↑"),
        Some(SortDirection::Desc) => format!("{column} ↓"),
        None => column.to_owned(),
    }
}
