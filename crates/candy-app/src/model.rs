// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Binary attribute columns that carry an include/exclude/all filter.
pub const FILTERABLE_COLUMNS: [&str; 8] = [
    "fruity",
    "caramel",
    "peanutyalmondy",
    "nougat",
    "crispedricewafer",
    "hard",
    "bar",
    "pluribus",
];

/// Columns whose values are shown in table cells, in display order.
pub const DISPLAYED_COLUMNS: [&str; 4] =
    ["competitorname", "sugarpercent", "pricepercent", "winpercent"];

pub const LEGEND: [(&str, &str); 13] = [
    ("competitorname", "name of the candy"),
    ("chocolate", "does it contain chocolate?"),
    ("fruity", "is it fruit flavored?"),
    ("caramel", "is there caramel in the candy?"),
    ("peanutyalmondy", "does it contain peanuts, peanut butter or almonds?"),
    ("nougat", "does it contain nougat?"),
    ("crispedricewafer", "does it contain crisped rice, wafers, or a cookie component?"),
    ("hard", "is it a hard candy?"),
    ("bar", "is it a candy bar?"),
    ("pluribus", "is it one of many candies in a bag or box?"),
    ("sugarpercent", "percentile of sugar it falls under within the data set"),
    ("pricepercent", "unit price percentile compared to the rest of the set"),
    ("winpercent", "overall win percentage according to 269,000 matchups"),
];

pub fn is_displayed(column: &str) -> bool {
    DISPLAYED_COLUMNS.contains(&column)
}

/// One data row keyed by column header. Values are kept as raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    Include,
    Exclude,
    All,
}

impl FilterKind {
    pub const ALL: [Self; 3] = [Self::Include, Self::Exclude, Self::All];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::All => "all",
        }
    }
}

/// Filter over a single column.
///
/// `Include` keeps rows whose value is exactly `"1"`, `Exclude` keeps rows
/// whose value is exactly `"0"`, and `All` keeps any row that has the column
/// at all. A row missing the key fails every variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "column", rename_all = "snake_case")]
pub enum Filter {
    Include(String),
    Exclude(String),
    All(String),
}

impl Filter {
    pub fn new(kind: FilterKind, column: impl Into<String>) -> Self {
        let column = column.into();
        match kind {
            FilterKind::Include => Self::Include(column),
            FilterKind::Exclude => Self::Exclude(column),
            FilterKind::All => Self::All(column),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Self::Include(column) | Self::Exclude(column) | Self::All(column) => column,
        }
    }

    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::Include(_) => FilterKind::Include,
            Self::Exclude(_) => FilterKind::Exclude,
            Self::All(_) => FilterKind::All,
        }
    }

    pub const fn label(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Include(column) => record.get(column) == Some("1"),
            Self::Exclude(column) => record.get(column) == Some("0"),
            Self::All(column) => record.contains(column),
        }
    }
}

/// Exactly one active filter per filterable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            filters: FILTERABLE_COLUMNS
                .iter()
                .map(|column| Filter::All((*column).to_owned()))
                .collect(),
        }
    }
}

impl FilterSet {
    pub fn get(&self, column: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.column() == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Replaces the filter for the column `filter` targets. Returns whether a
    /// slot for that column existed.
    pub fn set(&mut self, filter: Filter) -> bool {
        match self
            .filters
            .iter_mut()
            .find(|active| active.column() == filter.column())
        {
            Some(slot) => {
                *slot = filter;
                true
            }
            None => false,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Active sort. The direction is shared by every column; `Ascending(None)`
/// leaves rows in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", content = "column", rename_all = "snake_case")]
pub enum SortDirective {
    Ascending(Option<String>),
    Descending(Option<String>),
}

impl Default for SortDirective {
    fn default() -> Self {
        Self::Ascending(None)
    }
}

impl SortDirective {
    pub const fn direction(&self) -> SortDirection {
        match self {
            Self::Ascending(_) => SortDirection::Asc,
            Self::Descending(_) => SortDirection::Desc,
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Ascending(column) | Self::Descending(column) => column.as_deref(),
        }
    }

    pub fn toggled(&self, column: &str) -> Self {
        match self {
            Self::Ascending(_) => Self::Descending(Some(column.to_owned())),
            Self::Descending(_) => Self::Ascending(Some(column.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendVisibility {
    #[default]
    Hidden,
    Visible,
}

impl LegendVisibility {
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        }
    }
}

impl From<bool> for LegendVisibility {
    fn from(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }
}
