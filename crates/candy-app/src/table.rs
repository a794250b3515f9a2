// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FilterSet, Record, SortDirection, SortDirective};
use std::cmp::Ordering;

pub fn apply_filters<'a>(rows: &'a [Record], filters: &FilterSet) -> Vec<&'a Record> {
    rows.iter().filter(|row| filters.matches(row)).collect()
}

/// Lexicographic comparison of the raw values for `column`. Values are never
/// parsed as numbers, so `"10"` sorts before `"9"`. A missing key compares as
/// the empty string.
pub fn compare_by_column(left: &Record, right: &Record, column: &str) -> Ordering {
    let left = left.get(column).unwrap_or_default();
    let right = right.get(column).unwrap_or_default();
    left.cmp(right)
}

pub fn sort_records(rows: &mut [&Record], sort: &SortDirective) {
    let Some(column) = sort.column() else {
        return;
    };

    match sort.direction() {
        SortDirection::Asc => rows.sort_by(|left, right| compare_by_column(left, right, column)),
        SortDirection::Desc => {
            rows.sort_by(|left, right| compare_by_column(left, right, column).reverse());
        }
    }
}

pub fn visible_rows<'a>(
    rows: &'a [Record],
    filters: &FilterSet,
    sort: &SortDirective,
) -> Vec<&'a Record> {
    let mut visible = apply_filters(rows, filters);
    sort_records(&mut visible, sort);
    visible
}
