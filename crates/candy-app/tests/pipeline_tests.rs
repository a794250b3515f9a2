// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use candy_app::{
    AppCommand, AppState, FILTERABLE_COLUMNS, Filter, FilterKind, Record, SortDirective,
    parse_dataset,
};

fn names(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|row| row.get("competitorname").unwrap_or_default().to_owned())
        .collect()
}

const BODY: &str = "competitorname,fruity,caramel,peanutyalmondy,nougat,crispedricewafer,hard,bar,pluribus,winpercent\n\
Skittles,1,0,0,0,0,0,0,1,63.08\n\
Snickers,0,1,1,1,0,0,1,0,76.67\n\
Jolly Rancher,1,0,0,0,0,1,0,1,41.68\n\
Twix,0,1,0,0,1,0,1,0,81.64";

#[test]
fn two_row_dataset_sorts_win_percentage_as_strings() {
    let state = AppState::default()
        .reduce(AppCommand::DataLoaded(parse_dataset(
            "winpercent,competitorname,bar\n9,Nine,1\n10,Ten,0",
        )));

    assert_eq!(
        state.sort,
        SortDirective::Ascending(Some("winpercent".to_owned()))
    );
    // The default filters require every filterable column to be present, so
    // rows lacking them are dropped; compare the raw sort directly.
    let mut rows: Vec<&Record> = state.rows.iter().collect();
    candy_app::table::sort_records(&mut rows, &state.sort);
    let wins: Vec<&str> = rows.iter().filter_map(|row| row.get("winpercent")).collect();
    assert_eq!(wins, vec!["10", "9"]);
}

#[test]
fn filter_then_sort_over_a_loaded_dataset() {
    let state = AppState::default()
        .reduce(AppCommand::DataLoaded(parse_dataset(BODY)))
        .reduce(AppCommand::ToggleFilter(Filter::Include("fruity".to_owned())))
        .reduce(AppCommand::ToggleSort("winpercent".to_owned()));

    assert_eq!(
        state.sort,
        SortDirective::Descending(Some("winpercent".to_owned()))
    );
    assert_eq!(
        names(&state.visible_rows()),
        vec!["Skittles".to_owned(), "Jolly Rancher".to_owned()]
    );
}

#[test]
fn every_filter_kind_combines_with_and() {
    let state = AppState::default()
        .reduce(AppCommand::DataLoaded(parse_dataset(BODY)))
        .reduce(AppCommand::ToggleFilter(Filter::Exclude("fruity".to_owned())))
        .reduce(AppCommand::ToggleFilter(Filter::Include("bar".to_owned())))
        .reduce(AppCommand::ToggleFilter(Filter::Exclude("nougat".to_owned())));

    assert_eq!(names(&state.visible_rows()), vec!["Twix".to_owned()]);

    let reset = FILTERABLE_COLUMNS.iter().fold(state, |state, column| {
        state.reduce(AppCommand::ToggleFilter(Filter::new(FilterKind::All, *column)))
    });
    assert_eq!(reset.visible_rows().len(), 4);
}

#[test]
fn default_state_shows_nothing_until_loaded() {
    let state = AppState::default();
    assert!(state.visible_rows().is_empty());
    assert_eq!(state.sort, SortDirective::Ascending(None));
}
