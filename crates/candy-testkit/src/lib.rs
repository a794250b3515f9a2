// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use candy_app::{AppCommand, AppState, Dataset, parse_dataset};

/// A slice of the candy power ranking, in the same shape as the published CSV.
pub const SAMPLE_CSV: &str = "competitorname,chocolate,fruity,caramel,peanutyalmondy,nougat,crispedricewafer,hard,bar,pluribus,sugarpercent,pricepercent,winpercent
100 Grand,1,0,1,0,0,1,0,1,0,.73199999,.86000001,66.971725
3 Musketeers,1,0,0,0,1,0,0,1,0,.60399997,.51099998,67.602936
Air Heads,0,1,0,0,0,0,0,0,0,.90600002,.51099998,52.341465
Almond Joy,1,0,0,1,0,0,0,1,0,.465,.76700002,50.347546
Baby Ruth,1,0,1,1,1,0,0,1,0,.60399997,.76700002,56.914547
Boston Baked Beans,0,0,0,1,0,0,0,0,1,.31299999,.51099998,23.417824
Candy Corn,0,0,0,0,0,0,0,0,1,.90600002,.32499999,38.010963
Dum Dums,0,1,0,0,0,0,1,0,0,.73199999,.034000002,39.460556
Haribo Gold Bears,0,1,0,0,0,0,0,0,1,.465,.465,57.11974
Jolly Rancher,0,1,0,0,0,0,1,0,1,.89999998,.22,41.666164
Kit Kat,1,0,0,0,0,1,0,1,0,.31299999,.51099998,76.7686
Milky Way,1,0,1,0,1,0,0,1,0,.60399997,.65100002,73.099556
One dime,0,0,0,0,0,0,0,0,0,.011,.116,32.261086
Reese's Peanut Butter cup,1,0,0,1,0,0,0,0,0,.72000003,.65100002,84.18029
Skittles original,0,1,0,0,0,0,0,0,1,.94099998,.22,63.08514
Snickers,1,0,1,1,1,0,0,1,0,.546,.65100002,76.673782
Starburst,0,1,0,0,0,0,0,0,1,.15099999,.22,67.037628
Twix,1,0,1,0,0,1,0,1,0,.546,.90600002,81.642914
Warheads,0,1,0,0,0,0,1,0,0,.093000002,.116,39.0119";

/// Number of data lines in [`SAMPLE_CSV`].
pub const SAMPLE_ROW_COUNT: usize = 19;

pub fn sample_dataset() -> Dataset {
    parse_dataset(SAMPLE_CSV)
}

pub fn loaded_state() -> AppState {
    AppState::default().reduce(AppCommand::DataLoaded(sample_dataset()))
}

#[cfg(test)]
mod tests {
    use super::{SAMPLE_ROW_COUNT, loaded_state, sample_dataset};
    use candy_app::{DISPLAYED_COLUMNS, FILTERABLE_COLUMNS, SortDirective};

    #[test]
    fn sample_dataset_has_every_known_column() {
        let dataset = sample_dataset();
        assert_eq!(dataset.rows.len(), SAMPLE_ROW_COUNT);
        for column in DISPLAYED_COLUMNS.iter().chain(FILTERABLE_COLUMNS.iter()) {
            assert!(dataset.headers.iter().any(|header| header == column));
            assert!(dataset.rows.iter().all(|row| row.contains(column)));
        }
    }

    #[test]
    fn loaded_state_sorts_by_first_header() {
        let state = loaded_state();
        assert_eq!(
            state.sort,
            SortDirective::Ascending(Some("competitorname".to_owned()))
        );
        assert_eq!(state.visible_rows().len(), SAMPLE_ROW_COUNT);
    }
}
