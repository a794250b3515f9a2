// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Dataset, Record};

const LINE_SEPARATOR: char = '\n';
const FIELD_SEPARATOR: char = ',';

/// Parses comma-separated text into a header list and one record per line.
///
/// There is no quoting support: every comma separates fields and every
/// newline separates rows. Each record zips headers with fields
/// positionally, so a short row lacks its trailing columns and a long row
/// drops its extra fields. Parsing never fails.
pub fn parse_dataset(body: &str) -> Dataset {
    let mut lines = body.split(LINE_SEPARATOR);
    let headers: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split(FIELD_SEPARATOR)
        .map(str::to_owned)
        .collect();

    let rows = lines.map(|line| parse_record(&headers, line)).collect();
    Dataset { headers, rows }
}

pub fn parse_record(headers: &[String], line: &str) -> Record {
    headers
        .iter()
        .zip(line.split(FIELD_SEPARATOR))
        .map(|(header, field)| (header.as_str(), field))
        .collect()
}
