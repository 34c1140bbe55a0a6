// Parser for the CSV bodies returned by the Flux query endpoint
use crate::application::timeseries_repository::Row;

/// Turn a query response into rows keyed by the header line.
///
/// Annotation lines (`#...`) and blank lines are skipped. Cells are split on
/// plain commas and trimmed; quoted cells are not unescaped and values are
/// kept as strings.
pub fn parse_query_csv(body: &str) -> Vec<Row> {
    let trimmed = body.trim();
    if trimmed.lines().count() < 2 {
        return Vec::new();
    }

    let mut lines = trimmed
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

    lines
        .map(|line| {
            headers
                .iter()
                .zip(line.split(',').map(str::trim))
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect::<Row>()
        })
        .collect()
}
