use csv::{ReaderBuilder, StringRecord};

use crate::domain::entities::table::{Cell, Grid, Row};
use crate::domain::error::ImportError;

/// Parses a tab separated spreadsheet selection into rows of trimmed cells.
///
/// The first line with a non-empty cell (after dropping trailing empty
/// cells) fixes the grid width and is kept as the first row. Blank lines
/// before it are skipped. Every row is capped to that width; shorter rows
/// stay short.
pub fn parse_grid(raw_text: &str) -> Result<Grid, ImportError> {
    if raw_text.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let normalized = raw_text.replace('\r', "");
    // A terminating newline ends the last line, it does not start a new one.
    let body = normalized.strip_suffix('\n').unwrap_or(&normalized);

    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false);

    let mut grid = Grid::new();
    let mut width: Option<usize> = None;

    for line in body.split('\n') {
        let mut row = split_line(&builder, line);

        let row_width = match width {
            Some(width) => width,
            None => match header_width(&row) {
                Some(detected) => {
                    width = Some(detected);
                    detected
                }
                None => continue,
            },
        };

        row.truncate(row_width);
        grid.push(row);
    }

    Ok(grid)
}

/// Lines are split one at a time so that an empty line still yields a row
/// (a single empty cell), the same as a line holding only spaces.
fn split_line(builder: &ReaderBuilder, line: &str) -> Row {
    let mut reader = builder.from_reader(line.as_bytes());
    // Reading from an in-memory str cannot hit I/O or UTF-8 errors.
    match reader.records().next() {
        Some(Ok(record)) => clean_row(&record),
        _ => vec![Cell::new()],
    }
}

fn clean_row(record: &StringRecord) -> Row {
    record.iter().map(clean_cell).collect()
}

fn clean_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

fn header_width(row: &[Cell]) -> Option<usize> {
    row.iter()
        .rposition(|cell| !cell.is_empty())
        .map(|last| last + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(grid: &Grid) -> Vec<Vec<&str>> {
        grid.iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(parse_grid(""), Err(ImportError::EmptyInput));
    }

    #[test]
    fn blank_only_text_yields_empty_grid() {
        let grid = parse_grid("\n\t\t\n  \n").expect("blank text should parse");
        assert!(grid.is_empty(), "got {grid:?}");
    }

    #[test]
    fn first_row_fixes_width_without_padding_later_rows() {
        let grid = parse_grid("1\t2\t3\n4\t5").expect("should parse");
        assert_eq!(rows(&grid), vec![vec!["1", "2", "3"], vec!["4", "5"]]);
    }

    #[test]
    fn longer_rows_are_capped_to_width() {
        let grid = parse_grid("1\t2\t\t\n3\t4\t5\t6").expect("should parse");
        assert_eq!(rows(&grid), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        let grid = parse_grid("\t\t\n1\t2").expect("should parse");
        assert_eq!(rows(&grid), vec![vec!["1", "2"]]);
    }

    #[test]
    fn quoted_cells_lose_one_layer_of_quotes() {
        let grid = parse_grid("\"hello, world\"\t\"\"x\"\"").expect("should parse");
        assert_eq!(rows(&grid), vec![vec!["hello, world", "\"x\""]]);
    }

    #[test]
    fn cells_are_trimmed_and_carriage_returns_dropped() {
        let grid = parse_grid(" 01.02.2023 \t 0,5\r\n02.02.2023\t0,6\r\n").expect("should parse");
        assert_eq!(
            rows(&grid),
            vec![vec!["01.02.2023", "0,5"], vec!["02.02.2023", "0,6"]]
        );
    }

    #[test]
    fn blank_lines_after_header_become_rows() {
        let empty = parse_grid("1\n\n2").expect("should parse");
        let spaced = parse_grid("1\n \n2").expect("should parse");
        let tabbed = parse_grid("1\t2\n\t\n3\t4").expect("should parse");

        assert_eq!(empty, spaced, "empty and whitespace-only lines parse alike");
        assert_eq!(rows(&empty), vec![vec!["1"], vec![""], vec!["2"]]);
        assert_eq!(rows(&tabbed), vec![vec!["1", "2"], vec!["", ""], vec!["3", "4"]]);
    }

    #[test]
    fn only_one_trailing_newline_is_dropped() {
        let grid = parse_grid("1\n\n").expect("should parse");
        assert_eq!(rows(&grid), vec![vec!["1"], vec![""]]);
    }

    #[test]
    fn trailing_newline_adds_no_row() {
        let grid = parse_grid("1\n2\n").expect("should parse");
        assert_eq!(rows(&grid), vec![vec!["1"], vec!["2"]]);
    }
}
