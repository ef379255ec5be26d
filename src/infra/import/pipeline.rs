use crate::domain::entities::table::{FieldValidator, Grid, TypedRow, TypedTable};
use crate::domain::error::ValidationFailure;

/// Validates every row of `grid` against `validators`, stopping at the first
/// failing cell. Cells beyond the validator count are ignored; a missing
/// cell is a `MissingField`.
pub fn validate_grid(
    grid: &Grid,
    validators: &[FieldValidator],
) -> Result<Vec<TypedRow>, ValidationFailure> {
    grid.iter()
        .enumerate()
        .map(|(row_idx, row)| validate_row(row_idx, row.as_slice(), validators))
        .collect()
}

pub fn validate_row<S: AsRef<str>>(
    row_idx: usize,
    cells: &[S],
    validators: &[FieldValidator],
) -> Result<TypedRow, ValidationFailure> {
    validators
        .iter()
        .enumerate()
        .map(|(col_idx, validator)| {
            let cell: &str = cells.get(col_idx).map_or("", |cell| cell.as_ref());
            validator.validate(cell).map_err(|error| ValidationFailure {
                row: row_idx,
                column: col_idx,
                error,
            })
        })
        .collect()
}

/// Appends the validated grid to `staging`. On failure the whole staging
/// table is cleared, including rows staged before this import.
pub fn import_rows(
    staging: &mut TypedTable,
    grid: &Grid,
    validators: &[FieldValidator],
) -> Result<usize, ValidationFailure> {
    match validate_grid(grid, validators) {
        Ok(rows) => {
            let count = rows.len();
            staging.rows.extend(rows);
            Ok(count)
        }
        Err(failure) => {
            staging.rows.clear();
            Err(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::{NumberFormat, TableKind, TypedValue};
    use crate::domain::error::FieldError;
    use crate::infra::import::grid::parse_grid;

    fn niz() -> Vec<FieldValidator> {
        TableKind::Niz.validators(NumberFormat::DecimalPoint)
    }

    #[test]
    fn validates_rows_in_order() {
        let grid = parse_grid("31.12.2023\t0.1\t0.2\n01.01.2024\t0.15\t0.25").expect("should parse");
        let rows = validate_grid(&grid, &niz()).expect("should validate");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], TypedValue::Number(0.15));
    }

    #[test]
    fn short_row_reports_missing_field() {
        let grid = parse_grid("31.12.2023\t0.1\t0.2\n01.01.2024\t0.15").expect("should parse");
        let failure = validate_grid(&grid, &niz()).expect_err("short row should fail");
        assert_eq!(
            failure,
            ValidationFailure {
                row: 1,
                column: 2,
                error: FieldError::MissingField
            }
        );
    }

    #[test]
    fn stops_at_first_failure() {
        let grid = parse_grid("x\n1\ny").expect("should parse");
        let validators = TableKind::Referent.validators(NumberFormat::DecimalPoint);
        let failure = validate_grid(&grid, &validators).expect_err("should fail");
        assert_eq!(failure.row, 0);
        assert_eq!(failure.error, FieldError::MalformedNumber { raw: "x".into() });
    }

    #[test]
    fn import_appends_on_success() {
        let validators = TableKind::Referent.validators(NumberFormat::DecimalPoint);
        let mut staging = TypedTable::from_rows(vec![vec![TypedValue::Number(1.0)]]);
        let grid = parse_grid("2\n3").expect("should parse");

        let added = import_rows(&mut staging, &grid, &validators).expect("should import");

        assert_eq!(added, 2);
        assert_eq!(staging.numbers(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn import_failure_clears_existing_rows() {
        let validators = TableKind::Referent.validators(NumberFormat::DecimalPoint);
        let mut staging = TypedTable::from_rows(vec![
            vec![TypedValue::Number(1.0)],
            vec![TypedValue::Number(2.0)],
        ]);
        let grid = parse_grid("3\nbad").expect("should parse");

        let result = import_rows(&mut staging, &grid, &validators);

        assert!(result.is_err(), "bad row should reject the import");
        assert!(staging.is_empty(), "staging should be cleared: {staging:?}");
    }
}
