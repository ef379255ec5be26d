use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::params;

use crate::domain::entities::table::{FieldValidator, NamedModel, TableKind, TypedTable, TypedValue};
use crate::infra::sqlite::schema::open_connection;

/// Replaces every stored table of `kind` with `tables`, in order, inside one
/// transaction.
pub fn replace_tables(db_path: &Path, kind: TableKind, tables: &[(&str, &TypedTable)]) -> Result<()> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start replace transaction")?;

    tx.execute(
        "DELETE FROM bound_table WHERE kind = ?1",
        params![kind.as_str()],
    )
    .context("failed to clear existing tables")?;

    let mut insert_table = tx
        .prepare(
            "INSERT INTO bound_table(kind, position, name, row_count) VALUES (?1, ?2, ?3, ?4)",
        )
        .context("failed to prepare table insert")?;
    let mut insert_cell = tx
        .prepare("INSERT INTO cell(table_id, row_idx, col_idx, value) VALUES (?1, ?2, ?3, ?4)")
        .context("failed to prepare cell insert")?;

    for (position, (name, table)) in tables.iter().enumerate() {
        insert_table
            .execute(params![kind.as_str(), position as i64, name, table.len() as i64])
            .context("failed to insert table")?;
        let table_id = tx.last_insert_rowid();

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                insert_cell
                    .execute(params![
                        table_id,
                        row_idx as i64,
                        col_idx as i64,
                        value.to_storage_text()
                    ])
                    .context("failed to insert cell")?;
            }
        }
    }
    drop(insert_cell);
    drop(insert_table);

    tx.commit().context("failed to commit table replacement")?;
    Ok(())
}

/// Loads every stored table of `kind` in position order, typing each cell
/// through the kind's column schema.
pub fn load_tables(db_path: &Path, kind: TableKind) -> Result<Vec<NamedModel>> {
    let conn = open_connection(db_path)?;
    let schema = kind.validators(Default::default());

    let mut select_tables = conn
        .prepare("SELECT id, name FROM bound_table WHERE kind = ?1 ORDER BY position")
        .context("failed to prepare table query")?;
    let headers = select_tables
        .query_map(params![kind.as_str()], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })
        .context("failed to query tables")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read table rows")?;

    let mut select_cells = conn
        .prepare(
            "SELECT row_idx, col_idx, value FROM cell WHERE table_id = ?1 ORDER BY row_idx, col_idx",
        )
        .context("failed to prepare cell query")?;

    let mut models = Vec::with_capacity(headers.len());
    for (table_id, name) in headers {
        let cells = select_cells
            .query_map(params![table_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .context("failed to query cells")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to read cells")?;

        let mut table = TypedTable::new();
        for (row_idx, col_idx, text) in cells {
            let row_idx = row_idx as usize;
            let col_idx = col_idx as usize;
            let validator = schema
                .get(col_idx)
                .ok_or_else(|| anyhow!("table '{name}' has unexpected column {col_idx}"))?;
            let value = stored_value(*validator, &text).with_context(|| {
                format!("corrupt cell in table '{name}' at row {row_idx}, column {col_idx}")
            })?;
            if table.rows.len() <= row_idx {
                table.rows.resize_with(row_idx + 1, Vec::new);
            }
            table.rows[row_idx].push(value);
        }

        if let Some(row_idx) = table.rows.iter().position(|row| row.len() != schema.len()) {
            return Err(anyhow!("table '{name}' row {row_idx} is incomplete"));
        }

        models.push(NamedModel::new(name, table));
    }

    Ok(models)
}

fn stored_value(validator: FieldValidator, text: &str) -> Result<TypedValue> {
    match validator {
        FieldValidator::LocaleDate => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(TypedValue::Date)
            .with_context(|| format!("invalid stored date '{text}'")),
        FieldValidator::Number(_) => text
            .parse::<f64>()
            .map(TypedValue::Number)
            .with_context(|| format!("invalid stored number '{text}'")),
    }
}
