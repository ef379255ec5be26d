use std::fmt;

use chrono::NaiveDate;

pub type Cell = String;
pub type Row = Vec<Cell>;
pub type Grid = Vec<Row>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValue {
    Date(NaiveDate),
    Number(f64),
}

impl TypedValue {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TypedValue::Date(date) => Some(*date),
            TypedValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TypedValue::Number(value) => Some(*value),
            TypedValue::Date(_) => None,
        }
    }

    /// Locale independent text used by the storage layer.
    pub fn to_storage_text(&self) -> String {
        match self {
            TypedValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            TypedValue::Number(value) => value.to_string(),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Date(date) => write!(f, "{}", date.format("%d.%m.%Y")),
            TypedValue::Number(value) => write!(f, "{value}"),
        }
    }
}

pub type TypedRow = Vec<TypedValue>;

/// Rows that passed validation, in paste order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedTable {
    pub rows: Vec<TypedRow>,
}

impl TypedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<TypedRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column of every row as a number. Curve tables are single column.
    pub fn numbers(&self) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.first().and_then(TypedValue::as_number))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedModel {
    pub name: String,
    pub table: TypedTable,
}

impl NamedModel {
    pub fn new(name: impl Into<String>, table: TypedTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    #[default]
    DecimalPoint,
    /// Accepts `,` as the decimal separator as well.
    DecimalComma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidator {
    LocaleDate,
    Number(NumberFormat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Production table: date, recovery fraction, water cut.
    Niz,
    /// Named comparison curve, one number per row.
    Referent,
}

impl TableKind {
    pub fn validators(self, format: NumberFormat) -> Vec<FieldValidator> {
        match self {
            TableKind::Niz => vec![
                FieldValidator::LocaleDate,
                FieldValidator::Number(format),
                FieldValidator::Number(format),
            ],
            TableKind::Referent => vec![FieldValidator::Number(format)],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Niz => "niz",
            TableKind::Referent => "referent",
        }
    }
}
