//! Input payload for the well production forecast service.
//!
//! The service itself is opaque; this module only shapes what it receives.
//! Production rows travel as `["YYYY-MM-DD", recovery_fraction, water_cut]`.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::domain::entities::table::{TypedTable, TypedValue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NizRow {
    pub date: NaiveDate,
    pub recovery_fraction: f64,
    pub water_cut: f64,
}

impl NizRow {
    pub fn from_typed(row: &[TypedValue]) -> Option<Self> {
        match row {
            [TypedValue::Date(date), TypedValue::Number(recovery), TypedValue::Number(water_cut)] => {
                Some(Self {
                    date: *date,
                    recovery_fraction: *recovery,
                    water_cut: *water_cut,
                })
            }
            _ => None,
        }
    }
}

impl Serialize for NizRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            self.date.format("%Y-%m-%d").to_string(),
            self.recovery_fraction,
            self.water_cut,
        )
            .serialize(serializer)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    #[error("the recovery / water cut table is not filled")]
    NizTable,
    #[error("oil recovery factor is not set")]
    RecoveryFactor,
    #[error("liquid rate is not set")]
    LiquidRate,
    #[error("geological reserves are not set")]
    Reserves,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WellProductionInput {
    pub niz_table: Vec<NizRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl WellProductionInput {
    /// Rows that do not have the production shape are skipped.
    pub fn from_table(table: &TypedTable) -> Self {
        Self {
            niz_table: table
                .rows
                .iter()
                .filter_map(|row| NizRow::from_typed(row))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_parameters(mut self, kin: Option<f64>, debit: Option<f64>, total: Option<f64>) -> Self {
        self.kin = kin;
        self.debit = debit;
        self.total = total;
        self
    }

    /// Zero counts as unset, the service refuses to run on it.
    pub fn check(&self) -> Result<(), MissingInput> {
        fn is_set(value: Option<f64>) -> bool {
            value.is_some_and(|v| v != 0.0)
        }

        if self.niz_table.is_empty() {
            return Err(MissingInput::NizTable);
        }
        if !is_set(self.kin) {
            return Err(MissingInput::RecoveryFactor);
        }
        if !is_set(self.debit) {
            return Err(MissingInput::LiquidRate);
        }
        if !is_set(self.total) {
            return Err(MissingInput::Reserves);
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
