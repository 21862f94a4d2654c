//! Code for reading time-by-entity tables (demand, inflow, availability, etc.)
use super::input_err_msg;
use crate::dataset::{Matrix, RenewableCapacity};
use anyhow::{Context, Result, ensure};
use std::path::Path;

/// The name of the label column in the renewable capacity CSV file
const TECHNOLOGY_COLUMN: &str = "technology";

/// Parse a single CSV field as a finite f64
fn parse_value(field: &str, row: usize, column: &str) -> Result<f64> {
    let value: f64 = field
        .trim()
        .parse()
        .with_context(|| format!("Invalid value '{field}' in row {row}, column {column}"))?;
    ensure!(
        value.is_finite(),
        "Value in row {row}, column {column} must be a finite number"
    );

    Ok(value)
}

/// Read a table of numbers with an optional leading label column
fn read_table(file_path: &Path, label_column: Option<&str>) -> Result<(Vec<String>, Matrix)> {
    let mut reader = csv::Reader::from_path(file_path)?;
    let mut column_names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    if let Some(label_column) = label_column {
        ensure!(
            column_names
                .first()
                .is_some_and(|name| name.eq_ignore_ascii_case(label_column)),
            "First column must be '{label_column}'"
        );
        column_names.remove(0);
    }

    let mut labels = Vec::new();
    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        let mut fields = record.iter();
        if label_column.is_some() {
            labels.push(fields.next().unwrap_or_default().to_string());
        }

        let row = fields
            .zip(column_names.iter())
            .map(|(field, column)| parse_value(field, row_idx, column))
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    ensure!(!rows.is_empty(), "CSV file cannot be empty");

    Ok((labels, Matrix::new(column_names, rows)))
}

/// Read a matrix indexed by timestep (rows) and entity (columns) from a CSV file.
///
/// The header row gives the entity names.
pub fn read_matrix(file_path: &Path) -> Result<Matrix> {
    let (_, matrix) = read_table(file_path, None).with_context(|| input_err_msg(file_path))?;
    Ok(matrix)
}

/// Read the installed renewable capacity by technology (rows) and zone (columns)
pub fn read_renewable_capacity(file_path: &Path) -> Result<RenewableCapacity> {
    let (technologies, capacity) = read_table(file_path, Some(TECHNOLOGY_COLUMN))
        .with_context(|| input_err_msg(file_path))?;

    Ok(RenewableCapacity {
        technologies,
        capacity,
    })
}
