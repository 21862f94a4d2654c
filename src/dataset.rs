//! The input dataset for a dispatch run: generating units, lines and exogenous time series.
//!
//! All tables are indexed by position. Zones are the columns of the demand table and timesteps are
//! its rows, so every other table must agree with the demand table on its dimensions.
use crate::id::{GeneratorID, LineID, ZoneID, check_ids_unique};
use anyhow::{Context, Result, ensure};
use log::warn;

/// A generating unit
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    /// Name of the unit
    pub unit: GeneratorID,
    /// Index of the zone the unit is connected to
    pub bus: usize,
    /// Marginal cost of generation
    pub cost: f64,
    /// Minimum generation at full availability
    pub min: f64,
    /// Maximum generation at full availability
    pub max: f64,
    /// Storage capacity (zero for units without storage)
    pub stomax: f64,
}

impl Generator {
    /// Whether the unit has a reservoir (and so is subject to storage constraints)
    pub fn has_storage(&self) -> bool {
        self.stomax > 0.0
    }
}

/// A transmission line between two zones.
///
/// Positive flow is from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Name of the line
    pub name: LineID,
    /// Index of the sending zone
    pub from: usize,
    /// Index of the receiving zone
    pub to: usize,
    /// Maximum flow in either direction
    pub cap: f64,
}

/// A dense table of values with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    column_names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Create a new [`Matrix`].
    ///
    /// # Panics
    ///
    /// If any row's length differs from the number of columns.
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        assert!(
            rows.iter().all(|row| row.len() == column_names.len()),
            "All rows must have one value per column"
        );

        Self { column_names, rows }
    }

    /// The names of the columns
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// The number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The number of columns
    pub fn num_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Get the value at the given row and column
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.rows[row][column]
    }

    /// Iterate over every value in the table
    pub fn iter_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// Installed renewable capacity by technology and zone
#[derive(Debug, Clone, PartialEq)]
pub struct RenewableCapacity {
    /// The technology for each row
    pub technologies: Vec<String>,
    /// Capacity by technology (rows) and zone (columns)
    pub capacity: Matrix,
}

/// All of the input data for a dispatch run
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Generating units
    pub generators: Vec<Generator>,
    /// Transmission lines
    pub lines: Vec<Line>,
    /// Demand by timestep and zone
    pub demand: Matrix,
    /// Non-dispatchable renewable output by timestep and zone
    pub renewables: Matrix,
    /// Non-dispatchable renewable capacity by technology and zone
    pub renewable_capacity: RenewableCapacity,
    /// Inflow by timestep and generator
    pub inflow: Matrix,
    /// Availability factor by timestep and generator
    pub availability: Matrix,
    /// Minimum storage level by timestep and generator
    pub storage_min: Matrix,
}

impl Dataset {
    /// The number of generating units
    pub fn num_generators(&self) -> usize {
        self.generators.len()
    }

    /// The number of lines
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// The number of zones
    pub fn num_zones(&self) -> usize {
        self.demand.num_columns()
    }

    /// The number of timesteps
    pub fn num_timesteps(&self) -> usize {
        self.demand.num_rows()
    }

    /// The names of the zones, taken from the demand table
    pub fn zone_ids(&self) -> Vec<ZoneID> {
        self.demand
            .column_names()
            .iter()
            .map(|name| name.as_str().into())
            .collect()
    }

    /// Check the tables agree with one another.
    ///
    /// Shape mismatches and invalid values are errors; inconsistent column names only give
    /// warnings, as tables are matched by position.
    pub fn validate(&self) -> Result<()> {
        let nn = self.num_zones();
        let nt = self.num_timesteps();
        ensure!(nn > 0, "The demand table must have at least one zone");
        ensure!(nt > 0, "The demand table must have at least one timestep");

        check_ids_unique(self.generators.iter().map(|generator| &generator.unit))
            .context("Invalid generator names")?;
        check_ids_unique(self.lines.iter().map(|line| &line.name))
            .context("Invalid line names")?;
        check_ids_unique(&self.zone_ids()).context("Invalid zone names")?;

        for generator in &self.generators {
            ensure!(
                generator.bus < nn,
                "Unit {} is connected to zone {}, but there are only {nn} zones",
                generator.unit,
                generator.bus
            );
        }

        for line in &self.lines {
            ensure!(
                line.from < nn && line.to < nn,
                "Line {} connects zones {} and {}, but there are only {nn} zones",
                line.name,
                line.from,
                line.to
            );
            if line.from == line.to {
                warn!("Line {} starts and ends in the same zone", line.name);
            }
        }

        let unit_names: Vec<&str> = self.generators.iter().map(|g| &*g.unit.0).collect();
        let zone_names: Vec<&str> = self.demand.column_names().iter().map(String::as_str).collect();
        check_shape("renewables", &self.renewables, nt, &zone_names)?;
        check_shape("inflow", &self.inflow, nt, &unit_names)?;
        check_shape("availability", &self.availability, nt, &unit_names)?;
        check_shape("storage minimum", &self.storage_min, nt, &unit_names)?;

        let capacity = &self.renewable_capacity.capacity;
        check_shape(
            "renewable capacity",
            capacity,
            self.renewable_capacity.technologies.len(),
            &zone_names,
        )?;

        check_non_negative("demand", &self.demand)?;
        check_non_negative("renewables", &self.renewables)?;
        check_non_negative("inflow", &self.inflow)?;
        check_non_negative("storage minimum", &self.storage_min)?;
        check_non_negative("renewable capacity", capacity)?;
        ensure!(
            self.availability
                .iter_values()
                .all(|value| (0.0..=1.0).contains(&value)),
            "Availability factors must be between 0 and 1"
        );

        Ok(())
    }
}

/// Check that a table has the expected number of rows and one column per entity
fn check_shape(table: &str, matrix: &Matrix, num_rows: usize, entities: &[&str]) -> Result<()> {
    ensure!(
        matrix.num_rows() == num_rows,
        "The {table} table has {} rows, but {num_rows} were expected",
        matrix.num_rows()
    );
    ensure!(
        matrix.num_columns() == entities.len(),
        "The {table} table has {} columns, but {} were expected",
        matrix.num_columns(),
        entities.len()
    );

    if matrix.column_names().iter().zip(entities).any(|(a, b)| a != b) {
        warn!(
            "Column names in the {table} table do not match; expected: {}",
            entities.join(", ")
        );
    }

    Ok(())
}

/// Check that all values in a table are non-negative
fn check_non_negative(table: &str, matrix: &Matrix) -> Result<()> {
    ensure!(
        matrix.iter_values().all(|value| value >= 0.0),
        "Values in the {table} table cannot be negative"
    );

    Ok(())
}
