//! The module responsible for writing output data to disk.
use crate::dataset::Dataset;
use crate::dispatch::Solution;
use crate::dispatch::constraints::{ConstraintFamily, ConstraintIndex};
use crate::dispatch::index::EntityKind;
use crate::dispatch::results::DenseTable;
use crate::dispatch::variables::VariableFamily;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

pub mod metadata;

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "yapos_results";

/// The output file name for constraint duals
const DUALS_FILE_NAME: &str = "duals.csv";

/// The output file name for the objective value
const OBJECTIVE_FILE_NAME: &str = "objective.csv";

/// Get the default output directory for the model in the specified directory
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Get the model name from the dir path. This ends up being convoluted because we need to check
    // for all possible errors. Ugh.
    let model_dir = model_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    // Construct path
    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create a new output directory.
///
/// If the directory already exists, its contents are deleted if `allow_overwrite` is true,
/// otherwise an error is returned.
///
/// # Returns
///
/// Whether an existing directory was overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwritten = if output_dir.is_dir() {
        ensure!(
            allow_overwrite,
            "Output folder {} already exists. Use --overwrite to replace it.",
            output_dir.display()
        );
        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(overwritten)
}

/// The names of the entities of the given kind, in index order
pub fn entity_names(dataset: &Dataset, kind: EntityKind) -> Vec<String> {
    match kind {
        EntityKind::Generator => dataset
            .generators
            .iter()
            .map(|generator| generator.unit.to_string())
            .collect(),
        EntityKind::Line => dataset
            .lines
            .iter()
            .map(|line| line.name.to_string())
            .collect(),
        EntityKind::Zone => dataset.demand.column_names().to_vec(),
    }
}

/// Represents a row in the duals CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct DualRow {
    constraint: String,
    entity: Option<String>,
    timestep: Option<usize>,
    value: f64,
}

impl DualRow {
    /// Create a new [`DualRow`], looking up the entity name
    fn new(
        names: &EntityNames,
        family: ConstraintFamily,
        index: &ConstraintIndex,
        value: f64,
    ) -> Self {
        let entity = family
            .entity_kind()
            .zip(index.entity())
            .map(|(kind, idx)| names.get(kind, idx).to_string());

        Self {
            constraint: family.to_string(),
            entity,
            timestep: index.timestep(),
            value,
        }
    }
}

/// The names of every entity in the dataset, by kind
struct EntityNames {
    generators: Vec<String>,
    lines: Vec<String>,
    zones: Vec<String>,
}

impl EntityNames {
    fn new(dataset: &Dataset) -> Self {
        Self {
            generators: entity_names(dataset, EntityKind::Generator),
            lines: entity_names(dataset, EntityKind::Line),
            zones: entity_names(dataset, EntityKind::Zone),
        }
    }

    fn get(&self, kind: EntityKind, idx: usize) -> &str {
        let names = match kind {
            EntityKind::Generator => &self.generators,
            EntityKind::Line => &self.lines,
            EntityKind::Zone => &self.zones,
        };
        &names[idx]
    }
}

/// Represents the row in the objective CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ObjectiveRow {
    system_cost: f64,
}

/// An object for writing the results of a dispatch run to file
pub struct DataWriter {
    output_path: PathBuf,
    duals_writer: csv::Writer<File>,
    objective_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        Ok(Self {
            output_path: output_path.to_path_buf(),
            duals_writer: new_writer(DUALS_FILE_NAME)?,
            objective_writer: new_writer(OBJECTIVE_FILE_NAME)?,
        })
    }

    /// Write a table of results to `<name>.csv`, with one column per entity and one row per
    /// timestep
    pub fn write_table(
        &self,
        name: &str,
        entity_names: &[String],
        table: &DenseTable,
    ) -> Result<()> {
        ensure!(
            entity_names.len() == table.num_entities(),
            "Table {name} has {} columns, but {} names were given",
            table.num_entities(),
            entity_names.len()
        );

        let file_path = self.output_path.join(format!("{name}.csv"));
        let mut writer = csv::Writer::from_path(&file_path)?;
        writer.write_record(entity_names)?;
        for t in 0..table.num_timesteps() {
            writer.write_record(table.row(t).iter().map(f64::to_string))?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Write the dual values of constraints to a CSV file
    pub fn write_duals<'a, I>(&mut self, dataset: &Dataset, duals: I) -> Result<()>
    where
        I: Iterator<Item = (ConstraintFamily, &'a ConstraintIndex, f64)>,
    {
        let names = EntityNames::new(dataset);
        for (family, index, value) in duals {
            self.duals_writer
                .serialize(DualRow::new(&names, family, index, value))?;
        }

        Ok(())
    }

    /// Write the objective value to a CSV file
    pub fn write_objective(&mut self, system_cost: f64) -> Result<()> {
        self.objective_writer.serialize(ObjectiveRow { system_cost })?;

        Ok(())
    }

    /// Write every result from the solution.
    ///
    /// All tables are extracted before anything is written, so a failure leaves no partial tables.
    pub fn write_solution(&mut self, dataset: &Dataset, solution: &Solution) -> Result<()> {
        let tables = VariableFamily::iter()
            .map(|family| Ok((family, solution.table(family)?)))
            .collect::<Result<Vec<_>>>()?;

        for (family, table) in &tables {
            let names = entity_names(dataset, family.entity_kind());
            self.write_table(&family.to_string(), &names, table)?;
        }
        self.write_duals(dataset, solution.iter_duals())?;
        self.write_objective(solution.system_cost())?;

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.duals_writer.flush()?;
        self.objective_writer.flush()?;

        Ok(())
    }
}
