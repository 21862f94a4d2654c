//! Common routines for handling input data.
use crate::dataset::Dataset;
use crate::graph::check_zone_network;
use crate::model::Model;
use crate::model::parameters::ModelParameters;
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

mod generator;
use generator::read_generators;
mod line;
use line::read_lines;
mod matrix;
use matrix::{read_matrix, read_renewable_capacity};

const DEMAND_FILE_NAME: &str = "dem.csv";
const RENEWABLES_FILE_NAME: &str = "ren.csv";
const RENEWABLE_CAPACITY_FILE_NAME: &str = "ren_pp.csv";
const INFLOW_FILE_NAME: &str = "inflow.csv";
const AVAILABILITY_FILE_NAME: &str = "avail.csv";
const STORAGE_MIN_FILE_NAME: &str = "stomin.csv";

/// Read a series of type `T`s from a CSV file.
///
/// Will raise an error if the file is empty.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<impl Iterator<Item = T> + 'a> {
    let vec = read_csv_internal(file_path)?;
    ensure!(!vec.is_empty(), "CSV file {} cannot be empty", file_path.display());

    Ok(vec.into_iter())
}

/// Read a series of type `T`s from a CSV file, allowing the file to have no data rows
pub fn read_csv_optional<'a, T: DeserializeOwned + 'a>(
    file_path: &'a Path,
) -> Result<impl Iterator<Item = T> + 'a> {
    Ok(read_csv_internal(file_path)?.into_iter())
}

fn read_csv_internal<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let vec = csv::Reader::from_path(file_path)
        .with_context(|| input_err_msg(file_path))?
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| input_err_msg(file_path))?;

    Ok(vec)
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Read a non-negative, finite f64
pub fn deserialise_non_negative<'de, D>(deserialiser: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = Deserialize::deserialize(deserialiser)?;
    if !(value.is_finite() && value >= 0.0) {
        Err(serde::de::Error::custom(
            "Value must be a finite number greater than or equal to zero",
        ))?;
    }

    Ok(value)
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Read all of the input tables from the model directory and check they are consistent
///
/// # Arguments
///
/// * `model_dir` - Folder containing model input files
pub fn load_dataset(model_dir: &Path) -> Result<Dataset> {
    let dataset = Dataset {
        generators: read_generators(model_dir)?,
        lines: read_lines(model_dir)?,
        demand: read_matrix(&model_dir.join(DEMAND_FILE_NAME))?,
        renewables: read_matrix(&model_dir.join(RENEWABLES_FILE_NAME))?,
        renewable_capacity: read_renewable_capacity(
            &model_dir.join(RENEWABLE_CAPACITY_FILE_NAME),
        )?,
        inflow: read_matrix(&model_dir.join(INFLOW_FILE_NAME))?,
        availability: read_matrix(&model_dir.join(AVAILABILITY_FILE_NAME))?,
        storage_min: read_matrix(&model_dir.join(STORAGE_MIN_FILE_NAME))?,
    };

    dataset
        .validate()
        .with_context(|| format!("Invalid model input in {}", model_dir.display()))?;

    Ok(dataset)
}

/// Load a model from the specified directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// The fully validated [`Model`] or an error
pub fn load_model<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
    let model_dir = model_dir.as_ref();
    let parameters = ModelParameters::from_path(model_dir)?;
    let dataset = load_dataset(model_dir)?;
    check_generator_costs(&dataset, &parameters);
    check_zone_network(&dataset);

    Ok(Model {
        model_path: model_dir.to_path_buf(),
        parameters,
        dataset,
    })
}

/// Warn about units which cost at least as much to run as shedding demand
fn check_generator_costs(dataset: &Dataset, parameters: &ModelParameters) {
    for generator in &dataset.generators {
        if generator.cost >= parameters.shed_penalty {
            warn!(
                "Unit {} has a cost of {}, which is not less than the shed penalty ({}). Demand \
                will be shed rather than met by this unit.",
                generator.unit, generator.cost, parameters.shed_penalty
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Record {
        id: String,
        #[serde(deserialize_with = "deserialise_non_negative")]
        value: f64,
    }

    /// Create an example CSV file in dir_path
    fn create_csv_file(dir_path: &Path, contents: &str) -> PathBuf {
        let file_path = dir_path.join("test.csv");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{contents}").unwrap();
        file_path
    }

    #[test]
    fn test_read_csv() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value\nhello,1\nworld,2\n");
        let records: Vec<Record> = read_csv(&file_path).unwrap().collect();
        assert_eq!(
            records,
            &[
                Record {
                    id: "hello".to_string(),
                    value: 1.0,
                },
                Record {
                    id: "world".to_string(),
                    value: 2.0,
                }
            ]
        );

        // File with no data rows
        let file_path = create_csv_file(dir.path(), "id,value\n");
        assert!(read_csv::<Record>(&file_path).is_err());
        assert!(
            read_csv_optional::<Record>(&file_path)
                .unwrap()
                .next()
                .is_none()
        );
    }

    #[test]
    fn test_read_csv_negative_value() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value\nhello,-1\n");
        assert!(read_csv::<Record>(&file_path).is_err());
    }

    #[test]
    fn test_read_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "value = 1").unwrap();
        }

        #[derive(Debug, PartialEq, Deserialize)]
        struct Value {
            value: u32,
        }

        assert_eq!(read_toml::<Value>(&file_path).unwrap(), Value { value: 1 });

        // Missing file
        assert!(read_toml::<Value>(&dir.path().join("missing.toml")).is_err());
    }
}
