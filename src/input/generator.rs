//! Code for reading the generating units CSV file
use super::{deserialise_non_negative, input_err_msg, read_csv};
use crate::dataset::Generator;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

const GENERATORS_FILE_NAME: &str = "gen.csv";

/// Represents a row of the generators CSV file.
///
/// Any extra columns in the file are ignored.
#[derive(Deserialize, Debug, PartialEq)]
struct GeneratorRaw {
    #[serde(alias = "Unit")]
    unit: String,
    bus: usize,
    cost: f64,
    #[serde(deserialize_with = "deserialise_non_negative")]
    min: f64,
    #[serde(deserialize_with = "deserialise_non_negative")]
    max: f64,
    #[serde(deserialize_with = "deserialise_non_negative")]
    stomax: f64,
}

impl GeneratorRaw {
    fn into_generator(self) -> Result<Generator> {
        ensure!(
            self.cost.is_finite(),
            "Cost for unit {} must be a finite number",
            self.unit
        );
        ensure!(
            self.min <= self.max,
            "Minimum generation for unit {} is greater than its maximum",
            self.unit
        );

        Ok(Generator {
            unit: self.unit.into(),
            bus: self.bus,
            cost: self.cost,
            min: self.min,
            max: self.max,
            stomax: self.stomax,
        })
    }
}

/// Read generating units from the generators CSV file.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
///
/// # Returns
///
/// The generators, in file order, or an error
pub fn read_generators(model_dir: &Path) -> Result<Vec<Generator>> {
    let file_path = model_dir.join(GENERATORS_FILE_NAME);
    let generators_csv = read_csv(&file_path)?;
    read_generators_from_iter(generators_csv).with_context(|| input_err_msg(&file_path))
}

fn read_generators_from_iter<I>(iter: I) -> Result<Vec<Generator>>
where
    I: Iterator<Item = GeneratorRaw>,
{
    iter.map(GeneratorRaw::into_generator).collect()
}
