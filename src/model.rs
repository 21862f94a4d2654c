//! The model: the input dataset together with the policy parameters for the run.
use crate::dataset::Dataset;
use std::path::PathBuf;

pub mod parameters;
use parameters::ModelParameters;

/// Model definition
pub struct Model {
    /// Path to model folder
    pub model_path: PathBuf,
    /// Parameters from the model TOML file
    pub parameters: ModelParameters,
    /// Input tables
    pub dataset: Dataset,
}

impl Model {
    /// The name of the simulation.
    ///
    /// Taken from the model parameters if given, otherwise the name of the model folder.
    pub fn simulation_name(&self) -> String {
        if let Some(name) = &self.parameters.simulation_name {
            return name.clone();
        }

        self.model_path
            .file_name()
            .map_or_else(|| "yapos".into(), |name| name.to_string_lossy().into())
    }
}
