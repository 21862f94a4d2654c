//! Defines the `ModelParameters` struct, which represents the contents of `model.toml`.
//!
//! These are the policy constants of the dispatch formulation. The file is optional; if it is not
//! present, default values are used for everything.
use crate::input::{input_err_msg, read_toml};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

const MODEL_PARAMETERS_FILE_NAME: &str = "model.toml";

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_ramping_factor, f64, 8.0);
define_param_default!(default_initial_storage_level, f64, 0.45);
define_param_default!(default_shed_penalty, f64, 400.0);
define_param_default!(default_slack_penalty, f64, 100.0);

/// Represents the contents of the entire model file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelParameters {
    /// Name used to label the results (defaults to the name of the model folder)
    #[serde(default)]
    pub simulation_name: Option<String>,
    /// Storage units can change production by at most `max / ramping_factor` between timesteps
    #[serde(default = "default_ramping_factor")]
    pub ramping_factor: f64,
    /// Storage level at the start of the horizon, as a fraction of capacity.
    ///
    /// This is also the minimum storage level at the end of the horizon.
    #[serde(default = "default_initial_storage_level")]
    pub initial_storage_level: f64,
    /// Cost per unit of unserved demand
    #[serde(default = "default_shed_penalty")]
    pub shed_penalty: f64,
    /// Cost per unit of violation of storage balance
    #[serde(default = "default_slack_penalty")]
    pub water_slack_penalty: f64,
    /// Cost per unit of violation of minimum storage level
    #[serde(default = "default_slack_penalty")]
    pub storage_slack_penalty: f64,
    /// Cost per unit of curtailment in excess of renewable output
    #[serde(default = "default_slack_penalty")]
    pub curtailment_slack_penalty: f64,
    /// Time limit for the solver, in seconds
    #[serde(default)]
    pub solver_time_limit: Option<f64>,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            simulation_name: None,
            ramping_factor: default_ramping_factor(),
            initial_storage_level: default_initial_storage_level(),
            shed_penalty: default_shed_penalty(),
            water_slack_penalty: default_slack_penalty(),
            storage_slack_penalty: default_slack_penalty(),
            curtailment_slack_penalty: default_slack_penalty(),
            solver_time_limit: None,
        }
    }
}

/// Check that the `ramping_factor` parameter is valid
fn check_ramping_factor(value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "ramping_factor must be a finite number greater than zero"
    );

    Ok(())
}

/// Check that the `initial_storage_level` parameter is valid
fn check_initial_storage_level(value: f64) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&value),
        "initial_storage_level must be between 0 and 1"
    );

    Ok(())
}

/// Check that a penalty is valid
fn check_penalty(name: &str, value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "{name} must be a finite number greater than zero"
    );

    Ok(())
}

/// Check that the `solver_time_limit` parameter is valid
fn check_solver_time_limit(value: Option<f64>) -> Result<()> {
    if let Some(value) = value {
        ensure!(
            value.is_finite() && value > 0.0,
            "solver_time_limit must be a finite number greater than zero"
        );
    }

    Ok(())
}

impl ModelParameters {
    /// Read a model file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    ///
    /// # Returns
    ///
    /// The model file contents as a [`ModelParameters`] struct (or the defaults, if there is no
    /// file) or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<ModelParameters> {
        let file_path = model_dir.as_ref().join(MODEL_PARAMETERS_FILE_NAME);
        if !file_path.is_file() {
            return Ok(ModelParameters::default());
        }

        let model_params: ModelParameters = read_toml(&file_path)?;
        model_params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(model_params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        check_ramping_factor(self.ramping_factor)?;
        check_initial_storage_level(self.initial_storage_level)?;

        check_penalty("shed_penalty", self.shed_penalty)?;
        for (name, value) in self.iter_slack_penalties() {
            check_penalty(name, value)?;
            ensure!(
                value < self.shed_penalty,
                "{name} must be less than shed_penalty"
            );
        }

        check_solver_time_limit(self.solver_time_limit)?;

        Ok(())
    }

    /// Iterate over the names and values of the slack penalties
    fn iter_slack_penalties(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("water_slack_penalty", self.water_slack_penalty),
            ("storage_slack_penalty", self.storage_slack_penalty),
            ("curtailment_slack_penalty", self.curtailment_slack_penalty),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_model_params_from_path_no_file() {
        let dir = tempdir().unwrap();
        assert_eq!(
            ModelParameters::from_path(dir.path()).unwrap(),
            ModelParameters::default()
        );
    }

    #[test]
    fn test_model_params_from_path() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(MODEL_PARAMETERS_FILE_NAME)).unwrap();
            writeln!(
                file,
                "simulation_name = \"dry_year\"\nramping_factor = 4\nsolver_time_limit = 60"
            )
            .unwrap();
        }

        let model_params = ModelParameters::from_path(dir.path()).unwrap();
        assert_eq!(model_params.simulation_name.as_deref(), Some("dry_year"));
        assert_approx_eq!(f64, model_params.ramping_factor, 4.0);
        assert_approx_eq!(f64, model_params.initial_storage_level, 0.45);
        assert_approx_eq!(f64, model_params.shed_penalty, 400.0);
        assert_eq!(model_params.solver_time_limit, Some(60.0));
    }

    #[test]
    fn test_model_params_unknown_field() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(MODEL_PARAMETERS_FILE_NAME)).unwrap();
            writeln!(file, "ramping_factr = 4").unwrap();
        }

        assert!(ModelParameters::from_path(dir.path()).is_err());
    }

    #[rstest]
    #[case(8.0, true)]
    #[case(1e-3, true)]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(f64::INFINITY, false)]
    #[case(f64::NAN, false)]
    fn test_check_ramping_factor(#[case] value: f64, #[case] expected_valid: bool) {
        assert_eq!(check_ramping_factor(value).is_ok(), expected_valid);
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(0.45, true)]
    #[case(1.0, true)]
    #[case(-0.1, false)]
    #[case(1.1, false)]
    #[case(f64::NAN, false)]
    fn test_check_initial_storage_level(#[case] value: f64, #[case] expected_valid: bool) {
        assert_eq!(check_initial_storage_level(value).is_ok(), expected_valid);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(10.0), true)]
    #[case(Some(0.0), false)]
    #[case(Some(f64::INFINITY), false)]
    fn test_check_solver_time_limit(#[case] value: Option<f64>, #[case] expected_valid: bool) {
        assert_eq!(check_solver_time_limit(value).is_ok(), expected_valid);
    }

    #[test]
    fn test_validate_default() {
        assert!(ModelParameters::default().validate().is_ok());
    }

    #[test]
    fn test_validate_slack_penalty_above_shed_penalty() {
        let params = ModelParameters {
            storage_slack_penalty: 500.0,
            ..ModelParameters::default()
        };
        assert_error!(
            params.validate(),
            "storage_slack_penalty must be less than shed_penalty"
        );
    }
}
