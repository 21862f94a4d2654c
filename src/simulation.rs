//! Functionality for running a dispatch simulation.
use crate::dispatch::perform_dispatch_optimisation;
use crate::dispatch::variables::VariableFamily;
use crate::model::Model;
use crate::output::DataWriter;
use crate::output::metadata::write_metadata;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;
use strum::IntoEnumIterator;

/// Totals below this are treated as zero when checking slack variables
const SLACK_TOLERANCE: f64 = 1e-6;

/// Run the simulation.
///
/// Results are only written if an optimal solution is found.
///
/// # Arguments:
///
/// * `model` - The model to run
/// * `output_path` - The folder to which output files will be written
pub fn run(model: &Model, output_path: &Path) -> Result<()> {
    let dataset = &model.dataset;
    info!("Simulation: {}", model.simulation_name());
    info!(
        "{} units, {} lines, {} zones, {} timesteps",
        dataset.num_generators(),
        dataset.num_lines(),
        dataset.num_zones(),
        dataset.num_timesteps()
    );

    info!("Performing dispatch optimisation...");
    let solution =
        perform_dispatch_optimisation(model).context("No solution for dispatch optimisation")?;
    info!("System cost: {}", solution.system_cost());

    for family in VariableFamily::iter()
        .filter(|family| family.is_slack() || *family == VariableFamily::Shed)
    {
        let total = solution.table(family)?.total();
        if total > SLACK_TOLERANCE {
            warn!("Total {family} is {total}");
        }
    }

    write_metadata(output_path, model).context("Failed to save metadata")?;
    let mut writer = DataWriter::create(output_path)?;
    writer.write_solution(dataset, &solution)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::fixture::{single_zone_dataset, storage_generator, two_zone_dataset};
    use crate::model::parameters::ModelParameters;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[rstest]
    fn test_run(two_zone_dataset: Dataset) {
        let dir = tempdir().unwrap();
        let model = Model {
            model_path: PathBuf::from("two_zones"),
            parameters: ModelParameters::default(),
            dataset: two_zone_dataset,
        };
        run(&model, dir.path()).unwrap();

        for file_name in [
            "production.csv",
            "commitment.csv",
            "storage_level.csv",
            "water_slack.csv",
            "storage_slack.csv",
            "flow.csv",
            "shed.csv",
            "curtailment.csv",
            "curtailment_slack.csv",
            "duals.csv",
            "objective.csv",
            "metadata.toml",
        ] {
            assert!(dir.path().join(file_name).is_file(), "Missing {file_name}");
        }
    }

    #[test]
    fn test_run_infeasible() {
        let dir = tempdir().unwrap();
        let generators = [storage_generator("hydro", 50.0, 100.0, 1.0, 100.0)];
        let model = Model {
            model_path: PathBuf::from("infeasible"),
            parameters: ModelParameters::default(),
            dataset: single_zone_dataset(&[100.0], &generators),
        };
        assert!(run(&model, dir.path()).is_err());

        // Nothing should have been written
        assert!(dir.path().read_dir().unwrap().next().is_none());
    }
}
