//! Code for recording the details of a run in `metadata.toml`.
use crate::dataset::Dataset;
use crate::model::Model;
use anyhow::{Context, Result, anyhow};
use chrono::Local;
use platform_info::{PlatformInfo, PlatformInfoAPI, UNameAPI};
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// The output file name for metadata
const METADATA_FILE_NAME: &str = "metadata.toml";

/// Build information generated by `build.rs`
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Serialize)]
struct Metadata<'a> {
    run: RunMetadata<'a>,
    model: ModelSize,
    program: ProgramMetadata,
    platform: PlatformMetadata,
}

/// What was run and when
#[derive(Serialize)]
struct RunMetadata<'a> {
    simulation_name: String,
    model_path: &'a Path,
    /// Start time of the run, in RFC 3339 format
    started: String,
}

impl<'a> RunMetadata<'a> {
    fn new(model: &'a Model) -> Self {
        Self {
            simulation_name: model.simulation_name(),
            model_path: &model.model_path,
            started: Local::now().to_rfc3339(),
        }
    }
}

/// The dimensions of the dispatch problem
#[derive(Serialize)]
struct ModelSize {
    units: usize,
    storage_units: usize,
    lines: usize,
    zones: usize,
    timesteps: usize,
}

impl ModelSize {
    fn new(dataset: &Dataset) -> Self {
        Self {
            units: dataset.num_generators(),
            storage_units: dataset
                .generators
                .iter()
                .filter(|generator| generator.has_storage())
                .count(),
            lines: dataset.num_lines(),
            zones: dataset.num_zones(),
            timesteps: dataset.num_timesteps(),
        }
    }
}

/// The build of yapos which produced the results
#[derive(Serialize)]
struct ProgramMetadata {
    name: &'static str,
    version: &'static str,
    /// Short commit hash, with `-dirty` appended if there were uncommitted changes
    git_commit: String,
    target: &'static str,
    /// Either `debug` or `release`
    profile: &'static str,
    rustc_version: &'static str,
    build_time_utc: &'static str,
}

impl ProgramMetadata {
    fn new() -> Self {
        let git_commit = match (built_info::GIT_COMMIT_HASH_SHORT, built_info::GIT_DIRTY) {
            (Some(hash), Some(true)) => format!("{hash}-dirty"),
            (Some(hash), _) => hash.to_string(),
            (None, _) => "unknown".to_string(),
        };

        Self {
            name: built_info::PKG_NAME,
            version: built_info::PKG_VERSION,
            git_commit,
            target: built_info::TARGET,
            profile: built_info::PROFILE,
            rustc_version: built_info::RUSTC_VERSION,
            build_time_utc: built_info::BUILT_TIME_UTC,
        }
    }
}

/// The machine the run took place on
#[derive(Serialize)]
struct PlatformMetadata {
    hostname: String,
    os: String,
    kernel: String,
    machine: String,
}

impl PlatformMetadata {
    fn detect() -> Result<Self> {
        let info =
            PlatformInfo::new().map_err(|err| anyhow!("Unable to determine platform info: {err}"))?;
        let text = |value: &OsStr| value.to_string_lossy().into_owned();

        Ok(Self {
            hostname: text(info.nodename()),
            os: text(info.osname()),
            kernel: format!("{} {}", text(info.sysname()), text(info.release())),
            machine: text(info.machine()),
        })
    }
}

/// Write `metadata.toml` to the output folder
pub fn write_metadata(output_path: &Path, model: &Model) -> Result<()> {
    let metadata = Metadata {
        run: RunMetadata::new(model),
        model: ModelSize::new(&model.dataset),
        program: ProgramMetadata::new(),
        platform: PlatformMetadata::detect()?,
    };
    let contents = toml::to_string(&metadata).context("Failed to serialise metadata")?;
    fs::write(output_path.join(METADATA_FILE_NAME), contents)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::two_zone_dataset;
    use crate::model::parameters::ModelParameters;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[rstest]
    fn test_write_metadata(two_zone_dataset: Dataset) {
        let dir = tempdir().unwrap();
        let model = Model {
            model_path: PathBuf::from("models/two_zones"),
            parameters: ModelParameters::default(),
            dataset: two_zone_dataset,
        };
        write_metadata(dir.path(), &model).unwrap();

        let contents = fs::read_to_string(dir.path().join(METADATA_FILE_NAME)).unwrap();
        let value: toml::Table = toml::from_str(&contents).unwrap();
        assert_eq!(value["run"]["model_path"].as_str(), Some("models/two_zones"));
        assert_eq!(value["run"]["simulation_name"].as_str(), Some("two_zones"));
        assert_eq!(value["model"]["units"].as_integer(), Some(2));
        assert_eq!(value["model"]["storage_units"].as_integer(), Some(1));
        assert_eq!(value["model"]["timesteps"].as_integer(), Some(3));
        assert_eq!(value["program"]["name"].as_str(), Some("yapos"));
        assert!(value["platform"].get("hostname").is_some());
    }
}
