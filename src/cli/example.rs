//! The example models bundled with yapos and the `example` commands.
use super::{RunOpts, handle_run_command};
use crate::settings::Settings;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::{Dir, include_dir};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Each subfolder holds the input files for one example model
static EXAMPLES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/demos");

/// The file describing an example
const README_FILE_NAME: &str = "README.txt";

/// The subcommands for working with the bundled examples
#[derive(Subcommand)]
pub enum ExampleSubcommands {
    /// Print the names of the bundled examples.
    List,
    /// Print the description of an example.
    Info {
        /// Example name.
        name: String,
    },
    /// Copy the input files of an example to a new folder.
    Extract {
        /// Example name.
        name: String,
        /// Destination folder (defaults to the example name).
        new_path: Option<PathBuf>,
    },
    /// Solve an example without extracting it first.
    Run {
        /// Example name.
        name: String,
        #[command(flatten)]
        opts: RunOpts,
    },
}

impl ExampleSubcommands {
    /// Run the subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => println!("{}", iter_example_names().join("\n")),
            Self::Info { name } => println!("{}", get_example_readme(&name)?),
            Self::Extract { name, new_path } => {
                let new_path = new_path.unwrap_or_else(|| PathBuf::from(&name));
                extract_example(&name, &new_path)?;
            }
            Self::Run { name, opts } => handle_example_run_command(&name, &opts, None)?,
        }

        Ok(())
    }
}

/// Iterate over the names of the bundled examples
pub fn iter_example_names() -> impl Iterator<Item = &'static str> {
    EXAMPLES_DIR.dirs().filter_map(|dir| dir.path().to_str())
}

/// Find the bundled folder for an example
fn get_example_dir(name: &str) -> Result<&'static Dir<'static>> {
    let Some(dir) = EXAMPLES_DIR.get_dir(name) else {
        bail!(
            "No example called {name}. Available examples: {}",
            iter_example_names().join(", ")
        );
    };

    Ok(dir)
}

/// The description of an example
pub fn get_example_readme(name: &str) -> Result<&'static str> {
    let dir = get_example_dir(name)?;
    dir.get_file(dir.path().join(README_FILE_NAME))
        .and_then(|file| file.contents_utf8())
        .with_context(|| format!("Example {name} has no readable {README_FILE_NAME}"))
}

/// Copy the input files of an example into `new_path`, which must not already exist
pub fn extract_example(name: &str, new_path: &Path) -> Result<()> {
    let dir = get_example_dir(name)?;
    ensure!(
        dir.dirs().next().is_none(),
        "Example {name} contains subfolders, which are not supported"
    );
    ensure!(
        !new_path.exists(),
        "Destination folder {} already exists",
        new_path.display()
    );

    fs::create_dir_all(new_path)?;
    for file in dir.files() {
        let file_name = file.path().file_name().context("Invalid example file name")?;
        fs::write(new_path.join(file_name), file.contents())?;
    }

    Ok(())
}

/// Handle the `example run` command.
///
/// The example is solved from a temporary copy. Results go to `yapos_results/<name>` unless an
/// output folder is given.
pub fn handle_example_run_command(
    name: &str,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let model_path = temp_dir.path().join(name);
    extract_example(name, &model_path)?;
    handle_run_command(&model_path, opts, settings)
}
