//! Command line interface for yapos.
use crate::input::load_model;
use crate::log;
use crate::output::{create_output_directory, get_output_dir};
use crate::settings::{Settings, get_settings_file_path};
use crate::simulation;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;

/// A zonal dispatch model for hydro-thermal power systems.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Command to run
    #[command(subcommand)]
    command: Option<Commands>,
    /// Print the documentation for all commands as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options controlling where the results of a run are saved
#[derive(Args, Default)]
pub struct RunOpts {
    /// Folder for results (defaults to yapos_results/<model name>)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Replace the results folder if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the dispatch problem for a model and save the results.
    Run {
        /// Folder containing the model input files.
        model_dir: PathBuf,
        #[command(flatten)]
        opts: RunOpts,
    },
    /// List, inspect, extract or run the bundled example models.
    Example {
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Check that a model's input files are consistent without solving it.
    Validate {
        /// Folder containing the model input files.
        model_dir: PathBuf,
    },
    /// Inspect the program settings file.
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

/// The subcommands for managing the settings file
#[derive(Subcommand)]
enum SettingsSubcommands {
    /// Print the path of the settings file
    Path,
    /// Print a settings file with every option at its default value
    DumpDefault,
}

/// Parse the command line and run the requested command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    match cli.command {
        Some(Commands::Run { model_dir, opts }) => handle_run_command(&model_dir, &opts, None),
        Some(Commands::Example { subcommand }) => subcommand.execute(),
        Some(Commands::Validate { model_dir }) => handle_validate_command(&model_dir, None),
        Some(Commands::Settings { subcommand }) => handle_settings_command(&subcommand),
        None => {
            println!("{}", Cli::command().render_long_help());
            Ok(())
        }
    }
}

/// Use the given settings, or read them from the settings file
fn settings_or_load(settings: Option<Settings>) -> Result<Settings> {
    settings.map_or_else(
        || Settings::load().context("Failed to load settings."),
        Ok,
    )
}

/// Handle the `run` command.
///
/// The results folder is prepared first so that log files can be written there while the model is
/// loaded and solved.
pub fn handle_run_command(
    model_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;
    let output_path = match &opts.output_dir {
        Some(output_dir) => output_dir.clone(),
        None => get_output_dir(model_path)?,
    };

    let replaced = create_output_directory(&output_path, opts.overwrite || settings.overwrite)
        .with_context(|| format!("Cannot save results to {}", output_path.display()))?;
    log::init(&settings.log_level, Some(&output_path))
        .context("Failed to initialise logging.")?;
    if replaced {
        warn!("Replaced existing results in {}", output_path.display());
    }

    let model = load_model(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;
    info!("Loaded model from {}", model_path.display());

    simulation::run(&model, &output_path)?;
    info!("Results saved to {}", output_path.display());

    Ok(())
}

/// Handle the `validate` command.
///
/// No log files are written.
pub fn handle_validate_command(model_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = settings_or_load(settings)?;
    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    load_model(model_path)
        .with_context(|| format!("Model in {} is invalid", model_path.display()))?;
    info!("Model in {} is valid", model_path.display());

    Ok(())
}

/// Handle the `settings` commands.
fn handle_settings_command(subcommand: &SettingsSubcommands) -> Result<()> {
    match subcommand {
        SettingsSubcommands::Path => println!("{}", get_settings_file_path().display()),
        SettingsSubcommands::DumpDefault => print!("{}", Settings::default_file_contents()?),
    }

    Ok(())
}
