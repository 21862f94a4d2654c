//! Common functionality for yapos, a zonal hydro-thermal dispatch model.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod dataset;
pub mod dispatch;
pub mod graph;
pub mod id;
pub mod input;
pub mod log;
pub mod model;
pub mod output;
pub mod settings;
pub mod simulation;

#[cfg(test)]
mod fixture;

/// Get the config dir for the program
pub fn get_yapos_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No config dir on this platform; fall back on current directory
        return PathBuf::default();
    };

    config_dir.push("yapos");
    config_dir
}
