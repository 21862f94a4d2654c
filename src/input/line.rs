//! Code for reading the transmission lines CSV file
use super::{deserialise_non_negative, read_csv_optional};
use crate::dataset::Line;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

const LINES_FILE_NAME: &str = "lin.csv";

/// Represents a row of the lines CSV file
#[derive(Deserialize, Debug, PartialEq)]
struct LineRaw {
    from: usize,
    to: usize,
    #[serde(deserialize_with = "deserialise_non_negative")]
    cap: f64,
    line_name: String,
}

impl From<LineRaw> for Line {
    fn from(raw: LineRaw) -> Self {
        Line {
            name: raw.line_name.into(),
            from: raw.from,
            to: raw.to,
            cap: raw.cap,
        }
    }
}

/// Read transmission lines from the lines CSV file.
///
/// A model with a single zone needs no lines, so the file may contain a header only.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
pub fn read_lines(model_dir: &Path) -> Result<Vec<Line>> {
    let file_path = model_dir.join(LINES_FILE_NAME);
    let lines = read_csv_optional::<LineRaw>(&file_path)?
        .map(Line::from)
        .collect();

    Ok(lines)
}
