//! Fixtures for tests

use crate::dataset::{Dataset, Generator, Line, Matrix, RenewableCapacity};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// A unit without storage, connected to zone 0
pub fn thermal_generator(unit: &str, min: f64, max: f64, cost: f64) -> Generator {
    Generator {
        unit: unit.into(),
        bus: 0,
        cost,
        min,
        max,
        stomax: 0.0,
    }
}

/// A unit with storage, connected to zone 0
pub fn storage_generator(unit: &str, min: f64, max: f64, cost: f64, stomax: f64) -> Generator {
    Generator {
        stomax,
        ..thermal_generator(unit, min, max, cost)
    }
}

/// A table with one column per name and the same value everywhere
fn constant_matrix(names: &[&str], num_rows: usize, value: f64) -> Matrix {
    Matrix::new(
        names.iter().map(|name| (*name).to_string()).collect(),
        vec![vec![value; names.len()]; num_rows],
    )
}

/// A dataset with a single zone and no lines.
///
/// There is no renewable output or inflow and units are fully available.
pub fn single_zone_dataset(demand: &[f64], generators: &[Generator]) -> Dataset {
    let num_timesteps = demand.len();
    let units: Vec<&str> = generators.iter().map(|g| &*g.unit.0).collect();

    Dataset {
        generators: generators.to_vec(),
        lines: Vec::new(),
        demand: Matrix::new(
            vec!["zone".into()],
            demand.iter().map(|value| vec![*value]).collect(),
        ),
        renewables: constant_matrix(&["zone"], num_timesteps, 0.0),
        renewable_capacity: RenewableCapacity {
            technologies: Vec::new(),
            capacity: constant_matrix(&["zone"], 0, 0.0),
        },
        inflow: constant_matrix(&units, num_timesteps, 0.0),
        availability: constant_matrix(&units, num_timesteps, 1.0),
        storage_min: constant_matrix(&units, num_timesteps, 0.0),
    }
}

/// Two zones connected by a line, with a thermal unit in the north and a hydro unit in the south
#[fixture]
pub fn two_zone_dataset() -> Dataset {
    let zones = vec!["north".to_string(), "south".to_string()];
    let units = vec!["thermal".to_string(), "hydro".to_string()];

    Dataset {
        generators: vec![
            thermal_generator("thermal", 0.0, 100.0, 50.0),
            Generator {
                bus: 1,
                ..storage_generator("hydro", 0.0, 40.0, 5.0, 200.0)
            },
        ],
        lines: vec![Line {
            name: "north_south".into(),
            from: 0,
            to: 1,
            cap: 30.0,
        }],
        demand: Matrix::new(
            zones.clone(),
            vec![vec![40.0, 30.0], vec![50.0, 35.0], vec![60.0, 40.0]],
        ),
        renewables: Matrix::new(
            zones.clone(),
            vec![vec![5.0, 10.0], vec![5.0, 0.0], vec![5.0, 0.0]],
        ),
        renewable_capacity: RenewableCapacity {
            technologies: vec!["wind".into(), "solar".into()],
            capacity: Matrix::new(zones, vec![vec![10.0, 0.0], vec![0.0, 15.0]]),
        },
        inflow: Matrix::new(units.clone(), vec![vec![0.0, 10.0]; 3]),
        availability: Matrix::new(units.clone(), vec![vec![1.0, 1.0]; 3]),
        storage_min: Matrix::new(units, vec![vec![0.0, 20.0]; 3]),
    }
}
