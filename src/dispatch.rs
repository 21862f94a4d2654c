//! Code for performing dispatch optimisation.
//!
//! The dataset is translated into a linear program which minimises total system cost, subject to
//! zonal balance, generation, ramping, storage and transmission constraints. The primal values of
//! every variable family and the duals of every constraint are then read back from the solution.
use crate::model::Model;
use highs::{HighsModelStatus, HighsStatus, RowProblem as Problem, Sense};
use log::{Level, debug, log_enabled};
use std::error::Error;
use std::fmt;
use strum::IntoEnumIterator;

pub mod constraints;
pub mod index;
pub mod results;
pub mod variables;
use constraints::{ConstraintFamily, ConstraintIndex, ConstraintKeys, add_constraints};
use index::IndexSets;
use results::DenseTable;
use variables::{VariableFamily, VariableMap};

/// The solution to the dispatch optimisation problem
pub struct Solution {
    solution: highs::Solution,
    variables: VariableMap,
    index_sets: IndexSets,
    constraint_keys: ConstraintKeys,
}

impl Solution {
    /// The total system cost.
    ///
    /// As this is the only term in the objective, it is also the objective value.
    pub fn system_cost(&self) -> f64 {
        self.solution.columns()[self.variables.system_cost_idx()]
    }

    /// Get the values of a variable family as a table indexed by `[timestep, entity]`
    pub fn table(&self, family: VariableFamily) -> anyhow::Result<DenseTable> {
        DenseTable::from_entries(
            self.index_sets.num_entities(family.entity_kind()),
            self.index_sets.num_timesteps(),
            self.variables.zip_values(family, self.solution.columns()),
        )
    }

    /// Iterate over the dual values of every constraint, in the order they were added
    pub fn iter_duals(&self) -> impl Iterator<Item = (ConstraintFamily, &ConstraintIndex, f64)> {
        self.constraint_keys.iter_duals(self.solution.dual_rows())
    }
}

/// Defines the possible errors that can occur when running the solver
#[derive(Debug, Clone)]
pub enum ModelError {
    /// The model definition is incoherent.
    ///
    /// Users should not be able to trigger this error.
    Incoherent(HighsStatus),
    /// An optimal solution could not be found
    NonOptimal(HighsModelStatus),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Incoherent(status) => write!(f, "Incoherent model: {status:?}"),
            ModelError::NonOptimal(HighsModelStatus::Infeasible) => {
                write!(f, "Problem infeasible. Results not saved")
            }
            ModelError::NonOptimal(status) => {
                write!(f, "Could not find optimal result: {status:?}")
            }
        }
    }
}

impl Error for ModelError {}

/// Try to solve the model, returning an error if the model is incoherent or result is non-optimal
pub fn solve_optimal(model: highs::Model) -> Result<highs::SolvedModel, ModelError> {
    let solved = model.try_solve().map_err(ModelError::Incoherent)?;

    match solved.status() {
        HighsModelStatus::Optimal => Ok(solved),
        status => Err(ModelError::NonOptimal(status)),
    }
}

/// Perform the dispatch optimisation.
///
/// # Arguments
///
/// * `model` - The model
///
/// # Returns
///
/// A solution containing the values of all variables and the duals of all constraints, or an error
/// if no optimal solution was found.
pub fn perform_dispatch_optimisation(model: &Model) -> Result<Solution, ModelError> {
    let dataset = &model.dataset;
    let index_sets = IndexSets::new(dataset);

    // Set up problem
    let mut problem = Problem::default();
    let variables = VariableMap::new(&mut problem, &index_sets);
    let constraint_keys = add_constraints(
        &mut problem,
        &variables,
        &index_sets,
        dataset,
        &model.parameters,
    );
    debug!(
        "Dispatch problem has {} variables and {} constraints",
        problem.num_cols(),
        constraint_keys.num_rows()
    );
    for family in ConstraintFamily::iter() {
        if constraint_keys.get(family).is_empty() {
            debug!("No {family} constraints were added");
        }
    }

    let mut highs_model = problem
        .try_optimise(Sense::Minimise)
        .map_err(ModelError::Incoherent)?;
    enable_highs_logging(&mut highs_model);
    if let Some(time_limit) = model.parameters.solver_time_limit {
        highs_model.set_option("time_limit", time_limit);
    }

    // Solve model
    let solution = solve_optimal(highs_model)?;

    Ok(Solution {
        solution: solution.get_solution(),
        variables,
        index_sets,
        constraint_keys,
    })
}

/// Enable logging for the HiGHS solver.
///
/// Output goes straight to the console rather than through our logger, so it is only enabled when
/// info-level messages would be shown.
fn enable_highs_logging(model: &mut highs::Model) {
    let enabled = log_enabled!(Level::Info);
    model.set_option("output_flag", enabled);
    model.set_option("log_to_console", enabled);
}
