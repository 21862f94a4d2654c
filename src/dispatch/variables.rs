//! Decision variables for the dispatch problem.
use super::index::{EntityKind, IndexSets};
use highs::RowProblem as Problem;
use indexmap::IndexMap;
use std::ops::{Range, RangeInclusive};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// A decision variable in the optimisation
///
/// Note that this type does **not** include the value of the variable; it just refers to a
/// particular column of the problem.
pub type Variable = highs::Col;

/// A family of decision variables, each defined over (entity, timestep)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum VariableFamily {
    /// Generation by each unit
    Production,
    /// Storage level at the end of each timestep
    StorageLevel,
    /// Fraction of each unit's capacity which is committed
    Commitment,
    /// Unserved demand in each zone
    Shed,
    /// Renewable output not injected in each zone
    Curtailment,
    /// Flow along each line (positive from `from` to `to`)
    Flow,
    /// Slack in the storage balance
    WaterSlack,
    /// Slack in the minimum storage level
    StorageSlack,
    /// Slack in the curtailment limit
    CurtailmentSlack,
}

impl VariableFamily {
    /// The kind of entity the variables are defined over
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Production
            | Self::StorageLevel
            | Self::Commitment
            | Self::WaterSlack
            | Self::StorageSlack => EntityKind::Generator,
            Self::Shed | Self::Curtailment | Self::CurtailmentSlack => EntityKind::Zone,
            Self::Flow => EntityKind::Line,
        }
    }

    /// Whether the variables are slacks, which should be zero for consistent input data
    pub fn is_slack(self) -> bool {
        matches!(
            self,
            Self::WaterSlack | Self::StorageSlack | Self::CurtailmentSlack
        )
    }

    /// The bounds for each variable
    fn bounds(self) -> RangeInclusive<f64> {
        match self {
            Self::Commitment => 0.0..=1.0,
            Self::Flow => f64::NEG_INFINITY..=f64::INFINITY,
            _ => 0.0..=f64::INFINITY,
        }
    }
}

/// The variables for one family along with their columns in the problem
struct FamilyVariables {
    vars: IndexMap<(usize, usize), Variable>,
    idx: Range<usize>,
}

/// A map for easy lookup of variables in the problem.
///
/// The entries are ordered (see [`IndexMap`]).
///
/// We use this data structure for two things:
///
/// 1. In order define constraints for the optimisation
/// 2. To keep track of the combination of parameters that each variable corresponds to, for when we
///    are reading the results of the optimisation.
pub struct VariableMap {
    system_cost: Variable,
    system_cost_idx: usize,
    families: IndexMap<VariableFamily, FamilyVariables>,
}

impl VariableMap {
    /// Add all variables to the problem.
    ///
    /// The only variable with a nonzero objective coefficient is the system cost, which is tied to
    /// the other variables by the cost definition constraint.
    pub fn new(problem: &mut Problem, index_sets: &IndexSets) -> Self {
        let system_cost_idx = problem.num_cols();
        let system_cost = problem.add_column(1.0, f64::NEG_INFINITY..=f64::INFINITY);

        let families = VariableFamily::iter()
            .map(|family| (family, add_family_variables(problem, index_sets, family)))
            .collect();

        Self {
            system_cost,
            system_cost_idx,
            families,
        }
    }

    /// The variable representing total system cost
    pub fn system_cost(&self) -> Variable {
        self.system_cost
    }

    /// The column index of the system cost variable
    pub fn system_cost_idx(&self) -> usize {
        self.system_cost_idx
    }

    /// Get the [`Variable`] corresponding to the given parameters.
    pub fn get(&self, family: VariableFamily, entity: usize, timestep: usize) -> Variable {
        *self.families[&family]
            .vars
            .get(&(entity, timestep))
            .expect("No variable found for given params")
    }

    /// Iterate over the variables of one family in a given order
    #[cfg(test)]
    pub fn iter_family(
        &self,
        family: VariableFamily,
    ) -> impl Iterator<Item = (usize, usize, Variable)> + '_ {
        self.families[&family]
            .vars
            .iter()
            .map(|(&(entity, timestep), &var)| (entity, timestep, var))
    }

    /// Pair the keys for one family with their values in the solution's columns
    pub fn zip_values<'a>(
        &'a self,
        family: VariableFamily,
        columns: &'a [f64],
    ) -> impl Iterator<Item = (usize, usize, f64)> + 'a {
        let family_vars = &self.families[&family];
        family_vars
            .vars
            .keys()
            .zip(columns[family_vars.idx.clone()].iter().copied())
            .map(|(&(entity, timestep), value)| (entity, timestep, value))
    }
}

/// Add a column to the problem for every (entity, timestep) of the family
fn add_family_variables(
    problem: &mut Problem,
    index_sets: &IndexSets,
    family: VariableFamily,
) -> FamilyVariables {
    // This line **must** come before we add more variables
    let start = problem.num_cols();

    let mut vars = IndexMap::new();
    for key in index_sets.iter_entity_timesteps(family.entity_kind()) {
        let var = problem.add_column(0.0, family.bounds());
        let existing = vars.insert(key, var).is_some();
        assert!(!existing, "Duplicate entry for var");
    }

    FamilyVariables {
        vars,
        idx: start..problem.num_cols(),
    }
}
