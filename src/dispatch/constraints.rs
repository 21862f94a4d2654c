//! Code for adding constraints to the dispatch optimisation problem.
use super::index::{EntityKind, IndexSets};
use super::variables::{Variable, VariableFamily, VariableMap};
use crate::dataset::Dataset;
use crate::model::parameters::ModelParameters;
use highs::RowProblem as Problem;
use indexmap::IndexMap;
use std::ops::RangeInclusive;
use strum::{EnumIter, IntoStaticStr};

/// A family of constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ConstraintFamily {
    /// Defines the system cost variable
    CostDefinition,
    /// Supply equals demand in each zone
    Balance,
    /// Lower limit on production
    MinGeneration,
    /// Upper limit on production, scaled by commitment
    MaxGeneration,
    /// Limit on increase in production between timesteps
    RampUp,
    /// Limit on decrease in production between timesteps
    RampDown,
    /// Lower limit on storage level
    MinStorage,
    /// Upper limit on storage level
    MaxStorage,
    /// Conservation of stored energy
    StorageBalance,
    /// Production cannot exceed what is stored plus inflow
    MaxDischarge,
    /// Curtailment cannot exceed renewable output
    MaxCurtailment,
    /// Shedding cannot exceed demand
    MaxShed,
    /// Flow is limited by line capacity
    FlowLimit,
}

impl ConstraintFamily {
    /// The kind of entity the constraints are defined over, if any
    pub fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Self::CostDefinition => None,
            Self::Balance | Self::MaxCurtailment | Self::MaxShed => Some(EntityKind::Zone),
            Self::FlowLimit => Some(EntityKind::Line),
            Self::MinGeneration
            | Self::MaxGeneration
            | Self::RampUp
            | Self::RampDown
            | Self::MinStorage
            | Self::MaxStorage
            | Self::StorageBalance
            | Self::MaxDischarge => Some(EntityKind::Generator),
        }
    }
}

/// The index of a single constraint within its family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintIndex {
    /// The only constraint in its family
    Scalar,
    /// A constraint for one entity (generator, line or zone) at one timestep
    EntityTimestep {
        /// Index of the entity
        entity: usize,
        /// Index of the timestep
        timestep: usize,
    },
}

impl ConstraintIndex {
    /// The entity index, if any
    pub fn entity(&self) -> Option<usize> {
        match self {
            Self::Scalar => None,
            Self::EntityTimestep { entity, .. } => Some(*entity),
        }
    }

    /// The timestep index, if any
    pub fn timestep(&self) -> Option<usize> {
        match self {
            Self::Scalar => None,
            Self::EntityTimestep { timestep, .. } => Some(*timestep),
        }
    }
}

/// Corresponding variables for a constraint along with the row offset in the solution
pub struct KeysWithOffset<T> {
    offset: usize,
    keys: Vec<T>,
}

impl<T> KeysWithOffset<T> {
    /// The number of constraints
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no constraints were added
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the keys in the order the constraints were added
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.keys.iter()
    }

    /// Zip the keys with the corresponding dual values in the solution, accounting for the offset
    pub fn zip_duals<'a>(&'a self, duals: &'a [f64]) -> impl Iterator<Item = (&'a T, f64)> {
        assert!(
            self.offset + self.keys.len() <= duals.len(),
            "Bad constraint keys: dual rows out of range"
        );

        self.keys.iter().zip(duals[self.offset..].iter().copied())
    }
}

/// The keys for the constraints in one family
pub type FamilyKeys = KeysWithOffset<ConstraintIndex>;

/// The keys for every constraint family, in the order they were added to the problem
pub struct ConstraintKeys(IndexMap<ConstraintFamily, FamilyKeys>);

impl ConstraintKeys {
    /// Get the keys for the given family
    pub fn get(&self, family: ConstraintFamily) -> &FamilyKeys {
        &self.0[&family]
    }

    /// The total number of constraints
    pub fn num_rows(&self) -> usize {
        self.0.values().map(KeysWithOffset::len).sum()
    }

    /// Iterate over every constraint along with its dual value
    pub fn iter_duals<'a>(
        &'a self,
        duals: &'a [f64],
    ) -> impl Iterator<Item = (ConstraintFamily, &'a ConstraintIndex, f64)> {
        self.0.iter().flat_map(move |(&family, keys)| {
            keys.zip_duals(duals)
                .map(move |(index, dual)| (family, index, dual))
        })
    }
}

/// The bounds and terms of a single row
type Row = (RangeInclusive<f64>, Vec<(Variable, f64)>);

/// Add all constraints to the problem.
///
/// The cost definition must be the first row, so it is added first. The other families are added
/// in the order they appear in [`ConstraintFamily`].
///
/// # Arguments
///
/// * `problem` - The optimisation problem
/// * `variables` - The variables in the problem
/// * `index_sets` - Index sets for the dataset
/// * `dataset` - The input dataset
/// * `parameters` - Policy parameters
///
/// # Returns
///
/// Keys for every constraint, grouped by family
pub fn add_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
    parameters: &ModelParameters,
) -> ConstraintKeys {
    let mut keys = IndexMap::new();
    keys.insert(
        ConstraintFamily::CostDefinition,
        add_cost_definition_constraint(problem, variables, index_sets, dataset, parameters),
    );
    keys.insert(
        ConstraintFamily::Balance,
        add_balance_constraints(problem, variables, index_sets, dataset),
    );
    keys.insert(
        ConstraintFamily::MinGeneration,
        add_min_generation_constraints(problem, variables, index_sets, dataset),
    );
    keys.insert(
        ConstraintFamily::MaxGeneration,
        add_max_generation_constraints(problem, variables, index_sets, dataset),
    );
    keys.insert(
        ConstraintFamily::RampUp,
        add_ramp_constraints(problem, variables, index_sets, dataset, parameters, true),
    );
    keys.insert(
        ConstraintFamily::RampDown,
        add_ramp_constraints(problem, variables, index_sets, dataset, parameters, false),
    );
    keys.insert(
        ConstraintFamily::MinStorage,
        add_min_storage_constraints(problem, variables, index_sets, dataset, parameters),
    );
    keys.insert(
        ConstraintFamily::MaxStorage,
        add_max_storage_constraints(problem, variables, index_sets, dataset),
    );
    keys.insert(
        ConstraintFamily::StorageBalance,
        add_storage_balance_constraints(problem, variables, index_sets, dataset, parameters),
    );
    keys.insert(
        ConstraintFamily::MaxDischarge,
        add_max_discharge_constraints(problem, variables, index_sets, dataset),
    );
    keys.insert(
        ConstraintFamily::MaxCurtailment,
        add_max_curtailment_constraints(problem, variables, index_sets, dataset),
    );
    keys.insert(
        ConstraintFamily::MaxShed,
        add_max_shed_constraints(problem, variables, index_sets, dataset),
    );
    keys.insert(
        ConstraintFamily::FlowLimit,
        add_flow_limit_constraints(problem, variables, index_sets, dataset),
    );

    ConstraintKeys(keys)
}

/// Add one row for each (entity, timestep) key
fn add_rows<I, F>(problem: &mut Problem, keys: I, mut get_row: F) -> FamilyKeys
where
    I: IntoIterator<Item = (usize, usize)>,
    F: FnMut(usize, usize) -> Row,
{
    // Row offset in problem. This line **must** come before we add more constraints.
    let offset = problem.num_rows();

    let mut added = Vec::new();
    for (entity, timestep) in keys {
        let (bounds, terms) = get_row(entity, timestep);
        problem.add_row(bounds, terms);
        added.push(ConstraintIndex::EntityTimestep { entity, timestep });
    }

    FamilyKeys {
        offset,
        keys: added,
    }
}

/// Add the equality defining the system cost.
///
/// `system_cost` equals the sum of generation costs and penalties on shedding and slacks.
fn add_cost_definition_constraint(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
    parameters: &ModelParameters,
) -> FamilyKeys {
    // The keys below assume this is row zero
    assert!(
        problem.num_rows() == 0,
        "Cost definition must be added before other constraints"
    );

    let mut terms = vec![(variables.system_cost(), 1.0)];
    for (g, t) in index_sets.iter_entity_timesteps(EntityKind::Generator) {
        let cost = dataset.generators[g].cost;
        // HiGHS warns about explicit zeros in the constraint matrix
        if cost != 0.0 {
            terms.push((variables.get(VariableFamily::Production, g, t), -cost));
        }
        terms.push((
            variables.get(VariableFamily::WaterSlack, g, t),
            -parameters.water_slack_penalty,
        ));
        terms.push((
            variables.get(VariableFamily::StorageSlack, g, t),
            -parameters.storage_slack_penalty,
        ));
    }
    for (n, t) in index_sets.iter_entity_timesteps(EntityKind::Zone) {
        terms.push((
            variables.get(VariableFamily::Shed, n, t),
            -parameters.shed_penalty,
        ));
        terms.push((
            variables.get(VariableFamily::CurtailmentSlack, n, t),
            -parameters.curtailment_slack_penalty,
        ));
    }

    problem.add_row(0.0..=0.0, terms);

    FamilyKeys {
        offset: 0,
        keys: vec![ConstraintIndex::Scalar],
    }
}

/// Add zonal balance constraints.
///
/// Local production, renewable output, shedding and imports must equal demand, curtailment and
/// exports. The dual of each row is the zonal energy price.
fn add_balance_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(
        problem,
        index_sets.iter_entity_timesteps(EntityKind::Zone),
        |n, t| {
            let rhs = dataset.demand.get(t, n) - dataset.renewables.get(t, n);

            let mut terms: Vec<_> = index_sets
                .generators_in_zone(n)
                .iter()
                .map(|&g| (variables.get(VariableFamily::Production, g, t), 1.0))
                .collect();
            terms.push((variables.get(VariableFamily::Shed, n, t), 1.0));
            terms.push((variables.get(VariableFamily::Curtailment, n, t), -1.0));
            terms.extend(
                index_sets
                    .lines_into_zone(n)
                    .iter()
                    .map(|&l| (variables.get(VariableFamily::Flow, l, t), 1.0)),
            );
            terms.extend(
                index_sets
                    .lines_out_of_zone(n)
                    .iter()
                    .map(|&l| (variables.get(VariableFamily::Flow, l, t), -1.0)),
            );

            (rhs..=rhs, terms)
        },
    )
}

/// Add lower limits on production for every unit
fn add_min_generation_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(
        problem,
        index_sets.iter_entity_timesteps(EntityKind::Generator),
        |g, t| {
            let min = dataset.generators[g].min * dataset.availability.get(t, g);
            let prod = variables.get(VariableFamily::Production, g, t);
            (min..=f64::INFINITY, vec![(prod, 1.0)])
        },
    )
}

/// Add upper limits on production for every unit.
///
/// We are enforcing that `prod - u * max * av <= 0`.
fn add_max_generation_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(
        problem,
        index_sets.iter_entity_timesteps(EntityKind::Generator),
        |g, t| {
            let max = dataset.generators[g].max * dataset.availability.get(t, g);
            let mut terms = vec![(variables.get(VariableFamily::Production, g, t), 1.0)];
            if max != 0.0 {
                terms.push((variables.get(VariableFamily::Commitment, g, t), -max));
            }
            (f64::NEG_INFINITY..=0.0, terms)
        },
    )
}

/// Add ramping constraints for storage units.
///
/// The change in production between consecutive timesteps is limited to `max * av /
/// ramping_factor`. There is no constraint for the first timestep.
fn add_ramp_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
    parameters: &ModelParameters,
    up: bool,
) -> FamilyKeys {
    add_rows(
        problem,
        index_sets.iter_storage_timesteps().filter(|&(_, t)| t > 0),
        |g, t| {
            let limit = dataset.generators[g].max * dataset.availability.get(t, g)
                / parameters.ramping_factor;
            let bounds = if up {
                f64::NEG_INFINITY..=limit
            } else {
                -limit..=f64::INFINITY
            };
            let terms = vec![
                (variables.get(VariableFamily::Production, g, t), 1.0),
                (variables.get(VariableFamily::Production, g, t - 1), -1.0),
            ];
            (bounds, terms)
        },
    )
}

/// The initial storage level of a unit.
///
/// This is also the minimum level at the end of the horizon.
fn initial_storage_level(
    dataset: &Dataset,
    parameters: &ModelParameters,
    g: usize,
    t: usize,
) -> f64 {
    dataset.generators[g].stomax * dataset.availability.get(t, g) * parameters.initial_storage_level
}

/// Add lower limits on storage level.
///
/// In the final timestep the limit is the initial storage level, otherwise it is taken from the
/// storage minimum table. Violations are absorbed by the storage slack.
fn add_min_storage_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
    parameters: &ModelParameters,
) -> FamilyKeys {
    let last = index_sets.last_timestep();
    add_rows(problem, index_sets.iter_storage_timesteps(), |g, t| {
        let floor = if t == last {
            initial_storage_level(dataset, parameters, g, t)
        } else {
            dataset.storage_min.get(t, g) * dataset.availability.get(t, g)
        };
        let terms = vec![
            (variables.get(VariableFamily::StorageLevel, g, t), 1.0),
            (variables.get(VariableFamily::StorageSlack, g, t), 1.0),
        ];
        (floor..=f64::INFINITY, terms)
    })
}

/// Add upper limits on storage level
fn add_max_storage_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(problem, index_sets.iter_storage_timesteps(), |g, t| {
        let max = dataset.generators[g].stomax * dataset.availability.get(t, g);
        let sl = variables.get(VariableFamily::StorageLevel, g, t);
        (f64::NEG_INFINITY..=max, vec![(sl, 1.0)])
    })
}

/// Add storage balance constraints.
///
/// The level at the end of each timestep is the previous level plus inflow, minus production and
/// water slack. The level before the first timestep is the initial storage level.
fn add_storage_balance_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
    parameters: &ModelParameters,
) -> FamilyKeys {
    add_rows(problem, index_sets.iter_storage_timesteps(), |g, t| {
        let inflow = dataset.inflow.get(t, g);
        let sl = variables.get(VariableFamily::StorageLevel, g, t);
        let prod = variables.get(VariableFamily::Production, g, t);
        let ws = variables.get(VariableFamily::WaterSlack, g, t);

        if t == 0 {
            // sl + prod + ws == initial + inflow
            let rhs = initial_storage_level(dataset, parameters, g, t) + inflow;
            (rhs..=rhs, vec![(sl, 1.0), (prod, 1.0), (ws, 1.0)])
        } else {
            // sl[t-1] - sl - prod - ws == -inflow
            let prev = variables.get(VariableFamily::StorageLevel, g, t - 1);
            (
                -inflow..=-inflow,
                vec![(prev, 1.0), (sl, -1.0), (prod, -1.0), (ws, -1.0)],
            )
        }
    })
}

/// Add limits on discharge for storage units.
///
/// We are enforcing that `prod - sl <= inflow`.
fn add_max_discharge_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(problem, index_sets.iter_storage_timesteps(), |g, t| {
        let inflow = dataset.inflow.get(t, g);
        let terms = vec![
            (variables.get(VariableFamily::Production, g, t), 1.0),
            (variables.get(VariableFamily::StorageLevel, g, t), -1.0),
        ];
        (f64::NEG_INFINITY..=inflow, terms)
    })
}

/// Add limits on curtailment, with a slack for curtailment beyond renewable output
fn add_max_curtailment_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(
        problem,
        index_sets.iter_entity_timesteps(EntityKind::Zone),
        |n, t| {
            let ren = dataset.renewables.get(t, n);
            let terms = vec![
                (variables.get(VariableFamily::Curtailment, n, t), 1.0),
                (variables.get(VariableFamily::CurtailmentSlack, n, t), -1.0),
            ];
            (f64::NEG_INFINITY..=ren, terms)
        },
    )
}

/// Add limits on shedding
fn add_max_shed_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(
        problem,
        index_sets.iter_entity_timesteps(EntityKind::Zone),
        |n, t| {
            let dem = dataset.demand.get(t, n);
            let shd = variables.get(VariableFamily::Shed, n, t);
            (f64::NEG_INFINITY..=dem, vec![(shd, 1.0)])
        },
    )
}

/// Add limits on flow in either direction along each line
fn add_flow_limit_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    index_sets: &IndexSets,
    dataset: &Dataset,
) -> FamilyKeys {
    add_rows(
        problem,
        index_sets.iter_entity_timesteps(EntityKind::Line),
        |l, t| {
            let cap = dataset.lines[l].cap;
            let flw = variables.get(VariableFamily::Flow, l, t);
            (-cap..=cap, vec![(flw, 1.0)])
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::two_zone_dataset;
    use itertools::assert_equal;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn build(dataset: &Dataset) -> (Problem, ConstraintKeys) {
        let index_sets = IndexSets::new(dataset);
        let mut problem = Problem::default();
        let variables = VariableMap::new(&mut problem, &index_sets);
        let keys = add_constraints(
            &mut problem,
            &variables,
            &index_sets,
            dataset,
            &ModelParameters::default(),
        );
        (problem, keys)
    }

    #[test]
    fn test_constraint_index() {
        let index = ConstraintIndex::EntityTimestep {
            entity: 1,
            timestep: 2,
        };
        assert_eq!(index.entity(), Some(1));
        assert_eq!(index.timestep(), Some(2));
        assert_eq!(ConstraintIndex::Scalar.entity(), None);
        assert_eq!(ConstraintIndex::Scalar.timestep(), None);
    }

    #[test]
    fn test_family_names() {
        assert_eq!(ConstraintFamily::CostDefinition.to_string(), "cost_definition");
        assert_eq!(<&str>::from(ConstraintFamily::FlowLimit), "flow_limit");
    }

    #[test]
    fn test_family_entity_kind() {
        assert_eq!(ConstraintFamily::CostDefinition.entity_kind(), None);
        assert_eq!(
            ConstraintFamily::Balance.entity_kind(),
            Some(EntityKind::Zone)
        );
        assert_eq!(
            ConstraintFamily::StorageBalance.entity_kind(),
            Some(EntityKind::Generator)
        );
    }

    #[test]
    fn test_zip_duals() {
        let keys = KeysWithOffset {
            offset: 1,
            keys: vec!["a", "b"],
        };
        assert_equal(
            keys.zip_duals(&[0.0, 1.0, 2.0, 3.0]),
            [(&"a", 1.0), (&"b", 2.0)],
        );
    }

    #[test]
    #[should_panic(expected = "Bad constraint keys: dual rows out of range")]
    fn test_zip_duals_out_of_range() {
        let keys = KeysWithOffset {
            offset: 2,
            keys: vec!["a", "b"],
        };
        keys.zip_duals(&[0.0, 1.0, 2.0]).count();
    }

    #[rstest]
    fn test_row_counts(two_zone_dataset: Dataset) {
        let (problem, keys) = build(&two_zone_dataset);

        assert_eq!(keys.get(ConstraintFamily::CostDefinition).len(), 1);
        assert_eq!(keys.get(ConstraintFamily::Balance).len(), 6);
        assert_eq!(keys.get(ConstraintFamily::MinGeneration).len(), 6);
        assert_eq!(keys.get(ConstraintFamily::MaxGeneration).len(), 6);
        assert_eq!(keys.get(ConstraintFamily::RampUp).len(), 2);
        assert_eq!(keys.get(ConstraintFamily::RampDown).len(), 2);
        assert_eq!(keys.get(ConstraintFamily::MinStorage).len(), 3);
        assert_eq!(keys.get(ConstraintFamily::MaxStorage).len(), 3);
        assert_eq!(keys.get(ConstraintFamily::StorageBalance).len(), 3);
        assert_eq!(keys.get(ConstraintFamily::MaxDischarge).len(), 3);
        assert_eq!(keys.get(ConstraintFamily::MaxCurtailment).len(), 6);
        assert_eq!(keys.get(ConstraintFamily::MaxShed).len(), 6);
        assert_eq!(keys.get(ConstraintFamily::FlowLimit).len(), 3);

        assert_eq!(keys.num_rows(), 50);
        assert_eq!(problem.num_rows(), 50);

        // Every family has keys, even if it has no rows
        let total: usize = ConstraintFamily::iter()
            .map(|family| keys.get(family).len())
            .sum();
        assert_eq!(total, 50);
    }

    #[rstest]
    fn test_no_storage_rows_for_thermal_units(two_zone_dataset: Dataset) {
        let (_, keys) = build(&two_zone_dataset);

        // Only the hydro unit (index 1) has storage
        for family in [
            ConstraintFamily::RampUp,
            ConstraintFamily::RampDown,
            ConstraintFamily::MinStorage,
            ConstraintFamily::MaxStorage,
            ConstraintFamily::StorageBalance,
            ConstraintFamily::MaxDischarge,
        ] {
            assert!(
                keys.get(family)
                    .iter()
                    .all(|index| index.entity() == Some(1))
            );
        }

        // Ramp constraints skip the first timestep
        assert!(
            keys.get(ConstraintFamily::RampUp)
                .iter()
                .all(|index| index.timestep() != Some(0))
        );
    }

    #[rstest]
    fn test_no_storage_units(mut two_zone_dataset: Dataset) {
        for generator in &mut two_zone_dataset.generators {
            generator.stomax = 0.0;
        }
        let (_, keys) = build(&two_zone_dataset);
        assert!(keys.get(ConstraintFamily::StorageBalance).is_empty());
        assert!(keys.get(ConstraintFamily::RampUp).is_empty());
        assert_eq!(keys.num_rows(), 1 + 6 * 5 + 3);
    }

    #[rstest]
    fn test_iter_duals_order(two_zone_dataset: Dataset) {
        let (problem, keys) = build(&two_zone_dataset);
        let duals: Vec<f64> = (0..problem.num_rows()).map(|i| i as f64).collect();

        let all: Vec<_> = keys.iter_duals(&duals).collect();
        assert_eq!(all.len(), 50);
        assert_eq!(
            all[0],
            (ConstraintFamily::CostDefinition, &ConstraintIndex::Scalar, 0.0)
        );
        assert_eq!(all[1].0, ConstraintFamily::Balance);
        assert_eq!(
            all[1].1,
            &ConstraintIndex::EntityTimestep {
                entity: 0,
                timestep: 0
            }
        );
        assert_eq!(all[49].0, ConstraintFamily::FlowLimit);

        // Duals are paired with rows in order
        for (i, (_, _, dual)) in all.iter().enumerate() {
            assert_eq!(*dual, i as f64);
        }
    }
}
