//! Dense tables of results, with one row per timestep and one column per entity.
use anyhow::{Result, anyhow, ensure};

/// Values of one variable family, indexed by `[timestep, entity]`
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTable {
    num_entities: usize,
    num_timesteps: usize,
    values: Vec<f64>,
}

impl DenseTable {
    /// Build a table from `(entity, timestep, value)` entries.
    ///
    /// Every combination of entity and timestep must appear exactly once.
    pub fn from_entries<I>(num_entities: usize, num_timesteps: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut values = vec![None; num_entities * num_timesteps];
        for (entity, timestep, value) in entries {
            ensure!(
                entity < num_entities && timestep < num_timesteps,
                "Entry for entity {entity} at timestep {timestep} is out of range"
            );

            let cell = &mut values[timestep * num_entities + entity];
            ensure!(
                cell.is_none(),
                "Duplicate entry for entity {entity} at timestep {timestep}"
            );
            *cell = Some(value);
        }

        let values = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                value.ok_or_else(|| {
                    anyhow!(
                        "Missing entry for entity {} at timestep {}",
                        idx % num_entities,
                        idx / num_entities
                    )
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            num_entities,
            num_timesteps,
            values,
        })
    }

    /// The number of timesteps (rows)
    pub fn num_timesteps(&self) -> usize {
        self.num_timesteps
    }

    /// The number of entities (columns)
    pub fn num_entities(&self) -> usize {
        self.num_entities
    }

    /// Get the value for an entity at a timestep
    pub fn get(&self, timestep: usize, entity: usize) -> f64 {
        assert!(entity < self.num_entities, "Entity index out of range");
        self.values[timestep * self.num_entities + entity]
    }

    /// The values for every entity at a timestep
    pub fn row(&self, timestep: usize) -> &[f64] {
        let start = timestep * self.num_entities;
        &self.values[start..start + self.num_entities]
    }

    /// The sum of all values
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_from_entries() {
        let entries = [
            (0, 0, 1.0),
            (0, 1, 2.0),
            (1, 0, 3.0),
            (1, 1, 4.0),
            (2, 0, 5.0),
            (2, 1, 6.0),
        ];
        let table = DenseTable::from_entries(3, 2, entries).unwrap();
        assert_eq!(table.num_entities(), 3);
        assert_eq!(table.num_timesteps(), 2);
        assert_approx_eq!(f64, table.get(1, 0), 2.0);
        assert_approx_eq!(f64, table.get(0, 2), 5.0);
        assert_eq!(table.row(0), [1.0, 3.0, 5.0]);
        assert_eq!(table.row(1), [2.0, 4.0, 6.0]);
        assert_approx_eq!(f64, table.total(), 21.0);
    }

    #[test]
    fn test_from_entries_missing() {
        let entries = [(0, 0, 1.0), (1, 0, 3.0), (1, 1, 4.0)];
        assert_error!(
            DenseTable::from_entries(2, 2, entries),
            "Missing entry for entity 0 at timestep 1"
        );
    }

    #[test]
    fn test_from_entries_duplicate() {
        let entries = [(0, 0, 1.0), (0, 0, 2.0)];
        assert_error!(
            DenseTable::from_entries(1, 1, entries),
            "Duplicate entry for entity 0 at timestep 0"
        );
    }

    #[test]
    fn test_from_entries_out_of_range() {
        assert_error!(
            DenseTable::from_entries(1, 1, [(0, 1, 1.0)]),
            "Entry for entity 0 at timestep 1 is out of range"
        );
    }

    #[test]
    fn test_from_entries_no_entities() {
        let table = DenseTable::from_entries(0, 3, []).unwrap();
        assert_eq!(table.num_entities(), 0);
        assert_eq!(table.num_timesteps(), 3);
        assert!(table.row(0).is_empty());
    }
}
