//! Index sets for the dispatch problem.
//!
//! These are computed once from the dataset and shared by the variable and constraint builders.
use crate::dataset::Dataset;
use itertools::iproduct;
use std::ops::Range;

/// The kind of entity a variable or constraint is defined over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Generating units
    Generator,
    /// Transmission lines
    Line,
    /// Zones
    Zone,
}

/// Sizes of the index sets along with derived subsets
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSets {
    num_generators: usize,
    num_lines: usize,
    num_zones: usize,
    num_timesteps: usize,
    /// Generators with `stomax > 0`, to which all storage constraints apply
    storage_generators: Vec<usize>,
    /// Generators connected to each zone
    generators_by_zone: Vec<Vec<usize>>,
    /// Lines whose receiving end is each zone
    lines_into_zone: Vec<Vec<usize>>,
    /// Lines whose sending end is each zone
    lines_out_of_zone: Vec<Vec<usize>>,
}

impl IndexSets {
    /// Build the index sets for a (validated) dataset
    pub fn new(dataset: &Dataset) -> Self {
        let num_zones = dataset.num_zones();

        let storage_generators = dataset
            .generators
            .iter()
            .enumerate()
            .filter(|(_, generator)| generator.has_storage())
            .map(|(idx, _)| idx)
            .collect();

        let mut generators_by_zone = vec![Vec::new(); num_zones];
        for (idx, generator) in dataset.generators.iter().enumerate() {
            generators_by_zone[generator.bus].push(idx);
        }

        let mut lines_into_zone = vec![Vec::new(); num_zones];
        let mut lines_out_of_zone = vec![Vec::new(); num_zones];
        for (idx, line) in dataset.lines.iter().enumerate() {
            // A line from a zone to itself has no effect on the balance
            if line.from == line.to {
                continue;
            }
            lines_into_zone[line.to].push(idx);
            lines_out_of_zone[line.from].push(idx);
        }

        Self {
            num_generators: dataset.num_generators(),
            num_lines: dataset.num_lines(),
            num_zones,
            num_timesteps: dataset.num_timesteps(),
            storage_generators,
            generators_by_zone,
            lines_into_zone,
            lines_out_of_zone,
        }
    }

    /// The number of timesteps
    pub fn num_timesteps(&self) -> usize {
        self.num_timesteps
    }

    /// The number of entities of the given kind
    pub fn num_entities(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Generator => self.num_generators,
            EntityKind::Line => self.num_lines,
            EntityKind::Zone => self.num_zones,
        }
    }

    /// The final timestep
    pub fn last_timestep(&self) -> usize {
        self.num_timesteps - 1
    }

    /// Iterate over timesteps
    pub fn timesteps(&self) -> Range<usize> {
        0..self.num_timesteps
    }

    /// Iterate over every (entity, timestep) pair for the given kind of entity
    pub fn iter_entity_timesteps(
        &self,
        kind: EntityKind,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        iproduct!(0..self.num_entities(kind), self.timesteps())
    }

    /// Iterate over every (storage generator, timestep) pair
    pub fn iter_storage_timesteps(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        iproduct!(self.storage_generators.iter().copied(), self.timesteps())
    }

    /// The generators with storage
    pub fn storage_generators(&self) -> &[usize] {
        &self.storage_generators
    }

    /// The generators connected to the given zone
    pub fn generators_in_zone(&self, zone: usize) -> &[usize] {
        &self.generators_by_zone[zone]
    }

    /// The lines flowing into the given zone
    pub fn lines_into_zone(&self, zone: usize) -> &[usize] {
        &self.lines_into_zone[zone]
    }

    /// The lines flowing out of the given zone
    pub fn lines_out_of_zone(&self, zone: usize) -> &[usize] {
        &self.lines_out_of_zone[zone]
    }
}
