use crate::colony::ColonyId;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColonyAverages {
    pub colony: ColonyId,
    pub count: u64,
    pub average_strength: i64,
    pub average_reproduction: i64,
}

impl fmt::Display for ColonyAverages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Colony {}: Average Strength: {}, Average Reproduction: {}",
            self.colony, self.average_strength, self.average_reproduction
        )
    }
}

/// Per-colony averages for one generation. Colonies without live cells are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub generation: u64,
    pub colonies: Vec<ColonyAverages>,
}

impl GenerationReport {
    pub fn get(&self, colony: ColonyId) -> Option<&ColonyAverages> {
        self.colonies
            .iter()
            .find(|averages| averages.colony == colony)
    }

    pub fn total_count(&self) -> u64 {
        self.colonies.iter().map(|averages| averages.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.colonies.is_empty()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for averages in &self.colonies {
            writeln!(f, "{averages}")?;
        }
        writeln!(f)
    }
}
