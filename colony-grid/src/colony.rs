use crate::cell::Traits;
use crate::report::{ColonyAverages, GenerationReport};
use log::debug;
use std::fmt;

/// Position of a colony in its registry. Colonies are never removed, so ids stay valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColonyId(usize);

impl ColonyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColonyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub count: u64,
    pub total_strength: i64,
    pub total_reproduction: i64,
}

impl Census {
    fn record(&mut self, traits: Traits) {
        self.count += 1;
        self.total_strength += traits.strength as i64;
        self.total_reproduction += traits.reproduction as i64;
    }

    fn averages(&self) -> Option<(i64, i64)> {
        let count = i64::try_from(self.count).ok().filter(|&count| count > 0)?;
        Some((
            self.total_strength.div_euclid(count),
            self.total_reproduction.div_euclid(count),
        ))
    }
}

#[derive(Clone, Debug)]
pub struct Colony {
    pub color: [u8; 3],
    pub initial_traits: Traits,
    census: Census,
}

impl Colony {
    fn new(color: [u8; 3]) -> Self {
        Self {
            color,
            initial_traits: Traits::INITIAL,
            census: Census::default(),
        }
    }

    pub fn census(&self) -> Census {
        self.census
    }

    pub fn color_rgba(&self) -> [u8; 4] {
        [self.color[0], self.color[1], self.color[2], 0xff]
    }
}

#[derive(Clone, Debug, Default)]
pub struct ColonyRegistry {
    colonies: Vec<Colony>,
}

impl ColonyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_colony(&mut self, color: [u8; 3]) -> ColonyId {
        let id = ColonyId(self.colonies.len());
        self.colonies.push(Colony::new(color));
        debug!("Created colony {id} with color {color:?}");
        id
    }

    pub fn get(&self, id: ColonyId) -> Option<&Colony> {
        self.colonies.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.colonies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colonies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColonyId, &Colony)> {
        self.colonies
            .iter()
            .enumerate()
            .map(|(index, colony)| (ColonyId(index), colony))
    }

    pub fn record(&mut self, id: ColonyId, traits: Traits) {
        if let Some(colony) = self.colonies.get_mut(id.0) {
            colony.census.record(traits);
        }
    }

    /// Summarizes every colony seen this generation, then clears all censuses.
    pub fn take_report(&mut self, generation: u64) -> GenerationReport {
        let mut colonies = Vec::new();
        for (index, colony) in self.colonies.iter_mut().enumerate() {
            let census = std::mem::take(&mut colony.census);
            if let Some((average_strength, average_reproduction)) = census.averages() {
                colonies.push(ColonyAverages {
                    colony: ColonyId(index),
                    count: census.count,
                    average_strength,
                    average_reproduction,
                });
            }
        }
        GenerationReport {
            generation,
            colonies,
        }
    }
}
