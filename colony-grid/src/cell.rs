use crate::colony::ColonyId;
use world_grid::Random;

pub const AGE_LIMIT: u32 = 7;
pub const BIG_MUTATION_AGE_LIMIT: u32 = AGE_LIMIT / 2;

const BIG_MUTATION_PERCENT: u32 = 2;
const MUTATION_PERCENT: u32 = 20;
const MINOR_MUTATION_SPREAD: i32 = 10;
const MAX_REPRODUCTION: i32 = 255;
const REPRODUCTION_ROLL_MAX: i32 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Traits {
    pub strength: i32,
    pub reproduction: i32,
}

impl Traits {
    pub const INITIAL: Traits = Traits::new(127, 127);

    pub const fn new(strength: i32, reproduction: i32) -> Self {
        Self {
            strength,
            reproduction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gene {
    Strength,
    Reproduction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Big,
    Minor(Gene),
    Copy,
}

impl Mutation {
    pub fn random(rand: &mut Random) -> Self {
        let draw = rand.next_in_range(0..100);
        let gene = if rand.next_bool(0.5) {
            Gene::Strength
        } else {
            Gene::Reproduction
        };
        Self::from_draw(draw, gene)
    }

    /// Maps a percentile draw in [0, 99] to a branch; `gene` only matters for minor mutations.
    pub fn from_draw(draw: u32, gene: Gene) -> Self {
        if draw < BIG_MUTATION_PERCENT {
            Mutation::Big
        } else if draw < MUTATION_PERCENT {
            Mutation::Minor(gene)
        } else {
            Mutation::Copy
        }
    }

    pub fn apply(self, parent: Traits, rand: &mut Random) -> Traits {
        match self {
            Mutation::Big => Traits::new(
                parent.strength.saturating_add(100),
                parent.reproduction.saturating_sub(50),
            ),
            Mutation::Minor(Gene::Strength) => Traits {
                strength: Self::perturb(parent.strength, i32::MAX, rand),
                ..parent
            },
            Mutation::Minor(Gene::Reproduction) => Traits {
                reproduction: Self::perturb(parent.reproduction, MAX_REPRODUCTION, rand),
                ..parent
            },
            Mutation::Copy => parent,
        }
    }

    pub fn age_limit(self) -> u32 {
        match self {
            Mutation::Big => BIG_MUTATION_AGE_LIMIT,
            _ => AGE_LIMIT,
        }
    }

    // An empty range (parent far below zero) leaves the value alone.
    fn perturb(value: i32, ceiling: i32, rand: &mut Random) -> i32 {
        let low = value.saturating_sub(MINOR_MUTATION_SPREAD).max(0);
        let high = value.saturating_add(MINOR_MUTATION_SPREAD).min(ceiling);
        if low < high {
            rand.next_in_range(low..high)
        } else {
            value
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub traits: Traits,
    pub age: u32,
    pub age_limit: u32,
    pub colony: ColonyId,
}

impl Cell {
    /// A driver-placed cell: exact traits, full lifespan.
    pub fn seed(colony: ColonyId, traits: Traits) -> Self {
        Self {
            traits,
            age: 0,
            age_limit: AGE_LIMIT,
            colony,
        }
    }

    pub fn spawn(parent: Traits, colony: ColonyId, rand: &mut Random) -> Self {
        let mutation = Mutation::random(rand);
        Self::spawn_with(parent, colony, mutation, rand)
    }

    pub fn spawn_with(
        parent: Traits,
        colony: ColonyId,
        mutation: Mutation,
        rand: &mut Random,
    ) -> Self {
        Self {
            traits: mutation.apply(parent, rand),
            age: 0,
            age_limit: mutation.age_limit(),
            colony,
        }
    }

    pub fn child(&self, rand: &mut Random) -> Self {
        Self::spawn(self.traits, self.colony, rand)
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.age_limit
    }

    pub fn wants_to_reproduce(&self, rand: &mut Random) -> bool {
        Self::reproduction_roll(self.traits.reproduction, rand)
    }

    /// Succeeds with probability of about `reproduction / 500`; never when `reproduction <= 1`.
    pub fn reproduction_roll(reproduction: i32, rand: &mut Random) -> bool {
        rand.next_in_range(1..=REPRODUCTION_ROLL_MAX) < reproduction
    }

    pub fn grow_older(&mut self) {
        self.age += 1;
    }
}
