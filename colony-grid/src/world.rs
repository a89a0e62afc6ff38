use crate::cell::Cell;
use crate::colony::{ColonyId, ColonyRegistry};
use crate::report::GenerationReport;
use crate::step;
use log::{debug, info, warn};
use world_grid::{GridSize, Loc, Random, World, WorldGrid};

pub const EMPTY_SLOT_COLOR: [u8; 4] = [10, 10, 10, 0xff];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    CreateColony,
    PlaceSeed { colony: ColonyId, loc: Loc },
    ToggleDynamics,
    Advance,
    Terminate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    ColonyCreated(ColonyId),
    SeedPlaced(bool),
    DynamicsEnabled(bool),
    Advanced(Option<GenerationReport>),
    Terminated,
}

#[derive(Debug)]
pub struct ColonyWorld {
    grid: WorldGrid<Cell>,
    colonies: ColonyRegistry,
    rand: Random,
    generation: u64,
    dynamics_enabled: bool,
}

impl ColonyWorld {
    pub fn new(size: GridSize, rand: Random) -> Self {
        Self {
            grid: WorldGrid::new(size),
            colonies: ColonyRegistry::new(),
            rand,
            generation: 0,
            dynamics_enabled: false,
        }
    }

    pub fn grid(&self) -> &WorldGrid<Cell> {
        &self.grid
    }

    pub fn colonies(&self) -> &ColonyRegistry {
        &self.colonies
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dynamics_enabled(&self) -> bool {
        self.dynamics_enabled
    }

    pub fn create_colony(&mut self, color: [u8; 3]) -> ColonyId {
        self.colonies.create_colony(color)
    }

    pub fn create_random_colony(&mut self) -> ColonyId {
        let color = self.rand.next_color_rgb();
        self.create_colony(color)
    }

    /// Puts a fresh cell with the colony's initial traits at `loc`, replacing any occupant.
    pub fn place_seed(&mut self, colony: ColonyId, loc: Loc) -> bool {
        let Some(traits) = self.colonies.get(colony).map(|c| c.initial_traits) else {
            warn!("Ignoring seed for unknown colony {colony}");
            return false;
        };
        if !self.grid.size().contains(loc) {
            warn!("Ignoring seed for colony {colony} outside the grid at {loc:?}");
            return false;
        }
        self.grid.put(loc, Cell::seed(colony, traits));
        true
    }

    pub fn set_dynamics(&mut self, enabled: bool) {
        self.dynamics_enabled = enabled;
    }

    pub fn toggle_dynamics(&mut self) -> bool {
        self.dynamics_enabled = !self.dynamics_enabled;
        debug!("Dynamics enabled: {}", self.dynamics_enabled);
        self.dynamics_enabled
    }

    /// Runs one generation when `apply_dynamics` is set. Otherwise leaves the grid and
    /// colony statistics untouched and returns None.
    pub fn advance(&mut self, apply_dynamics: bool) -> Option<GenerationReport> {
        if !apply_dynamics {
            return None;
        }

        step::sweep(&mut self.grid, &mut self.colonies, &mut self.rand);
        let report = self.colonies.take_report(self.generation);
        debug!(
            "Generation {}: {} cells visited across {} colonies, {} slots occupied",
            self.generation,
            report.total_count(),
            report.colonies.len(),
            self.grid.num_occupied()
        );
        self.generation += 1;
        Some(report)
    }

    pub fn tick(&mut self) -> Option<GenerationReport> {
        self.advance(self.dynamics_enabled)
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::CreateColony => CommandOutcome::ColonyCreated(self.create_random_colony()),
            Command::PlaceSeed { colony, loc } => {
                CommandOutcome::SeedPlaced(self.place_seed(colony, loc))
            }
            Command::ToggleDynamics => CommandOutcome::DynamicsEnabled(self.toggle_dynamics()),
            Command::Advance => CommandOutcome::Advanced(self.tick()),
            Command::Terminate => CommandOutcome::Terminated,
        }
    }

    pub fn colony_color_at(&self, loc: Loc) -> Option<[u8; 3]> {
        let cell = self.grid.get(loc)?;
        self.colonies.get(cell.colony).map(|colony| colony.color)
    }
}

impl World for ColonyWorld {
    fn size(&self) -> GridSize {
        self.grid.size()
    }

    fn update(&mut self) {
        if let Some(report) = self.tick() {
            for averages in &report.colonies {
                info!("Generation {}: {averages}", report.generation);
            }
        }
    }

    fn slot_color_rgba(&self, loc: Loc) -> [u8; 4] {
        self.grid
            .get(loc)
            .and_then(|cell| self.colonies.get(cell.colony))
            .map_or(EMPTY_SLOT_COLOR, |colony| colony.color_rgba())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Traits;

    fn world(width: u32, height: u32, seed: u64) -> ColonyWorld {
        ColonyWorld::new(GridSize::new(width, height), Random::from_seed(seed))
    }

    #[test]
    fn seeds_use_colony_baseline() {
        let mut world = world(4, 4, 1);
        let colony = world.create_colony([1, 2, 3]);
        assert!(world.place_seed(colony, Loc::new(3, 3)));
        let seed = world.grid().get(Loc::new(3, 3)).copied();
        assert_eq!(seed.map(|cell| cell.traits), Some(Traits::INITIAL));
        assert_eq!(seed.map(|cell| cell.age), Some(0));
        assert_eq!(world.colony_color_at(Loc::new(3, 3)), Some([1, 2, 3]));
    }

    #[test]
    fn off_grid_seed_is_rejected() {
        let mut world = world(4, 4, 2);
        let colony = world.create_colony([1, 2, 3]);
        assert!(!world.place_seed(colony, Loc::new(4, 0)));
        assert_eq!(world.grid().num_occupied(), 0);
    }

    #[test]
    fn seed_overwrites_occupant() {
        let mut world = world(2, 2, 3);
        let first = world.create_colony([1, 1, 1]);
        let second = world.create_colony([2, 2, 2]);
        world.place_seed(first, Loc::new(0, 0));
        world.place_seed(second, Loc::new(0, 0));
        assert_eq!(world.grid().num_occupied(), 1);
        assert_eq!(world.colony_color_at(Loc::new(0, 0)), Some([2, 2, 2]));
    }

    #[test]
    fn advance_without_dynamics_changes_nothing() {
        let mut world = world(5, 5, 4);
        let colony = world.create_colony([1, 2, 3]);
        world.place_seed(colony, Loc::new(2, 2));
        let before = world.grid().clone();

        assert_eq!(world.advance(false), None);
        assert_eq!(world.tick(), None);
        assert_eq!(world.generation(), 0);
        assert_eq!(
            world.grid().slots_iter().collect::<Vec<_>>(),
            before.slots_iter().collect::<Vec<_>>()
        );
        assert_eq!(world.colonies().get(colony).map(|c| c.census().count), Some(0));
    }

    #[test]
    fn commands_drive_the_world() {
        let mut world = world(6, 6, 5);
        let CommandOutcome::ColonyCreated(colony) = world.apply(Command::CreateColony) else {
            panic!("expected a colony");
        };
        assert_eq!(
            world.apply(Command::PlaceSeed {
                colony,
                loc: Loc::new(5, 5)
            }),
            CommandOutcome::SeedPlaced(true)
        );
        assert_eq!(world.apply(Command::Advance), CommandOutcome::Advanced(None));
        assert_eq!(
            world.apply(Command::ToggleDynamics),
            CommandOutcome::DynamicsEnabled(true)
        );

        let CommandOutcome::Advanced(Some(report)) = world.apply(Command::Advance) else {
            panic!("expected a report");
        };
        assert_eq!(report.generation, 0);
        assert_eq!(world.generation(), 1);
        assert_eq!(world.apply(Command::Terminate), CommandOutcome::Terminated);
    }

    #[test]
    fn update_follows_dynamics_toggle() {
        let mut world = world(4, 4, 7);
        let colony = world.create_colony([1, 2, 3]);
        world.place_seed(colony, Loc::new(3, 3));

        world.update();
        assert_eq!(world.generation(), 0);
        assert_eq!(world.grid().get(Loc::new(3, 3)).map(|cell| cell.age), Some(0));

        world.set_dynamics(true);
        world.update();
        assert_eq!(world.generation(), 1);
        assert_eq!(world.colonies().get(colony).map(|c| c.census().count), Some(0));
        assert_eq!(world.grid().occupants_iter().filter(|(_, cell)| cell.age == 1).count(), 1);
    }

    #[test]
    fn renders_colony_colors_over_background() {
        let mut world = world(2, 1, 6);
        let colony = world.create_colony([0x11, 0x22, 0x33]);
        world.place_seed(colony, Loc::new(0, 1));

        let mut frame = vec![0_u8; 8];
        world.render_rgba(&mut frame);
        assert_eq!(frame, vec![10, 10, 10, 0xff, 0x11, 0x22, 0x33, 0xff]);
    }
}
