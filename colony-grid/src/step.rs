//! One generation of colony dynamics, applied in place.
//!
//! Slots are visited once each in row-major order while the grid is being rewritten, so a cell
//! that moves (or is born) down or to the right of the current slot is visited again later in
//! the same sweep, while one that lands up or to the left waits for the next sweep.

use crate::cell::Cell;
use crate::colony::ColonyRegistry;
use crate::combat::{self, CombatOutcome};
use arrayvec::ArrayVec;
use log::trace;
use world_grid::{Direction, Loc, Random, WorldGrid};

const BIRTH_DIRECTIONS: [Direction; 5] = [
    Direction::Up,
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Stay,
];

const MOVE_DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Right,
    Direction::Up,
    Direction::Left,
];

pub fn sweep(grid: &mut WorldGrid<Cell>, colonies: &mut ColonyRegistry, rand: &mut Random) {
    for loc in grid.size().locs() {
        update_slot(grid, colonies, loc, rand);
    }
}

fn update_slot(
    grid: &mut WorldGrid<Cell>,
    colonies: &mut ColonyRegistry,
    loc: Loc,
    rand: &mut Random,
) {
    let Some(cell) = grid.get(loc).copied() else {
        return;
    };

    colonies.record(cell.colony, cell.traits);

    if cell.is_expired() {
        grid.take(loc);
        return;
    }

    if cell.wants_to_reproduce(rand) {
        reproduce(grid, loc, rand);
    }

    let direction = random_move_direction(rand);
    move_and_fight(grid, loc, direction);
}

/// Places a child of the cell at `loc` in a random vacant neighbor, or in `loc` itself,
/// replacing the parent. Returns where the child went, if anywhere.
pub fn reproduce(grid: &mut WorldGrid<Cell>, loc: Loc, rand: &mut Random) -> Option<Loc> {
    let parent = *grid.get(loc)?;
    let size = grid.size();

    let mut candidates: ArrayVec<(Direction, Loc), 5> = BIRTH_DIRECTIONS
        .iter()
        .filter_map(|&direction| loc.neighbor(direction, size).map(|target| (direction, target)))
        .collect();
    rand.shuffle(&mut candidates);

    let (_, target) = candidates
        .into_iter()
        .find(|&(direction, target)| direction == Direction::Stay || grid.is_vacant(target))?;
    grid.put(target, parent.child(rand));
    Some(target)
}

fn random_move_direction(rand: &mut Random) -> Direction {
    let mut directions = MOVE_DIRECTIONS;
    rand.shuffle(&mut directions);
    rand.choose(&directions)
        .copied()
        .unwrap_or(Direction::Stay)
}

/// Moves the cell at `from` one step toward `direction`, fighting any rival colony's cell found
/// there, then ages whichever cell ends up holding the acting cell's final slot.
/// Returns that slot, or None when `from` is empty.
pub fn move_and_fight(grid: &mut WorldGrid<Cell>, from: Loc, direction: Direction) -> Option<Loc> {
    let attacker = *grid.get(from)?;
    let destination = match from.neighbor(direction, grid.size()) {
        Some(target) if target != from => settle(grid, &attacker, from, target),
        _ => from,
    };

    if let Some(actor) = grid.get_mut(destination) {
        actor.grow_older();
    }
    Some(destination)
}

fn settle(grid: &mut WorldGrid<Cell>, attacker: &Cell, from: Loc, target: Loc) -> Loc {
    let Some(defender) = grid.get(target).copied() else {
        let mover = grid.take(from);
        grid[target] = mover;
        return target;
    };

    if defender.colony == attacker.colony {
        return from;
    }

    let outcome = combat::resolve(&defender, attacker);
    trace!(
        "Colony {} at {:?} attacked colony {} at {:?}: {:?}",
        attacker.colony, from, defender.colony, target, outcome
    );
    match outcome {
        CombatOutcome::AttackerWins => {
            let winner = grid.take(from);
            grid[target] = winner;
            target
        }
        CombatOutcome::DefenderWins => {
            let winner = grid.take(target);
            grid[from] = winner;
            from
        }
        CombatOutcome::Tie => from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{AGE_LIMIT, Traits};
    use crate::colony::ColonyId;
    use world_grid::GridSize;

    fn two_colonies() -> (ColonyRegistry, ColonyId, ColonyId) {
        let mut colonies = ColonyRegistry::new();
        let red = colonies.create_colony([0xff, 0, 0]);
        let blue = colonies.create_colony([0, 0, 0xff]);
        (colonies, red, blue)
    }

    #[test]
    fn moves_into_vacant_slot_and_ages() {
        let (_, red, _) = two_colonies();
        let mut grid = WorldGrid::new(GridSize::new(3, 3));
        let from = Loc::new(1, 1);
        grid.put(from, Cell::seed(red, Traits::INITIAL));

        let destination = move_and_fight(&mut grid, from, Direction::Right);
        assert_eq!(destination, Some(Loc::new(1, 2)));
        assert!(grid.is_vacant(from));
        assert_eq!(grid.get(Loc::new(1, 2)).map(|cell| cell.age), Some(1));
    }

    #[test]
    fn off_grid_move_stays_put() {
        let (_, red, _) = two_colonies();
        let mut grid = WorldGrid::new(GridSize::new(2, 2));
        let from = Loc::new(0, 0);
        grid.put(from, Cell::seed(red, Traits::INITIAL));

        assert_eq!(move_and_fight(&mut grid, from, Direction::Up), Some(from));
        assert_eq!(move_and_fight(&mut grid, from, Direction::Left), Some(from));
        assert_eq!(grid.get(from).map(|cell| cell.age), Some(2));
        assert_eq!(grid.num_occupied(), 1);
    }

    #[test]
    fn same_colony_blocks_move() {
        let (_, red, _) = two_colonies();
        let mut grid = WorldGrid::new(GridSize::new(2, 1));
        grid.put(Loc::new(0, 0), Cell::seed(red, Traits::new(500, 0)));
        grid.put(Loc::new(0, 1), Cell::seed(red, Traits::new(1, 0)));

        let destination = move_and_fight(&mut grid, Loc::new(0, 0), Direction::Right);
        assert_eq!(destination, Some(Loc::new(0, 0)));
        assert_eq!(grid.num_occupied(), 2);
        assert_eq!(grid.get(Loc::new(0, 1)).map(|cell| cell.age), Some(0));
    }

    #[test]
    fn tie_leaves_both_cells_in_place() {
        let (_, red, blue) = two_colonies();
        let mut grid = WorldGrid::new(GridSize::new(2, 1));
        let red_cell = Cell::seed(red, Traits::new(90, 0));
        let blue_cell = Cell::seed(blue, Traits::new(90, 0));
        grid.put(Loc::new(0, 0), red_cell);
        grid.put(Loc::new(0, 1), blue_cell);

        move_and_fight(&mut grid, Loc::new(0, 0), Direction::Right);
        assert_eq!(grid.get(Loc::new(0, 0)).map(|cell| cell.colony), Some(red));
        assert_eq!(grid.get(Loc::new(0, 0)).map(|cell| cell.age), Some(1));
        assert_eq!(grid.get(Loc::new(0, 1)), Some(&blue_cell));
    }

    #[test]
    fn winning_defender_takes_attackers_slot() {
        let (_, red, blue) = two_colonies();
        let mut grid = WorldGrid::new(GridSize::new(2, 1));
        grid.put(Loc::new(0, 0), Cell::seed(blue, Traits::new(50, 0)));
        grid.put(Loc::new(0, 1), Cell::seed(red, Traits::new(200, 0)));

        let destination = move_and_fight(&mut grid, Loc::new(0, 0), Direction::Right);
        assert_eq!(destination, Some(Loc::new(0, 0)));
        assert!(grid.is_vacant(Loc::new(0, 1)));
        let survivor = grid.get(Loc::new(0, 0)).copied();
        assert_eq!(survivor.map(|cell| cell.colony), Some(red));
        assert_eq!(survivor.map(|cell| cell.age), Some(1));
    }

    #[test]
    fn reproduction_fills_only_vacant_slots() {
        let (_, red, _) = two_colonies();
        let mut rand = Random::from_seed(11);
        let size = GridSize::new(3, 1);
        for _ in 0..50 {
            let mut grid = WorldGrid::new(size);
            let parent = Cell::seed(red, Traits::INITIAL);
            grid.put(Loc::new(0, 1), parent);
            grid.put(Loc::new(0, 0), Cell::seed(red, Traits::new(1, 1)));

            let target = reproduce(&mut grid, Loc::new(0, 1), &mut rand);
            assert!(matches!(target, Some(loc) if loc == Loc::new(0, 1) || loc == Loc::new(0, 2)));
            assert_eq!(grid.get(Loc::new(0, 0)).map(|cell| cell.traits), Some(Traits::new(1, 1)));
            assert!(grid.occupants_iter().all(|(_, cell)| cell.age == 0));
        }
    }

    #[test]
    fn reproducing_in_place_replaces_parent() {
        let (_, red, _) = two_colonies();
        let mut rand = Random::from_seed(12);
        let mut grid = WorldGrid::new(GridSize::new(1, 1));
        let mut parent = Cell::seed(red, Traits::INITIAL);
        parent.age = AGE_LIMIT - 1;
        grid.put(Loc::new(0, 0), parent);

        assert_eq!(reproduce(&mut grid, Loc::new(0, 0), &mut rand), Some(Loc::new(0, 0)));
        assert_eq!(grid.get(Loc::new(0, 0)).map(|cell| cell.age), Some(0));
    }

    #[test]
    fn expired_cells_are_counted_then_removed() {
        let (mut colonies, red, _) = two_colonies();
        let mut rand = Random::from_seed(13);
        let mut grid = WorldGrid::new(GridSize::new(2, 2));
        let mut old = Cell::seed(red, Traits::new(10, 255));
        old.age = AGE_LIMIT;
        grid.put(Loc::new(1, 1), old);

        sweep(&mut grid, &mut colonies, &mut rand);
        assert_eq!(grid.num_occupied(), 0);
        let report = colonies.take_report(0);
        assert_eq!(report.get(red).map(|averages| averages.count), Some(1));
    }

    #[test]
    fn empty_grid_sweep_is_a_no_op() {
        let (mut colonies, _, _) = two_colonies();
        let mut rand = Random::from_seed(14);
        let mut grid = WorldGrid::new(GridSize::new(4, 4));
        sweep(&mut grid, &mut colonies, &mut rand);
        assert_eq!(grid.num_occupied(), 0);
        assert!(colonies.take_report(0).is_empty());
    }
}
