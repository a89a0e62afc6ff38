#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::SeedableRng;
use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

pub trait World {
    fn size(&self) -> GridSize;
    fn update(&mut self);
    fn slot_color_rgba(&self, loc: Loc) -> [u8; 4];

    fn num_slots(&self) -> usize {
        self.size().num_slots()
    }

    /// Writes one RGBA quad per slot, row-major.
    fn render_rgba(&self, frame: &mut [u8]) {
        debug_assert_eq!(frame.len(), 4 * self.num_slots());

        let locs = self.size().locs();
        for (loc, pixel) in locs.zip(frame.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&self.slot_color_rgba(loc));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self { width, height }
    }

    pub fn num_slots(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, loc: Loc) -> bool {
        loc.row < self.height && loc.col < self.width
    }

    pub fn locs(self) -> impl DoubleEndedIterator<Item = Loc> + Clone {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Loc::new(row, col)))
    }
}

#[derive(Clone, Debug)]
pub struct WorldGrid<C>
where
    C: Clone + Debug,
{
    size: GridSize,
    slots: Vec<Option<C>>,
}

impl<C> WorldGrid<C>
where
    C: Clone + Debug,
{
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            slots: vec![None; size.num_slots()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn num_occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn slots_iter(&self) -> impl DoubleEndedIterator<Item = Option<&C>> + Clone {
        self.slots.iter().map(Option::as_ref)
    }

    pub fn occupants_iter(&self) -> impl Iterator<Item = (Loc, &C)> + Clone {
        self.size
            .locs()
            .zip(self.slots.iter())
            .filter_map(|(loc, slot)| slot.as_ref().map(|occupant| (loc, occupant)))
    }

    pub fn get(&self, loc: Loc) -> Option<&C> {
        self.slot(loc).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, loc: Loc) -> Option<&mut C> {
        self.slot_mut(loc).and_then(Option::as_mut)
    }

    /// False for off-grid locations, which can never receive an occupant.
    pub fn is_vacant(&self, loc: Loc) -> bool {
        matches!(self.slot(loc), Some(None))
    }

    pub fn put(&mut self, loc: Loc, occupant: C) -> Option<C> {
        self[loc].replace(occupant)
    }

    pub fn take(&mut self, loc: Loc) -> Option<C> {
        self.slot_mut(loc).and_then(Option::take)
    }

    fn slot(&self, loc: Loc) -> Option<&Option<C>> {
        loc.grid_index(self.size).map(|index| &self.slots[index])
    }

    fn slot_mut(&mut self, loc: Loc) -> Option<&mut Option<C>> {
        loc.grid_index(self.size)
            .map(|index| &mut self.slots[index])
    }
}

impl<C> Index<Loc> for WorldGrid<C>
where
    C: Clone + Debug,
{
    type Output = Option<C>;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.slot(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl<C> IndexMut<Loc> for WorldGrid<C>
where
    C: Clone + Debug,
{
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.slot_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    Stay,
}

impl Direction {
    fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Stay => (0, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, size: GridSize) -> Option<usize> {
        if size.contains(*self) {
            Some(self.row as usize * size.width as usize + self.col as usize)
        } else {
            None
        }
    }

    /// None when the neighbor would fall off the grid.
    pub fn neighbor(&self, direction: Direction, size: GridSize) -> Option<Loc> {
        let (row_offset, col_offset) = direction.offset();
        let row = u32::try_from(self.row as i64 + row_offset).ok()?;
        let col = u32::try_from(self.col as i64 + col_offset).ok()?;
        let result = Loc::new(row, col);
        size.contains(result).then_some(result)
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }

    pub fn next_in_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn next_color_rgb(&mut self) -> [u8; 3] {
        [self.rng.random(), self.rng.random(), self.rng.random()]
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
