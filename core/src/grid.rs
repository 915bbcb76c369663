//! Dense, row-major storage addressed by [`CellCoord`].

use std::{iter::Enumerate, mem, slice};

use crate::{CellCoord, GridSize, LifeError};

/// Rectangular container holding exactly one value per cell.
///
/// Cells are stored row by row so that iteration visits `(0, 0)`, `(1, 0)`,
/// ... `(width - 1, 0)`, `(0, 1)` and so on. Cloning produces an independent
/// deep copy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    size: GridSize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a grid of the provided dimensions with every cell set to `T::default()`.
    pub fn new(width: u32, height: u32) -> Result<Self, LifeError>
    where
        T: Default,
    {
        let size = GridSize::new(width, height)?;
        Ok(Self::from_fn(size, |_| T::default()))
    }

    /// Creates a grid by invoking `factory` once per cell in row-major order.
    pub fn from_fn<F>(size: GridSize, mut factory: F) -> Self
    where
        F: FnMut(CellCoord) -> T,
    {
        let cells = (0..size.cell_count())
            .map(|index| factory(size.cell_at(index)))
            .collect();
        Self { size, cells }
    }

    /// Wraps pre-built row-major storage whose length already matches `size`.
    pub(crate) fn from_cells(size: GridSize, cells: Vec<T>) -> Result<Self, LifeError> {
        if cells.len() != size.cell_count() {
            return Err(LifeError::MalformedState(format!(
                "expected {} cells for a {size} grid, found {}",
                size.cell_count(),
                cells.len()
            )));
        }
        Ok(Self { size, cells })
    }

    /// Overwrites every cell with a value produced by `factory`.
    pub fn populate<F>(&mut self, mut factory: F)
    where
        F: FnMut(CellCoord) -> T,
    {
        let size = self.size;
        for (index, slot) in self.cells.iter_mut().enumerate() {
            *slot = factory(size.cell_at(index));
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width()
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height()
    }

    /// Reads the value stored at `cell`.
    pub fn get(&self, cell: CellCoord) -> Result<&T, LifeError> {
        let index = self.checked_index(cell)?;
        Ok(&self.cells[index])
    }

    /// Mutable access to the value stored at `cell`.
    pub fn get_mut(&mut self, cell: CellCoord) -> Result<&mut T, LifeError> {
        let index = self.checked_index(cell)?;
        Ok(&mut self.cells[index])
    }

    /// Stores `value` at `cell`, returning the value it replaced.
    pub fn set(&mut self, cell: CellCoord, value: T) -> Result<T, LifeError> {
        let slot = self.get_mut(cell)?;
        Ok(mem::replace(slot, value))
    }

    /// First cell, in row-major order, whose value satisfies `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<CellCoord>
    where
        P: FnMut(&T) -> bool,
    {
        self.cells
            .iter()
            .position(|value| predicate(value))
            .map(|index| self.size.cell_at(index))
    }

    /// First cell, in row-major order, holding a value equal to `needle`.
    pub fn position_of(&self, needle: &T) -> Option<CellCoord>
    where
        T: PartialEq,
    {
        self.find(|value| value == needle)
    }

    /// Iterates `(cell, value)` pairs in row-major order.
    ///
    /// Every call starts again from `(0, 0)`.
    #[must_use]
    pub fn iter(&self) -> GridIter<'_, T> {
        GridIter {
            size: self.size,
            inner: self.cells.iter().enumerate(),
        }
    }

    /// Iterates the coordinates of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let size = self.size;
        (0..size.cell_count()).map(move |index| size.cell_at(index))
    }

    /// Builds a grid of the same size by transforming each cell.
    #[must_use]
    pub fn map<U, F>(&self, mut transform: F) -> Grid<U>
    where
        F: FnMut(CellCoord, &T) -> U,
    {
        Grid {
            size: self.size,
            cells: self.iter().map(|(cell, value)| transform(cell, value)).collect(),
        }
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, LifeError> {
        self.size.index(cell).ok_or(LifeError::OutOfBounds {
            cell,
            size: self.size,
        })
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (CellCoord, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the cells of a [`Grid`].
#[derive(Clone, Debug)]
pub struct GridIter<'a, T> {
    size: GridSize,
    inner: Enumerate<slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = (CellCoord, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, value) = self.inner.next()?;
        Some((self.size.cell_at(index), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for GridIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> GridSize {
        GridSize::new(width, height).expect("valid size")
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(
            Grid::<u8>::new(0, 3),
            Err(LifeError::InvalidDimension {
                width: 0,
                height: 3
            })
        );
        assert!(Grid::<u8>::new(2, 0).is_err());
    }

    #[test]
    fn iteration_visits_every_cell_once_in_row_major_order() {
        let grid = Grid::from_fn(size(3, 2), |cell| cell.column() * 10 + cell.row());
        let visited: Vec<_> = grid.iter().map(|(cell, value)| (cell, *value)).collect();

        assert_eq!(
            visited,
            vec![
                (CellCoord::new(0, 0), 0),
                (CellCoord::new(1, 0), 10),
                (CellCoord::new(2, 0), 20),
                (CellCoord::new(0, 1), 1),
                (CellCoord::new(1, 1), 11),
                (CellCoord::new(2, 1), 21),
            ]
        );
        assert_eq!(grid.iter().len(), 6);
        assert_eq!(grid.iter().next(), Some((CellCoord::new(0, 0), &0)));
    }

    #[test]
    fn populate_calls_factory_for_every_cell() {
        let mut grid: Grid<u32> = Grid::new(4, 5).expect("grid");
        let mut calls = 0;
        grid.populate(|_| {
            calls += 1;
            calls
        });

        assert_eq!(calls, 20);
        assert_eq!(grid.get(CellCoord::new(3, 4)), Ok(&20));
        assert_eq!(grid.get(CellCoord::new(0, 1)), Ok(&5));
    }

    #[test]
    fn set_returns_previous_value() {
        let mut grid: Grid<char> = Grid::from_fn(size(2, 2), |_| '.');
        assert_eq!(grid.set(CellCoord::new(1, 1), '#'), Ok('.'));
        assert_eq!(grid.set(CellCoord::new(1, 1), '@'), Ok('#'));
        assert_eq!(grid.get(CellCoord::new(1, 1)), Ok(&'@'));
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut grid: Grid<bool> = Grid::new(3, 2).expect("grid");
        let outside = CellCoord::new(3, 0);
        let expected = LifeError::OutOfBounds {
            cell: outside,
            size: grid.size(),
        };

        assert_eq!(grid.get(outside), Err(expected.clone()));
        assert_eq!(grid.set(outside, true), Err(expected));
        assert!(grid.get(CellCoord::new(0, 2)).is_err());
        assert!(grid.iter().all(|(_, value)| !*value));
    }

    #[test]
    fn find_scans_row_major() {
        let grid = Grid::from_fn(size(3, 3), |cell| cell.column() == 2 || cell.row() == 2);
        assert_eq!(grid.find(|value| *value), Some(CellCoord::new(2, 0)));
        assert_eq!(grid.position_of(&false), Some(CellCoord::new(0, 0)));
        assert_eq!(grid.find(|_| false), None);
    }

    #[test]
    fn clones_are_independent() {
        let mut original: Grid<u8> = Grid::new(2, 2).expect("grid");
        let mut copy = original.clone();

        let _ = copy.set(CellCoord::new(0, 0), 9).expect("in range");
        assert_eq!(original.get(CellCoord::new(0, 0)), Ok(&0));

        let _ = original.set(CellCoord::new(1, 1), 4).expect("in range");
        assert_eq!(copy.get(CellCoord::new(1, 1)), Ok(&0));
    }

    #[test]
    fn map_preserves_dimensions() {
        let grid = Grid::from_fn(size(4, 2), |cell| cell.row());
        let doubled = grid.map(|_, value| value * 2);
        assert_eq!(doubled.size(), grid.size());
        assert_eq!(doubled.get(CellCoord::new(3, 1)), Ok(&2));
        assert_eq!(grid.coords().count(), 8);
    }
}
