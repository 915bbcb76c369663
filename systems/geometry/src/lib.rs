#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure adjacency rules that decide which cells neighbor one another.
//!
//! Every rule answers the same question: given a cell and the grid bounds,
//! which eight surrounding slots hold a neighbor? Slots are always reported in
//! the order top-left, top, top-right, left, right, bottom-left, bottom,
//! bottom-right. A rule may leave a slot empty when the neighbor does not
//! exist under its topology.

use life_core::{CellCoord, GeometryKind, GridSize};

/// Position of a neighbor relative to the center cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeighborSlot {
    /// One column left, one row up.
    TopLeft,
    /// Same column, one row up.
    Top,
    /// One column right, one row up.
    TopRight,
    /// One column left, same row.
    Left,
    /// One column right, same row.
    Right,
    /// One column left, one row down.
    BottomLeft,
    /// Same column, one row down.
    Bottom,
    /// One column right, one row down.
    BottomRight,
}

impl NeighborSlot {
    /// All slots in reporting order.
    pub const ALL: [NeighborSlot; 8] = [
        NeighborSlot::TopLeft,
        NeighborSlot::Top,
        NeighborSlot::TopRight,
        NeighborSlot::Left,
        NeighborSlot::Right,
        NeighborSlot::BottomLeft,
        NeighborSlot::Bottom,
        NeighborSlot::BottomRight,
    ];

    /// Column and row offsets from the center cell.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::Top => (0, -1),
            Self::TopRight => (1, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::BottomLeft => (-1, 1),
            Self::Bottom => (0, 1),
            Self::BottomRight => (1, 1),
        }
    }

    const fn position(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::Top => 1,
            Self::TopRight => 2,
            Self::Left => 3,
            Self::Right => 4,
            Self::BottomLeft => 5,
            Self::Bottom => 6,
            Self::BottomRight => 7,
        }
    }
}

/// Ordered neighbor slots produced by an [`Adjacency`] rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neighbors {
    slots: [Option<CellCoord>; 8],
}

impl Neighbors {
    /// Wraps eight slots given in reporting order.
    #[must_use]
    pub const fn from_slots(slots: [Option<CellCoord>; 8]) -> Self {
        Self { slots }
    }

    /// Neighbor occupying the slot, if the rule produced one.
    #[must_use]
    pub const fn get(&self, slot: NeighborSlot) -> Option<CellCoord> {
        self.slots[slot.position()]
    }

    /// Raw slots in reporting order.
    #[must_use]
    pub const fn slots(&self) -> &[Option<CellCoord>; 8] {
        &self.slots
    }

    /// Present neighbors in reporting order, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Number of slots holding a neighbor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Reports whether every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability shared by every adjacency rule.
///
/// Implementations must be pure: the answer depends only on the arguments.
pub trait Adjacency {
    /// Computes the neighbors of `cell` on a grid of the provided size.
    fn adjacent(&self, cell: CellCoord, size: GridSize) -> Neighbors;
}

impl<A: Adjacency + ?Sized> Adjacency for &A {
    fn adjacent(&self, cell: CellCoord, size: GridSize) -> Neighbors {
        (**self).adjacent(cell, size)
    }
}

impl Adjacency for GeometryKind {
    fn adjacent(&self, cell: CellCoord, size: GridSize) -> Neighbors {
        match self {
            Self::Flat => Flat.adjacent(cell, size),
            Self::Toroidal => Toroidal.adjacent(cell, size),
        }
    }
}

/// Bounded plane; slots beyond an edge stay empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flat;

impl Adjacency for Flat {
    fn adjacent(&self, cell: CellCoord, size: GridSize) -> Neighbors {
        let mut slots = [None; 8];
        for slot in NeighborSlot::ALL {
            let (column_delta, row_delta) = slot.offset();
            let column = cell.column().checked_add_signed(column_delta);
            let row = cell.row().checked_add_signed(row_delta);
            slots[slot.position()] = match (column, row) {
                (Some(column), Some(row)) => {
                    Some(CellCoord::new(column, row)).filter(|neighbor| size.contains(*neighbor))
                }
                _ => None,
            };
        }
        Neighbors::from_slots(slots)
    }
}

/// Wraparound surface; every slot is filled.
///
/// Grids narrower or shorter than three cells report the same cell in more
/// than one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Toroidal;

impl Adjacency for Toroidal {
    fn adjacent(&self, cell: CellCoord, size: GridSize) -> Neighbors {
        let mut slots = [None; 8];
        for slot in NeighborSlot::ALL {
            let (column_delta, row_delta) = slot.offset();
            let column = wrap(cell.column(), column_delta, size.width());
            let row = wrap(cell.row(), row_delta, size.height());
            slots[slot.position()] = Some(CellCoord::new(column, row));
        }
        Neighbors::from_slots(slots)
    }
}

fn wrap(value: u32, delta: i32, extent: u32) -> u32 {
    let wrapped = (i64::from(value) + i64::from(delta)).rem_euclid(i64::from(extent));
    u32::try_from(wrapped).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> GridSize {
        GridSize::new(width, height).expect("valid size")
    }

    #[test]
    fn flat_interior_cell_has_eight_neighbors_in_order() {
        let neighbors = Flat.adjacent(CellCoord::new(1, 1), size(3, 3));
        let cells: Vec<_> = neighbors.iter().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(0, 1),
                CellCoord::new(2, 1),
                CellCoord::new(0, 2),
                CellCoord::new(1, 2),
                CellCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn flat_corner_omits_out_of_bounds_slots() {
        let neighbors = Flat.adjacent(CellCoord::new(0, 0), size(3, 3));
        assert_eq!(neighbors.len(), 3);
        assert_eq!(neighbors.get(NeighborSlot::TopLeft), None);
        assert_eq!(neighbors.get(NeighborSlot::Top), None);
        assert_eq!(neighbors.get(NeighborSlot::Left), None);
        assert_eq!(neighbors.get(NeighborSlot::Right), Some(CellCoord::new(1, 0)));
        assert_eq!(neighbors.get(NeighborSlot::Bottom), Some(CellCoord::new(0, 1)));
        assert_eq!(
            neighbors.get(NeighborSlot::BottomRight),
            Some(CellCoord::new(1, 1))
        );

        let far = Flat.adjacent(CellCoord::new(3, 1), size(4, 2));
        assert_eq!(far.get(NeighborSlot::Right), None);
        assert_eq!(far.get(NeighborSlot::Bottom), None);
        assert_eq!(far.get(NeighborSlot::TopLeft), Some(CellCoord::new(2, 0)));
    }

    #[test]
    fn toroidal_corner_wraps_to_opposite_edges() {
        let neighbors = Toroidal.adjacent(CellCoord::new(0, 0), size(5, 4));
        assert_eq!(neighbors.len(), 8);
        assert_eq!(
            neighbors.get(NeighborSlot::TopLeft),
            Some(CellCoord::new(4, 3))
        );
        assert_eq!(neighbors.get(NeighborSlot::Top), Some(CellCoord::new(0, 3)));
        assert_eq!(neighbors.get(NeighborSlot::Left), Some(CellCoord::new(4, 0)));
        assert_eq!(
            neighbors.get(NeighborSlot::BottomRight),
            Some(CellCoord::new(1, 1))
        );
    }

    #[test]
    fn toroidal_small_grids_repeat_cells() {
        let neighbors = Toroidal.adjacent(CellCoord::new(0, 0), size(1, 1));
        assert!(neighbors.iter().all(|cell| cell == CellCoord::new(0, 0)));
        assert_eq!(neighbors.len(), 8);
    }

    #[test]
    fn geometry_kind_dispatches_to_rule() {
        let cell = CellCoord::new(0, 2);
        let bounds = size(3, 3);
        assert_eq!(
            GeometryKind::Flat.adjacent(cell, bounds),
            Flat.adjacent(cell, bounds)
        );
        assert_eq!(
            GeometryKind::Toroidal.adjacent(cell, bounds),
            Toroidal.adjacent(cell, bounds)
        );
    }

    #[test]
    fn rules_are_usable_as_trait_objects() {
        let rules: [&dyn Adjacency; 2] = [&Flat, &Toroidal];
        let counts: Vec<_> = rules
            .iter()
            .map(|rule| rule.adjacent(CellCoord::new(0, 0), size(4, 4)).len())
            .collect();
        assert_eq!(counts, vec![3, 8]);
    }
}
