use ndarray::Array2;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Grid size of a 2D array, saturating at [`Coord::MAX`] per axis.
pub fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (x, y) = grid.dim();
    (
        Coord::try_from(x).unwrap_or(Coord::MAX),
        Coord::try_from(y).unwrap_or(Coord::MAX),
    )
}

/// Offsets of the eight surrounding cells, top row first.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// In-bounds cells around `center`: eight inside the grid, five on an edge, three in a corner.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    offset: usize,
}

impl Neighbors {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offset: 0,
        }
    }

    fn shift(&self, (dx, dy): (i8, i8)) -> Option<Coord2> {
        let x = self.center.0.checked_add_signed(dx)?;
        let y = self.center.1.checked_add_signed(dy)?;
        (x < self.bounds.0 && y < self.bounds.1).then_some((x, y))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(self.offset) {
            self.offset += 1;
            if let Some(coords) = self.shift(delta) {
                return Some(coords);
            }
        }
        None
    }
}

pub trait NeighborsExt {
    fn neighbors(&self, coords: Coord2) -> Neighbors;
}

impl<T> NeighborsExt for Array2<T> {
    fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, grid_size(self))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<Coord2> = Neighbors::new((0, 0), (10, 10)).collect();
        let expected: [Coord2; 3] = [(1, 0), (0, 1), (1, 1)];
        assert_eq!(neighbors, expected);

        assert_eq!(Neighbors::new((9, 9), (10, 10)).count(), 3);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(Neighbors::new((0, 5), (10, 10)).count(), 5);
        assert_eq!(Neighbors::new((4, 9), (10, 10)).count(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors_excluding_itself() {
        let neighbors: Vec<_> = Neighbors::new((5, 5), (10, 10)).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(5, 5)));
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(Neighbors::new((0, 0), (1, 1)).count(), 0);
    }
}
