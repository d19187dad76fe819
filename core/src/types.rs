/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
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

/// Iterates over the cells touching `center`, scanning the window clamped to the board bounds.
///
/// Rows are visited top to bottom and columns left to right, the center itself is skipped.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    x_range: (Coord, Coord),
    y_end: Coord,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (x, y) = center;
        let (width, height) = bounds;

        if width == 0 || height == 0 || x >= width || y >= height {
            return Self {
                center,
                x_range: (0, 0),
                y_end: 0,
                next: None,
            };
        }

        let x_start = x.saturating_sub(1);
        let x_end = x.saturating_add(1).min(width - 1);
        let y_start = y.saturating_sub(1);
        let y_end = y.saturating_add(1).min(height - 1);

        Self {
            center,
            x_range: (x_start, x_end),
            y_end,
            next: Some((x_start, y_start)),
        }
    }

    fn advance(&mut self, (x, y): Coord2) {
        let (x_start, x_end) = self.x_range;
        self.next = if x < x_end {
            Some((x + 1, y))
        } else if y < self.y_end {
            Some((x_start, y + 1))
        } else {
            None
        };
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.advance(current);

            if current != self.center {
                return Some(current);
            }
        }
    }
}
