use core::ops::Range;




#[derive(Clone, Debug, PartialEq, Eq)]


/**
 * Represents a rectangular region in a discrete 2D index space. The first
 * axis is `x` (columns) and the second is `y` (rows). Unlike a grid, an index
 * space may be empty: the interior of a grid that is only two cells wide has
 * no points.
 */
pub struct IndexSpace {
    dx: Range<usize>,
    dy: Range<usize>,
}




// ============================================================================
impl IndexSpace {


    pub fn new(dx: Range<usize>, dy: Range<usize>) -> Self {
        Self { dx, dy }
    }


    /**
     * Return the number of indexes on each axis.
     */
    pub fn dim(&self) -> (usize, usize) {
        (self.dx.len(), self.dy.len())
    }


    /**
     * Return the number of elements in this index space.
     */
    pub fn len(&self) -> usize {
        let (l, m) = self.dim();
        l * m
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /**
     * Return the minimum index (inclusive).
     */
    pub fn start(&self) -> (usize, usize) {
        (self.dx.start, self.dy.start)
    }


    /**
     * Return the maximum index (exclusive).
     */
    pub fn end(&self) -> (usize, usize) {
        (self.dx.end, self.dy.end)
    }


    /**
     * Return the range of row indexes (the `y` axis).
     */
    pub fn rows(&self) -> Range<usize> {
        self.dy.clone()
    }


    /**
     * Return the range of column indexes (the `x` axis).
     */
    pub fn columns(&self) -> Range<usize> {
        self.dx.clone()
    }


    /**
     * Determine whether this index space contains the given index.
     */
    pub fn contains(&self, index: (usize, usize)) -> bool {
        self.dx.contains(&index.0) && self.dy.contains(&index.1)
    }


    /**
     * Determine whether another index space is a subset of this one. An
     * empty space is a subset of everything.
     */
    pub fn contains_space(&self, other: &Self) -> bool {
        other.is_empty() || (
            other.dx.start >= self.dx.start && other.dx.end <= self.dx.end &&
            other.dy.start >= self.dy.start && other.dy.end <= self.dy.end)
    }


    /**
     * Trim this index space by the given number of elements on each side.
     * Trimming more than the space holds yields an empty space rather than
     * a negative one.
     */
    pub fn trim_all(&self, delta: usize) -> Self {
        let trim = |r: &Range<usize>| {
            let start = r.start + delta;
            let end = r.end.saturating_sub(delta).max(start);
            start..end
        };
        Self::new(trim(&self.dx), trim(&self.dy))
    }


    /**
     * Return the linear offset for the given index, in a row-major memory
     * buffer aligned with the start of this index space. Rows are `y`, so
     * `x` increases fastest.
     */
    pub fn row_major_offset(&self, index: (usize, usize)) -> usize {
        let x = index.0 - self.dx.start;
        let y = index.1 - self.dy.start;
        y * self.dx.len() + x
    }


    /**
     * Return an iterator which traverses the index space in row-major order
     * (left to right, then top to bottom).
     */
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.dy.clone().flat_map(move |y| self.dx.clone().map(move |x| (x, y)))
    }
}




// ============================================================================
impl From<(Range<usize>, Range<usize>)> for IndexSpace {
    fn from(range: (Range<usize>, Range<usize>)) -> Self {
        Self { dx: range.0, dy: range.1 }
    }
}

impl From<IndexSpace> for (Range<usize>, Range<usize>) {
    fn from(space: IndexSpace) -> Self {
        (space.dx, space.dy)
    }
}




/**
 * Less imposing factory function to construct an IndexSpace object from
 * inclusive bounds, the way display windows are written on the command line.
 * Returns `None` if an upper bound is the largest representable index.
 */
pub fn range2d_inclusive(x0: usize, x1: usize, y0: usize, y1: usize) -> Option<IndexSpace> {
    Some(IndexSpace::new(x0..x1.checked_add(1)?, y0..y1.checked_add(1)?))
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{range2d_inclusive, IndexSpace};

    #[test]
    fn trimming_a_thin_space_gives_an_empty_one() {
        let space = IndexSpace::new(0..2, 0..10);
        let interior = space.trim_all(1);
        assert!(interior.is_empty());
        assert_eq!(interior.iter().count(), 0);
    }

    #[test]
    fn interior_of_5x5_has_9_points() {
        let interior = IndexSpace::new(0..5, 0..5).trim_all(1);
        assert_eq!(interior.dim(), (3, 3));
        assert_eq!(interior.start(), (1, 1));
        assert_eq!(interior.end(), (4, 4));
    }

    #[test]
    fn iteration_is_row_major() {
        let space = IndexSpace::new(0..3, 0..2);
        let indexes: Vec<_> = space.iter().collect();
        assert_eq!(indexes, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        for (n, index) in space.iter().enumerate() {
            assert_eq!(space.row_major_offset(index), n);
        }
    }

    #[test]
    fn inclusive_window_containment() {
        let grid = IndexSpace::new(0..5, 0..4);
        assert!(grid.contains_space(&range2d_inclusive(0, 4, 0, 3).unwrap()));
        assert!(!grid.contains_space(&range2d_inclusive(0, 5, 0, 3).unwrap()));
        assert!(grid.contains((4, 3)));
        assert!(!grid.contains((5, 0)));
    }

    #[test]
    fn inclusive_window_at_the_index_limit_is_none() {
        assert!(range2d_inclusive(0, usize::MAX, 0, 0).is_none());
        assert!(range2d_inclusive(0, 0, 0, usize::MAX).is_none());
        assert_eq!(range2d_inclusive(2, 2, 3, 3).unwrap().len(), 1);
    }
}
