use crate::error::Error;
use crate::index_space::IndexSpace;




#[derive(Clone, Debug, PartialEq)]


/**
 * A scalar field over a `width x height` rectangle, backed by one contiguous
 * row-major buffer. Index `(x, y)` lives at offset `y * width + x`.
 */
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}




// ============================================================================
impl Grid {

    /**
     * Allocate a zero-filled grid. Both dimensions must be non-zero.
     */
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(Error::GridTooLarge { width, height })?;

        Ok(Self { width, height, data: vec![0.0; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /**
     * Return the index space covering every point of the grid.
     */
    pub fn space(&self) -> IndexSpace {
        IndexSpace::new(0..self.width, 0..self.height)
    }

    /**
     * Return the index space of the interior points: everything except the
     * outermost ring of cells. It is empty when either dimension is below 3.
     */
    pub fn interior(&self) -> IndexSpace {
        self.space().trim_all(1)
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.offset(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let i = self.offset(x, y);
        self.data[i] = value;
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value)
    }

    /**
     * Return row `y` as a slice of `width` values.
     */
    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "index ({} {}) out of range", x, y);
        y * self.width + x
    }
}




/**
 * A fixed ring of same-shaped grids, with one of them marked as current (the
 * most recently computed field). The buffer just before it in the ring holds
 * the prior field. Buffers are allocated once and never resized.
 */
pub struct BufferRing {
    buffers: Vec<Grid>,
    current: usize,
}




// ============================================================================
impl BufferRing {

    pub fn new(width: usize, height: usize, num_buffers: usize) -> Result<Self, Error> {
        if num_buffers < 2 {
            return Err(Error::TooFewBuffers(num_buffers));
        }
        let buffers = (0..num_buffers)
            .map(|_| Grid::new(width, height))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { buffers, current: 0 })
    }

    /// Return the number of buffers in the ring; never less than 2.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn width(&self) -> usize {
        self.buffers[0].width()
    }

    pub fn height(&self) -> usize {
        self.buffers[0].height()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn previous_index(&self) -> usize {
        (self.current + self.len() - 1) % self.len()
    }

    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.len()
    }

    pub fn current(&self) -> &Grid {
        &self.buffers[self.current]
    }

    pub fn previous(&self) -> &Grid {
        &self.buffers[self.previous_index()]
    }

    pub fn buffer(&self, b: usize) -> &Grid {
        &self.buffers[b]
    }

    pub fn buffer_mut(&mut self, b: usize) -> &mut Grid {
        &mut self.buffers[b]
    }

    pub fn buffers_mut(&mut self) -> impl Iterator<Item = &mut Grid> {
        self.buffers.iter_mut()
    }

    pub fn get(&self, b: usize, x: usize, y: usize) -> f64 {
        self.buffers[b].get(x, y)
    }

    pub fn set(&mut self, b: usize, x: usize, y: usize, value: f64) {
        self.buffers[b].set(x, y, value)
    }

    /**
     * Make the next buffer in the ring the current one.
     */
    pub fn advance(&mut self) {
        self.current = self.next_index();
    }

    pub(crate) fn reset(&mut self) {
        self.current = 0;
    }

    /**
     * Borrow buffer `src` for reading and buffer `dst` for writing at the
     * same time. The two indexes must differ.
     */
    pub fn split(&mut self, src: usize, dst: usize) -> (&Grid, &mut Grid) {
        assert!(src != dst, "source and destination buffers must be distinct");

        if src < dst {
            let (lower, upper) = self.buffers.split_at_mut(dst);
            (&lower[src], &mut upper[0])
        } else {
            let (lower, upper) = self.buffers.split_at_mut(src);
            (&upper[0], &mut lower[dst])
        }
    }
}
