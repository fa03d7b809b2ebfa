use crate::grid::{BufferRing, Grid};




/**
 * Fill a grid with the ramp initial condition: zero everywhere, then the
 * top and bottom rows, then the left and right columns. The column rules run
 * last, so they decide the value at the four corners.
 */
pub fn ramp(grid: &mut Grid) {
    let (w, h) = (grid.width(), grid.height());

    grid.fill(0.0);

    for x in 0..w {
        grid.set(x, 0, x as f64);
        grid.set(x, h - 1, (w - x) as f64);
    }
    for y in 0..h {
        grid.set(0, y, y as f64);
        grid.set(w - 1, y, (h - y) as f64);
    }
}




/**
 * Apply the ramp to every buffer in the ring and make buffer 0 current.
 * All buffers start out identical, so the first convergence comparison is
 * well defined whichever buffer it reads as the previous one.
 */
pub fn initialize(ring: &mut BufferRing) {
    for grid in ring.buffers_mut() {
        ramp(grid);
    }
    ring.reset();
}
