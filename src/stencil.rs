use crate::grid::Grid;
use crate::parallel::ParallelFor;

/// Conduction coefficient of the five-point update.
pub const DEFAULT_ALPHA: f64 = 0.02;

/// Largest point-wise change between successive fields that still counts as
/// converged.
pub const DEFAULT_EPSILON: f64 = 0.0001;




/**
 * Compute one relaxation step from `src` into `dst`. Each interior point of
 * `dst` becomes a weighted average of the same point in `src` and its four
 * neighbors:
 *
 * ```text
 * dst[x,y] = a src[x-1,y] + a src[x+1,y] + a src[x,y-1] + a src[x,y+1] + (1 - 4a) src[x,y]
 * ```
 *
 * The terms are summed in that order regardless of how the rows are
 * scheduled, so every executor yields bit-identical fields. Boundary points
 * of `dst` are never written, and `src` is only read; since no point ever
 * observes another point's new value, rows are independent work units.
 */
pub fn step<P: ParallelFor>(pool: &P, src: &Grid, dst: &mut Grid, alpha: f64) {
    assert_eq!(
        (src.width(), src.height()),
        (dst.width(), dst.height()),
        "source and destination grids must have the same shape");

    let interior = src.interior();

    if interior.is_empty() {
        return;
    }
    let w = src.width();
    let rows = interior.rows();
    let cols = interior.columns();
    let s = src.data();
    let keep = 1.0 - 4.0 * alpha;

    // Hand out only the interior rows, so the top and bottom rows of dst are
    // not even borrowed.
    let band = &mut dst.data_mut()[rows.start * w..rows.end * w];

    pool.for_each_row(band, w, |r, row| {
        let y = rows.start + r;

        for x in cols.clone() {
            let i = y * w + x;
            row[x] =
                alpha * s[i - 1] +
                alpha * s[i + 1] +
                alpha * s[i - w] +
                alpha * s[i + w] +
                keep * s[i];
        }
    });
}




/**
 * Return whether no interior point differs between `prev` and `curr` by more
 * than `epsilon`. A grid without interior points is trivially converged.
 */
pub fn converged<P: ParallelFor>(pool: &P, prev: &Grid, curr: &Grid, epsilon: f64) -> bool {
    let interior = curr.interior();
    let cols = interior.columns();

    pool.all(interior.rows(), |y| {
        let a = &prev.row(y)[cols.clone()];
        let b = &curr.row(y)[cols.clone()];
        a.iter().zip(b).all(|(p, c)| (p - c).abs() <= epsilon)
    })
}
