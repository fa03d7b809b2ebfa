use core::ops::Range;
use log::info;
use rayon::prelude::*;
use crate::error::Error;




/**
 * A fork-join parallel-for primitive. Implementations decide how work is
 * partitioned across threads, but every call returns only after all of its
 * work has completed, so the caller may read what was written as soon as the
 * call returns. Work units never share a destination, so no locking is
 * required: each unit receives its own `&mut` slice, and everything it reads
 * is borrowed immutably for the duration of the call.
 */
pub trait ParallelFor {

    /// Return the number of worker threads used by this executor.
    fn num_threads(&self) -> usize;

    /// Split `rows` into consecutive chunks of `row_len` values and invoke
    /// `f(r, row)` on each, where `r` is the index of the chunk. Chunks may
    /// be processed concurrently and in any order.
    fn for_each_row<F>(&self, rows: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync;

    /// Return whether `pred` holds for every index in `range`. The predicate
    /// may be evaluated concurrently, and evaluation may stop at the first
    /// index where it fails.
    fn all<F>(&self, range: Range<usize>, pred: F) -> bool
    where
        F: Fn(usize) -> bool + Sync;
}




/**
 * Runs everything on the calling thread. This is the reference executor that
 * the parallel ones are compared against.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct Serial;

impl ParallelFor for Serial {

    fn num_threads(&self) -> usize {
        1
    }

    fn for_each_row<F>(&self, rows: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync
    {
        rows.chunks_mut(row_len).enumerate().for_each(|(r, row)| f(r, row))
    }

    fn all<F>(&self, range: Range<usize>, pred: F) -> bool
    where
        F: Fn(usize) -> bool + Sync
    {
        range.into_iter().all(pred)
    }
}




/**
 * A dedicated Rayon thread pool of fixed size. Rows are handed to the pool
 * through a parallel iterator, so the partitioning is Rayon's work-stealing
 * split of the row range.
 */
pub struct RayonPool {
    pool: rayon::ThreadPool,
}

impl RayonPool {
    pub fn new(num_threads: usize) -> Result<Self, Error> {
        if num_threads == 0 {
            return Err(Error::NoThreads);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("stencil-rayon-{}", i))
            .build()?;

        info!("rayon pool started with {} threads", pool.current_num_threads());
        Ok(Self { pool })
    }
}

impl ParallelFor for RayonPool {

    fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn for_each_row<F>(&self, rows: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync
    {
        self.pool.install(|| {
            rows.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| f(r, row))
        })
    }

    fn all<F>(&self, range: Range<usize>, pred: F) -> bool
    where
        F: Fn(usize) -> bool + Sync
    {
        self.pool.install(|| range.into_par_iter().all(|i| pred(i)))
    }
}
