use core::ops::Range;
use core::sync::atomic::{AtomicBool, Ordering};
use core_affinity::{get_core_ids, set_for_current, CoreId};
use crossbeam_channel::unbounded;
use log::{info, warn};
use std::thread;
use crate::error::Error;
use crate::parallel::ParallelFor;

/// Number of bands each worker gets on average; more bands means finer
/// dynamic load balancing at the cost of more channel traffic.
const BANDS_PER_THREAD: usize = 4;

/// A minimal fork-join pool with core affinity. Every call spawns one scoped
/// worker per configured thread, pinned to its own physical core when one is
/// available, and joins them all before returning. Work is split into bands
/// of consecutive rows which are pushed into a shared channel; idle workers
/// pull the next band, so the chunking is dynamic.
///
pub struct ThreadPool {
    cores: Vec<Option<CoreId>>,
}

impl ThreadPool {
    /// Create a pool with exactly the given number of threads. If the system
    /// reports fewer cores than requested, the excess threads run unpinned.
    ///
    pub fn new(num_threads: usize) -> Result<Self, Error> {
        if num_threads == 0 {
            return Err(Error::NoThreads);
        }
        let available = get_core_ids().unwrap_or_default();

        if available.len() < num_threads {
            warn!(
                "{} threads requested but only {} cores available for pinning",
                num_threads,
                available.len()
            );
        }
        let cores = (0..num_threads).map(|n| available.get(n).copied()).collect();
        info!("affinity pool configured with {} threads", num_threads);

        Ok(ThreadPool { cores })
    }

    fn band_len(&self, num_items: usize) -> usize {
        let num_bands = self.cores.len() * BANDS_PER_THREAD;
        num_items.div_ceil(num_bands).max(1)
    }
}

fn pin(core: Option<CoreId>) {
    if let Some(core_id) = core {
        set_for_current(core_id);
    }
}

impl ParallelFor for ThreadPool {

    fn num_threads(&self) -> usize {
        self.cores.len()
    }

    fn for_each_row<F>(&self, rows: &mut [f64], row_len: usize, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync
    {
        if rows.is_empty() || row_len == 0 {
            return;
        }
        let band_rows = self.band_len(rows.len() / row_len);
        let (sink, source) = unbounded();

        for (b, band) in rows.chunks_mut(band_rows * row_len).enumerate() {
            sink.send((b * band_rows, band)).unwrap();
        }
        drop(sink);

        let f = &f;

        thread::scope(|scope| {
            for &core in &self.cores {
                let source = source.clone();
                scope.spawn(move || {
                    pin(core);
                    for (first_row, band) in source {
                        for (r, row) in band.chunks_mut(row_len).enumerate() {
                            f(first_row + r, row)
                        }
                    }
                });
            }
        });
    }

    fn all<F>(&self, range: Range<usize>, pred: F) -> bool
    where
        F: Fn(usize) -> bool + Sync
    {
        if range.is_empty() {
            return true;
        }
        let band = self.band_len(range.len());
        let (sink, source) = unbounded();

        for start in range.clone().step_by(band) {
            sink.send(start..(start + band).min(range.end)).unwrap();
        }
        drop(sink);

        let holds = AtomicBool::new(true);
        let (holds_ref, pred) = (&holds, &pred);

        thread::scope(|scope| {
            for &core in &self.cores {
                let source = source.clone();
                scope.spawn(move || {
                    pin(core);
                    for indexes in source {
                        if !holds_ref.load(Ordering::Relaxed) {
                            break;
                        }
                        if !indexes.into_iter().all(pred) {
                            holds_ref.store(false, Ordering::Relaxed);
                        }
                    }
                });
            }
        });
        holds.into_inner()
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::ThreadPool;
    use crate::error::Error;
    use crate::parallel::{ParallelFor, Serial};

    #[test]
    fn pool_rejects_zero_threads() {
        assert!(matches!(ThreadPool::new(0), Err(Error::NoThreads)));
    }

    #[test]
    fn pool_keeps_requested_thread_count() {
        let pool = ThreadPool::new(5).unwrap();
        assert_eq!(pool.num_threads(), 5);
    }

    #[test]
    fn every_row_is_visited_with_its_own_index() {
        let pool = ThreadPool::new(3).unwrap();

        for num_rows in [0, 1, 2, 11, 64] {
            let mut expected = vec![0.0; num_rows * 5];
            let mut actual = expected.clone();
            let f = |r: usize, row: &mut [f64]| row.iter_mut().for_each(|v| *v += r as f64 + 1.0);

            Serial.for_each_row(&mut expected, 5, f);
            pool.for_each_row(&mut actual, 5, f);
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn all_finds_a_single_failure() {
        let pool = ThreadPool::new(4).unwrap();
        assert!(pool.all(0..1000, |i| i < 1000));
        assert!(!pool.all(0..1000, |i| i != 999));
        assert!(!pool.all(3..4, |_| false));
        assert!(pool.all(3..3, |_| false));
    }
}
