//! Stencil is a small engine for relaxing the 2D heat equation on a fixed
//! rectangular grid with an explicit five-point (Jacobi) update, until the
//! field stops changing or a step budget runs out. Successive fields are kept
//! in a ring of N buffers, so a step always reads one buffer and writes a
//! different one; that separation is what lets the rows of a step be updated
//! by many threads at once without any locking. The parallel-for used by a
//! step is a trait, [`parallel::ParallelFor`], with a serial reference
//! executor, a Rayon executor, and a core-pinned fork-join pool.

pub mod driver;
pub mod error;
pub mod grid;
pub mod index_space;
pub mod init;
pub mod parallel;
pub mod report;
pub mod snapshot;
pub mod stencil;
pub mod thread_pool;
