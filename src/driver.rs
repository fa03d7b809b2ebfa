use log::{debug, info};
use crate::error::Error;
use crate::grid::{BufferRing, Grid};
use crate::init;
use crate::parallel::ParallelFor;
use crate::stencil::{self, DEFAULT_ALPHA, DEFAULT_EPSILON};

/// Step budget of a run when none is given.
pub const DEFAULT_MAX_STEPS: usize = 10000;

/// Number of buffers in the ring when none is given.
pub const DEFAULT_NUM_BUFFERS: usize = 2;




#[derive(Clone, Copy, Debug, PartialEq)]


/**
 * Numerical parameters of a run
 */
pub struct Params {
    pub alpha: f64,
    pub epsilon: f64,
    pub max_steps: usize,
    pub num_buffers: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            epsilon: DEFAULT_EPSILON,
            max_steps: DEFAULT_MAX_STEPS,
            num_buffers: DEFAULT_NUM_BUFFERS,
        }
    }
}




#[derive(Clone, Copy, Debug, PartialEq, Eq)]


/**
 * How a run ended. Hitting the step budget without converging is a normal
 * outcome, not an error.
 */
pub struct Outcome {
    pub steps: usize,
    pub converged: bool,
}




/**
 * Owns the buffer ring and the executor, and drives the relax-then-check
 * loop. The current buffer index is only ever changed here, between parallel
 * regions, so workers never observe it mid-update.
 */
pub struct Simulation<P> {
    ring: BufferRing,
    params: Params,
    pool: P,
    steps: usize,
}




// ============================================================================
impl<P: ParallelFor> Simulation<P> {

    /**
     * Allocate the buffer ring and fill every buffer with the initial
     * condition.
     */
    pub fn new(width: usize, height: usize, params: Params, pool: P) -> Result<Self, Error> {
        let mut ring = BufferRing::new(width, height, params.num_buffers)?;
        init::initialize(&mut ring);

        info!(
            "{}x{} grid, {} buffers, {} threads",
            width,
            height,
            ring.len(),
            pool.num_threads()
        );
        Ok(Self { ring, params, pool, steps: 0 })
    }

    /**
     * Relax the current buffer into the next one in the ring, and make that
     * buffer current.
     */
    pub fn step(&mut self) {
        let (src, dst) = self.ring.split(self.ring.current_index(), self.ring.next_index());
        stencil::step(&self.pool, src, dst, self.params.alpha);
        self.ring.advance();
        self.steps += 1;
    }

    /**
     * Compare the current buffer against the one before it in the ring.
     */
    pub fn is_converged(&self) -> bool {
        stencil::converged(&self.pool, self.ring.previous(), self.ring.current(), self.params.epsilon)
    }

    pub fn run(&mut self) -> Outcome {
        self.run_with(|_, _| {})
    }

    /**
     * Step and test for convergence until the field has converged or the
     * step budget is spent. The observer is invoked after every step with
     * the number of steps taken so far, and the convergence result. Calling
     * this again resumes from the current field: a field that has already
     * converged takes no further steps.
     */
    pub fn run_with<F>(&mut self, mut observer: F) -> Outcome
    where
        F: FnMut(usize, bool)
    {
        let mut converged = self.steps > 0 && self.is_converged();

        while !converged && self.steps < self.params.max_steps {
            self.step();
            converged = self.is_converged();
            debug!("[{}] converged={}", self.steps, converged);
            observer(self.steps, converged);
        }

        if converged {
            info!("converged after {} steps", self.steps);
        } else {
            info!("step budget of {} spent without converging", self.params.max_steps);
        }
        Outcome { steps: self.steps, converged }
    }

    pub fn ring(&self) -> &BufferRing {
        &self.ring
    }

    pub fn current(&self) -> &Grid {
        self.ring.current()
    }

    pub fn width(&self) -> usize {
        self.ring.width()
    }

    pub fn height(&self) -> usize {
        self.ring.height()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Return the number of steps taken since the simulation was created.
    pub fn steps(&self) -> usize {
        self.steps
    }
}
