use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use stencil::error::Error;
use stencil::driver::{Params, Simulation, DEFAULT_MAX_STEPS, DEFAULT_NUM_BUFFERS};
use stencil::index_space::range2d_inclusive;
use stencil::parallel::{ParallelFor, RayonPool, Serial};
use stencil::report::{display_window, Report};
use stencil::snapshot::Snapshot;
use stencil::stencil::{DEFAULT_ALPHA, DEFAULT_EPSILON};
use stencil::thread_pool::ThreadPool;

#[derive(Clone, Copy, Debug)]
enum Backend {
    Serial,
    Rayon,
    Pool,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial" => Ok(Backend::Serial),
            "rayon" => Ok(Backend::Rayon),
            "pool" => Ok(Backend::Pool),
            _ => Err(format!("unknown backend '{}' (expected serial, rayon or pool)", s)),
        }
    }
}

#[derive(Debug, Parser)]
#[clap(version, about = "Relax the 2D heat equation on a width x height grid")]
struct Opts {
    /// Number of grid columns
    width: Option<usize>,

    /// Number of grid rows
    height: Option<usize>,

    /// Worker threads for the step (defaults to the number of cores)
    num_threads: Option<usize>,

    #[clap(short = 'b', long, default_value = "rayon")]
    backend: Backend,

    #[clap(long, default_value_t = DEFAULT_NUM_BUFFERS)]
    buffers: usize,

    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    #[clap(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    #[clap(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Print the whole final buffer
    #[clap(long)]
    display: bool,

    /// Print the final buffer inside an inclusive window (repeatable)
    #[clap(long, number_of_values = 4, value_names = &["X0", "X1", "Y0", "Y1"])]
    window: Option<Vec<usize>>,

    /// Write the final state to this file as CBOR
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn log_level(verbose: u64) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn default_threads() -> usize {
    core_affinity::get_core_ids().map_or(1, |ids| ids.len().max(1))
}

/// Return the grid size and thread count, or `None` if no size was given.
fn resolve(opts: &Opts) -> Option<(usize, usize, usize)> {
    let width = opts.width?;
    let height = opts.height?;
    Some((width, height, opts.num_threads.unwrap_or_else(default_threads)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    SimpleLogger::new().with_level(log_level(opts.verbose)).init()?;

    let (width, height, num_threads) = match resolve(&opts) {
        Some(size) => size,
        None => {
            println!("no size was given");
            return Ok(());
        }
    };
    let params = Params {
        alpha: opts.alpha,
        epsilon: opts.epsilon,
        max_steps: opts.max_steps,
        num_buffers: opts.buffers,
    };

    println!("{} {}", width, height);

    match opts.backend {
        Backend::Serial => run(&opts, width, height, params, Serial),
        Backend::Rayon => run(&opts, width, height, params, RayonPool::new(num_threads)?),
        Backend::Pool => run(&opts, width, height, params, ThreadPool::new(num_threads)?),
    }
}

fn run<P: ParallelFor>(
    opts: &Opts,
    width: usize,
    height: usize,
    params: Params,
    pool: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = Simulation::new(width, height, params, pool)?;

    let start = Instant::now();
    let outcome = sim.run();
    let elapsed = start.elapsed();

    print!("{}", Report { width, height, steps: outcome.steps, elapsed });

    if opts.display {
        print!("{}", display_window(sim.current(), &sim.current().space())?);
    }
    for w in opts.window.iter().flat_map(|w| w.chunks_exact(4)) {
        let window = range2d_inclusive(w[0], w[1], w[2], w[3]).ok_or(Error::WindowOutOfRange)?;
        print!("{}", display_window(sim.current(), &window)?);
    }
    if let Some(path) = &opts.output {
        Snapshot::capture(&sim, outcome).write_file(path)?;
        info!("wrote final state to {}", path.display());
    }
    Ok(())
}




// ============================================================================
#[cfg(test)]
mod test {

    use clap::Parser;
    use log::LevelFilter;
    use super::{default_threads, log_level, resolve, Opts};

    fn parse(args: &[&str]) -> Opts {
        Opts::try_parse_from(args).unwrap()
    }

    #[test]
    fn missing_size_resolves_to_nothing() {
        assert_eq!(resolve(&parse(&["stencil"])), None);
        assert_eq!(resolve(&parse(&["stencil", "5"])), None);
    }

    #[test]
    fn thread_count_defaults_to_core_count() {
        assert_eq!(resolve(&parse(&["stencil", "5", "5"])), Some((5, 5, default_threads())));
        assert_eq!(resolve(&parse(&["stencil", "5", "7", "3"])), Some((5, 7, 3)));
        assert!(default_threads() >= 1);
    }

    #[test]
    fn verbose_flag_is_repeatable() {
        assert_eq!(log_level(parse(&["stencil", "5", "5", "2"]).verbose), LevelFilter::Warn);
        assert_eq!(log_level(parse(&["stencil", "5", "5", "2", "-v"]).verbose), LevelFilter::Info);
        assert_eq!(log_level(parse(&["stencil", "-vv", "5", "5"]).verbose), LevelFilter::Debug);
        assert_eq!(log_level(parse(&["stencil", "--verbose", "-v", "-v"]).verbose), LevelFilter::Debug);
    }

    #[test]
    fn window_takes_four_values_per_occurrence() {
        let opts = parse(&["stencil", "5", "5", "--window", "0", "4", "1", "2"]);
        assert_eq!(opts.window, Some(vec![0, 4, 1, 2]));
        assert!(Opts::try_parse_from(["stencil", "5", "5", "--window", "0", "4"]).is_err());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Opts::try_parse_from(["stencil", "5", "5", "--backend", "gpu"]).is_err());
        assert!(Opts::try_parse_from(["stencil", "5", "5", "-b", "pool"]).is_ok());
    }
}
