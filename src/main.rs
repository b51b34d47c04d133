//! Headless cloth runner: simulates a fixed number of frames and logs
//! per-frame statistics instead of drawing.

use std::path::{Path, PathBuf};

use clap::Parser;
use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};

use drape::{ClothConfig, Degeneracy, Frame, Renderer, Simulation, StepObserver};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Optional YAML file with `ClothConfig` fields; missing fields use defaults.
    #[arg(short('c'), long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(short('f'), long, default_value_t = 600)]
    frames: usize,

    /// Override the grid resolution.
    #[arg(short('n'), long)]
    resolution: Option<usize>,

    /// The random seed for the reset jitter.
    #[arg(short('s'), long)]
    seed: Option<u64>,

    /// Run substeps on the rayon thread pool.
    #[arg(short('p'), long)]
    parallel: bool,

    /// Log statistics every this many frames.
    #[arg(long, default_value_t = 60)]
    log_every: usize,

    /// The name of the log-file to use.
    #[arg(short('l'), long, default_value = "drape.log")]
    log_name: String,
}

/// Configures the logger.
///
/// # Errors
///
/// - If a logs directory could not be located/created.
/// - If the logger could not be initialized.
fn configure_logger(file_name: &str) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(file_name);

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let guard = ftlog::Builder::new()
        .max_log_level(LevelFilter::Info)
        .root(writer)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}

fn load_config(path: Option<&Path>) -> Result<ClothConfig<f32>, String> {
    let Some(path) = path else {
        return Ok(ClothConfig::new());
    };
    let file = std::fs::File::open(path).map_err(|e| format!("{path:?}: {e}"))?;
    serde_yaml::from_reader(std::io::BufReader::new(file)).map_err(|e| format!("{path:?}: {e}"))
}

/// Counts skipped updates over the whole run.
#[derive(Default)]
struct DegeneracyCounter {
    springs: usize,
    collisions: usize,
}

impl StepObserver<f32> for DegeneracyCounter {
    fn on_degeneracy(&mut self, degeneracy: Degeneracy) {
        match degeneracy {
            Degeneracy::Spring { .. } => self.springs += 1,
            Degeneracy::CollisionNormal { .. } => self.collisions += 1,
        }
    }
}

/// Stands in for a window: accepts a fixed number of frames and logs a
/// summary of the vertex buffer every `log_every` frames.
struct StatsRenderer {
    frames: usize,
    presented: usize,
    log_every: usize,
}

impl Renderer<f32> for StatsRenderer {
    fn is_running(&self) -> bool {
        self.presented < self.frames
    }

    fn present(&mut self, frame: &Frame<'_, f32>) {
        self.presented += 1;
        if self.log_every == 0 || self.presented % self.log_every != 0 {
            return;
        }

        let lowest = frame.vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
        let touching = frame
            .vertices
            .iter()
            .filter(|v| (**v - frame.sphere.center).length() <= frame.sphere.radius * 1.001)
            .count();
        ftlog::info!(
            "Frame {}: t = {:.3}, lowest y = {:.4}, {} of {} nodes on the sphere",
            self.presented,
            frame.elapsed,
            lowest,
            touching,
            frame.vertices.len(),
        );
    }
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = configure_logger(&args.log_name)?;
    ftlog::info!("Log file: {log_path:?}");

    let mut config = load_config(args.config.as_deref())?;
    if let Some(n) = args.resolution {
        config.resolution = n;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.parallel |= args.parallel;
    ftlog::info!("Config: {config:?}");

    let mut sim = Simulation::new(config).map_err(|e| e.to_string())?;
    let mut renderer = StatsRenderer { frames: args.frames, presented: 0, log_every: args.log_every };
    let mut counter = DegeneracyCounter::default();

    let frames = sim.run(&mut renderer, &mut counter);

    ftlog::info!(
        "Simulated {} frames with {} resets; skipped {} spring and {} collision updates",
        frames,
        sim.reset_count(),
        counter.springs,
        counter.collisions,
    );

    Ok(())
}
