use clap::Parser;
use nalgebra::{Rotation2, Vector2};
use plexus_core::core_types::{Pixels, Seconds};
use plexus_core::ui::{BackgroundFade, CursorFollower, CursorVariant, LoadProgress, TextScramble};
use plexus_core::{
    normalize_pointer, BackgroundScene, EdgeStrategy, FrameInput, ParticleDensity, SceneConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless plexus background run with a scripted scroll and pointer
#[derive(Parser, Debug)]
#[command(name = "plexus-demo")]
#[command(about = "Scroll-reactive plexus background, simulated without a renderer", long_about = None)]
struct Args {
    /// Number of frames to simulate (60 per second)
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Particle count (overrides --density and the config file)
    #[arg(short, long)]
    particles: Option<usize>,

    /// Particle density preset (low, medium, high)
    #[arg(long)]
    density: Option<String>,

    /// Edge search strategy (brute-force, grid)
    #[arg(short, long)]
    strategy: Option<EdgeStrategy>,

    /// Seed for the initial particle cloud
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Page scroll per frame in pixels
    #[arg(long, default_value_t = 2.0)]
    scroll_speed: f32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1920.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 1080.0)]
    height: f32,

    /// Velocity damping per frame (0 = undamped)
    #[arg(long)]
    damping: Option<f32>,

    /// Report interval in frames
    #[arg(short, long, default_value_t = 60)]
    report_interval: u32,

    /// JSON scene configuration to start from
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Skip the loading screen and cursor walkthrough
    #[arg(long)]
    no_chrome: bool,
}

/// Errors reported by the demo before the simulation starts
#[derive(Debug)]
enum DemoError {
    LoadFailed(String),
    ParseFailed(String),
    SerializeFailed(String),
    InvalidArgument(String),
    InvalidConfig(plexus_core::ConfigError),
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoError::LoadFailed(e) => write!(f, "Failed to read config: {e}"),
            DemoError::ParseFailed(e) => write!(f, "Failed to parse config: {e}"),
            DemoError::SerializeFailed(e) => write!(f, "Failed to serialize config: {e}"),
            DemoError::InvalidArgument(e) => write!(f, "Invalid argument: {e}"),
            DemoError::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for DemoError {}

impl From<plexus_core::ConfigError> for DemoError {
    fn from(e: plexus_core::ConfigError) -> Self {
        DemoError::InvalidConfig(e)
    }
}

fn load_config(path: &Path) -> Result<SceneConfig, DemoError> {
    let contents = fs::read_to_string(path).map_err(|e| DemoError::LoadFailed(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| DemoError::ParseFailed(e.to_string()))
}

fn parse_density(name: &str) -> Result<ParticleDensity, DemoError> {
    match name.to_lowercase().as_str() {
        "low" => Ok(ParticleDensity::Low),
        "medium" => Ok(ParticleDensity::Medium),
        "high" => Ok(ParticleDensity::High),
        other => Err(DemoError::InvalidArgument(format!(
            "unknown density '{other}' (expected low, medium or high)"
        ))),
    }
}

/// Merge the config file and command line overrides
fn build_config(args: &Args) -> Result<SceneConfig, DemoError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SceneConfig::default(),
    };

    if let Some(name) = &args.density {
        let density = parse_density(name)?;
        config.plexus.particle_count = density.particle_count();
        config.plexus.edge_strategy = density.recommended_strategy();
    }
    if let Some(n) = args.particles {
        config.plexus.particle_count = n;
    }
    if let Some(strategy) = args.strategy {
        config.plexus.edge_strategy = strategy;
    }
    if let Some(damping) = args.damping {
        config.plexus.damping = damping;
    }
    if config.seed.is_none() {
        config.seed = Some(args.seed);
    }

    config.validate()?;
    Ok(config)
}

/// Pointer position in window pixels for a frame: a slow ellipse around the
/// viewport center
fn pointer_at(frame: u32, width: f32, height: f32) -> Vector2<f32> {
    let angle = frame as f32 / 90.0;
    let orbit = Rotation2::new(angle) * Vector2::new(1.0, 0.0);
    Vector2::new(
        width * 0.5 + orbit.x * width * 0.35,
        height * 0.5 + orbit.y * height * 0.3,
    )
}

/// Fraction of a section starting `top` pixels below the viewport top that is
/// on screen
fn visible_ratio(top: f32, height: f32, viewport_height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let visible = (top + height).min(viewport_height) - top.max(0.0);
    (visible / height).max(0.0)
}

/// Loading screen with assets arriving in bursts, then a title scramble
fn run_chrome(seed: u64) {
    println!("Loading assets...");
    let mut loader = LoadProgress::default();
    let frame = Seconds::new(1.0 / 60.0);
    let mut frames = 0_u32;
    let mut last_printed = -1.0_f32;

    while !loader.is_dismissed() {
        // A new asset finishes every 20 frames
        loader.report(((frames / 20) * 12) as f32);
        loader.advance(frame);
        frames += 1;

        let shown = *loader.shown();
        if shown.floor() >= last_printed + 20.0 || (loader.is_complete() && last_printed < 100.0) {
            println!("  {:>3.0}% (frame {frames})", shown.floor());
            last_printed = shown.floor();
        }
    }
    println!("Loader dismissed after {frames} frames\n");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut title = TextScramble::new("PLEXUS BACKGROUND");
    title.start();
    while title.is_running() {
        let text = title.tick(&mut rng).to_string();
        println!("  {text}");
    }
    println!();
}

fn run(args: &Args) -> Result<(), DemoError> {
    let config = build_config(args)?;

    if args.dump_config {
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| DemoError::SerializeFailed(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    println!("=== Plexus Background Demo ===\n");
    if !args.no_chrome {
        run_chrome(args.seed);
    }

    let mut scene = BackgroundScene::new(config)?;
    let mut cursor = CursorFollower::default();
    let mut fade = BackgroundFade::default();
    // Project section two viewports down the page
    let work_top = args.height * 2.0;
    let work_height = args.height * 1.5;
    let viewport_w = Pixels::new(args.width);
    let viewport_h = Pixels::new(args.height);
    let dt = Seconds::new(1.0 / 60.0);
    let report_interval = args.report_interval.max(1);

    println!(
        "Particles: {}, strategy: {}, damping: {}, viewport: {}x{}\n",
        config.plexus.particle_count,
        config.plexus.edge_strategy,
        config.plexus.damping,
        args.width,
        args.height
    );
    println!(" Frame | Scroll(px) | Progress | Edges | Dropped | Max speed | Background | Bg alpha | Cursor");
    println!("-------|------------|----------|-------|---------|-----------|------------|----------|----------------");

    let started = Instant::now();
    let mut peak_edges = 0;
    let mut total_dropped = 0;

    for frame in 0..args.frames {
        let pointer_px = pointer_at(frame, args.width, args.height);
        let pointer_ndc = normalize_pointer(
            Pixels::new(pointer_px.x),
            Pixels::new(pointer_px.y),
            viewport_w,
            viewport_h,
        );
        let scroll = frame as f32 * args.scroll_speed;

        // Pretend the pointer crosses a link every few seconds
        let variant = if (frame / 180) % 2 == 1 {
            CursorVariant::Button
        } else {
            CursorVariant::Default
        };
        cursor.set_variant(variant);
        cursor.set_pointer(Pixels::new(pointer_px.x), Pixels::new(pointer_px.y));
        let cursor_state = cursor.update(dt);

        let input = FrameInput::new(
            frame as f32 * *dt,
            (pointer_ndc.x, pointer_ndc.y),
            scroll,
            args.width,
            args.height,
        );
        fade.observe(visible_ratio(work_top - scroll, work_height, args.height));
        fade.advance(dt);

        let out = scene.advance(&input);

        let edges = out.line_segments().len();
        peak_edges = peak_edges.max(edges);
        total_dropped += out.plexus.dropped_edges;
        let background = out.background_color;
        let progress = out.progress;

        if frame % report_interval == 0 || frame + 1 == args.frames {
            let stats = scene.stats();
            println!(
                "{:6} | {:10.1} | {:8} | {:5} | {:7} | {:9.4} | {:>10} | {:8.2} | ({:.0}, {:.0}) x{:.2}",
                stats.frame,
                scroll,
                progress,
                edges,
                stats.dropped_edges,
                stats.max_speed,
                background.to_string(),
                fade.opacity(),
                cursor_state.position.x,
                cursor_state.position.y,
                cursor_state.scale
            );
        }
    }

    let elapsed = started.elapsed();
    let stats = scene.stats();
    info!(
        "Simulated {} frames in {:.2?} ({:.1} fps)",
        args.frames,
        elapsed,
        f64::from(args.frames) / elapsed.as_secs_f64().max(1e-9)
    );

    println!("\n=== Run Complete ===");
    println!("Frames: {}", stats.frame);
    println!("Peak edges: {} of {}", peak_edges, stats.edge_capacity);
    println!("Pairs dropped over run: {total_dropped}");
    println!(
        "Final speed: max {:.4}, mean {:.4}",
        stats.max_speed, stats.mean_speed
    );

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
