use anyhow::Context as _;
use blueblood_common::{AnimationStrategy, NUM_POINTS, SceneConfig};
use blueblood_kernel::{Scene, SceneEvent};
use blueblood_render::{DebugTextRenderer, RenderView, Renderer};
use blueblood_shapes::{ShapeKind, verify_points};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blueblood-cli", about = "Headless tool for the glyph formation scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, shape order and default timings
    Info,
    /// Print the target points of one shape
    Points {
        /// cube, sphere, pyramid or torus
        #[arg(short, long)]
        shape: ShapeKind,
        /// Emit JSON instead of one point per line
        #[arg(long)]
        json: bool,
        /// Seed for the pyramid sampler
        #[arg(long, default_value = "42")]
        seed: u64,
    },
    /// Generate every shape and check it against its surface
    Verify {
        /// Seed for the pyramid sampler
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Pyramid samples to check
        #[arg(long, default_value = "100")]
        rounds: usize,
    },
    /// Run the scene headless at a fixed frame rate
    Simulate {
        /// Simulated wall-clock duration
        #[arg(long, default_value = "12")]
        seconds: f32,
        /// Frames per simulated second
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Animation strategy: lerp or spring
        #[arg(long)]
        strategy: Option<AnimationStrategy>,
        /// Scene configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print every glyph in the final frame
        #[arg(long)]
        glyphs: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = SceneConfig::default();
            println!("blueblood-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("glyphs: {NUM_POINTS}");
            let order: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.name()).collect();
            println!("shapes: {}", order.join(" -> "));
            println!("interval: {}ms", config.shape_interval_ms);
            println!(
                "strategy: {} (lerp factor {}, spring k={} c={})",
                config.strategy, config.lerp_factor, config.spring.stiffness, config.spring.damping
            );
            println!("render: {}", blueblood_render::crate_info());
        }
        Commands::Points { shape, json, seed } => {
            let mut rng = Pcg64::seed_from_u64(seed);
            let points = shape.generate(&mut rng);
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                println!("{shape}: {} points", points.len());
                for (i, p) in points.iter().enumerate() {
                    println!("{i:3} {:9.4} {:9.4} {:9.4}", p.x, p.y, p.z);
                }
            }
        }
        Commands::Verify { seed, rounds } => {
            let mut rng = Pcg64::seed_from_u64(seed);
            for kind in ShapeKind::ALL {
                let runs = if kind.is_deterministic() { 1 } else { rounds.max(1) };
                for _ in 0..runs {
                    let points = kind.generate(&mut rng);
                    verify_points(kind, &points).with_context(|| format!("verifying {kind}"))?;
                }
                println!("{kind}: OK ({} points, {runs} run(s))", kind.expected_len());
            }
        }
        Commands::Simulate {
            seconds,
            fps,
            strategy,
            config,
            glyphs,
        } => {
            let mut scene_config = match config {
                Some(path) => SceneConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => SceneConfig::default(),
            };
            if let Some(strategy) = strategy {
                scene_config.strategy = strategy;
            }
            if scene_config.seed.is_none() {
                scene_config.seed = Some(42);
            }

            let fps = fps.max(1);
            let frame = Duration::from_secs(1) / fps;
            let frames = (seconds.max(0.0) * fps as f32).round() as u64;
            println!(
                "Simulating {frames} frames at {fps} fps ({} strategy)",
                scene_config.strategy
            );

            let mut scene = Scene::new(&scene_config)?;
            for _ in 0..frames {
                scene.update(frame);
                for event in scene.drain_events() {
                    if let SceneEvent::ShapeActivated {
                        firing,
                        index,
                        shape,
                        targets,
                    } = event
                    {
                        println!(
                            "  frame {:5}: firing {firing} -> {shape} [{index}] ({targets} targets)",
                            scene.frame()
                        );
                    }
                }
            }
            scene.teardown();

            let renderer = if glyphs {
                DebugTextRenderer::new()
            } else {
                DebugTextRenderer::compact()
            };
            print!("{}", renderer.render(&scene, &RenderView::default()));
        }
    }

    Ok(())
}
