use clap::{Parser, Subcommand};
use cubelab_kernel::{BoxGeometry, BoxParams, GeometryGroup, ManualTime};
use cubelab_render::DebugTextRenderer;
use cubelab_runtime::{Demo, DemoConfig, FrameStatus};
use serde::Serialize;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubelab-cli", about = "Headless driver for the cube demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the frame loop on a simulated clock and print each frame
    Run {
        /// Number of frames to run
        #[arg(short, long, default_value = "10")]
        frames: u64,
        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: f64,
        /// Turn the rotation gate on before the first frame
        #[arg(long)]
        rotate: bool,
        /// Invoke spin before the given frame (repeatable)
        #[arg(long = "spin-at")]
        spin_at: Vec<u64>,
        /// Print only every K-th frame
        #[arg(long, default_value = "1")]
        every: u64,
    },
    /// Print statistics of a generated box geometry as JSON
    Geometry {
        #[arg(long, default_value = "1")]
        width: f32,
        #[arg(long, default_value = "1")]
        height: f32,
        #[arg(long, default_value = "1")]
        depth: f32,
        /// Segment count applied to all three axes
        #[arg(long, default_value = "1")]
        segments: u32,
    },
    /// Print the effective configuration as JSON
    Config,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeometryStats {
    id: String,
    params: BoxParams,
    vertices: usize,
    triangles: usize,
    wireframe_lines: usize,
    groups: Vec<GeometryGroup>,
}

fn geometry_stats(
    width: f32,
    height: f32,
    depth: f32,
    segments: u32,
) -> anyhow::Result<GeometryStats> {
    anyhow::ensure!(segments >= 1, "--segments must be at least 1");
    for (name, value) in [("width", width), ("height", height), ("depth", depth)] {
        anyhow::ensure!(
            value.is_finite() && value > 0.0,
            "--{name} must be a positive number"
        );
    }

    let geometry = BoxGeometry::new(BoxParams {
        width,
        height,
        depth,
        width_segments: segments,
        height_segments: segments,
        depth_segments: segments,
    });
    Ok(GeometryStats {
        id: geometry.id().short(),
        params: geometry.params(),
        vertices: geometry.vertices().len(),
        triangles: geometry.triangle_count(),
        wireframe_lines: geometry.wireframe_indices().len() / 2,
        groups: geometry.groups().to_vec(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    match cli.command {
        Commands::Run {
            frames,
            fps,
            rotate,
            spin_at,
            every,
        } => {
            anyhow::ensure!(fps.is_finite() && fps > 0.0, "--fps must be positive");
            anyhow::ensure!(every > 0, "--every must be at least 1");

            let time = Rc::new(ManualTime::new());
            let mut demo = Demo::new(&config, time.clone(), 1.0);
            let mut renderer = DebugTextRenderer::new();
            let frame_time = Duration::from_secs_f64(1.0 / fps);

            if rotate {
                demo.toggle_rotation();
            }
            for frame in 0..frames {
                if spin_at.contains(&frame) {
                    tracing::info!("spin at frame {frame}");
                    demo.spin();
                }
                match demo.tick(&mut renderer) {
                    FrameStatus::Continue(text) if frame % every == 0 => print!("{text}"),
                    FrameStatus::Continue(_) => {}
                    FrameStatus::Stopped => break,
                }
                time.advance(frame_time);
            }
            tracing::info!("ran {} frames", demo.frames().frames());
            demo.shutdown();
        }
        Commands::Geometry {
            width,
            height,
            depth,
            segments,
        } => {
            let stats = geometry_stats(width, height, depth, segments)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Config => {
            println!("{}", config.to_json()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_segments_are_rejected() {
        let err = geometry_stats(1.0, 1.0, 1.0, 0).unwrap_err();
        assert!(err.to_string().contains("--segments"));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert!(geometry_stats(0.0, 1.0, 1.0, 1).is_err());
        assert!(geometry_stats(1.0, -2.0, 1.0, 1).is_err());
        assert!(geometry_stats(1.0, 1.0, f32::NAN, 1).is_err());
    }

    #[test]
    fn reported_params_match_the_counts() {
        let stats = geometry_stats(1.0, 1.0, 1.0, 2).unwrap();
        assert_eq!(stats.params.width_segments, 2);
        assert_eq!(stats.vertices, 6 * 3 * 3);
        assert_eq!(stats.triangles, 6 * 2 * 2 * 2);
        assert_eq!(stats.groups.len(), 6);
    }
}
