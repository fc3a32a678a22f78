use anyhow::{Context, Result};
use clap::Parser;
use palmglow::capture::{CaptureSource, ImageFileSource, WebcamCapture};
use palmglow::composite::{Compositor, Sparkles, PHASE_STEP};
use palmglow::landmarks::load_guide_points;
use palmglow::output::{save_png, OutputSink, PngSequence, V4L2Output};
use palmglow::{GuidePoint, Pipeline, PipelineConfig};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Process a still photo instead of the webcam
    #[arg(long)]
    image: Option<PathBuf>,

    /// Input webcam device index (live mode)
    #[arg(short, long, default_value_t = 0)]
    input_device: u32,

    /// Output v4l2loopback device path (live mode)
    #[arg(short, long, default_value = "/dev/video10")]
    output_device: String,

    /// Hand guide points (JSON array of {x, y} in 0..1).
    /// Without them the skin-colour heuristic builds the mask
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Directory for still-mode results
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Number of glow animation frames to write in still mode
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Capture resolution width
    #[arg(long, default_value_t = 1280)]
    capture_width: u32,

    /// Capture resolution height
    #[arg(long, default_value_t = 720)]
    capture_height: u32,

    /// Target frames per second (live mode)
    #[arg(long, default_value_t = 15)]
    fps: u32,

    /// Silhouette blur sigma in pixels
    #[arg(long, default_value_t = 28.0)]
    blur_sigma: f32,

    /// Seed for the sparkle particles
    #[arg(long, default_value_t = 1)]
    sparkle_seed: u64,

    /// Show the silhouette mask instead of the glow composite (live mode)
    #[arg(long)]
    show_mask: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("Palmglow starting");

    // Load guide points if provided
    let guides = match &args.landmarks {
        Some(path) => load_guide_points(path)?,
        None => {
            tracing::info!("No guide points given, using skin heuristic");
            Vec::new()
        }
    };

    let pipeline = Pipeline::new(PipelineConfig::default().with_blur_sigma(args.blur_sigma));

    if let Some(path) = &args.image {
        let mut source = ImageFileSource::open(path)?;
        let mut sparkles = Sparkles::new(args.sparkle_seed);
        run_still(
            &mut source,
            &pipeline,
            &guides,
            &mut sparkles,
            &args.out_dir,
            args.frames,
        )
    } else {
        tracing::info!("Capture: {}x{}", args.capture_width, args.capture_height);
        tracing::info!("Target FPS: {}", args.fps);

        // Initialize capture
        let mut capture =
            WebcamCapture::new(args.input_device, args.capture_width, args.capture_height)
                .context("Failed to initialize webcam capture")?;
        // Initialize output
        let mut output = V4L2Output::new(
            &args.output_device,
            args.capture_width,
            args.capture_height,
        )
        .context("Failed to initialize v4l2loopback output")?;

        run_live(
            &mut capture,
            &mut output,
            &pipeline,
            &guides,
            &mut Sparkles::new(args.sparkle_seed),
            args.fps,
            args.show_mask,
        )
    }
}

fn run_still<C: CaptureSource>(
    source: &mut C,
    pipeline: &Pipeline,
    guides: &[GuidePoint],
    sparkles: &mut Sparkles,
    out_dir: &Path,
    frames: u32,
) -> Result<()> {
    let frame = source.capture_frame()?;

    let start = Instant::now();
    let result = pipeline.process(&frame, guides);
    tracing::info!(
        "Processed {}x{} in {:.1}ms ({} crease pixels, {} masked pixels)",
        frame.width(),
        frame.height(),
        start.elapsed().as_secs_f64() * 1000.0,
        result.edges.edge_count(),
        result.mask.covered_count()
    );

    // Masks first, then the animation frames
    save_png(&result.edges.to_rgba_image(), out_dir.join("edges.png"))?;
    save_png(&result.mask.to_rgba_image(), out_dir.join("mask.png"))?;

    let compositor = Compositor::new(&frame, &result.edges, &result.mask)
        .context("Masks do not match the frame")?;
    save_png(&compositor.masked_hand(), out_dir.join("hand.png"))?;

    let (width, height) = frame.dimensions();
    let mut sequence = PngSequence::new(out_dir, "glow", width, height)?;
    for i in 0..frames {
        sequence.write_frame(&compositor.render_with_sparkles(i as f32 * PHASE_STEP, sparkles))?;
    }
    tracing::info!("Wrote {} glow frames to {}", sequence.written(), out_dir.display());

    Ok(())
}

fn run_live<C, O>(
    capture: &mut C,
    output: &mut O,
    pipeline: &Pipeline,
    guides: &[GuidePoint],
    sparkles: &mut Sparkles,
    target_fps: u32,
    show_mask: bool,
) -> Result<()>
where
    C: CaptureSource,
    O: OutputSink,
{
    let frame_duration = Duration::from_secs_f32(1.0 / target_fps.max(1) as f32);
    let mut frame_count = 0u64;
    let mut phase = 0.0f32;
    let mut total_capture_time = Duration::ZERO;
    let mut total_process_time = Duration::ZERO;
    let mut total_output_time = Duration::ZERO;

    tracing::info!("Starting main pipeline loop, show_mask={}", show_mask);
    tracing::info!("Press Ctrl+C to stop");

    // Main loop
    loop {
        let loop_start = Instant::now();

        // Capture frame
        let capture_start = Instant::now();
        let frame = capture
            .capture_frame()
            .context("Failed to capture frame")?;
        total_capture_time += capture_start.elapsed();

        // Edges and silhouette, then the glow composite
        let process_start = Instant::now();
        let result = pipeline.process(&frame, guides);
        let output_frame = if show_mask {
            // Visualize mask as grayscale image
            result.mask.to_matte_image()
        } else {
            Compositor::new(&frame, &result.edges, &result.mask)
                .context("Masks do not match the frame")?
                .render_with_sparkles(phase, sparkles)
        };
        total_process_time += process_start.elapsed();

        // Output frame
        let output_start = Instant::now();
        output
            .write_frame(&output_frame)
            .context("Failed to write frame")?;
        total_output_time += output_start.elapsed();

        frame_count += 1;
        phase += PHASE_STEP;

        // Log stats every 30 frames
        if frame_count % 30 == 0 {
            let avg_capture_ms = total_capture_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_process_ms = total_process_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_output_ms = total_output_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let total_ms = avg_capture_ms + avg_process_ms + avg_output_ms;

            tracing::info!(
                "Frame {}: capture={:.1}ms, process={:.1}ms, output={:.1}ms, total={:.1}ms, fps={:.1}",
                frame_count,
                avg_capture_ms,
                avg_process_ms,
                avg_output_ms,
                total_ms,
                1000.0 / total_ms
            );
        }

        // Frame rate limiting
        let elapsed = loop_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
}
