//! Headless NEO viewer
//!
//! Loads a NeoWs feed, renders it with the software backend while a scripted
//! pointer sweeps the surface, and writes the final frame to a PNG.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use neo_engine::foundation::logging;
use neo_engine::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const DEFAULT_OUTPUT: &str = "neo_frame.png";
const SWEEP_STEPS: u32 = 48;

#[derive(Debug)]
struct ViewerOptions {
    feed: PathBuf,
    config: Option<PathBuf>,
    output: PathBuf,
    date: Option<String>,
    frames: Option<u64>,
    click_center: bool,
}

fn parse_options() -> Result<ViewerOptions> {
    let matches = Command::new("neo_viewer")
        .about("Renders a near-Earth-object feed and writes the final frame as a PNG")
        .arg(
            Arg::new("feed")
                .value_name("FEED")
                .help("NeoWs feed JSON document")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Visualizer configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the rendered frame")
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            Arg::new("date")
                .short('d')
                .long("date")
                .value_name("YYYY-MM-DD")
                .help("Feed date to show (defaults to the earliest date)"),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_name("COUNT")
                .help("Stop after this many frames instead of after the pointer script"),
        )
        .arg(
            Arg::new("click-center")
                .long("click-center")
                .help("Click the middle of the surface at the end of the sweep")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let frames = matches
        .get_one::<String>("frames")
        .map(|count| count.parse::<u64>().context("Invalid frame count"))
        .transpose()?;

    Ok(ViewerOptions {
        feed: matches
            .get_one::<String>("feed")
            .map(PathBuf::from)
            .context("Missing feed path")?,
        config: matches.get_one::<String>("config").map(PathBuf::from),
        output: matches
            .get_one::<String>("output")
            .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from),
        date: matches.get_one::<String>("date").cloned(),
        frames,
        click_center: matches.get_flag("click-center"),
    })
}

fn main() -> Result<()> {
    let options = parse_options()?;

    let config = match &options.config {
        Some(path) => VisualizerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => VisualizerConfig::default(),
    };
    logging::init(&config.logging.filter);
    log::info!("Starting NEO viewer with feed {}", options.feed.display());

    let feed = NeoFeed::from_path(&options.feed)
        .with_context(|| format!("Failed to read feed {}", options.feed.display()))?;
    let selection = options
        .date
        .clone()
        .map_or(DateSelection::First, DateSelection::Date);

    let backend = SnapshotBackend::new(config.surface.width, config.surface.height);
    let provider = Arc::new(FileResourceProvider::new(&config.resources.root));
    let sink = |record: Arc<NearEarthObjectRecord>| {
        log::info!("Selected NEO\n{}", DetailSummary::from_record(&record));
    };

    let mut visualizer = Visualizer::new(config.clone(), backend, provider, sink)?;
    visualizer.await_assets(Duration::from_secs(5));

    let report = visualizer.load_dataset(&feed, &selection);
    if report.outcome == BuildOutcome::EmptyOrMissingDateSelection {
        log::warn!("Feed has no records for {:?}", selection);
    }

    let mut render_loop = RenderLoop::from_config(&config.render_loop);
    if let Some(frames) = options.frames {
        render_loop = render_loop.with_frame_limit(frames);
    }

    let (events, receiver) = mpsc::channel();
    let surface = SurfaceRect::from_size(config.surface.width, config.surface.height);
    let pace = render_loop.frame_interval();
    let script = {
        let stop_with_teardown = options.frames.is_none();
        let click_center = options.click_center;
        thread::Builder::new()
            .name("pointer-script".to_string())
            .spawn(move || run_pointer_script(&events, surface, pace, click_center, stop_with_teardown))
            .context("Failed to start pointer script")?
    };

    let stats = render_loop.run(&mut visualizer, &receiver)?;
    drop(receiver);
    if script.join().is_err() {
        log::warn!("Pointer script panicked");
    }

    visualizer
        .backend()
        .save_png(&options.output)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;
    visualizer.teardown();

    log::info!(
        "Wrote {} after {} frames ({} dropped)",
        options.output.display(),
        stats.frames_drawn,
        stats.frames_dropped
    );
    Ok(())
}

/// Sweep the pointer diagonally across the surface, one step per frame
fn run_pointer_script(
    events: &Sender<HostEvent>,
    surface: SurfaceRect,
    pace: Duration,
    click_center: bool,
    stop_with_teardown: bool,
) {
    for step in 0..=SWEEP_STEPS {
        let t = f64::from(step) / f64::from(SWEEP_STEPS);
        let event = HostEvent::PointerMoved {
            x: surface.left + t * surface.width,
            y: surface.top + t * surface.height,
        };
        if events.send(event).is_err() {
            return;
        }
        thread::sleep(pace);
    }

    if click_center {
        let (x, y) = (surface.left + surface.width / 2.0, surface.top + surface.height / 2.0);
        let clicked = events
            .send(HostEvent::PointerPressed { x, y, button: MouseButton::Primary })
            .and_then(|()| events.send(HostEvent::PointerReleased { x, y, button: MouseButton::Primary }));
        if clicked.is_err() {
            return;
        }
        thread::sleep(pace);
    }

    if stop_with_teardown {
        let _ = events.send(HostEvent::Teardown);
    } else {
        let _ = events.send(HostEvent::PointerLeft);
    }
}
