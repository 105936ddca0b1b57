use anyhow::{Context, Result};
use posture_monitor::{
    monitor::{Monitor, Renderer},
    render::LogRenderer,
    source::{FrameSource, LandmarkReader},
};
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Landmark stream, one frame per line. Reads stdin when omitted.
    ///
    /// Ctrl-C is only noticed between frames, so a stdin producer that stops
    /// writing without closing the pipe keeps the monitor waiting; close the
    /// stream (Ctrl-D) to end the run.
    input: Option<PathBuf>,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(flatten)]
    display: DisplayOpt,
}

#[derive(structopt::StructOpt)]
struct DisplayOpt {
    /// Show a spinner with the latest verdict.
    #[structopt(short, long)]
    show_progress: bool,

    /// Draw frames in an OpenCV window instead of logging them.
    #[cfg(feature = "gui")]
    #[structopt(short, long)]
    window: bool,

    #[cfg(feature = "gui")]
    #[structopt(long, default_value = "1920")]
    screen_width: u32,

    #[cfg(feature = "gui")]
    #[structopt(long, default_value = "1080")]
    screen_height: u32,

    #[cfg(feature = "gui")]
    #[structopt(short = "-W", long, default_value = "10")]
    wait_key_ms: i32,
}

fn open_source(input: Option<&PathBuf>) -> Result<Box<dyn FrameSource>> {
    Ok(match input {
        Some(path) => Box::new(LandmarkReader::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ))),
        None => Box::new(LandmarkReader::new(BufReader::new(io::stdin()))),
    })
}

#[cfg(feature = "gui")]
fn make_renderer(opt: &DisplayOpt) -> Result<Box<dyn Renderer>> {
    if opt.window {
        Ok(Box::new(
            posture_monitor::render::WindowRenderer::new(
                opt.screen_width,
                opt.screen_height,
                opt.wait_key_ms,
            )
            .context("failed to open posture window")?,
        ))
    } else {
        Ok(Box::new(LogRenderer::new(opt.show_progress)))
    }
}

#[cfg(not(feature = "gui"))]
fn make_renderer(opt: &DisplayOpt) -> Result<Box<dyn Renderer>> {
    Ok(Box::new(LogRenderer::new(opt.show_progress)))
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(opt.log_level),
    )?;

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let source = open_source(opt.input.as_ref())?;
    let renderer = make_renderer(&opt.display)?;

    let stats = Monitor::new(source, renderer)
        .run(&running)
        .context("posture monitor failed")?;

    info!(
        message = "done",
        good = stats.good,
        bad = stats.bad,
        analysis_secs = stats.analysis.as_secs_f64()
    );
    Ok(())
}
