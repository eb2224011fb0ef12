use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use acf_tuner::config::TunerConfig;
use acf_tuner::detector::autocorrelation::AutocorrelationDetector;
use acf_tuner::render::plot::FrequencyPlot;
use acf_tuner::render::readout::ReadoutRenderer;
use acf_tuner::render::trail::NoteTrail;
use acf_tuner::render::{Reading, Renderer};
use acf_tuner::tracker::PitchTracker;
use acf_tuner::wav;

/// Prints one readout line per rendered frame.
struct ConsoleReadout {
    readout: ReadoutRenderer,
}

impl Renderer<f32> for ConsoleReadout {
    fn name(&self) -> &'static str {
        "console"
    }

    fn render(&mut self, reading: &Reading<f32>) {
        self.readout.render(reading);
        println!(
            "{:>9.3}s  {}",
            reading.elapsed.as_secs_f64(),
            self.readout.current()
        );
    }
}

fn main() -> Result<()> {
    // Logs go to stderr, readouts to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let Some(wav_path) = args.next().map(PathBuf::from) else {
        bail!("usage: acf-tuner <file.wav> [config.json]");
    };

    let config = match args.next() {
        Some(path) => TunerConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => TunerConfig::default(),
    };
    config.validate()?;

    let signal = wav::read_signal::<f32, _>(&wav_path)
        .with_context(|| format!("Failed to read audio: {:?}", wav_path))?;
    info!(
        "Analyzing {:?}: {:.2}s at {} Hz, window {} hop {}",
        wav_path,
        signal.duration().as_secs_f64(),
        signal.sample_rate,
        config.window_size,
        config.hop_size
    );

    let tracker = PitchTracker::new(
        AutocorrelationDetector::new(config.detector),
        signal.sample_rate,
    );

    let mut console = ConsoleReadout {
        readout: ReadoutRenderer::new(),
    };
    let mut plot = FrequencyPlot::new(config.plot);
    let mut trail = NoteTrail::new(config.trail);

    let renderers: &mut [&mut dyn Renderer<f32>] = &mut [&mut console, &mut plot, &mut trail];
    let summary = tracker.track(
        wav::frames(&signal, config.window_size, config.hop_size),
        renderers,
    );

    let end = signal.duration();
    let trail_points = trail.points(end);
    info!(
        "{} frames: {} detected, {} silent, {} skipped",
        summary.frames, summary.detected, summary.silent, summary.skipped
    );
    info!(
        "plot holds {} points, trail holds {} notes with {} connections",
        plot.points().count(),
        trail_points.len(),
        trail.connections(&trail_points).len()
    );

    Ok(())
}
