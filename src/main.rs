use anyhow::Context;
use isolife::{FrameDriver, GifSink, IsoCanvas, stats::SwitchRecorder};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    fs::File,
    io::{BufWriter, Write},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod options;

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };
    init_logging();

    // everything is validated before the output file is touched
    let config = args.config()?;
    let canvas_options = args.canvas_options()?;
    let gif_options = args.gif_options()?;
    gif_options.validate()?;
    let rng = match args.seed()? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let frames = config.frames;
    let driver = FrameDriver::new(config, rng)?;
    let mut canvas = IsoCanvas::new(&canvas_options)?;

    let output = args.output_file();
    let file = File::create(&output).with_context(|| format!("creating {output}"))?;
    let mut file = BufWriter::new(file);
    let mut stats = SwitchRecorder::new(frames, args.stats_file().is_some());
    let history = {
        let mut sink = GifSink::new(&mut file, gif_options)?;
        driver.run(&mut canvas, &mut sink, &mut stats)?
    };
    file.flush().with_context(|| format!("writing {output}"))?;

    if let Some(path) = args.stats_file() {
        stats
            .save(&path)
            .with_context(|| format!("writing stats to {path}"))?;
    }

    info!(
        frames = history.total_appended(),
        layers = history.len(),
        "complete, written to {output}"
    );
    Ok(())
}
