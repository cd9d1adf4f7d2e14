use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use fractal_viewport::{
    Explorer, GeneratorArgs, HttpImageLoader, LogPresenter, ParameterStore, PpmFilePresenter,
    SnapshotController,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Fetches a generated fractal view and writes it to a PPM file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    generator: GeneratorArgs,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 900)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Wheel steps at the canvas centre before the snapshot; negative zooms out
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom_steps: i32,

    #[arg(short, long, default_value = "output/view.ppm")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let store = ParameterStore::from_query(&cli.generator.query)
        .with_context(|| format!("invalid --query {:?}", cli.generator.query))?;
    let loader = HttpImageLoader::new(cli.generator.request_timeout())
        .context("could not build HTTP client")?;

    let now = Instant::now();
    let mut explorer = Explorer::new(
        cli.generator.explorer_config(),
        store,
        Arc::new(loader),
        Arc::new(LogPresenter::new()),
        now,
    );
    explorer
        .resize(now, cli.width, cli.height)
        .context("invalid canvas size")?;

    let mut controller = SnapshotController::new(explorer, PpmFilePresenter::new());
    controller.generate()?;

    if cli.zoom_steps != 0 {
        controller.zoom(cli.zoom_steps)?;
        controller.generate()?;
    }

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("could not create {}", parent.display()))?;
    }
    controller.write(&cli.output)?;

    log::info!("view: ?{}", controller.explorer().query());

    Ok(())
}
