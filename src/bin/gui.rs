use clap::Parser;
use env_logger::Env;
use fractal_viewport::GeneratorArgs;

/// Interactive window over a remote fractal generator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    generator: GeneratorArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    fractal_viewport::run_gui(&cli.generator)
}
