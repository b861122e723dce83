use anyhow::Result;
use clap::Parser;
use placeholder_icons::config::Config;
use placeholder_icons::generator::IconGenerator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "generate-icons")]
#[command(about = "Generate placeholder app icons (PNG, ICO, ICNS)", long_about = None)]
struct Cli {
    /// YAML config file. Built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory to write icons into (overrides output.dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Iconset to ICNS converter program (overrides converter.program)
    #[arg(long)]
    converter: Option<String>,
    /// Always write the placeholder ICNS instead of running the converter
    #[arg(long)]
    no_convert: bool,
    /// Only print failures
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }
    if let Some(program) = cli.converter {
        config.converter.program = program;
    }
    if cli.no_convert {
        config.converter.enabled = false;
    }
    config.validate()?;

    // ICNS conversion failures are reported inside run() and never change the exit code
    IconGenerator::new(config).quiet(cli.quiet).run()?;

    Ok(())
}
