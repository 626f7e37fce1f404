#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	std::{path::PathBuf, process::ExitCode},
	terraria_palette_generator::{
		config::GeneratorConfig, initLogging, Error, GenerateRequest, Generator, PaletteInputs,
	},
	tracing::error,
};

/// Precomputes which tile, wall and paint best reproduce every 24-bit color.
#[derive(Parser)]
struct Args {
	/// TOML file overriding the default `Data/` paths
	#[clap(long)]
	config: Option<PathBuf>,

	/// Don't render the preview image
	#[clap(long)]
	noPreview: bool,

	/// Worker threads, overriding the config
	#[clap(long)]
	threads: Option<usize>,
}

fn main() -> ExitCode {
	initLogging();
	match run(Args::parse()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!(kind = ?err.kind(), "{err}");
			ExitCode::FAILURE
		}
	}
}

fn run(Args { config, noPreview, threads }: Args) -> Result<(), Error> {
	let config = match config {
		Some(path) => GeneratorConfig::load(&path)?,
		None => GeneratorConfig::default(),
	};
	let inputs = PaletteInputs::load(&config.tileColorInfo, &config.validTileWallInfo)?;
	let generator = &mut Generator::new(inputs, threads.or(config.threads))?;
	let report = generator.generate(GenerateRequest {
		palette: &config.palette,
		preview: if noPreview { None } else { config.previewTarget() },
		spotChecks: config.spotChecks,
	})?;
	println!("{}", report.elapsed.as_secs_f64());
	Ok(())
}
