#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	std::{path::PathBuf, process::ExitCode},
	terraria_palette_generator::{initLogging, Error, GenerateRequest, Generator, PaletteInputs},
	tracing::error,
};

fn main() -> ExitCode {
	#[derive(Parser)]
	struct Args {
		tileColorInfo: PathBuf,
		validTileWallInfo: PathBuf,
		palette: PathBuf,

		#[clap(long, default_value_t = 16)]
		spotChecks: usize,

		#[clap(long)]
		threads: Option<usize>,
	}
	initLogging();
	let Args { tileColorInfo, validTileWallInfo, palette, spotChecks, threads } = Args::parse();
	let run = || -> Result<(), Error> {
		let generator = &mut Generator::new(PaletteInputs::load(&tileColorInfo, &validTileWallInfo)?, threads)?;
		let request = GenerateRequest { spotChecks, ..GenerateRequest::new(&palette) };
		println!("{}", generator.generate(request)?.elapsed.as_secs_f64());
		Ok(())
	};
	run().map_or_else(
		|err| {
			error!(kind = ?err.kind(), "{err}");
			ExitCode::FAILURE
		},
		|()| ExitCode::SUCCESS,
	)
}
