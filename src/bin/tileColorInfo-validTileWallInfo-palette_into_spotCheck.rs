#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	rand::thread_rng,
	std::{path::PathBuf, process::ExitCode},
	terraria_palette_generator::{initLogging, verify, Error, PaletteInputs, PaletteVolumes, CUBE_VOLUME},
	tracing::error,
};

fn main() -> ExitCode {
	#[derive(Parser)]
	struct Args {
		tileColorInfo: PathBuf,
		validTileWallInfo: PathBuf,
		palette: PathBuf,

		#[clap(long, default_value_t = 4096)]
		samples: usize,

		/// Check every cell instead of sampling
		#[clap(long)]
		all: bool,
	}
	initLogging();
	let Args { tileColorInfo, validTileWallInfo, palette, samples, all } = Args::parse();
	let run = || -> Result<usize, Error> {
		let inputs = PaletteInputs::load(&tileColorInfo, &validTileWallInfo)?;
		let volumes = PaletteVolumes::readArtifact(&palette)?;
		if all {
			verify::checkAll(&inputs, &volumes)?;
			return Ok(CUBE_VOLUME);
		}
		verify::spotCheck(&inputs, &volumes, samples, &mut thread_rng())?;
		Ok(samples)
	};
	match run() {
		Ok(checked) => {
			println!("{checked} cells match");
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!(kind = ?err.kind(), "{err}");
			ExitCode::FAILURE
		}
	}
}
