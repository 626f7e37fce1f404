#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	rayon::ThreadPoolBuilder,
	std::{io::BufWriter, path::PathBuf, process::ExitCode},
	terraria_palette_generator::{
		initLogging,
		preview::{renderPreview, writePreviewPng},
		stdoutRaw, Error, PaletteInputs, PaletteVolumes, PreviewLayer,
	},
	tracing::error,
};

fn main() -> ExitCode {
	#[derive(Parser)]
	struct Args {
		tileColorInfo: PathBuf,
		validTileWallInfo: PathBuf,
		palette: PathBuf,

		/// tile, wall or paint
		#[clap(long, value_parser, default_value = "tile")]
		layer: PreviewLayer,
	}
	initLogging();
	let Args { tileColorInfo, validTileWallInfo, palette, layer } = Args::parse();
	let load = || -> Result<_, Error> {
		let inputs = PaletteInputs::load(&tileColorInfo, &validTileWallInfo)?;
		Ok((inputs, PaletteVolumes::readArtifact(&palette)?, ThreadPoolBuilder::new().build()?))
	};
	let (inputs, volumes, pool) = match load() {
		Ok(loaded) => loaded,
		Err(err) => {
			error!(kind = ?err.kind(), "{err}");
			return ExitCode::FAILURE;
		}
	};
	match renderPreview(&pool, &inputs, &volumes, layer)
		.and_then(|rgbaData| writePreviewPng(BufWriter::new(stdoutRaw()), &rgbaData))
	{
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("preview failed: {err}");
			ExitCode::FAILURE
		}
	}
}
