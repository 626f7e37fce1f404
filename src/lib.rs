#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

pub mod artifact;
pub mod colors;
pub mod config;
pub mod error;
pub mod filters;
pub mod generator;
pub mod inputs;
pub mod preview;
pub mod search;
pub mod verify;
pub mod volume;

pub use {
	colors::{ColorSample, ReferenceColors},
	error::{Error, ErrorKind, PreviewError},
	filters::EligibleIndices,
	generator::{GenerateReport, GenerateRequest, Generator, Stage},
	inputs::PaletteInputs,
	preview::PreviewLayer,
	volume::{PaletteVolumes, TileWallCell, AXIS_LEN, CUBE_VOLUME},
};

pub const RGB_SIZE: usize = 3;
pub const RGBA_SIZE: usize = 4;

use {
	byteorder::{ReadBytesExt, LE},
	std::{
		fs::File,
		io::{self, BufRead},
	},
	tracing_subscriber::EnvFilter,
};

/// Bounds-checked reading of the count-prefixed arrays both input artifacts are made of.
pub(crate) trait CursorExt<'a> {
	fn remaining(&self) -> usize;
	fn readCount(&mut self, artifact: &'static str, what: &str, elementSize: usize) -> Result<usize, Error>;
	fn takeBytes(&mut self, len: usize) -> &'a [u8];
}

impl<'a> CursorExt<'a> for io::Cursor<&'a [u8]> {
	fn remaining(&self) -> usize {
		self.get_ref().len().saturating_sub(self.position() as _)
	}

	fn readCount(&mut self, artifact: &'static str, what: &str, elementSize: usize) -> Result<usize, Error> {
		let count = self.read_i32::<LE>().map_err(|_| Error::InputFormat {
			artifact,
			reason: format!("truncated before the {what} count"),
		})?;
		let count = usize::try_from(count)
			.map_err(|_| Error::InputFormat { artifact, reason: format!("negative {what} count {count}") })?;
		let (needed, remaining) = (count.saturating_mul(elementSize), self.remaining());
		if needed > remaining {
			return Err(Error::InputFormat {
				artifact,
				reason: format!("{what} count {count} needs {needed} bytes, only {remaining} remain"),
			});
		}
		Ok(count)
	}

	/// Callers check `len` against [`CursorExt::remaining`] first.
	fn takeBytes(&mut self, len: usize) -> &'a [u8] {
		let (slice, position): (&'a [u8], usize) = (*self.get_ref(), self.position() as _);
		self.consume(len);
		&slice[position..position + len]
	}
}

/// Logs to stderr, leaving stdout to the pipeline's binary output. `RUST_LOG` overrides `info`.
pub fn initLogging() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	_ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

#[cfg(unix)]
#[must_use]
pub fn stdoutRaw() -> File {
	use std::os::unix::io::FromRawFd;
	unsafe { File::from_raw_fd(1) }
}

#[cfg(windows)]
#[must_use]
pub fn stdoutRaw() -> File {
	use std::os::windows::io::{AsRawHandle, FromRawHandle};
	unsafe { File::from_raw_handle(io::stdout().as_raw_handle()) }
}
