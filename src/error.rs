use {
	std::{collections::TryReserveError, io, path::PathBuf},
	thiserror::Error,
};

/// Which of the failure families an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	InputFormat,
	CapacityExceeded,
	Device,
	Io,
	Config,
}

#[derive(Debug, Error)]
pub enum Error {
	#[error("{artifact}: {reason}")]
	InputFormat { artifact: &'static str, reason: String },

	#[error("{table} filter names index {index}, but the table has {len} entries")]
	IndexOutOfRange { table: &'static str, index: i32, len: usize },

	#[error("{table} table has {len} entries, at most {max} can be encoded")]
	CapacityExceeded { table: &'static str, len: usize, max: usize },

	#[error("volume storage could not be allocated: {0}")]
	Allocation(#[from] TryReserveError),

	#[error("worker pool could not be started: {0}")]
	Device(#[from] rayon::ThreadPoolBuildError),

	#[error("spot check failed at ({r}, {g}, {b}): volume holds {stored}, exhaustive scan gives {expected}")]
	SpotCheck { r: u8, g: u8, b: u8, stored: String, expected: String },

	#[error("{path:?}: {source}")]
	Io { path: PathBuf, source: io::Error },

	#[error("{path:?}: {source}")]
	Config { path: PathBuf, source: toml::de::Error },
}

impl Error {
	#[must_use]
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InputFormat { .. } | Self::IndexOutOfRange { .. } => ErrorKind::InputFormat,
			Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
			Self::Allocation(_) | Self::Device(_) | Self::SpotCheck { .. } => ErrorKind::Device,
			Self::Io { .. } => ErrorKind::Io,
			Self::Config { .. } => ErrorKind::Config,
		}
	}

	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}

/// Failure of the best-effort preview step; never a failure of generation itself.
#[derive(Debug, Error)]
pub enum PreviewError {
	#[error("preview image could not be allocated: {0}")]
	Allocation(#[from] TryReserveError),

	#[error("{path:?}: {source}")]
	Io { path: PathBuf, source: io::Error },

	#[error("png: {0}")]
	Png(#[from] png::EncodingError),
}
