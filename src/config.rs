//! Where the operator binary finds its inputs and puts its outputs.

use {
	crate::{preview::PreviewLayer, Error},
	const_format::concatcp,
	serde::Deserialize,
	std::{
		fs,
		path::{Path, PathBuf},
	},
};

pub const DATA_DIR: &str = "Data";
pub const TILE_COLOR_INFO: &str = concatcp!(DATA_DIR, "/tileColorInfo.bin");
pub const VALID_TILE_WALL_INFO: &str = concatcp!(DATA_DIR, "/validTileWallInfo.bin");
pub const PALETTE: &str = concatcp!(DATA_DIR, "/palette.bin");
pub const PREVIEW: &str = concatcp!(DATA_DIR, "/preview.png");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
	pub tileColorInfo: PathBuf,
	pub validTileWallInfo: PathBuf,
	pub palette: PathBuf,
	/// Defaults to `Data/preview.png`; an empty path turns the preview off.
	pub preview: PathBuf,
	pub previewLayer: PreviewLayer,
	/// Worker threads; all cores when absent.
	pub threads: Option<usize>,
	/// Random cells re-checked by exhaustive scan after each generation.
	pub spotChecks: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			tileColorInfo: TILE_COLOR_INFO.into(),
			validTileWallInfo: VALID_TILE_WALL_INFO.into(),
			palette: PALETTE.into(),
			preview: PREVIEW.into(),
			previewLayer: PreviewLayer::default(),
			threads: None,
			spotChecks: 16,
		}
	}
}

impl GeneratorConfig {
	/// # Errors
	/// [`Error::Io`] if `path` can't be read, [`Error::Config`] if it isn't a valid config.
	pub fn load(path: &Path) -> Result<Self, Error> {
		let text = fs::read_to_string(path).map_err(Error::io(path))?;
		toml::from_str(&text).map_err(|source| Error::Config { path: path.into(), source })
	}

	/// Where the preview goes and which layer it shows, unless it's turned off.
	#[must_use]
	pub fn previewTarget(&self) -> Option<(&Path, PreviewLayer)> {
		(!self.preview.as_os_str().is_empty()).then_some((self.preview.as_path(), self.previewLayer))
	}
}
