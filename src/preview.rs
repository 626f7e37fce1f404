//! A 4096×4096 look at one layer of the generated volumes.
//!
//! The raster tiles the 256 blue slices of the cube in a 16×16 grid, each slice a
//! 256×256 red/green square. A healthy volume shows smooth patches of the matched
//! colors; noise means something went wrong.

use {
	crate::{
		colors::toRgba8,
		volume::{cellIndex, AXIS_LEN},
		ColorSample, PaletteInputs, PaletteVolumes, PreviewError, TileWallCell, RGBA_SIZE,
	},
	png::ColorType,
	rayon::{prelude::*, ThreadPool},
	core::str::FromStr,
	serde::Deserialize,
	std::io::Write,
};

pub const SLICES_PER_ROW: usize = 16;
pub const PREVIEW_SIDE: usize = AXIS_LEN * SLICES_PER_ROW;

/// Fully transparent; marks cells without a candidate.
const NO_MATCH: [u8; RGBA_SIZE] = [0; RGBA_SIZE];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviewLayer {
	#[default]
	Tile,
	Wall,
	Paint,
}

impl FromStr for PreviewLayer {
	type Err = String;

	fn from_str(layer: &str) -> Result<Self, Self::Err> {
		match layer {
			"tile" => Ok(Self::Tile),
			"wall" => Ok(Self::Wall),
			"paint" => Ok(Self::Paint),
			_ => Err(format!("{layer:?} is none of tile, wall, paint")),
		}
	}
}

/// Which cube point pixel (x, y) shows.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn previewCoordinate(x: usize, y: usize) -> [u8; 3] {
	let slice = (y / AXIS_LEN) * SLICES_PER_ROW + x / AXIS_LEN;
	[(x % AXIS_LEN) as u8, (y % AXIS_LEN) as u8, slice as u8]
}

/// Renders RGBA8 pixels, row-major.
///
/// # Errors
/// [`PreviewError::Allocation`] when the raster can't be reserved.
pub fn renderPreview(
	pool: &ThreadPool,
	inputs: &PaletteInputs,
	volumes: &PaletteVolumes,
	layer: PreviewLayer,
) -> Result<Vec<u8>, PreviewError> {
	const PITCH: usize = PREVIEW_SIDE * RGBA_SIZE;
	let mut rgbaData = Vec::new();
	rgbaData.try_reserve_exact(PITCH * PREVIEW_SIDE)?;
	rgbaData.resize(PITCH * PREVIEW_SIDE, 0);
	let colors = inputs.colors();
	let shade = |table: &[ColorSample], id: u16| match id {
		TileWallCell::NONE => NO_MATCH,
		id => opaque(toRgba8(table[usize::from(id)])),
	};
	pool.install(|| {
		rgbaData.par_chunks_mut(PITCH).enumerate().for_each(|(y, row)| {
			for (x, pixel) in row.chunks_exact_mut(RGBA_SIZE).enumerate() {
				let index = cellIndex(previewCoordinate(x, y));
				pixel.copy_from_slice(&match layer {
					PreviewLayer::Tile => shade(&colors.tiles, volumes.tileWall()[index].tile),
					PreviewLayer::Wall => shade(&colors.walls, volumes.tileWall()[index].wall),
					PreviewLayer::Paint => colors
						.paints
						.get(usize::from(volumes.paint()[index]))
						.map_or(NO_MATCH, |&paint| opaque(toRgba8(paint))),
				});
			}
		});
	});
	Ok(rgbaData)
}

fn opaque([r, g, b, _]: [u8; RGBA_SIZE]) -> [u8; RGBA_SIZE] {
	[r, g, b, u8::MAX]
}

/// # Errors
/// [`PreviewError::Png`] when encoding or the underlying writer fails.
#[allow(clippy::cast_possible_truncation)]
pub fn writePreviewPng(writer: impl Write, rgbaData: &[u8]) -> Result<(), PreviewError> {
	let mut png = png::Encoder::new(writer, PREVIEW_SIDE as _, PREVIEW_SIDE as _);
	png.set_color(ColorType::Rgba);
	let mut writer = png.write_header()?;
	writer.write_image_data(rgbaData)?;
	Ok(writer.finish()?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn raster_visits_every_cell_once() {
		let mut seen = vec![false; crate::CUBE_VOLUME];
		for y in 0..PREVIEW_SIDE {
			for x in 0..PREVIEW_SIDE {
				let index = cellIndex(previewCoordinate(x, y));
				assert!(!seen[index]);
				seen[index] = true;
			}
		}
		assert!(seen.iter().all(|&cell| cell));
	}

	#[test]
	fn layer_names() {
		assert_eq!("wall".parse::<PreviewLayer>(), Ok(PreviewLayer::Wall));
		assert!("walls".parse::<PreviewLayer>().is_err());
	}

	#[test]
	fn slices_advance_left_to_right() {
		assert_eq!(previewCoordinate(0, 0), [0, 0, 0]);
		assert_eq!(previewCoordinate(257, 3), [1, 3, 1]);
		assert_eq!(previewCoordinate(PREVIEW_SIDE - 1, PREVIEW_SIDE - 1), [255, 255, 255]);
	}
}
