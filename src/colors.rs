//! Reference color tables: what every tile, wall and paint looks like on the map.
//!
//! Input layout, little-endian:
//! `i32 tileCount, [f32; 4][tileCount], i32 wallCount, [f32; 4][wallCount], i32 paintCount, [f32; 4][paintCount]`

use {
	crate::{CursorExt, Error, RGBA_SIZE},
	byteorder::{ByteOrder, LE},
	glam::{Vec3, Vec4},
	std::{fs, io, path::Path},
	tracing::{debug, warn},
};

/// RGBA in `[0, 1]`. Alpha rides along for layout only; distances ignore it.
pub type ColorSample = Vec4;

pub const COLOR_SAMPLE_SIZE: usize = RGBA_SIZE * 4;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceColors {
	pub tiles: Vec<ColorSample>,
	pub walls: Vec<ColorSample>,
	pub paints: Vec<ColorSample>,
}

impl ReferenceColors {
	pub const ARTIFACT: &'static str = "tileColorInfo";

	/// # Errors
	/// [`Error::InputFormat`] when a count is negative or promises more samples than the bytes hold,
	/// or when a channel is NaN or infinite.
	pub fn fromBytes(bytes: &[u8]) -> Result<Self, Error> {
		let cursor = &mut io::Cursor::new(bytes);
		let mut readTable = |what| -> Result<Vec<ColorSample>, Error> {
			let count = cursor.readCount(Self::ARTIFACT, what, COLOR_SAMPLE_SIZE)?;
			let samples = cursor.takeBytes(count * COLOR_SAMPLE_SIZE).chunks_exact(COLOR_SAMPLE_SIZE).map(readSample);
			samples
				.enumerate()
				.map(|(id, sample)| {
					if sample.is_finite() {
						return Ok(sample);
					}
					Err(Error::InputFormat {
						artifact: Self::ARTIFACT,
						reason: format!("{what} {id} has a non-finite channel {sample}"),
					})
				})
				.collect()
		};
		let colors = Self { tiles: readTable("tile")?, walls: readTable("wall")?, paints: readTable("paint")? };
		if cursor.remaining() != 0 {
			warn!(trailing = cursor.remaining(), "{}: ignoring bytes after the paint table", Self::ARTIFACT);
		}
		debug!(tiles = colors.tiles.len(), walls = colors.walls.len(), paints = colors.paints.len(), "reference colors");
		Ok(colors)
	}

	/// # Errors
	/// [`Error::Io`] when the file can't be read, otherwise as [`ReferenceColors::fromBytes`].
	pub fn load(path: &Path) -> Result<Self, Error> {
		Self::fromBytes(&fs::read(path).map_err(Error::io(path))?)
	}

	#[must_use]
	#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
	pub fn toBytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(
			3 * 4 + (self.tiles.len() + self.walls.len() + self.paints.len()) * COLOR_SAMPLE_SIZE,
		);
		for table in [&self.tiles, &self.walls, &self.paints] {
			bytes.extend_from_slice(&(table.len() as i32).to_le_bytes());
			for sample in table {
				for channel in sample.to_array() {
					bytes.extend_from_slice(&channel.to_le_bytes());
				}
			}
		}
		bytes
	}
}

fn readSample(bytes: &[u8]) -> ColorSample {
	let mut channels = [0.0; RGBA_SIZE];
	LE::read_f32_into(bytes, &mut channels);
	Vec4::from(channels)
}

/// The point of the normalized color cube a quantized color stands for.
#[inline(always)]
#[must_use]
pub fn quantizedPoint([r, g, b]: [u8; 3]) -> Vec3 {
	Vec3::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0
}

/// Squared euclidean distance over RGB only.
#[inline(always)]
#[must_use]
pub fn squaredDistance(sample: ColorSample, point: Vec3) -> f32 {
	(sample.truncate() - point).length_squared()
}

/// Nearest-display form of a sample, for previews.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn toRgba8(sample: ColorSample) -> [u8; RGBA_SIZE] {
	sample.to_array().map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sampleColors() -> ReferenceColors {
		ReferenceColors {
			tiles: vec![Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::new(0.5, 0.25, 0.125, 1.0)],
			walls: vec![],
			paints: vec![Vec4::new(0.0, 0.0, 1.0, 0.5)],
		}
	}

	#[test]
	fn parses_what_it_writes() {
		let colors = sampleColors();
		assert_eq!(ReferenceColors::fromBytes(&colors.toBytes()).unwrap(), colors);
	}

	#[test]
	fn rejects_count_past_end() {
		let mut bytes = sampleColors().toBytes();
		bytes.truncate(bytes.len() - 1);
		let err = ReferenceColors::fromBytes(&bytes).unwrap_err();
		assert!(matches!(err, Error::InputFormat { artifact: "tileColorInfo", .. }), "{err}");
	}

	#[test]
	fn rejects_negative_count() {
		let err = ReferenceColors::fromBytes(&(-1_i32).to_le_bytes()).unwrap_err();
		assert!(err.to_string().contains("negative tile count"), "{err}");
	}

	#[test]
	fn rejects_non_finite_channels() {
		for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
			let mut colors = sampleColors();
			colors.tiles.insert(0, Vec4::new(bad, 0.0, 0.0, 1.0));
			let err = ReferenceColors::fromBytes(&colors.toBytes()).unwrap_err();
			assert_eq!(err.kind(), crate::ErrorKind::InputFormat);
			assert!(err.to_string().contains("tile 0 has a non-finite channel"), "{err}");
		}
		let mut colors = sampleColors();
		colors.paints[0].w = f32::NAN;
		assert!(ReferenceColors::fromBytes(&colors.toBytes()).is_err());
	}

	#[test]
	fn rejects_missing_tables() {
		assert!(ReferenceColors::fromBytes(&[]).is_err());
		assert!(ReferenceColors::fromBytes(&0_i32.to_le_bytes()).is_err());
	}

	#[test]
	fn tolerates_trailing_bytes() {
		let mut bytes = sampleColors().toBytes();
		bytes.extend_from_slice(&[0xAB; 3]);
		assert_eq!(ReferenceColors::fromBytes(&bytes).unwrap(), sampleColors());
	}

	#[test]
	fn distance_ignores_alpha() {
		let point = quantizedPoint([255, 0, 0]);
		assert_eq!(squaredDistance(Vec4::new(1.0, 0.0, 0.0, 0.0), point), 0.0);
		assert_eq!(squaredDistance(Vec4::new(0.0, 0.0, 0.0, 1.0), point), 1.0);
	}
}
