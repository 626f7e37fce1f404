//! Which tiles and walls may be placed as pixel art.
//!
//! Input layout, little-endian: `i32 tileFilterCount, i32[tileFilterCount], i32 wallFilterCount, i32[wallFilterCount]`

use {
	crate::{CursorExt, Error},
	byteorder::{ByteOrder, LE},
	std::{fs, io, path::Path},
	tracing::{debug, warn},
};

/// Raw filter lists as stored; range checking happens in [`crate::PaletteInputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleIndices {
	pub tiles: Vec<i32>,
	pub walls: Vec<i32>,
}

impl EligibleIndices {
	pub const ARTIFACT: &'static str = "validTileWallInfo";

	/// # Errors
	/// [`Error::InputFormat`] when a count is negative or exceeds the bytes that follow it.
	pub fn fromBytes(bytes: &[u8]) -> Result<Self, Error> {
		const INDEX_SIZE: usize = 4;
		let cursor = &mut io::Cursor::new(bytes);
		let mut readList = |what| -> Result<Vec<i32>, Error> {
			let count = cursor.readCount(Self::ARTIFACT, what, INDEX_SIZE)?;
			let mut list = vec![0; count];
			LE::read_i32_into(cursor.takeBytes(count * INDEX_SIZE), &mut list);
			Ok(list)
		};
		let filters = Self { tiles: readList("tile filter")?, walls: readList("wall filter")? };
		if cursor.remaining() != 0 {
			warn!(trailing = cursor.remaining(), "{}: ignoring bytes after the wall filter", Self::ARTIFACT);
		}
		debug!(tiles = filters.tiles.len(), walls = filters.walls.len(), "eligible indices");
		Ok(filters)
	}

	/// # Errors
	/// [`Error::Io`] when the file can't be read, otherwise as [`EligibleIndices::fromBytes`].
	pub fn load(path: &Path) -> Result<Self, Error> {
		Self::fromBytes(&fs::read(path).map_err(Error::io(path))?)
	}

	#[must_use]
	#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
	pub fn toBytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(2 * 4 + (self.tiles.len() + self.walls.len()) * 4);
		for list in [&self.tiles, &self.walls] {
			bytes.extend_from_slice(&(list.len() as i32).to_le_bytes());
			for index in list {
				bytes.extend_from_slice(&index.to_le_bytes());
			}
		}
		bytes
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_both_lists() {
		let filters = EligibleIndices { tiles: vec![0, 5, 2], walls: vec![7] };
		assert_eq!(EligibleIndices::fromBytes(&filters.toBytes()).unwrap(), filters);
	}

	#[test]
	fn empty_lists_are_valid() {
		let filters = EligibleIndices::default();
		assert_eq!(filters.toBytes().len(), 8);
		assert_eq!(EligibleIndices::fromBytes(&filters.toBytes()).unwrap(), filters);
	}

	#[test]
	fn rejects_overlong_count() {
		let mut bytes = 3_i32.to_le_bytes().to_vec();
		bytes.extend_from_slice(&1_i32.to_le_bytes());
		let err = EligibleIndices::fromBytes(&bytes).unwrap_err();
		assert!(err.to_string().contains("tile filter count 3 needs 12 bytes, only 4 remain"), "{err}");
	}

	#[test]
	fn rejects_missing_wall_list() {
		let bytes = EligibleIndices { tiles: vec![1], walls: vec![] }.toBytes();
		let err = EligibleIndices::fromBytes(&bytes[..8]).unwrap_err();
		assert!(err.to_string().contains("wall filter count"), "{err}");
	}
}
