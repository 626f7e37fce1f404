//! Geometry and storage of the two palette volumes.
//!
//! Both volumes share one addressing: `index = r | g << 8 | b << 16`, so r varies fastest.

use {
	crate::{Error, RGB_SIZE},
	core::fmt,
};

pub const AXIS_LEN: usize = u8::MAX as usize + 1;
pub const CUBE_VOLUME: usize = AXIS_LEN.pow(RGB_SIZE as _);

/// Cells of constant (g, b); the unit of parallel work.
pub const ROW_LEN: usize = AXIS_LEN;
pub const NUM_ROWS: usize = CUBE_VOLUME / ROW_LEN;

#[inline(always)]
#[must_use]
pub fn cellIndex([r, g, b]: [u8; RGB_SIZE]) -> usize {
	usize::from(r) | usize::from(g) << u8::BITS | usize::from(b) << (2 * u8::BITS)
}

#[inline(always)]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn cellCoordinate(index: usize) -> [u8; RGB_SIZE] {
	[index as u8, (index >> u8::BITS) as u8, (index >> (2 * u8::BITS)) as u8]
}

/// Nearest eligible tile and nearest eligible wall, found independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileWallCell {
	pub tile: u16,
	pub wall: u16,
}

impl TileWallCell {
	/// Stored in a field when its eligibility list is empty.
	pub const NONE: u16 = u16::MAX;
	pub const EMPTY: Self = Self { tile: Self::NONE, wall: Self::NONE };

	/// Tile in the low half, wall in the high half.
	#[inline(always)]
	#[must_use]
	pub fn pack(self) -> u32 {
		u32::from(self.tile) | u32::from(self.wall) << u16::BITS
	}

	#[inline(always)]
	#[must_use]
	#[allow(clippy::cast_possible_truncation)]
	pub fn unpack(packed: u32) -> Self {
		Self { tile: packed as u16, wall: (packed >> u16::BITS) as u16 }
	}

	#[must_use]
	pub fn tile(self) -> Option<u16> {
		(self.tile != Self::NONE).then_some(self.tile)
	}

	#[must_use]
	pub fn wall(self) -> Option<u16> {
		(self.wall != Self::NONE).then_some(self.wall)
	}
}

impl fmt::Display for TileWallCell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (tile, wall) = (self.tile(), self.wall());
		write!(f, "tile {tile:?}, wall {wall:?}")
	}
}

/// Both output volumes. Allocated once and overwritten in place by every generation.
#[derive(Clone, PartialEq, Eq)]
pub struct PaletteVolumes {
	pub(crate) tileWall: Vec<TileWallCell>,
	pub(crate) paint: Vec<u8>,
}

impl PaletteVolumes {
	/// # Errors
	/// [`Error::Allocation`] when the ~80 MiB of cell storage can't be reserved.
	pub fn allocate() -> Result<Self, Error> {
		let (mut tileWall, mut paint) = (Vec::new(), Vec::new());
		tileWall.try_reserve_exact(CUBE_VOLUME)?;
		paint.try_reserve_exact(CUBE_VOLUME)?;
		tileWall.resize(CUBE_VOLUME, TileWallCell::EMPTY);
		paint.resize(CUBE_VOLUME, 0);
		Ok(Self { tileWall, paint })
	}

	#[must_use]
	pub fn tileWall(&self) -> &[TileWallCell] {
		&self.tileWall
	}

	#[must_use]
	pub fn paint(&self) -> &[u8] {
		&self.paint
	}

	/// What a converter does per source pixel.
	#[inline]
	#[must_use]
	pub fn lookup(&self, rgb: [u8; RGB_SIZE]) -> (TileWallCell, u8) {
		let index = cellIndex(rgb);
		(self.tileWall[index], self.paint[index])
	}

	pub(crate) fn slicesMut(&mut self) -> (&mut [TileWallCell], &mut [u8]) {
		(&mut self.tileWall, &mut self.paint)
	}
}

impl fmt::Debug for PaletteVolumes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PaletteVolumes").field("cells", &self.tileWall.len()).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn red_varies_fastest() {
		assert_eq!(cellIndex([1, 0, 0]), 1);
		assert_eq!(cellIndex([0, 1, 0]), AXIS_LEN);
		assert_eq!(cellIndex([0, 0, 1]), AXIS_LEN * AXIS_LEN);
		assert_eq!(cellIndex([255, 255, 255]), CUBE_VOLUME - 1);
	}

	#[test]
	fn coordinate_inverts_index() {
		for index in [0, 1, 255, 256, 65_535, 65_536, 1_234_567, CUBE_VOLUME - 1] {
			assert_eq!(cellIndex(cellCoordinate(index)), index);
		}
	}

	#[test]
	fn tile_in_low_half() {
		let cell = TileWallCell { tile: 0x0123, wall: 0x4567 };
		assert_eq!(cell.pack(), 0x4567_0123);
		assert_eq!(TileWallCell::unpack(0x4567_0123), cell);
	}

	#[test]
	fn sentinel_reads_as_none() {
		assert_eq!(TileWallCell::EMPTY.pack(), u32::MAX);
		assert_eq!(TileWallCell::EMPTY.tile(), None);
		assert_eq!(TileWallCell { tile: 0, wall: TileWallCell::NONE }.tile(), Some(0));
		assert_eq!(TileWallCell { tile: 0, wall: TileWallCell::NONE }.wall(), None);
	}

	#[test]
	fn allocation_covers_the_cube() {
		let volumes = PaletteVolumes::allocate().unwrap();
		assert_eq!(volumes.tileWall().len(), CUBE_VOLUME);
		assert_eq!(volumes.paint().len(), CUBE_VOLUME);
		assert_eq!(volumes.lookup([9, 8, 7]), (TileWallCell::EMPTY, 0));
	}
}
