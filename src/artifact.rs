//! The generated palette file: `u32[256^3]` packed tile/wall cells, then `u8[256^3]` paint ids.
//!
//! Little-endian, no header, both volumes in [`crate::volume::cellIndex`] order.

use {
	crate::{
		volume::{CUBE_VOLUME, ROW_LEN},
		Error, PaletteVolumes, TileWallCell,
	},
	byteorder::{ByteOrder, LE},
	rayon::{prelude::*, ThreadPool},
	std::{
		fs::{self, File},
		io::Write,
		path::Path,
	},
};

pub const ARTIFACT: &str = "palette";
pub const TILE_WALL_BYTES: usize = CUBE_VOLUME * 4;
pub const ARTIFACT_LEN: usize = TILE_WALL_BYTES + CUBE_VOLUME;

/// Host-side image of the artifact. Filled completely by [`ArtifactBuffer::copyOut`]
/// before anything is written to disk.
pub struct ArtifactBuffer(Vec<u8>);

impl ArtifactBuffer {
	/// # Errors
	/// [`Error::Allocation`] when the buffer can't be reserved.
	pub fn allocate() -> Result<Self, Error> {
		let mut bytes = Vec::new();
		bytes.try_reserve_exact(ARTIFACT_LEN)?;
		bytes.resize(ARTIFACT_LEN, 0);
		Ok(Self(bytes))
	}

	/// Packs each tile/wall cell into its `u32` and copies paint ids after them.
	pub fn copyOut(&mut self, pool: &ThreadPool, volumes: &PaletteVolumes) {
		let (tileWallBytes, paintBytes) = self.0.split_at_mut(TILE_WALL_BYTES);
		pool.install(|| {
			tileWallBytes.par_chunks_mut(4 * ROW_LEN).zip(volumes.tileWall().par_chunks(ROW_LEN)).for_each(
				|(bytes, cells)| {
					for (cellBytes, cell) in bytes.chunks_exact_mut(4).zip(cells) {
						LE::write_u32(cellBytes, cell.pack());
					}
				},
			);
		});
		paintBytes.copy_from_slice(volumes.paint());
	}

	#[must_use]
	pub fn bytes(&self) -> &[u8] {
		&self.0
	}

	/// Creates or truncates `path`. A failed write leaves whatever reached the disk.
	///
	/// # Errors
	/// [`Error::Io`] on any create or write failure.
	pub fn write(&self, path: &Path) -> Result<(), Error> {
		let mut file = File::create(path).map_err(Error::io(path))?;
		file.write_all(&self.0).map_err(Error::io(path))?;
		file.sync_all().map_err(Error::io(path))
	}
}

impl PaletteVolumes {
	/// # Errors
	/// [`Error::InputFormat`] unless `bytes` is exactly one artifact long,
	/// [`Error::Allocation`] when the volumes can't be reserved.
	pub fn fromArtifact(bytes: &[u8]) -> Result<Self, Error> {
		if bytes.len() != ARTIFACT_LEN {
			return Err(Error::InputFormat {
				artifact: ARTIFACT,
				reason: format!("expected {ARTIFACT_LEN} bytes, found {}", bytes.len()),
			});
		}
		let mut volumes = Self::allocate()?;
		let (tileWallBytes, paintBytes) = bytes.split_at(TILE_WALL_BYTES);
		volumes
			.tileWall
			.par_iter_mut()
			.zip(tileWallBytes.par_chunks_exact(4))
			.for_each(|(cell, cellBytes)| *cell = TileWallCell::unpack(LE::read_u32(cellBytes)));
		volumes.paint.copy_from_slice(paintBytes);
		Ok(volumes)
	}

	/// # Errors
	/// [`Error::Io`] when `path` can't be read, otherwise as [`PaletteVolumes::fromArtifact`].
	pub fn readArtifact(path: &Path) -> Result<Self, Error> {
		Self::fromArtifact(&fs::read(path).map_err(Error::io(path))?)
	}
}

#[cfg(test)]
mod tests {
	use {super::*, crate::volume::cellIndex, rayon::ThreadPoolBuilder};

	#[test]
	fn layout_is_packed_cells_then_paint() {
		let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
		let mut volumes = PaletteVolumes::allocate().unwrap();
		let index = cellIndex([3, 2, 1]);
		volumes.tileWall[index] = TileWallCell { tile: 0x0102, wall: 0x0304 };
		volumes.paint[index] = 0x7F;

		let buffer = &mut ArtifactBuffer::allocate().unwrap();
		buffer.copyOut(&pool, &volumes);
		let bytes = buffer.bytes();
		assert_eq!(bytes.len(), ARTIFACT_LEN);
		assert_eq!(bytes[4 * index..4 * index + 4], [0x02, 0x01, 0x04, 0x03]);
		assert_eq!(bytes[4 * index + 4..4 * index + 8], [0xFF; 4]);
		assert_eq!(bytes[TILE_WALL_BYTES + index], 0x7F);
		assert_eq!(bytes[TILE_WALL_BYTES + index + 1], 0);

		assert_eq!(PaletteVolumes::fromArtifact(bytes).unwrap(), volumes);
	}

	#[test]
	fn rejects_wrong_length() {
		let err = PaletteVolumes::fromArtifact(&[0; 5]).unwrap_err();
		assert!(matches!(err, Error::InputFormat { artifact: ARTIFACT, .. }), "{err}");
	}
}
