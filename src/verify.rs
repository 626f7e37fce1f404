//! Re-resolves sampled colors by exhaustive scan and compares them with the volumes.

use {
	crate::{
		colors::{quantizedPoint, squaredDistance},
		volume::cellCoordinate,
		ColorSample, Error, PaletteInputs, PaletteVolumes, TileWallCell, CUBE_VOLUME, RGB_SIZE,
	},
	core::cmp::Ordering,
	glam::Vec3,
	rand::Rng,
	rayon::prelude::*,
	tracing::debug,
};

/// What an exhaustive scan says the cell at `rgb` must hold.
#[must_use]
pub fn expectedCell(inputs: &PaletteInputs, rgb: [u8; RGB_SIZE]) -> (TileWallCell, u8) {
	let (colors, point) = (inputs.colors(), quantizedPoint(rgb));
	let paintIds = (0..colors.paints.len()).map(|id| u8::try_from(id).unwrap_or(u8::MAX));
	(
		TileWallCell {
			tile: scan(&colors.tiles, inputs.eligibleTiles().iter().copied(), point).unwrap_or(TileWallCell::NONE),
			wall: scan(&colors.walls, inputs.eligibleWalls().iter().copied(), point).unwrap_or(TileWallCell::NONE),
		},
		scan(&colors.paints, paintIds, point).unwrap_or(0),
	)
}

fn scan<Id: Copy + Ord + Into<usize>>(table: &[ColorSample], ids: impl Iterator<Item = Id>, point: Vec3) -> Option<Id> {
	ids.map(|id| (squaredDistance(table[id.into()], point), id))
		.min_by(|a, b| match a.0.total_cmp(&b.0) {
			Ordering::Equal => a.1.cmp(&b.1),
			unequal => unequal,
		})
		.map(|(_, id)| id)
}

/// # Errors
/// [`Error::SpotCheck`] naming the first cell that disagrees with the scan.
pub fn checkCell(inputs: &PaletteInputs, volumes: &PaletteVolumes, rgb: [u8; RGB_SIZE]) -> Result<(), Error> {
	let (stored, expected) = (volumes.lookup(rgb), expectedCell(inputs, rgb));
	if stored == expected {
		return Ok(());
	}
	let [r, g, b] = rgb;
	Err(Error::SpotCheck {
		r,
		g,
		b,
		stored: format!("{}, paint {}", stored.0, stored.1),
		expected: format!("{}, paint {}", expected.0, expected.1),
	})
}

/// Checks `samples` uniformly random cells.
///
/// # Errors
/// As [`checkCell`].
pub fn spotCheck(
	inputs: &PaletteInputs,
	volumes: &PaletteVolumes,
	samples: usize,
	rng: &mut impl Rng,
) -> Result<(), Error> {
	for _ in 0..samples {
		let testColor = rng.gen::<[u8; RGB_SIZE]>();
		checkCell(inputs, volumes, testColor)?;
	}
	debug!(samples, "spot check passed");
	Ok(())
}

/// Checks every cell of the cube, in parallel on the current pool.
///
/// # Errors
/// As [`checkCell`], for some disagreeing cell.
pub fn checkAll(inputs: &PaletteInputs, volumes: &PaletteVolumes) -> Result<(), Error> {
	(0..CUBE_VOLUME).into_par_iter().try_for_each(|index| checkCell(inputs, volumes, cellCoordinate(index)))
}
