//! Brute-force nearest-color search over every point of the quantized RGB cube.
//!
//! Work is split into [`crate::volume::NUM_ROWS`] rows of constant (g, b). A row owns its 256 cells in
//! both volumes outright, so no two work items ever touch the same cell.

use {
	crate::{
		colors::{quantizedPoint, squaredDistance},
		volume::{cellCoordinate, ROW_LEN},
		ColorSample, PaletteInputs, PaletteVolumes, TileWallCell,
	},
	glam::Vec3,
	rayon::{prelude::*, ThreadPool},
};

/// Overwrites every cell of both volumes. Inputs are already validated, so this can't fail.
pub fn searchPalette(pool: &ThreadPool, inputs: &PaletteInputs, volumes: &mut PaletteVolumes) {
	let (tileWall, paint) = volumes.slicesMut();
	pool.install(|| {
		tileWall.par_chunks_mut(ROW_LEN).zip(paint.par_chunks_mut(ROW_LEN)).enumerate().for_each(
			|(row, (tileWallRow, paintRow))| searchRow(inputs, row, tileWallRow, paintRow),
		);
	});
}

fn searchRow(inputs: &PaletteInputs, row: usize, tileWallRow: &mut [TileWallCell], paintRow: &mut [u8]) {
	let colors = inputs.colors();
	let [_, g, b] = cellCoordinate(row * ROW_LEN);
	for (r, (tileWallCell, paintCell)) in (0..=u8::MAX).zip(tileWallRow.iter_mut().zip(paintRow)) {
		let point = quantizedPoint([r, g, b]);
		*tileWallCell = TileWallCell {
			tile: nearestEligible(&colors.tiles, inputs.eligibleTiles(), point),
			wall: nearestEligible(&colors.walls, inputs.eligibleWalls(), point),
		};
		*paintCell = nearestPaint(&colors.paints, point);
	}
}

/// Lowest-distance id among `eligible`, earliest on ties; [`TileWallCell::NONE`] if there are none.
/// Distances are ordered by `total_cmp`, the same order [`crate::verify::expectedCell`] uses.
#[inline]
#[must_use]
pub fn nearestEligible(table: &[ColorSample], eligible: &[u16], point: Vec3) -> u16 {
	let (mut nearestId, mut nearestSquaredDist) = (TileWallCell::NONE, f32::INFINITY);
	for &id in eligible {
		let squaredDist = squaredDistance(table[usize::from(id)], point);
		if nearestId == TileWallCell::NONE || squaredDist.total_cmp(&nearestSquaredDist).is_lt() {
			nearestSquaredDist = squaredDist;
			nearestId = id;
		}
	}
	nearestId
}

/// Paint is never filtered. An empty table resolves to 0.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn nearestPaint(paints: &[ColorSample], point: Vec3) -> u8 {
	let (mut nearestId, mut nearestSquaredDist) = (0, f32::INFINITY);
	for (id, &paint) in paints.iter().enumerate() {
		let squaredDist = squaredDistance(paint, point);
		if id == 0 || squaredDist.total_cmp(&nearestSquaredDist).is_lt() {
			nearestSquaredDist = squaredDist;
			nearestId = id;
		}
	}
	nearestId as u8
}

#[cfg(test)]
mod tests {
	use {super::*, crate::volume::NUM_ROWS, glam::Vec4};

	#[test]
	fn rows_cover_the_cube_once() {
		assert_eq!(NUM_ROWS * ROW_LEN, crate::CUBE_VOLUME);
		for row in [0, 1, NUM_ROWS - 1] {
			let [r, g, b] = cellCoordinate(row * ROW_LEN);
			assert_eq!(r, 0);
			assert_eq!(usize::from(g) | (usize::from(b) << 8), row);
		}
	}

	#[test]
	fn nearest_wins() {
		let table = [Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0), Vec4::new(0.9, 0.9, 0.9, 1.0)];
		assert_eq!(nearestEligible(&table, &[0, 1, 2], quantizedPoint([20, 20, 20])), 0);
		assert_eq!(nearestEligible(&table, &[0, 1, 2], quantizedPoint([240, 240, 240])), 2);
		assert_eq!(nearestEligible(&table, &[0, 1], quantizedPoint([240, 240, 240])), 1);
	}

	#[test]
	fn ties_go_to_the_first_listed() {
		let table = [Vec4::splat(0.5), Vec4::splat(0.5)];
		assert_eq!(nearestEligible(&table, &[0, 1], quantizedPoint([0, 0, 0])), 0);
		assert_eq!(nearestPaint(&table, quantizedPoint([0, 0, 0])), 0);
	}

	#[test]
	fn nan_sample_never_wins() {
		let table = [Vec4::new(f32::NAN, 0.0, 0.0, 1.0), Vec4::new(1.0, 0.0, 0.0, 1.0)];
		let red = quantizedPoint([255, 0, 0]);
		assert_eq!(nearestEligible(&table, &[0, 1], red), 1);
		assert_eq!(nearestPaint(&table, red), 1);
		assert_eq!(nearestEligible(&table, &[0], red), 0);
	}

	#[test]
	fn nothing_eligible_is_the_sentinel() {
		let table = [Vec4::splat(0.5)];
		assert_eq!(nearestEligible(&table, &[], quantizedPoint([1, 2, 3])), TileWallCell::NONE);
		assert_eq!(nearestPaint(&[], quantizedPoint([1, 2, 3])), 0);
	}
}
