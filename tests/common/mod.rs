#![allow(dead_code)]

use {
	glam::Vec4,
	rand::{rngs::StdRng, Rng, SeedableRng},
	std::path::Path,
	terraria_palette_generator::{
		EligibleIndices, GenerateReport, GenerateRequest, Generator, PaletteInputs, ReferenceColors,
	},
};

pub fn rgba(r: f32, g: f32, b: f32) -> Vec4 {
	Vec4::new(r, g, b, 1.0)
}

pub fn randomTable(rng: &mut StdRng, len: usize) -> Vec<Vec4> {
	(0..len).map(|_| rgba(rng.gen(), rng.gen(), rng.gen())).collect()
}

/// Shaped like the real data: many tiles, fewer walls, a few dozen paints,
/// filters that skip entries and repeat some, plus colors shared between ids.
pub fn terrariaLikeInputs(seed: u64) -> PaletteInputs {
	let rng = &mut StdRng::seed_from_u64(seed);
	let mut colors =
		ReferenceColors { tiles: randomTable(rng, 40), walls: randomTable(rng, 20), paints: randomTable(rng, 31) };
	colors.tiles[33] = colors.tiles[5];
	colors.walls[19] = colors.walls[2];
	colors.paints[30] = colors.paints[0];
	let filters = EligibleIndices {
		tiles: vec![33, 0, 3, 5, 8, 9, 12, 15, 17, 21, 22, 23, 27, 30, 31, 36, 39, 5],
		walls: vec![19, 1, 2, 4, 7, 11, 13, 16],
	};
	PaletteInputs::new(colors, &filters).unwrap()
}

pub fn generateTo(generator: &mut Generator, palette: &Path) -> GenerateReport {
	generator.generate(GenerateRequest::new(palette)).unwrap()
}
