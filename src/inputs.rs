use {
	crate::{EligibleIndices, Error, ReferenceColors, TileWallCell},
	std::path::Path,
	tracing::warn,
};

/// Paint ids are stored in one byte.
pub const MAX_PAINTS: usize = u8::MAX as usize + 1;
/// Tile and wall ids get 16 bits each, minus the sentinel.
pub const MAX_TILE_WALL_IDS: usize = TileWallCell::NONE as usize;

/// Reference colors paired with their eligibility filters, checked once at load.
///
/// Eligible lists are sorted and deduplicated, so a strict "closer than" scan in list
/// order settles distance ties on the lowest id.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteInputs {
	colors: ReferenceColors,
	eligibleTiles: Vec<u16>,
	eligibleWalls: Vec<u16>,
}

impl PaletteInputs {
	/// # Errors
	/// [`Error::CapacityExceeded`] when a table has more entries than its id encoding holds,
	/// [`Error::IndexOutOfRange`] when a filter names an entry its table lacks.
	pub fn new(colors: ReferenceColors, filters: &EligibleIndices) -> Result<Self, Error> {
		checkCapacity("paint", colors.paints.len(), MAX_PAINTS)?;
		checkCapacity("tile", colors.tiles.len(), MAX_TILE_WALL_IDS)?;
		checkCapacity("wall", colors.walls.len(), MAX_TILE_WALL_IDS)?;
		let eligibleTiles = narrowIndices("tile", &filters.tiles, colors.tiles.len())?;
		let eligibleWalls = narrowIndices("wall", &filters.walls, colors.walls.len())?;
		if colors.paints.is_empty() {
			warn!("paint table is empty; every paint field will hold 0");
		}
		Ok(Self { colors, eligibleTiles, eligibleWalls })
	}

	/// # Errors
	/// Whatever loading either artifact or [`PaletteInputs::new`] reports.
	pub fn load(colorsPath: &Path, filtersPath: &Path) -> Result<Self, Error> {
		Self::new(ReferenceColors::load(colorsPath)?, &EligibleIndices::load(filtersPath)?)
	}

	#[must_use]
	pub fn colors(&self) -> &ReferenceColors {
		&self.colors
	}

	#[must_use]
	pub fn eligibleTiles(&self) -> &[u16] {
		&self.eligibleTiles
	}

	#[must_use]
	pub fn eligibleWalls(&self) -> &[u16] {
		&self.eligibleWalls
	}

	/// Candidate comparisons per volume cell.
	#[must_use]
	pub fn candidatesPerCell(&self) -> usize {
		self.eligibleTiles.len() + self.eligibleWalls.len() + self.colors.paints.len()
	}
}

fn checkCapacity(table: &'static str, len: usize, max: usize) -> Result<(), Error> {
	if len > max {
		return Err(Error::CapacityExceeded { table, len, max });
	}
	Ok(())
}

fn narrowIndices(table: &'static str, indices: &[i32], len: usize) -> Result<Vec<u16>, Error> {
	let mut narrowed = indices
		.iter()
		.map(|&index| match usize::try_from(index) {
			#[allow(clippy::cast_possible_truncation)]
			Ok(id) if id < len => Ok(id as u16),
			_ => Err(Error::IndexOutOfRange { table, index, len }),
		})
		.collect::<Result<Vec<_>, _>>()?;
	narrowed.sort_unstable();
	narrowed.dedup();
	if narrowed.is_empty() {
		warn!("no eligible {table}s; every {table} field will hold the sentinel");
	}
	Ok(narrowed)
}
