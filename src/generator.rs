//! One generation request, start to finish, on buffers that live as long as the generator.

use {
	crate::{
		artifact::{ArtifactBuffer, ARTIFACT_LEN},
		preview::{renderPreview, writePreviewPng, PreviewLayer},
		search::searchPalette,
		verify, Error, PaletteInputs, PaletteVolumes, PreviewError,
	},
	rand::thread_rng,
	rayon::{ThreadPool, ThreadPoolBuilder},
	std::{
		fs::File,
		io::{BufWriter, Write},
		path::Path,
		time::{Duration, Instant},
	},
	tracing::{info, info_span, warn},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Idle,
	Searching,
	CopyingOut,
	Serializing,
	Visualizing,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
	pub palette: &'a Path,
	pub preview: Option<(&'a Path, PreviewLayer)>,
	/// Random cells re-checked by exhaustive scan before anything is written.
	pub spotChecks: usize,
}

impl<'a> GenerateRequest<'a> {
	#[must_use]
	pub fn new(palette: &'a Path) -> Self {
		Self { palette, preview: None, spotChecks: 0 }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateReport {
	/// Search through serialization; the preview isn't counted.
	pub elapsed: Duration,
	pub artifactLen: usize,
	pub previewWritten: bool,
}

pub struct Generator {
	inputs: PaletteInputs,
	volumes: PaletteVolumes,
	buffer: ArtifactBuffer,
	pool: ThreadPool,
	stage: Stage,
}

impl Generator {
	/// # Errors
	/// [`Error::Allocation`] when the volumes or artifact buffer can't be reserved,
	/// [`Error::Device`] when the worker pool can't start.
	pub fn new(inputs: PaletteInputs, threads: Option<usize>) -> Result<Self, Error> {
		let mut pool = ThreadPoolBuilder::new().thread_name(|i| format!("palette-search-{i}"));
		if let Some(threads) = threads {
			pool = pool.num_threads(threads);
		}
		Ok(Self {
			inputs,
			volumes: PaletteVolumes::allocate()?,
			buffer: ArtifactBuffer::allocate()?,
			pool: pool.build()?,
			stage: Stage::Idle,
		})
	}

	#[must_use]
	pub fn stage(&self) -> Stage {
		self.stage
	}

	#[must_use]
	pub fn inputs(&self) -> &PaletteInputs {
		&self.inputs
	}

	/// Only meaningful after a successful [`Generator::generate`].
	#[must_use]
	pub fn volumes(&self) -> &PaletteVolumes {
		&self.volumes
	}

	/// Runs every stage in order and blocks until done. On failure the volumes and
	/// the artifact are of unspecified content until the next successful run.
	///
	/// # Errors
	/// [`Error::SpotCheck`] if verification disagrees with the search,
	/// [`Error::Io`] if the artifact can't be written. A failed preview is only logged.
	pub fn generate(&mut self, request: GenerateRequest<'_>) -> Result<GenerateReport, Error> {
		let report = self.runStages(request);
		self.stage = Stage::Idle;
		report
	}

	fn runStages(&mut self, request: GenerateRequest<'_>) -> Result<GenerateReport, Error> {
		let start = Instant::now();
		{
			self.stage = Stage::Searching;
			let _span = info_span!("search", candidatesPerCell = self.inputs.candidatesPerCell()).entered();
			searchPalette(&self.pool, &self.inputs, &mut self.volumes);
			verify::spotCheck(&self.inputs, &self.volumes, request.spotChecks, &mut thread_rng())?;
			info!(elapsed = ?start.elapsed(), "volumes searched");
		}
		{
			self.stage = Stage::CopyingOut;
			let _span = info_span!("copy_out").entered();
			self.buffer.copyOut(&self.pool, &self.volumes);
		}
		{
			self.stage = Stage::Serializing;
			let _span = info_span!("serialize", path = ?request.palette).entered();
			self.buffer.write(request.palette)?;
		}
		let elapsed = start.elapsed();
		info!(?elapsed, bytes = ARTIFACT_LEN, path = ?request.palette, "palette written");

		let previewWritten = match request.preview {
			None => false,
			Some((path, layer)) => {
				self.stage = Stage::Visualizing;
				let _span = info_span!("preview", ?path, ?layer).entered();
				match self.writePreview(path, layer) {
					Ok(()) => true,
					Err(err) => {
						warn!("preview skipped: {err}");
						false
					}
				}
			}
		};
		Ok(GenerateReport { elapsed, artifactLen: ARTIFACT_LEN, previewWritten })
	}

	fn writePreview(&self, path: &Path, layer: PreviewLayer) -> Result<(), PreviewError> {
		let rgbaData = renderPreview(&self.pool, &self.inputs, &self.volumes, layer)?;
		let ioError = |source| PreviewError::Io { path: path.into(), source };
		let file = &mut BufWriter::new(File::create(path).map_err(ioError)?);
		writePreviewPng(&mut *file, &rgbaData)?;
		file.flush().map_err(ioError)
	}
}
