//! Biome documents on disk, one JSON file per biome at `biomes/<namespace>/<path>.json`.

use lex_base::Identifier;
use lex_feature::Config;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("failed to access {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("failed to parse {path}: {source}")]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
	#[error("{0} does not contain a JSON object")]
	NotAnObject(PathBuf),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
	move |source| StoreError::Io { path: path.to_path_buf(), source }
}

/// Location of a biome's document, relative to the config root.
pub fn relative_path(biome: &Identifier) -> PathBuf {
	let mut path = PathBuf::from("biomes");
	path.push(biome.namespace());

	for component in biome.path().split('/') {
		path.push(component);
	}

	path.set_extension("json");
	path
}

/// Reads the document of one biome, or `None` when there is no file for it.
pub fn read(root: &Path, biome: &Identifier) -> Result<Option<Config>, StoreError> {
	let path = root.join(relative_path(biome));

	if !path.is_file() {
		return Ok(None);
	}

	read_file(&path).map(Some)
}

/// Reads every document under `root`, sorted by path. Files that are not valid documents are
/// logged and skipped.
pub fn read_all(root: &Path) -> Result<Vec<Config>, StoreError> {
	let base = root.join("biomes");

	if !base.is_dir() {
		return Ok(Vec::new());
	}

	let mut files = Vec::new();
	collect_files(&base, &mut files)?;
	files.sort();

	let mut documents = Vec::with_capacity(files.len());

	for path in files {
		match read_file(&path) {
			Ok(document) => documents.push(document),
			Err(e) => log::warn!("skipping biome config: {}", e),
		}
	}

	Ok(documents)
}

/// Writes the document of a biome as pretty-printed JSON, creating directories as needed.
pub fn write(root: &Path, biome: &Identifier, document: &Config) -> Result<(), StoreError> {
	let path = root.join(relative_path(biome));

	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).map_err(io_error(parent))?;
	}

	let json = serde_json::to_string_pretty(document).map_err(|source| StoreError::Json { path: path.clone(), source })?;

	fs::write(&path, json).map_err(io_error(&path))?;
	log::debug!("wrote biome config {}", path.display());

	Ok(())
}

fn read_file(path: &Path) -> Result<Config, StoreError> {
	let text = fs::read_to_string(path).map_err(io_error(path))?;

	match serde_json::from_str(&text) {
		Ok(Value::Object(document)) => Ok(document),
		Ok(_) => Err(StoreError::NotAnObject(path.to_path_buf())),
		Err(source) => Err(StoreError::Json { path: path.to_path_buf(), source }),
	}
}

fn collect_files(directory: &Path, files: &mut Vec<PathBuf>) -> Result<(), StoreError> {
	for entry in fs::read_dir(directory).map_err(io_error(directory))? {
		let path = entry.map_err(io_error(directory))?.path();

		if path.is_dir() {
			collect_files(&path, files)?;
		} else if path.extension().map_or(false, |extension| extension == "json") {
			files.push(path);
		}
	}

	Ok(())
}
