#![forbid(unsafe_code)]

//! Biome configuration: reconciling the native state of each biome with an editable document.
//!
//! Loading a document merges it with the native biome, keeping every user edit and filling in
//! whatever the document lacks. Saving writes the merged state back, so that the document lists
//! everything the biome actually does.

use lex_base::{Identifier, ParseError};
use lex_feature::TraitRegistry;

pub mod document;
pub mod entry;
pub mod host;
pub mod set;
pub mod stage;
pub mod store;

pub use document::BiomeDocument;
pub use entry::{BiomeConfigEntry, BiomeFlags};
pub use host::{BiomeRegistry, CreatureType, EntityRegistry, NativeBiome, SpawnEntry};
pub use set::BiomeConfigSet;
pub use stage::GenerationStage;

#[derive(Debug, thiserror::Error)]
pub enum BiomeError {
	#[error("biome config has no biome identifier")]
	MissingBiome,
	#[error("invalid biome identifier {0:?}: {1}")]
	InvalidBiome(String, #[source] ParseError),
	#[error("unknown biome {0}")]
	UnknownBiome(Identifier),
	#[error("malformed biome config: {0}")]
	Malformed(#[source] serde_json::Error),
}

/// The host registries consulted while loading biome configs. Read-only once populated.
#[derive(Clone, Copy)]
pub struct Registries<'r> {
	pub traits: &'r TraitRegistry,
	pub biomes: &'r dyn BiomeRegistry,
	pub entities: &'r dyn EntityRegistry,
}
