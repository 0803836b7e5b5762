//! The parts of the host game that biome reconciliation reads from.

use fxhash::FxHashMap;
use lex_base::{BlockState, Identifier};
use serde::{Deserialize, Serialize};

/// Spawn category of a creature, in the order native spawn lists are walked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureType {
	Monster,
	Creature,
	Ambient,
	WaterCreature,
}

impl CreatureType {
	pub const ALL: [CreatureType; 4] =
		[CreatureType::Monster, CreatureType::Creature, CreatureType::Ambient, CreatureType::WaterCreature];
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SpawnEntry {
	pub entity: Identifier,
	pub weight: u32,
	pub min_group: u32,
	pub max_group: u32,
}

impl SpawnEntry {
	pub fn new(entity: Identifier, weight: u32, min_group: u32, max_group: u32) -> Self {
		SpawnEntry { entity, weight, min_group, max_group }
	}
}

/// The unconfigured state of a biome, as registered by the game or by another mod.
#[derive(Debug, Clone)]
pub struct NativeBiome {
	pub id: Identifier,
	pub top_block: BlockState,
	pub filler_block: BlockState,
	pub spawns: FxHashMap<CreatureType, Vec<SpawnEntry>>,
}

impl NativeBiome {
	pub fn new(id: Identifier, top_block: BlockState, filler_block: BlockState) -> Self {
		NativeBiome { id, top_block, filler_block, spawns: FxHashMap::default() }
	}

	pub fn with_spawn(mut self, category: CreatureType, entry: SpawnEntry) -> Self {
		self.spawns.entry(category).or_insert_with(Vec::new).push(entry);
		self
	}

	pub fn spawns(&self, category: CreatureType) -> &[SpawnEntry] {
		self.spawns.get(&category).map(Vec::as_slice).unwrap_or(&[])
	}
}

pub trait BiomeRegistry: Sync {
	fn biome(&self, id: &Identifier) -> Option<&NativeBiome>;
}

/// Classifies entity identifiers. Entities that cannot spawn naturally have no category.
pub trait EntityRegistry: Sync {
	fn creature_type(&self, id: &Identifier) -> Option<CreatureType>;
}

impl BiomeRegistry for FxHashMap<Identifier, NativeBiome> {
	fn biome(&self, id: &Identifier) -> Option<&NativeBiome> {
		self.get(id)
	}
}

impl EntityRegistry for FxHashMap<Identifier, CreatureType> {
	fn creature_type(&self, id: &Identifier) -> Option<CreatureType> {
		self.get(id).cloned()
	}
}
