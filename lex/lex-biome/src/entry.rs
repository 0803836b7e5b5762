use crate::document::{BiomeDocument, EntityDocument, TraitDocument};
use crate::host::{CreatureType, NativeBiome, SpawnEntry};
use crate::stage::GenerationStage;
use crate::{BiomeError, Registries};
use bitflags::bitflags;
use fxhash::FxHashMap;
use java_rand::Random;
use lex_base::{BlockPos, BlockState, Identifier, World};
use lex_feature::{Config, Dispatcher, Feature, TraitRegistry};
use serde_json::Value;
use std::collections::BTreeMap;

pub const TOP_BLOCK: &str = "topBlock";
pub const FILLER_BLOCK: &str = "fillerBlock";

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct BiomeFlags: u8 {
		const ENABLED = 1;
		const GENERATE_DEFAULT_FEATURES = 2;
		const SUB_BIOME = 4;
	}
}

/// A feature built from a trait entry of a biome document.
#[derive(Debug)]
pub struct ConfiguredTrait {
	pub name: Identifier,
	pub stage: GenerationStage,
	pub generate: bool,
	pub feature: Box<dyn Feature>,
}

impl ConfiguredTrait {
	fn to_config(&self) -> Config {
		let mut config = self.feature.to_config();

		config.insert("trait".to_string(), Value::String(self.name.to_string()));
		config.insert("generationStage".to_string(), Value::String(self.stage.name().to_string()));
		config.insert("generate".to_string(), Value::Bool(self.generate));

		config
	}
}

#[derive(Debug)]
enum TraitSlot {
	Configured(ConfiguredTrait),
	/// Unknown trait, or one whose feature could not be built. Written back untouched.
	Unresolved(Config),
}

/// One biome's configuration, reconciled against the native state of the biome.
#[derive(Debug)]
pub struct BiomeConfigEntry {
	biome: Identifier,
	weight: u32,
	flags: BiomeFlags,
	blocks: BTreeMap<String, BlockState>,
	entities: Vec<EntityDocument>,
	spawns: FxHashMap<CreatureType, Vec<SpawnEntry>>,
	traits: Vec<TraitSlot>,
	sub_biome_names: Vec<String>,
	sub_biomes: Vec<Identifier>,
}

impl BiomeConfigEntry {
	/// Reconciles a raw biome document with the native biome it names.
	pub fn load(config: Config, registries: Registries<'_>) -> Result<Self, BiomeError> {
		let document = BiomeDocument::from_config(config)?;

		let biome = match document.biome.parse::<Identifier>() {
			Ok(biome) => biome,
			Err(e) => return Err(BiomeError::InvalidBiome(document.biome, e)),
		};

		let native = registries.biomes.biome(&biome).ok_or_else(|| BiomeError::UnknownBiome(biome.clone()))?;

		let mut flags = BiomeFlags::empty();
		flags.set(BiomeFlags::ENABLED, document.generate_biome);
		flags.set(BiomeFlags::GENERATE_DEFAULT_FEATURES, document.generate_default_biome_features);
		flags.set(BiomeFlags::SUB_BIOME, document.is_sub_biome);

		let blocks = reconcile_blocks(&biome, document.blocks, native);
		let entities = reconcile_entities(document.entities, native);

		let mut spawns: FxHashMap<CreatureType, Vec<SpawnEntry>> = FxHashMap::default();

		for entity in entities.iter().filter(|entity| entity.spawn) {
			let id = match entity.entity.parse::<Identifier>() {
				Ok(id) => id,
				Err(e) => {
					log::debug!("skipping spawn entry in biome {}: {}", biome, e);
					continue;
				}
			};

			match registries.entities.creature_type(&id) {
				Some(category) => spawns.entry(category).or_insert_with(Vec::new).push(SpawnEntry::new(
					id,
					entity.spawn_weight,
					entity.minimum_group_count,
					entity.maximum_group_count,
				)),
				None => log::debug!("entity {} in biome {} has no creature type", id, biome),
			}
		}

		let traits: Vec<TraitSlot> =
			document.traits.into_iter().map(|raw| resolve_trait(&biome, raw, registries.traits)).collect();

		let sub_biomes = if document.is_sub_biome {
			Vec::new()
		} else {
			resolve_sub_biomes(&biome, &document.sub_biomes, registries)
		};

		log::debug!(
			"loaded biome {} with {} entities, {} of {} traits and {} sub biomes",
			biome,
			entities.len(),
			traits.iter().filter(|slot| matches!(slot, TraitSlot::Configured(_))).count(),
			traits.len(),
			sub_biomes.len()
		);

		Ok(BiomeConfigEntry {
			biome,
			weight: document.biome_generation_weight,
			flags,
			blocks,
			entities,
			spawns,
			traits,
			sub_biome_names: document.sub_biomes,
			sub_biomes,
		})
	}

	/// The reconciled document, rebuilt from the live state. Disabled entries are included.
	pub fn document(&self) -> BiomeDocument {
		BiomeDocument {
			biome: self.biome.to_string(),
			biome_generation_weight: self.weight,
			is_sub_biome: self.is_sub_biome(),
			generate_biome: self.is_enabled(),
			generate_default_biome_features: self.should_generate_default_features(),
			blocks: self.blocks.iter().map(|(role, state)| (role.clone(), state.to_string())).collect(),
			entities: self.entities.clone(),
			traits: self
				.traits
				.iter()
				.map(|slot| match slot {
					TraitSlot::Configured(configured) => configured.to_config(),
					TraitSlot::Unresolved(raw) => raw.clone(),
				})
				.collect(),
			sub_biomes: self.sub_biome_names.clone(),
		}
	}

	pub fn save(&self) -> Config {
		self.document().to_config()
	}

	pub fn biome(&self) -> &Identifier {
		&self.biome
	}

	pub fn weight(&self) -> u32 {
		self.weight
	}

	pub fn flags(&self) -> BiomeFlags {
		self.flags
	}

	pub fn is_enabled(&self) -> bool {
		self.flags.contains(BiomeFlags::ENABLED)
	}

	pub fn should_generate_default_features(&self) -> bool {
		self.flags.contains(BiomeFlags::GENERATE_DEFAULT_FEATURES)
	}

	pub fn is_sub_biome(&self) -> bool {
		self.flags.contains(BiomeFlags::SUB_BIOME)
	}

	pub fn block(&self, role: &str) -> Option<&BlockState> {
		self.blocks.get(role)
	}

	/// Looks up a block role, storing `fallback` under it when it has no entry yet.
	/// The stored block is part of the saved document from then on.
	pub fn block_or_insert(&mut self, role: &str, fallback: BlockState) -> &BlockState {
		self.blocks.entry(role.to_string()).or_insert_with(|| {
			log::debug!("materializing block role {} as {}", role, fallback);
			fallback
		})
	}

	pub fn blocks(&self) -> &BTreeMap<String, BlockState> {
		&self.blocks
	}

	/// Features that run in `stage`, in document order. Empty while the biome is disabled.
	pub fn features(&self, stage: GenerationStage) -> impl Iterator<Item = &dyn Feature> {
		let enabled = self.is_enabled();

		self.traits.iter().filter_map(move |slot| match slot {
			TraitSlot::Configured(configured) if enabled && configured.generate && configured.stage == stage => {
				Some(&*configured.feature)
			}
			_ => None,
		})
	}

	/// Every trait entry that resolved to a feature, enabled or not.
	pub fn configured_traits(&self) -> impl Iterator<Item = &ConfiguredTrait> {
		self.traits.iter().filter_map(|slot| match slot {
			TraitSlot::Configured(configured) => Some(configured),
			TraitSlot::Unresolved(_) => None,
		})
	}

	pub fn spawnable_mobs(&self, category: CreatureType) -> &[SpawnEntry] {
		self.spawns.get(&category).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Resolved sub biomes. Always empty for a sub biome.
	pub fn sub_biomes(&self) -> &[Identifier] {
		&self.sub_biomes
	}

	/// Runs every feature of `stage` over the chunk at `origin`, returning the number of placements.
	pub fn decorate(&self, stage: GenerationStage, world: &mut dyn World, rng: &mut Random, origin: BlockPos) -> u32 {
		self.features(stage).map(|feature| Dispatcher::new(feature).generate(world, rng, origin)).sum()
	}
}

fn reconcile_blocks(biome: &Identifier, raw: BTreeMap<String, String>, native: &NativeBiome) -> BTreeMap<String, BlockState> {
	let mut blocks = BTreeMap::new();

	for (role, state) in raw {
		match state.parse::<BlockState>() {
			Ok(state) => {
				blocks.insert(role, state);
			}
			Err(e) => log::warn!("dropping block role {} of biome {}: {}", role, biome, e),
		}
	}

	blocks.entry(TOP_BLOCK.to_string()).or_insert_with(|| native.top_block.clone());
	blocks.entry(FILLER_BLOCK.to_string()).or_insert_with(|| native.filler_block.clone());

	blocks
}

/// Persisted entries keep their order, matched or not. Each native spawn that no entry names is
/// appended as an enabled entry with the native values.
fn reconcile_entities(persisted: Vec<EntityDocument>, native: &NativeBiome) -> Vec<EntityDocument> {
	let mut entities = persisted;

	for &category in CreatureType::ALL.iter() {
		for spawn in native.spawns(category) {
			if entities.iter().any(|entity| spawn.entity.matches(&entity.entity)) {
				continue;
			}

			entities.push(EntityDocument {
				entity: spawn.entity.to_string(),
				spawn_weight: spawn.weight,
				minimum_group_count: spawn.min_group,
				maximum_group_count: spawn.max_group,
				spawn: true,
			});
		}
	}

	entities
}

fn resolve_trait(biome: &Identifier, raw: Config, registry: &TraitRegistry) -> TraitSlot {
	let document = match TraitDocument::parse(&raw) {
		Some(document) => document,
		None => {
			log::warn!("trait entry without a trait name in biome {}", biome);
			return TraitSlot::Unresolved(raw);
		}
	};

	let name = match document.name.parse::<Identifier>() {
		Ok(name) => name,
		Err(e) => {
			log::warn!("invalid trait name in biome {}: {}", biome, e);
			return TraitSlot::Unresolved(raw);
		}
	};

	if !registry.contains(&name) {
		log::warn!("unknown trait {} in biome {}", name, biome);
		return TraitSlot::Unresolved(raw);
	}

	match registry.create(&name, &document.params) {
		Some(feature) => TraitSlot::Configured(ConfiguredTrait {
			name,
			stage: document.generation_stage,
			generate: document.generate,
			feature,
		}),
		None => TraitSlot::Unresolved(raw),
	}
}

fn resolve_sub_biomes(biome: &Identifier, names: &[String], registries: Registries<'_>) -> Vec<Identifier> {
	let mut resolved = Vec::new();

	for name in names {
		match name.parse::<Identifier>() {
			Ok(ref id) if id == biome => log::debug!("biome {} lists itself as a sub biome", biome),
			Ok(id) => {
				if registries.biomes.biome(&id).is_some() {
					resolved.push(id);
				} else {
					log::debug!("unknown sub biome {} of biome {}", id, biome);
				}
			}
			Err(e) => log::debug!("invalid sub biome of biome {}: {}", biome, e),
		}
	}

	resolved
}
