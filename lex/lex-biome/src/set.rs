use crate::entry::BiomeConfigEntry;
use crate::Registries;
use fxhash::FxHashMap;
use lex_base::Identifier;
use lex_feature::Config;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// Every configured biome, keyed by biome identity.
#[derive(Debug, Default)]
pub struct BiomeConfigSet {
	entries: FxHashMap<Identifier, BiomeConfigEntry>,
	order: Vec<Identifier>,
}

impl BiomeConfigSet {
	pub fn new() -> Self {
		BiomeConfigSet::default()
	}

	/// Reconciles a batch of documents in parallel. Documents that fail to load are logged and
	/// skipped, as are later documents for a biome that already loaded.
	pub fn load_all(documents: Vec<Config>, registries: Registries<'_>) -> Self {
		let loaded: Vec<_> =
			documents.into_par_iter().map(|document| BiomeConfigEntry::load(document, registries)).collect();

		let mut set = BiomeConfigSet::new();

		for result in loaded {
			match result {
				Ok(entry) => {
					set.insert(entry);
				}
				Err(e) => log::warn!("skipping biome config: {}", e),
			}
		}

		log::info!("loaded {} biome configs", set.len());

		set
	}

	/// Adds an entry, unless its biome already has one. Returns whether it was added.
	pub fn insert(&mut self, entry: BiomeConfigEntry) -> bool {
		if self.entries.contains_key(entry.biome()) {
			log::warn!("duplicate config for biome {}, keeping the first", entry.biome());
			return false;
		}

		self.order.push(entry.biome().clone());
		self.entries.insert(entry.biome().clone(), entry);

		true
	}

	pub fn get(&self, biome: &Identifier) -> Option<&BiomeConfigEntry> {
		self.entries.get(biome)
	}

	pub fn get_mut(&mut self, biome: &Identifier) -> Option<&mut BiomeConfigEntry> {
		self.entries.get_mut(biome)
	}

	/// Entries in load order.
	pub fn iter(&self) -> impl Iterator<Item = &BiomeConfigEntry> {
		self.order.iter().filter_map(move |biome| self.entries.get(biome))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The configured sub biomes of `entry` that are part of this set.
	pub fn sub_biomes<'s>(&'s self, entry: &'s BiomeConfigEntry) -> impl Iterator<Item = &'s BiomeConfigEntry> {
		entry.sub_biomes().iter().filter_map(move |biome| self.entries.get(biome))
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::document::blank;
	use crate::host::{BiomeRegistry, CreatureType, EntityRegistry, NativeBiome};
	use lex_base::BlockState;
	use lex_feature::TraitRegistry;
	use serde_json::{json, Value};

	fn id(s: &str) -> Identifier {
		s.parse().unwrap()
	}

	fn native(name: &str) -> (Identifier, NativeBiome) {
		let stone: BlockState = "minecraft:stone".parse().unwrap();
		(id(name), NativeBiome::new(id(name), stone.clone(), stone))
	}

	#[test]
	fn test_load_all() {
		let traits = TraitRegistry::with_defaults();
		let biomes: FxHashMap<Identifier, NativeBiome> =
			vec![native("minecraft:hell"), native("nether:crimson"), native("nether:warped")].into_iter().collect();
		let entities: FxHashMap<Identifier, CreatureType> = FxHashMap::default();

		let registries = Registries {
			traits: &traits,
			biomes: &biomes as &dyn BiomeRegistry,
			entities: &entities as &dyn EntityRegistry,
		};

		let mut hell = blank(&id("minecraft:hell"));
		hell.insert("subBiomes".to_string(), json!(["nether:crimson", "nether:warped"]));

		let mut duplicate = blank(&id("minecraft:hell"));
		duplicate.insert("biomeGenerationWeight".to_string(), json!(99));

		let unknown = blank(&id("minecraft:the_end"));

		let mut crimson = blank(&id("nether:crimson"));
		crimson.insert("isSubBiome".to_string(), Value::Bool(true));

		let set = BiomeConfigSet::load_all(vec![hell, duplicate, unknown, crimson], registries);

		assert_eq!(set.len(), 2);

		let names: Vec<String> = set.iter().map(|entry| entry.biome().to_string()).collect();
		assert_eq!(names, ["minecraft:hell", "nether:crimson"]);

		let hell = set.get(&id("minecraft:hell")).unwrap();
		assert_eq!(hell.weight(), 10);
		assert_eq!(hell.sub_biomes().len(), 2);

		// Warped resolves as a biome but has no config in the set.
		let subs: Vec<&Identifier> = set.sub_biomes(hell).map(BiomeConfigEntry::biome).collect();
		assert_eq!(subs, [&id("nether:crimson")]);
	}
}
