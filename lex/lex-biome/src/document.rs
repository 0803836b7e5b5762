//! Persisted shape of a biome configuration file.
//!
//! Documents are edited by hand, so loading goes through `repair` first: any known key holding
//! a value of the wrong type is overwritten with its default before the map is parsed into the
//! typed schema. Missing keys are left to the schema defaults.

use crate::stage::{self, GenerationStage};
use crate::BiomeError;
use lex_base::Identifier;
use lex_feature::Config;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const DEFAULT_WEIGHT: u32 = 10;
pub const DEFAULT_SPAWN_WEIGHT: u32 = 10;
pub const DEFAULT_MIN_GROUP: u32 = 1;
pub const DEFAULT_MAX_GROUP: u32 = 4;

fn default_weight() -> u32 {
	DEFAULT_WEIGHT
}

fn default_spawn_weight() -> u32 {
	DEFAULT_SPAWN_WEIGHT
}

fn default_min_group() -> u32 {
	DEFAULT_MIN_GROUP
}

fn default_max_group() -> u32 {
	DEFAULT_MAX_GROUP
}

fn enabled() -> bool {
	true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiomeDocument {
	pub biome: String,
	#[serde(default = "default_weight")]
	pub biome_generation_weight: u32,
	#[serde(default)]
	pub is_sub_biome: bool,
	#[serde(default = "enabled")]
	pub generate_biome: bool,
	#[serde(default = "enabled")]
	pub generate_default_biome_features: bool,
	/// Block role to block state string.
	#[serde(default)]
	pub blocks: BTreeMap<String, String>,
	#[serde(default)]
	pub entities: Vec<EntityDocument>,
	/// Kept untyped, since parameters depend on the trait and unresolved entries are written back as-is.
	#[serde(default)]
	pub traits: Vec<Config>,
	#[serde(default)]
	pub sub_biomes: Vec<String>,
}

impl BiomeDocument {
	/// Repairs and parses a raw document.
	pub fn from_config(mut config: Config) -> Result<Self, BiomeError> {
		let biome = match config.get("biome") {
			Some(Value::String(biome)) => biome.clone(),
			_ => return Err(BiomeError::MissingBiome),
		};

		let repairs = repair(&mut config);

		if repairs > 0 {
			log::warn!("repaired {} malformed values in the config of biome {}", repairs, biome);
		}

		serde_json::from_value(Value::Object(config)).map_err(BiomeError::Malformed)
	}

	pub fn to_config(&self) -> Config {
		match serde_json::to_value(self) {
			Ok(Value::Object(config)) => config,
			Ok(_) | Err(_) => {
				log::error!("failed to serialize the config of biome {}", self.biome);
				Config::new()
			}
		}
	}
}

/// An empty document for `biome`, reconciling to its native state.
pub fn blank(biome: &Identifier) -> Config {
	let mut config = Config::new();
	config.insert("biome".to_string(), Value::String(biome.to_string()));
	config
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDocument {
	pub entity: String,
	#[serde(default = "default_spawn_weight")]
	pub spawn_weight: u32,
	#[serde(default = "default_min_group")]
	pub minimum_group_count: u32,
	#[serde(default = "default_max_group")]
	pub maximum_group_count: u32,
	#[serde(default = "enabled")]
	pub spawn: bool,
}

/// The keys of a trait entry that belong to the biome rather than to the feature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitDocument {
	#[serde(rename = "trait")]
	pub name: String,
	#[serde(default, deserialize_with = "stage::lenient")]
	pub generation_stage: GenerationStage,
	#[serde(default = "enabled")]
	pub generate: bool,
	/// Everything else, passed on to the feature constructor.
	#[serde(flatten)]
	pub params: Config,
}

impl TraitDocument {
	pub fn parse(raw: &Config) -> Option<Self> {
		serde_json::from_value(Value::Object(raw.clone())).ok()
	}
}

fn is_u32(value: &Value) -> bool {
	value.as_u64().map_or(false, |n| n <= u64::from(u32::MAX))
}

/// Replaces `key` with `default` when present with a value failing `valid`. Returns whether it did.
fn expect(config: &mut Config, key: &str, valid: fn(&Value) -> bool, default: Value) -> bool {
	match config.get_mut(key) {
		Some(value) if !valid(value) => {
			log::debug!("replacing malformed value {} at {:?} with {}", value, key, default);
			*value = default;
			true
		}
		_ => false,
	}
}

/// Drops the elements of the list at `key` failing `keep`. Returns how many were dropped.
fn retain<F>(config: &mut Config, key: &str, mut keep: F) -> usize
where
	F: FnMut(&mut Value) -> bool,
{
	match config.get_mut(key) {
		Some(Value::Array(list)) => {
			let before = list.len();
			let kept: Vec<Value> = list.drain(..).filter_map(|mut value| if keep(&mut value) { Some(value) } else { None }).collect();

			*list = kept;
			before - list.len()
		}
		_ => 0,
	}
}

/// Overwrites malformed values in a raw biome document with defaults, returning the number of
/// values replaced or dropped.
pub fn repair(config: &mut Config) -> usize {
	let mut repairs = 0;

	repairs += expect(config, "biomeGenerationWeight", is_u32, json!(DEFAULT_WEIGHT)) as usize;
	repairs += expect(config, "isSubBiome", Value::is_boolean, json!(false)) as usize;
	repairs += expect(config, "generateBiome", Value::is_boolean, json!(true)) as usize;
	repairs += expect(config, "generateDefaultBiomeFeatures", Value::is_boolean, json!(true)) as usize;
	repairs += expect(config, "blocks", Value::is_object, json!({})) as usize;
	repairs += expect(config, "entities", Value::is_array, json!([])) as usize;
	repairs += expect(config, "traits", Value::is_array, json!([])) as usize;
	repairs += expect(config, "subBiomes", Value::is_array, json!([])) as usize;

	if let Some(Value::Object(blocks)) = config.get_mut("blocks") {
		let before = blocks.len();
		blocks.retain(|_, state| state.is_string());
		repairs += before - blocks.len();
	}

	let mut nested = 0;

	// Entries without an entity cannot be matched or spawned, so there is nothing to keep.
	repairs += retain(config, "entities", |entity| {
		let entity = match entity.as_object_mut() {
			Some(entity) if entity.get("entity").map_or(false, Value::is_string) => entity,
			_ => return false,
		};

		nested += expect(entity, "spawnWeight", is_u32, json!(DEFAULT_SPAWN_WEIGHT)) as usize;
		nested += expect(entity, "minimumGroupCount", is_u32, json!(DEFAULT_MIN_GROUP)) as usize;
		nested += expect(entity, "maximumGroupCount", is_u32, json!(DEFAULT_MAX_GROUP)) as usize;
		nested += expect(entity, "spawn", Value::is_boolean, json!(true)) as usize;

		true
	});

	repairs += retain(config, "traits", |entry| match entry.as_object_mut() {
		Some(entry) => {
			nested += expect(entry, "generate", Value::is_boolean, json!(true)) as usize;
			true
		}
		None => false,
	});

	repairs += retain(config, "subBiomes", |name| name.is_string());

	repairs + nested
}
