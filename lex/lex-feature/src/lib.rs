#![forbid(unsafe_code)]

//! Configurable world generation features.
//!
//! A feature is a single placement procedure: given a world, a random source and an anchor
//! position it tries to place one instance of itself, and reports whether anything changed.
//! Features are built from JSON config objects through a `TraitRegistry`, and write themselves
//! back to the same shape with `Feature::to_config`.

use java_rand::Random;
use lex_base::{BlockPos, World};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

pub mod cluster;
pub mod dispatch;
pub mod fluid;
pub mod mushroom;
pub mod ore;
pub mod placement;
pub mod pool;
pub mod registry;
pub mod scatter;
pub mod settings;
pub mod structure;
pub mod tree;

pub use dispatch::Dispatcher;
pub use registry::{FeatureFactory, FeatureKind, TraitRegistry};
pub use settings::FeatureSettings;

/// A config document object, as stored in biome files.
pub type Config = serde_json::Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
	#[error("invalid {kind} config: {source}")]
	Invalid {
		kind: FeatureKind,
		#[source]
		source: serde_json::Error,
	},
	#[error("no built-in constructor for {0}")]
	Unsupported(FeatureKind),
}

pub trait Feature: Debug + Send + Sync {
	fn kind(&self) -> FeatureKind;

	fn settings(&self) -> &FeatureSettings;

	/// Writes every parameter that construction reads, unset ones included.
	fn to_config(&self) -> Config;

	/// Attempts a single placement anchored at `position`. Returns whether the world was modified.
	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool;
}

pub(crate) fn parse<F>(kind: FeatureKind, config: &Config) -> Result<F, FeatureError>
where
	F: DeserializeOwned,
{
	serde_json::from_value(Value::Object(config.clone())).map_err(|source| FeatureError::Invalid { kind, source })
}

pub(crate) fn to_config<F>(feature: &F) -> Config
where
	F: Feature + Serialize,
{
	match serde_json::to_value(feature) {
		Ok(Value::Object(config)) => config,
		Ok(other) => {
			log::error!("{} feature serialized to a non-object value: {}", feature.kind(), other);
			Config::new()
		}
		Err(e) => {
			log::error!("failed to serialize {} feature: {}", feature.kind(), e);
			Config::new()
		}
	}
}
