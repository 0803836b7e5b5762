use crate::cluster::Cluster;
use crate::fluid::Fluid;
use crate::mushroom::BigMushroom;
use crate::ore::Ore;
use crate::pool::Pool;
use crate::scatter::Scatter;
use crate::structure::Structure;
use crate::tree::OakTree;
use crate::{parse, Config, Feature, FeatureError};
use fxhash::FxHashMap;
use lex_base::Identifier;
use std::fmt::{self, Display, Formatter};

/// Namespace the built-in features are registered under.
pub const NAMESPACE: &str = "libraryex";

/// Type tag of a feature implementation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FeatureKind {
	Scatter,
	Cluster,
	Fluid,
	Ore,
	Pool,
	BigMushroom,
	OakTree,
	Structure,
	/// A feature supplied by the host through its own `FeatureFactory`.
	Custom(&'static str),
}

impl FeatureKind {
	pub const BUILTIN: [FeatureKind; 8] = [
		FeatureKind::Scatter,
		FeatureKind::Cluster,
		FeatureKind::Fluid,
		FeatureKind::Ore,
		FeatureKind::Pool,
		FeatureKind::BigMushroom,
		FeatureKind::OakTree,
		FeatureKind::Structure,
	];

	pub fn name(self) -> &'static str {
		match self {
			FeatureKind::Scatter     => "scatter",
			FeatureKind::Cluster     => "cluster",
			FeatureKind::Fluid       => "fluid",
			FeatureKind::Ore         => "ore",
			FeatureKind::Pool        => "pool",
			FeatureKind::BigMushroom => "big_mushroom",
			FeatureKind::OakTree     => "oak_tree",
			FeatureKind::Structure   => "structure",
			FeatureKind::Custom(name) => name,
		}
	}

	/// Typed constructor for the built-in kinds.
	pub fn construct(self, config: &Config) -> Result<Box<dyn Feature>, FeatureError> {
		Ok(match self {
			FeatureKind::Scatter     => Box::new(parse::<Scatter>(self, config)?),
			FeatureKind::Cluster     => Box::new(parse::<Cluster>(self, config)?),
			FeatureKind::Fluid       => Box::new(parse::<Fluid>(self, config)?),
			FeatureKind::Ore         => Box::new(parse::<Ore>(self, config)?),
			FeatureKind::Pool        => Box::new(parse::<Pool>(self, config)?),
			FeatureKind::BigMushroom => Box::new(parse::<BigMushroom>(self, config)?),
			FeatureKind::OakTree     => Box::new(parse::<OakTree>(self, config)?),
			FeatureKind::Structure   => Box::new(parse::<Structure>(self, config)?),
			FeatureKind::Custom(_)   => return Err(FeatureError::Unsupported(self)),
		})
	}
}

impl Display for FeatureKind {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

pub trait FeatureFactory: Send + Sync {
	fn kind(&self) -> FeatureKind;

	fn configure(&self, config: &Config) -> Result<Box<dyn Feature>, FeatureError>;
}

impl FeatureFactory for FeatureKind {
	fn kind(&self) -> FeatureKind {
		*self
	}

	fn configure(&self, config: &Config) -> Result<Box<dyn Feature>, FeatureError> {
		self.construct(config)
	}
}

/// Maps trait names found in config documents to the factories that build them.
///
/// Filled once at startup and only read afterwards.
#[derive(Default)]
pub struct TraitRegistry {
	factories: FxHashMap<Identifier, Box<dyn FeatureFactory>>,
	order: Vec<Identifier>,
}

impl TraitRegistry {
	pub fn new() -> Self {
		TraitRegistry::default()
	}

	/// Registry holding every built-in kind under the `libraryex` namespace.
	pub fn with_defaults() -> Self {
		let mut registry = TraitRegistry::new();

		for &kind in FeatureKind::BUILTIN.iter() {
			match Identifier::new(NAMESPACE, kind.name()) {
				Ok(name) => {
					registry.register(name, kind);
				}
				Err(e) => log::error!("built-in feature {} has an invalid name: {}", kind, e),
			}
		}

		registry
	}

	/// Registers a factory. An existing registration under the same name is kept, and
	/// `false` is returned.
	pub fn register<F>(&mut self, name: Identifier, factory: F) -> bool
	where
		F: FeatureFactory + 'static,
	{
		if self.factories.contains_key(&name) {
			log::warn!("A feature with the name {} is already registered", name);
			return false;
		}

		self.order.push(name.clone());
		self.factories.insert(name, Box::new(factory));

		true
	}

	/// Builds a feature from its config. Unknown names and construction failures yield `None`.
	pub fn create(&self, name: &Identifier, config: &Config) -> Option<Box<dyn Feature>> {
		let factory = match self.factories.get(name) {
			Some(factory) => factory,
			None => {
				log::debug!("no feature registered under {}", name);
				return None;
			}
		};

		match factory.configure(config) {
			Ok(feature) => Some(feature),
			Err(e) => {
				log::warn!("failed to construct feature {}: {}", name, e);
				None
			}
		}
	}

	/// First registered name whose factory produces `kind`.
	pub fn reverse_lookup(&self, kind: FeatureKind) -> Option<&Identifier> {
		self.order.iter().find(|name| self.factories.get(*name).map(|factory| factory.kind()) == Some(kind))
	}

	pub fn contains(&self, name: &Identifier) -> bool {
		self.factories.contains_key(name)
	}

	/// Registered names, in registration order.
	pub fn names(&self) -> impl Iterator<Item = &Identifier> {
		self.order.iter()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use serde_json::json;

	fn id(s: &str) -> Identifier {
		s.parse().unwrap()
	}

	fn config(value: serde_json::Value) -> Config {
		match value {
			serde_json::Value::Object(map) => map,
			_ => panic!("not an object"),
		}
	}

	#[test]
	fn test_defaults_registered() {
		let registry = TraitRegistry::with_defaults();

		assert_eq!(registry.names().count(), 8);
		assert!(registry.contains(&id("libraryex:pool")));
		assert!(registry.contains(&id("LibraryEx:Big_Mushroom")));
		assert_eq!(registry.reverse_lookup(FeatureKind::OakTree), Some(&id("libraryex:oak_tree")));
	}

	#[test]
	fn test_duplicate_keeps_first() {
		let mut registry = TraitRegistry::new();

		assert!(registry.register(id("test:thing"), FeatureKind::Cluster));
		assert!(!registry.register(id("test:thing"), FeatureKind::Pool));

		let feature = registry.create(&id("test:thing"), &Config::new()).unwrap();
		assert_eq!(feature.kind(), FeatureKind::Cluster);
	}

	#[test]
	fn test_reverse_lookup_first_match() {
		let mut registry = TraitRegistry::new();

		registry.register(id("test:second_name"), FeatureKind::Ore);
		registry.register(id("test:another"), FeatureKind::Ore);

		assert_eq!(registry.reverse_lookup(FeatureKind::Ore), Some(&id("test:second_name")));
		assert_eq!(registry.reverse_lookup(FeatureKind::Pool), None);
	}

	#[test]
	fn test_create_unknown_or_broken() {
		let registry = TraitRegistry::with_defaults();

		assert!(registry.create(&id("libraryex:volcano"), &Config::new()).is_none());

		let broken = config(json!({ "blockToSpawn": "minecraft:stone[" }));
		assert!(registry.create(&id("libraryex:cluster"), &broken).is_none());

		let wrong_type = config(json!({ "generationAttempts": "many" }));
		assert!(registry.create(&id("libraryex:pool"), &wrong_type).is_none());
	}

	#[test]
	fn test_custom_kind_needs_own_factory() {
		let mut registry = TraitRegistry::new();
		registry.register(id("test:custom"), FeatureKind::Custom("custom"));

		assert!(registry.create(&id("test:custom"), &Config::new()).is_none());
		assert_eq!(registry.reverse_lookup(FeatureKind::Custom("custom")), Some(&id("test:custom")));
	}
}
