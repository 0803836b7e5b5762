use crate::placement::Placement;
use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use java_rand::Random;
use lex_base::{BlockPos, BlockState, UpdateFlags, World};
use serde::{Deserialize, Serialize};

const ITERATIONS: u32 = 64;
/// Spread on each horizontal axis. Kept at 8 so a clump never leaves the populated area.
const HORIZONTAL: i32 = 8;
const VERTICAL: i32 = 4;

/// Clumped scattering of single blocks around the anchor, such as fire or mushrooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scatter {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	pub block_to_spawn: Option<BlockState>,
	pub block_to_target: Option<BlockState>,
	#[serde(default)]
	pub placement: Placement,
}

impl Feature for Scatter {
	fn kind(&self) -> FeatureKind {
		FeatureKind::Scatter
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool {
		let (spawn, target) = match (&self.block_to_spawn, &self.block_to_target) {
			(Some(spawn), Some(target)) => (spawn, target),
			_ => return false,
		};

		let mut placed = false;

		for _ in 0..ITERATIONS {
			let at = position.add(
				rng.next_i32_bound(HORIZONTAL) - rng.next_i32_bound(HORIZONTAL),
				rng.next_i32_bound(VERTICAL) - rng.next_i32_bound(VERTICAL),
				rng.next_i32_bound(HORIZONTAL) - rng.next_i32_bound(HORIZONTAL),
			);

			if self.placement.fits(&*world, at, Some(target)) {
				placed |= world.set(at, spawn.clone(), UpdateFlags::SEND_TO_CLIENTS);
			}
		}

		placed
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use lex_base::SparseWorld;

	#[test]
	fn test_fire_on_netherrack() {
		let netherrack: BlockState = "minecraft:netherrack".parse().unwrap();
		let fire: BlockState = "minecraft:fire".parse().unwrap();
		let mut world = SparseWorld::default();
		world.fill(BlockPos::new(-10, 0, -10), BlockPos::new(10, 31, 10), &netherrack);

		let scatter = Scatter {
			settings: FeatureSettings::default(),
			block_to_spawn: Some(fire.clone()),
			block_to_target: Some(netherrack.clone()),
			placement: Placement::OnGround,
		};

		assert!(scatter.generate(&mut world, &mut Random::new(7), BlockPos::new(0, 32, 0)));

		for (position, state) in world.blocks() {
			if state == &fire {
				assert_eq!(position.y(), 32);
			}
		}
	}

	#[test]
	fn test_nothing_to_target() {
		let mut world = SparseWorld::default();
		let scatter = Scatter {
			settings: FeatureSettings::default(),
			block_to_spawn: Some("minecraft:fire".parse().unwrap()),
			block_to_target: Some("minecraft:soul_sand".parse().unwrap()),
			placement: Placement::OnGround,
		};

		assert!(!scatter.generate(&mut world, &mut Random::new(7), BlockPos::new(0, 32, 0)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_config_roundtrip() {
		let scatter = Scatter {
			settings: FeatureSettings { generation_attempts: 2, generation_probability: 0.25, randomize_generation_attempts: true, minimum_generation_height: 20, maximum_generation_height: 90 },
			block_to_spawn: Some("minecraft:brown_mushroom".parse().unwrap()),
			block_to_target: None,
			placement: Placement::InRoof,
		};

		let config = scatter.to_config();
		assert_eq!(config.get("placement"), Some(&serde_json::json!("in_roof")));

		let parsed: Scatter = crate::parse(FeatureKind::Scatter, &config).unwrap();
		assert_eq!(parsed, scatter);
	}
}
