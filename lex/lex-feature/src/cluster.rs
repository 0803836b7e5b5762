use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use java_rand::Random;
use lex_base::{Axis, BlockPos, BlockState, Facing, UpdateFlags, World};
use serde::{Deserialize, Serialize};

const TRIALS: u32 = 1500;

/// Thin vein-like growth hanging off a block face, like glowstone under a nether ceiling.
///
/// Growth extends up to 11 blocks along `direction` and up to 7 blocks sideways. A candidate
/// only grows when it touches exactly one already placed block, which keeps the shape stringy
/// instead of filling a blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	pub block_to_spawn: Option<BlockState>,
	pub block_to_attach_to: Option<BlockState>,
	pub direction: Option<Facing>,
}

impl Cluster {
	fn trial_offset(rng: &mut Random, direction: Facing) -> (i32, i32, i32) {
		let mut component = |axis: Axis| {
			if axis == direction.axis() {
				let reach = rng.next_i32_bound(12);

				if direction.positive() { reach } else { -reach }
			} else {
				rng.next_i32_bound(8) - rng.next_i32_bound(8)
			}
		};

		(component(Axis::X), component(Axis::Y), component(Axis::Z))
	}

	fn touches_once(world: &dyn World, position: BlockPos, spawn: &BlockState) -> bool {
		let mut adjacent = 0;

		for &facing in Facing::ALL.iter() {
			if world.get(position.offset(facing)).block() == spawn.block() {
				adjacent += 1;

				if adjacent > 1 {
					break;
				}
			}
		}

		adjacent == 1
	}
}

impl Feature for Cluster {
	fn kind(&self) -> FeatureKind {
		FeatureKind::Cluster
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool {
		let (spawn, attach, direction) = match (&self.block_to_spawn, &self.block_to_attach_to, self.direction) {
			(Some(spawn), Some(attach), Some(direction)) => (spawn, attach, direction),
			_ => return false,
		};

		if !world.is_air(position) || world.get(position.offset(direction.opposite())) != attach {
			return false;
		}

		let flags = UpdateFlags::NOTIFY_NEIGHBORS | UpdateFlags::SEND_TO_CLIENTS;

		if !world.set(position, spawn.clone(), flags) {
			return false;
		}

		for _ in 0..TRIALS {
			let (x, y, z) = Cluster::trial_offset(rng, direction);
			let candidate = position.add(x, y, z);

			if world.is_air(candidate) && Cluster::touches_once(&*world, candidate, spawn) {
				world.set(candidate, spawn.clone(), flags);
			}
		}

		true
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use lex_base::SparseWorld;

	fn glowstone() -> Cluster {
		Cluster {
			settings: FeatureSettings::default(),
			block_to_spawn: Some("minecraft:glowstone".parse().unwrap()),
			block_to_attach_to: Some("minecraft:netherrack".parse().unwrap()),
			direction: Some(Facing::Down),
		}
	}

	fn ceiling() -> SparseWorld {
		let mut world = SparseWorld::default();
		world.fill(BlockPos::new(-16, 65, -16), BlockPos::new(16, 70, 16), &"minecraft:netherrack".parse().unwrap());
		world
	}

	#[test]
	fn test_missing_parameter() {
		let mut world = ceiling();
		let cluster = Cluster { direction: None, ..glowstone() };

		assert!(!cluster.generate(&mut world, &mut Random::new(0), BlockPos::new(0, 64, 0)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_anchor_not_air() {
		let mut world = ceiling();

		assert!(!glowstone().generate(&mut world, &mut Random::new(0), BlockPos::new(0, 66, 0)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_anchor_not_attached() {
		let mut world = ceiling();

		// Nothing above y = 50, so nothing to hang from.
		assert!(!glowstone().generate(&mut world, &mut Random::new(0), BlockPos::new(0, 50, 0)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_deterministic_growth() {
		let glowstone_state: BlockState = "minecraft:glowstone".parse().unwrap();
		let anchor = BlockPos::new(0, 64, 0);

		let mut first = ceiling();
		let mut second = ceiling();

		assert!(glowstone().generate(&mut first, &mut Random::new(1234), anchor));
		assert!(glowstone().generate(&mut second, &mut Random::new(1234), anchor));

		let placed = first.count(&glowstone_state);

		assert!(placed > 1);
		assert_eq!(placed, second.count(&glowstone_state));
		assert_eq!(first.get(anchor), &glowstone_state);

		// Growth only ever extends downwards from the ceiling.
		for (position, state) in first.blocks() {
			if state == &glowstone_state {
				assert!(position.y() <= anchor.y() && position.y() > anchor.y() - 12);
			}
		}
	}

	#[test]
	fn test_config_roundtrip_keeps_nulls() {
		let cluster = Cluster { block_to_attach_to: None, ..glowstone() };
		let config = cluster.to_config();

		assert_eq!(config.get("blockToAttachTo"), Some(&serde_json::Value::Null));
		assert_eq!(config.get("direction"), Some(&serde_json::json!("down")));
		assert_eq!(config.get("generationAttempts"), Some(&serde_json::json!(4)));

		let parsed: Cluster = crate::parse(FeatureKind::Cluster, &config).unwrap();
		assert_eq!(parsed, cluster);
	}
}
