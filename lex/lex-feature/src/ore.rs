use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use java_rand::Random;
use lex_base::{BlockPos, BlockState, UpdateFlags, World};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

fn default_vein_size() -> u32 {
	8
}

/// Ore vein: a chain of blobs along a random horizontal line through the anchor, replacing
/// only `block_to_replace`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ore {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	pub block_to_spawn: Option<BlockState>,
	pub block_to_replace: Option<BlockState>,
	#[serde(default = "default_vein_size")]
	pub vein_size: u32,
}

impl Feature for Ore {
	fn kind(&self) -> FeatureKind {
		FeatureKind::Ore
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool {
		let (ore, replace) = match (&self.block_to_spawn, &self.block_to_replace) {
			(Some(ore), Some(replace)) => (ore, replace),
			_ => return false,
		};

		let size = self.vein_size as f64;
		let angle = rng.next_f32() * PI;
		let (sin, cos) = (angle.sin() as f64 * size / 8.0, angle.cos() as f64 * size / 8.0);

		let (x, y, z) = (position.x() as f64, position.y() as f64, position.z() as f64);
		let (start_x, end_x) = (x + sin, x - sin);
		let (start_z, end_z) = (z + cos, z - cos);
		let start_y = y + rng.next_i32_bound(3) as f64 - 2.0;
		let end_y = y + rng.next_i32_bound(3) as f64 - 2.0;

		let mut placed = false;

		for step in 0..self.vein_size {
			let progress = step as f64 / size;

			let center_x = start_x + (end_x - start_x) * progress;
			let center_y = start_y + (end_y - start_y) * progress;
			let center_z = start_z + (end_z - start_z) * progress;

			let scale = rng.next_f64() * size / 16.0;
			let diameter = ((std::f64::consts::PI * progress).sin() + 1.0) * scale + 1.0;
			let radius = diameter / 2.0;

			let min = BlockPos::new(
				(center_x - radius).floor() as i32,
				(center_y - radius).floor() as i32,
				(center_z - radius).floor() as i32,
			);
			let max = BlockPos::new(
				(center_x + radius).floor() as i32,
				(center_y + radius).floor() as i32,
				(center_z + radius).floor() as i32,
			);

			for bx in min.x()..=max.x() {
				let dx = (bx as f64 + 0.5 - center_x) / radius;

				if dx * dx >= 1.0 {
					continue;
				}

				for by in min.y()..=max.y() {
					let dy = (by as f64 + 0.5 - center_y) / radius;

					if dx * dx + dy * dy >= 1.0 {
						continue;
					}

					for bz in min.z()..=max.z() {
						let dz = (bz as f64 + 0.5 - center_z) / radius;
						let at = BlockPos::new(bx, by, bz);

						if dx * dx + dy * dy + dz * dz < 1.0 && world.get(at) == replace {
							placed |= world.set(at, ore.clone(), UpdateFlags::SEND_TO_CLIENTS);
						}
					}
				}
			}
		}

		placed
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use lex_base::SparseWorld;

	fn quartz() -> Ore {
		Ore {
			settings: FeatureSettings::default(),
			block_to_spawn: Some("minecraft:quartz_ore".parse().unwrap()),
			block_to_replace: Some("minecraft:netherrack".parse().unwrap()),
			vein_size: 14,
		}
	}

	#[test]
	fn test_replaces_only_target() {
		let netherrack: BlockState = "minecraft:netherrack".parse().unwrap();
		let quartz_ore: BlockState = "minecraft:quartz_ore".parse().unwrap();
		let mut world = SparseWorld::default();

		// Lower half netherrack, upper half air: the vein only lands in the lower half.
		world.fill(BlockPos::new(-16, 0, -16), BlockPos::new(16, 40, 16), &netherrack);

		assert!(quartz().generate(&mut world, &mut Random::new(42), BlockPos::new(0, 40, 0)));

		let placed = world.count(&quartz_ore);
		assert!(placed > 0);
		assert_eq!(world.writes(), placed);

		for (position, state) in world.blocks() {
			if state == &quartz_ore {
				assert!(position.y() <= 40);
			}
		}
	}

	#[test]
	fn test_wrong_host_rock() {
		let mut world = SparseWorld::default();
		world.fill(BlockPos::new(-16, 0, -16), BlockPos::new(16, 40, 16), &"minecraft:stone".parse().unwrap());

		assert!(!quartz().generate(&mut world, &mut Random::new(42), BlockPos::new(0, 20, 0)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_default_vein_size() {
		let ore: Ore = crate::parse(FeatureKind::Ore, &Config::new()).unwrap();

		assert_eq!(ore.vein_size, 8);
		assert_eq!(ore.block_to_spawn, None);
		assert!(!ore.generate(&mut SparseWorld::default(), &mut Random::new(0), BlockPos::new(0, 0, 0)));
	}

	#[test]
	fn test_config_roundtrip() {
		let ore = Ore { settings: FeatureSettings { generation_attempts: 2, generation_probability: 0.25, randomize_generation_attempts: true, minimum_generation_height: 20, maximum_generation_height: 90 }, vein_size: 3, ..quartz() };
		let config = ore.to_config();

		assert_eq!(config.get("veinSize"), Some(&serde_json::json!(3)));

		let parsed: Ore = crate::parse(FeatureKind::Ore, &config).unwrap();
		assert_eq!(parsed, ore);
	}
}
