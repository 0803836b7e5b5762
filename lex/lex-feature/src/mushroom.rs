use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use java_rand::Random;
use lex_base::{BlockPos, BlockState, UpdateFlags, World};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapShape {
	/// Wide single layer cap, like a brown mushroom.
	Flat,
	/// Dome with hanging sides, like a red mushroom.
	Round,
}

impl Default for CapShape {
	fn default() -> Self {
		CapShape::Round
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigMushroom {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	pub cap_block: Option<BlockState>,
	pub stem_block: Option<BlockState>,
	pub block_to_place_on: Option<BlockState>,
	#[serde(default)]
	pub shape: CapShape,
}

impl BigMushroom {
	fn clear(&self, world: &dyn World, position: BlockPos, height: i32, cap: &BlockState) -> bool {
		for y in position.y()..=position.y() + 1 + height {
			let radius = if y <= position.y() + 3 { 0 } else { 3 };

			for dx in -radius..=radius {
				for dz in -radius..=radius {
					let at = BlockPos::new(position.x() + dx, y, position.z() + dz);

					if !world.is_air(at) && world.get(at) != cap {
						return false;
					}
				}
			}
		}

		true
	}
}

impl Feature for BigMushroom {
	fn kind(&self) -> FeatureKind {
		FeatureKind::BigMushroom
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool {
		let (cap, stem, ground) = match (&self.cap_block, &self.stem_block, &self.block_to_place_on) {
			(Some(cap), Some(stem), Some(ground)) => (cap, stem, ground),
			_ => return false,
		};

		let mut height = rng.next_i32_bound(3) + 4;

		if rng.next_i32_bound(12) == 0 {
			height *= 2;
		}

		if position.y() < 1 || position.y() >= world.height_limit() - height - 1 {
			return false;
		}

		if world.get(position.down(1)) != ground || !self.clear(&*world, position, height, cap) {
			return false;
		}

		let top = position.y() + height;
		let bottom = match self.shape {
			CapShape::Flat => top,
			CapShape::Round => top - 3,
		};

		for y in bottom..=top {
			let radius: i32 = match self.shape {
				CapShape::Flat => 3,
				CapShape::Round if y < top => 2,
				CapShape::Round => 1,
			};

			for dx in -radius..=radius {
				for dz in -radius..=radius {
					let edge_x = dx.abs() == radius;
					let edge_z = dz.abs() == radius;

					if edge_x && edge_z {
						continue;
					}

					// The lower layers of a round cap only form the hanging rim.
					if self.shape == CapShape::Round && y < top && !edge_x && !edge_z {
						continue;
					}

					let at = BlockPos::new(position.x() + dx, y, position.z() + dz);

					if !world.material(at).is_solid() {
						world.set(at, cap.clone(), UpdateFlags::SEND_TO_CLIENTS);
					}
				}
			}
		}

		for dy in 0..height {
			let at = position.up(dy);

			if !world.material(at).is_solid() {
				world.set(at, stem.clone(), UpdateFlags::SEND_TO_CLIENTS);
			}
		}

		true
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use lex_base::SparseWorld;

	fn mushroom(shape: CapShape) -> BigMushroom {
		BigMushroom {
			settings: FeatureSettings::default(),
			cap_block: Some("minecraft:red_mushroom_block".parse().unwrap()),
			stem_block: Some("minecraft:red_mushroom_block[variant=stem]".parse().unwrap()),
			block_to_place_on: Some("minecraft:mycelium".parse().unwrap()),
			shape,
		}
	}

	fn field() -> SparseWorld {
		let mut world = SparseWorld::default();
		world.fill(BlockPos::new(-8, 0, -8), BlockPos::new(8, 9, 8), &"minecraft:mycelium".parse().unwrap());
		world
	}

	#[test]
	fn test_grows_on_ground() {
		let stem: BlockState = "minecraft:red_mushroom_block[variant=stem]".parse().unwrap();
		let cap: BlockState = "minecraft:red_mushroom_block".parse().unwrap();

		for &shape in [CapShape::Flat, CapShape::Round].iter() {
			let mut world = field();

			assert!(mushroom(shape).generate(&mut world, &mut Random::new(21), BlockPos::new(0, 10, 0)));

			let stem_height = world.count(&stem) as i32;
			assert!(stem_height >= 4 && stem_height <= 12);
			assert!(world.count(&cap) > 0);
			assert_eq!(world.get(BlockPos::new(0, 10, 0)), &stem);
		}
	}

	#[test]
	fn test_wrong_ground() {
		let mut world = SparseWorld::default();
		world.fill(BlockPos::new(-8, 0, -8), BlockPos::new(8, 9, 8), &"minecraft:stone".parse().unwrap());

		assert!(!mushroom(CapShape::Flat).generate(&mut world, &mut Random::new(21), BlockPos::new(0, 10, 0)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_obstructed() {
		let mut world = field();
		world.fill(BlockPos::new(2, 14, 0), BlockPos::new(2, 14, 0), &"minecraft:stone".parse().unwrap());

		assert!(!mushroom(CapShape::Round).generate(&mut world, &mut Random::new(21), BlockPos::new(0, 10, 0)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_config_roundtrip() {
		let brown = BigMushroom {
			settings: FeatureSettings { generation_attempts: 2, generation_probability: 0.25, randomize_generation_attempts: true, minimum_generation_height: 20, maximum_generation_height: 90 },
			stem_block: None,
			..mushroom(CapShape::Flat)
		};
		let config = brown.to_config();

		assert_eq!(config.get("shape"), Some(&serde_json::json!("flat")));

		let parsed: BigMushroom = crate::parse(FeatureKind::BigMushroom, &config).unwrap();
		assert_eq!(parsed, brown);
	}

	#[test]
	fn test_anchor_outside_world() {
		let mut world = field();

		for &y in [i32::MIN, -1, 0, 120, i32::MAX].iter() {
			assert!(!mushroom(CapShape::Round).generate(&mut world, &mut Random::new(21), BlockPos::new(0, y, 0)));
		}

		assert_eq!(world.writes(), 0);
	}
}
