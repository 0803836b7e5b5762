use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use bit_vec::BitVec;
use java_rand::Random;
use lex_base::{BlockPos, BlockState, UpdateFlags, World};
use serde::{Deserialize, Serialize};

const WIDTH: i32 = 16;
const HEIGHT: i32 = 8;
/// Cells below this layer are filled, cells at or above it are cleared to air.
const SURFACE: i32 = 4;

/// Irregular lake made of overlapping ellipsoids, lined with a shell block.
///
/// The world is only touched once every boundary cell has been checked, so a rejected
/// placement leaves no trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	pub block_to_spawn: Option<BlockState>,
	pub block_to_surround: Option<BlockState>,
}

/// 16x16x8 occupancy grid, indexed as `(x * 16 + z) * 8 + y`.
struct Space(BitVec);

impl Space {
	fn carve(rng: &mut Random) -> Self {
		let mut space = Space(BitVec::from_elem((WIDTH * WIDTH * HEIGHT) as usize, false));
		let blobs = rng.next_i32_bound(4) + 4;

		for _ in 0..blobs {
			let size_x = rng.next_f64() * 6.0 + 3.0;
			let size_y = rng.next_f64() * 4.0 + 2.0;
			let size_z = rng.next_f64() * 6.0 + 3.0;
			let center_x = rng.next_f64() * (16.0 - size_x - 2.0) + 1.0 + size_x / 2.0;
			let center_y = rng.next_f64() * (8.0 - size_y - 4.0) + 2.0 + size_y / 2.0;
			let center_z = rng.next_f64() * (16.0 - size_z - 2.0) + 1.0 + size_z / 2.0;

			for x in 1..WIDTH - 1 {
				for z in 1..WIDTH - 1 {
					for y in 1..HEIGHT - 1 {
						let dx = (x as f64 - center_x) / (size_x / 2.0);
						let dy = (y as f64 - center_y) / (size_y / 2.0);
						let dz = (z as f64 - center_z) / (size_z / 2.0);

						if dx * dx + dy * dy + dz * dz < 1.0 {
							space.0.set(Space::index(x, z, y), true);
						}
					}
				}
			}
		}

		space
	}

	fn index(x: i32, z: i32, y: i32) -> usize {
		((x * WIDTH + z) * HEIGHT + y) as usize
	}

	fn occupied(&self, x: i32, z: i32, y: i32) -> bool {
		if x < 0 || x >= WIDTH || z < 0 || z >= WIDTH || y < 0 || y >= HEIGHT {
			return false;
		}

		self.0.get(Space::index(x, z, y)).unwrap_or(false)
	}

	/// An empty cell next to an occupied one.
	fn boundary(&self, x: i32, z: i32, y: i32) -> bool {
		!self.occupied(x, z, y)
			&& (self.occupied(x + 1, z, y)
				|| self.occupied(x - 1, z, y)
				|| self.occupied(x, z + 1, y)
				|| self.occupied(x, z - 1, y)
				|| self.occupied(x, z, y + 1)
				|| self.occupied(x, z, y - 1))
	}

	fn cells() -> impl Iterator<Item = (i32, i32, i32)> {
		(0..WIDTH).flat_map(|x| (0..WIDTH).flat_map(move |z| (0..HEIGHT).map(move |y| (x, z, y))))
	}
}

impl Pool {
	fn fits(world: &dyn World, space: &Space, origin: BlockPos, fill: &BlockState) -> bool {
		for (x, z, y) in Space::cells().filter(|&(x, z, y)| space.boundary(x, z, y)) {
			let position = origin.add(x, y, z);
			let material = world.material(position);

			if y >= SURFACE && material.is_liquid() {
				return false;
			}

			if y < SURFACE && !material.is_solid() && world.get(position) != fill {
				return false;
			}
		}

		true
	}
}

impl Feature for Pool {
	fn kind(&self) -> FeatureKind {
		FeatureKind::Pool
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool {
		let (fill, surround) = match (&self.block_to_spawn, &self.block_to_surround) {
			(Some(fill), Some(surround)) => (fill, surround),
			_ => return false,
		};

		let minimum = self.settings.minimum_generation_height.max(0);
		let mut origin = position.add(-8, 0, -8);

		while origin.y() > minimum && world.is_air(origin) {
			origin = origin.down(1);
		}

		if origin.y() <= 4 || origin.y() < minimum {
			return false;
		}

		let origin = origin.down(4);
		let space = Space::carve(rng);

		if !Pool::fits(&*world, &space, origin, fill) {
			return false;
		}

		let air = BlockState::air();

		for (x, z, y) in Space::cells().filter(|&(x, z, y)| space.occupied(x, z, y)) {
			let state = if y >= SURFACE { air.clone() } else { fill.clone() };

			world.set(origin.add(x, y, z), state, UpdateFlags::SEND_TO_CLIENTS);
		}

		// Upper shell cells only get lined half of the time, leaving a rough rim.
		for (x, z, y) in Space::cells() {
			if !space.boundary(x, z, y) {
				continue;
			}

			let position = origin.add(x, y, z);

			if (y < SURFACE || rng.next_i32_bound(2) != 0) && world.material(position).is_solid() {
				world.set(position, surround.clone(), UpdateFlags::SEND_TO_CLIENTS);
			}
		}

		true
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use lex_base::SparseWorld;

	fn lava_pool() -> Pool {
		Pool {
			settings: FeatureSettings::default(),
			block_to_spawn: Some("minecraft:lava".parse().unwrap()),
			block_to_surround: Some("minecraft:magma".parse().unwrap()),
		}
	}

	fn ground(top: i32) -> SparseWorld {
		let mut world = SparseWorld::default();
		world.fill(BlockPos::new(-40, 0, -40), BlockPos::new(40, top, 40), &"minecraft:netherrack".parse().unwrap());
		world
	}

	#[test]
	fn test_fills_solid_ground() {
		let lava: BlockState = "minecraft:lava".parse().unwrap();
		let magma: BlockState = "minecraft:magma".parse().unwrap();
		let mut world = ground(40);

		assert!(lava_pool().generate(&mut world, &mut Random::new(99), BlockPos::new(8, 60, 8)));
		assert!(world.count(&lava) > 0);
		assert!(world.count(&magma) > 0);

		// Everything happens between the 4 layers below the ground top and the 4 above.
		for (position, state) in world.blocks() {
			if state == &lava {
				assert!(position.y() >= 36 && position.y() < 40);
				assert!(position.x() >= 0 && position.x() < 16);
			}
		}
	}

	#[test]
	fn test_rejects_liquid_rim_without_writes() {
		let mut world = ground(40);
		let water: BlockState = "minecraft:water".parse().unwrap();

		// Water just above the ground where the upper half of the pool would open up. The
		// x = 0 and z = 0 edges stay dry so the downward scan still lands on the ground.
		world.fill(BlockPos::new(1, 41, 1), BlockPos::new(15, 43, 15), &water);

		assert!(!lava_pool().generate(&mut world, &mut Random::new(99), BlockPos::new(8, 60, 8)));
		assert_eq!(world.writes(), 0);
		assert_eq!(world.count(&water), 15 * 15 * 3);
	}

	#[test]
	fn test_rejects_floating_lower_half() {
		// A one block thick floor: the lower half of the volume would hang in the air.
		let mut world = SparseWorld::default();
		world.fill(BlockPos::new(-40, 20, -40), BlockPos::new(40, 20, 40), &"minecraft:netherrack".parse().unwrap());

		assert!(!lava_pool().generate(&mut world, &mut Random::new(5), BlockPos::new(8, 60, 8)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_too_low() {
		let mut world = ground(3);

		assert!(!lava_pool().generate(&mut world, &mut Random::new(1), BlockPos::new(8, 60, 8)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_missing_blocks() {
		let mut world = ground(40);
		let pool = Pool { block_to_surround: None, ..lava_pool() };

		assert!(!pool.generate(&mut world, &mut Random::new(1), BlockPos::new(8, 60, 8)));
		assert_eq!(world.writes(), 0);
	}

	#[test]
	fn test_config_roundtrip() {
		let pool = Pool {
			settings: FeatureSettings { generation_attempts: 2, generation_probability: 0.25, randomize_generation_attempts: true, minimum_generation_height: 20, maximum_generation_height: 90 },
			block_to_surround: None,
			..lava_pool()
		};

		let parsed: Pool = crate::parse(FeatureKind::Pool, &pool.to_config()).unwrap();
		assert_eq!(parsed, pool);
	}

	#[test]
	fn test_unbounded_minimum_in_air() {
		let pool = Pool {
			settings: FeatureSettings { minimum_generation_height: i32::MIN, ..FeatureSettings::default() },
			..lava_pool()
		};
		let mut world = SparseWorld::default();

		assert!(!pool.generate(&mut world, &mut Random::new(99), BlockPos::new(8, 64, 8)));
		assert_eq!(world.writes(), 0);
	}
}
