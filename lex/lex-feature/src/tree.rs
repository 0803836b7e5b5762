use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use java_rand::Random;
use lex_base::matcher::BlockMatcher;
use lex_base::{BlockPos, BlockState, UpdateFlags, World};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

const FOLIAGE_LAYERS_ON_TRUNK: i32 = 3;
const FOLIAGE_LAYERS_OFF_TRUNK: i32 = 1;
const FOLIAGE_SLOPE: i32 = 2;
const FOLIAGE_RADIUS_BASE: i32 = 1;
const FOLIAGE_CORNER_CHANCE: u32 = 2;

fn default_log() -> BlockState {
	BlockState::vanilla("log")
}

fn default_leaves() -> BlockState {
	BlockState::vanilla("leaves")
}

fn default_soil() -> BlockMatcher {
	BlockMatcher::include(&[
		BlockState::vanilla("grass"),
		BlockState::vanilla("dirt"),
	])
}

fn default_new_soil() -> BlockState {
	BlockState::vanilla("dirt")
}

fn default_min_trunk_height() -> u32 {
	4
}

fn default_add_trunk_height() -> u32 {
	2
}

/// Small round-topped tree: a straight trunk under a few layers of foliage that shrink upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OakTree {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	#[serde(default = "default_log")]
	pub log_block: BlockState,
	#[serde(default = "default_leaves")]
	pub leaf_block: BlockState,
	#[serde(default = "default_soil")]
	pub soil: BlockMatcher,
	#[serde(default = "default_new_soil")]
	pub new_soil: BlockState,
	#[serde(default = "default_min_trunk_height")]
	pub minimum_trunk_height: u32,
	#[serde(default = "default_add_trunk_height")]
	pub additional_trunk_height: u32,
}

impl OakTree {
	/// Rolls the trunk of a tree rooted at `origin_y`, with trunk parameters capped at `limit`.
	fn tree(&self, rng: &mut Random, origin_y: i32, limit: i32) -> Tree {
		let cap = u32::try_from(limit).unwrap_or(0);
		let minimum = self.minimum_trunk_height.min(cap);
		let additional = self.additional_trunk_height.min(cap);

		let trunk_height = minimum.saturating_add(rng.next_u32_bound(additional.saturating_add(1)));
		let trunk_top = origin_y.saturating_add(i32::try_from(trunk_height).unwrap_or(i32::MAX));

		Tree {
			trunk_top,
			leaves_min_y: trunk_top.saturating_sub(FOLIAGE_LAYERS_ON_TRUNK),
			leaves_max_y: trunk_top.saturating_add(FOLIAGE_LAYERS_OFF_TRUNK),
		}
	}

	/// Blocks that foliage and trunk may overwrite.
	fn replaceable(&self, world: &dyn World, position: BlockPos) -> bool {
		world.is_air(position) || world.get(position) == &self.leaf_block
	}

	fn place_layer(&self, world: &mut dyn World, rng: &mut Random, center: BlockPos, radius: i32, tree: &Tree) {
		for dz in -radius..=radius {
			for dx in -radius..=radius {
				if dz.abs() == radius && dx.abs() == radius {
					// Corners are rolled even when they end up rejected by height.
					if !(rng.next_u32_bound(FOLIAGE_CORNER_CHANCE) != 0 && center.y() < tree.trunk_top) {
						continue;
					}
				}

				let at = center.add(dx, 0, dz);

				if self.replaceable(&*world, at) {
					world.set(at, self.leaf_block.clone(), UpdateFlags::SEND_TO_CLIENTS);
				}
			}
		}
	}
}

impl Default for OakTree {
	fn default() -> Self {
		OakTree {
			settings: FeatureSettings::default(),
			log_block: default_log(),
			leaf_block: default_leaves(),
			soil: default_soil(),
			new_soil: default_new_soil(),
			minimum_trunk_height: default_min_trunk_height(),
			additional_trunk_height: default_add_trunk_height(),
		}
	}
}

impl Feature for OakTree {
	fn kind(&self) -> FeatureKind {
		FeatureKind::OakTree
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool {
		if position.y() < 1 || position.y() >= world.height_limit() {
			return false;
		}

		let tree = self.tree(rng, position.y(), world.height_limit());

		if tree.leaves_max_y > world.height_limit() {
			return false;
		}

		let below = position.down(1);

		if !self.soil.matches(world.get(below)) {
			return false;
		}

		for y in position.y()..tree.trunk_top {
			if !self.replaceable(&*world, BlockPos::new(position.x(), y, position.z())) {
				return false;
			}
		}

		world.set(below, self.new_soil.clone(), UpdateFlags::SEND_TO_CLIENTS);

		for y in tree.leaves_min_y..tree.leaves_max_y {
			let center = BlockPos::new(position.x(), y, position.z());

			self.place_layer(world, rng, center, tree.foliage_radius(y), &tree);
		}

		for y in position.y()..tree.trunk_top {
			let at = BlockPos::new(position.x(), y, position.z());

			if self.replaceable(&*world, at) {
				world.set(at, self.log_block.clone(), UpdateFlags::SEND_TO_CLIENTS);
			}
		}

		true
	}
}

struct Tree {
	/// Coordinates of the block above the last block of the trunk.
	trunk_top: i32,
	/// Minimum Y value for foliage layers (Inclusive).
	leaves_min_y: i32,
	/// Maximum Y value for foliage layers (Exclusive).
	leaves_max_y: i32,
}

impl Tree {
	/// Radius of the foliage at a given layer. 0 is just the trunk.
	fn foliage_radius(&self, y: i32) -> i32 {
		(FOLIAGE_RADIUS_BASE + self.trunk_top + 1 - y) / FOLIAGE_SLOPE
	}
}
