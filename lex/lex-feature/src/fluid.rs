use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use java_rand::Random;
use lex_base::{BlockPos, BlockState, Facing, UpdateFlags, World};
use serde::{Deserialize, Serialize};

/// The neighbours that enclose a fluid source; the face above is checked separately.
const ENCLOSING: [Facing; 5] = [Facing::West, Facing::East, Facing::North, Facing::South, Facing::Down];

/// Single fluid source set into a wall of `block_to_target`, like lava springs in the nether.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fluid {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	pub block_to_spawn: Option<BlockState>,
	pub block_to_target: Option<BlockState>,
	/// Only place sources that are fully enclosed, with no open face for the fluid to flow out of.
	#[serde(default)]
	pub hidden: bool,
}

impl Feature for Fluid {
	fn kind(&self) -> FeatureKind {
		FeatureKind::Fluid
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, _: &mut Random, position: BlockPos) -> bool {
		let (fluid, target) = match (&self.block_to_spawn, &self.block_to_target) {
			(Some(fluid), Some(target)) => (fluid, target),
			_ => return false,
		};

		if world.get(position.up(1)) != target {
			return false;
		}

		if !world.is_air(position) && world.get(position) != target {
			return false;
		}

		let mut enclosed = 0;
		let mut open = 0;

		for &facing in ENCLOSING.iter() {
			let neighbour = position.offset(facing);

			if world.get(neighbour) == target {
				enclosed += 1;
			} else if world.is_air(neighbour) {
				open += 1;
			}
		}

		if (!self.hidden && enclosed == 4 && open == 1) || enclosed == 5 {
			return world.set(position, fluid.clone(), UpdateFlags::SEND_TO_CLIENTS);
		}

		false
	}
}
