use crate::placement::Placement;
use crate::{to_config, Config, Feature, FeatureKind, FeatureSettings};
use java_rand::Random;
use lex_base::{BlockPos, BlockState, UpdateFlags, World};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBlock {
	/// Offset from the anchor, as `[x, y, z]`.
	pub offset: [i32; 3],
	pub block: BlockState,
}

impl TemplateBlock {
	/// Offset after `turns` clockwise quarter turns around the anchor column.
	fn rotated(&self, turns: i32) -> (i32, i32, i32) {
		let [mut x, y, mut z] = self.offset;

		for _ in 0..turns {
			let (nx, nz) = (z.wrapping_neg(), x);
			x = nx;
			z = nz;
		}

		(x, y, z)
	}
}

/// Small inline block template, stamped at the anchor when its placement fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
	#[serde(flatten)]
	pub settings: FeatureSettings,
	#[serde(default)]
	pub blocks: Vec<TemplateBlock>,
	#[serde(default)]
	pub placement: Placement,
	#[serde(default)]
	pub randomize_rotation: bool,
}

impl Feature for Structure {
	fn kind(&self) -> FeatureKind {
		FeatureKind::Structure
	}

	fn settings(&self) -> &FeatureSettings {
		&self.settings
	}

	fn to_config(&self) -> Config {
		to_config(self)
	}

	fn generate(&self, world: &mut dyn World, rng: &mut Random, position: BlockPos) -> bool {
		if self.blocks.is_empty() || !self.placement.fits(&*world, position, None) {
			return false;
		}

		let turns = if self.randomize_rotation { rng.next_i32_bound(4) } else { 0 };
		let mut placed = false;

		for template in &self.blocks {
			let (x, y, z) = template.rotated(turns);

			placed |= world.set(
				position.add(x, y, z),
				template.block.clone(),
				UpdateFlags::NOTIFY_NEIGHBORS | UpdateFlags::SEND_TO_CLIENTS,
			);
		}

		placed
	}
}
