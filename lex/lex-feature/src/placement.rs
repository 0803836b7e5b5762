use lex_base::{BlockPos, BlockState, World};
use serde::{Deserialize, Serialize};

/// Where a placed block sits relative to the surface it needs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
	/// In air, on top of the surface.
	OnGround,
	/// Replacing the top surface block, with air above.
	InGround,
	/// In air, hanging below a ceiling.
	OnRoof,
	/// Replacing the bottom ceiling block, with air below.
	InRoof,
}

impl Placement {
	/// Checks the surroundings of `position`. With no `surface` given, any solid block counts.
	pub fn fits(self, world: &dyn World, position: BlockPos, surface: Option<&BlockState>) -> bool {
		let is_surface = |at: BlockPos| match surface {
			Some(surface) => world.get(at) == surface,
			None => world.material(at).is_solid(),
		};

		match self {
			Placement::OnGround => world.is_air(position) && is_surface(position.down(1)),
			Placement::InGround => is_surface(position) && world.is_air(position.up(1)),
			Placement::OnRoof   => world.is_air(position) && is_surface(position.up(1)),
			Placement::InRoof   => is_surface(position) && world.is_air(position.down(1)),
		}
	}
}

impl Default for Placement {
	fn default() -> Self {
		Placement::OnGround
	}
}
