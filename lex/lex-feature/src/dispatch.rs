use crate::Feature;
use java_rand::Random;
use lex_base::{BlockPos, World};

/// Spreads the attempts of one feature over a chunk.
///
/// Attempts are offset by 8 on both horizontal axes, so that a feature reaching up to 8 blocks
/// out of its anchor stays within the 2x2 chunk area that is loaded around the populated chunk.
pub struct Dispatcher<'f> {
	pub feature: &'f dyn Feature,
}

impl<'f> Dispatcher<'f> {
	pub fn new(feature: &'f dyn Feature) -> Self {
		Dispatcher { feature }
	}

	/// Runs every attempt for the chunk whose minimum corner is `origin`, returning how many
	/// of them modified the world.
	pub fn generate(&self, world: &mut dyn World, rng: &mut Random, origin: BlockPos) -> u32 {
		let settings = self.feature.settings();

		if settings.generation_attempts == 0 || rng.next_f64() >= settings.generation_probability {
			return 0;
		}

		let mut successes = 0;

		for _ in 0..settings.attempts(rng) {
			let x = rng.next_i32_bound(16) + 8;
			let y = settings.height(rng);
			let z = rng.next_i32_bound(16) + 8;

			// Anchors outside the world cannot place anything.
			if y < 0 || y >= world.height_limit() {
				continue;
			}

			let at = BlockPos::new(origin.x(), y, origin.z()).add(x, 0, z);

			if self.feature.generate(world, rng, at) {
				successes += 1;
			}
		}

		log::trace!("{} placed {} times in chunk at {}", self.feature.kind(), successes, origin);

		successes
	}
}
