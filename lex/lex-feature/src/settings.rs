use java_rand::Random;
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::TryFrom;

/// Parameters shared by every feature, read by the per-chunk dispatcher rather than by the
/// placement procedure itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureSettings {
	/// Upper bound of placement attempts per chunk.
	pub generation_attempts: u32,
	/// Chance in [0, 1] that a chunk gets any attempts at all.
	#[serde(deserialize_with = "probability")]
	pub generation_probability: f64,
	/// Draw the number of attempts uniformly from `1..=generation_attempts`.
	pub randomize_generation_attempts: bool,
	pub minimum_generation_height: i32,
	pub maximum_generation_height: i32,
}

impl FeatureSettings {
	/// Number of attempts for one chunk, consuming randomness only when randomized.
	pub fn attempts(&self, rng: &mut Random) -> u32 {
		if self.randomize_generation_attempts && self.generation_attempts > 0 {
			rng.next_u32_bound(self.generation_attempts) + 1
		} else {
			self.generation_attempts
		}
	}

	/// Picks a Y coordinate in `[minimum, maximum)`. A range that is empty, or wider than an
	/// `i32` can bound, collapses to the minimum.
	pub fn height(&self, rng: &mut Random) -> i32 {
		let span = i64::from(self.maximum_generation_height) - i64::from(self.minimum_generation_height);

		match i32::try_from(span) {
			Ok(span) if span > 0 => self.minimum_generation_height + rng.next_i32_bound(span),
			_ => self.minimum_generation_height,
		}
	}
}

impl Default for FeatureSettings {
	fn default() -> Self {
		FeatureSettings {
			generation_attempts: 4,
			generation_probability: 1.0,
			randomize_generation_attempts: false,
			minimum_generation_height: 0,
			maximum_generation_height: 128,
		}
	}
}

fn probability<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
	D: Deserializer<'de>,
{
	let value = f64::deserialize(deserializer)?;

	Ok(if value.is_nan() { 0.0 } else { value.max(0.0).min(1.0) })
}
