use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Phase of chunk population that a feature runs in, in execution order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
	PrePopulate,
	Populate,
	PostPopulate,
	PreDecorate,
	Decorate,
	PostDecorate,
}

impl GenerationStage {
	pub const ALL: [GenerationStage; 6] = [
		GenerationStage::PrePopulate,
		GenerationStage::Populate,
		GenerationStage::PostPopulate,
		GenerationStage::PreDecorate,
		GenerationStage::Decorate,
		GenerationStage::PostDecorate,
	];

	pub fn name(self) -> &'static str {
		match self {
			GenerationStage::PrePopulate  => "pre_populate",
			GenerationStage::Populate     => "populate",
			GenerationStage::PostPopulate => "post_populate",
			GenerationStage::PreDecorate  => "pre_decorate",
			GenerationStage::Decorate     => "decorate",
			GenerationStage::PostDecorate => "post_decorate",
		}
	}
}

impl Default for GenerationStage {
	fn default() -> Self {
		GenerationStage::PostDecorate
	}
}

impl FromStr for GenerationStage {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, ()> {
		GenerationStage::ALL.iter().cloned().find(|stage| stage.name().eq_ignore_ascii_case(s)).ok_or(())
	}
}

impl Display for GenerationStage {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Reads a stage name in any case, falling back to the default stage for anything unrecognized.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<GenerationStage, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;

	Ok(match value.as_str().map(str::parse) {
		Some(Ok(stage)) => stage,
		_ => {
			log::debug!("unrecognized generation stage {}, using {}", value, GenerationStage::default());
			GenerationStage::default()
		}
	})
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse() {
		assert_eq!("DECORATE".parse(), Ok(GenerationStage::Decorate));
		assert_eq!("pre_populate".parse(), Ok(GenerationStage::PrePopulate));
		assert_eq!("sideways".parse::<GenerationStage>(), Err(()));
	}

	#[test]
	fn test_names_round_trip() {
		for &stage in GenerationStage::ALL.iter() {
			assert_eq!(serde_json::to_value(stage).unwrap(), Value::String(stage.name().to_string()));
			assert_eq!(stage.to_string().parse(), Ok(stage));
		}
	}
}
