//! Matching block states against lists of patterns.
//!
//! A pattern only constrains the properties it names: `minecraft:log` matches every log,
//! while `minecraft:log[variant=oak]` matches oak logs along any axis.
use crate::block::BlockState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct BlockMatcher {
	pub blocks: Vec<BlockState>,
	/// Match everything except the listed patterns.
	#[serde(default)]
	pub blacklist: bool,
}

impl BlockMatcher {
	pub fn include<'a, I>(patterns: I) -> Self
	where
		I: IntoIterator<Item = &'a BlockState>,
	{
		BlockMatcher { blocks: patterns.into_iter().cloned().collect(), blacklist: false }
	}

	pub fn exclude<'a, I>(patterns: I) -> Self
	where
		I: IntoIterator<Item = &'a BlockState>,
	{
		BlockMatcher { blocks: patterns.into_iter().cloned().collect(), blacklist: true }
	}

	pub fn matches(&self, state: &BlockState) -> bool {
		self.blocks.iter().any(|pattern| covers(pattern, state)) != self.blacklist
	}
}

fn covers(pattern: &BlockState, state: &BlockState) -> bool {
	pattern.block() == state.block()
		&& pattern.properties().iter().all(|(key, value)| state.property(key) == Some(value.as_str()))
}

#[cfg(test)]
mod test {
	use super::*;

	fn state(s: &str) -> BlockState {
		s.parse().unwrap()
	}

	#[test]
	fn test_properties_narrow() {
		let logs = BlockMatcher::include(&[state("log")]);
		let oak = BlockMatcher::include(&[state("log[variant=oak]")]);

		assert!(logs.matches(&state("log[axis=y,variant=birch]")));
		assert!(oak.matches(&state("log[axis=x,variant=oak]")));
		assert!(!oak.matches(&state("log[axis=x,variant=birch]")));
		assert!(!oak.matches(&state("log")));
		assert!(!logs.matches(&state("log2")));
	}

	#[test]
	fn test_blacklist() {
		let soil = BlockMatcher::include(&[state("grass"), state("dirt")]);
		let not_soil = BlockMatcher::exclude(&[state("grass"), state("dirt")]);

		assert!(soil.matches(&state("grass[snowy=true]")) && !soil.matches(&state("stone")));
		assert!(!not_soil.matches(&state("dirt")) && not_soil.matches(&state("stone")));
		assert!(BlockMatcher::exclude(&[]).matches(&state("stone")));
	}

	#[test]
	fn test_config() {
		let matcher: BlockMatcher = serde_json::from_str(r#"{ "blocks": ["minecraft:sand", "minecraft:gravel"] }"#).unwrap();

		assert!(!matcher.blacklist);
		assert!(matcher.matches(&state("minecraft:gravel")));
	}
}
