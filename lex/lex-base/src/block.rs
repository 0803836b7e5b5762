use crate::identifier::{Identifier, ParseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A block together with its properties, written as `namespace:path[key=value,...]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockState {
	block: Identifier,
	properties: BTreeMap<String, String>,
}

impl BlockState {
	pub fn new(block: Identifier) -> Self {
		BlockState { block, properties: BTreeMap::new() }
	}

	pub fn air() -> Self {
		BlockState::vanilla("air")
	}

	/// Default state of a vanilla block. `path` must already be a valid lower-case path.
	pub fn vanilla(path: &'static str) -> Self {
		debug_assert!(Identifier::vanilla(path).is_ok(), "invalid vanilla block {:?}", path);

		BlockState::new(Identifier::new_unchecked(Identifier::DEFAULT_NAMESPACE, path))
	}

	pub fn with(mut self, key: &str, value: &str) -> Self {
		self.properties.insert(key.to_ascii_lowercase(), value.to_ascii_lowercase());
		self
	}

	pub fn block(&self) -> &Identifier {
		&self.block
	}

	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(String::as_str)
	}

	pub fn properties(&self) -> &BTreeMap<String, String> {
		&self.properties
	}

	pub fn is_air(&self) -> bool {
		self.block.namespace() == Identifier::DEFAULT_NAMESPACE && self.block.path() == "air"
	}
}

impl FromStr for BlockState {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let malformed = || ParseError::MalformedState(s.to_string());

		let (block, rest) = match s.find('[') {
			Some(open) => (&s[..open], Some(&s[open + 1..])),
			None => (s, None),
		};

		let mut state = BlockState::new(block.parse()?);

		if let Some(rest) = rest {
			let inner = rest.strip_suffix(']').ok_or_else(malformed)?;

			for pair in inner.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
				let equals = pair.find('=').ok_or_else(malformed)?;
				let (key, value) = (pair[..equals].trim(), pair[equals + 1..].trim());

				if key.is_empty() || value.is_empty() {
					return Err(malformed());
				}

				state = state.with(key, value);
			}
		}

		Ok(state)
	}
}

impl TryFrom<String> for BlockState {
	type Error = ParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<BlockState> for String {
	fn from(state: BlockState) -> String {
		state.to_string()
	}
}

impl From<Identifier> for BlockState {
	fn from(block: Identifier) -> Self {
		BlockState::new(block)
	}
}

impl Display for BlockState {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "{}", self.block)?;

		if !self.properties.is_empty() {
			f.write_str("[")?;

			for (index, (key, value)) in self.properties.iter().enumerate() {
				if index != 0 {
					f.write_str(",")?;
				}

				write!(f, "{}={}", key, value)?;
			}

			f.write_str("]")?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse_properties() {
		let state: BlockState = "minecraft:stone[variant=granite, smooth=true]".parse().unwrap();

		assert_eq!(state.block().to_string(), "minecraft:stone");
		assert_eq!(state.property("variant"), Some("granite"));
		assert_eq!(state.property("smooth"), Some("true"));
		assert_eq!(state.to_string(), "minecraft:stone[smooth=true,variant=granite]");
	}

	#[test]
	fn test_malformed() {
		assert!("minecraft:stone[variant=granite".parse::<BlockState>().is_err());
		assert!("minecraft:stone[variant]".parse::<BlockState>().is_err());
		assert!("minecraft:stone[=granite]".parse::<BlockState>().is_err());
	}

	#[test]
	fn test_air() {
		assert!(BlockState::air().is_air());
		assert!("AIR".parse::<BlockState>().unwrap().is_air());
		assert!(!"minecraft:cave_air".parse::<BlockState>().unwrap().is_air());
	}

	#[test]
	fn test_serde_string_form() {
		let state = "netherrack".parse::<BlockState>().unwrap();
		let json = serde_json::to_string(&state).unwrap();

		assert_eq!(json, "\"minecraft:netherrack\"");
		assert!(serde_json::from_str::<BlockState>("\"stone[\"").is_err());
	}
}
