use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
	#[error("empty identifier")]
	Empty,
	#[error("invalid character {1:?} in identifier {0:?}")]
	InvalidCharacter(String, char),
	#[error("malformed block state {0:?}")]
	MalformedState(String),
}

/// Namespaced registry key, such as `minecraft:stone`.
/// Always stored lower-case, so comparisons are effectively case-insensitive.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
	namespace: String,
	path: String,
}

impl Identifier {
	pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

	pub fn new(namespace: &str, path: &str) -> Result<Self, ParseError> {
		let namespace = namespace.to_ascii_lowercase();
		let path = path.to_ascii_lowercase();

		if namespace.is_empty() || path.is_empty() {
			return Err(ParseError::Empty);
		}

		let full = || format!("{}:{}", namespace, path);

		if let Some(c) = namespace.chars().find(|&c| !valid_namespace_char(c)) {
			return Err(ParseError::InvalidCharacter(full(), c));
		}

		if let Some(c) = path.chars().find(|&c| !valid_path_char(c)) {
			return Err(ParseError::InvalidCharacter(full(), c));
		}

		Ok(Identifier { namespace, path })
	}

	/// Identifier in the default `minecraft` namespace.
	pub fn vanilla(path: &str) -> Result<Self, ParseError> {
		Identifier::new(Self::DEFAULT_NAMESPACE, path)
	}

	/// For identifiers known to be valid and lower-case at compile time.
	pub(crate) fn new_unchecked(namespace: &str, path: &str) -> Self {
		Identifier { namespace: namespace.to_string(), path: path.to_string() }
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	/// Compares against a raw, possibly unnormalized string from a config document.
	pub fn matches(&self, raw: &str) -> bool {
		raw.parse::<Identifier>().map(|other| &other == self).unwrap_or(false)
	}
}

fn valid_namespace_char(c: char) -> bool {
	c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' || c == '.'
}

fn valid_path_char(c: char) -> bool {
	valid_namespace_char(c) || c == '/'
}

impl FromStr for Identifier {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();

		match s.find(':') {
			Some(split) => Identifier::new(&s[..split], &s[split + 1..]),
			None => Identifier::vanilla(s),
		}
	}
}

impl TryFrom<String> for Identifier {
	type Error = ParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Identifier> for String {
	fn from(identifier: Identifier) -> String {
		identifier.to_string()
	}
}

impl Display for Identifier {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.path)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse() {
		let id: Identifier = "LibraryEx:Big_Mushroom".parse().unwrap();

		assert_eq!(id.namespace(), "libraryex");
		assert_eq!(id.path(), "big_mushroom");
		assert_eq!(id.to_string(), "libraryex:big_mushroom");

		assert_eq!("pig".parse::<Identifier>().unwrap().to_string(), "minecraft:pig");
	}

	#[test]
	fn test_invalid() {
		assert_eq!("".parse::<Identifier>(), Err(ParseError::Empty));
		assert_eq!("minecraft:".parse::<Identifier>(), Err(ParseError::Empty));
		assert!(matches!("bad id".parse::<Identifier>(), Err(ParseError::InvalidCharacter(_, ' '))));
	}

	#[test]
	fn test_matches_ignores_case() {
		let id = Identifier::vanilla("zombie_pigman").unwrap();

		assert!(id.matches("Minecraft:Zombie_Pigman"));
		assert!(id.matches("zombie_pigman"));
		assert!(!id.matches("minecraft:zombie"));
		assert!(!id.matches("not valid!"));
	}
}
