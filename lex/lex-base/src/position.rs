use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Default)]
pub struct BlockPos {
	x: i32,
	y: i32,
	z: i32,
}

impl BlockPos {
	pub fn new(x: i32, y: i32, z: i32) -> Self {
		BlockPos { x, y, z }
	}

	pub fn x(&self) -> i32 {
		self.x
	}

	pub fn y(&self) -> i32 {
		self.y
	}

	pub fn z(&self) -> i32 {
		self.z
	}

	pub fn add(self, x: i32, y: i32, z: i32) -> Self {
		BlockPos::new(self.x.wrapping_add(x), self.y.wrapping_add(y), self.z.wrapping_add(z))
	}

	pub fn offset(self, facing: Facing) -> Self {
		let (x, y, z) = facing.offset();

		self.add(x, y, z)
	}

	pub fn up(self, n: i32) -> Self {
		self.add(0, n, 0)
	}

	pub fn down(self, n: i32) -> Self {
		self.add(0, -n, 0)
	}

	/// Minimum corner of the 16x16 column containing this position, at y = 0.
	pub fn column_origin(self) -> Self {
		BlockPos::new(self.x & !15, 0, self.z & !15)
	}
}

impl Display for BlockPos {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "({}, {}, {})", self.x, self.y, self.z)
	}
}

/// One of the six face directions. Declaration order is the order neighbours are scanned in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
	Down,
	Up,
	North,
	South,
	West,
	East,
}

impl Facing {
	pub const ALL: [Facing; 6] =
		[Facing::Down, Facing::Up, Facing::North, Facing::South, Facing::West, Facing::East];

	pub fn opposite(self) -> Facing {
		match self {
			Facing::Down  => Facing::Up,
			Facing::Up    => Facing::Down,
			Facing::North => Facing::South,
			Facing::South => Facing::North,
			Facing::West  => Facing::East,
			Facing::East  => Facing::West,
		}
	}

	pub fn horizontal(self) -> bool {
		!self.vertical()
	}

	pub fn vertical(self) -> bool {
		self == Facing::Up || self == Facing::Down
	}

	pub fn axis(self) -> Axis {
		match self {
			Facing::Down  => Axis::Y,
			Facing::Up    => Axis::Y,
			Facing::North => Axis::Z,
			Facing::South => Axis::Z,
			Facing::West  => Axis::X,
			Facing::East  => Axis::X,
		}
	}

	/// Whether this facing points towards increasing coordinates.
	pub fn positive(self) -> bool {
		self == Facing::Up || self == Facing::South || self == Facing::East
	}

	pub fn offset(self) -> (i32, i32, i32) {
		match self {
			Facing::Down  => ( 0, -1,  0),
			Facing::Up    => ( 0,  1,  0),
			Facing::North => ( 0,  0, -1),
			Facing::South => ( 0,  0,  1),
			Facing::West  => (-1,  0,  0),
			Facing::East  => ( 1,  0,  0),
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Facing::Down  => "down",
			Facing::Up    => "up",
			Facing::North => "north",
			Facing::South => "south",
			Facing::West  => "west",
			Facing::East  => "east",
		}
	}
}

impl FromStr for Facing {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Facing::ALL.iter().cloned().find(|facing| s.eq_ignore_ascii_case(facing.name())).ok_or(())
	}
}

impl Display for Facing {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Axis {
	Y,
	X,
	Z,
}

impl Axis {
	pub fn horizontal(self) -> bool {
		!self.vertical()
	}

	pub fn vertical(self) -> bool {
		self == Axis::Y
	}

	pub fn plus(self) -> Facing {
		match self {
			Axis::Y => Facing::Up,
			Axis::X => Facing::East,
			Axis::Z => Facing::South,
		}
	}

	pub fn minus(self) -> Facing {
		match self {
			Axis::Y => Facing::Down,
			Axis::X => Facing::West,
			Axis::Z => Facing::North,
		}
	}
}
