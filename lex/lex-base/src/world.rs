use crate::block::BlockState;
use crate::material::{Material, MaterialTable};
use crate::position::BlockPos;
use bitflags::bitflags;
use fxhash::FxHashMap;

bitflags! {
	/// Side effects requested alongside a block write, in the host's flag layout.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct UpdateFlags: u8 {
		const NOTIFY_NEIGHBORS = 1;
		const SEND_TO_CLIENTS = 2;
		const NO_RERENDER = 4;
	}
}

/// Read/write access to the voxel grid being generated into.
///
/// Reads outside of the grid report air, writes outside of it are refused.
pub trait World {
	fn get(&self, position: BlockPos) -> &BlockState;

	/// Returns whether the write was accepted.
	fn set(&mut self, position: BlockPos, state: BlockState, flags: UpdateFlags) -> bool;

	fn material(&self, position: BlockPos) -> Material;

	fn is_air(&self, position: BlockPos) -> bool {
		self.material(position).is_air()
	}

	/// Exclusive upper bound of valid Y coordinates.
	fn height_limit(&self) -> i32 {
		256
	}
}

/// World backed by a hash map of non-air blocks.
#[derive(Debug, Clone)]
pub struct SparseWorld {
	blocks: FxHashMap<BlockPos, BlockState>,
	materials: MaterialTable,
	air: BlockState,
	height: i32,
	writes: usize,
}

impl SparseWorld {
	pub fn new(materials: MaterialTable) -> Self {
		SparseWorld {
			blocks: FxHashMap::default(),
			materials,
			air: BlockState::air(),
			height: 256,
			writes: 0,
		}
	}

	pub fn with_height(mut self, height: i32) -> Self {
		self.height = height;
		self
	}

	/// Fills the inclusive box between two corners. Not counted as writes.
	pub fn fill(&mut self, from: BlockPos, to: BlockPos, state: &BlockState) {
		for x in from.x().min(to.x())..=from.x().max(to.x()) {
			for y in from.y().min(to.y())..=from.y().max(to.y()) {
				for z in from.z().min(to.z())..=from.z().max(to.z()) {
					self.put(BlockPos::new(x, y, z), state.clone());
				}
			}
		}
	}

	/// Number of writes accepted through `World::set`.
	pub fn writes(&self) -> usize {
		self.writes
	}

	/// Number of positions currently holding exactly `state`.
	pub fn count(&self, state: &BlockState) -> usize {
		self.blocks.values().filter(|&stored| stored == state).count()
	}

	/// Every non-air block, in no particular order.
	pub fn blocks(&self) -> impl Iterator<Item = (&BlockPos, &BlockState)> {
		self.blocks.iter()
	}

	fn in_bounds(&self, position: BlockPos) -> bool {
		position.y() >= 0 && position.y() < self.height
	}

	fn put(&mut self, position: BlockPos, state: BlockState) {
		if state.is_air() {
			self.blocks.remove(&position);
		} else {
			self.blocks.insert(position, state);
		}
	}
}

impl Default for SparseWorld {
	fn default() -> Self {
		SparseWorld::new(MaterialTable::vanilla())
	}
}

impl World for SparseWorld {
	fn get(&self, position: BlockPos) -> &BlockState {
		self.blocks.get(&position).unwrap_or(&self.air)
	}

	fn set(&mut self, position: BlockPos, state: BlockState, _: UpdateFlags) -> bool {
		if !self.in_bounds(position) {
			return false;
		}

		self.put(position, state);
		self.writes += 1;

		true
	}

	fn material(&self, position: BlockPos) -> Material {
		self.materials.get(self.get(position))
	}

	fn height_limit(&self) -> i32 {
		self.height
	}
}
