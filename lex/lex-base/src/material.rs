use crate::block::BlockState;
use crate::identifier::Identifier;
use fxhash::FxHashMap;

/// Coarse physical class of a block, enough for placement rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Material {
	Air,
	Liquid,
	/// Blocks movement and supports other blocks.
	Solid,
	/// Occupies space but is neither solid nor liquid, like plants or snow layers.
	NonSolid,
}

impl Material {
	pub fn is_air(self) -> bool {
		self == Material::Air
	}

	pub fn is_liquid(self) -> bool {
		self == Material::Liquid
	}

	pub fn is_solid(self) -> bool {
		self == Material::Solid
	}
}

/// Maps blocks to their material. Unknown blocks use the fallback.
#[derive(Debug, Clone)]
pub struct MaterialTable {
	materials: FxHashMap<Identifier, Material>,
	fallback: Material,
}

impl MaterialTable {
	pub fn new(fallback: Material) -> Self {
		MaterialTable { materials: FxHashMap::default(), fallback }
	}

	/// The vanilla blocks that generation code commonly meets, everything else being solid.
	pub fn vanilla() -> Self {
		let mut table = MaterialTable::new(Material::Solid);

		let classes: &[(&str, Material)] = &[
			("air", Material::Air),
			("cave_air", Material::Air),
			("void_air", Material::Air),
			("water", Material::Liquid),
			("flowing_water", Material::Liquid),
			("lava", Material::Liquid),
			("flowing_lava", Material::Liquid),
			("tallgrass", Material::NonSolid),
			("deadbush", Material::NonSolid),
			("yellow_flower", Material::NonSolid),
			("red_flower", Material::NonSolid),
			("brown_mushroom", Material::NonSolid),
			("red_mushroom", Material::NonSolid),
			("snow_layer", Material::NonSolid),
			("fire", Material::NonSolid),
			("vine", Material::NonSolid),
			("leaves", Material::NonSolid),
		];

		for &(path, material) in classes {
			table.insert(Identifier::new_unchecked(Identifier::DEFAULT_NAMESPACE, path), material);
		}

		table
	}

	pub fn insert(&mut self, block: Identifier, material: Material) -> Option<Material> {
		self.materials.insert(block, material)
	}

	pub fn get(&self, state: &BlockState) -> Material {
		self.materials.get(state.block()).cloned().unwrap_or(self.fallback)
	}
}

impl Default for MaterialTable {
	fn default() -> Self {
		MaterialTable::vanilla()
	}
}
