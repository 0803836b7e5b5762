#![forbid(unsafe_code)]

//! # `lex-base`
//!
//! Shared vocabulary of the generation crates: registry identifiers, block states and their
//! materials, positions and facings, and the `World` trait that generation code mutates.
//!
//! Nothing in here knows about a concrete game engine. A host implements `World` over its
//! own chunk storage; `SparseWorld` is a hash map backed implementation used for previews
//! and tests.

pub mod block;
pub mod identifier;
pub mod material;
pub mod matcher;
pub mod position;
pub mod world;

pub use block::BlockState;
pub use identifier::{Identifier, ParseError};
pub use material::{Material, MaterialTable};
pub use position::{Axis, BlockPos, Facing};
pub use world::{SparseWorld, UpdateFlags, World};
