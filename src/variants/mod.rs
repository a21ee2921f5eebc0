//! Built-in variants.
//!
//! - [`Canfield`]: canfield, canfield-draw-one, storehouse, rainbow
//! - [`FortyThieves`]: forty-thieves, lucas, limited, forty-and-eight,
//!   red-and-black, number-ten, rank-and-file, indian, maria, sixty-thieves
//!
//! Scripts are created by id through the [`VariantRegistry`].

pub mod canfield;
pub mod forty_thieves;
pub mod registry;

pub use canfield::{Canfield, CanfieldParams};
pub use forty_thieves::{FortyThieves, FortyThievesParams};
pub use registry::{VariantFactory, VariantRegistry};
