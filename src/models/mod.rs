// src/models/mod.rs

pub mod characteristics;
pub mod circuit;
pub mod construction;
pub mod material;
pub mod sensor;

pub use characteristics::DerivedCharacteristics;
pub use material::{find_material, materials, Material};
