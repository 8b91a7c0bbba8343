//! Domain layer: entities and signed single-purpose tokens

pub mod entities;
pub mod tokens;
