//! Core value types

pub mod color;
pub mod vector;

pub use color::Color;
pub use vector::Vector2;
