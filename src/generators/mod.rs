// src/generators/mod.rs
pub mod password;
pub mod strength;

pub use password::generate_password;
pub use strength::evaluate_strength;
