// src/tools/mod.rs
pub mod breach;
