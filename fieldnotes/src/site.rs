// src/site.rs
pub mod index;
pub mod render;
