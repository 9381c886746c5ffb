// src/core.rs
pub mod batch;
pub mod front_matter;
pub mod ignore;
pub mod images;
pub mod publisher;
pub mod usage;

#[cfg(test)]
pub mod test_utils;
