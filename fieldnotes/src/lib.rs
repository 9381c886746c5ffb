// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod report;
pub mod site;
pub mod utils;

pub use cli::{Args, Command, run};
pub use config::{Config, Layout};
pub use crate::core::batch::{discover, discover_documents, inspect, publish_batch};
pub use crate::core::front_matter::{parse_front_matter, read_front_matter};
pub use crate::core::ignore::ExcludePatterns;
pub use crate::core::images::{PathRewriter, find_image_references};
pub use crate::core::publisher::{ImageAction, Publisher};
pub use crate::core::usage::{SubstringUsageCounter, UsageCounter, count_usage};
pub use error::PublishError;
pub use models::{BatchSummary, FrontMatter, ImageRef, PublishOutcome, StagedNote};
pub use site::index::{find_published_pages, generate_index, render_index};
pub use site::render::{ConversionReport, PandocRenderer, Renderer, convert};
