//! Recipes: ordered lists of maintenance steps.
//!
//! - [`Step`] - One action (command plus metadata)
//! - [`RecipeStore`] - Resolves logical paths and loads recipe files
//! - [`explain()`] - Tag to explanation lookup
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tuneup::recipe::parse_recipe;
//!
//! let yaml = "- cmd: ipconfig /flushdns\n  tag: flush_dns\n";
//! let steps = parse_recipe(yaml, Path::new("network.yaml")).unwrap();
//! assert_eq!(steps[0].display_text(), "Flushing DNS cache to fix network issues.");
//! ```

pub mod explain;
pub mod step;
pub mod store;

pub use explain::{explain, EXPLANATIONS};
pub use step::{Step, StepCommand, DEFAULT_TIMEOUT_SECS, UNKNOWN_TAG};
pub use store::{parse_recipe, RecipeStore, ResourceLocation};
