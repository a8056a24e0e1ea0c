pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpCatalog, storage::FileStore, storage::MemoryStore};
pub use crate::core::{
    catalog::WithFallback,
    discovery::Pathway,
    grades::Grade,
    registry::{SelectedCourses, UserStore},
    selection::Selection,
};
pub use utils::error::{PathwayError, Result};
