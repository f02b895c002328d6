//! polyscene - scene state, gesture mapping and Poly Pizza catalog search
//! for an AR model viewer.
//!
//! Rendering, tracking and gesture recognition belong to the AR surface;
//! this crate holds the state those callbacks mutate and the REST client
//! that finds models to show.

mod defaults;
pub mod error;

pub mod catalog;
pub mod config;
pub mod scene;
pub mod session;

pub use error::{Error, Result};

pub use catalog::{
    search_path, Catalog, CatalogClient, CatalogError, Creator, FilterValue, Filters,
    ModelDetail, ModelSummary,
};
pub use config::{CatalogConfig, SceneDefaults, SessionConfig};
pub use scene::{pinch_scale, ActiveObject, AssetRef, GestureEvent, GestureState, Scene};
pub use session::{Session, SessionSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
