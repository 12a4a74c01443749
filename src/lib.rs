pub mod boundaries;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod selection;
pub mod store;

pub use boundaries::{
    features_missing_codes, load_boundaries, load_boundaries_from_path, BoundaryFeature, Geometry,
    Ring,
};
pub use catalog::{group_by_category, CountryStore, EventCatalog, EventStore};
pub use config::Config;
pub use error::{BoundaryError, ConfigError, GeometryError, StoreError};
pub use geometry::{compute_center, compute_view_distance, derive_color, HslColor};
pub use models::{CenterPoint, Country, EventCategory, HistoricalEvent, YearOrder, YearRange};
pub use selection::{SelectionGuard, SelectionToken};
pub use store::RestStore;
