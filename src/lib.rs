pub mod config;
pub mod consolidate;
pub mod error;
pub mod fetch;
pub mod hierarchy;
pub mod ingest;
pub mod limits;
pub mod model;
pub mod observability;
pub mod reduce;

pub use error::Error;
