//! Data types for the grid engine.

mod config;
mod geometry;
mod schema;
mod selection;
mod value;

pub use config::*;
pub use geometry::*;
pub use schema::*;
pub use selection::*;
pub use value::*;
