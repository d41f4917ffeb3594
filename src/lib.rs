//! In-memory queries over a bundled dump of LEGO set descriptions.

pub mod data;
pub mod error;

pub use data::loader::{LegoSetRepository, Repository};
pub use data::model::{LegoSet, UNKNOWN_THEME};
pub use error::{Error, Result};
