pub mod categorize;
pub mod clean;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod table;

pub use categorize::{CategoryKey, CategoryTable, Categorizer, SplitDocument};
pub use error::SplitError;
pub use table::{Header, Row, TableDocument};
