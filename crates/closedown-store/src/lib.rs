//! Storage layer: loads the agreement register and writes exports.

mod error;
pub use error::StoreError;

mod loader;
pub use loader::{load_dataset, parse_dataset};

mod output;
pub use output::write_export;
