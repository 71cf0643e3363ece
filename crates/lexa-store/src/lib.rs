pub mod document;
pub mod error;
pub mod open_report;
pub mod store;

#[cfg(test)]
mod tests;

pub use document::StoreDocument;
pub use error::{Result, StoreError};
pub use open_report::OpenReport;
pub use store::Store;
