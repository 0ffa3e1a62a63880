mod error;
pub mod format;
pub mod keuangan;
pub mod member;
pub mod submission;
mod summary;
mod toast;

pub use error::{Error, Result};
pub use summary::FinancialSummary;
pub use toast::{Severity, Toast};
