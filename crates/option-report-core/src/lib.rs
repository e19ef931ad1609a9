pub mod aggregate;
pub mod contractual_life;
pub mod currency;
pub mod error;
pub mod intrinsic;
pub mod report;
pub mod schema;
pub mod types;

pub use error::OptionReportError;
pub use types::*;

/// Standard result type for all option-report operations
pub type OptionReportResult<T> = Result<T, OptionReportError>;
