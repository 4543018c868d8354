pub mod error;
pub mod record;
pub mod solver;
pub mod types;

pub use error::LoanError;
pub use record::LoanRecord;
pub use types::{Money, Months, Rate, Term};

/// Standard result type for all loan-core operations
pub type LoanResult<T> = Result<T, LoanError>;
