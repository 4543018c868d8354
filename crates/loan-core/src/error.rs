use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("No valid rate: {0}")]
    NoSolution(String),

    #[error("Convergence failure: {function} did not converge after {iterations} iterations")]
    ConvergenceFailure { function: String, iterations: u32 },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

impl LoanError {
    /// True when the requested quantity is mathematically undefined for the
    /// given inputs, as opposed to a solve that ran and found no answer.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            LoanError::InvalidInput { .. }
                | LoanError::DivisionByZero { .. }
                | LoanError::FinancialImpossibility(_)
        )
    }
}
