pub mod error;
pub mod rules;
pub mod time_value;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "insurance")]
pub mod insurance;

pub use error::HomeCalcError;
pub use types::*;

/// Standard result type for the boundary helpers (parsing, serialization).
pub type HomeCalcResult<T> = Result<T, HomeCalcError>;
