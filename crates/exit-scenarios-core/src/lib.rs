pub mod error;
pub mod format;
pub mod types;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "scenarios")]
pub mod config;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::ExitScenariosError;
pub use types::*;

/// Standard result type for all exit-scenario operations
pub type ExitScenariosResult<T> = Result<T, ExitScenariosError>;
