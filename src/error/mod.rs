mod app;
mod probe;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use probe::{MAX_STATUS_CODE, MIN_STATUS_CODE, ProbeError};
pub use validation::ValidationError;
