pub mod error;
pub mod extractors;
pub mod health;
pub mod samples;

pub use error::AppError;
