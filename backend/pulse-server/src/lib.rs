pub mod control;
pub mod error;
pub mod health;
pub mod index;
pub mod logger;
pub mod metrics_endpoint;
pub mod noise_source;
pub mod routes;

#[cfg(test)]
mod tests;

pub use crate::noise_source::NoiseSource;
pub use crate::routes::build_router;
