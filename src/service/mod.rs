//! Service Module
//!
//! The parameter service composes the cache with a store client, and the
//! registry reuses one service instance per backend region.

mod parameters;
mod registry;

pub use parameters::ParameterService;
pub use registry::ServiceRegistry;
