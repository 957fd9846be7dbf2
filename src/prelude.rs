pub use crate::builder::RerandomBuilder;
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentRerandom;
pub use crate::error::InvalidGeneratorError;
pub use crate::hooks::{Generator, KeyProcessor, PostProcessor};
pub use crate::instance::Rerandom;
#[cfg(feature = "metrics")]
pub use crate::metrics::RerandomMetrics;
pub use crate::registry::Registry;
pub use crate::rerandom;
pub use crate::value::{List, Object, Value};
