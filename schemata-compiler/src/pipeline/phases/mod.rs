//! Built-in pipeline phases.

mod conformance;
mod defaults;
mod imports;
mod link;
pub mod validate;

pub use conformance::ConformancePhase;
pub use defaults::DefaultsPhase;
pub use imports::ImportsPhase;
pub use link::LinkPhase;
pub use validate::ValidatePhase;
