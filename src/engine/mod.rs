pub mod orchestrator;
pub mod request;
pub mod resources;
pub mod stage;

pub use orchestrator::MixOrchestrator;
pub use request::{MixRequest, MixResult, OutputHandle};
pub use resources::{ResourceStore, StoredResource};
pub use stage::{MixStage, StageTracker};
