pub mod handlers;
pub mod report;
pub mod service;

pub use handlers::admin_router;
pub use report::{ActionResult, RecalcReport, Stage, StageReport};
pub use service::{RecalcOrchestrator, RetrySweepOutcome};
