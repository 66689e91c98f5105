use serde::Serialize;
use strum_macros::Display;

/// Pipeline stages, in the order a match-result change flows through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    UnparsedEnqueue,
    Standings,
    Bracket,
    Fantasy,
    Leaderboard,
    SeasonStats,
    RetrySweep,
}

/// What one stage did. A failed stage records its error and the pipeline
/// moves on; earlier stages keep whatever they wrote.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StageReport {
    pub fn ok(stage: Stage, processed: usize, skipped: usize) -> Self {
        Self {
            stage,
            processed,
            skipped,
            failed: 0,
            error: None,
        }
    }

    pub fn failed(stage: Stage, error: impl Into<String>) -> Self {
        Self {
            stage,
            processed: 0,
            skipped: 0,
            failed: 1,
            error: Some(error.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecalcReport {
    pub stages: Vec<StageReport>,
}

impl RecalcReport {
    pub fn push(&mut self, stage: StageReport) {
        self.stages.push(stage);
    }

    pub fn success(&self) -> bool {
        self.stages.iter().all(StageReport::succeeded)
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}

/// Envelope every trigger endpoint responds with.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub details: T,
}

impl<T> ActionResult<T> {
    pub fn new(success: bool, message: impl Into<String>, details: T) -> Self {
        Self {
            success,
            message: message.into(),
            details,
        }
    }
}
