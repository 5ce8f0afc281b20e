use std::sync::atomic::{AtomicU8, Ordering};

use serde::Serialize;
use tracing::debug;

/// Per-request pipeline state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MixStage {
    Idle = 0,
    CapturingVoice = 1,
    DecodingSources = 2,
    Mixing = 3,
    Rendering = 4,
    Encoding = 5,
    Done = 6,
    DegradedDone = 7,
}

impl MixStage {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Idle,
            1 => Self::CapturingVoice,
            2 => Self::DecodingSources,
            3 => Self::Mixing,
            4 => Self::Rendering,
            5 => Self::Encoding,
            6 => Self::Done,
            _ => Self::DegradedDone,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::DegradedDone)
    }

    /// Cancellation is only honoured before mixing starts.
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Idle | Self::CapturingVoice | Self::DecodingSources)
    }
}

/// Shared view of a request's current [`MixStage`].
///
/// Concurrent branches (music fetch and voice capture) advance the same
/// tracker.
#[derive(Debug)]
pub struct StageTracker {
    state: AtomicU8,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(MixStage::Idle as u8),
        }
    }

    pub fn current(&self) -> MixStage {
        MixStage::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Moves forward to `next`. Terminal states and backward moves are ignored.
    pub fn advance(&self, next: MixStage) {
        let prev = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cur| {
                let cur_stage = MixStage::from_u8(cur);
                (!cur_stage.is_terminal() && (next as u8) > cur).then_some(next as u8)
            });
        if let Ok(prev) = prev {
            debug!("Mix stage {:?} -> {:?}", MixStage::from_u8(prev), next);
        }
    }
}
