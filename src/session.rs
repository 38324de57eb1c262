//! Submission state machine over the caption and creative generations.
//!
//! One submission fans out up to two concurrent generation calls and joins
//! them into a single phase: `Idle -> Loading -> Success | Error`, with
//! retry re-entering `Loading`. Each generation settles into its own slot,
//! so a successful sibling survives even when the submission as a whole
//! fails.

use crate::ai::{CaptionService, CreativeService};
use crate::models::SessionInput;
use crate::{prompts, Result};

/// Overall submission phase. Exactly one value holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Outcome of one generation branch within a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome<T> {
    /// The branch was never issued (empty briefing).
    Skipped,
    Ready(T),
    Failed(String),
}

impl<T> SlotOutcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            SlotOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SlotOutcome::Failed(_))
    }
}

/// Injectable generation backends, in the shape the tests mock.
pub struct GenerationServices {
    pub caption: Box<dyn CaptionService>,
    pub creative: Box<dyn CreativeService>,
}

/// Holds the phase and the per-branch outcomes of the latest submission.
pub struct Session {
    phase: Phase,
    caption: SlotOutcome<String>,
    creative: SlotOutcome<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            caption: SlotOutcome::Skipped,
            creative: SlotOutcome::Skipped,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Caption text from the latest submission, if that branch succeeded.
    pub fn caption(&self) -> &SlotOutcome<String> {
        &self.caption
    }

    /// Creative data URL from the latest submission, if that branch succeeded.
    pub fn creative(&self) -> &SlotOutcome<String> {
        &self.creative
    }

    /// A submission needs at least one non-whitespace briefing and must not
    /// race an in-flight one.
    pub fn can_submit(&self, input: &SessionInput) -> bool {
        self.phase != Phase::Loading && input.has_briefing()
    }

    /// Run one submission: fan out the issued generations concurrently,
    /// wait for all of them to settle, and reduce into the final phase.
    ///
    /// An empty caption briefing is replaced by the language default, so
    /// the caption branch is always issued. The creative branch is issued
    /// only when the creative briefing is non-empty after trimming. A
    /// failed branch does not cancel its sibling; both outcomes land in
    /// their slots before the phase is derived.
    pub async fn submit(&mut self, services: &GenerationServices, input: &SessionInput) -> Phase {
        if !self.can_submit(input) {
            return self.phase;
        }

        self.phase = Phase::Loading;
        self.caption = SlotOutcome::Skipped;
        self.creative = SlotOutcome::Skipped;

        let caption_briefing = match input.caption_briefing.trim() {
            "" => prompts::default_caption_briefing(input.language),
            briefing => briefing,
        };
        let creative_briefing = input.creative_briefing.trim();

        let caption_future = services.caption.generate_caption(
            input.reference_image.as_ref(),
            caption_briefing,
            input.language,
        );

        if creative_briefing.is_empty() {
            self.caption = settle("caption", caption_future.await);
        } else {
            let creative_future = services.creative.generate_creative(
                creative_briefing,
                input.language,
                input.reference_image.as_ref(),
            );
            let (caption, creative) = tokio::join!(caption_future, creative_future);
            self.caption = settle("caption", caption);
            self.creative = settle("creative", creative);
        }

        self.phase = if self.caption.is_failed() || self.creative.is_failed() {
            Phase::Error
        } else {
            Phase::Success
        };
        self.phase
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn settle<T>(branch: &str, result: Result<T>) -> SlotOutcome<T> {
    match result {
        Ok(value) => SlotOutcome::Ready(value),
        Err(e) => {
            tracing::error!("{} generation failed: {}", branch, e);
            SlotOutcome::Failed(e.to_string())
        }
    }
}
