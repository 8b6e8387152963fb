//! Boot-sequence intro driven by a phase table evaluated against elapsed time.
//!
//! Phases only move forward, one per update, and completion is reported on
//! exactly one update. Cancelling freezes the sequencer where it stands.

use crate::constants::*;
use crate::error::{CoreError, Result};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseSpan {
    pub phase: u8,
    pub start_ms: u64,
    pub end_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTimeline {
    spans: Vec<PhaseSpan>,
    done_ms: u64,
}

impl PhaseTimeline {
    /// Build from phase start times (the first must be 0) and the teardown time.
    pub fn new(starts_ms: &[u64], done_ms: u64) -> Result<Self> {
        match starts_ms.first() {
            None => return Err(CoreError::PhaseTable("no phases")),
            Some(&s) if s != 0 => return Err(CoreError::PhaseTable("first phase must start at 0")),
            _ => {}
        }
        if starts_ms.len() > u8::MAX as usize {
            return Err(CoreError::PhaseTable("too many phases"));
        }
        if starts_ms.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CoreError::PhaseTable("phase starts must strictly increase"));
        }
        let last = starts_ms[starts_ms.len() - 1];
        if done_ms <= last {
            return Err(CoreError::PhaseTable("completion must follow the last phase"));
        }
        Ok(Self::from_starts(starts_ms, done_ms))
    }

    fn from_starts(starts_ms: &[u64], done_ms: u64) -> Self {
        let spans = starts_ms
            .iter()
            .enumerate()
            .map(|(i, &start_ms)| PhaseSpan {
                phase: i as u8,
                start_ms,
                end_ms: starts_ms.get(i + 1).copied().unwrap_or(done_ms),
            })
            .collect();
        Self { spans, done_ms }
    }

    pub fn spans(&self) -> &[PhaseSpan] {
        &self.spans
    }

    pub fn done_ms(&self) -> u64 {
        self.done_ms
    }

    pub fn last_phase(&self) -> u8 {
        (self.spans.len() - 1) as u8
    }

    /// Phase whose span contains `elapsed_ms` (the last phase past its end).
    pub fn phase_at(&self, elapsed_ms: u64) -> u8 {
        self.spans
            .iter()
            .rev()
            .find(|s| s.start_ms <= elapsed_ms)
            .map_or(0, |s| s.phase)
    }

    pub fn span(&self, phase: u8) -> Option<&PhaseSpan> {
        self.spans.get(phase as usize)
    }
}

impl Default for PhaseTimeline {
    fn default() -> Self {
        Self::from_starts(&INTRO_PHASE_STARTS_MS, INTRO_DONE_MS)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntroUpdate {
    pub phase: u8,
    pub changed: bool,
    /// True on the single update that ends the intro.
    pub completed: bool,
}

pub struct IntroSequencer {
    timeline: PhaseTimeline,
    phase: u8,
    completed: bool,
    cancelled: bool,
}

impl IntroSequencer {
    pub fn new(timeline: PhaseTimeline) -> Self {
        Self {
            timeline,
            phase: 0,
            completed: false,
            cancelled: false,
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    /// Stop all further progress. Used on teardown.
    pub fn cancel(&mut self) {
        if !self.cancelled && !self.completed {
            log::debug!("[intro] cancelled in phase {}", self.phase);
        }
        self.cancelled = true;
    }

    /// Evaluate the table at `elapsed` since mount.
    pub fn advance(&mut self, elapsed: Duration) -> IntroUpdate {
        let mut update = IntroUpdate {
            phase: self.phase,
            ..IntroUpdate::default()
        };
        if self.cancelled || self.completed {
            return update;
        }
        let ms = elapsed.as_millis() as u64;
        if self.timeline.phase_at(ms) > self.phase {
            self.phase += 1;
            log::info!("[intro] phase {} at {}ms", self.phase, ms);
            update.phase = self.phase;
            update.changed = true;
            return update;
        }
        if self.phase == self.timeline.last_phase() && ms >= self.timeline.done_ms() {
            self.completed = true;
            log::info!("[intro] complete at {}ms", ms);
            update.completed = true;
        }
        update
    }

    pub fn text(&self) -> &'static str {
        INTRO_TEXT.get(self.phase as usize).copied().unwrap_or("")
    }

    /// Overlay text color; switches to the success hue on the last phase.
    pub fn accent(&self) -> [f32; 4] {
        if self.phase == self.timeline.last_phase() {
            [SUCCESS_RGB[0], SUCCESS_RGB[1], SUCCESS_RGB[2], 1.0]
        } else {
            INTRO_TEXT_RGBA
        }
    }

    /// Text fades in at the start of each phase.
    pub fn text_opacity(&self, elapsed: Duration) -> f32 {
        let start = self.timeline.span(self.phase).map_or(0, |s| s.start_ms);
        let ms = elapsed.as_millis() as u64;
        let since = ms.saturating_sub(start) as f32;
        (since / INTRO_TEXT_FADE_MS.max(1) as f32).clamp(0.0, 1.0)
    }

    /// The intro cloud fades out just before teardown.
    pub fn scene_opacity(&self, elapsed: Duration) -> f32 {
        let done = self.timeline.done_ms();
        let fade_start = done.saturating_sub(INTRO_OUTRO_MS);
        let ms = elapsed.as_millis() as u64;
        if ms <= fade_start || done == fade_start {
            return 1.0;
        }
        1.0 - ((ms - fade_start) as f32 / (done - fade_start) as f32).clamp(0.0, 1.0)
    }
}

impl Default for IntroSequencer {
    fn default() -> Self {
        Self::new(PhaseTimeline::default())
    }
}
