// Page lifecycle of the frame loop. Pure Rust so the host tests can include it.
//
// A `pagehide` with `persisted` set means the page is entering the
// back/forward cache and may come back; only a non-persisted hide unmounts.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Parked in the back/forward cache; frames stop but nothing is cancelled.
    Suspended,
    /// Unmounted for good.
    Stopped,
}

impl LoopState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }

    /// State after a `pagehide`.
    pub fn on_hide(self, persisted: bool) -> LoopState {
        match self {
            LoopState::Stopped => LoopState::Stopped,
            _ if persisted => LoopState::Suspended,
            _ => LoopState::Stopped,
        }
    }

    /// State after a `pageshow`, and whether the frame loop must be rescheduled.
    pub fn on_show(self) -> (LoopState, bool) {
        match self {
            LoopState::Suspended => (LoopState::Running, true),
            other => (other, false),
        }
    }
}
