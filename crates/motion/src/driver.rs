//! Render-loop gating.
//!
//! The host owns the actual frame scheduling primitive; this state machine
//! decides when frames should be scheduled at all. Two conditions gate
//! running: the surface must be (near-)visible, and the animation must still
//! have something to show. Either condition failing stops the loop; the
//! matching transition back restarts it.

/// Lifecycle of one mounted effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created but not yet started.
    Idle,
    /// Frames are being scheduled.
    Running,
    /// Off-screen; no frames until the surface is visible again.
    Suspended,
    /// On-screen but the animation converged; waiting for a wake event.
    Settled,
}

/// External transitions fed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// Surface entered the (pre-triggered) viewport.
    EnteredView,
    /// Surface left the viewport.
    LeftView,
    /// Pointer activity that can change the rendered output.
    PointerWake,
    /// A frame was produced; `keep_running` is the animator's verdict.
    FrameProduced { keep_running: bool },
}

/// What the host must do with its scheduling primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    StartLoop,
    StopLoop,
}

/// Explicit `Idle → Running → Suspended/Settled → Running` machine.
#[derive(Debug)]
pub struct LoopDriver {
    state: LoopState,
    suspend_when_offscreen: bool,
}

impl LoopDriver {
    pub fn new(suspend_when_offscreen: bool) -> Self {
        Self {
            state: LoopState::Idle,
            suspend_when_offscreen,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Initial mount: the loop starts immediately and the visibility gate
    /// catches up through `LeftView` if the surface is actually off-screen.
    pub fn start(&mut self) -> LoopAction {
        self.state = LoopState::Running;
        LoopAction::StartLoop
    }

    pub fn handle(&mut self, event: LoopEvent) -> Option<LoopAction> {
        use LoopEvent::*;
        use LoopState::*;

        let (next, action) = match (self.state, event) {
            (Running, LeftView) if self.suspend_when_offscreen => {
                (Suspended, Some(LoopAction::StopLoop))
            }
            (Settled, LeftView) if self.suspend_when_offscreen => (Suspended, None),
            (Suspended, EnteredView) => (Running, Some(LoopAction::StartLoop)),
            (Idle, EnteredView) => (Running, Some(LoopAction::StartLoop)),
            // Re-entering view restarts a settled loop; it renders one frame
            // and settles again if nothing changed.
            (Settled, EnteredView) => (Running, Some(LoopAction::StartLoop)),
            (Settled, PointerWake) => (Running, Some(LoopAction::StartLoop)),
            (Idle, PointerWake) => (Running, Some(LoopAction::StartLoop)),
            (Running, FrameProduced { keep_running: false }) => {
                (Settled, Some(LoopAction::StopLoop))
            }
            (state, _) => (state, None),
        };

        self.state = next;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_suspends_and_resumes() {
        let mut driver = LoopDriver::new(true);
        assert_eq!(driver.start(), LoopAction::StartLoop);
        assert_eq!(
            driver.handle(LoopEvent::LeftView),
            Some(LoopAction::StopLoop)
        );
        assert_eq!(driver.state(), LoopState::Suspended);
        assert_eq!(
            driver.handle(LoopEvent::EnteredView),
            Some(LoopAction::StartLoop)
        );
        assert!(driver.is_running());
    }

    #[test]
    fn suspension_disabled_ignores_visibility() {
        let mut driver = LoopDriver::new(false);
        driver.start();
        assert_eq!(driver.handle(LoopEvent::LeftView), None);
        assert!(driver.is_running());
    }

    #[test]
    fn settled_loop_stops_and_pointer_wakes_it() {
        let mut driver = LoopDriver::new(true);
        driver.start();
        assert_eq!(
            driver.handle(LoopEvent::FrameProduced {
                keep_running: false
            }),
            Some(LoopAction::StopLoop)
        );
        assert_eq!(driver.state(), LoopState::Settled);
        assert_eq!(
            driver.handle(LoopEvent::PointerWake),
            Some(LoopAction::StartLoop)
        );
    }

    #[test]
    fn pointer_wake_does_not_override_suspension() {
        let mut driver = LoopDriver::new(true);
        driver.start();
        driver.handle(LoopEvent::LeftView);
        assert_eq!(driver.handle(LoopEvent::PointerWake), None);
        assert_eq!(driver.state(), LoopState::Suspended);
    }

    #[test]
    fn productive_frames_keep_running() {
        let mut driver = LoopDriver::new(true);
        driver.start();
        assert_eq!(
            driver.handle(LoopEvent::FrameProduced { keep_running: true }),
            None
        );
        assert!(driver.is_running());
    }

    #[test]
    fn settling_offscreen_then_returning_restarts_once_visible() {
        let mut driver = LoopDriver::new(true);
        driver.start();
        driver.handle(LoopEvent::FrameProduced {
            keep_running: false,
        });
        assert_eq!(driver.handle(LoopEvent::LeftView), None);
        assert_eq!(driver.state(), LoopState::Suspended);
        assert_eq!(
            driver.handle(LoopEvent::EnteredView),
            Some(LoopAction::StartLoop)
        );
    }
}
