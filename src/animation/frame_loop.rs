/// Whether frames are being scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    /// No frames requested.
    #[default]
    Idle,
    /// A frame is requested every tick.
    Animating,
}

/// Everything the loop needs to know to decide about the next frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopInputs {
    /// The pointer is over the host element.
    pub pointer_active: bool,
    /// The lens is drawn (including while its hide animation runs).
    pub lens_visible: bool,
    /// The follower or radius animation has not settled.
    pub pending_motion: bool,
}

impl LoopInputs {
    fn wants_frames(self) -> bool {
        self.pointer_active || self.lens_visible || self.pending_motion
    }
}

/// Outcome of one [`FrameLoop::decide`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopTransition {
    /// Idle -> Animating.
    Start,
    /// Animating -> Idle.
    Stop,
    /// Stays animating.
    Continue,
    /// Stays idle.
    StayIdle,
}

/// Two-state frame scheduler. All transitions go through [`FrameLoop::decide`].
#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    starts: u64,
}

impl FrameLoop {
    /// An idle loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `inputs`: animating iff any input holds.
    pub fn decide(&mut self, inputs: LoopInputs) -> LoopTransition {
        let transition = match (self.state, inputs.wants_frames()) {
            (LoopState::Idle, true) => LoopTransition::Start,
            (LoopState::Idle, false) => LoopTransition::StayIdle,
            (LoopState::Animating, true) => LoopTransition::Continue,
            (LoopState::Animating, false) => LoopTransition::Stop,
        };
        match transition {
            LoopTransition::Start => {
                self.state = LoopState::Animating;
                self.starts = self.starts.saturating_add(1);
                tracing::debug!("frame loop started");
            }
            LoopTransition::Stop => {
                self.state = LoopState::Idle;
                tracing::debug!("frame loop stopped");
            }
            LoopTransition::Continue | LoopTransition::StayIdle => {}
        }
        transition
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Shorthand for `state() == Animating`.
    pub fn is_animating(&self) -> bool {
        self.state == LoopState::Animating
    }

    /// How many times the loop went from idle to animating.
    pub fn starts(&self) -> u64 {
        self.starts
    }
}
