//! Per-entity animation state machines
//!
//! Each entity owns its own `AnimationState`; clips are never shared between
//! entities. Frames are opaque handles minted by the asset provider — the
//! sim only tracks which frame is current and for how long.

use thiserror::Error;

/// Opaque handle to a pre-rendered, pre-scaled frame owned by the asset
/// provider. Passed through to the renderer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// The fixed set of animation identifiers. Entities register clips for the
/// subset they use at construction time; looking up an unregistered id is a
/// typed error, not a dictionary miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    Idle,
    WalkSide,
    WalkDown,
    WalkUp,
    Defeated,
}

impl AnimationId {
    pub const COUNT: usize = 5;

    fn slot(self) -> usize {
        match self {
            AnimationId::Idle => 0,
            AnimationId::WalkSide => 1,
            AnimationId::WalkDown => 2,
            AnimationId::WalkUp => 3,
            AnimationId::Defeated => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationId::Idle => "idle",
            AnimationId::WalkSide => "walk_side",
            AnimationId::WalkDown => "walk_down",
            AnimationId::WalkUp => "walk_up",
            AnimationId::Defeated => "defeated",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// Requested an animation the entity never registered. Non-fatal: the
    /// caller logs it and the current animation stays active.
    #[error("no animation registered for '{}'", .0.as_str())]
    UnknownAnimation(AnimationId),
}

/// An ordered frame sequence with a fixed per-frame duration.
#[derive(Debug, Clone)]
pub struct Clip {
    frames: Vec<FrameHandle>,
    frame_duration_ms: f32,
}

impl Clip {
    pub fn new(frames: Vec<FrameHandle>, frame_duration_ms: f32) -> Self {
        debug_assert!(!frames.is_empty(), "a clip needs at least one frame");
        Self {
            frames,
            frame_duration_ms,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Frame-cycling state machine driven by elapsed wall time.
///
/// Every registered clip is a cyclic terminal state: once selected it loops
/// forever until `set` switches away. Switching to the already-active id is
/// a no-op that preserves in-progress frame timing.
#[derive(Debug, Clone)]
pub struct AnimationState {
    clips: [Option<Clip>; AnimationId::COUNT],
    current: Option<AnimationId>,
    frame_index: usize,
    time_in_frame_ms: f32,
    /// Draw the current frame horizontally mirrored.
    pub mirror_x: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            clips: [None, None, None, None, None],
            current: None,
            frame_index: 0,
            time_in_frame_ms: 0.0,
            mirror_x: false,
        }
    }

    /// Register (or replace) the clip for `id`.
    pub fn register(&mut self, id: AnimationId, clip: Clip) {
        self.clips[id.slot()] = Some(clip);
    }

    /// Switch the active animation.
    ///
    /// Selecting the already-active id preserves frame index and accumulated
    /// time; a real switch resets both to zero. An unregistered id leaves the
    /// state untouched and reports `UnknownAnimation`.
    pub fn set(&mut self, id: AnimationId) -> Result<(), AnimationError> {
        if self.clips[id.slot()].is_none() {
            return Err(AnimationError::UnknownAnimation(id));
        }
        if self.current == Some(id) {
            return Ok(());
        }
        self.current = Some(id);
        self.frame_index = 0;
        self.time_in_frame_ms = 0.0;
        Ok(())
    }

    /// Advance the active clip by `dt_ms`. Once accumulated time exceeds the
    /// clip's frame duration the index steps forward, wrapping modulo the
    /// frame count. With no animation ever set this is a no-op.
    pub fn advance(&mut self, dt_ms: f32) {
        let Some(clip) = self.current_clip() else {
            return;
        };
        let frame_duration = clip.frame_duration_ms;
        let frame_count = clip.frame_count();
        self.time_in_frame_ms += dt_ms;
        if self.time_in_frame_ms > frame_duration {
            self.time_in_frame_ms = 0.0;
            self.frame_index = (self.frame_index + 1) % frame_count;
        }
    }

    pub fn current(&self) -> Option<AnimationId> {
        self.current
    }

    fn current_clip(&self) -> Option<&Clip> {
        self.clips[self.current?.slot()].as_ref()
    }

    /// Handle of the frame to draw this tick, or `None` if no animation was
    /// ever set (the draw is skipped).
    pub fn current_frame(&self) -> Option<FrameHandle> {
        let clip = self.current_clip()?;
        clip.frames.get(self.frame_index).copied()
    }

    #[cfg(test)]
    pub(crate) fn frame_index(&self) -> usize {
        self.frame_index
    }

    #[cfg(test)]
    pub(crate) fn time_in_frame_ms(&self) -> f32 {
        self.time_in_frame_ms
    }
}
