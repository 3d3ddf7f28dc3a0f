//! Platform abstraction layer
//!
//! The sim never touches a window, an image file, an input device or a
//! timer directly; it consumes these four narrow interfaces once per tick
//! at well-defined boundaries (input gather at tick start, present at tick
//! end). Headless implementations below back the demo binary and tests;
//! a real build plugs in image/window/audio-backed ones.

use glam::Vec2;

use crate::sim::{FrameHandle, RenderFrame, TickInput};

/// Pre-scaled frames cut from one sprite sheet, ready for the renderer.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub frames: Vec<FrameHandle>,
    /// Dimensions of a single frame after scaling.
    pub frame_size: Vec2,
}

/// Loads and slices sprite sheets. The sim keeps only the opaque handles.
pub trait AssetProvider {
    fn load_sheet(&mut self, sheet: &str, frame_count: usize, scale: f32) -> SpriteSheet;
}

/// Consumes one `RenderFrame` per tick.
pub trait Renderer {
    fn present(&mut self, frame: &RenderFrame);
}

/// Polled exactly once per tick for the frame's discrete input signals.
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Enforces the target tick rate and reports real elapsed time. The sim is
/// rate-agnostic: all time-based math uses the returned milliseconds.
pub trait Clock {
    /// Block until the next frame is due; returns elapsed ms since the
    /// previous call.
    fn wait_frame(&mut self) -> f32;
}

/// Headless asset provider minting sequential frame handles. Frame content
/// does not exist; only the counts and sizes matter to the sim.
#[derive(Debug, Default)]
pub struct StubAssets {
    next_handle: u32,
}

impl AssetProvider for StubAssets {
    fn load_sheet(&mut self, sheet: &str, frame_count: usize, scale: f32) -> SpriteSheet {
        let first = self.next_handle;
        self.next_handle += frame_count as u32;
        log::debug!("stub sheet '{sheet}': {frame_count} frames at x{scale}");
        SpriteSheet {
            frames: (first..self.next_handle).map(FrameHandle).collect(),
            frame_size: Vec2::new(64.0, 64.0) * scale,
        }
    }
}

/// Renderer that drops every frame after logging a summary at trace level.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, frame: &RenderFrame) {
        log::trace!(
            "frame: {} sprites, {} overlays, hp {}",
            frame.sprites.len(),
            frame.overlays.len(),
            frame.hud.player_health
        );
    }
}

/// Replays a fixed input script, then reports idle forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(script: Vec<TickInput>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let input = self.script.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Clock that never sleeps and always reports the same step — headless runs
/// proceed as fast as the host allows while the sim sees a steady rate.
#[derive(Debug)]
pub struct FixedClock {
    step_ms: f32,
}

impl FixedClock {
    pub fn from_hz(hz: u32) -> Self {
        Self {
            step_ms: 1000.0 / hz.max(1) as f32,
        }
    }
}

impl Clock for FixedClock {
    fn wait_frame(&mut self) -> f32 {
        self.step_ms
    }
}
