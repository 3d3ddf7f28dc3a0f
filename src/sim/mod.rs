//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick ordering (see `tick`)
//! - Seeded RNG only
//! - No rendering or platform dependencies (frames are opaque handles)

pub mod animation;
pub mod collision;
pub mod state;
pub mod steering;
pub mod tick;
pub mod view;

pub use animation::{AnimationError, AnimationId, AnimationState, Clip, FrameHandle};
pub use collision::{CollisionBox, Rect, circle_overlaps_rect};
pub use state::{
    Entity, GamePhase, GameState, PowerBall, PowerBar, Projectile, SpriteLibrary, WaveState,
};
pub use steering::pursuit_step;
pub use tick::{TickInput, tick};
pub use view::{DrawCommand, Hud, RenderFrame, compose};
