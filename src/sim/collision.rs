//! Axis-aligned collision detection
//!
//! All damage detection runs on axis-aligned rectangles. Collision boxes are
//! anchored to their owning entity through a fixed offset and must be synced
//! from the anchor every tick before any overlap test runs — never test a
//! stale box.

use glam::Vec2;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Standard AABB test. Edge-touching (zero-area) overlap does NOT count
    /// as a collision, so the comparisons are strict.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// True if the circle and rectangle share interior area. Used for the power
/// ball, the only non-rectangular hazard. Same strict-boundary convention as
/// `Rect::overlaps`.
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.x, rect.x + rect.w),
        center.y.clamp(rect.y, rect.y + rect.h),
    );
    center.distance_squared(closest) < radius * radius
}

/// A collision rectangle owned by one entity, offset from its anchor.
#[derive(Debug, Clone)]
pub struct CollisionBox {
    pub rect: Rect,
    pub offset: Vec2,
}

impl CollisionBox {
    pub fn new(size: Vec2, offset: Vec2) -> Self {
        Self {
            rect: Rect::new(offset.x, offset.y, size.x, size.y),
            offset,
        }
    }

    /// Recompute the box position from the owner's anchor.
    pub fn sync(&mut self, anchor: Vec2) {
        self.rect.x = anchor.x + self.offset.x;
        self.rect.y = anchor.y + self.offset.y;
    }

    pub fn overlaps(&self, other: &CollisionBox) -> bool {
        self.rect.overlaps(&other.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_edge_touching_is_not_collision() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the x=10 edge only
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        // Corner touch
        let c = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_sync_follows_anchor() {
        let mut hitbox = CollisionBox::new(Vec2::new(60.0, 80.0), Vec2::new(60.0, 0.0));
        hitbox.sync(Vec2::new(100.0, 100.0));
        assert_eq!(hitbox.rect.x, 160.0);
        assert_eq!(hitbox.rect.y, 100.0);

        hitbox.sync(Vec2::new(130.0, 90.0));
        assert_eq!(hitbox.rect.x, 190.0);
        assert_eq!(hitbox.rect.y, 90.0);
    }

    #[test]
    fn test_contact_scenario_boxes() {
        // Enemy at (100,100) with offset (60,0); player at (130,100) with
        // offset (40,0). Boxes land at x=160 and x=170 and must overlap.
        let mut enemy = CollisionBox::new(Vec2::new(60.0, 80.0), Vec2::new(60.0, 0.0));
        let mut player = CollisionBox::new(Vec2::new(60.0, 80.0), Vec2::new(40.0, 0.0));
        enemy.sync(Vec2::new(100.0, 100.0));
        player.sync(Vec2::new(130.0, 100.0));
        assert!(enemy.overlaps(&player));
        assert!(player.overlaps(&enemy));
    }

    #[test]
    fn test_circle_against_rect() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        // Center inside
        assert!(circle_overlaps_rect(Vec2::new(120.0, 120.0), 5.0, &rect));
        // Near a corner, close enough
        assert!(circle_overlaps_rect(Vec2::new(95.0, 95.0), 10.0, &rect));
        // Near a corner, too far (distance is ~7.07)
        assert!(!circle_overlaps_rect(Vec2::new(95.0, 95.0), 7.0, &rect));
        // Exactly touching the left edge: not a collision
        assert!(!circle_overlaps_rect(Vec2::new(90.0, 120.0), 10.0, &rect));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.1f32..200.0, ah in 0.1f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.1f32..200.0, bh in 0.1f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_rect_never_overlaps_translated_copy_beyond_extent(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 0.1f32..200.0, h in 0.1f32..200.0,
        ) {
            let a = Rect::new(x, y, w, h);
            // Shifted by exactly its own width: edge contact only
            let b = Rect::new(x + w, y, w, h);
            prop_assert!(!a.overlaps(&b));
        }
    }
}
