//! Axis-aligned collision detection

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes. Rectangles that only share an edge do
    /// not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Id of the first obstacle overlapping the player, in collection order
pub fn first_hit(player: &Rect, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| player.overlaps(&o.rect()))
        .map(|o| o.id)
}

/// Check if the player overlaps any obstacle
pub fn player_hits_any(player: &Rect, obstacles: &[Obstacle]) -> bool {
    first_hit(player, obstacles).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn obstacle(id: u32, x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            speed: 100.0,
        }
    }

    fn player() -> Rect {
        Rect::new(Vec2::new(100.0, 500.0), Vec2::new(48.0, 60.0))
    }

    #[test]
    fn test_overlap_detected() {
        let obstacles = [obstacle(1, 120.0, 520.0, 60.0, 12.0)];
        assert!(player_hits_any(&player(), &obstacles));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let p = player();
        // Right edge of player == left edge of obstacle
        let right = obstacle(1, 148.0, 520.0, 60.0, 12.0);
        // Left edge of player == right edge of obstacle
        let left = obstacle(2, 40.0, 520.0, 60.0, 12.0);
        // Bottom of obstacle == top of player
        let above = obstacle(3, 110.0, 488.0, 60.0, 12.0);
        // Top of obstacle == bottom of player
        let below = obstacle(4, 110.0, 560.0, 60.0, 12.0);

        assert!(!player_hits_any(&p, &[right, left, above, below]));
    }

    #[test]
    fn test_first_hit_in_order() {
        let obstacles = [
            obstacle(7, 0.0, 0.0, 60.0, 12.0),
            obstacle(8, 110.0, 510.0, 60.0, 12.0),
            obstacle(9, 100.0, 540.0, 60.0, 12.0),
        ];
        assert_eq!(first_hit(&player(), &obstacles), Some(8));
        assert_eq!(first_hit(&player(), &[]), None);
    }

    fn reference_overlap(a: &Rect, b: &Rect) -> bool {
        let x = a.min.x.max(b.min.x) < a.max().x.min(b.max().x);
        let y = a.min.y.max(b.min.y) < a.max().y.min(b.max().y);
        x && y
    }

    proptest! {
        #[test]
        fn prop_hit_iff_some_strict_overlap(
            rects in prop::collection::vec(
                (0i32..360, -40i32..680, 1i32..130, 1i32..30),
                0..12,
            ),
        ) {
            let p = player();
            let obstacles: Vec<Obstacle> = rects
                .iter()
                .enumerate()
                .map(|(i, &(x, y, w, h))| obstacle(i as u32, x as f32, y as f32, w as f32, h as f32))
                .collect();

            let expected = obstacles.iter().any(|o| reference_overlap(&p, &o.rect()));
            prop_assert_eq!(player_hits_any(&p, &obstacles), expected);
        }
    }
}
