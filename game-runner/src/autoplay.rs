use shooter_core::constants::MAX_DRAG_DIST;
use shooter_core::rng::SeededRng;
use shooter_core::Vec2;

const FIRE_INTERVAL_TICKS: u64 = 90;

/// Pulls the slingshot on a fixed cadence with seeded aim variation so a
/// headless session keeps the projectile moving.
pub struct Autoplay {
    rng: SeededRng,
}

impl Autoplay {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SeededRng::new(seed),
        }
    }

    /// Returns a drag vector when it is time to fire. Dragging downward
    /// launches the shot up toward the grid.
    pub fn next_drag(&mut self, tick: u64) -> Option<Vec2> {
        if tick == 0 || tick % FIRE_INTERVAL_TICKS != 0 {
            return None;
        }
        let spread = self.rng.next_unit() * 2.0 - 1.0;
        let pull = 0.4 + self.rng.next_unit() * 0.6;
        Some(Vec2::new(spread * 60.0, pull * MAX_DRAG_DIST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_on_the_cadence() {
        let mut autoplay = Autoplay::new(7);
        assert!(autoplay.next_drag(0).is_none());
        assert!(autoplay.next_drag(1).is_none());
        assert!(autoplay.next_drag(FIRE_INTERVAL_TICKS - 1).is_none());
        assert!(autoplay.next_drag(FIRE_INTERVAL_TICKS).is_some());
    }

    #[test]
    fn drags_always_pull_downward_within_limits() {
        let mut autoplay = Autoplay::new(0xDEAD_BEEF);
        for round in 1..=32u64 {
            let drag = autoplay
                .next_drag(round * FIRE_INTERVAL_TICKS)
                .expect("cadence tick fires");
            assert!(drag.y > 0.0);
            assert!(drag.y <= MAX_DRAG_DIST);
            assert!(drag.x.abs() <= 60.0);
        }
    }

    #[test]
    fn same_seed_replays_the_same_aim() {
        let mut a = Autoplay::new(42);
        let mut b = Autoplay::new(42);
        for round in 1..=8u64 {
            assert_eq!(
                a.next_drag(round * FIRE_INTERVAL_TICKS),
                b.next_drag(round * FIRE_INTERVAL_TICKS)
            );
        }
    }
}
