use crate::constants::{
    BUBBLE_RADIUS, FRICTION, GRAVITY, MAX_DRAG_DIST, MAX_FORCE_MULT, MIN_FORCE_MULT,
    SLINGSHOT_BOTTOM_OFFSET,
};
use crate::grid::{seed_grid, Bubble, BubbleColor};
use crate::hint::TargetSummary;
use crate::rng::SeededRng;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Live session state. The grid is static after seeding and the projectile
/// flies uncollided; the simulation exists to keep the render surface alive,
/// not to score shots.
#[derive(Clone)]
pub struct Game {
    width: f32,
    height: f32,
    bubbles: Vec<Bubble>,
    anchor: Vec2,
    ball_pos: Vec2,
    ball_vel: Vec2,
    ball_color: BubbleColor,
    is_flying: bool,
    score: u32,
    tick_count: u64,
    rng: SeededRng,
}

impl Game {
    pub fn new(width: u32, height: u32, seed: u32) -> Self {
        let width = width as f32;
        let height = height as f32;
        let mut rng = SeededRng::new(seed);
        let bubbles = seed_grid(width, &mut rng);
        let anchor = Vec2::new(width / 2.0, height - SLINGSHOT_BOTTOM_OFFSET);
        let ball_color = BubbleColor::ALL[rng.next_index(BubbleColor::ALL.len())];

        Self {
            width,
            height,
            bubbles,
            anchor,
            ball_pos: anchor,
            ball_vel: Vec2::default(),
            ball_color,
            is_flying: false,
            score: 0,
            tick_count: 0,
            rng,
        }
    }

    /// Advances one animation tick.
    pub fn step(&mut self) {
        self.tick_count += 1;
        if !self.is_flying {
            return;
        }

        self.ball_vel.y += GRAVITY;
        self.ball_vel.x *= FRICTION;
        self.ball_vel.y *= FRICTION;
        self.ball_pos.x += self.ball_vel.x;
        self.ball_pos.y += self.ball_vel.y;

        let out_of_bounds = self.ball_pos.x < -BUBBLE_RADIUS
            || self.ball_pos.x > self.width + BUBBLE_RADIUS
            || self.ball_pos.y < -BUBBLE_RADIUS
            || self.ball_pos.y > self.height + BUBBLE_RADIUS;
        if out_of_bounds {
            self.park_ball();
        }
    }

    fn park_ball(&mut self) {
        self.is_flying = false;
        self.ball_pos = self.anchor;
        self.ball_vel = Vec2::default();
        self.ball_color = BubbleColor::ALL[self.rng.next_index(BubbleColor::ALL.len())];
    }

    /// Fires the projectile opposite the drag direction. Ignored while a
    /// shot is already in flight.
    pub fn launch(&mut self, drag: Vec2) {
        if self.is_flying {
            return;
        }
        let dist = drag.length();
        if dist <= f32::EPSILON {
            return;
        }

        // A pull past the max drag distance behaves like a max-distance pull.
        let clamped = dist.min(MAX_DRAG_DIST);
        let force = MIN_FORCE_MULT + (MAX_FORCE_MULT - MIN_FORCE_MULT) * (clamped / MAX_DRAG_DIST);
        let scale = clamped / dist;
        self.ball_vel = Vec2::new(-drag.x * scale * force, -drag.y * scale * force);
        self.is_flying = true;
    }

    pub fn is_flying(&self) -> bool {
        self.is_flying
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick_count: self.tick_count,
            score: self.score,
            width: self.width,
            height: self.height,
            bubbles: self.bubbles.clone(),
            anchor: self.anchor,
            ball_pos: self.ball_pos,
            ball_vel: self.ball_vel,
            ball_color: self.ball_color,
            is_flying: self.is_flying,
        }
    }
}

/// Immutable view of one tick, consumed by the rasterizer and by hint
/// context extraction.
#[derive(Clone, Debug)]
pub struct WorldSnapshot {
    pub tick_count: u64,
    pub score: u32,
    pub width: f32,
    pub height: f32,
    pub bubbles: Vec<Bubble>,
    pub anchor: Vec2,
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
    pub ball_color: BubbleColor,
    pub is_flying: bool,
}

impl WorldSnapshot {
    /// Per-color counts of bubbles still on the board, colors with zero
    /// remaining omitted.
    pub fn target_summaries(&self) -> Vec<TargetSummary> {
        let mut summaries = Vec::new();
        for color in BubbleColor::ALL {
            let count = self
                .bubbles
                .iter()
                .filter(|bubble| bubble.active && bubble.color == color)
                .count() as u32;
            if count > 0 {
                summaries.push(TargetSummary {
                    color: color.label().to_string(),
                    count,
                    points: color.points(),
                });
            }
        }
        summaries
    }

    /// Deepest occupied row; 0 when the board is clear.
    pub fn danger_row(&self) -> u32 {
        self.bubbles
            .iter()
            .filter(|bubble| bubble.active)
            .map(|bubble| bubble.row)
            .max()
            .unwrap_or(0)
    }
}
