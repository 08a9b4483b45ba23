use crate::config::PlayerConfig;
use crate::sprite::{lerp, SpriteAnimator};
use macroquad::prelude::*;

/// Way the player is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Up the screen.
    #[default]
    North,
    /// Right.
    East,
    /// Down the screen.
    South,
    /// Left.
    West,
}

/// Movement keys held this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveInput {
    /// W or up arrow.
    pub up: bool,
    /// S or down arrow.
    pub down: bool,
    /// A or left arrow.
    pub left: bool,
    /// D or right arrow.
    pub right: bool,
}

impl MoveInput {
    /// WASD or arrow keys. Needs a running macroquad window.
    pub fn from_keys() -> Self {
        Self {
            up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        }
    }
}

/// Facing the camera; sheet row 0.
pub const IDLE_FORWARD: &str = "idle_forward";
/// Facing right, mirrored for left; sheet row 1.
pub const IDLE_RIGHT: &str = "idle_right";
/// Facing away; sheet row 2.
pub const IDLE_BACK: &str = "idle_back";

const IDLE_FRAMES: u32 = 6;

/// Top-down player with accelerate/friction movement.
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner, in pixels.
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Set by the last movement key held.
    pub facing: Direction,
    max_speed: f32,
    acceleration: f32,
    friction: f32,
    frame_size: UVec2,
    animator: SpriteAnimator,
}

impl Player {
    /// Spawns at rest at `cfg.start` with the idle sequences registered.
    pub fn new(cfg: &PlayerConfig) -> Self {
        let frame_size = uvec2(cfg.frame_size[0], cfg.frame_size[1]);
        let mut animator = SpriteAnimator::new(frame_size, cfg.frame_time);
        for (row, name) in [IDLE_FORWARD, IDLE_RIGHT, IDLE_BACK].into_iter().enumerate() {
            let frames = (0..IDLE_FRAMES).map(|col| (col, row as u32)).collect();
            animator.add_sequence(name, frames);
        }

        Self {
            position: vec2(cfg.start[0], cfg.start[1]),
            velocity: Vec2::ZERO,
            facing: Direction::default(),
            max_speed: cfg.max_speed,
            acceleration: cfg.acceleration,
            friction: cfg.friction,
            frame_size,
            animator,
        }
    }

    /// Advances movement and animation by `dt` seconds.
    pub fn update(&mut self, input: MoveInput, dt: f32) {
        let step = self.acceleration * dt;
        if input.up {
            self.velocity.y -= step;
            self.facing = Direction::North;
        }
        if input.left {
            self.velocity.x -= step;
            self.facing = Direction::West;
        }
        if input.down {
            self.velocity.y += step;
            self.facing = Direction::South;
        }
        if input.right {
            self.velocity.x += step;
            self.facing = Direction::East;
        }

        let drag = self.friction * dt;
        self.velocity.x = toward_zero(self.velocity.x, drag);
        self.velocity.y = toward_zero(self.velocity.y, drag);

        self.velocity = self
            .velocity
            .clamp(Vec2::splat(-self.max_speed), Vec2::splat(self.max_speed));
        self.position += self.velocity * dt;

        // Walk cycle speeds up to twice the base rate at full speed.
        let base = self.animator.frame_time();
        let frame_time = lerp(base, base * 0.5, self.speed_ratio());
        let (sequence, _) = self.animation();
        self.animator.advance_with(sequence, dt, frame_time);
    }

    fn speed_ratio(&self) -> f32 {
        if self.max_speed > 0.0 {
            (self.velocity.length() / self.max_speed).min(1.0)
        } else {
            0.0
        }
    }

    /// Sequence name for the current facing and whether to mirror it.
    pub fn animation(&self) -> (&'static str, bool) {
        match self.facing {
            Direction::North => (IDLE_BACK, false),
            Direction::South => (IDLE_FORWARD, false),
            Direction::East => (IDLE_RIGHT, false),
            Direction::West => (IDLE_RIGHT, true),
        }
    }

    /// Sheet rectangle of the frame to draw now.
    pub fn source_rect(&self) -> Option<Rect> {
        self.animator.source_rect(self.animation().0)
    }

    /// Screen rectangle, snapped to whole pixels.
    pub fn dest_rect(&self) -> Rect {
        Rect::new(
            self.position.x.round(),
            self.position.y.round(),
            self.frame_size.x as f32,
            self.frame_size.y as f32,
        )
    }

    /// Frame clock driving the sprite.
    pub fn animator(&self) -> &SpriteAnimator {
        &self.animator
    }
}

fn toward_zero(v: f32, amount: f32) -> f32 {
    if v > 0.0 {
        (v - amount).max(0.0)
    } else if v < 0.0 {
        (v + amount).min(0.0)
    } else {
        0.0
    }
}
