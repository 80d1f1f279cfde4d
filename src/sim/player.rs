//! Pig vertical physics and power-up timers
//!
//! The pig's x is fixed; every tick gravity integrates into velocity, velocity
//! into position, and the position is clamped to the ground line. Car mode
//! suspends gravity and pins the pig to the ground; post-hit invincibility is
//! a pure timer with a blink cue for the renderer.

use glam::Vec2;

use super::runner::RunnerVariant;
use crate::consts::*;
use crate::Aabb;

#[derive(Debug, Clone)]
pub struct Player {
    /// Bottom edge of the pig (feet)
    pub y: f32,
    pub vel_y: f32,
    pub on_ground: bool,
    /// Ticks of car (vehicle) mode remaining; 0 = not in car
    pub car_ticks: u32,
    /// Ticks of post-hit invincibility remaining
    pub post_hit_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: GROUND_Y,
            vel_y: 0.0,
            on_ground: true,
            car_ticks: 0,
            post_hit_ticks: 0,
        }
    }
}

impl Player {
    pub fn in_car(&self) -> bool {
        self.car_ticks > 0
    }

    /// Any overlap-damage gate active (car or post-hit window)
    pub fn invincible(&self) -> bool {
        self.in_car() || self.post_hit_ticks > 0
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos_size(
            Vec2::new(PIG_X - PIG_WIDTH / 2.0, self.y - PIG_HEIGHT),
            Vec2::new(PIG_WIDTH, PIG_HEIGHT),
        )
    }

    /// Apply a jump/flap impulse, subject to variant gating. Ignored in car
    /// mode.
    pub fn impulse(&mut self, variant: RunnerVariant) {
        if self.in_car() {
            return;
        }
        match variant {
            RunnerVariant::Jump => {
                if self.on_ground {
                    self.vel_y = JUMP_IMPULSE;
                    self.on_ground = false;
                }
            }
            RunnerVariant::Flap => {
                self.vel_y = FLAP_IMPULSE;
                self.on_ground = false;
            }
        }
    }

    /// Advance one tick of vertical physics and timers
    pub fn step(&mut self, variant: RunnerVariant) {
        if self.post_hit_ticks > 0 {
            self.post_hit_ticks -= 1;
        }

        if self.in_car() {
            self.car_ticks -= 1;
            // Pinned to the ground while driving; gravity resumes from rest
            self.y = GROUND_Y;
            self.vel_y = 0.0;
            self.on_ground = true;
            return;
        }

        self.vel_y += GRAVITY;
        self.y += self.vel_y;

        if self.y >= GROUND_Y {
            self.y = GROUND_Y;
            self.vel_y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        // Flap variant has a hard ceiling
        if variant == RunnerVariant::Flap && self.y - PIG_HEIGHT < 0.0 {
            self.y = PIG_HEIGHT;
            self.vel_y = 0.0;
        }
    }

    pub fn enter_car(&mut self) {
        self.car_ticks = CAR_DURATION_TICKS;
    }

    /// Start the post-hit invincibility window
    pub fn take_hit(&mut self) {
        self.post_hit_ticks = POST_HIT_INVINCIBILITY_TICKS;
    }

    /// Blink cue: true on the "hidden" half of the blink cycle
    pub fn blink_hidden(&self, frame: u64) -> bool {
        self.post_hit_ticks > 0 && (frame / BLINK_PERIOD_TICKS) % 2 == 0
    }
}
