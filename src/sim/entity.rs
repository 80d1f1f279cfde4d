//! Entity kinds and their data-driven effect table
//!
//! Everything the collision resolver needs to know about a kind - category,
//! point value, damage - lives in the tables here, so spawn weights and hit
//! effects can be tested without a running game.

use glam::Vec2;

use crate::consts::*;
use crate::Aabb;

/// Spawn category; each category keeps its own randomized spawn schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Obstacle,
    Apple,
    Corn,
    CarKey,
    Hawk,
}

/// What a spawned thing is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Cactus,
    Tree,
    Rock,
    Apple,
    Corn,
    CarKey,
    Hawk,
}

impl EntityKind {
    pub fn category(self) -> Category {
        match self {
            EntityKind::Cactus | EntityKind::Tree | EntityKind::Rock => Category::Obstacle,
            EntityKind::Apple => Category::Apple,
            EntityKind::Corn => Category::Corn,
            EntityKind::CarKey => Category::CarKey,
            EntityKind::Hawk => Category::Hawk,
        }
    }

    /// Points granted on collection (collectibles only)
    pub fn score_value(self) -> i64 {
        match self {
            EntityKind::Apple => 5,
            EntityKind::Corn => 3,
            _ => 0,
        }
    }

    /// Lives lost on a damaging overlap
    pub fn damage(self) -> i32 {
        match self {
            EntityKind::Cactus | EntityKind::Tree | EntityKind::Rock => 1,
            EntityKind::Hawk => 2,
            _ => 0,
        }
    }

    /// Damaging kinds; overlap costs lives unless the pig is invincible
    pub fn is_damaging(self) -> bool {
        self.damage() > 0
    }

    /// Ground obstacles that award a pass-through point when cleared
    pub fn is_obstacle(self) -> bool {
        matches!(self, EntityKind::Cactus | EntityKind::Tree | EntityKind::Rock)
    }

    pub fn is_collectible(self) -> bool {
        matches!(self, EntityKind::Apple | EntityKind::Corn)
    }

    pub fn is_powerup(self) -> bool {
        matches!(self, EntityKind::CarKey)
    }

    /// Hitbox size
    pub fn size(self) -> Vec2 {
        match self {
            EntityKind::Cactus => Vec2::new(30.0, 30.0),
            EntityKind::Tree => Vec2::new(25.0, 50.0),
            EntityKind::Rock => Vec2::new(40.0, 20.0),
            EntityKind::Apple => Vec2::new(25.0, 25.0),
            EntityKind::Corn => Vec2::new(25.0, 25.0),
            EntityKind::CarKey => Vec2::new(25.0, 25.0),
            EntityKind::Hawk => Vec2::new(35.0, 25.0),
        }
    }

    /// Glyph drawn for this kind
    pub fn glyph(self) -> &'static str {
        match self {
            EntityKind::Cactus => "🌵",
            EntityKind::Tree => "🌲",
            EntityKind::Rock => "🪨",
            EntityKind::Apple => "🍎",
            EntityKind::Corn => "🌽",
            EntityKind::CarKey => "🔑",
            EntityKind::Hawk => "🦅",
        }
    }

    /// Font size for the glyph, in px
    pub fn glyph_px(self) -> f32 {
        match self {
            EntityKind::Cactus => 30.0,
            EntityKind::Tree => 40.0,
            EntityKind::Rock => 25.0,
            EntityKind::Hawk => 30.0,
            _ => 25.0,
        }
    }
}

/// A live entity on the play field
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Pass-through point already awarded (obstacles only)
    pub passed: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            passed: false,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.kind.size())
    }

    /// Translate toward the trailing edge by the scroll speed
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// Fully past the trailing edge of the play field
    pub fn off_screen(&self) -> bool {
        self.pos.x + self.kind.size().x < 0.0
    }
}
