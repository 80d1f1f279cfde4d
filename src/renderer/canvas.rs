//! Canvas 2D draw calls for both games
//!
//! Emoji glyphs are drawn centered on their hitboxes; the pig blinks during
//! post-hit invincibility unless reduced motion is on.

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{hole_rect, Occupant, RunnerState, WhackState};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Render one frame of the runner
    pub fn draw_runner(&self, state: &RunnerState, settings: &Settings) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        // Sky
        ctx.set_fill_style_str("#70c5ce");
        ctx.fill_rect(
            0.0,
            0.0,
            CANVAS_WIDTH as f64,
            (CANVAS_HEIGHT - GROUND_HEIGHT) as f64,
        );

        self.draw_ground(state.frame);

        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        for e in &state.entities {
            ctx.set_font(&format!("{}px Arial", e.kind.glyph_px()));
            let c = e.hitbox().center();
            let _ = ctx.fill_text(e.kind.glyph(), c.x as f64, c.y as f64);
        }

        // Pig (or car), blinking through the post-hit window
        let blink = !settings.reduced_motion && state.player.blink_hidden(state.frame);
        ctx.set_global_alpha(if blink { 0.5 } else { 1.0 });
        let (glyph, size) = if state.player.in_car() {
            ("🏎️", 40.0)
        } else {
            ("🐷", 30.0)
        };
        ctx.set_font(&format!("{size}px Arial"));
        let _ = ctx.fill_text(
            glyph,
            PIG_X as f64,
            (state.player.y - PIG_HEIGHT / 2.0) as f64,
        );
        ctx.set_global_alpha(1.0);

        if state.hit_flash_ticks > 0 && settings.effective_hit_flash() {
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.4)");
            ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
        }
    }

    /// Ground strip with a simple scroll pattern keyed off the frame counter
    fn draw_ground(&self, frame: u64) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("#8B4513");
        ctx.fill_rect(
            0.0,
            GROUND_Y as f64,
            CANVAS_WIDTH as f64,
            GROUND_HEIGHT as f64,
        );
        ctx.set_fill_style_str("#A0522D");
        let mut i = 0.0f32;
        while i < CANVAS_WIDTH {
            if (frame + i as u64) % 40 < 20 {
                ctx.fill_rect(i as f64, (GROUND_Y + 5.0) as f64, 10.0, 5.0);
            }
            i += 20.0;
        }
    }

    /// Render one frame of the whack grid
    pub fn draw_whack(&self, state: &WhackState, settings: &Settings) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        // Grass backdrop
        ctx.set_fill_style_str("#4a8f3c");
        ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        for (idx, hole) in state.holes.iter().enumerate() {
            let rect = hole_rect(idx);
            let c = rect.center();

            // Hole mouth; the whack highlight is a flash cue like the
            // runner's screen darken, so it obeys the same toggle
            let highlight = hole.hit_ticks > 0 && settings.effective_hit_flash();
            ctx.set_fill_style_str(if highlight { "#d9a441" } else { "#3b2a1a" });
            ctx.begin_path();
            let _ = ctx.ellipse(
                c.x as f64,
                (rect.max.y - rect.height() / 4.0) as f64,
                (rect.width() / 2.0) as f64,
                (rect.height() / 4.0) as f64,
                0.0,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();

            if hole.up && hole.occupant != Occupant::Empty {
                ctx.set_font("36px Arial");
                let _ = ctx.fill_text(hole.occupant.glyph(), c.x as f64, c.y as f64);
            }
        }
    }
}
