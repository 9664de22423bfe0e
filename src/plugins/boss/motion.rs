//! Boss movement patterns.
//!
//! The catalog describes movement in level coordinates. Once the boss has
//! arrived, [`fit_to_frame`] turns that description into a [`BossMotion`] that
//! stays inside the locked camera frame, wherever the entrance ended.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::content::bosses::{BossDefinition, MovePattern};

/// Resolved per-boss movement state, advanced once per fixed tick.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum BossMotion {
    /// Bounce on x between `min` and `max`. The sign of `speed` is the direction.
    Horizontal { min: f32, max: f32, speed: f32 },
    /// Bounce on y between `min` and `max`.
    Vertical { min: f32, max: f32, speed: f32 },
    /// `angle` advances by `step` radians per tick.
    Circular {
        center: Vec2,
        radius: f32,
        angle: f32,
        step: f32,
    },
    Static,
}

/// One bounce step: move, clamp, and point `speed` back inside at a boundary.
#[inline]
fn bounce(value: f32, min: f32, max: f32, speed: &mut f32, dt: f32) -> f32 {
    let next = (value + *speed * dt).clamp(min, max);
    if next <= min {
        *speed = speed.abs();
    } else if next >= max {
        *speed = -speed.abs();
    }
    next
}

impl BossMotion {
    /// Position after one tick of `dt` seconds, starting from `pos`.
    pub fn advance(&mut self, pos: Vec2, dt: f32) -> Vec2 {
        match self {
            BossMotion::Horizontal { min, max, speed } => {
                Vec2::new(bounce(pos.x, *min, *max, speed, dt), pos.y)
            }
            BossMotion::Vertical { min, max, speed } => {
                Vec2::new(pos.x, bounce(pos.y, *min, *max, speed, dt))
            }
            BossMotion::Circular {
                center,
                radius,
                angle,
                step,
            } => {
                *angle = (*angle + *step).rem_euclid(TAU);
                *center + Vec2::from_angle(*angle) * *radius
            }
            BossMotion::Static => pos,
        }
    }
}

/// Shrink `frame` by `margin` on every side, collapsing to its center when too small.
#[inline]
fn inset(frame: Rect, margin: f32) -> Rect {
    let inner = frame.inflate(-margin);
    if inner.is_empty() {
        Rect::from_center_size(frame.center(), Vec2::ZERO)
    } else {
        inner
    }
}

/// Fit a lane of half-length `half` around `at` inside `[lo, hi]`.
#[inline]
fn fit_lane(at: f32, half: f32, lo: f32, hi: f32) -> (f32, f32) {
    let half = half.min((hi - lo) * 0.5);
    let center = at.clamp(lo + half, hi - half);
    (center - half, center + half)
}

/// Movement for `def`, re-anchored on the boss's `arrival` point and kept inside `frame`.
///
/// Data the pattern does not need is ignored. A pattern whose data is missing
/// or degenerate falls back to [`BossMotion::Static`].
pub fn fit_to_frame(
    def: &BossDefinition,
    arrival: Vec2,
    frame: Rect,
    margin: f32,
    step: f32,
) -> BossMotion {
    let area = inset(frame, margin);
    let config = &def.motion;

    match def.pattern {
        MovePattern::Horizontal => match config.lane_x {
            Some((left, right)) if right > left && def.speed > 0.0 => {
                let (min, max) = fit_lane(arrival.x, (right - left) * 0.5, area.min.x, area.max.x);
                BossMotion::Horizontal { min, max, speed: def.speed }
            }
            other => {
                warn!("{}: horizontal pattern without a usable lane ({other:?}), staying put", def.name);
                BossMotion::Static
            }
        },
        MovePattern::Vertical => match config.lane_y {
            Some((bottom, top)) if top > bottom && def.speed > 0.0 => {
                let (min, max) = fit_lane(arrival.y, (top - bottom) * 0.5, area.min.y, area.max.y);
                BossMotion::Vertical { min, max, speed: def.speed }
            }
            other => {
                warn!("{}: vertical pattern without a usable lane ({other:?}), staying put", def.name);
                BossMotion::Static
            }
        },
        MovePattern::Circular => match config.circle {
            Some((center, radius)) if radius > 0.0 => {
                let half = area.half_size();
                let radius = radius.min(half.x).min(half.y);
                // Keep the configured offset between spawn and circle center.
                let center = center + (arrival - def.spawn);
                let center = Vec2::new(
                    center.x.clamp(area.min.x + radius, area.max.x - radius),
                    center.y.clamp(area.min.y + radius, area.max.y - radius),
                );
                let angle = (arrival - center)
                    .try_normalize()
                    .map(|d| d.to_angle())
                    .unwrap_or(0.0);
                BossMotion::Circular { center, radius, angle, step }
            }
            other => {
                warn!("{}: circular pattern without a usable circle ({other:?}), staying put", def.name);
                BossMotion::Static
            }
        },
        MovePattern::Static => BossMotion::Static,
    }
}
