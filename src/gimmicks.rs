#![warn(clippy::all, clippy::pedantic)]

use log::debug;
use serde::Serialize;

/// Direction the active piece is pulled on each automatic fall step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GravityDirection {
    #[default]
    Down,
    Right,
    Left,
}

impl GravityDirection {
    /// Cycles Down -> Right -> Left -> Down.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            GravityDirection::Down => GravityDirection::Right,
            GravityDirection::Right => GravityDirection::Left,
            GravityDirection::Left => GravityDirection::Down,
        }
    }

    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            GravityDirection::Down => (0, 1),
            GravityDirection::Right => (1, 0),
            GravityDirection::Left => (-1, 0),
        }
    }
}

/// Which way the fall speed is currently bent, for HUD display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TimeScale {
    #[default]
    Normal,
    Slowed,
    Hastened,
}

/// HUD view of the running effects.
///
/// The `*_ticks_remaining` counts are the ticks an effect still survives. A
/// count of 0 next to an active effect means the next tick reverts it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GimmickSummary {
    pub time_scale: TimeScale,
    pub time_scale_factor: f32,
    pub time_scale_ticks_remaining: u32,
    pub gravity_direction: GravityDirection,
    pub gravity_ticks_remaining: u32,
}

/// Timed gimmick effects. An armed timer counts down once per tick; the tick
/// that finds it already at zero restores the neutral value and disarms it.
#[derive(Debug, Clone, PartialEq)]
pub struct GimmickState {
    time_scale_factor: f32,
    time_scale_timer: Option<u32>,
    gravity_direction: GravityDirection,
    gravity_timer: Option<u32>,
}

impl Default for GimmickState {
    fn default() -> Self {
        Self {
            time_scale_factor: 1.0,
            time_scale_timer: None,
            gravity_direction: GravityDirection::Down,
            gravity_timer: None,
        }
    }
}

impl GimmickState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn time_scale_factor(&self) -> f32 {
        self.time_scale_factor
    }

    #[must_use]
    pub fn gravity_direction(&self) -> GravityDirection {
        self.gravity_direction
    }

    /// Ticks the time scale still survives; 0 while armed means the next tick reverts it.
    #[must_use]
    pub fn time_scale_ticks_remaining(&self) -> u32 {
        self.time_scale_timer.unwrap_or(0)
    }

    #[must_use]
    pub fn gravity_ticks_remaining(&self) -> u32 {
        self.gravity_timer.unwrap_or(0)
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.time_scale_timer.is_none() && self.gravity_timer.is_none()
    }

    /// Scales the fall interval for `duration` ticks. A new activation replaces
    /// the running one instead of stacking.
    pub fn activate_time_scale(&mut self, factor: f32, duration: u32) {
        debug!("Time scale set to {factor} for {duration} ticks");
        self.time_scale_factor = factor;
        self.time_scale_timer = Some(duration);
    }

    /// Advances gravity to the next direction and restarts its timer.
    pub fn shift_gravity(&mut self, duration: u32) {
        self.gravity_direction = self.gravity_direction.next();
        self.gravity_timer = Some(duration);
        debug!(
            "Gravity shifted to {:?} for {duration} ticks",
            self.gravity_direction
        );
    }

    pub fn tick(&mut self) {
        match self.time_scale_timer {
            Some(0) => {
                debug!("Time scale effect expired");
                self.time_scale_factor = 1.0;
                self.time_scale_timer = None;
            }
            Some(remaining) => self.time_scale_timer = Some(remaining - 1),
            None => {}
        }

        match self.gravity_timer {
            Some(0) => {
                debug!("Gravity shift expired");
                self.gravity_direction = GravityDirection::Down;
                self.gravity_timer = None;
            }
            Some(remaining) => self.gravity_timer = Some(remaining - 1),
            None => {}
        }
    }

    #[must_use]
    pub fn summary(&self) -> GimmickSummary {
        let time_scale = match self.time_scale_timer {
            Some(_) if self.time_scale_factor > 1.0 => TimeScale::Slowed,
            Some(_) if self.time_scale_factor < 1.0 => TimeScale::Hastened,
            _ => TimeScale::Normal,
        };

        GimmickSummary {
            time_scale,
            time_scale_factor: self.time_scale_factor,
            time_scale_ticks_remaining: self.time_scale_ticks_remaining(),
            gravity_direction: self.gravity_direction,
            gravity_ticks_remaining: self.gravity_ticks_remaining(),
        }
    }
}
