/// Tick interval at the start of a round.
pub const INITIAL_SPEED_MS: u64 = 150;
/// Fastest tick interval the ramp can reach.
pub const SPEED_FLOOR_MS: u64 = 50;
/// Interval removed per food eaten.
pub const SPEED_STEP_MS: u64 = 5;

/// Derives the tick interval from the food eaten so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedController {
    initial: u64,
    floor: u64,
    step: u64,
    current: u64,
}

impl SpeedController {
    #[must_use]
    pub fn new(initial: u64, floor: u64, step: u64) -> Self {
        Self {
            initial,
            floor,
            step,
            current: initial,
        }
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Speeds up by one step, never past the floor. Returns the new interval.
    pub fn on_food_eaten(&mut self) -> u64 {
        self.current = self.current.saturating_sub(self.step).max(self.floor);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

impl Default for SpeedController {
    fn default() -> Self {
        Self::new(INITIAL_SPEED_MS, SPEED_FLOOR_MS, SPEED_STEP_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_steps_down_to_floor() {
        let mut speed = SpeedController::default();
        assert_eq!(speed.current(), 150);
        assert_eq!(speed.on_food_eaten(), 145);
        for _ in 1..20 {
            speed.on_food_eaten();
        }
        assert_eq!(speed.current(), 50);
        for _ in 0..10 {
            assert_eq!(speed.on_food_eaten(), 50);
        }
    }

    #[test]
    fn test_floor_is_not_crossed_by_uneven_step() {
        let mut speed = SpeedController::new(53, 50, 5);
        assert_eq!(speed.on_food_eaten(), 50);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut speed = SpeedController::default();
        speed.on_food_eaten();
        speed.on_food_eaten();
        speed.reset();
        assert_eq!(speed.current(), INITIAL_SPEED_MS);
    }
}
