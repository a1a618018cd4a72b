/// Directional input to velocity.

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_1_SQRT_2;

/// Raw directional flags for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Field units per second, y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl MovementInput {
    /// Velocity at `speed`. Opposing keys cancel out; diagonals are scaled
    /// so the player does not move faster than `speed`.
    pub fn velocity(&self, speed: f32) -> Velocity {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.left {
            x -= speed;
        }
        if self.right {
            x += speed;
        }
        if self.up {
            y -= speed;
        }
        if self.down {
            y += speed;
        }
        if x != 0.0 && y != 0.0 {
            x *= FRAC_1_SQRT_2;
            y *= FRAC_1_SQRT_2;
        }
        Velocity { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_lines() {
        let right = MovementInput { right: true, ..Default::default() };
        assert_eq!(right.velocity(80.0), Velocity { x: 80.0, y: 0.0 });
        let up = MovementInput { up: true, ..Default::default() };
        assert_eq!(up.velocity(80.0), Velocity { x: 0.0, y: -80.0 });
    }

    #[test]
    fn diagonal_is_normalised() {
        let input = MovementInput { left: true, down: true, ..Default::default() };
        let v = input.velocity(80.0);
        let magnitude = (v.x * v.x + v.y * v.y).sqrt();
        assert!((magnitude - 80.0).abs() < 1e-3);
        assert!(v.x < 0.0 && v.y > 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let input = MovementInput { left: true, right: true, up: true, down: false };
        assert_eq!(input.velocity(80.0), Velocity { x: 0.0, y: -80.0 });
        assert!(MovementInput::default().velocity(80.0).is_zero());
    }
}
