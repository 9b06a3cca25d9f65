//! Point charges and the fixed-capacity set that feeds the fragment pass.
//!
//! Positions are stored in GL pixel space: x grows to the right, y grows
//! upward from the bottom edge of the viewport.

use glam::Vec2;

use crate::error::ChargeError;

/// Size of the charge array in the shader's uniform block.
pub const MAX_CHARGES: usize = 40;

/// Polarity of a point charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// `+1.0` or `-1.0`.
    pub fn as_f32(self) -> f32 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// A point source contributing `sign / distance` to the potential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    pub position: Vec2,
    pub sign: Sign,
}

impl Charge {
    pub fn new(position: Vec2, sign: Sign) -> Self {
        Self { position, sign }
    }

    pub fn positive(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), Sign::Positive)
    }

    pub fn negative(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), Sign::Negative)
    }

    /// `(x, y, sign, 0)`, one element of the uniform array.
    pub fn to_gpu(&self) -> [f32; 4] {
        [self.position.x, self.position.y, self.sign.as_f32(), 0.0]
    }
}

/// Append-only list of charges, bounded by [`MAX_CHARGES`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeSet {
    charges: Vec<Charge>,
}

impl ChargeSet {
    pub fn new() -> Self {
        Self {
            charges: Vec::with_capacity(MAX_CHARGES),
        }
    }

    /// Append a charge, or reject it once the set holds [`MAX_CHARGES`].
    ///
    /// A rejected charge leaves the set untouched.
    pub fn try_push(&mut self, charge: Charge) -> Result<(), ChargeError> {
        if self.is_full() {
            return Err(ChargeError::CapacityExceeded {
                capacity: MAX_CHARGES,
            });
        }
        self.charges.push(charge);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.charges.len() >= MAX_CHARGES
    }

    pub fn as_slice(&self) -> &[Charge] {
        &self.charges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Charge> {
        self.charges.iter()
    }
}
