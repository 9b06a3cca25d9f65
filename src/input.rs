//! Mouse input turned into charges.
//!
//! [`ChargeCollector`] keeps the last cursor position and the current viewport
//! height, and appends a charge on every left or right button press. Presses
//! that arrive before the first cursor move are ignored, since there is no
//! pointer position to place them at:
//!
//! ```ignore
//! let mut collector = ChargeCollector::new(600);
//! collector.on_click(MouseButton::Left, 250.0, 100.0);  // +1 at (250, 500)
//! collector.on_click(MouseButton::Right, 750.0, 100.0); // -1 at (750, 500)
//! ```
//!
//! Screen coordinates have their origin at the top-left corner; stored charges
//! use GL pixel space with y growing upward, so `y` becomes `height - y`.

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};

use crate::charge::{Charge, ChargeSet, Sign};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

impl MouseButton {
    /// Charge polarity placed by this button, if any.
    pub fn sign(self) -> Option<Sign> {
        match self {
            MouseButton::Left => Some(Sign::Positive),
            MouseButton::Right => Some(Sign::Negative),
            MouseButton::Middle | MouseButton::Other => None,
        }
    }
}

/// Something that reacts to raw window input.
///
/// Returns `true` when the event changed what should be on screen.
pub trait InputHandler {
    fn handle_input(&mut self, event: &WindowEvent) -> bool;
}

/// Owns the charge list and converts clicks into charges.
#[derive(Debug, Clone)]
pub struct ChargeCollector {
    charges: ChargeSet,
    cursor: Option<Vec2>,
    viewport_height: u32,
}

impl ChargeCollector {
    /// Create an empty collector for a viewport `viewport_height` pixels tall.
    pub fn new(viewport_height: u32) -> Self {
        Self {
            charges: ChargeSet::new(),
            cursor: None,
            viewport_height,
        }
    }

    pub fn charges(&self) -> &ChargeSet {
        &self.charges
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Follow a resize. Stored charges keep their positions.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = Some(Vec2::new(x, y));
    }

    /// Screen y to GL y.
    pub fn flip_y(&self, y: f32) -> f32 {
        self.viewport_height as f32 - y
    }

    /// Store a charge for a press of `button` at screen position `(x, y)`.
    ///
    /// Left places `+1`, right places `-1`, other buttons do nothing. Once the
    /// set is full further clicks are dropped with a warning. Returns whether a
    /// charge was stored.
    pub fn on_click(&mut self, button: MouseButton, x: f32, y: f32) -> bool {
        let Some(sign) = button.sign() else {
            return false;
        };

        let charge = Charge::new(Vec2::new(x, self.flip_y(y)), sign);
        match self.charges.try_push(charge) {
            Ok(()) => {
                log::debug!(
                    "charge #{} {:?} at ({:.1}, {:.1})",
                    self.charges.len(),
                    sign,
                    charge.position.x,
                    charge.position.y
                );
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32);
                false
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let Some(cursor) = self.cursor else {
                    log::debug!("{:?} press before any cursor position, ignored", button);
                    return false;
                };
                self.on_click(MouseButton::from(*button), cursor.x, cursor.y)
            }
            _ => false,
        }
    }
}
