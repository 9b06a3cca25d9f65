//! # Equipotential
//!
//! Real-time equipotential bands of point charges placed with the mouse.
//!
//! Left click drops a positive charge, right click a negative one. Every frame
//! a full-screen fragment pass sums `sign / distance` over all charges for each
//! pixel, snaps the result onto discrete bands and tints them red (positive),
//! blue (negative) or white (zero), with a 20 px / 100 px grid on top.
//!
//! ## Quick Start
//!
//! ```ignore
//! use equipotential::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new().run()
//! }
//! ```
//!
//! ## Uniform Interface
//!
//! Charges reach the GPU as a fixed array of [`MAX_CHARGES`] `vec4` entries
//! `(x, y, sign, 0)` plus an explicit count (see [`ChargeUniforms`]). Clicks
//! beyond the capacity are rejected with a warning.
//!
//! ## CPU Model
//!
//! The [`potential`] module computes the same per-pixel values as the shader,
//! which makes the banding testable without a GPU.

pub mod charge;
pub mod error;
mod gpu;
pub mod input;
pub mod potential;
pub mod shader;
mod viewer;

pub use charge::{Charge, ChargeSet, Sign, MAX_CHARGES};
pub use error::{ChargeError, GpuError, ShaderError, ViewerError};
pub use glam::{Vec2, Vec3, Vec4};
pub use input::{ChargeCollector, InputHandler, MouseButton};
pub use shader::ChargeUniforms;
pub use viewer::Viewer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use equipotential::prelude::*;
/// ```
pub mod prelude {
    pub use crate::charge::{Charge, ChargeSet, Sign, MAX_CHARGES};
    pub use crate::error::ViewerError;
    pub use crate::input::{ChargeCollector, MouseButton};
    pub use crate::viewer::Viewer;
    pub use crate::{Vec2, Vec3, Vec4};
}
