//! What the physical display shows
//!
//! The panel preview lets the user click through pages freely. The display
//! itself follows the host's rotation schedule and receives a flat push
//! record on every update:
//!
//! - [`rotation`] - Which page the display is on and when it advances
//! - [`payload`] - The record pushed to the display

pub mod payload;
pub mod rotation;

pub use payload::DisplayPayload;
pub use rotation::{DeviceRotation, RotationStatus};
