//! Autonomous fireworks rendered into a true-colour terminal.
//!
//! Rockets launch from the bottom of the surface, accelerate toward a random
//! height, burst into particles and fade out under drag and gravity. A
//! translucent fill each frame leaves fading trails behind everything.

pub mod color;
pub mod config;
pub mod error;
pub mod fireworks;
pub mod scheduler;
pub mod surface;
