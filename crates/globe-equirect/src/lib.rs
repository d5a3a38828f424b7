//! Equirectangular map images as fields over the sphere.
//!
//! An [`Equirect`] samples a world map by latitude and longitude. The radius
//! fields built on it ([`ThresholdRadius`], [`SmoothRadius`]) raise land above
//! sea level for embossed globes, and [`HoleMask`] marks the cut-out regions of
//! a stencil globe.

mod equirect;
mod error;
mod mask;
mod radius;

pub use equirect::{Equirect, is_bright};
pub use error::EquirectError;
pub use mask::HoleMask;
pub use radius::{LAND_RADIUS, SEA_RADIUS, SmoothRadius, ThresholdRadius};
