//! Flattening of a globe map into printable paper strips.
//!
//! The sphere is cut into gores: narrow longitude strips running from a pole to
//! the equator. Each strip is mapped to the plane by preserving the distance of
//! every point to two anchors (the pole and the equator at the strip's center
//! line), so the printed strips can be folded back into a hemisphere.

mod error;
mod mapper;
mod render;

pub use error::FlattenError;
pub use mapper::StripMapper;
pub use render::{RenderParams, join_horizontal, render_octant, render_strip};
