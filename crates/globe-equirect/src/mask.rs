//! Cut-out mask for stencil globes.

use globe_geo::{Coord3D, GeoCoord};
use globe_mesh::Triangle;

use crate::equirect::{Equirect, is_bright};

/// Treats bright map pixels as holes in the printed shell.
#[derive(Clone, Copy, Debug)]
pub struct HoleMask<'a> {
    equirect: &'a Equirect,
}

impl<'a> HoleMask<'a> {
    pub fn new(equirect: &'a Equirect) -> Self {
        Self { equirect }
    }

    #[must_use]
    pub fn is_hole(&self, g: GeoCoord) -> bool {
        is_bright(self.equirect.at(g))
    }

    /// Hole test for a mesh vertex, by its direction from the origin.
    #[must_use]
    pub fn is_hole_at(&self, v: Coord3D) -> bool {
        self.is_hole(v.to_geo())
    }

    /// `true` if any vertex of `t` falls in a hole.
    #[must_use]
    pub fn triangle_has_hole(&self, t: &Triangle) -> bool {
        t.vertices().iter().any(|&v| self.is_hole_at(v))
    }

    /// `true` if exactly one end of the edge lies in a hole. These are the
    /// edges to refine along a stencil outline.
    #[must_use]
    pub fn crosses_outline(&self, a: Coord3D, b: Coord3D) -> bool {
        self.is_hole_at(a) != self.is_hole_at(b)
    }
}
