//! Latitude/longitude sphere builder.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use globe_geo::{Coord3D, GeoCoord};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::field::RadiusFn;
use crate::mesh::Mesh;
use crate::triangle::Triangle;

/// Resolution of a latitude/longitude sphere: the number of cells around the
/// equator and from pole to pole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SphericalGrid {
    lon_stops: usize,
    lat_stops: usize,
}

impl SphericalGrid {
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidGrid`] for fewer than 3 longitude or 2 latitude
    /// stops, which cannot enclose a volume.
    pub fn new(lon_stops: usize, lat_stops: usize) -> MeshResult<Self> {
        if lon_stops < 3 || lat_stops < 2 {
            return Err(MeshError::InvalidGrid {
                lon_stops,
                lat_stops,
            });
        }
        Ok(Self {
            lon_stops,
            lat_stops,
        })
    }

    /// The same number of stops along both axes.
    pub fn square(stops: usize) -> MeshResult<Self> {
        Self::new(stops, stops)
    }

    #[must_use]
    pub fn lon_stops(&self) -> usize {
        self.lon_stops
    }

    #[must_use]
    pub fn lat_stops(&self) -> usize {
        self.lat_stops
    }

    /// Latitude of row `i`, from `-π/2` at `i = 0` to `π/2` at `i = lat_stops`.
    #[must_use]
    pub fn latitude(&self, i: usize) -> f64 {
        if i == self.lat_stops {
            return FRAC_PI_2;
        }
        -FRAC_PI_2 + i as f64 * PI / self.lat_stops as f64
    }

    /// Longitude of column `j`. The last column wraps to exactly `-π` so the seam
    /// reuses the first column's vertices.
    #[must_use]
    pub fn longitude(&self, j: usize) -> f64 {
        if j == self.lon_stops {
            return -PI;
        }
        -PI + j as f64 * TAU / self.lon_stops as f64
    }

    /// Triangles produced by [`SphericalGrid::build`]: two per cell, less the
    /// collapsed one in each cell touching a pole.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        2 * self.lon_stops * self.lat_stops - 2 * self.lon_stops
    }

    /// Distinct vertices produced by [`SphericalGrid::build`].
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        (self.lat_stops - 1) * self.lon_stops + 2
    }

    /// Builds a closed, outward-facing sphere whose surface follows `radius`.
    ///
    /// Each pole is a single vertex `(0, ±r, 0)` shared by every triangle of the
    /// adjacent row. `r` is the field's radius at that pole rather than 1, so a
    /// field that is not 1 at the poles still gets a surface without a step
    /// there; for a unit field the poles are `(0, ±1, 0)`.
    pub fn build<R>(&self, radius: &R) -> Mesh
    where
        R: RadiusFn + ?Sized,
    {
        let rows = self.vertex_rows(radius);
        let mut mesh = Mesh::new();
        for i in 0..self.lat_stops {
            let bottom = i == 0;
            let top = i + 1 == self.lat_stops;
            for j in 0..self.lon_stops {
                let p0 = rows[i][j];
                let p1 = rows[i + 1][j];
                let p2 = rows[i + 1][(j + 1) % self.lon_stops];
                let p3 = rows[i][(j + 1) % self.lon_stops];
                if !top {
                    mesh.add(Triangle::new(p0, p2, p1));
                }
                if !bottom {
                    mesh.add(Triangle::new(p0, p3, p2));
                }
            }
        }
        debug!(
            lon_stops = self.lon_stops,
            lat_stops = self.lat_stops,
            triangles = mesh.len(),
            vertices = mesh.vertex_count(),
            "Built spherical mesh"
        );
        mesh
    }

    /// Vertex positions row by row, south to north. Pole rows hold one repeated
    /// vertex.
    fn vertex_rows<R>(&self, radius: &R) -> Vec<Vec<Coord3D>>
    where
        R: RadiusFn + ?Sized,
    {
        let south = Coord3D::new(0.0, -radius.radius(GeoCoord::SOUTH_POLE), 0.0);
        let north = Coord3D::new(0.0, radius.radius(GeoCoord::NORTH_POLE), 0.0);
        (0..=self.lat_stops)
            .map(|i| {
                if i == 0 {
                    return vec![south; self.lon_stops];
                }
                if i == self.lat_stops {
                    return vec![north; self.lon_stops];
                }
                let lat = self.latitude(i);
                (0..self.lon_stops)
                    .map(|j| {
                        let g = GeoCoord::new(lat, self.longitude(j));
                        g.to_coord3d().scale(radius.radius(g))
                    })
                    .collect()
            })
            .collect()
    }
}

/// Square-grid shorthand for [`SphericalGrid::build`].
///
/// # Errors
///
/// Returns [`MeshError::InvalidGrid`] when `stops < 3`.
pub fn build_spherical<R>(radius: &R, stops: usize) -> MeshResult<Mesh>
where
    R: RadiusFn + ?Sized,
{
    Ok(SphericalGrid::square(stops)?.build(radius))
}
