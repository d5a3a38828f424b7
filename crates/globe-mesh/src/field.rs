//! Scalar fields over the sphere and the midpoint rules that follow them.
//!
//! A [`RadiusFn`] gives the surface height at every geographic coordinate; a
//! [`MidpointFn`] decides where a new vertex lands when an edge is split. Plain
//! closures implement both.

use globe_geo::{Coord3D, GeoCoord};

/// Surface radius as a function of position. Values are expected to be positive.
pub trait RadiusFn {
    fn radius(&self, g: GeoCoord) -> f64;
}

impl<F> RadiusFn for F
where
    F: Fn(GeoCoord) -> f64,
{
    #[inline]
    fn radius(&self, g: GeoCoord) -> f64 {
        self(g)
    }
}

/// Placement of the new vertex when the edge `(a, b)` is split.
pub trait MidpointFn {
    fn midpoint(&self, a: Coord3D, b: Coord3D) -> Coord3D;
}

impl<F> MidpointFn for F
where
    F: Fn(Coord3D, Coord3D) -> Coord3D,
{
    #[inline]
    fn midpoint(&self, a: Coord3D, b: Coord3D) -> Coord3D {
        self(a, b)
    }
}

/// The same radius everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantRadius(pub f64);

impl RadiusFn for ConstantRadius {
    #[inline]
    fn radius(&self, _g: GeoCoord) -> f64 {
        self.0
    }
}

/// Splits edges at the straight midpoint, then pushes the result out (or in) onto
/// the surface described by `radius`.
#[derive(Debug)]
pub struct SurfaceMidpoint<'a, R: ?Sized> {
    radius: &'a R,
}

impl<'a, R: RadiusFn + ?Sized> SurfaceMidpoint<'a, R> {
    pub fn new(radius: &'a R) -> Self {
        Self { radius }
    }
}

impl<R: ?Sized> Clone for SurfaceMidpoint<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for SurfaceMidpoint<'_, R> {}

impl<R: RadiusFn + ?Sized> MidpointFn for SurfaceMidpoint<'_, R> {
    fn midpoint(&self, a: Coord3D, b: Coord3D) -> Coord3D {
        let mid = a.midpoint(b);
        let r = self.radius.radius(mid.to_geo());
        mid.normalized().scale(r)
    }
}
