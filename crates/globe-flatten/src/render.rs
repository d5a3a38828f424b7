//! Rasterizing strips and octants from an equirectangular map.

use std::f64::consts::FRAC_PI_2;

use globe_equirect::Equirect;
use globe_geo::GeoCoord;
use image::{RgbaImage, imageops};
use tracing::debug;

use crate::error::FlattenError;
use crate::mapper::StripMapper;

/// Raster resolution for flattened strips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    /// Output height in pixels; the pole-to-equator distance.
    pub height: u32,
    /// Latitude sampling step in radians.
    pub lat_step: f64,
    /// Longitude sampling step in radians.
    pub lon_step: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            height: 2000,
            lat_step: 0.0003,
            lon_step: 0.0003,
        }
    }
}

/// Renders one strip. The image is as wide as the strip at the equator; pixels
/// outside the strip outline stay transparent.
///
/// The sphere is sampled on a latitude/longitude grid and each sample is
/// splatted to its nearest pixel, so steps should be small relative to
/// `1 / height` to avoid gaps.
pub fn render_strip(equirect: &Equirect, mapper: &StripMapper, params: &RenderParams) -> RgbaImage {
    let height = params.height;
    let width = (mapper.aspect() * f64::from(height)).ceil().max(1.0) as u32;
    let mut out = RgbaImage::new(width, height);
    let scale = f64::from(height);
    let half_width = i64::from(width / 2);

    let lat_samples = (FRAC_PI_2 / params.lat_step).ceil() as u64;
    let lon_samples = (mapper.lon_span() / params.lon_step).ceil() as u64;
    for i in 0..lat_samples {
        let lat = mapper.min_lat() + i as f64 * params.lat_step;
        for j in 0..lon_samples {
            let lon = mapper.min_lon() + j as f64 * params.lon_step;
            let g = GeoCoord::new(lat, lon);
            let p = mapper.map(g);
            let x = (p.x * scale).round() as i64 + half_width;
            let y = (p.y * scale).round() as i64;
            if (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y) {
                out.put_pixel(x as u32, y as u32, equirect.at(g));
            }
        }
    }
    out
}

/// Renders octant `index` (0 to 3, west to east from `-π`) of a hemisphere as
/// `strips` adjacent strips joined left to right.
///
/// # Errors
///
/// Returns [`FlattenError::OctantIndex`] for `index > 3` and
/// [`FlattenError::NoStrips`] for `strips == 0`.
pub fn render_octant(
    equirect: &Equirect,
    north: bool,
    index: usize,
    strips: usize,
    params: &RenderParams,
) -> Result<RgbaImage, FlattenError> {
    if index > 3 {
        return Err(FlattenError::OctantIndex(index));
    }
    if strips == 0 {
        return Err(FlattenError::NoStrips);
    }

    let start = (index as f64 - 2.0) * FRAC_PI_2;
    let span = FRAC_PI_2 / strips as f64;
    let images = (0..strips)
        .map(|i| {
            let mapper = StripMapper::new(north, start + i as f64 * span, span)?;
            Ok(render_strip(equirect, &mapper, params))
        })
        .collect::<Result<Vec<_>, FlattenError>>()?;

    let joined = join_horizontal(&images);
    debug!(
        north,
        index,
        strips,
        width = joined.width(),
        height = joined.height(),
        "Rendered octant"
    );
    Ok(joined)
}

/// Places `images` side by side, top-aligned. The result is as tall as the
/// first image; taller images are clipped.
#[must_use]
pub fn join_horizontal(images: &[RgbaImage]) -> RgbaImage {
    let width = images.iter().map(RgbaImage::width).sum();
    let height = images.first().map_or(0, RgbaImage::height);
    let mut out = RgbaImage::new(width, height);
    let mut x = 0i64;
    for image in images {
        imageops::replace(&mut out, image, x, 0);
        x += i64::from(image.width());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const SEA: Rgba<u8> = Rgba([10, 40, 200, 255]);

    fn params() -> RenderParams {
        RenderParams {
            height: 64,
            lat_step: 0.005,
            lon_step: 0.005,
        }
    }

    fn uniform_map() -> Equirect {
        Equirect::new(RgbaImage::from_pixel(36, 18, SEA)).unwrap()
    }

    #[test]
    fn test_strip_dimensions() {
        let mapper = StripMapper::new(true, 0.0, std::f64::consts::FRAC_PI_8).unwrap();
        let image = render_strip(&uniform_map(), &mapper, &params());
        assert_eq!(image.height(), 64);
        assert_eq!(
            image.width(),
            (mapper.aspect() * 64.0).ceil() as u32,
            "aspect {}",
            mapper.aspect()
        );
    }

    #[test]
    fn test_strip_only_paints_map_colors() {
        let mapper = StripMapper::new(false, -1.0, 0.4).unwrap();
        let image = render_strip(&uniform_map(), &mapper, &params());
        let painted = image.pixels().filter(|&&p| p == SEA).count();
        let blank = image.pixels().filter(|&&p| p == Rgba([0, 0, 0, 0])).count();
        assert!(painted > 0);
        assert_eq!(painted + blank, (image.width() * image.height()) as usize);
        // the center column runs pole to equator
        let center = image.width() / 2;
        assert_eq!(*image.get_pixel(center, 32), SEA);
    }

    #[test]
    fn test_octant_joins_strips() {
        let map = uniform_map();
        let single = StripMapper::new(true, 0.0, std::f64::consts::FRAC_PI_8).unwrap();
        let strip_width = render_strip(&map, &single, &params()).width();
        let octant = render_octant(&map, true, 1, 4, &params()).unwrap();
        assert_eq!(octant.width(), strip_width * 4);
        assert_eq!(octant.height(), 64);
    }

    #[test]
    fn test_octant_rejects_bad_layout() {
        let map = uniform_map();
        assert_eq!(
            render_octant(&map, true, 4, 4, &params()).unwrap_err(),
            FlattenError::OctantIndex(4)
        );
        assert_eq!(
            render_octant(&map, false, 0, 0, &params()).unwrap_err(),
            FlattenError::NoStrips
        );
    }

    #[test]
    fn test_join_horizontal() {
        let red = RgbaImage::from_pixel(2, 3, Rgba([255, 0, 0, 255]));
        let green = RgbaImage::from_pixel(3, 3, Rgba([0, 255, 0, 255]));
        let joined = join_horizontal(&[red, green]);
        assert_eq!(joined.dimensions(), (5, 3));
        assert_eq!(joined.get_pixel(1, 2).0, [255, 0, 0, 255]);
        assert_eq!(joined.get_pixel(2, 0).0, [0, 255, 0, 255]);
        assert_eq!(join_horizontal(&[]).dimensions(), (0, 0));
    }
}
