//! Nearest-pixel sampling of an equirectangular image.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::path::Path;

use globe_geo::{Coord3D, GeoCoord};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::EquirectError;

/// Channels at or above this value count as bright. Equivalent to
/// `> 0xF000` on 16-bit channels.
const BRIGHT_THRESHOLD: u8 = 0xF0;

/// A world map in equirectangular projection: column 0 is longitude `-π`, the
/// last column `π`; row 0 is the north pole, the last row the south pole.
#[derive(Clone, Debug)]
pub struct Equirect {
    image: RgbaImage,
}

impl Equirect {
    /// Wraps a decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`EquirectError::Empty`] if the image has no pixels.
    pub fn new(image: RgbaImage) -> Result<Self, EquirectError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(EquirectError::Empty { width, height });
        }
        Ok(Self { image })
    }

    /// Loads and decodes a PNG or JPEG map.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EquirectError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| EquirectError::Open {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded equirectangular map"
        );
        Self::new(image)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel coordinates of the sample nearest to `g`, after normalizing `g`.
    #[must_use]
    pub fn pixel_of(&self, g: GeoCoord) -> (u32, u32) {
        let g = g.normalize();
        let w = f64::from(self.width() - 1);
        let h = f64::from(self.height() - 1);
        let x = (w * (g.lon + PI) / TAU).round().clamp(0.0, w);
        let y = (h * (FRAC_PI_2 - g.lat) / PI).round().clamp(0.0, h);
        (x as u32, y as u32)
    }

    /// The color at `g`.
    #[must_use]
    pub fn at(&self, g: GeoCoord) -> Rgba<u8> {
        let (x, y) = self.pixel_of(g);
        *self.image.get_pixel(x, y)
    }

    /// RGB color under a mesh vertex, looked up by its direction from the origin.
    #[must_use]
    pub fn color_at_vertex(&self, v: Coord3D) -> [u8; 3] {
        let Rgba([r, g, b, _]) = self.at(v.to_geo());
        [r, g, b]
    }
}

/// `true` when all three color channels are near white. Alpha is ignored.
#[must_use]
pub fn is_bright(pixel: Rgba<u8>) -> bool {
    pixel.0[..3].iter().all(|&c| c >= BRIGHT_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    /// 9x5 image where each pixel encodes its own coordinates.
    fn coordinate_map() -> Equirect {
        let image = RgbaImage::from_fn(9, 5, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        Equirect::new(image).unwrap()
    }

    #[test]
    fn test_rejects_empty_image() {
        let err = Equirect::new(RgbaImage::new(0, 4)).unwrap_err();
        assert!(matches!(err, EquirectError::Empty { width: 0, height: 4 }));
    }

    #[test]
    fn test_center_sample() {
        let map = coordinate_map();
        assert_eq!(map.pixel_of(GeoCoord::new(0.0, 0.0)), (4, 2));
        assert_eq!(map.at(GeoCoord::new(0.0, 0.0)), Rgba([4, 2, 0, 255]));
    }

    #[test]
    fn test_corner_samples() {
        let map = coordinate_map();
        assert_eq!(map.pixel_of(GeoCoord::new(FRAC_PI_4, -FRAC_PI_2)), (2, 1));
        assert_eq!(map.pixel_of(GeoCoord::new(-FRAC_PI_4, FRAC_PI_2)), (6, 3));
        assert_eq!(map.pixel_of(GeoCoord::new(0.0, -PI + 1e-9)), (0, 2));
        assert_eq!(map.pixel_of(GeoCoord::new(0.0, PI - 1e-9)), (8, 2));
    }

    #[test]
    fn test_poles_sample_edge_rows() {
        let map = coordinate_map();
        assert_eq!(map.pixel_of(GeoCoord::NORTH_POLE).1, 0);
        assert_eq!(map.pixel_of(GeoCoord::SOUTH_POLE).1, 4);
    }

    #[test]
    fn test_out_of_range_input_is_normalized() {
        let map = coordinate_map();
        let wrapped = GeoCoord::new(0.0, FRAC_PI_2 + TAU);
        assert_eq!(map.pixel_of(wrapped), map.pixel_of(GeoCoord::new(0.0, FRAC_PI_2)));
    }

    #[test]
    fn test_color_at_vertex_ignores_radius() {
        let map = coordinate_map();
        let v = Coord3D::new(0.0, 0.0, 3.5);
        assert_eq!(map.color_at_vertex(v), [4, 2, 0]);
    }

    #[test]
    fn test_is_bright() {
        assert!(is_bright(Rgba([255, 255, 255, 0])));
        assert!(is_bright(Rgba([0xF0, 0xF0, 0xF0, 255])));
        assert!(!is_bright(Rgba([0xEF, 0xFF, 0xFF, 255])));
        assert!(!is_bright(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_open_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let map = Equirect::open(&path).unwrap();
        assert_eq!((map.width(), map.height()), (4, 2));
        assert_eq!(map.at(GeoCoord::new(0.3, 1.0)), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Equirect::open("/nonexistent/map.png").unwrap_err();
        assert!(matches!(err, EquirectError::Open { .. }), "{err:?}");
    }
}
