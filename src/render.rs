use image::{math::Rect, ColorType, GrayImage, Luma};
use tracing::debug;

use crate::builder::QRCode;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Color;

pub static QUIET_ZONE_MODULES: u32 = 4;

// Pixel source
//------------------------------------------------------------------------------

/// Read-only raster view that renderers consume without knowing how the
/// pixels are stored
pub trait PixelSource {
    fn bounds(&self) -> Rect;

    fn color_model(&self) -> ColorType;

    /// Color of the pixel at (x, y); anything outside the bounds is light
    fn at(&self, x: u32, y: u32) -> Color;
}

// Scale transform
//------------------------------------------------------------------------------

// Maps a pixel of a width x height raster back onto a dim x dim module grid,
// centred, with each module drawn as a factor x factor block
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ScaleTransform {
    factor: u32,
    offset_x: u32,
    offset_y: u32,
    width: u32,
    height: u32,
}

impl ScaleTransform {
    pub fn new(dim: u32, width: u32, height: u32) -> QRResult<Self> {
        let factor = std::cmp::min(width / dim, height / dim);
        if factor == 0 {
            return Err(QRError::InvalidScaleTarget { width: dim, height: dim });
        }
        let offset_x = (width - dim * factor) / 2;
        let offset_y = (height - dim * factor) / 2;
        Ok(Self { factor, offset_x, offset_y, width, height })
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn offset(&self) -> (u32, u32) {
        (self.offset_x, self.offset_y)
    }

    // Module under the pixel, None inside the light margin
    pub fn source(&self, x: u32, y: u32, dim: u32) -> Option<(u32, u32)> {
        let (x, y) = (x.checked_sub(self.offset_x)?, y.checked_sub(self.offset_y)?);
        let (mx, my) = (x / self.factor, y / self.factor);
        (mx < dim && my < dim).then_some((mx, my))
    }
}

impl QRCode {
    /// Installs a transform that presents the symbol as a `width` x `height`
    /// raster. Module bits are left untouched, and every call scales from the
    /// native grid.
    pub fn scale(&mut self, width: u32, height: u32) -> QRResult<()> {
        let transform = ScaleTransform::new(self.dimension() as u32, width, height)?;
        debug!(
            "Scaling {0}x{0} symbol to {width}x{height} with factor {1}",
            self.dimension(),
            transform.factor()
        );
        self.scale = Some(transform);
        Ok(())
    }

    pub fn scale_transform(&self) -> Option<ScaleTransform> {
        self.scale
    }
}

impl PixelSource for QRCode {
    fn bounds(&self) -> Rect {
        match self.scale {
            Some(t) => Rect { x: 0, y: 0, width: t.width, height: t.height },
            None => {
                let dim = self.dimension() as u32;
                Rect { x: 0, y: 0, width: dim, height: dim }
            }
        }
    }

    fn color_model(&self) -> ColorType {
        ColorType::L8
    }

    fn at(&self, x: u32, y: u32) -> Color {
        let dim = self.dimension() as u32;
        let module = match self.scale {
            Some(t) => t.source(x, y, dim),
            None => (x < dim && y < dim).then_some((x, y)),
        };
        match module {
            Some((mx, my)) => self.get(mx as usize, my as usize),
            None => Color::Light,
        }
    }
}

// Render
//------------------------------------------------------------------------------

/// Materialises any pixel source into an 8 bit grayscale image
pub fn to_image(src: &impl PixelSource) -> GrayImage {
    let Rect { x: bx, y: by, width, height } = src.bounds();
    GrayImage::from_fn(width, height, |x, y| Luma([src.at(bx + x, by + y).select(0, 255)]))
}

impl QRCode {
    /// Renders the native grid with a 4 module quiet zone, each module
    /// `module_sz` pixels wide
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE_MODULES * module_sz;
        let qr_sz = self.dimension() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for y in 0..total_sz {
            for x in 0..total_sz {
                if y < qz_sz || y >= qz_sz + qr_sz || x < qz_sz || x >= qz_sz + qr_sz {
                    canvas.put_pixel(x, y, Luma([255]));
                    continue;
                }
                let mx = (x - qz_sz) / module_sz;
                let my = (y - qz_sz) / module_sz;
                let clr = self.get(mx as usize, my as usize);
                canvas.put_pixel(x, y, Luma([clr.select(0, 255)]));
            }
        }

        canvas
    }

    /// Terminal friendly rendering, light modules drawn as full blocks so the
    /// symbol reads on dark backgrounds
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE_MODULES as usize * module_sz;
        let qr_sz = self.dimension() * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::new();
        for y in 0..total_sz {
            for x in 0..total_sz {
                if y < qz_sz || y >= qz_sz + qr_sz || x < qz_sz || x >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let mx = (x - qz_sz) / module_sz;
                let my = (y - qz_sz) / module_sz;
                canvas.push(self.get(mx, my).select(' ', '█'));
            }
            canvas.push('\n');
        }

        canvas
    }
}

#[cfg(test)]
mod render_tests {
    use image::{math::Rect, ColorType, Luma};

    use super::{to_image, PixelSource, ScaleTransform};
    use crate::builder::{QRBuilder, QRCode};
    use crate::common::error::QRError;
    use crate::common::metadata::{Color, ECLevel};

    fn hello_world() -> QRCode {
        QRBuilder::new(b"hello world").ec_level(ECLevel::H).build().unwrap()
    }

    #[test]
    fn test_native_pixel_source() {
        let qr = hello_world();
        assert_eq!(qr.bounds(), Rect { x: 0, y: 0, width: 25, height: 25 });
        assert_eq!(qr.color_model(), ColorType::L8);
        assert_eq!(qr.at(0, 0), Color::Dark);
        assert_eq!(qr.at(7, 0), Color::Light);
        assert_eq!(qr.at(25, 0), Color::Light);
        assert_eq!(qr.at(0, 100), Color::Light);
    }

    #[test]
    fn test_scale_too_small() {
        let mut qr = hello_world();
        assert_eq!(qr.scale(24, 100), Err(QRError::InvalidScaleTarget { width: 25, height: 25 }));
        assert_eq!(qr.scale(100, 0), Err(QRError::InvalidScaleTarget { width: 25, height: 25 }));
        assert_eq!(qr.scale_transform(), None);
        assert_eq!(qr.bounds().width, 25);
    }

    #[test]
    fn test_scale_exact_multiple() {
        let mut qr = hello_world();
        let factor = 4;
        qr.scale(25 * factor, 25 * factor).unwrap();
        assert_eq!(qr.bounds(), Rect { x: 0, y: 0, width: 100, height: 100 });
        for y in 0..100 {
            for x in 0..100 {
                let exp = qr.get((x / factor) as usize, (y / factor) as usize);
                assert_eq!(qr.at(x, y), exp, "Pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_scale_centres_grid() {
        let mut qr = hello_world();
        qr.scale(110, 80).unwrap();
        let t = qr.scale_transform().unwrap();
        assert_eq!(t.factor(), 3);
        assert_eq!(t.offset(), (17, 2));
        assert_eq!(qr.at(16, 2), Color::Light);
        assert_eq!(qr.at(17, 1), Color::Light);
        assert_eq!(qr.at(17, 2), Color::Dark);
        assert_eq!(qr.at(19, 4), Color::Dark);
        assert_eq!(qr.at(17 + 75, 2), Color::Light);
        assert_eq!(qr.at(17 + 74, 2), Color::Dark);
    }

    #[test]
    fn test_scale_uses_native_grid() {
        let mut qr = hello_world();
        qr.scale(50, 50).unwrap();
        let first = qr.scale_transform();
        qr.scale(50, 50).unwrap();
        assert_eq!(qr.scale_transform(), first);
        qr.scale(75, 75).unwrap();
        assert_eq!(qr.scale_transform().map(|t| t.factor()), Some(3));
    }

    #[test]
    fn test_transform_source() {
        let t = ScaleTransform::new(21, 50, 45).unwrap();
        assert_eq!(t.factor(), 2);
        assert_eq!(t.offset(), (4, 1));
        assert_eq!(t.source(3, 10, 21), None);
        assert_eq!(t.source(4, 1, 21), Some((0, 0)));
        assert_eq!(t.source(45, 42, 21), Some((20, 20)));
        assert_eq!(t.source(46, 42, 21), None);
    }

    #[test]
    fn test_to_image_from_pixel_source() {
        let mut qr = hello_world();
        qr.scale(60, 50).unwrap();
        let img = to_image(&qr);
        assert_eq!(img.dimensions(), (60, 50));
        assert_eq!(*img.get_pixel(0, 0), Luma([255]));
        assert_eq!(*img.get_pixel(5, 0), Luma([0]));
        assert_eq!(*img.get_pixel(19, 0), Luma([255]));
        assert_eq!(*img.get_pixel(4, 20), Luma([255]));
    }

    #[test]
    fn test_to_image_quiet_zone() {
        let qr = hello_world();
        let img = qr.to_image(2);
        assert_eq!(img.dimensions(), (66, 66));
        assert_eq!(*img.get_pixel(7, 7), Luma([255]));
        assert_eq!(*img.get_pixel(8, 8), Luma([0]));
        assert_eq!(*img.get_pixel(9, 9), Luma([0]));
        assert_eq!(*img.get_pixel(10, 10), Luma([255]));
        let dark = img.pixels().filter(|p| p.0[0] == 0).count();
        assert_eq!(dark, qr.count_dark_modules() * 4);
    }

    #[test]
    fn test_to_str() {
        let qr = hello_world();
        let s = qr.to_str(1);
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 33);
        assert!(lines[0].chars().all(|c| c == '█'));
        assert_eq!(lines[4].chars().nth(4), Some(' '));
    }
}
