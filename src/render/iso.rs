use super::{Color, Point3, RenderSurface, Size3};
use crate::error::{ConfigError, OutputError};
use image::RgbaImage;
use std::f64::consts::PI;

/// How much a face's lighting can shift its lightness
const COLOR_DIFFERENCE: f64 = 0.20;
/// Direction towards the light source, before normalizing
const LIGHT_POSITION: [f64; 3] = [2.0, -1.0, 3.0];

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    /// Pixels per surface unit
    pub scale: f64,
    pub background: Color,
}

impl CanvasOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Canvas(self.width, self.height));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Scale(self.scale));
        }
        Ok(())
    }
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            scale: 70.0,
            background: Color::WHITE,
        }
    }
}

/// Maps surface points onto the image plane
///
/// The x axis runs up and to the right at 30 degrees, the y axis up and to the
/// left, and z straight up. Points with a smaller `x + y` are nearer the viewer.
#[derive(Debug, Clone, Copy)]
struct Projection {
    origin_x: f64,
    origin_y: f64,
    scale: f64,
    cos: f64,
    sin: f64,
}

impl Projection {
    fn new(width: u32, height: u32, scale: f64) -> Self {
        let angle = PI / 6.0;
        Self {
            origin_x: f64::from(width) / 2.0,
            origin_y: f64::from(height) * 0.9,
            scale,
            cos: angle.cos(),
            sin: angle.sin(),
        }
    }

    #[inline]
    fn project(&self, p: Point3) -> (f64, f64) {
        (
            self.origin_x + (p.x - p.y) * self.scale * self.cos,
            self.origin_y - (p.x + p.y) * self.scale * self.sin - p.z * self.scale,
        )
    }
}

/// A raster surface that draws cubes in isometric projection with flat shading
pub struct IsoCanvas {
    image: RgbaImage,
    background: Color,
    projection: Projection,
    light: [f64; 3],
}

impl IsoCanvas {
    pub fn new(options: &CanvasOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        let norm = LIGHT_POSITION.iter().map(|v| v * v).sum::<f64>().sqrt();
        let light = LIGHT_POSITION.map(|v| v / norm);
        Ok(Self {
            image: RgbaImage::from_pixel(options.width, options.height, options.background.to_rgba()),
            background: options.background,
            projection: Projection::new(options.width, options.height, options.scale),
            light,
        })
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn shade(&self, color: Color, normal: [f64; 3]) -> Color {
        let brightness: f64 = normal.iter().zip(&self.light).map(|(n, l)| n * l).sum();
        color.lighten(brightness * COLOR_DIFFERENCE, Color::WHITE)
    }

    /// Fills the projection of a planar convex face
    fn fill_face(&mut self, corners: [Point3; 4], normal: [f64; 3], color: Color) {
        let color = self.shade(color, normal).to_rgba();
        let points = corners.map(|p| self.projection.project(p));

        let (w, h) = (self.image.width() as f64, self.image.height() as f64);
        let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min).floor().max(0.0);
        let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max).ceil().min(w);
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).floor().max(0.0);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max).ceil().min(h);
        if min_x >= max_x || min_y >= max_y {
            // entirely off-canvas
            return;
        }

        for py in min_y as u32..max_y as u32 {
            for px in min_x as u32..max_x as u32 {
                let center = (f64::from(px) + 0.5, f64::from(py) + 0.5);
                if contains(&points, center) {
                    self.image.put_pixel(px, py, color);
                }
            }
        }
    }
}

/// Whether `p` lies inside (or on the edge of) the convex polygon `points`
fn contains(points: &[(f64, f64)], p: (f64, f64)) -> bool {
    let mut sign = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

impl RenderSurface for IsoCanvas {
    type Frame = RgbaImage;

    fn clear(&mut self) -> Result<(), OutputError> {
        let background = self.background.to_rgba();
        self.image.pixels_mut().for_each(|px| *px = background);
        Ok(())
    }

    fn draw_cube(&mut self, origin: Point3, size: Size3, color: Color) -> Result<(), OutputError> {
        let Point3 { x, y, z } = origin;
        let Size3 { dx, dy, dz } = size;
        let p = Point3::new;

        // the three camera-facing faces never overlap once projected
        self.fill_face(
            [p(x, y, z), p(x + dx, y, z), p(x + dx, y, z + dz), p(x, y, z + dz)],
            [0.0, -1.0, 0.0],
            color,
        );
        self.fill_face(
            [p(x, y, z), p(x, y, z + dz), p(x, y + dy, z + dz), p(x, y + dy, z)],
            [-1.0, 0.0, 0.0],
            color,
        );
        self.fill_face(
            [
                p(x, y, z + dz),
                p(x + dx, y, z + dz),
                p(x + dx, y + dy, z + dz),
                p(x, y + dy, z + dz),
            ],
            [0.0, 0.0, 1.0],
            color,
        );
        Ok(())
    }

    #[inline]
    fn frame(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> IsoCanvas {
        IsoCanvas::new(&CanvasOptions {
            width: 100,
            height: 100,
            scale: 20.0,
            background: Color::WHITE,
        })
        .expect("valid canvas")
    }

    fn is_background(canvas: &IsoCanvas, x: u32, y: u32) -> bool {
        *canvas.image().get_pixel(x, y) == Color::WHITE.to_rgba()
    }

    #[test]
    fn projects_axes_isometrically() {
        let projection = Projection::new(100, 100, 20.0);

        let (x, y) = projection.project(Point3::new(0.0, 0.0, 0.0));
        assert_eq!((x, y), (50.0, 90.0));

        let (x, y) = projection.project(Point3::new(0.0, 0.0, 1.0));
        assert_eq!((x, y), (50.0, 70.0));

        let (x, y) = projection.project(Point3::new(1.0, 0.0, 0.0));
        assert!((x - 67.32).abs() < 0.01 && (y - 80.0).abs() < 1e-9);

        let (x, y) = projection.project(Point3::new(0.0, 1.0, 0.0));
        assert!((x - 32.68).abs() < 0.01 && (y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn cube_paints_three_shaded_faces() {
        let mut canvas = canvas();
        canvas
            .draw_cube(Point3::default(), Size3::cube(1.0), Color::BLUE)
            .unwrap();

        let top = *canvas.image().get_pixel(50, 60);
        let left = *canvas.image().get_pixel(41, 75);
        let right = *canvas.image().get_pixel(58, 75);
        for px in [top, left, right] {
            assert_ne!(px, Color::WHITE.to_rgba());
        }
        assert_ne!(top, left);
        assert_ne!(left, right);
        assert!(is_background(&canvas, 0, 0));
        assert!(is_background(&canvas, 50, 95));
    }

    #[test]
    fn clear_restores_background() {
        let mut canvas = canvas();
        canvas
            .draw_cube(Point3::default(), Size3::cube(1.0), Color::BLUE)
            .unwrap();
        canvas.clear().unwrap();

        assert!(canvas.image().pixels().all(|px| *px == Color::WHITE.to_rgba()));
    }

    #[test]
    fn off_canvas_cube_is_ignored() {
        let mut canvas = canvas();
        canvas
            .draw_cube(Point3::new(0.0, 0.0, 50.0), Size3::cube(1.0), Color::BLUE)
            .unwrap();

        assert!(canvas.image().pixels().all(|px| *px == Color::WHITE.to_rgba()));
    }

    #[test]
    fn rejects_bad_options() {
        let zero = CanvasOptions {
            width: 0,
            ..CanvasOptions::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::Canvas(0, 800)));

        let scale = CanvasOptions {
            scale: f64::NAN,
            ..CanvasOptions::default()
        };
        assert!(matches!(scale.validate(), Err(ConfigError::Scale(_))));
    }
}
