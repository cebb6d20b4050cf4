//! Tiny software rasteriser for the handful of vector primitives the textures need.
//! Coordinates are in pixels, origin top-left; a pixel is covered when its centre is.

use image::{Rgba, RgbaImage};

pub fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
        0xff,
    ])
}

/// Linear blend between two opaque colours, `t` in 0..=1.
pub fn lerp_rgb(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgba([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 0xff])
}

pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::new(width, height),
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    fn fill_where(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba<u8>, inside: impl Fn(f32, f32) -> bool) {
        let (w, h) = self.img.dimensions();
        let px0 = x0.floor().max(0.0) as u32;
        let py0 = y0.floor().max(0.0) as u32;
        let px1 = (x1.ceil().max(0.0) as u32).min(w);
        let py1 = (y1.ceil().max(0.0) as u32).min(h);
        for py in py0..py1 {
            for px in px0..px1 {
                if inside(px as f32 + 0.5, py as f32 + 0.5) {
                    self.img.put_pixel(px, py, color);
                }
            }
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
        self.fill_where(x, y, x + w, y + h, color, |px, py| {
            px >= x && px < x + w && py >= y && py < y + h
        });
    }

    pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Rgba<u8>) {
        self.fill_where(x, y, x + w, y + h, color, |px, py| {
            in_rounded_rect(px, py, x, y, w, h, radius)
        });
    }

    /// Outline centred on the rounded-rect edge, `line_width` thick.
    pub fn stroke_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        line_width: f32,
        color: Rgba<u8>,
    ) {
        let half = line_width * 0.5;
        let (ox, oy, ow, oh, or) = (x - half, y - half, w + line_width, h + line_width, radius + half);
        let (ix, iy, iw, ih, ir) = (x + half, y + half, w - line_width, h - line_width, (radius - half).max(0.0));
        self.fill_where(ox, oy, ox + ow, oy + oh, color, |px, py| {
            in_rounded_rect(px, py, ox, oy, ow, oh, or)
                && !(iw > 0.0 && ih > 0.0 && in_rounded_rect(px, py, ix, iy, iw, ih, ir))
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgba<u8>) {
        self.fill_where(cx - r, cy - r, cx + r, cy + r, color, |px, py| {
            (px - cx).powi(2) + (py - cy).powi(2) <= r * r
        });
    }

    /// Axis-aligned ellipse; `w`/`h` are full diameters.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32, color: Rgba<u8>) {
        let (rx, ry) = (w * 0.5, h * 0.5);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.fill_where(cx - rx, cy - ry, cx + rx, cy + ry, color, |px, py| {
            ((px - cx) / rx).powi(2) + ((py - cy) / ry).powi(2) <= 1.0
        });
    }

    /// Closed polygon, even-odd rule.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba<u8>) {
        if points.len() < 3 {
            return;
        }
        let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for &(x, y) in points {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        self.fill_where(x0, y0, x1, y1, color, |px, py| point_in_polygon(px, py, points));
    }
}

fn in_rounded_rect(px: f32, py: f32, x: f32, y: f32, w: f32, h: f32, radius: f32) -> bool {
    if px < x || px >= x + w || py < y || py >= y + h {
        return false;
    }
    let r = radius.min(w * 0.5).min(h * 0.5).max(0.0);
    let cx = px.clamp(x + r, x + w - r);
    let cy = py.clamp(y + r, y + h - r);
    (px - cx).powi(2) + (py - cy).powi(2) <= r * r
}

fn point_in_polygon(px: f32, py: f32, pts: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let (xi, yi) = pts[i];
        let (xj, yj) = pts[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xff0000;

    #[test]
    fn rect_covers_exact_pixels() {
        let mut c = Canvas::new(10, 10);
        c.fill_rect(2.0, 3.0, 4.0, 2.0, rgb(RED));
        let img = c.into_image();
        let filled = img.pixels().filter(|p| p[3] == 0xff).count();
        assert_eq!(filled, 8);
        assert_eq!(*img.get_pixel(2, 3), rgb(RED));
        assert_eq!(img.get_pixel(6, 3)[3], 0);
    }

    #[test]
    fn rounded_rect_clears_corners() {
        let mut c = Canvas::new(20, 20);
        c.fill_rounded_rect(0.0, 0.0, 20.0, 20.0, 8.0, rgb(RED));
        let img = c.into_image();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(10, 0)[3], 0xff);
        assert_eq!(img.get_pixel(10, 10)[3], 0xff);
    }

    #[test]
    fn stroke_leaves_interior_empty() {
        let mut c = Canvas::new(40, 40);
        c.stroke_rounded_rect(5.0, 5.0, 30.0, 30.0, 4.0, 4.0, rgb(RED));
        let img = c.into_image();
        assert_eq!(img.get_pixel(20, 20)[3], 0);
        assert_eq!(img.get_pixel(20, 5)[3], 0xff);
    }

    #[test]
    fn clipping_ignores_out_of_bounds() {
        let mut c = Canvas::new(4, 4);
        c.fill_circle(-10.0, -10.0, 3.0, rgb(RED));
        c.fill_rect(2.0, 2.0, 100.0, 100.0, rgb(RED));
        let img = c.into_image();
        assert_eq!(img.pixels().filter(|p| p[3] == 0xff).count(), 4);
    }

    #[test]
    fn polygon_triangle() {
        let mut c = Canvas::new(10, 10);
        c.fill_polygon(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], rgb(RED));
        let img = c.into_image();
        assert_eq!(img.get_pixel(1, 1)[3], 0xff);
        assert_eq!(img.get_pixel(9, 9)[3], 0);
    }

    #[test]
    fn lerp_endpoints() {
        let a = rgb(0x000000);
        let b = rgb(0xffffff);
        assert_eq!(lerp_rgb(a, b, 0.0), a);
        assert_eq!(lerp_rgb(a, b, 1.0), b);
    }
}
