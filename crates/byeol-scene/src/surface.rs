//! Software drawing surface blitted to the terminal as half blocks.

use byeol_core::Rgba;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// An opaque RGB framebuffer, one pixel per terminal half block.
///
/// The renderer issues its ordered drawing operations against this
/// surface; the binary turns it into rows of `▀` spans where the
/// foreground carries the upper pixel and the background the lower.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width * height],
        }
    }

    /// Resize and blank the buffer. A no-op when dimensions match.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0]; width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every pixel to black.
    pub fn clear(&mut self) {
        self.pixels.fill([0, 0, 0]);
    }

    /// Source-over fill of the whole surface.
    pub fn fill(&mut self, color: Rgba) {
        for px in &mut self.pixels {
            *px = color.over(*px);
        }
    }

    /// Additive ("lighter") fill of the whole surface.
    pub fn fill_lighter(&mut self, color: Rgba) {
        for px in &mut self.pixels {
            *px = color.add_onto(*px);
        }
    }

    /// Fill a circle; `glow` extends a soft halo past the radius,
    /// approximating canvas shadow blur.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, glow: f64, color: Rgba) {
        let reach = radius + glow + 1.0;
        let (x0, x1) = self.x_span(cx, reach);
        let (y0, y1) = self.y_span(cy, reach);
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = if dist <= radius {
                    1.0
                } else if glow > 0.0 && dist < radius + glow {
                    // Halo falls off linearly over the glow radius.
                    (1.0 - (dist - radius) / glow) * 0.5
                } else if dist < radius + 1.0 {
                    radius + 1.0 - dist
                } else {
                    continue;
                };
                let idx = y * self.width + x;
                self.pixels[idx] = color.with_alpha(color.a * coverage as f32).over(self.pixels[idx]);
            }
        }
    }

    /// Stroke a line with a gradient sampled evenly from `stops`
    /// between the endpoints, plus a white glow halo.
    pub fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        glow: f64,
        stops: &[Rgba],
    ) {
        if stops.is_empty() {
            return;
        }
        let (x0f, y0f) = from;
        let (x1f, y1f) = to;
        let half = width / 2.0;
        let reach = half + glow + 1.0;

        let (x0, x1) = self.x_span_range(x0f.min(x1f), x0f.max(x1f), reach);
        let (y0, y1) = self.y_span_range(y0f.min(y1f), y0f.max(y1f), reach);

        let dx = x1f - x0f;
        let dy = y1f - y0f;
        let len_sq = dx * dx + dy * dy;

        for y in y0..y1 {
            for x in x0..x1 {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;
                // Project onto the segment for distance and gradient position.
                let t = if len_sq > 0.0 {
                    (((px - x0f) * dx + (py - y0f) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nx = x0f + t * dx;
                let ny = y0f + t * dy;
                let dist = ((px - nx).powi(2) + (py - ny).powi(2)).sqrt();

                let coverage = if dist <= half {
                    1.0
                } else if dist < half + 1.0 {
                    half + 1.0 - dist
                } else if glow > 0.0 && dist < half + glow {
                    (1.0 - (dist - half) / glow) * 0.3
                } else {
                    continue;
                };

                let color = if dist > half + 1.0 {
                    // The halo is the canvas shadow, not the gradient.
                    Rgba::WHITE
                } else {
                    sample_gradient(stops, t)
                };
                let idx = y * self.width + x;
                self.pixels[idx] = color.with_alpha(color.a * coverage as f32).over(self.pixels[idx]);
            }
        }
    }

    /// Terminal rows of half-block spans for the current buffer.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.height.div_ceil(2))
            .map(|row| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let upper = self.pixels[row * 2 * self.width + x];
                        let lower = if row * 2 + 1 < self.height {
                            self.pixels[(row * 2 + 1) * self.width + x]
                        } else {
                            [0, 0, 0]
                        };
                        Span::styled(
                            "▀",
                            Style::new()
                                .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                                .bg(Color::Rgb(lower[0], lower[1], lower[2])),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.width + x]
    }

    fn x_span(&self, center: f64, reach: f64) -> (usize, usize) {
        self.x_span_range(center, center, reach)
    }

    fn y_span(&self, center: f64, reach: f64) -> (usize, usize) {
        self.y_span_range(center, center, reach)
    }

    fn x_span_range(&self, lo: f64, hi: f64, reach: f64) -> (usize, usize) {
        let start = (lo - reach).floor().max(0.0) as usize;
        let end = ((hi + reach).ceil().max(0.0) as usize).min(self.width);
        (start.min(end), end)
    }

    fn y_span_range(&self, lo: f64, hi: f64, reach: f64) -> (usize, usize) {
        let start = (lo - reach).floor().max(0.0) as usize;
        let end = ((hi + reach).ceil().max(0.0) as usize).min(self.height);
        (start.min(end), end)
    }
}

/// Sample evenly spaced gradient stops at position `t` in `[0, 1]`.
fn sample_gradient(stops: &[Rgba], t: f64) -> Rgba {
    match stops.len() {
        0 => Rgba::rgba(0, 0, 0, 0.0),
        1 => stops[0],
        n => {
            let scaled = t.clamp(0.0, 1.0) * (n - 1) as f64;
            let i = (scaled.floor() as usize).min(n - 2);
            stops[i].lerp(stops[i + 1], (scaled - i as f64) as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_washes_every_pixel() {
        let mut surface = Surface::new(4, 4);
        surface.fill(Rgba::rgba(255, 255, 255, 0.2));
        assert_eq!(surface.pixel(0, 0), [51, 51, 51]);
        assert_eq!(surface.pixel(3, 3), [51, 51, 51]);
        surface.clear();
        assert_eq!(surface.pixel(2, 2), [0, 0, 0]);
    }

    #[test]
    fn lighter_fill_adds_instead_of_replacing() {
        let mut surface = Surface::new(2, 2);
        surface.fill(Rgba::rgb(100, 0, 0));
        surface.fill_lighter(Rgba::rgba(50, 0, 0, 1.0));
        assert_eq!(surface.pixel(0, 0)[0], 150);
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut surface = Surface::new(16, 16);
        surface.fill_circle(8.0, 8.0, 3.0, 0.0, Rgba::WHITE);
        assert_eq!(surface.pixel(8, 8), [255, 255, 255]);
        assert_eq!(surface.pixel(0, 0), [0, 0, 0]);
        assert_eq!(surface.pixel(15, 15), [0, 0, 0]);
    }

    #[test]
    fn line_paints_the_gradient_head() {
        let mut surface = Surface::new(32, 8);
        let stops = [Rgba::rgb(255, 0, 0), Rgba::rgb(0, 0, 255)];
        surface.stroke_line((2.0, 4.0), (30.0, 4.0), 2.0, 0.0, &stops);
        let head = surface.pixel(2, 4);
        let tail = surface.pixel(29, 4);
        assert!(head[0] > 200 && head[2] < 60);
        assert!(tail[2] > 200 && tail[0] < 60);
    }

    #[test]
    fn gradient_sampling_is_even_across_stops() {
        let stops = [
            Rgba::rgb(255, 0, 0),
            Rgba::rgb(0, 255, 0),
            Rgba::rgb(0, 0, 255),
        ];
        assert_eq!(sample_gradient(&stops, 0.0), stops[0]);
        assert_eq!(sample_gradient(&stops, 0.5), stops[1]);
        assert_eq!(sample_gradient(&stops, 1.0), stops[2]);
    }

    #[test]
    fn blit_pairs_pixel_rows_into_half_blocks() {
        let mut surface = Surface::new(3, 4);
        surface.fill(Rgba::WHITE);
        let lines = surface.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 3);
    }

    #[test]
    fn resize_changes_dimensions_and_blanks() {
        let mut surface = Surface::new(4, 4);
        surface.fill(Rgba::WHITE);
        surface.resize(8, 6);
        assert_eq!(surface.width(), 8);
        assert_eq!(surface.height(), 6);
        assert_eq!(surface.pixel(7, 5), [0, 0, 0]);
    }
}
