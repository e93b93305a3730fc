// Window + software drawing utilities.
// 1) A window that shows the telemetry framebuffer.
// 2) Per-pixel drawing with clipping.
// 3) The 5-pixel "+" and "x" marker glyphs.

use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, Window, WindowOptions};

/// Where finished frames go. The window in production, a recorder in tests.
pub trait Display {
    fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error>;

    /// Process pending window events without changing what is shown.
    fn pump(&mut self) {}

    /// True once the user asked to close the display.
    fn quit_requested(&self) -> bool {
        false
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the downscaled device size.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // Events are pumped once per log line; no frame-rate sleep in update().
        window.set_target_fps(0);
        Ok(Self { window })
    }
}

impl Display for Drawer {
    fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    // Without this the close button and ESC are never seen between frames.
    fn pump(&mut self) {
        self.window.update();
    }

    /// Window closed or ESC held.
    fn quit_requested(&self) -> bool {
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }
}

/// Keeps a copy of every presented frame.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Recorder {
    pub frames: Vec<FrameBuffer>,
    pub quit: bool,
    pub close_on_pump: bool, // quit turns true on the next pump, like minifb
    pub pumps: usize,
}

#[cfg(test)]
impl Display for Recorder {
    fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.frames.push(framebuffer.clone());
        Ok(())
    }

    fn pump(&mut self) {
        self.pumps += 1;
        self.quit |= self.close_on_pump;
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/* ---------- Software drawing: pixels and marker glyphs ---------- */

/// Distance from a glyph's center to each of its 4 outer pixels.
pub const GLYPH_RADIUS: i32 = 2;

/// Marker shapes, 5 pixels each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Plus,  // center + cardinal offsets
    Cross, // center + diagonal offsets
}

impl Glyph {
    /// The 5 pixel positions of this glyph centered at `p`.
    pub fn pixels(self, p: Point) -> [Point; 5] {
        let r = GLYPH_RADIUS;
        match self {
            Glyph::Plus => [
                p,
                Point::new(p.x + r, p.y),
                Point::new(p.x - r, p.y),
                Point::new(p.x, p.y + r),
                Point::new(p.x, p.y - r),
            ],
            Glyph::Cross => [
                p,
                Point::new(p.x + r, p.y + r),
                Point::new(p.x - r, p.y + r),
                Point::new(p.x + r, p.y - r),
                Point::new(p.x - r, p.y - r),
            ],
        }
    }
}

/// Fill the whole framebuffer with one color.
pub fn clear(fb: &mut FrameBuffer, color: u32) {
    fb.pixels.fill(color);
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Stamp a glyph centered at `p`. Pixels off the edge are clipped.
pub fn stamp(fb: &mut FrameBuffer, glyph: Glyph, p: Point, color: u32) {
    for px in glyph.pixels(p) {
        put_pixel(fb, px.x, px.y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_uses_cardinal_offsets() {
        let px = Glyph::Plus.pixels(Point::new(10, 10));
        assert_eq!(
            px,
            [
                Point::new(10, 10),
                Point::new(12, 10),
                Point::new(8, 10),
                Point::new(10, 12),
                Point::new(10, 8),
            ]
        );
    }

    #[test]
    fn cross_uses_diagonal_offsets() {
        let px = Glyph::Cross.pixels(Point::new(10, 10));
        assert!(px.contains(&Point::new(12, 12)));
        assert!(px.contains(&Point::new(8, 8)));
        assert!(px.contains(&Point::new(8, 12)));
        assert!(px.contains(&Point::new(12, 8)));
        assert!(!px.contains(&Point::new(12, 10)));
    }

    #[test]
    fn stamp_clips_at_edges() {
        let mut fb = FrameBuffer::new(4, 4);
        stamp(&mut fb, Glyph::Plus, Point::new(0, 0), 0xFF);
        assert_eq!(fb.pixel(0, 0), Some(0xFF));
        assert_eq!(fb.pixel(2, 0), Some(0xFF));
        assert_eq!(fb.pixel(0, 2), Some(0xFF));
        assert_eq!(fb.pixels.iter().filter(|&&c| c == 0xFF).count(), 3);
    }

    #[test]
    fn clear_overwrites_everything() {
        let mut fb = FrameBuffer::new(2, 2);
        put_pixel(&mut fb, 1, 1, 7);
        clear(&mut fb, 3);
        assert!(fb.pixels.iter().all(|&c| c == 3));
    }
}
