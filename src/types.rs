// Core types shared by the classifier, the parser and the renderer.

use std::fmt;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // window width in pixels (already downscaled)
    pub height: usize,     // window height in pixels (already downscaled)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Color at (x,y), or None when outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// Which kind of telemetry a block carries. Decides glyph shape and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Corners,
    Hints,
}

impl Category {
    /// Draw order: corners first, hints on top.
    pub const DRAW_ORDER: [Category; 2] = [Category::Corners, Category::Hints];

    /// The marker a log line starts with to arm this category.
    pub fn marker(self) -> &'static str {
        match self {
            Category::Corners => "corners",
            Category::Hints => "hints",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A marker position in window pixels (device pixels / downscale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Divisor from device pixels to window pixels. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downscale(i32);

impl Downscale {
    pub const DEFAULT: Downscale = Downscale(4);

    /// None for zero or negative factors.
    pub fn new(factor: i32) -> Option<Self> {
        (factor >= 1).then_some(Self(factor))
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// Integer division, truncating toward zero (also for negative inputs).
    pub fn apply(self, value: i32) -> i32 {
        value / self.0
    }

    /// Window size for a device of `device_w` x `device_h`, never below 1x1.
    pub fn window_size(self, device_w: usize, device_h: usize) -> (usize, usize) {
        let d = self.0 as usize;
        ((device_w / d).max(1), (device_h / d).max(1))
    }
}
