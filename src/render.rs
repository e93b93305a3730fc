// Owns the current point sets and turns them into a frame.
// Every update clears the surface and redraws everything: the sets are
// replaced wholesale and only hold a few dozen points.

use crate::draw::{self, Display, Glyph};
use crate::error::Error;
use crate::types::{Category, FrameBuffer, Point};

pub const BACKGROUND: u32 = 0x00_00_00_00; // black
pub const CORNER_COLOR: u32 = 0x00_FF_00_FF; // magenta
pub const HINT_COLOR: u32 = 0x00_00_FF_FF; // cyan

/// Glyph + color for one category.
pub fn style(category: Category) -> (Glyph, u32) {
    match category {
        Category::Corners => (Glyph::Plus, CORNER_COLOR),
        Category::Hints => (Glyph::Cross, HINT_COLOR),
    }
}

/// The latest complete point list per category.
#[derive(Debug, Default)]
pub struct PointSets {
    corners: Vec<Point>,
    hints: Vec<Point>,
}

impl PointSets {
    pub fn get(&self, category: Category) -> &[Point] {
        match category {
            Category::Corners => &self.corners,
            Category::Hints => &self.hints,
        }
    }

    /// Drop whatever the category held and keep `points` instead.
    pub fn replace(&mut self, category: Category, points: Vec<Point>) {
        match category {
            Category::Corners => self.corners = points,
            Category::Hints => self.hints = points,
        }
    }
}

pub struct PointRenderer<D: Display> {
    display: D,
    screen: FrameBuffer,
    sets: PointSets,
}

impl<D: Display> PointRenderer<D> {
    pub fn new(display: D, width: usize, height: usize) -> Self {
        Self {
            display,
            screen: FrameBuffer::new(width, height),
            sets: PointSets::default(),
        }
    }

    pub fn points(&self, category: Category) -> &[Point] {
        self.sets.get(category)
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Replace one category's points, then redraw the whole frame.
    pub fn set(&mut self, category: Category, points: Vec<Point>) -> Result<(), Error> {
        log::debug!("{}: {} point(s)", category, points.len());
        self.sets.replace(category, points);
        self.redraw()
    }

    /// Clear, stamp corners then hints (hints end up on top), present.
    pub fn redraw(&mut self) -> Result<(), Error> {
        draw::clear(&mut self.screen, BACKGROUND);
        for category in Category::DRAW_ORDER {
            let (glyph, color) = style(category);
            for &p in self.sets.get(category) {
                draw::stamp(&mut self.screen, glyph, p, color);
            }
        }
        self.display.present(&self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Recorder;

    fn renderer() -> PointRenderer<Recorder> {
        PointRenderer::new(Recorder::default(), 270, 480)
    }

    fn count(fb: &FrameBuffer, color: u32) -> usize {
        fb.pixels.iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn corners_block_draws_plus_glyphs_only() {
        let mut r = renderer();
        let points = vec![
            Point::new(10, 20),
            Point::new(30, 40),
            Point::new(0, 0),
            Point::new(1, 1),
            Point::new(50, 50),
            Point::new(49, 49),
        ];
        r.set(Category::Corners, points.clone()).unwrap();

        let frames = &r.display_mut().frames;
        assert_eq!(frames.len(), 1);
        let fb = &frames[0];
        for p in &points {
            assert_eq!(fb.pixel(p.x, p.y), Some(CORNER_COLOR));
        }
        for p in Glyph::Plus.pixels(Point::new(10, 20)) {
            assert_eq!(fb.pixel(p.x, p.y), Some(CORNER_COLOR));
        }
        assert_eq!(fb.pixel(12, 22), Some(BACKGROUND));
        assert_eq!(count(fb, HINT_COLOR), 0);
    }

    #[test]
    fn replacement_is_per_category() {
        let mut r = renderer();
        r.set(Category::Corners, vec![Point::new(5, 5)]).unwrap();
        r.set(Category::Hints, vec![Point::new(100, 100)]).unwrap();
        assert_eq!(r.points(Category::Corners), &[Point::new(5, 5)]);

        r.set(Category::Hints, vec![Point::new(20, 20), Point::new(40, 40)]).unwrap();
        assert_eq!(r.points(Category::Corners), &[Point::new(5, 5)]);
        assert_eq!(r.points(Category::Hints), &[Point::new(20, 20), Point::new(40, 40)]);

        r.set(Category::Corners, Vec::new()).unwrap();
        assert!(r.points(Category::Corners).is_empty());
        assert_eq!(r.points(Category::Hints).len(), 2);
    }

    #[test]
    fn every_redraw_starts_from_a_clear_frame() {
        let mut r = renderer();
        r.set(Category::Hints, vec![Point::new(100, 100)]).unwrap();
        r.set(Category::Hints, vec![Point::new(10, 10)]).unwrap();

        let fb = &r.display_mut().frames[1];
        assert_eq!(fb.pixel(100, 100), Some(BACKGROUND));
        assert_eq!(fb.pixel(10, 10), Some(HINT_COLOR));
        assert_eq!(count(fb, HINT_COLOR), 5);
    }

    #[test]
    fn hints_are_drawn_over_corners() {
        let mut r = renderer();
        r.set(Category::Hints, vec![Point::new(50, 50)]).unwrap();
        r.set(Category::Corners, vec![Point::new(50, 50)]).unwrap();

        let fb = &r.display_mut().frames[1];
        assert_eq!(fb.pixel(50, 50), Some(HINT_COLOR));
        assert_eq!(fb.pixel(52, 50), Some(CORNER_COLOR));
        assert_eq!(fb.pixel(52, 52), Some(HINT_COLOR));
    }
}
