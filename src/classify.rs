// Turns the raw logcat line stream into coordinate blocks.
// A marker line ("corners" / "hints") arms a category; the next 3 lines
// become one block for that category.

use crate::types::Category;

/// Number of coordinate lines that follow every marker.
pub const BLOCK_LINES: usize = 3;

/// One telemetry update: the category plus its raw coordinate lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub category: Category,
    pub lines: [String; BLOCK_LINES],
}

/// What feeding one line produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Line consumed (marker, buffered, or ignored while idle).
    Pending,
    /// The third line after a marker arrived.
    Block(Block),
    /// Blank line: the stream is over.
    End,
}

/// IDLE when `armed` is None, COLLECTING otherwise.
#[derive(Debug, Default)]
pub struct StreamClassifier {
    armed: Option<Category>,
    buffer: [String; BLOCK_LINES],
    filled: usize,
}

impl StreamClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> Option<Category> {
        self.armed
    }

    pub fn buffered(&self) -> usize {
        self.filled
    }

    /// Feed one line from the stream.
    pub fn push(&mut self, line: &str) -> Step {
        let line = line.trim();
        if line.is_empty() {
            return Step::End;
        }

        if let Some(category) = marker(line) {
            if self.filled > 0 {
                log::debug!(
                    "{} marker dropped {} partial {} line(s)",
                    category,
                    self.filled,
                    self.armed.map_or("?", Category::marker),
                );
            }
            self.armed = Some(category);
            self.filled = 0;
            return Step::Pending;
        }

        let Some(category) = self.armed else {
            return Step::Pending;
        };

        self.buffer[self.filled] = line.to_owned();
        self.filled += 1;
        if self.filled < BLOCK_LINES {
            return Step::Pending;
        }

        self.armed = None;
        self.filled = 0;
        Step::Block(Block { category, lines: std::mem::take(&mut self.buffer) })
    }
}

fn marker(line: &str) -> Option<Category> {
    Category::DRAW_ORDER
        .into_iter()
        .find(|c| line.starts_with(c.marker()))
}
