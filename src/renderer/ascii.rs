//! Terminal raster for headless runs
//!
//! Maps arena coordinates onto a fixed character grid. Each agent becomes one
//! glyph, with a `.` on the cell its heading marker falls in.

use glam::Vec2;

use super::{ColorClass, DrawRequest, DrawSink};

const EMPTY: char = ' ';
const MARKER: char = '.';

/// Character-grid sink; `render` returns the current frame
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    half_extents: Vec2,
    cells: Vec<char>,
}

impl AsciiCanvas {
    /// Grid of `cols` x `rows` characters (border included) covering `half_extents`
    pub fn new(cols: usize, rows: usize, half_extents: Vec2) -> Self {
        let cols = cols.max(3);
        let rows = rows.max(3);
        let mut canvas = Self {
            cols,
            rows,
            half_extents,
            cells: vec![EMPTY; cols * rows],
        };
        canvas.clear();
        canvas
    }

    /// Wipe agents, keep the border
    pub fn clear(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let top_or_bottom = row == 0 || row == self.rows - 1;
                let side = col == 0 || col == self.cols - 1;
                self.cells[row * self.cols + col] = match (top_or_bottom, side) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => EMPTY,
                };
            }
        }
    }

    pub fn glyph(color: ColorClass) -> char {
        match color {
            ColorClass::SeekingGreen => 'S',
            ColorClass::AvoidingRed => 'A',
            ColorClass::BeaconYellow => '*',
        }
    }

    /// Interior cell for an arena point; `None` outside the walls
    pub fn cell_at(&self, p: Vec2) -> Option<(usize, usize)> {
        let u = (p.x + self.half_extents.x) / (2.0 * self.half_extents.x);
        let v = (p.y + self.half_extents.y) / (2.0 * self.half_extents.y);
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        let col = 1 + (u * (self.cols - 3) as f32).round() as usize;
        // Screen rows grow downward
        let row = 1 + ((1.0 - v) * (self.rows - 3) as f32).round() as usize;
        Some((col, row))
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    fn put(&mut self, p: Vec2, c: char) {
        if let Some((col, row)) = self.cell_at(p) {
            self.cells[row * self.cols + col] = c;
        }
    }

    /// Current frame, one line per row
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl DrawSink for AsciiCanvas {
    fn arena(&mut self, half_extents: Vec2) {
        self.half_extents = half_extents;
        self.clear();
    }

    fn draw(&mut self, request: &DrawRequest) {
        let (marker, _) = request.heading_marker();
        // Don't let a marker hide another agent's body
        if let Some((col, row)) = self.cell_at(marker) {
            if self.cells[row * self.cols + col] == EMPTY {
                self.cells[row * self.cols + col] = MARKER;
            }
        }
        self.put(request.position, Self::glyph(request.color));
    }
}
