//! Character-grid surface for terminal output
//!
//! Each cell covers a `FIELD_WIDTH / cols` by `FIELD_HEIGHT / rows` patch of
//! the field. Rectangles fill every cell they overlap; the ball fills the cells
//! whose centers it covers, and always its own cell.

use std::fmt;

use super::Surface;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

pub const EMPTY: char = ' ';
pub const PADDLE: char = '█';
pub const BALL: char = 'O';

#[derive(Debug, Clone)]
pub struct TextSurface {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TextSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn cell_width(&self) -> f32 {
        FIELD_WIDTH / self.cols as f32
    }

    fn cell_height(&self) -> f32 {
        FIELD_HEIGHT / self.rows as f32
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// One string per row
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Cell range `[start, end)` overlapped by the span `[from, to)`
    fn span(from: f32, to: f32, cell: f32, count: usize) -> (usize, usize) {
        let start = (from / cell).floor().max(0.0) as usize;
        let end = ((to / cell).ceil().max(0.0) as usize).min(count);
        (start.min(count), end)
    }

    fn fill(&mut self, x: f32, y: f32, width: f32, height: f32, ch: char) {
        let (c0, c1) = Self::span(x, x + width, self.cell_width(), self.cols);
        let (r0, r1) = Self::span(y, y + height, self.cell_height(), self.rows);
        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[row * self.cols + col] = ch;
            }
        }
    }
}

impl Surface for TextSurface {
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.fill(x, y, width, height, EMPTY);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.fill(x, y, width, height, PADDLE);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        let (cw, ch) = (self.cell_width(), self.cell_height());
        let (c0, c1) = Self::span(x - radius, x + radius, cw, self.cols);
        let (r0, r1) = Self::span(y - radius, y + radius, ch, self.rows);
        for row in r0..r1 {
            for col in c0..c1 {
                let cx = (col as f32 + 0.5) * cw;
                let cy = (row as f32 + 0.5) * ch;
                if (cx - x).powi(2) + (cy - y).powi(2) <= radius * radius {
                    self.cells[row * self.cols + col] = BALL;
                }
            }
        }

        if (0.0..FIELD_WIDTH).contains(&x) && (0.0..FIELD_HEIGHT).contains(&y) {
            let col = (x / cw) as usize;
            let row = (y / ch) as usize;
            if let Some(cell) = self.cells.get_mut(row * self.cols + col) {
                *cell = BALL;
            }
        }
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;
    use crate::renderer::draw_frame;

    #[test]
    fn test_default_frame_layout() {
        let mut surface = TextSurface::new(80, 20);
        draw_frame(&GameEngine::default().snapshot(), &mut surface);

        // Paddles cover y 200..300 -> rows 10..15 in the outer columns
        for row in 0..20 {
            let expected = if (10..15).contains(&row) { PADDLE } else { EMPTY };
            assert_eq!(surface.get(0, row), Some(expected), "left row {row}");
            assert_eq!(surface.get(79, row), Some(expected), "right row {row}");
        }
        assert_eq!(surface.get(1, 10), Some(EMPTY));
        // Ball at (300, 200)
        assert_eq!(surface.get(30, 10), Some(BALL));
    }

    #[test]
    fn test_clear_erases_previous_frame() {
        let mut surface = TextSurface::new(80, 20);
        surface.fill_rect(0.0, 0.0, 800.0, 400.0);
        surface.clear(0.0, 0.0, 800.0, 400.0);
        assert!(surface.lines().iter().all(|line| line.trim().is_empty()));
    }

    #[test]
    fn test_ball_outside_field_is_clipped() {
        let mut surface = TextSurface::new(80, 20);
        surface.fill_circle(-50.0, 200.0, 10.0);
        surface.fill_circle(850.0, 200.0, 10.0);
        assert!(surface.lines().iter().all(|line| !line.contains(BALL)));
    }

    #[test]
    fn test_display_has_one_line_per_row() {
        let surface = TextSurface::new(8, 3);
        let text = surface.to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|line| line.chars().count() == 8));
    }

    #[test]
    fn test_out_of_range_get() {
        let surface = TextSurface::new(4, 4);
        assert_eq!(surface.get(4, 0), None);
        assert_eq!(surface.get(0, 4), None);
    }
}
