/// The character grid: the sole drawing surface every layer mutates.
///
/// All coordinate operations are total over arbitrary `i32` coordinates:
/// out-of-range writes silently no-op and out-of-range reads return
/// `None`. Layers routinely draw sprites that hang partially off-screen,
/// so nothing here ever panics or clips on their behalf.

use crossterm::style::Color;

/// Default foreground for freshly cleared cells.
pub const DEFAULT_FG: Color = Color::Rgb { r: 136, g: 136, b: 136 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: DEFAULT_FG,
        bg: None,
        bold: false,
    };
}

pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Grid {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
        }
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols as i32
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows as i32
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            None
        } else {
            Some(row as usize * self.cols + col as usize)
        }
    }

    /// Write a cell's character and foreground. No-op out of range.
    pub fn set(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    /// Full cell write including background and bold.
    pub fn set_full(&mut self, col: i32, row: i32, ch: char, fg: Color, bg: Option<Color>, bold: bool) {
        if let Some(i) = self.index(col, row) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
            if let Some(bg) = bg {
                cell.bg = Some(bg);
            }
            cell.bold = bold;
        }
    }

    pub fn get(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Mutable access, used by the lightning flash to brighten in place.
    pub fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        match self.index(col, row) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// Write a string one glyph per cell. Per-character bounds handled by `set`.
    pub fn draw_text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(col + i as i32, row, ch, fg);
        }
    }

    /// Like `draw_text` but with an explicit background.
    pub fn draw_text_bg(&mut self, col: i32, row: i32, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set_full(col + i as i32, row, ch, fg, Some(bg), false);
        }
    }

    /// Blit a multi-line sprite. Space characters are transparent; they
    /// leave whatever is already underneath untouched.
    pub fn draw_art<S: AsRef<str>>(&mut self, col: i32, row: i32, lines: &[S], fg: Color) {
        self.draw_art_colored(col, row, lines, fg, &[]);
    }

    /// `draw_art` with a per-glyph color override map for multi-colored
    /// sprites (e.g. eyes vs. body).
    pub fn draw_art_colored<S: AsRef<str>>(
        &mut self,
        col: i32,
        row: i32,
        lines: &[S],
        fg: Color,
        overrides: &[(char, Color)],
    ) {
        for (r, line) in lines.iter().enumerate() {
            for (c, ch) in line.as_ref().chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let color = overrides
                    .iter()
                    .find(|(o, _)| *o == ch)
                    .map(|(_, color)| *color)
                    .unwrap_or(fg);
                self.set(col + c as i32, row + r as i32, ch, color);
            }
        }
    }

    /// Reset every cell to the blank default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        if cols != self.cols || rows != self.rows {
            self.cols = cols;
            self.rows = rows;
            self.cells = vec![Cell::BLANK; cols * rows];
        } else {
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut grid = Grid::new(10, 5);
        let before: Vec<Cell> = (0..5)
            .flat_map(|r| (0..10).map(move |c| (c, r)))
            .map(|(c, r)| *grid.get(c, r).unwrap())
            .collect();

        for &(c, r) in &[(-1, 0), (0, -1), (10, 0), (0, 5), (-7, 99), (i32::MAX, i32::MIN)] {
            grid.set(c, r, 'X', Color::Red);
            grid.set_full(c, r, 'X', Color::Red, Some(Color::Blue), true);
            assert!(grid.get(c, r).is_none());
        }

        let after: Vec<Cell> = (0..5)
            .flat_map(|r| (0..10).map(move |c| (c, r)))
            .map(|(c, r)| *grid.get(c, r).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn art_spaces_are_transparent() {
        let mut grid = Grid::new(10, 5);
        grid.set(1, 1, '#', Color::Green);
        grid.draw_art(0, 0, &["ab", " c"], Color::White);
        // (1,1) sat under the art's space, untouched
        assert_eq!(grid.get(1, 1).unwrap().ch, '#');
        assert_eq!(grid.get(0, 0).unwrap().ch, 'a');
        assert_eq!(grid.get(1, 0).unwrap().ch, 'b');
        assert_eq!(grid.get(0, 1).unwrap().ch, ' ');
    }

    #[test]
    fn art_color_overrides_apply_per_glyph() {
        let mut grid = Grid::new(8, 3);
        grid.draw_art_colored(0, 0, &["(o)"], Color::White, &[('o', Color::Yellow)]);
        assert_eq!(grid.get(0, 0).unwrap().fg, Color::White);
        assert_eq!(grid.get(1, 0).unwrap().fg, Color::Yellow);
    }

    #[test]
    fn partially_off_screen_text_keeps_visible_part() {
        let mut grid = Grid::new(5, 2);
        grid.draw_text(3, 0, "abcd", Color::White);
        assert_eq!(grid.get(3, 0).unwrap().ch, 'a');
        assert_eq!(grid.get(4, 0).unwrap().ch, 'b');
        // c and d fell off the right edge
        assert!(grid.get(5, 0).is_none());
    }

    #[test]
    fn resize_clears() {
        let mut grid = Grid::new(4, 4);
        grid.set(0, 0, 'x', Color::White);
        grid.resize(6, 3);
        assert_eq!(grid.cols(), 6);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.get(0, 0).unwrap().ch, ' ');
    }
}
