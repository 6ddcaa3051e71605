/// Terminal blitter: double-buffered, diff-based presentation of the grid.
///
/// How it works:
///   1. The host composes a frame into a `Grid`
///   2. Each cell is compared against the previously emitted frame
///   3. Only changed cells produce terminal commands
///   4. Commands are batched with `queue!` and flushed once per frame
///
/// This eliminates the flicker of full-screen redraws.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::ui::grid::{Cell, Grid};

/// Explicit night-sky background for all "empty" cells. Using the same
/// RGB for `Clear` and every cell background keeps inter-row gap pixels
/// consistent on VTE-based terminals.
const BASE_BG: Color = Color::Rgb { r: 6, g: 6, b: 10 };

/// Sentinel used to invalidate the back buffer: differs from any real
/// cell so every position is re-emitted on the next frame.
const INVALID: Cell = Cell {
    ch: '\u{0}',
    fg: Color::Magenta,
    bg: Some(Color::Magenta),
    bold: false,
};

#[inline]
fn norm_bg(bg: Option<Color>) -> Color {
    bg.unwrap_or(BASE_BG)
}

pub struct Screen {
    writer: BufWriter<io::Stdout>,
    back: Vec<Cell>,
    cols: usize,
    rows: usize,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            back: Vec::new(),
            cols: 0,
            rows: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.cols = tw as usize;
        self.rows = th as usize;
        self.back = vec![INVALID; self.cols * self.rows];
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Detect terminal resizes. Returns the current (cols, rows); on a
    /// size change the back buffer is invalidated for a full repaint.
    pub fn sync_size(&mut self) -> io::Result<(usize, usize)> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.cols || th as usize != self.rows {
            self.cols = tw as usize;
            self.rows = th as usize;
            self.back = vec![INVALID; self.cols * self.rows];
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }
        Ok((self.cols, self.rows))
    }

    /// Diff the composed grid against the last emitted frame and flush
    /// only the changed cells.
    pub fn render(&mut self, grid: &Grid) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = BASE_BG;
        let mut last_bold = false;
        let mut need_move = true;
        let mut last_x: i32 = -2;
        let mut last_y: i32 = -2;

        // Explicit base colors at frame start; never ResetColor mid-frame,
        // the terminal's native default may differ from BASE_BG.
        queue!(
            self.writer,
            SetForegroundColor(last_fg),
            SetBackgroundColor(last_bg),
            SetAttribute(Attribute::NormalIntensity),
        )?;

        let rows = (grid.rows() as usize).min(self.rows);
        let cols = (grid.cols() as usize).min(self.cols);

        for y in 0..rows {
            for x in 0..cols {
                let cell = *grid.get(x as i32, y as i32).unwrap_or(&Cell::BLANK);
                let prev = self.back[y * self.cols + x];

                if cell == prev {
                    need_move = true;
                    continue;
                }

                if need_move || x as i32 != last_x + 1 || y as i32 != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                let bg = norm_bg(cell.bg);
                if bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(bg))?;
                    last_bg = bg;
                }
                if cell.bold != last_bold {
                    let attr = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                    queue!(self.writer, SetAttribute(attr))?;
                    last_bold = cell.bold;
                }

                let mut buf = [0u8; 4];
                let glyph: &str = cell.ch.encode_utf8(&mut buf);
                queue!(self.writer, Print(glyph))?;

                self.back[y * self.cols + x] = cell;
                last_x = x as i32;
                last_y = y as i32;
            }
        }

        self.writer.flush()
    }
}
