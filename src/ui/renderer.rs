/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Screen layout:
///   row 0        header (user, cwd, game indicator)
///   rows 1..h-1  transcript, bottom-aligned, live input on the last line
///   row h-1      status message or key help
///
/// The matrix rain is drawn over the transcript rows when running.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use super::matrix::{MatrixRain, TRAIL};
use super::transcript::{Line, Transcript};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: [u8; 4],
    ch_len: u8,
    fg: Color,
    bg: Color,
    wide: bool, // true = this char occupies 2 terminal columns
    cont: bool, // true = continuation of previous wide char (skip render)
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells.
    ///
    /// Using the same RGB for `Clear(ClearType::All)` and every cell keeps
    /// the inter-row gap pixels on VTE terminals the same color as the cells.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell {
        ch: [b' ', 0, 0, 0],
        ch_len: 1,
        fg: Color::White,
        bg: Cell::BASE_BG,
        wide: false,
        cont: false,
    };

    const WIDE_CONT: Cell = Cell {
        ch: [0; 4],
        ch_len: 0,
        fg: Color::White,
        bg: Cell::BASE_BG,
        wide: false,
        cont: true,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: [b'?', 0, 0, 0],
        ch_len: 1,
        fg: Color::Magenta,
        bg: Color::Magenta,
        wide: false,
        cont: false,
    };

    /// Normalize bg: Color::Reset → BASE_BG so that every cell gets an
    /// explicit background color (never terminal-default).
    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        }
    }

    fn from_char(c: char, fg: Color, bg: Color) -> Self {
        let mut cell = Self::BLANK;
        let len = c.encode_utf8(&mut cell.ch).len() as u8;
        cell.ch_len = len;
        cell.fg = fg;
        cell.bg = Self::norm_bg(bg);
        cell.wide = is_wide(c);
        cell
    }

    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.ch[..self.ch_len as usize]).unwrap_or("")
    }
}

/// Terminal column width of a char: 2 for CJK and emoji, else 1.
/// Half-width katakana (U+FF61..U+FF9F) stays narrow.
fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1F64F
        | 0x1F900..=0x1F9FF
        | 0x20000..=0x3FFFD)
}

fn str_width(s: &str) -> usize {
    s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Wide chars take two columns.
    /// Returns the column after the last char written.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) -> usize {
        let mut cx = x;
        for ch in s.chars() {
            let cell = Cell::from_char(ch, fg, bg);
            let w = if cell.wide { 2 } else { 1 };
            if cx + w > self.width {
                break;
            }
            self.set(cx, y, cell);
            if cell.wide {
                self.set(cx + 1, y, Cell { bg: cell.bg, ..Cell::WIDE_CONT });
            }
            cx += w;
        }
        cx
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::from_char(' ', Color::White, bg));
        }
    }
}

// ── Palette ──

const HEADER_BG: Color = Color::Rgb { r: 40, g: 40, b: 70 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };
const PROMPT_FG: Color = Color::Rgb { r: 80, g: 255, b: 80 };
const TEXT_FG: Color = Color::Rgb { r: 220, g: 220, b: 220 };
const HEADING_FG: Color = Color::Rgb { r: 100, g: 200, b: 255 };
const BULLET_FG: Color = Color::Rgb { r: 255, g: 220, b: 50 };
const FOOD_FG: Color = Color::Rgb { r: 255, g: 80, b: 80 };
const FRAME_FG: Color = Color::Rgb { r: 180, g: 140, b: 50 };

/// What one frame shows. Borrowed from the main loop.
pub struct View<'a> {
    pub header: &'a str,
    pub transcript: &'a Transcript,
    pub input: &'a str,
    pub game_active: bool,
    pub message: &'a str,
    pub matrix: Option<&'a MatrixRain>,
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Transcript area size in (columns, rows).
    pub fn body_size(&self) -> (usize, usize) {
        (self.term_w, self.term_h.saturating_sub(2))
    }

    pub fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        if self.term_h >= 3 && self.term_w > 0 {
            self.compose_header(view);
            self.compose_body(view);
            if let Some(rain) = view.matrix {
                self.compose_matrix(rain);
            }
            self.compose_status(view);
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors; ResetColor would fall back to the terminal default.
        queue!(self.writer, SetForegroundColor(Color::White), SetBackgroundColor(Cell::BASE_BG))?;

        for y in 0..self.front.height {
            let mut x = 0;
            while x < self.front.width {
                let cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                if cell.cont {
                    if cell != prev {
                        need_move = true;
                    }
                    x += 1;
                    continue;
                }

                let cont_changed = cell.wide
                    && x + 1 < self.front.width
                    && self.front.get(x + 1, y) != self.back.get(x + 1, y);

                if cell == prev && !cont_changed {
                    need_move = true;
                    x += 1;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.as_str()))?;

                if cell.wide {
                    last_x = x + 1;
                    x += 2;
                } else {
                    last_x = x;
                    x += 1;
                }
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_header(&mut self, view: &View<'_>) {
        self.front.fill_row(0, HEADER_BG);
        self.front.put_str(1, 0, view.header, Color::White, HEADER_BG);
        if view.game_active {
            let tag = " 🐍 SNAKE ";
            let x = self.front.width.saturating_sub(str_width(tag) + 1);
            self.front.put_str(x, 0, tag, PROMPT_FG, HEADER_BG);
        }
    }

    fn compose_body(&mut self, view: &View<'_>) {
        let width = self.front.width;
        let body_h = self.term_h - 2;
        let t = view.transcript;
        let lines = t.lines();
        let end = lines.len().saturating_sub(t.scroll());
        let following = t.scroll() == 0;

        // Walk backwards, wrapping each line, until the body is full.
        let mut rows: Vec<(String, Style)> = Vec::with_capacity(body_h);
        if following && view.game_active {
            rows.push((format!("> {}", view.input), Style::Input));
        }
        for (i, line) in lines.iter().enumerate().take(end).rev() {
            if rows.len() >= body_h {
                break;
            }
            let is_last = following && i + 1 == lines.len() && !view.game_active;
            let (text, style) = if is_last {
                (format!("{}{}", line.text, view.input), Style::Input)
            } else {
                display_line(line)
            };
            for piece in wrap(&text, width).into_iter().rev() {
                rows.push((piece, style));
            }
        }
        if lines.is_empty() && !view.game_active {
            rows.push((view.input.to_string(), Style::Input));
        }

        rows.truncate(body_h);
        let top = 1 + body_h - rows.len();
        let mut cursor_at = None;
        for (k, (text, style)) in rows.iter().rev().enumerate() {
            let y = top + k;
            let end_x = self.put_styled(y, text, *style);
            if k + 1 == rows.len() && *style == Style::Input {
                cursor_at = Some((end_x, y));
            }
        }

        if let Some((x, y)) = cursor_at {
            let x = x.min(width.saturating_sub(1));
            self.front.set(x, y, Cell::from_char(' ', Color::Black, PROMPT_FG));
        }
    }

    fn put_styled(&mut self, y: usize, text: &str, style: Style) -> usize {
        match style {
            Style::Plain => self.front.put_str(0, y, text, TEXT_FG, Color::Reset),
            Style::Heading => self.front.put_str(0, y, text, HEADING_FG, Color::Reset),
            Style::Bullet => self.front.put_str(0, y, text, BULLET_FG, Color::Reset),
            Style::Input => self.front.put_str(0, y, text, PROMPT_FG, Color::Reset),
            Style::Board => {
                let mut x = 0;
                for ch in text.chars() {
                    let fg = match ch {
                        'O' | 'o' => PROMPT_FG,
                        '*' => FOOD_FG,
                        _ => FRAME_FG,
                    };
                    let mut buf = [0u8; 4];
                    x = self.front.put_str(x, y, ch.encode_utf8(&mut buf), fg, Color::Reset);
                }
                x
            }
        }
    }

    fn compose_matrix(&mut self, rain: &MatrixRain) {
        let body_h = self.term_h - 2;
        for y in 0..body_h {
            for x in 0..self.front.width {
                let Some(g) = rain.glyph(x, y) else { continue };
                let fg = if g.bright || g.age == 0 {
                    Color::White
                } else {
                    let fade = 255 - (g.age as u32 * 200 / TRAIL as u32) as u8;
                    Color::Rgb { r: 0, g: fade, b: 0 }
                };
                self.front.set(x, y + 1, Cell::from_char(g.ch, fg, Color::Black));
            }
        }
    }

    fn compose_status(&mut self, view: &View<'_>) {
        let y = self.term_h - 1;
        if !view.message.is_empty() {
            self.front.fill_row(y, MSG_BG);
            self.front.put_str(0, y, &format!(" ◈ {} ", view.message), Color::Black, MSG_BG);
        } else {
            let help = if view.game_active {
                " W/A/S/D:Steer  exit⏎:Quit game  PgUp/PgDn:Scroll  Ctrl+C:Quit"
            } else {
                " Enter:Run  ↑↓:History  PgUp/PgDn:Scroll  Esc:Clear line  Ctrl+C:Quit"
            };
            self.front.put_str(0, y, help, Color::DarkGrey, Color::Reset);
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Style {
    Plain,
    Heading,
    Bullet,
    Input,
    Board,
}

/// Pick a style for a transcript line. Markdown loses its `**` markers.
fn display_line(line: &Line) -> (String, Style) {
    let text = &line.text;
    if text.starts_with('║') || text.starts_with('╔') || text.starts_with('╚') {
        return (text.clone(), Style::Board);
    }
    if !line.markdown {
        return (text.clone(), Style::Plain);
    }
    let stripped = text.replace("**", "");
    if stripped.starts_with('#') {
        (stripped.trim_start_matches('#').trim_start().to_string(), Style::Heading)
    } else if stripped.starts_with("- ") {
        (format!("• {}", &stripped[2..]), Style::Bullet)
    } else {
        (stripped, Style::Plain)
    }
}

/// Split `text` into rows of at most `width` columns. Always at least one row.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = vec![String::new()];
    if width == 0 {
        return rows;
    }
    let mut col = 0;
    for ch in text.chars() {
        let w = if is_wide(ch) { 2 } else { 1 };
        if col + w > width {
            rows.push(String::new());
            col = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        col += w;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, markdown: bool) -> Line {
        Line { text: text.to_string(), markdown }
    }

    #[test]
    fn widths() {
        assert!(!is_wide('a'));
        assert!(!is_wide('ｱ'));
        assert!(!is_wide('╔'));
        assert!(is_wide('😉'));
        assert!(is_wide('漢'));
        assert_eq!(str_width("ok😉"), 4);
    }

    #[test]
    fn wrap_by_columns() {
        assert_eq!(wrap("", 4), vec![String::new()]);
        assert_eq!(wrap("abcdefghi", 4), vec!["abcd", "efgh", "i"]);
        assert_eq!(wrap("abc😉", 4), vec!["abc", "😉"]);
    }

    #[test]
    fn markdown_styles() {
        assert_eq!(display_line(&line("# About", true)), ("About".to_string(), Style::Heading));
        assert_eq!(
            display_line(&line("- **snake**: fun", true)),
            ("• snake: fun".to_string(), Style::Bullet)
        );
        assert_eq!(display_line(&line("# not md", false)).1, Style::Plain);
        assert_eq!(display_line(&line("║O*║", false)).1, Style::Board);
    }

    #[test]
    fn put_str_marks_wide_continuation() {
        let mut fb = FrameBuffer::new(4, 1);
        let end = fb.put_str(0, 0, "a😉b", Color::White, Color::Reset);
        assert_eq!(end, 4);
        assert!(fb.get(1, 0).wide);
        assert!(fb.get(2, 0).cont);
        assert_eq!(fb.get(3, 0).as_str(), "b");
        // no room for a wide char in the last column
        let mut fb = FrameBuffer::new(2, 1);
        assert_eq!(fb.put_str(0, 0, "a😉", Color::White, Color::Reset), 1);
    }
}
