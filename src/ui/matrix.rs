/// Matrix rain overlay.
///
/// One drop per terminal column falls a row per step, leaving a fading
/// trail of half-width katakana and digits. The overlay removes itself
/// when its timeout expires.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::Rng;

use crate::sim::schedule::{Interval, Timeout};

const GLYPHS: &[char] = &[
    'ｦ', 'ｱ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾂ', 'ﾃ', 'ﾅ', 'ﾆ',
    'ﾇ', 'ﾈ', 'ﾊ', 'ﾋ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ', 'ﾕ', 'ﾗ', 'ﾘ', 'ﾜ', '0', '1', '2', '3',
    '4', '5', '6', '7', '8', '9',
];

const STEP: Duration = Duration::from_millis(50);
/// Steps a glyph stays visible after the head passes.
pub const TRAIL: u8 = 12;
/// Start drops up to this many rows above the screen.
const SPREAD: i32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Steps since it was drawn. 0 = drop head.
    pub age: u8,
    pub bright: bool,
}

pub struct MatrixRain {
    rng: SmallRng,
    cols: usize,
    rows: usize,
    drops: Vec<i32>,
    cells: Vec<Option<Glyph>>,
    step: Interval,
    timeout: Timeout,
}

impl MatrixRain {
    pub fn new(rng: SmallRng) -> Self {
        MatrixRain {
            rng,
            cols: 0,
            rows: 0,
            drops: Vec::new(),
            cells: Vec::new(),
            step: Interval::new(STEP),
            timeout: Timeout::default(),
        }
    }

    /// Start (or restart) the rain for `duration`.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.timeout.arm(now, duration);
        self.step.start(now);
        self.cells.iter_mut().for_each(|c| *c = None);
        self.scatter_drops();
    }

    pub fn is_running(&self) -> bool {
        self.timeout.is_armed()
    }

    pub fn stop(&mut self) {
        self.timeout = Timeout::default();
        self.step.cancel();
        self.cells.clear();
        self.drops.clear();
        self.cols = 0;
        self.rows = 0;
    }

    /// Advance the animation. Returns true while the overlay should be drawn.
    pub fn update(&mut self, now: Instant, cols: usize, rows: usize) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.timeout.expired(now) {
            self.stop();
            return false;
        }
        if cols != self.cols || rows != self.rows {
            self.resize(cols, rows);
        }
        if self.step.poll(now) {
            self.advance();
        }
        true
    }

    pub fn glyph(&self, x: usize, y: usize) -> Option<Glyph> {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x]
        } else {
            None
        }
    }

    fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; cols * rows];
        self.scatter_drops();
    }

    fn scatter_drops(&mut self) {
        let cols = self.cols;
        self.drops = (0..cols).map(|_| -self.rng.random_range(0..SPREAD)).collect();
    }

    fn advance(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.age = cell.age.saturating_add(1);
        }
        for cell in self.cells.iter_mut() {
            if matches!(cell, Some(g) if g.age > TRAIL) {
                *cell = None;
            }
        }

        let rows = self.rows as i32;
        for x in 0..self.cols {
            let y = self.drops[x];
            if (0..rows).contains(&y) {
                let ch = GLYPHS[self.rng.random_range(0..GLYPHS.len())];
                let bright = self.rng.random_bool(0.025);
                self.cells[y as usize * self.cols + x] = Some(Glyph { ch, age: 0, bright });
            }
            self.drops[x] += 1;
            // Off the bottom: occasionally restart at the top.
            if self.drops[x] >= rows && self.rng.random_bool(0.025) {
                self.drops[x] = 0;
            }
        }
    }
}
