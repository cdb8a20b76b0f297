/// Scrollback of everything printed to the terminal panel.
///
/// Each `print` starts a new line; embedded `\n` start further lines.
/// The oldest lines are dropped once `MAX_LINES` is reached.

use std::collections::VecDeque;

use crate::host::Output;

const MAX_LINES: usize = 2000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub markdown: bool,
}

#[derive(Debug, Default)]
pub struct Transcript {
    lines: VecDeque<Line>,
    /// Lines scrolled up from the bottom. 0 = follow output.
    scroll: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript { lines: VecDeque::with_capacity(256), scroll: 0 }
    }

    pub fn lines(&self) -> &VecDeque<Line> {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Append typed input to the current (prompt) line.
    pub fn echo(&mut self, input: &str) {
        match self.lines.back_mut() {
            Some(line) => line.text.push_str(input),
            None => self.push(input, false),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.lines.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = self.lines.len().saturating_sub(1);
    }

    fn push(&mut self, text: &str, markdown: bool) {
        if self.lines.len() == MAX_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(Line { text: text.to_string(), markdown });
    }
}

impl Output for Transcript {
    fn print(&mut self, text: &str, markdown: bool) {
        for piece in text.split('\n') {
            self.push(piece, markdown);
        }
        // New output snaps the view back to the bottom.
        self.scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(t: &Transcript) -> Vec<&str> {
        t.lines().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn print_splits_lines() {
        let mut t = Transcript::new();
        t.print("\nfoo:command not found", false);
        t.print("\nuser:~$", false);
        assert_eq!(texts(&t), vec!["", "foo:command not found", "", "user:~$"]);
    }

    #[test]
    fn echo_joins_prompt() {
        let mut t = Transcript::new();
        t.print("\nuser:~$", false);
        t.echo("ls");
        assert_eq!(texts(&t).last().copied(), Some("user:~$ls"));
    }

    #[test]
    fn box_drawing_verbatim() {
        let mut t = Transcript::new();
        t.print("╔══╗\n║O*║\n╚══╝", false);
        assert_eq!(texts(&t), vec!["╔══╗", "║O*║", "╚══╝"]);
    }

    #[test]
    fn capped_and_scrollable() {
        let mut t = Transcript::new();
        for i in 0..MAX_LINES + 10 {
            t.print(&i.to_string(), false);
        }
        assert_eq!(t.lines().len(), MAX_LINES);
        assert_eq!(t.lines()[0].text, "10");
        t.scroll_up(5);
        assert_eq!(t.scroll(), 5);
        t.scroll_down(9);
        assert_eq!(t.scroll(), 0);
        t.scroll_to_top();
        assert_eq!(t.scroll(), MAX_LINES - 1);
        t.print("x", false);
        assert_eq!(t.scroll(), 0);
    }
}
