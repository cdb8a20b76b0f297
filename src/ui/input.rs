/// Keyboard input: event drain and the shell's line editor.
///
/// `InputState` pulls every pending key event without blocking, once per
/// frame. `LineEditor` turns key presses into an input line with a
/// small history.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::grid::Direction;

pub struct InputState {
    /// Key presses (and repeats) collected during the last drain.
    pub events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events.
    /// Call this once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    self.events.push(key);
                }
                _ => {}
            }
        }
    }

    /// Check if any event this frame has Ctrl+C
    pub fn ctrl_c_pressed(&self) -> bool {
        self.events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}

// ── Key mapping ──

/// Map a key to a snake direction: arrows, or W/A/S/D in either case.
pub fn direction_of(key: &KeyEvent) -> Option<Direction> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Char(c) => Direction::from_char(c),
        _ => None,
    }
}

/// What a key did to the line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    None,
    Submit(String),
    ScrollUp,
    ScrollDown,
}

/// Where a key went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// A direction key while a game runs. The line never sees it.
    Steer(Direction),
    Edit(EditAction),
}

#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
    history: Vec<String>,
    /// Position while browsing history; `None` = editing a fresh line.
    cursor: Option<usize>,
}

impl LineEditor {
    pub fn new() -> Self {
        LineEditor::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Route one key. While `playing`, direction keys belong to the game
    /// and everything else edits the line.
    pub fn route(&mut self, key: &KeyEvent, playing: bool) -> KeyAction {
        if playing {
            if let Some(dir) = direction_of(key) {
                return KeyAction::Steer(dir);
            }
        }
        KeyAction::Edit(self.handle(key, !playing))
    }

    /// Apply one key. `browse` enables Up/Down history (off while a game
    /// owns the arrow keys).
    pub fn handle(&mut self, key: &KeyEvent, browse: bool) -> EditAction {
        match key.code {
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.buffer);
                self.cursor = None;
                if !line.trim().is_empty() && self.history.last() != Some(&line) {
                    self.history.push(line.clone());
                }
                return EditAction::Submit(line);
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Esc => {
                self.buffer.clear();
                self.cursor = None;
            }
            KeyCode::Up if browse => self.history_prev(),
            KeyCode::Down if browse => self.history_next(),
            KeyCode::PageUp => return EditAction::ScrollUp,
            KeyCode::PageDown => return EditAction::ScrollDown,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(c);
            }
            _ => {}
        }
        EditAction::None
    }

    fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.cursor {
            Some(0) => 0,
            Some(i) => i - 1,
            None => self.history.len() - 1,
        };
        self.cursor = Some(idx);
        self.buffer = self.history[idx].clone();
    }

    fn history_next(&mut self) {
        match self.cursor {
            Some(i) if i + 1 < self.history.len() => {
                self.cursor = Some(i + 1);
                self.buffer = self.history[i + 1].clone();
            }
            Some(_) => {
                self.cursor = None;
                self.buffer.clear();
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(ed: &mut LineEditor, text: &str) -> EditAction {
        for c in text.chars() {
            ed.handle(&key(KeyCode::Char(c)), true);
        }
        ed.handle(&key(KeyCode::Enter), true)
    }

    #[test]
    fn typing_and_submit() {
        let mut ed = LineEditor::new();
        ed.handle(&key(KeyCode::Char('l')), true);
        ed.handle(&key(KeyCode::Char('x')), true);
        ed.handle(&key(KeyCode::Backspace), true);
        ed.handle(&key(KeyCode::Char('s')), true);
        assert_eq!(ed.buffer(), "ls");
        assert_eq!(ed.handle(&key(KeyCode::Enter), true), EditAction::Submit("ls".into()));
        assert_eq!(ed.buffer(), "");
    }

    #[test]
    fn history_walks_back_and_forth() {
        let mut ed = LineEditor::new();
        type_line(&mut ed, "help");
        type_line(&mut ed, "ls");
        ed.handle(&key(KeyCode::Up), true);
        assert_eq!(ed.buffer(), "ls");
        ed.handle(&key(KeyCode::Up), true);
        ed.handle(&key(KeyCode::Up), true);
        assert_eq!(ed.buffer(), "help");
        ed.handle(&key(KeyCode::Down), true);
        assert_eq!(ed.buffer(), "ls");
        ed.handle(&key(KeyCode::Down), true);
        assert_eq!(ed.buffer(), "");
    }

    #[test]
    fn arrows_do_not_browse_while_playing() {
        let mut ed = LineEditor::new();
        type_line(&mut ed, "snake");
        ed.handle(&key(KeyCode::Up), false);
        assert_eq!(ed.buffer(), "");
    }

    #[test]
    fn steering_keys_stay_out_of_the_line() {
        let mut ed = LineEditor::new();
        let mut steered = Vec::new();
        let mut submitted = None;
        for code in "sexit".chars().map(KeyCode::Char).chain([KeyCode::Up, KeyCode::Enter]) {
            match ed.route(&key(code), true) {
                KeyAction::Steer(d) => steered.push(d),
                KeyAction::Edit(EditAction::Submit(line)) => submitted = Some(line),
                KeyAction::Edit(_) => {}
            }
        }
        assert_eq!(steered, vec![Direction::Down, Direction::Up]);
        assert_eq!(submitted.as_deref(), Some("exit"));
    }

    #[test]
    fn wasd_types_when_idle() {
        let mut ed = LineEditor::new();
        for c in "ssh".chars() {
            assert_eq!(ed.route(&key(KeyCode::Char(c)), false), KeyAction::Edit(EditAction::None));
        }
        assert_eq!(ed.buffer(), "ssh");
    }

    #[test]
    fn directions() {
        assert_eq!(direction_of(&key(KeyCode::Char('w'))), Some(Direction::Up));
        assert_eq!(direction_of(&key(KeyCode::Char('D'))), Some(Direction::Right));
        assert_eq!(direction_of(&key(KeyCode::Left)), Some(Direction::Left));
        assert_eq!(direction_of(&key(KeyCode::Char('e'))), None);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(direction_of(&ctrl_s), None);
    }
}
