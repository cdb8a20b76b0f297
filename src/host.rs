/// Collaborators the shell and the game call into.
///
/// Everything here is fire-and-forget: none of these calls can fail from
/// the caller's point of view.

use std::time::Duration;

/// The only channel for user-visible text.
/// Multi-line strings and box-drawing characters pass through verbatim.
pub trait Output {
    fn print(&mut self, text: &str, markdown: bool);
}

/// Transient full-screen effects.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Effect {
    MatrixRain,
}

/// Short sound cues.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sfx {
    Eat,
    GameOver,
    Hack,
    Matrix,
}

/// Side channels of the page hosting the terminal.
pub trait Host {
    /// Scroll the outer page back to the top.
    fn scroll_to_top(&mut self);
    /// Trigger the external video player with a named clip.
    fn play_video(&mut self, clip: &str);
    /// Run `effect` for `duration`, then remove it.
    fn start_effect(&mut self, effect: Effect, duration: Duration);
    fn play_sound(&mut self, sfx: Sfx);
    /// Wipe the output panel.
    fn clear_screen(&mut self);
}
