/// The page hosting the terminal panel: the `Host` side channels.
///
/// Requests that touch the transcript (clear, scroll to top) or need the
/// frame clock (effects) are queued during a dispatch and applied by the
/// main loop right after it.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::host::{Effect, Host, Sfx};
use crate::sim::schedule::Timeout;
use super::matrix::MatrixRain;
use super::sound::SoundEngine;
use super::transcript::Transcript;

const MESSAGE_TIME: Duration = Duration::from_secs(3);

#[derive(Debug, Default, PartialEq, Eq)]
struct Requests {
    clear: bool,
    scroll_top: bool,
    effect: Option<(Effect, Duration)>,
}

pub struct Page {
    sound: Option<SoundEngine>,
    pub matrix: MatrixRain,
    message: String,
    message_timeout: Timeout,
    pending: Requests,
}

impl Page {
    pub fn new(sound: Option<SoundEngine>, rng: SmallRng) -> Self {
        Page {
            sound,
            matrix: MatrixRain::new(rng),
            message: String::new(),
            message_timeout: Timeout::default(),
            pending: Requests::default(),
        }
    }

    /// Status bar text, empty when there is none.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn play(&self, sfx: Sfx) {
        if let Some(s) = &self.sound {
            s.play_sfx(sfx);
        }
    }

    /// Apply everything queued since the last call.
    pub fn apply(&mut self, now: Instant, transcript: &mut Transcript) {
        let req = std::mem::take(&mut self.pending);
        if req.clear {
            transcript.clear();
        }
        if req.scroll_top {
            transcript.scroll_to_top();
        }
        if let Some((Effect::MatrixRain, duration)) = req.effect {
            self.matrix.start(now, duration);
        }
    }

    /// Per-frame timers. Returns true while the matrix overlay is up.
    pub fn update(&mut self, now: Instant, cols: usize, rows: usize) -> bool {
        if self.message_timeout.expired(now) {
            self.message.clear();
        }
        self.matrix.update(now, cols, rows)
    }

    fn show_message(&mut self, text: String) {
        self.message = text;
        self.message_timeout.arm(Instant::now(), MESSAGE_TIME);
    }
}

impl Host for Page {
    fn scroll_to_top(&mut self) {
        self.pending.scroll_top = true;
    }

    fn play_video(&mut self, clip: &str) {
        info!(clip, "video requested");
        self.show_message(format!("▶ playing: {clip}"));
    }

    fn start_effect(&mut self, effect: Effect, duration: Duration) {
        debug!(?effect, ?duration, "effect");
        self.pending.effect = Some((effect, duration));
    }

    fn play_sound(&mut self, sfx: Sfx) {
        self.play(sfx);
    }

    fn clear_screen(&mut self) {
        self.pending.clear = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Output;
    use rand::SeedableRng;

    fn page() -> Page {
        Page::new(None, SmallRng::seed_from_u64(1))
    }

    #[test]
    fn clear_and_scroll_wait_for_apply() {
        let mut p = page();
        let mut t = Transcript::new();
        t.print("one\ntwo\nthree", false);

        p.scroll_to_top();
        assert_eq!(t.scroll(), 0);
        p.apply(Instant::now(), &mut t);
        assert_eq!(t.scroll(), 2);

        p.clear_screen();
        assert_eq!(t.lines().len(), 3);
        p.apply(Instant::now(), &mut t);
        assert!(t.lines().is_empty());

        // requests are consumed
        t.print("x", false);
        p.apply(Instant::now(), &mut t);
        assert_eq!(t.lines().len(), 1);
    }

    #[test]
    fn matrix_starts_on_apply_and_ends_on_time() {
        let t0 = Instant::now();
        let mut p = page();
        let mut t = Transcript::new();
        p.start_effect(Effect::MatrixRain, Duration::from_secs(10));
        assert!(!p.update(t0, 20, 10));
        p.apply(t0, &mut t);
        assert!(p.update(t0 + Duration::from_secs(5), 20, 10));
        assert!(!p.update(t0 + Duration::from_secs(10), 20, 10));
    }

    #[test]
    fn video_shows_a_message() {
        let mut p = page();
        p.play_video("hack");
        assert_eq!(p.message(), "▶ playing: hack");
        p.update(Instant::now() + MESSAGE_TIME, 1, 1);
        assert_eq!(p.message(), "");
    }

    #[test]
    fn silent_without_sound() {
        let mut p = page();
        p.play_sound(Sfx::Eat);
        p.play(Sfx::GameOver);
    }
}
