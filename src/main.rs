/// Entry point and frame loop.

mod art;
mod config;
mod domain;
mod fs;
mod host;
mod shell;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use fs::VirtualFs;
use host::Sfx;
use shell::apps::StdApps;
use shell::Dispatcher;
use sim::event::GameEvent;
use ui::input::{EditAction, InputState, KeyAction, LineEditor};
use ui::page::Page;
use ui::renderer::{Renderer, View};
use ui::sound::SoundEngine;
use ui::transcript::Transcript;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

type Shell = Dispatcher<VirtualFs, StdApps>;

fn main() {
    let (config, config_err) = match AppConfig::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Err(e) = init_tracing(&config) {
        eprintln!("Logging disabled: {e}");
    }
    if let Some(e) = config_err {
        warn!("{e}; using default settings");
    }
    setup_panic_handler();
    info!(user = %config.shell.user, home = %config.shell.home, "termfolio starting");

    let mut shell = Dispatcher::new(
        VirtualFs::portfolio(&config.shell.home),
        StdApps,
        config.shell.clone(),
        config.game.clone(),
        SmallRng::from_os_rng(),
    );

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let mut page = Page::new(SoundEngine::new(), SmallRng::from_os_rng());

    let result = run_loop(&mut shell, &mut page, &mut renderer);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        error!("frame loop failed: {e}");
        eprintln!("Error: {e}");
    }

    info!("termfolio exiting");
    println!("Bye!");
}

fn run_loop(
    shell: &mut Shell,
    page: &mut Page,
    renderer: &mut Renderer,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut editor = LineEditor::new();
    let mut transcript = Transcript::new();
    shell.greet(&mut transcript);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }

        let now = Instant::now();
        let (cols, rows) = renderer.body_size();
        let page_step = (rows / 2).max(1);

        for key in &kb.events {
            let playing = shell.game_active();
            match editor.route(key, playing) {
                KeyAction::Steer(dir) => shell.key_down(dir),
                KeyAction::Edit(EditAction::Submit(line)) => {
                    if !playing {
                        transcript.echo(&line);
                    }
                    shell.submit(&line, now, &mut transcript, page);
                    page.apply(now, &mut transcript);
                }
                KeyAction::Edit(EditAction::ScrollUp) => transcript.scroll_up(page_step),
                KeyAction::Edit(EditAction::ScrollDown) => transcript.scroll_down(page_step),
                KeyAction::Edit(EditAction::None) => {}
            }
        }

        let events = shell.poll(now, &mut transcript);
        process_sound_events(page, &events);

        let raining = page.update(now, cols, rows);
        let header = format!("termfolio  {}", shell.path());
        renderer.render(&View {
            header: &header,
            transcript: &transcript,
            input: editor.buffer(),
            game_active: shell.game_active(),
            message: page.message(),
            matrix: raining.then_some(&page.matrix),
        })?;

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn process_sound_events(page: &Page, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::FoodEaten { x, y, score } => {
                debug!(x, y, score, "food eaten");
                page.play(Sfx::Eat);
            }
            e if e.is_terminal() => page.play(Sfx::GameOver),
            _ => {}
        }
    }
}

fn init_tracing(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = std::sync::Arc::new(std::fs::File::create(&config.log_file)?);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .try_init()
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Restore the terminal before the default panic message is printed.
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        );
        error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}
