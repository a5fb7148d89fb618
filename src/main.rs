mod audio;
mod audio_api;
mod canvas;
mod engines;
mod pack;
mod shared;
mod tui;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use canvas::viewmodel::CanvasViewModel;
use engines::{LogAnalytics, TerminalHaptics};
use pack::interaction::TriggerInteraction;
use pack::loader::SoundPackLoader;
use pack::repository::SoundRepository;
use tui::input::UiEvent;

const DEFAULT_PACK_DIR: &str = "assets/soundpacks/synth-basics-v1";
const PACK_FILE: &str = "soundpack.json";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    env_logger::init();

    terminal::enable_raw_mode()?;
    // Mouse capture so taps land on the canvas. Falls back gracefully if
    // the terminal doesn't support it.
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);
    let _guard = RawModeGuard; // auto drops when out of scope

    let output = audio::start_audio()?;
    let engine = audio::CpalAudioEngine::new(output);

    let pack_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PACK_DIR));

    let mut repo = SoundRepository::new(SoundPackLoader::from_fs());
    {
        let pack = repo.load_sound_pack(&pack_dir.join(PACK_FILE));
        log::info!(
            "pack {} ({}) v{}: {} sounds",
            pack.pack_id,
            pack.pack_name,
            pack.version,
            pack.sounds.len()
        );
    }

    let mut vm = CanvasViewModel::new(
        TriggerInteraction::new(repo),
        Box::new(engine),
        Box::new(TerminalHaptics::new()),
        Box::new(LogAnalytics),
    );
    vm.load_sounds(&pack_dir);

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = Duration::from_millis(16); // ~60fps
    let start = Instant::now();

    loop {
        let size = term.size()?;
        term.draw(|frame| {
            tui::view::render(frame, frame.area(), vm.state());
        })?;

        let events = tui::input::poll_input(tick_rate, (size.width, size.height))?;
        for event in events {
            match event {
                UiEvent::Quit => {
                    vm.release();
                    drop(term);
                    return Ok(());
                }
                UiEvent::Intent(intent) => vm.handle_intent(intent, start.elapsed()),
            }
        }

        // forward queued PlaySound effects to the engine, then advance
        // the animation clock
        vm.pump_side_effects();
        vm.update_animations(start.elapsed());
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = terminal::disable_raw_mode();
    }
}
