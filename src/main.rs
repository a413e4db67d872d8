//! Ping Pong entry point
//!
//! Web: draws on `#canvas`, reads the keyboard and the Start/Stop/Restart
//! buttons, ticks on a `setInterval` timer while the match runs.
//! Native: plays in the terminal with the same key bindings.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use ping_pong::input::Command;
    use ping_pong::platform::web::{Interval, Listener};
    use ping_pong::renderer::{CanvasSurface, draw_frame};
    use ping_pong::sim::GameEvent;
    use ping_pong::{GameEngine, Settings, Snapshot};

    thread_local! {
        /// The running session; kept alive for the lifetime of the page
        static SESSION: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Game instance holding all state
    struct Game {
        engine: GameEngine,
        settings: Settings,
        surface: CanvasSurface,
        document: Document,
        /// Tick timer, active only while the engine runs
        ticker: Option<Interval>,
        /// Keyboard and button listeners
        listeners: Vec<Listener>,
        /// Page teardown listener (outlives `listeners`)
        _unload: Option<Listener>,
    }

    impl Game {
        /// Draw the field and refresh the HUD
        fn render(&mut self) {
            let snapshot = self.engine.snapshot();
            draw_frame(&snapshot, &mut self.surface);
            self.update_hud(&snapshot);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, snapshot: &Snapshot) {
            use ping_pong::sim::Player;

            if let Some(el) = self.document.get_element_by_id("player1-score") {
                el.set_text_content(Some(&snapshot.score_line(Player::Player1)));
            }
            if let Some(el) = self.document.get_element_by_id("player2-score") {
                el.set_text_content(Some(&snapshot.score_line(Player::Player2)));
            }
            if let Some(el) = self.document.get_element_by_id("start-btn") {
                el.set_text_content(Some(snapshot.start_label()));
            }

            // Show/hide game over
            if let Some(el) = self.document.get_element_by_id("game-over") {
                match snapshot.winner() {
                    Some(winner) => {
                        let _ = el.set_attribute("class", "game-over");
                        if let Some(text) = self.document.get_element_by_id("winner-text") {
                            text.set_text_content(Some(winner.banner()));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "game-over hidden");
                    }
                }
            }
        }

        fn log_events(&mut self) {
            for event in self.engine.drain_events() {
                match event {
                    GameEvent::RoundWon {
                        winner,
                        player1_score,
                        player2_score,
                    } => log::info!(
                        "{} takes the round ({} - {})",
                        winner.label(),
                        player1_score,
                        player2_score
                    ),
                    GameEvent::MatchOver(winner) => log::info!("{}", winner.banner()),
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }

    /// Start the timer when the engine runs, cancel it when it doesn't
    fn sync_timer(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        let running = g.engine.is_running();
        let active = g.ticker.as_ref().is_some_and(Interval::is_active);

        if running && !active {
            let weak = Rc::downgrade(game);
            match Interval::start(g.settings.tick_interval_ms, move || on_tick(&weak)) {
                // Replacing drops the previous, already cancelled, timer
                Ok(interval) => g.ticker = Some(interval),
                Err(e) => log::error!("Failed to start timer: {:?}", e),
            }
        } else if !running {
            if let Some(ticker) = g.ticker.as_mut() {
                ticker.cancel();
            }
        }
    }

    fn on_tick(game: &Weak<RefCell<Game>>) {
        let Some(game) = game.upgrade() else {
            return;
        };
        let mut g = game.borrow_mut();
        g.engine.tick();
        g.log_events();
        g.render();

        // Game over: no more ticks until a restart
        if !g.engine.is_running() {
            if let Some(ticker) = g.ticker.as_mut() {
                ticker.cancel();
            }
        }
    }

    fn handle_command(game: &Weak<RefCell<Game>>, command: Command) {
        let Some(game) = game.upgrade() else {
            return;
        };
        {
            let mut g = game.borrow_mut();
            g.engine.apply(command);
            g.render();
        }
        sync_timer(&game);
    }

    fn setup_keyboard(game: &Rc<RefCell<Game>>, window: &EventTarget) -> Result<Listener, JsValue> {
        let weak = Rc::downgrade(game);
        Listener::new(window, "keydown", move |event: KeyboardEvent| {
            let Some(game) = weak.upgrade() else {
                return;
            };
            let command = game.borrow().settings.keys.command_for(&event.key());
            if let Some(command) = command {
                // Keep arrow keys and space from scrolling the page
                event.prevent_default();
                handle_command(&weak, command);
            }
        })
    }

    fn setup_button(
        game: &Rc<RefCell<Game>>,
        document: &Document,
        id: &str,
        command: Command,
    ) -> Result<Option<Listener>, JsValue> {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} button", id);
            return Ok(None);
        };
        let weak = Rc::downgrade(game);
        Listener::new(&button, "click", move |_event: MouseEvent| {
            handle_command(&weak, command);
        })
        .map(Some)
    }

    /// Release timer and input listeners when the page goes away
    fn shutdown(game: &Weak<RefCell<Game>>) {
        let Some(game) = game.upgrade() else {
            return;
        };
        let mut g = game.borrow_mut();
        g.ticker = None;
        let listeners = std::mem::take(&mut g.listeners);
        drop(listeners);
        log::info!("Session closed");
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Ping Pong starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game {
            engine: GameEngine::new(settings.rules()),
            settings,
            surface: CanvasSurface::new(&canvas)?,
            document: document.clone(),
            ticker: None,
            listeners: Vec::new(),
            _unload: None,
        }));

        let mut listeners = vec![setup_keyboard(&game, &window)?];
        for (id, command) in [
            ("start-btn", Command::Start),
            ("stop-btn", Command::Stop),
            ("restart-btn", Command::Restart),
        ] {
            listeners.extend(setup_button(&game, &document, id, command)?);
        }

        let weak = Rc::downgrade(&game);
        let unload = Listener::new(&window, "pagehide", move |_event: web_sys::Event| {
            shutdown(&weak);
        })?;

        {
            let mut g = game.borrow_mut();
            g.listeners = listeners;
            g._unload = Some(unload);
            g.render();
        }

        SESSION.with(|session| *session.borrow_mut() = Some(game));

        log::info!("Ping Pong ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use clap::Parser;
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

    use ping_pong::platform::terminal::{TerminalGuard, key_name};
    use ping_pong::renderer::{TextSurface, draw_frame};
    use ping_pong::sim::{GameEvent, Player};
    use ping_pong::{GameEngine, Settings, Snapshot, TickClock};

    /// How long to wait for input while no timer is due
    const IDLE_POLL: Duration = Duration::from_millis(250);

    /// Two-player Pong in the terminal.
    /// Player 1: w/s. Player 2: arrow keys. Enter starts, p stops, r restarts, q quits.
    #[derive(Parser)]
    #[command(version, about)]
    struct Cli {
        /// Settings JSON file (defaults to $PING_PONG_SETTINGS)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Milliseconds between ticks
        #[arg(long)]
        tick_ms: Option<u32>,
        /// Rounds per match
        #[arg(long)]
        rounds: Option<u32>,
        /// Paddle travel per key press
        #[arg(long)]
        paddle_step: Option<f32>,
        /// Field width in terminal columns
        #[arg(long, default_value_t = 80)]
        cols: usize,
        /// Field height in terminal rows
        #[arg(long, default_value_t = 20)]
        rows: usize,
    }

    impl Cli {
        /// Settings file, then command-line overrides
        fn resolve_settings(&self) -> Settings {
            let mut settings = match &self.settings {
                Some(path) => Settings::load_from_path(path),
                None => Settings::load(),
            };
            if let Some(tick_ms) = self.tick_ms {
                settings.tick_interval_ms = tick_ms;
            }
            if let Some(rounds) = self.rounds {
                settings.rounds_per_match = rounds;
            }
            if let Some(step) = self.paddle_step {
                settings.paddle_step = step;
            }
            settings.sanitized()
        }
    }

    fn status_lines(snapshot: &Snapshot, rounds_per_match: u32) -> Vec<String> {
        let mut lines = vec![format!(
            "{}    {}    Round {}/{}",
            snapshot.score_line(Player::Player1),
            snapshot.score_line(Player::Player2),
            snapshot.rounds_played,
            rounds_per_match
        )];
        match snapshot.winner() {
            Some(winner) => lines.push(format!("Game Over - {}", winner.banner())),
            None if snapshot.is_running() => lines.push(String::new()),
            None => lines.push("Paused".to_owned()),
        }
        lines.push(format!(
            "[Enter] {}  [p] Stop  [r] Restart  [q] Quit    P1: w/s  P2: Up/Down",
            snapshot.start_label()
        ));
        lines
    }

    fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Esc | KeyCode::Char('q'))
            || (modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c'))
    }

    pub fn run() -> io::Result<()> {
        let cli = Cli::parse();
        let settings = cli.resolve_settings();
        log::info!(
            "Ping Pong (native) starting: {} ms ticks, {} rounds",
            settings.tick_interval_ms,
            settings.rounds_per_match
        );

        let mut engine = GameEngine::new(settings.rules());
        let mut clock = TickClock::new(settings.tick_interval());
        let mut surface = TextSurface::new(cli.cols, cli.rows);

        let mut terminal = TerminalGuard::enter()?;
        let mut redraw = true;
        let mut last = Instant::now();

        loop {
            if redraw {
                let snapshot = engine.snapshot();
                draw_frame(&snapshot, &mut surface);
                terminal.present(&surface, &status_lines(&snapshot, settings.rounds_per_match))?;
                redraw = false;
            }

            let timeout = if engine.is_running() {
                clock.until_next_tick()
            } else {
                IDLE_POLL
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if is_quit(key.code, key.modifiers) {
                        break;
                    }
                    if let Some(command) =
                        key_name(key.code).and_then(|name| settings.keys.command_for(&name))
                    {
                        engine.apply(command);
                        redraw = true;
                    }
                }
            }

            let now = Instant::now();
            if clock.advance(&mut engine, now - last) > 0 {
                redraw = true;
            }
            last = now;

            for event in engine.drain_events() {
                match event {
                    GameEvent::MatchOver(winner) => log::info!("{}", winner.banner()),
                    other => log::debug!("{:?}", other),
                }
            }
        }

        drop(terminal);
        let snapshot = engine.snapshot();
        println!(
            "{}  {}",
            snapshot.score_line(Player::Player1),
            snapshot.score_line(Player::Player2)
        );
        if let Some(winner) = snapshot.winner() {
            println!("{}", winner.banner());
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
