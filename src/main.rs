//! Torus Snake entry point
//!
//! Headless presentation loop: paces logical ticks with a fixed timestep,
//! lets the autopilot steer, and prints each new state to stdout.

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::io::Write;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    use torus_snake::consts::MAX_SUBSTEPS;
    use torus_snake::sim::{GameState, TickInput, TickResult, tick};
    use torus_snake::{Settings, SimError, view};

    /// Clear screen and home the cursor
    const CLEAR: &str = "\x1b[2J\x1b[H";

    /// Game instance holding all state
    pub struct Game {
        state: GameState,
        input: TickInput,
        accumulator: f64,
        tick_dt: f64,
        max_ticks: u64,
        json: bool,
        last: Option<TickResult>,
    }

    impl Game {
        pub fn new(settings: Settings) -> Result<Self, SimError> {
            let input = TickInput {
                idle_mode: settings.autopilot,
                ..Default::default()
            };
            Ok(Self {
                tick_dt: settings.tick_dt(),
                max_ticks: settings.max_ticks,
                json: settings.json,
                state: GameState::new(settings)?,
                input,
                accumulator: 0.0,
                last: None,
            })
        }

        /// Run simulation ticks for `dt` seconds of wall time
        fn update(&mut self, dt: f64) {
            let dt = dt.min(0.25);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= self.tick_dt && substeps < MAX_SUBSTEPS {
                let result = tick(&mut self.state, &self.input);
                self.accumulator -= self.tick_dt;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.directive = None;
                self.input.pause = false;

                self.last = Some(result);
                if !self.state.is_alive() {
                    break;
                }
            }
        }

        /// Print the latest snapshot, if a tick produced one
        fn render(&mut self, out: &mut impl Write) -> std::io::Result<()> {
            let Some(result) = self.last.take() else {
                return Ok(());
            };
            if self.json {
                let line = serde_json::to_string(&result).map_err(std::io::Error::other)?;
                writeln!(out, "{line}")?;
            } else {
                write!(out, "{CLEAR}{}", view::render_frame(&self.state.grid, &result))?;
                writeln!(out, "{}", view::status_line(&result))?;
            }
            out.flush()
        }

        fn finished(&self) -> bool {
            let capped = self.max_ticks > 0 && self.state.time_ticks >= self.max_ticks;
            !self.state.is_alive() || capped
        }

        /// Frame loop: sleep to the frame rate, tick at the tick rate
        pub fn run(&mut self, frame_dt: f64) -> std::io::Result<()> {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let frame = Duration::from_secs_f64(frame_dt);
            let mut last_time = Instant::now();

            while !self.finished() {
                let now = Instant::now();
                self.update(now.duration_since(last_time).as_secs_f64());
                last_time = now;
                self.render(&mut out)?;
                sleep(frame);
            }

            let summary = self.state.snapshot();
            log::info!(
                "Finished after {} ticks with score {} ({:?})",
                summary.tick,
                summary.score,
                summary.phase
            );
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use torus_snake::Settings;

    env_logger::init();
    log::info!("Torus Snake (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frame_dt = settings.frame_dt();

    let mut game = match native_game::Game::new(settings) {
        Ok(game) => game,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(2);
        }
    };
    if let Err(err) = game.run(frame_dt) {
        log::error!("Output error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web front end; the library is the product on wasm
}
