//! Pig Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop. The game
//! on a page is selected by URL query: `?game=whack` (plus
//! `&variant=hardcore`) or `?game=runner` (plus `&variant=flap`).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use pig_arcade::consts::*;
    use pig_arcade::renderer::CanvasRenderer;
    use pig_arcade::sim::{
        hole_at, runner_tick, whack_tick, GamePhase, RunnerInput, RunnerState, RunnerVariant,
        WhackState, WhackVariant,
    };
    use pig_arcade::Settings;

    /// Which game this page runs
    enum ActiveGame {
        Runner(RunnerState),
        Whack(WhackState),
    }

    impl ActiveGame {
        fn phase(&self) -> GamePhase {
            match self {
                ActiveGame::Runner(s) => s.phase,
                ActiveGame::Whack(s) => s.phase,
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        game: ActiveGame,
        renderer: CanvasRenderer,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        /// Runner inputs latched between ticks (one-shot)
        input: RunnerInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(game: ActiveGame, renderer: CanvasRenderer, settings: Settings) -> Self {
            Self {
                game,
                renderer,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: RunnerInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks at the fixed timestep
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                match &mut self.game {
                    ActiveGame::Runner(state) => {
                        let input = self.input.clone();
                        runner_tick(state, &input);
                    }
                    ActiveGame::Whack(state) => whack_tick(state),
                }
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.impulse = false;
                self.input.start = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            match &self.game {
                ActiveGame::Runner(state) => self.renderer.draw_runner(state, &self.settings),
                ActiveGame::Whack(state) => self.renderer.draw_whack(state, &self.settings),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            let (score, hearts, time_left) = match &self.game {
                ActiveGame::Runner(s) => (s.display_score(), s.display_lives(), None),
                ActiveGame::Whack(s) => (s.display_score(), s.display_health(), Some(s.time_left())),
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&score.to_string()));
            }

            // Health renders as repeated hearts, clamped at zero
            let heart_row = "❤️".repeat(hearts as usize);
            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&heart_row));
            }
            if let Some(el) = document.get_element_by_id("health") {
                el.set_text_content(Some(&heart_row));
            }

            if let Some(t) = time_left {
                if let Some(el) = document.get_element_by_id("time-left") {
                    el.set_text_content(Some(&t.to_string()));
                }
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            // Overlays track the phase
            let phase = self.game.phase();
            if let Some(el) = document.get_element_by_id("start-screen") {
                let _ = el.set_attribute(
                    "class",
                    if phase == GamePhase::Ready { "screen" } else { "screen hidden" },
                );
            }
            if let Some(el) = document.get_element_by_id("game-over-screen") {
                if phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "screen");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "screen hidden");
                }
            }
        }

        /// Resolve a pointer press at canvas coordinates
        fn pointer_press(&mut self, x: f32, y: f32) {
            match &mut self.game {
                ActiveGame::Runner(_) => {
                    // Click and jump are the same action; from the start
                    // screen it begins the session
                    self.input.impulse = true;
                }
                ActiveGame::Whack(state) => {
                    if state.phase == GamePhase::Ready {
                        state.start();
                    } else if let Some(idx) = hole_at(Vec2::new(x, y)) {
                        state.click(idx);
                    }
                }
            }
        }

        /// Space key: impulse for the runner, start for whack
        fn key_activate(&mut self) {
            match &mut self.game {
                ActiveGame::Runner(_) => self.input.impulse = true,
                ActiveGame::Whack(state) => {
                    if state.phase == GamePhase::Ready {
                        state.start();
                    }
                }
            }
        }

        /// Start/restart request from a button
        fn request_start(&mut self) {
            match &mut self.game {
                ActiveGame::Runner(_) => self.input.start = true,
                ActiveGame::Whack(state) => state.start(),
            }
        }
    }

    /// Build the selected game from the URL query string
    fn select_game(search: &str, seed: u64) -> ActiveGame {
        if search.contains("game=whack") {
            let variant = if search.contains("variant=hardcore") {
                WhackVariant::Hardcore
            } else {
                WhackVariant::Classic
            };
            ActiveGame::Whack(WhackState::new(seed, variant))
        } else {
            let variant = if search.contains("variant=flap") {
                RunnerVariant::Flap
            } else {
                RunnerVariant::Jump
            };
            ActiveGame::Runner(RunnerState::new(seed, variant))
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pig Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let search = window.location().search().unwrap_or_default();
        let settings = Settings::load();

        let game = Rc::new(RefCell::new(Game::new(
            select_game(&search, seed),
            CanvasRenderer::new(ctx),
            settings,
        )));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Pig Arcade running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_press(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch press
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().pointer_press(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: space doubles as the activate action
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        game.borrow_mut().key_activate();
                    }
                    "KeyF" => {
                        let mut g = game.borrow_mut();
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for id in ["start-button", "restart-button"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().request_start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pig_arcade::sim::{runner_tick, GamePhase, RunnerInput, RunnerState, RunnerVariant};

    env_logger::init();
    log::info!("Pig Arcade (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run of the runner sim
    let mut state = RunnerState::new(42, RunnerVariant::Jump);
    state.start();
    for i in 0..3600u64 {
        let input = RunnerInput {
            impulse: i % 50 == 0,
            start: false,
        };
        runner_tick(&mut state, &input);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    println!(
        "simulated {} ticks: score {}, lives {}",
        state.frame,
        state.display_score(),
        state.display_lives()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
