//! Lane Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

    use lane_runner::sim::{GameStatus, Snapshot};
    use lane_runner::{FrameClock, Session, Tuning};

    // Hands each frame to the page's presentation layer, if it registered one
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (typeof window.laneRunnerPresent === 'function') {
                window.laneRunnerPresent(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        clock: FrameClock,
        /// Status shown by the HUD last frame
        shown_status: Option<GameStatus>,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            let clock = FrameClock::new(tuning.max_frame_dt);
            Self {
                session: Session::new(tuning, seed),
                clock,
                shown_status: None,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            self.session.frame(dt);
        }

        /// Publish the frame to the page
        fn present(&mut self) {
            let snapshot = self.session.snapshot();
            match snapshot.to_json() {
                Ok(json) => present_frame(&json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
            self.update_hud(&snapshot);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, snapshot: &Snapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let score = snapshot.display_score.to_string();
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&score));
            }

            // Overlay only changes on status transitions
            if self.shown_status == Some(snapshot.status) {
                return;
            }
            self.shown_status = Some(snapshot.status);

            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = if snapshot.status == GameStatus::GameOver {
                    el.class_list().remove_1("hidden")
                } else {
                    el.class_list().add_1("hidden")
                };
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&score));
            }
        }

        fn restart(&mut self) {
            self.session.restart();
            self.clock.reset();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Runner starting...");

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed)));

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Lane Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.input_mut().key_down(&event.key()) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().session.input_mut().pointer_down(pos);
            });
            let _ = document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().session.input_mut().pointer_up(pos);
            });
            let _ = document
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    game.borrow_mut().session.input_mut().pointer_down(pos);
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                match event.changed_touches().get(0) {
                    Some(touch) => {
                        let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                        g.session.input_mut().pointer_up(pos);
                    }
                    None => g.session.input_mut().pointer_cancel(),
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.present();
            g.session.is_running()
        };

        // Game over halts scheduling until restart
        if running {
            request_animation_frame(game);
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let was_running = {
                    let mut g = game.borrow_mut();
                    let was_running = g.session.is_running();
                    g.restart();
                    was_running
                };
                // Only resume the loop if game over stopped it
                if !was_running {
                    request_animation_frame(game.clone());
                }
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot session - build for wasm32 for the web version");

    let tuning = lane_runner::Tuning::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED);

    headless_run(tuning, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a session with the autopilot at 60 Hz until it crashes or time runs out
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(tuning: lane_runner::Tuning, seed: u64) {
    use lane_runner::Session;
    use lane_runner::sim::Autopilot;

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_SECONDS: f32 = 180.0;
    const REPORT_EVERY: f32 = 10.0;

    let mut session = Session::new(tuning, seed);
    let pilot = Autopilot::default();
    let mut next_report = REPORT_EVERY;

    while session.is_running() && session.state().elapsed < MAX_SECONDS {
        session.autopilot_frame(&pilot, FRAME_DT);

        let state = session.state();
        if state.elapsed >= next_report {
            log::info!(
                "t={:.0}s z={:.1} lane={} obstacles={} score={}",
                state.elapsed,
                state.player.pos.z,
                state.player.lane,
                state.obstacles.len(),
                state.display_score()
            );
            next_report += REPORT_EVERY;
        }
    }

    let state = session.state();
    println!(
        "Run ended ({:?}) after {:.1}s with score {}",
        state.status,
        state.elapsed,
        state.display_score()
    );
}
