//! Pulse Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use pulse_dash::FixedStep;
    use pulse_dash::renderer::{RenderState, background_color, scene_vertices};
    use pulse_dash::sim::{GameEvent, GameState, TickInput, level_count, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        sched: FixedStep,
        render_state: Option<RenderState>,
        input: TickInput,
    }

    impl Game {
        fn new() -> Self {
            Self {
                state: GameState::new(),
                sched: FixedStep::new(),
                render_state: None,
                input: TickInput::default(),
            }
        }

        fn start_level(&mut self, index: usize) {
            match self.state.start_level(index) {
                Ok(()) => {
                    self.sched.reset();
                    self.input = TickInput::default();
                    log::info!("Level {} started", index + 1);
                }
                Err(err) => {
                    // Configuration error: surface it loudly, stay in the menu
                    log::error!("Failed to start level {}: {err}", index + 1);
                }
            }
        }

        /// Run simulation ticks for one frame callback
        fn update(&mut self, now_ms: f64) {
            let steps = self.sched.pump(now_ms);
            for _ in 0..steps {
                tick(&mut self.state, &self.input);
            }

            for event in self.state.events.drain(..) {
                match event {
                    GameEvent::Crashed => {
                        log::info!("Crashed; attempt {}", self.state.attempts);
                    }
                    GameEvent::Respawned => log::debug!("Respawned"),
                    GameEvent::LevelComplete => {
                        log::info!("Level {} complete", self.state.level_index + 1);
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(&self.state);
                let clear = background_color(self.state.player.mode);
                match render_state.render(&vertices, clear) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Attempt counter
            if let Some(el) = document.get_element_by_id("attempt-count") {
                el.set_text_content(Some(&self.state.attempts.to_string()));
            }

            // Progress bar
            if let Some(el) = document.get_element_by_id("progress-fill") {
                let pct = self.state.completion_fraction() * 100.0;
                let _ = el.set_attribute("style", &format!("width:{pct:.1}%"));
            }

            // Crash flash overlay
            if let Some(el) = document.get_element_by_id("crash-flash") {
                let class = if self.state.flash_ticks > 0 {
                    "flash-active"
                } else {
                    ""
                };
                let _ = el.set_attribute("class", class);
            }

            // Menu/HUD visibility follows the phase
            let in_level = self.state.phase.in_level();
            if let Some(el) = document.get_element_by_id("main-menu") {
                let _ = el.set_attribute("class", if in_level { "hidden" } else { "" });
            }
            if let Some(el) = document.get_element_by_id("hud") {
                let _ = el.set_attribute("class", if in_level { "" } else { "hidden" });
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pulse Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new()));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_level_buttons(game.clone());

        // Draw one frame so the menu sits over the empty world
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("Pulse Dash ready ({} levels)", level_count());
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Pointer press/release: the whole window is the jump button
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase.in_level() {
                    g.input.hold = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.hold = false;
            });
            let _ =
                window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: same signal, no position needed
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.state.phase.in_level() {
                    g.input.hold = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.hold = false;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Space/ArrowUp hold, Escape quits to menu
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        if g.state.phase.in_level() {
                            g.input.hold = true;
                        }
                    }
                    "Escape" => {
                        if g.state.phase.in_level() {
                            g.state.exit_to_menu();
                            log::info!("Back to menu");
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.code().as_str(), "Space" | "ArrowUp") {
                    game.borrow_mut().input.hold = false;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_level_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for index in 0..level_count() {
            let Some(btn) = document.get_element_by_id(&format!("level-btn-{index}")) else {
                log::warn!("No button for level {}", index + 1);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start_level(index);
                // The loop parks itself in the menu; a level start re-arms it
                request_animation_frame(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
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
        let in_level = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
            g.state.phase.in_level()
        };

        // Stop re-arming once the run is over; level start arms a fresh loop
        if in_level {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pulse Dash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the real scheduler and engine with synthetic 60 Hz timestamps for
/// ten seconds of level 1 and report how the run went
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use pulse_dash::FixedStep;
    use pulse_dash::sim::{GameState, TickInput, tick};

    let mut state = GameState::new();
    state.start_level(0).expect("bundled level must load");
    let mut sched = FixedStep::new();

    let frame_ms = 1000.0 / 60.0;
    for frame in 0..600u32 {
        let steps = sched.pump(frame as f64 * frame_ms);
        for _ in 0..steps {
            // Hold in short pulses so the demo hops along the ground
            let hold = frame % 40 < 8;
            tick(&mut state, &TickInput { hold });
        }
        state.events.clear();
    }

    log::info!(
        "demo: attempt {}, {:.0}% of the level reached",
        state.attempts,
        state.completion_fraction() * 100.0
    );
    println!(
        "Headless demo finished: attempt {}, progress {:.0}%",
        state.attempts,
        state.completion_fraction() * 100.0
    );
}
