//! Neon Glide entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use neon_glide::Session;
    use neon_glide::persistence::{KeyValueStore, LocalStorage, MemoryStore};
    use neon_glide::platform::{
        FrameLoop, FrameScheduler, Intent, PointerMapper, PointerSample, Viewport,
    };
    use neon_glide::renderer::{CanvasSurface, Surface};
    use neon_glide::sim::{GameEvent, GamePhase};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// requestAnimationFrame-backed scheduler
    struct RafScheduler {
        callback: FrameCallback,
    }

    impl FrameScheduler for RafScheduler {
        fn request(&mut self) -> Option<i32> {
            let window = web_sys::window()?;
            let callback = self.callback.borrow();
            let callback = callback.as_ref()?;
            window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(|e| log::warn!("requestAnimationFrame failed: {e:?}"))
                .ok()
        }

        fn cancel(&mut self, handle: i32) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        surface: CanvasSurface,
        viewport: Viewport,
        frames: FrameLoop<RafScheduler>,
    }

    impl Game {
        /// Refit the canvas to its container. Keeps the last size when the
        /// container cannot be measured.
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let container_width = self
                .surface
                .canvas()
                .parent_element()
                .map(|p| p.get_bounding_client_rect().width() as f32);
            let window_height = window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0) as f32;
            let dpr = window.device_pixel_ratio() as f32;

            if let Some(viewport) = Viewport::fit(container_width, window_height, dpr) {
                let (w, h) = viewport.backing_size();
                self.surface.set_backing_size(w, h);
                let style = self.surface.canvas().style();
                let _ = style.set_property("width", &format!("{}px", viewport.width));
                let _ = style.set_property("height", &format!("{}px", viewport.height));
                self.viewport = viewport;
            }
        }

        /// Playfield X under the pointer. Hovering mice are ignored unless
        /// `pressed` says the event is a press.
        fn pointer_x(&self, event: &PointerEvent, pressed: bool) -> Option<f32> {
            let sample = PointerSample {
                client_x: event.client_x() as f32,
                pressure: event.pressure(),
                pointer_type: event.pointer_type(),
            };
            if sample.is_hover() && !pressed {
                return None;
            }
            let rect = self.surface.canvas().get_bounding_client_rect();
            PointerMapper::new(rect.left() as f32, rect.width() as f32)
                .to_playfield_x(sample.client_x)
        }

        /// Ask for a run if none is in progress; the next frame starts it
        fn launch(&mut self) {
            if self.session.submit(Intent::Start) {
                self.frames.schedule();
            }
        }

        fn stop(&mut self) {
            self.frames.cancel();
        }

        /// One animation frame
        fn frame(&mut self, time: f64) {
            if !self.frames.begin_frame() {
                return;
            }
            let surface: &mut dyn Surface = &mut self.surface;
            let report = self.session.frame(time, Some(surface), &self.viewport);
            handle_events(&report.events);
            update_hud(&self.session);

            if report.keep_running {
                self.frames.schedule();
            }
        }
    }

    /// Toggle DOM overlays for simulation events
    fn handle_events(events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Flash { duration_ms } => flash(duration_ms),
                GameEvent::NewBest { score } => log::info!("New best: {score}"),
                _ => {}
            }
        }
    }

    fn flash(duration_ms: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(el) = window.document().and_then(|d| d.get_element_by_id("flash")) else {
            return;
        };
        let _ = el.class_list().add_1("active");
        let clear = Closure::once(move || {
            let _ = el.class_list().remove_1("active");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            clear.as_ref().unchecked_ref(),
            duration_ms as i32,
        );
        clear.forget();
    }

    /// Mirror score, best and phase into the DOM
    fn update_hud(session: &Session) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&session.score().to_string()));
        }
        if let Some(el) = document.get_element_by_id("hud-best") {
            el.set_text_content(Some(&session.best_score().to_string()));
        }

        if let Some(el) = document.get_element_by_id("overlay") {
            let class = if session.phase() == GamePhase::Running {
                "hidden"
            } else {
                ""
            };
            let _ = el.set_attribute("class", class);
        }
        if let Some(el) = document.get_element_by_id("overlay-title") {
            let title = match session.phase() {
                GamePhase::Idle => "Tap To Launch",
                _ => "Crashed",
            };
            el.set_text_content(Some(title));
        }
        if let Some(el) = document.get_element_by_id("start-btn") {
            let label = match session.phase() {
                GamePhase::Idle => "Start Run",
                _ => "Try Again",
            };
            el.set_text_content(Some(label));
        }
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStorage::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{e}; best score will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Glide starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::warn!("No document; not starting");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No canvas element; not starting");
            return;
        };
        let Some(surface) = CanvasSurface::new(canvas.clone()) else {
            log::warn!("2D context unavailable; not starting");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, open_store()),
            surface,
            viewport: Viewport::default(),
            frames: FrameLoop::new(RafScheduler {
                callback: callback.clone(),
            }),
        }));

        log::info!("Game initialized with seed: {}", seed);

        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                game.borrow_mut().frame(time);
            }));
        }

        {
            let mut g = game.borrow_mut();
            g.resize();
            // One frame so the idle playfield is visible before launch
            g.frames.schedule();
        }
        update_hud(&game.borrow().session);

        setup_input_handlers(&canvas, game.clone());
        setup_window_handlers(game.clone());
        setup_start_button(game);

        log::info!("Neon Glide ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down: launch if idle/crashed, then steer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.launch();
                if let Some(x) = g.pointer_x(&event, true) {
                    g.session.submit(Intent::SetTargetX(x));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move: steer (ignored while a mouse merely hovers)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if let Some(x) = g.pointer_x(&event, false) {
                    g.session.submit(Intent::SetTargetX(x));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up / leave: stop the craft
        for name in ["pointerup", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().session.submit(Intent::Release);
            });
            let _ =
                canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => g.launch(),
                    "i" | "I" => {
                        g.session.autopilot = !g.session.autopilot;
                        log::info!("Autopilot: {}", g.session.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Teardown: no frame may run once the page is going away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().stop();
                log::info!("Frame loop stopped");
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().launch();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
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
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Glide (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    headless_demo(0x5eed, 120.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Let the autopilot play at 60 fps for up to `seconds`, drawing into a
/// recorder, and report how it went.
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(seed: u64, seconds: f64) {
    use neon_glide::Session;
    use neon_glide::persistence::MemoryStore;
    use neon_glide::platform::{Intent, Viewport};
    use neon_glide::renderer::{Recorder, Surface};

    let mut session = Session::new(seed, Box::new(MemoryStore::new()));
    session.autopilot = true;
    session.submit(Intent::Start);

    let viewport = Viewport::default();
    let mut recorder = Recorder::new();
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut frames = 0u64;

    while now < seconds * 1000.0 {
        recorder.clear_commands();
        let surface: &mut dyn Surface = &mut recorder;
        let report = session.frame(now, Some(surface), &viewport);
        frames += 1;
        now += frame_ms;
        if !report.keep_running {
            break;
        }
    }

    println!(
        "Demo finished after {:.1}s ({} frames): phase {:?}, score {}, best {}, {} draw calls in last frame",
        now / 1000.0,
        frames,
        session.phase(),
        session.score(),
        session.best_score(),
        recorder.commands.len(),
    );
}
