//! Hook Line entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use hook_line::Settings;
    use hook_line::platform::{FrameDriver, StartupError};
    use hook_line::renderer::vertex::colors;
    use hook_line::renderer::{RenderState, Scene, TextLine, build_scene};
    use hook_line::sim::{GameState, InputEvent, Tuning, Viewport};

    const CANVAS_ID: &str = "canvas";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        driver: FrameDriver,
        settings: Settings,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
        /// Wrapper sized like the canvas; hosts the message overlay
        stage: Option<HtmlElement>,
        message_el: Option<HtmlElement>,
        /// Line currently shown in the overlay
        shown_message: Option<TextLine>,
    }

    impl Game {
        /// Run one animation frame
        fn frame(&mut self, time: f64) {
            let report = self.driver.frame(&mut self.state, time);
            if report.resized {
                let vp = self.state.viewport;
                self.render_state.resize(&vp);
                size_canvas(&self.canvas, self.stage.as_ref(), &vp, self.render_state.size);
            }
            if report.catches > 0 {
                log::debug!("{} catch(es) this frame", report.catches);
            }

            let scene = build_scene(&self.state);
            self.render(&scene);
            self.update_hud(&scene);
        }

        /// Render the current frame
        fn render(&mut self, scene: &Scene) {
            match self.render_state.render(scene) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    self.render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Show, move or hide the catch message overlay
        fn update_hud(&mut self, scene: &Scene) {
            let Some(el) = self.message_el.as_ref() else {
                return;
            };
            // Anchor moves with the viewport, so compare the whole line
            if scene.text == self.shown_message {
                return;
            }

            match scene.text.as_ref() {
                Some(line) => {
                    let style = el.style();
                    // Overlay is positioned by its top edge; the line is anchored at its baseline
                    let _ = style.set_property("left", &format!("{}px", line.x));
                    let _ = style.set_property("top", &format!("{}px", line.y - line.font_px));
                    let _ = style.set_property("font", &format!("{}px sans-serif", line.font_px));
                    let _ = style.set_property("color", &colors::css(line.color));
                    el.set_text_content(Some(&line.text));
                    let _ = el.set_attribute("class", "");
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
            self.shown_message = scene.text.clone();
        }

        fn push(&mut self, event: InputEvent) {
            self.driver.push(event);
        }
    }

    /// Current window size and device pixel ratio
    fn display_metrics(window: &web_sys::Window) -> (f32, f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w as f32, h as f32, window.device_pixel_ratio() as f32)
    }

    /// CSS size = logical size, backing store = device pixels (clamped by the GPU)
    fn size_canvas(
        canvas: &HtmlCanvasElement,
        stage: Option<&HtmlElement>,
        vp: &Viewport,
        backing: (u32, u32),
    ) {
        let css_w = format!("{}px", vp.css_width);
        let css_h = format!("{}px", vp.css_height);
        let style = canvas.style();
        let _ = style.set_property("width", &css_w);
        let _ = style.set_property("height", &css_h);
        if let Some(stage) = stage {
            let _ = stage.style().set_property("width", &css_w);
            let _ = stage.style().set_property("height", &css_h);
        }
        canvas.set_width(backing.0);
        canvas.set_height(backing.1);
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Hook Line starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| StartupError::NoCanvas(CANVAS_ID.into()))?
            .dyn_into()
            .map_err(|_| StartupError::NotACanvas(CANVAS_ID.into()))?;
        let stage = document
            .get_element_by_id("stage")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let message_el = document
            .get_element_by_id("catch-message")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let settings = Settings::load();

        let (w, h, dpr) = display_metrics(&window);
        let viewport = Viewport::fit(w, h, dpr);

        let state = GameState::with_tuning(
            js_sys::Date::now() as u64,
            viewport,
            Tuning::from(&settings),
        );
        log::info!(
            "Game initialized with seed: {} ({}x{} @ {}x)",
            state.seed,
            viewport.css_width,
            viewport.css_height,
            viewport.device_pixel_ratio
        );

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, &viewport).await?;
        size_canvas(&canvas, stage.as_ref(), &viewport, render_state.size);

        let game = Rc::new(RefCell::new(Game {
            state,
            driver: FrameDriver::new(settings.fixed_timestep),
            settings,
            render_state,
            canvas: canvas.clone(),
            stage,
            message_el,
            shown_message: None,
        }));

        setup_input_handlers(&window, &canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Hook Line running!");
        Ok(())
    }

    /// Surface-local x of the first touch point
    fn touch_x(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<f32> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(touch.client_x() as f32 - rect.left() as f32)
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().push(InputEvent::PointerMove {
                    x: event.offset_x() as f32,
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (aim + drop)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = touch_x(&canvas_clone, &event) {
                    game.borrow_mut().push(InputEvent::TouchStart { x });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (steer)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = touch_x(&canvas_clone, &event) {
                    game.borrow_mut().push(InputEvent::TouchMove { x });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel (release)
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().push(InputEvent::TouchEnd);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.settings.is_action_key(&event.key()) {
                    // Keep space from scrolling the page
                    event.prevent_default();
                    g.push(InputEvent::ActionDown);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.settings.is_action_key(&event.key()) {
                    g.push(InputEvent::ActionUp);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (width, height, device_pixel_ratio) = display_metrics(&window);
                game.borrow_mut().push(InputEvent::Resize {
                    width,
                    height,
                    device_pixel_ratio,
                });
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Hook Line failed to start: {e}");
        web_sys::console::error_1(&format!("Hook Line failed to start: {e}").into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hook Line (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// One simulated minute of a scripted player sweeping and dropping the hook
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use hook_line::Settings;
    use hook_line::consts::SIM_DT_MS;
    use hook_line::platform::FrameDriver;
    use hook_line::sim::{GameState, InputEvent, Tuning, Viewport};

    let settings = Settings::load();
    let viewport = Viewport::fit(1024.0, 768.0, 2.0);
    let mut state = GameState::with_tuning(2024, viewport, Tuning::from(&settings));
    let mut driver = FrameDriver::new(settings.fixed_timestep);

    let mut catches = 0;
    let mut expiries = 0;
    for frame in 0..3600u32 {
        // Hover over the fish while resting, then hold for two seconds
        if !state.hook.extending {
            let fish = state.fish.rect();
            driver.push(InputEvent::PointerMove {
                x: fish.x + fish.w / 2.0,
            });
        }
        match frame % 180 {
            0 => driver.push(InputEvent::ActionDown),
            120 => driver.push(InputEvent::ActionUp),
            _ => {}
        }

        let report = driver.frame(&mut state, frame as f64 * SIM_DT_MS);
        catches += report.catches;
        expiries += report.expiries;
    }

    println!(
        "Simulated {:.0} s (seed {}): {} catches, {} fish swam away",
        state.time_ms / 1000.0,
        state.seed,
        catches,
        expiries
    );
}
