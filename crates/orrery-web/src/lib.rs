pub mod runner;

pub use runner::SimRunner;

/// Generate all `#[wasm_bindgen]` exports for a simulation.
///
/// Generates:
/// - `thread_local!` storage for the SimRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (sim_init, sim_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod sim;
/// use sim::MySim;
///
/// orrery_web::export_sim!(MySim, "my-sim");
/// ```
///
/// The host drives the loop: call `sim_tick(performance.now())` from
/// `requestAnimationFrame` and stop re-scheduling once it returns false.
///
/// # Arguments
///
/// - `$sim_type`: The struct that implements `orrery_engine::Simulation` and has `new()`
/// - `$sim_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_sim {
    ($sim_type:ty, $sim_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SimRunner<$sim_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SimRunner<$sim_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Simulation not initialized. Call sim_init() first.");
                f(runner)
            })
        }

        /// Build the scene. `seed` pins the random initial orbit angles;
        /// without it the current time is used.
        #[wasm_bindgen]
        pub fn sim_init(seed: Option<f64>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
            let runner = $crate::SimRunner::new(<$sim_type>::new());

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init(seed)).map_err(|e| JsValue::from_str(&e))?;
            log::info!("{}: initialized (seed {})", $sim_name, seed);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn sim_tick(now_ms: f64) -> bool {
            with_runner(|r| r.tick(now_ms))
        }

        #[wasm_bindgen]
        pub fn sim_stop() {
            with_runner(|r| r.stop());
            log::info!("{}: stopped", $sim_name);
        }

        #[wasm_bindgen]
        pub fn sim_is_running() -> bool {
            with_runner(|r| r.is_running())
        }

        #[wasm_bindgen]
        pub fn sim_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn sim_pointer_down(x: f32, y: f32, button: u32) {
            let button = PointerButton::from_dom(button);
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn sim_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn sim_click(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::Click { x, y }));
        }

        #[wasm_bindgen]
        pub fn sim_wheel(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn sim_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn sim_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len())
        }

        #[wasm_bindgen]
        pub fn get_points_ptr() -> *const f32 {
            with_runner(|r| r.points_ptr())
        }

        #[wasm_bindgen]
        pub fn get_point_count() -> u32 {
            with_runner(|r| r.point_count())
        }

        #[wasm_bindgen]
        pub fn sim_manifest_json() -> String {
            with_runner(|r| r.manifest_json().to_string())
        }

        #[wasm_bindgen]
        pub fn sim_ui_updates_json() -> String {
            with_runner(|r| r.ui_updates_json())
        }
    };
}
