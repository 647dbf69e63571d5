pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod routes;
pub mod state;
#[cfg(test)]
pub(crate) mod test_support;
pub mod utils;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use wasm_bindgen_futures::spawn_local;

    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    let perf = web_sys::window().and_then(|w| w.performance());
    let t0 = perf.as_ref().map(|p| p.now());
    log::info!("Starting MiDo console: initializing runtime config");

    spawn_local(async move {
        config::init().await;
        match (perf.as_ref(), t0) {
            (Some(p), Some(start)) => {
                log::info!("Runtime config initialized ({} ms)", p.now() - start)
            }
            _ => log::info!("Runtime config initialized"),
        }
        router::mount_app();
    });
}
