#[macro_use]
mod browser;
pub mod engine;
pub mod game;
pub mod geometry;
pub mod scene;

use wasm_bindgen::prelude::*;

/// Wasm entry point: installs the panic hook and starts the game on the
/// local async executor.
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    browser::spawn_local(async move {
        if let Err(err) = game::run().await {
            error!("game failed to start: {:#?}", err);
        }
    });

    Ok(())
}
