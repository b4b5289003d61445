//! Lottery Drawer WebAssembly Frontend - Web Composition Root
//!
//! This crate exposes the lottery drawer to a browser page.
//!
//! It is responsible for:
//! - Holding the `LotteryState` container for one widget instance
//! - Reading uploaded `File`s and triggering `Blob` downloads
//! - Pacing the progressive reveal with `setTimeout`
//! - Exposing the JavaScript API via #[wasm_bindgen] methods
//!
//! Rendering stays with the page: it binds inputs and buttons to the widget
//! methods and re-renders from the view model passed to its `onChange`
//! callback.

use wasm_bindgen::prelude::*;

mod app;
mod download;
mod timer;
mod utils;

pub use app::*;
pub use timer::TimeoutSleeper;
pub use utils::*;

// Initialize WASM module
#[wasm_bindgen(start)]
pub fn main() {
    utils::set_panic_hook();

    // Set up tracing for WASM
    tracing_wasm::set_as_global_default();
    utils::console_log!("Lottery drawer {} loaded", env!("CARGO_PKG_VERSION"));
}
