//! `setTimeout`-backed reveal pacing

use core::time::Duration;

use async_trait::async_trait;
use lottery_core::Sleeper;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::utils::timeout_millis;

/// Sleeper that yields to the browser event loop
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutSleeper;

#[async_trait(?Send)]
impl Sleeper for TimeoutSleeper {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }

        let millis = timeout_millis(duration);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            });
            // Without a window (workers, tests) there is nothing to wait on
            if !matches!(scheduled, Some(Ok(_))) {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });

        let _ = JsFuture::from(promise).await;
    }
}
