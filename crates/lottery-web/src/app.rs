//! Lottery Web Widget - Composition Root
//!
//! This module implements the widget class exposed to JavaScript:
//! 1. Holding the `LotteryState` container and the draw engine
//! 2. Translating page events (field edits, file picks, button clicks) into state transitions
//! 3. Pacing the reveal with `setTimeout` without holding a borrow across an await
//! 4. Pushing a fresh view model to the page's `onChange` callback after every change

use std::cell::RefCell;
use std::rc::Rc;

use lottery_core::{
    reveal, DrawEngine, DrawMode, LotteryConfig, LotteryError, LotteryState, SystemTimeSource,
};
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::download::trigger_download;
use crate::timer::TimeoutSleeper;

// ----------------------------------------------------------------------------
// JavaScript Interop Helpers
// ----------------------------------------------------------------------------

/// Error as seen by JavaScript: the localized message plus a stable code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsLotteryError {
    pub code: String,
    pub message: String,
}

impl From<&LotteryError> for JsLotteryError {
    fn from(err: &LotteryError) -> Self {
        let code = match err {
            LotteryError::MissingNumbersInput => "missing_numbers_input",
            LotteryError::NonPositiveNumbers => "non_positive_numbers",
            LotteryError::CountExceedsTotal { .. } => "count_exceeds_total",
            LotteryError::MissingEntriesCount => "missing_entries_count",
            LotteryError::NonPositiveEntriesCount => "non_positive_entries_count",
            LotteryError::CountExceedsEntries { .. } => "count_exceeds_entries",
            LotteryError::CountTooLarge { .. } => "count_too_large",
            LotteryError::NoEntriesLoaded => "no_entries_loaded",
            LotteryError::UnsupportedFileType { .. } => "unsupported_file_type",
            LotteryError::EmptyUpload => "empty_upload",
            LotteryError::NoValidNames => "no_valid_names",
            LotteryError::DrawInProgress => "draw_in_progress",
            LotteryError::NothingToExport => "nothing_to_export",
            LotteryError::UnknownMode(_) => "unknown_mode",
            LotteryError::InvalidExport(_) => "invalid_export",
            LotteryError::InvalidConfig(_) => "invalid_config",
        };
        Self {
            code: code.to_string(),
            message: err.user_message(),
        }
    }
}

fn to_js_error(err: LotteryError) -> JsValue {
    serde_wasm_bindgen::to_value(&JsLotteryError::from(&err))
        .unwrap_or_else(|_| JsValue::from_str(&err.user_message()))
}

fn serialize<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {}", e)))
}

// ----------------------------------------------------------------------------
// Lottery Web Widget
// ----------------------------------------------------------------------------

/// Browser-side lottery widget
///
/// All state lives in a shared `LotteryState`; every method borrows it only
/// for the duration of one transition so that a reveal in flight never
/// blocks reads from the page.
#[wasm_bindgen]
pub struct LotteryWidget {
    state: Rc<RefCell<LotteryState>>,
    engine: Rc<RefCell<DrawEngine<StdRng>>>,
    on_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl LotteryWidget {
    /// Create a widget; `config` may be `undefined` for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(on_change: Option<js_sys::Function>, config: JsValue) -> Result<LotteryWidget, JsValue> {
        let config: LotteryConfig = if config.is_undefined() || config.is_null() {
            LotteryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        config.validate().map_err(to_js_error)?;

        let engine = DrawEngine::from_entropy(config.draw.strategy);
        info!("Lottery widget created ({:?} strategy)", config.draw.strategy);

        Ok(LotteryWidget {
            state: Rc::new(RefCell::new(LotteryState::new(config))),
            engine: Rc::new(RefCell::new(engine)),
            on_change,
        })
    }

    /// Switch to `"numbers"` or `"employees"`
    #[wasm_bindgen]
    pub fn switch_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: DrawMode = mode.parse().map_err(to_js_error)?;
        self.state.borrow_mut().switch_mode(mode);
        self.notify();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_total_input(&self, value: String) -> Result<(), JsValue> {
        self.state.borrow_mut().set_total_input(value).map_err(to_js_error)?;
        self.notify();
        Ok(())
    }

    /// Set the count field of the active panel
    #[wasm_bindgen]
    pub fn set_count_input(&self, value: String) -> Result<(), JsValue> {
        self.state.borrow_mut().set_count_input(value).map_err(to_js_error)?;
        self.notify();
        Ok(())
    }

    /// Load entries from text the page already read; returns the entry count
    #[wasm_bindgen]
    pub fn upload_text(&self, file_name: &str, text: &str) -> Result<usize, JsValue> {
        let result = self.state.borrow_mut().load_upload(file_name, text);
        self.notify();
        result.map_err(to_js_error)
    }

    /// Load entries from a picked `File`; resolves to the entry count
    #[wasm_bindgen]
    pub fn upload_file(&self, file: web_sys::File) -> js_sys::Promise {
        let state = self.state.clone();
        let on_change = self.on_change.clone();

        future_to_promise(async move {
            let file_name = file.name();
            let checked = state.borrow_mut().check_upload(&file_name);
            if let Err(e) = checked {
                notify(&state, on_change.as_ref());
                return Err(to_js_error(e));
            }

            let text = JsFuture::from(file.text())
                .await?
                .as_string()
                .ok_or_else(|| JsValue::from_str("File content is not text"))?;

            let result = state.borrow_mut().load_upload(&file_name, &text);
            notify(&state, on_change.as_ref());
            let loaded = result.map_err(to_js_error)?;
            Ok(JsValue::from(loaded as u32))
        })
    }

    /// Validate, draw and reveal the active panel
    ///
    /// Resolves to the number of drawn items once the last one is revealed;
    /// rejects with `{code, message}` when validation fails.
    #[wasm_bindgen]
    pub fn draw(&self) -> js_sys::Promise {
        let state = self.state.clone();
        let engine = self.engine.clone();
        let on_change = self.on_change.clone();

        future_to_promise(async move {
            let begun = {
                let mut engine = engine.borrow_mut();
                let mut state = state.borrow_mut();
                state.begin_draw(&mut *engine)
            };
            let pending = match begun {
                Ok(pending) => pending,
                Err(e) => {
                    warn!("Draw rejected: {}", e);
                    notify(&state, on_change.as_ref());
                    return Err(to_js_error(e));
                }
            };
            notify(&state, on_change.as_ref());

            let drawn = pending.len();
            let schedule = state.borrow().config().reveal.schedule(pending.mode());
            reveal(pending.into_items(), schedule, &TimeoutSleeper, |item| {
                state.borrow_mut().push_revealed(item);
                notify(&state, on_change.as_ref());
            })
            .await;

            state.borrow_mut().finish_draw();
            notify(&state, on_change.as_ref());
            Ok(JsValue::from(drawn as u32))
        })
    }

    /// Clear the active panel
    #[wasm_bindgen]
    pub fn reset(&self) -> Result<(), JsValue> {
        self.state.borrow_mut().reset().map_err(to_js_error)?;
        self.notify();
        Ok(())
    }

    /// Current result as `{file_name, contents, mime}`, or `null` when empty
    #[wasm_bindgen]
    pub fn export(&self) -> Result<JsValue, JsValue> {
        match self.state.borrow().export(&SystemTimeSource) {
            Some(export) => serialize(&export),
            None => Ok(JsValue::NULL),
        }
    }

    /// Export and trigger a browser download; `false` when nothing was drawn
    #[wasm_bindgen]
    pub fn download(&self) -> Result<bool, JsValue> {
        let export = self.state.borrow().export(&SystemTimeSource);
        match export {
            Some(export) => {
                trigger_download(&export)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// View model for rendering
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serialize(&self.state.borrow().view())
    }

    #[wasm_bindgen]
    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    fn notify(&self) {
        notify(&self.state, self.on_change.as_ref());
    }
}

/// Push the current view model to the page
fn notify(state: &Rc<RefCell<LotteryState>>, on_change: Option<&js_sys::Function>) {
    let Some(callback) = on_change else {
        return;
    };

    let view = state.borrow().view();
    match serde_wasm_bindgen::to_value(&view) {
        Ok(value) => {
            let _ = callback.call1(&JsValue::NULL, &value);
        }
        Err(e) => warn!("Failed to serialize view: {}", e),
    }
}

// ----------------------------------------------------------------------------
// Utility Functions
// ----------------------------------------------------------------------------

/// Whether a picked file would be accepted
#[wasm_bindgen]
pub fn is_accepted_upload(file_name: &str) -> bool {
    lottery_core::check_file_type(file_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_error_codes_and_messages() {
        let err = LotteryError::CountExceedsTotal {
            requested: 6,
            total: 5,
        };
        let js_err = JsLotteryError::from(&err);
        assert_eq!(js_err.code, "count_exceeds_total");
        assert_eq!(js_err.message, lottery_core::messages::COUNT_EXCEEDS_TOTAL);
    }

    #[test]
    fn test_js_error_serialization() {
        let js_err = JsLotteryError::from(&LotteryError::EmptyUpload);
        let serialized = serde_json::to_string(&js_err).unwrap();
        assert!(serialized.contains("\"code\":\"empty_upload\""));
        assert!(serialized.contains("message"));
    }

    #[test]
    fn test_is_accepted_upload() {
        assert!(is_accepted_upload("staff.csv"));
        assert!(!is_accepted_upload("staff.xlsx"));
        assert!(!is_accepted_upload(""));
    }

    #[test]
    fn test_view_serializes_for_callback() {
        let state = LotteryState::new(LotteryConfig::testing());
        let serialized = serde_json::to_string(&state.view()).unwrap();
        assert!(serialized.contains("\"mode\":\"numbers\""));
        assert!(serialized.contains("can_draw"));
    }
}
