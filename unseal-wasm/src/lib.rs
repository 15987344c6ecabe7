//! WebAssembly bindings for C2PA metadata removal.
//!
//! Images are checked and cleaned entirely in the browser; nothing is sent
//! to a server.

use serde::Serialize;
use unseal_core::{
    inspect, Diagnostic, DiagnosticSink, Evidence, ImageFormat, Outcome, RecordingSink,
    RemovalConfig, Remover, Strategy,
};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Diagnostic sink that keeps every event and optionally echoes it to the
/// browser console.
#[derive(Default)]
struct ConsoleSink {
    recorded: RecordingSink,
    echo: bool,
}

impl DiagnosticSink for ConsoleSink {
    fn record(&self, diagnostic: &Diagnostic) {
        if self.echo {
            let line = JsValue::from_str(&diagnostic.to_string());
            if diagnostic.is_warning() {
                web_sys::console::warn_1(&line);
            } else {
                web_sys::console::debug_1(&line);
            }
        }
        self.recorded.record(diagnostic);
    }
}

/// Detection report returned by [`inspect_image`].
#[derive(Serialize)]
struct InspectReport {
    format: ImageFormat,
    detected: bool,
    evidence: Option<Evidence>,
}

/// Result of [`remove_image`].
#[wasm_bindgen]
pub struct RemovalResult {
    bytes: Vec<u8>,
    outcome: Outcome,
    strategy: Option<Strategy>,
    diagnostics: Vec<String>,
}

#[wasm_bindgen]
impl RemovalResult {
    /// Output image: cleaned bytes, or the input unchanged.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }

    /// Outcome in snake_case (e.g. `cleaned`, `no_metadata_found`).
    #[wasm_bindgen(getter)]
    pub fn outcome(&self) -> String {
        json_name(&self.outcome)
    }

    /// `reencode` or `selective_copy` when cleaned.
    #[wasm_bindgen(getter)]
    pub fn strategy(&self) -> Option<String> {
        self.strategy.map(|s| json_name(&s))
    }

    #[wasm_bindgen(getter)]
    pub fn cleaned(&self) -> bool {
        self.outcome.is_cleaned()
    }

    /// One line per diagnostic recorded during removal.
    #[wasm_bindgen(getter)]
    pub fn diagnostics(&self) -> js_sys::Array {
        self.diagnostics
            .iter()
            .map(|line| JsValue::from_str(line))
            .collect()
    }
}

/// Check an image for C2PA metadata.
#[wasm_bindgen]
pub fn detect_image(bytes: &[u8]) -> bool {
    unseal_core::detect(bytes)
}

/// Check an image and describe what was found.
///
/// # Returns
/// A JSON string with `format`, `detected` and `evidence`.
#[wasm_bindgen]
pub fn inspect_image(bytes: &[u8]) -> String {
    let detection = inspect(bytes);
    let report = InspectReport {
        format: detection.format,
        detected: detection.is_detected(),
        evidence: detection.evidence,
    };
    serde_json::to_string(&report)
        .unwrap_or_else(|e| format!(r#"{{"detected":false,"error":"Serialization error: {}"}}"#, e))
}

/// Remove C2PA metadata from an image.
///
/// # Arguments
/// * `bytes` - JPEG or PNG file content
/// * `smart_mode` - try decode/re-encode first (default: true)
/// * `jpeg_quality` - re-encode quality, 1-100 (default: 95)
/// * `log` - echo diagnostics to the browser console
#[wasm_bindgen]
pub fn remove_image(
    bytes: &[u8],
    smart_mode: Option<bool>,
    jpeg_quality: Option<u32>,
    log: Option<bool>,
) -> RemovalResult {
    let sink = ConsoleSink {
        recorded: RecordingSink::new(),
        echo: log.unwrap_or(false),
    };
    remove_with(bytes, config(smart_mode, jpeg_quality), &sink)
}

/// Get the library version.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn config(smart_mode: Option<bool>, jpeg_quality: Option<u32>) -> RemovalConfig {
    let mut config = RemovalConfig::default();
    if let Some(smart_mode) = smart_mode {
        config = config.with_smart_mode(smart_mode);
    }
    if let Some(quality) = jpeg_quality {
        config = config.with_jpeg_quality(quality);
    }
    config
}

fn remove_with(bytes: &[u8], config: RemovalConfig, sink: &ConsoleSink) -> RemovalResult {
    let removal = Remover::new(config).with_sink(sink).remove(bytes);
    RemovalResult {
        outcome: removal.outcome,
        strategy: removal.strategy,
        bytes: removal.bytes.into_owned(),
        diagnostics: sink
            .recorded
            .take()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Serde name of a unit enum variant.
fn json_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}
