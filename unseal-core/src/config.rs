//! Removal configuration.
//!
//! Loaded from environment variables with sensible defaults. Callers that
//! take their own flags (the CLI, wasm hosts) start from `from_env()` and
//! override individual fields with the builder methods.

/// Default JPEG quality for smart-mode re-encoding.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Knobs for the removal state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalConfig {
    /// Try decode/re-encode before selective copy (default: true)
    pub smart_mode: bool,
    /// JPEG quality for re-encoding, 1-100 (default: 95)
    pub jpeg_quality: u8,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            smart_mode: true,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RemovalConfig {
    /// Load configuration from environment variables.
    ///
    /// - `UNSEAL_SMART_MODE`: `false`/`0`/`off` disables smart mode
    /// - `UNSEAL_JPEG_QUALITY`: integer, clamped to 1-100
    pub fn from_env() -> Self {
        let smart_mode = std::env::var("UNSEAL_SMART_MODE")
            .map(|v| parse_flag(&v).unwrap_or(true))
            .unwrap_or(true);

        let jpeg_quality = std::env::var("UNSEAL_JPEG_QUALITY")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .map(clamp_quality)
            .unwrap_or(DEFAULT_JPEG_QUALITY);

        Self {
            smart_mode,
            jpeg_quality,
        }
    }

    pub fn with_smart_mode(mut self, enabled: bool) -> Self {
        self.smart_mode = enabled;
        self
    }

    /// Set the re-encode quality; out-of-range values are clamped.
    pub fn with_jpeg_quality(mut self, quality: u32) -> Self {
        self.jpeg_quality = clamp_quality(quality);
        self
    }
}

fn clamp_quality(quality: u32) -> u8 {
    quality.clamp(1, 100) as u8
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
