//! The removal state machine.
//!
//! ```text
//! Start -> FormatDetected -> SmartModeAttempted -> Done
//!                                  |
//!                                  v
//!                          FallbackAttempted -> Done | Failed
//! ```
//!
//! Smart mode re-encodes the image and is accepted only if the detector no
//! longer fires on the result. Otherwise the format-specific selective copy
//! runs and its output is verified the same way. Output is never returned
//! unless it has been verified clean; every other path hands back the input.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::config::RemovalConfig;
use crate::detect::{Detection, Detector};
use crate::diagnostics::{emit, Diagnostic, DiagnosticSink};
use crate::error::{Result, UnsealError};
use crate::format::{sniff_strict, ImageFormat};
use crate::{jpeg, png};

/// How a removal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Cleaned,
    UnsupportedFormat,
    NoMetadataFound,
    NoRemovableMetadataFound,
    VerificationFailure,
}

impl Outcome {
    pub fn is_cleaned(self) -> bool {
        self == Self::Cleaned
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cleaned => "cleaned",
            Self::UnsupportedFormat => "unsupported format",
            Self::NoMetadataFound => "no metadata found",
            Self::NoRemovableMetadataFound => "no removable metadata found",
            Self::VerificationFailure => "verification failure",
        })
    }
}

impl From<&UnsealError> for Outcome {
    fn from(err: &UnsealError) -> Self {
        match err {
            UnsealError::UnsupportedFormat | UnsealError::MissingSignature { .. } => {
                Self::UnsupportedFormat
            }
            UnsealError::VerificationFailure => Self::VerificationFailure,
            UnsealError::NoRemovableMetadataFound
            | UnsealError::DecodeFailure(_)
            | UnsealError::EncodeFailure(_)
            | UnsealError::TruncatedInput { .. }
            | UnsealError::InvalidLength { .. } => Self::NoRemovableMetadataFound,
        }
    }
}

/// Which tier produced cleaned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Reencode,
    SelectiveCopy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reencode => "re-encode",
            Self::SelectiveCopy => "selective copy",
        })
    }
}

/// State machine positions, reported through the diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    FormatDetected,
    SmartModeAttempted,
    FallbackAttempted,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::FormatDetected => "format detected",
            Self::SmartModeAttempted => "smart mode",
            Self::FallbackAttempted => "fallback",
            Self::Done => "done",
            Self::Failed => "failed",
        })
    }
}

/// Bytes and outcome of one removal.
///
/// Anything but [`Outcome::Cleaned`] borrows the input unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<'a> {
    pub bytes: Cow<'a, [u8]>,
    pub outcome: Outcome,
    /// Set when `outcome` is `Cleaned`.
    pub strategy: Option<Strategy>,
}

impl<'a> Removal<'a> {
    fn cleaned(bytes: Vec<u8>, strategy: Strategy) -> Self {
        Self {
            bytes: Cow::Owned(bytes),
            outcome: Outcome::Cleaned,
            strategy: Some(strategy),
        }
    }

    fn untouched(input: &'a [u8], outcome: Outcome) -> Self {
        Self {
            bytes: Cow::Borrowed(input),
            outcome,
            strategy: None,
        }
    }

    pub fn is_cleaned(&self) -> bool {
        self.outcome.is_cleaned()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_owned(self) -> Removal<'static> {
        Removal {
            bytes: Cow::Owned(self.bytes.into_owned()),
            outcome: self.outcome,
            strategy: self.strategy,
        }
    }
}

/// Runs the removal state machine.
#[derive(Clone, Copy, Default)]
pub struct Remover<'s> {
    config: RemovalConfig,
    sink: Option<&'s dyn DiagnosticSink>,
}

impl fmt::Debug for Remover<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Remover")
            .field("config", &self.config)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl<'s> Remover<'s> {
    pub fn new(config: RemovalConfig) -> Self {
        Self { config, sink: None }
    }

    pub fn with_config(mut self, config: RemovalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(mut self, sink: &'s dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &RemovalConfig {
        &self.config
    }

    /// Remove C2PA metadata from `input`.
    ///
    /// Never fails; problems are reported through [`Removal::outcome`] with
    /// the input handed back unchanged.
    pub fn remove<'a>(&self, input: &'a [u8]) -> Removal<'a> {
        self.stage(Stage::Start);

        let format = sniff_strict(input);
        if !format.is_supported() {
            self.stage(Stage::Failed);
            return Removal::untouched(input, Outcome::UnsupportedFormat);
        }
        emit(self.sink, Diagnostic::format_detected(format, input));
        self.stage(Stage::FormatDetected);

        let detector = Detector::default();
        let Detection { evidence, .. } = detector.scan(input);
        if evidence.is_none() {
            self.stage(Stage::Done);
            return Removal::untouched(input, Outcome::NoMetadataFound);
        }

        if self.config.smart_mode {
            self.stage(Stage::SmartModeAttempted);
            match self.smart_mode(input, format) {
                Ok(out) => match detector.scan(&out).evidence {
                    None => {
                        self.verified(Strategy::Reencode);
                        return Removal::cleaned(out, Strategy::Reencode);
                    }
                    Some(evidence) => emit(self.sink, Diagnostic::SmartModeResidual { evidence }),
                },
                Err(err) => emit(self.sink, Diagnostic::SmartModeFailed(err)),
            }
        }

        self.stage(Stage::FallbackAttempted);
        let out = match self.selective_copy(input, format, &detector) {
            Ok(out) => out,
            Err(err) => {
                self.stage(Stage::Failed);
                return Removal::untouched(input, Outcome::from(&err));
            }
        };

        match detector.scan(&out).evidence {
            None => {
                self.verified(Strategy::SelectiveCopy);
                Removal::cleaned(out, Strategy::SelectiveCopy)
            }
            Some(evidence) => {
                emit(self.sink, Diagnostic::VerificationFailed { evidence });
                self.stage(Stage::Failed);
                Removal::untouched(input, Outcome::VerificationFailure)
            }
        }
    }

    #[cfg(feature = "reencode")]
    fn smart_mode(&self, input: &[u8], format: ImageFormat) -> Result<Vec<u8>> {
        crate::reencode::Reencoder::new(self.config.jpeg_quality).reencode(input, format)
    }

    #[cfg(not(feature = "reencode"))]
    fn smart_mode(&self, _input: &[u8], format: ImageFormat) -> Result<Vec<u8>> {
        Err(UnsealError::DecodeFailure(format!(
            "no {format} codec compiled in"
        )))
    }

    fn selective_copy(
        &self,
        input: &[u8],
        format: ImageFormat,
        detector: &Detector,
    ) -> Result<Vec<u8>> {
        match format {
            ImageFormat::Jpeg => {
                let walk = jpeg::walk(input)?;
                self.partial(walk.truncation());
                jpeg::strip(input, &walk, detector, self.sink)
            }
            ImageFormat::Png => {
                let walk = png::walk(input)?;
                self.partial(walk.truncation());
                png::strip(input, &walk, detector, self.sink)
            }
            ImageFormat::Unknown => Err(UnsealError::UnsupportedFormat),
        }
    }

    fn stage(&self, stage: Stage) {
        emit(self.sink, Diagnostic::StageEntered(stage));
    }

    fn partial(&self, truncation: Option<UnsealError>) {
        if let Some(err) = truncation {
            emit(self.sink, Diagnostic::PartialParse(err));
        }
    }

    fn verified(&self, strategy: Strategy) {
        emit(self.sink, Diagnostic::Verified { strategy });
        self.stage(Stage::Done);
    }
}

/// Remove C2PA metadata with the default configuration and no diagnostics.
pub fn remove(input: &[u8]) -> Removal<'_> {
    Remover::default().remove(input)
}
