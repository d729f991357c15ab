use thiserror::Error;

/// Failures raised while validating inputs, before any program line is
/// produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WarmupError {
    #[error("invalid tool: {reason}")]
    InvalidTool { reason: String },

    #[error("invalid duration: {0} minutes (expected 1-120)")]
    InvalidDuration(u32),

    #[error("invalid ramp parameters: {reason}")]
    InvalidRamp { reason: String },

    #[error("tool length {length}mm exceeds 85% of machine Z travel ({travel}mm)")]
    ToolTooLong { length: f64, travel: f64 },
}
