//! Centralized bounds on translator input.
//!
//! Real shader stages are tens to low hundreds of lines. These limits only exist so a stray
//! binary or log file passed on the command line fails fast instead of producing huge artifacts.

use crate::error::TranslateError;
use crate::types::ShaderStage;

/// Maximum accepted stage source length in bytes.
pub const MAX_SOURCE_BYTES: usize = 1024 * 1024; // 1 MiB

/// Maximum accepted stage source length in lines.
pub const MAX_SOURCE_LINES: usize = 65_536;

pub(crate) fn check_source(stage: ShaderStage, src: &str) -> Result<(), TranslateError> {
    if src.len() > MAX_SOURCE_BYTES {
        return Err(TranslateError::SourceTooLarge {
            stage,
            len: src.len(),
            max: MAX_SOURCE_BYTES,
        });
    }
    let lines = src.lines().count();
    if lines > MAX_SOURCE_LINES {
        return Err(TranslateError::SourceTooLarge {
            stage,
            len: lines,
            max: MAX_SOURCE_LINES,
        });
    }
    Ok(())
}
