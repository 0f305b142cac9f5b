use std::fmt;

use thiserror::Error;

use crate::types::{DeclKind, ShaderStage};

/// Fatal translation errors. Any of these aborts the whole shader pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("{stage} shader line {line}: malformed declaration `{text}`")]
    MalformedDeclaration {
        stage: ShaderStage,
        line: usize,
        text: String,
    },
    #[error("{stage} shader line {line}: unsupported type `{type_token}`")]
    UnsupportedType {
        stage: ShaderStage,
        line: usize,
        type_token: String,
    },
    #[error("{stage} shader has no `void main()` entry point")]
    MissingMainFunction { stage: ShaderStage },
    #[error("{stage} shader: `main` opened near line {line} is never closed")]
    UnbalancedBraces { stage: ShaderStage, line: usize },
    #[error("invalid shader name {name:?}: expected an identifier")]
    InvalidShaderName { name: String },
    #[error("{stage} shader source is {len} bytes/lines, exceeds maximum {max}")]
    SourceTooLarge {
        stage: ShaderStage,
        len: usize,
        max: usize,
    },
    #[error("{file_name} line {line}: character {ch:?} is not representable in 7-bit output")]
    NonAsciiOutput {
        file_name: String,
        line: usize,
        ch: char,
    },
}

/// Per-artifact write failure. Reported in the run report rather than aborting the run.
#[derive(Debug, Error)]
#[error("failed to write {file_name}: {source}")]
pub struct WriteFailure {
    pub file_name: String,
    #[source]
    pub source: std::io::Error,
}

/// Non-fatal findings collected during a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A declaration whose type token matched none of the allowed kinds; the line was skipped.
    UnsupportedType {
        stage: ShaderStage,
        line: usize,
        type_token: String,
    },
    /// A uniform declared in both stages with different kinds; the vertex kind was kept.
    ConstantKindConflict {
        name: String,
        vertex: DeclKind,
        fragment: DeclKind,
        fragment_line: usize,
    },
    /// The fragment source declares or assigns no `out vec4`; its body has no `return`.
    MissingFragmentOutput,
    /// A non-ASCII character was replaced with `?` in the written artifact.
    LossyCharacter {
        file_name: String,
        line: usize,
        ch: char,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedType {
                stage,
                line,
                type_token,
            } => write!(
                f,
                "{stage} shader line {line}: unsupported type `{type_token}`, declaration skipped"
            ),
            Diagnostic::ConstantKindConflict {
                name,
                vertex,
                fragment,
                fragment_line,
            } => write!(
                f,
                "uniform `{name}` is {vertex} in the vertex shader but {fragment} in the fragment \
                 shader (line {fragment_line}); keeping {vertex}"
            ),
            Diagnostic::MissingFragmentOutput => write!(
                f,
                "fragment shader never assigns an `out vec4`; no return statement emitted"
            ),
            Diagnostic::LossyCharacter {
                file_name,
                line,
                ch,
            } => write!(f, "{file_name} line {line}: replaced {ch:?} with '?'"),
        }
    }
}
