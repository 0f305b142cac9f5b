//! GLSL to PSSL shader-pair translator.
//!
//! Takes a GLSL vertex/fragment pair written in a restricted dialect (one declaration per line,
//! `void main()` entry points, `uniform`/`in`/`out` storage qualifiers) and produces four PSSL
//! artifacts:
//!
//! - `<Name>ShaderConstants.h`: a `unistruct` holding every uniform in 16-byte slots,
//! - `<Name>VSOutput.hs`: the struct passed from the vertex to the pixel stage,
//! - `<Name>_vv.pssl`: the vertex shader,
//! - `<Name>_p.pssl`: the pixel shader.
//!
//! Translation is text-level. Declarations are recognized line by line and the `main` bodies go
//! through a single tokenized rename pass; nothing is type-checked. Matrix-vector products are
//! copied as written (see [`integration_notes`]).
//!
//! ```no_run
//! use pssl_translate::{run, DirectorySink, PreviewMode, TranslateOptions};
//!
//! let mut sink = DirectorySink::new("out");
//! let report = run(&PreviewMode::Toon.shader_pair(), &TranslateOptions::default(), &mut sink)?;
//! assert!(report.is_complete());
//! # Ok::<(), pssl_translate::TranslateError>(())
//! ```

#![forbid(unsafe_code)]

pub mod emit;
pub mod encode;
mod error;
mod lex;
pub mod limits;
pub mod presets;
pub mod rewrite;
pub mod scan;
pub mod session;
pub mod sink;
mod translate;
pub mod types;

pub use crate::encode::EncodingPolicy;
pub use crate::error::{Diagnostic, TranslateError, WriteFailure};
pub use crate::presets::{ParsePreviewModeError, PreviewMode};
pub use crate::rewrite::SamplerBinding;
pub use crate::scan::{ConstantTable, InputTable, OutputTable, Scanner, TypePolicy};
pub use crate::session::{ArtifactKind, ShaderNames, ShaderSession};
pub use crate::sink::{ArtifactSink, DirectorySink, MemorySink};
pub use crate::translate::{
    integration_notes, run, translate, Artifact, ArtifactOutcome, ArtifactStatus, RunReport,
    ShaderPair, TranslateOptions, Translation, INTEGRATION_NOTES,
};
pub use crate::types::{DeclKind, Declaration, ShaderStage};
