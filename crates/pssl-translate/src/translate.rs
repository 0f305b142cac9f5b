//! Orchestration of one shader-pair translation.
//!
//! [`translate`] runs every scanning, rewriting and emission step in a fresh per-run context and
//! returns the four artifacts in memory. [`run`] additionally persists them through an
//! [`ArtifactSink`]: headers first, and a shader is only written once both headers it includes
//! were written successfully.

use tracing::{debug, warn};

use crate::emit;
use crate::encode::{self, EncodingPolicy};
use crate::error::{Diagnostic, TranslateError, WriteFailure};
use crate::limits;
use crate::rewrite::{self, SamplerBinding};
use crate::scan::{ConstantTable, InputTable, OutputTable, Scanner, TypePolicy};
use crate::session::{ArtifactKind, ShaderNames, ShaderSession};
use crate::sink::ArtifactSink;
use crate::types::ShaderStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslateOptions {
    pub type_policy: TypePolicy,
    pub encoding_policy: EncodingPolicy,
}

impl TranslateOptions {
    pub fn strict() -> Self {
        Self {
            type_policy: TypePolicy::Strict,
            encoding_policy: EncodingPolicy::Strict,
        }
    }
}

/// Input triple for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPair {
    pub name: String,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderPair {
    pub fn new(
        name: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// One generated, 7-bit-safe text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub contents: String,
}

/// Everything produced by [`translate`].
#[derive(Debug, Clone)]
pub struct Translation {
    pub names: ShaderNames,
    /// In emission order: constants header, output header, vertex shader, pixel shader.
    pub artifacts: Vec<Artifact>,
    pub constants: ConstantTable,
    pub inputs: InputTable,
    pub outputs: OutputTable,
    pub samplers: Vec<SamplerBinding>,
    pub fragment_output: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    /// Contents of `kind`; every successful translation carries all four artifacts.
    pub fn text(&self, kind: ArtifactKind) -> &str {
        self.artifact(kind).map_or("", |a| a.contents.as_str())
    }
}

/// Translate one shader pair without touching the filesystem.
pub fn translate(
    pair: &ShaderPair,
    options: &TranslateOptions,
) -> Result<Translation, TranslateError> {
    let names = ShaderNames::new(&pair.name)?;
    limits::check_source(ShaderStage::Vertex, &pair.vertex)?;
    limits::check_source(ShaderStage::Fragment, &pair.fragment)?;

    let mut scanner = Scanner::new(options.type_policy);
    let scan = scanner.scan_constants(&pair.fragment, &pair.vertex)?;
    let inputs = scanner.scan_inputs(&pair.vertex)?;
    let outputs = scanner.scan_outputs(&pair.vertex)?;
    let mut diagnostics = scanner.into_diagnostics();
    let constants = scan.constants;

    let mut artifacts = Vec::with_capacity(ArtifactKind::ALL.len());
    let mut push = |kind: ArtifactKind,
                    text: String,
                    diagnostics: &mut Vec<Diagnostic>|
     -> Result<String, TranslateError> {
        let file_name = names.file_name(kind);
        let contents =
            encode::to_seven_bit(&file_name, &text, options.encoding_policy, diagnostics)?;
        debug!(%kind, file = %file_name, bytes = contents.len(), "emitted artifact");
        artifacts.push(Artifact {
            kind,
            file_name: file_name.clone(),
            contents,
        });
        Ok(file_name)
    };

    let constants_header = push(
        ArtifactKind::ConstantsHeader,
        emit::emit_constants_header(&names, &constants),
        &mut diagnostics,
    )?;
    let output_header = push(
        ArtifactKind::OutputHeader,
        emit::emit_output_header(&names, &outputs),
        &mut diagnostics,
    )?;

    let output_struct = names.output_struct();
    let vertex_body =
        rewrite::rewrite_vertex(&pair.vertex, &constants, &inputs, &outputs, &output_struct)?;
    push(
        ArtifactKind::VertexShader,
        emit::emit_vertex_shader(
            &names,
            &constants_header,
            &output_header,
            &inputs,
            &vertex_body,
        ),
        &mut diagnostics,
    )?;

    let samplers = rewrite::bind_samplers(&constants);
    let fragment_body = rewrite::rewrite_fragment(
        &pair.fragment,
        &constants,
        &outputs,
        scan.fragment_output.as_deref(),
        &samplers,
        &output_struct,
    )?;
    if !fragment_body.returns {
        warn!("{}", Diagnostic::MissingFragmentOutput);
        diagnostics.push(Diagnostic::MissingFragmentOutput);
    }
    push(
        ArtifactKind::FragmentShader,
        emit::emit_fragment_shader(
            &names,
            &constants_header,
            &output_header,
            &samplers,
            &fragment_body.text,
        ),
        &mut diagnostics,
    )?;

    Ok(Translation {
        names,
        artifacts,
        constants,
        inputs,
        outputs,
        samplers,
        fragment_output: scan.fragment_output,
        diagnostics,
    })
}

#[derive(Debug)]
pub enum ArtifactStatus {
    Written,
    Failed(WriteFailure),
    /// Not written because a header it includes failed to write.
    Skipped { missing_header: String },
}

#[derive(Debug)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub status: ArtifactStatus,
}

impl ArtifactOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self.status, ArtifactStatus::Written)
    }
}

/// Result of [`run`]: one outcome per artifact, in emission order.
#[derive(Debug)]
pub struct RunReport {
    pub session: ShaderSession,
    pub outcomes: Vec<ArtifactOutcome>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// `true` if all four artifacts were written.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ArtifactOutcome::is_written)
    }

    pub fn outcome(&self, kind: ArtifactKind) -> Option<&ArtifactOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

/// Translate `pair` and persist the artifacts into `sink`.
///
/// Scanning and rewriting errors abort before anything is written. Write failures are reported
/// per artifact; artifacts already written are left in place.
pub fn run(
    pair: &ShaderPair,
    options: &TranslateOptions,
    sink: &mut dyn ArtifactSink,
) -> Result<RunReport, TranslateError> {
    let translation = translate(pair, options)?;
    let mut session = ShaderSession::new(translation.names.clone(), sink.location());
    let mut outcomes = Vec::with_capacity(translation.artifacts.len());

    for artifact in &translation.artifacts {
        let status = match missing_header(&session, artifact.kind) {
            Some(missing_header) => {
                warn!(
                    file = %artifact.file_name,
                    missing = %missing_header,
                    "skipping artifact whose header was not written"
                );
                ArtifactStatus::Skipped { missing_header }
            }
            None => match sink.write(&artifact.file_name, &artifact.contents) {
                Ok(()) => {
                    debug!(
                        file = %artifact.file_name,
                        location = %session.output_location(),
                        "wrote artifact"
                    );
                    session.record(artifact.kind, artifact.file_name.clone());
                    ArtifactStatus::Written
                }
                Err(source) => {
                    let failure = WriteFailure {
                        file_name: artifact.file_name.clone(),
                        source,
                    };
                    warn!("{failure}");
                    ArtifactStatus::Failed(failure)
                }
            },
        };
        outcomes.push(ArtifactOutcome {
            kind: artifact.kind,
            file_name: artifact.file_name.clone(),
            status,
        });
    }

    Ok(RunReport {
        session,
        outcomes,
        diagnostics: translation.diagnostics,
    })
}

fn missing_header(session: &ShaderSession, kind: ArtifactKind) -> Option<String> {
    if kind.is_header() || session.headers_ready() {
        return None;
    }
    [ArtifactKind::ConstantsHeader, ArtifactKind::OutputHeader]
        .into_iter()
        .find(|&header| session.written(header).is_none())
        .map(|header| session.names().file_name(header))
}

/// Manual steps left to the user after a successful run.
pub const INTEGRATION_NOTES: [&str; 3] = [
    "Attach the shader to your program by filling in the shader constants struct and passing it \
     into the constant buffer.",
    "The generated vertex input struct is a guess; change it to match your program's vertex \
     layout and update the shader's references to it.",
    "Matrix-vector products are copied as `*`; replace each one with `mul(matrix, vector)`.",
];

pub fn integration_notes() -> &'static [&'static str] {
    &INTEGRATION_NOTES
}
