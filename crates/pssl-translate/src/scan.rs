//! Line-oriented declaration scanning.
//!
//! The translator does not parse GLSL. A declaration is recognized per line: the line must contain
//! the storage keyword (`uniform`, `in`, `out`), start with it once an optional `layout(...)`
//! prefix is skipped, and then carry a type token and a name token. Every "is this a declaration"
//! and "which kind is it" decision goes through [`classify_line`] so the scanners and the body
//! rewriter agree on what gets lifted out of the source.

use tracing::{debug, trace, warn};

use crate::error::{Diagnostic, TranslateError};
use crate::types::{is_identifier, DeclKind, Declaration, ShaderStage, SYNTHETIC_POSITION_NAME};

/// What to do with a declaration whose type matches none of the known kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypePolicy {
    /// Skip the declaration and record a [`Diagnostic::UnsupportedType`].
    #[default]
    Lenient,
    /// Abort with [`TranslateError::UnsupportedType`].
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Uniform,
    In,
    Out,
}

impl Qualifier {
    pub const ALL: [Qualifier; 3] = [Qualifier::Uniform, Qualifier::In, Qualifier::Out];

    pub fn keyword(self) -> &'static str {
        match self {
            Qualifier::Uniform => "uniform",
            Qualifier::In => "in",
            Qualifier::Out => "out",
        }
    }
}

/// Tokens that may sit between the storage keyword and the type.
const SKIPPED_QUALIFIERS: &[&str] = &[
    "flat",
    "smooth",
    "noperspective",
    "centroid",
    "lowp",
    "mediump",
    "highp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineClass<'a> {
    /// Not a declaration for the requested qualifier.
    Other,
    Declaration {
        type_token: &'a str,
        name: &'a str,
    },
    /// Starts with the qualifier but lacks a type or name token.
    Malformed,
}

impl LineClass<'_> {
    pub(crate) fn is_declaration(&self) -> bool {
        !matches!(self, LineClass::Other)
    }
}

fn strip_layout(line: &str) -> &str {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix("layout") {
        let rest = rest.trim_start();
        if rest.starts_with('(') {
            if let Some(close) = rest.find(')') {
                return &rest[close + 1..];
            }
        }
    }
    trimmed
}

/// Classify one source line against one storage qualifier.
pub(crate) fn classify_line(line: &str, qualifier: Qualifier) -> LineClass<'_> {
    let keyword = qualifier.keyword();
    if !line.contains(keyword) {
        return LineClass::Other;
    }

    let mut tokens = strip_layout(line)
        .split(|c: char| c == ' ' || c == '\t' || c == ';')
        .filter(|t| !t.is_empty());
    if tokens.next() != Some(keyword) {
        return LineClass::Other;
    }
    let mut tokens = tokens.skip_while(|t| SKIPPED_QUALIFIERS.contains(t));
    match (tokens.next(), tokens.next()) {
        (Some(type_token), Some(name)) if is_identifier(name) => {
            LineClass::Declaration { type_token, name }
        }
        _ => LineClass::Malformed,
    }
}

/// `true` for lines the body rewriter must drop: storage declarations and `#version`.
pub(crate) fn is_declaration_line(line: &str) -> bool {
    if line.trim_start().starts_with("#version") {
        return true;
    }
    Qualifier::ALL
        .iter()
        .any(|&q| classify_line(line, q).is_declaration())
}

/// Uniform constants of both stages, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    entries: Vec<Declaration>,
}

impl ConstantTable {
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    /// Constants that live in the constant buffer (everything except samplers).
    pub fn values(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter().filter(|d| !d.kind.is_sampler())
    }

    pub fn samplers(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter().filter(|d| d.kind.is_sampler())
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.entries.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of [`Scanner::scan_constants`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantScan {
    pub constants: ConstantTable,
    /// The fragment stage's `out vec4` variable, first match wins.
    pub fragment_output: Option<String>,
}

/// Vertex-stage `in` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputTable {
    entries: Vec<Declaration>,
}

impl InputTable {
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Vertex-stage `out` declarations.
///
/// There is always exactly one position entry. It is kept apart from the other fields so every
/// generated struct can emit it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    position: Declaration,
    position_synthesized: bool,
    fields: Vec<Declaration>,
}

impl OutputTable {
    pub fn position(&self) -> &Declaration {
        &self.position
    }

    pub fn position_synthesized(&self) -> bool {
        self.position_synthesized
    }

    /// Non-position outputs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Declaration> {
        self.fields.iter()
    }

    /// Position first, then the remaining fields.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        std::iter::once(&self.position).chain(self.fields.iter())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        1 + self.fields.len()
    }
}

/// Declaration scanner for one run. Collects lenient-mode diagnostics as it goes.
#[derive(Debug, Default)]
pub struct Scanner {
    policy: TypePolicy,
    diagnostics: Vec<Diagnostic>,
}

impl Scanner {
    pub fn new(policy: TypePolicy) -> Self {
        Self {
            policy,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Scan `uniform` declarations of the vertex stage, then the fragment stage.
    pub fn scan_constants(
        &mut self,
        frag_src: &str,
        vert_src: &str,
    ) -> Result<ConstantScan, TranslateError> {
        let mut scan = ConstantScan::default();

        for (line_no, line) in numbered_lines(vert_src) {
            if let Some(decl) = self.declaration(
                ShaderStage::Vertex,
                line_no,
                line,
                Qualifier::Uniform,
                &DeclKind::UNIFORM_PRIORITY,
            )? {
                if scan.constants.get(&decl.name).is_none() {
                    scan.constants.entries.push(decl);
                }
            }
        }

        for (line_no, line) in numbered_lines(frag_src) {
            if let Some(decl) = self.declaration(
                ShaderStage::Fragment,
                line_no,
                line,
                Qualifier::Uniform,
                &DeclKind::UNIFORM_PRIORITY,
            )? {
                match scan.constants.get(&decl.name) {
                    None => scan.constants.entries.push(decl),
                    Some(existing) if existing.kind != decl.kind => {
                        let diag = Diagnostic::ConstantKindConflict {
                            name: decl.name.clone(),
                            vertex: existing.kind,
                            fragment: decl.kind,
                            fragment_line: line_no,
                        };
                        warn!("{diag}");
                        self.diagnostics.push(diag);
                    }
                    Some(_) => {}
                }
            }

            if scan.fragment_output.is_none() {
                if let LineClass::Declaration { type_token, name } =
                    classify_line(line, Qualifier::Out)
                {
                    if DeclKind::classify(type_token, &[DeclKind::Vec4]).is_some() {
                        scan.fragment_output = Some(name.to_owned());
                    }
                }
            }
        }

        debug!(
            constants = scan.constants.len(),
            samplers = scan.constants.samplers().count(),
            fragment_output = ?scan.fragment_output,
            "scanned uniform constants"
        );
        Ok(scan)
    }

    /// Scan vertex-stage `in` declarations.
    pub fn scan_inputs(&mut self, vert_src: &str) -> Result<InputTable, TranslateError> {
        let mut inputs = InputTable::default();
        for (line_no, line) in numbered_lines(vert_src) {
            if let Some(decl) = self.declaration(
                ShaderStage::Vertex,
                line_no,
                line,
                Qualifier::In,
                &DeclKind::VARYING_PRIORITY,
            )? {
                inputs.entries.push(decl);
            }
        }
        debug!(inputs = inputs.len(), "scanned vertex inputs");
        Ok(inputs)
    }

    /// Scan vertex-stage `out` declarations, capturing or synthesizing the position output.
    pub fn scan_outputs(&mut self, vert_src: &str) -> Result<OutputTable, TranslateError> {
        let mut position = None;
        let mut fields = Vec::new();

        for (line_no, line) in numbered_lines(vert_src) {
            match classify_line(line, Qualifier::Out) {
                LineClass::Other => {}
                LineClass::Malformed => {
                    return Err(malformed(ShaderStage::Vertex, line_no, line));
                }
                LineClass::Declaration { name, .. }
                    if position.is_none() && name.contains(SYNTHETIC_POSITION_NAME) =>
                {
                    position = Some(Declaration::new(DeclKind::Vec4, name, line_no));
                }
                LineClass::Declaration { type_token, name } => {
                    if let Some(kind) = self.kind_of(
                        ShaderStage::Vertex,
                        line_no,
                        type_token,
                        &DeclKind::VARYING_PRIORITY,
                    )? {
                        fields.push(Declaration::new(kind, name, line_no));
                    }
                }
            }
        }

        let position_synthesized = position.is_none();
        let position = position
            .unwrap_or_else(|| Declaration::new(DeclKind::Vec4, SYNTHETIC_POSITION_NAME, 0));
        debug!(
            outputs = fields.len() + 1,
            position = %position.name,
            position_synthesized,
            "scanned vertex outputs"
        );
        Ok(OutputTable {
            position,
            position_synthesized,
            fields,
        })
    }

    fn declaration(
        &mut self,
        stage: ShaderStage,
        line_no: usize,
        line: &str,
        qualifier: Qualifier,
        kinds: &[DeclKind],
    ) -> Result<Option<Declaration>, TranslateError> {
        match classify_line(line, qualifier) {
            LineClass::Other => {
                if line.contains(qualifier.keyword()) {
                    trace!(%stage, line_no, qualifier = qualifier.keyword(), "not a declaration");
                }
                Ok(None)
            }
            LineClass::Malformed => Err(malformed(stage, line_no, line)),
            LineClass::Declaration { type_token, name } => Ok(self
                .kind_of(stage, line_no, type_token, kinds)?
                .map(|kind| Declaration::new(kind, name, line_no))),
        }
    }

    fn kind_of(
        &mut self,
        stage: ShaderStage,
        line: usize,
        type_token: &str,
        kinds: &[DeclKind],
    ) -> Result<Option<DeclKind>, TranslateError> {
        if let Some(kind) = DeclKind::classify(type_token, kinds) {
            return Ok(Some(kind));
        }
        match self.policy {
            TypePolicy::Strict => Err(TranslateError::UnsupportedType {
                stage,
                line,
                type_token: type_token.to_owned(),
            }),
            TypePolicy::Lenient => {
                let diag = Diagnostic::UnsupportedType {
                    stage,
                    line,
                    type_token: type_token.to_owned(),
                };
                warn!("{diag}");
                self.diagnostics.push(diag);
                Ok(None)
            }
        }
    }
}

fn malformed(stage: ShaderStage, line: usize, text: &str) -> TranslateError {
    TranslateError::MalformedDeclaration {
        stage,
        line,
        text: text.trim().to_owned(),
    }
}

/// Source lines paired with their 1-based line numbers.
pub(crate) fn numbered_lines(src: &str) -> impl Iterator<Item = (usize, &str)> {
    src.lines().enumerate().map(|(i, line)| (i + 1, line))
}
