//! Per-run naming state.
//!
//! A [`ShaderSession`] lives for exactly one run. Header file names are only recorded once the
//! header has actually been written, which is what lets the orchestrator refuse to emit a shader
//! that would `#include` a file that does not exist.

use std::fmt;

use crate::error::TranslateError;
use crate::types::is_identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    ConstantsHeader,
    OutputHeader,
    VertexShader,
    FragmentShader,
}

impl ArtifactKind {
    /// Emission order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::ConstantsHeader,
        ArtifactKind::OutputHeader,
        ArtifactKind::VertexShader,
        ArtifactKind::FragmentShader,
    ];

    pub fn is_header(self) -> bool {
        matches!(
            self,
            ArtifactKind::ConstantsHeader | ArtifactKind::OutputHeader
        )
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::ConstantsHeader => "constants header",
            ArtifactKind::OutputHeader => "output struct header",
            ArtifactKind::VertexShader => "vertex shader",
            ArtifactKind::FragmentShader => "pixel shader",
        })
    }
}

/// Validated shader name and everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderNames {
    name: String,
}

impl ShaderNames {
    pub fn new(name: &str) -> Result<Self, TranslateError> {
        if !is_identifier(name) {
            return Err(TranslateError::InvalidShaderName {
                name: name.to_owned(),
            });
        }
        Ok(Self {
            name: name.to_owned(),
        })
    }

    pub fn shader_name(&self) -> &str {
        &self.name
    }

    pub fn constants_struct(&self) -> String {
        format!("{}ShaderConstants", self.name)
    }

    pub fn output_struct(&self) -> String {
        format!("{}VSOutput", self.name)
    }

    pub fn constants_guard(&self) -> String {
        format!("__{}_SHADER_CONSTANTS__", self.name.to_ascii_uppercase())
    }

    pub fn output_guard(&self) -> String {
        format!("__{}_VS_OUTPUT__", self.name.to_ascii_uppercase())
    }

    pub fn file_name(&self, kind: ArtifactKind) -> String {
        match kind {
            ArtifactKind::ConstantsHeader => format!("{}ShaderConstants.h", self.name),
            ArtifactKind::OutputHeader => format!("{}VSOutput.hs", self.name),
            ArtifactKind::VertexShader => format!("{}_vv.pssl", self.name),
            ArtifactKind::FragmentShader => format!("{}_p.pssl", self.name),
        }
    }
}

/// Naming state threaded through one run.
#[derive(Debug, Clone)]
pub struct ShaderSession {
    names: ShaderNames,
    output_location: String,
    written: Vec<(ArtifactKind, String)>,
}

impl ShaderSession {
    pub fn new(names: ShaderNames, output_location: impl Into<String>) -> Self {
        Self {
            names,
            output_location: output_location.into(),
            written: Vec::new(),
        }
    }

    pub fn names(&self) -> &ShaderNames {
        &self.names
    }

    pub fn output_location(&self) -> &str {
        &self.output_location
    }

    pub fn record(&mut self, kind: ArtifactKind, file_name: impl Into<String>) {
        self.written.push((kind, file_name.into()));
    }

    /// File name of a successfully written artifact.
    pub fn written(&self, kind: ArtifactKind) -> Option<&str> {
        self.written
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, name)| name.as_str())
    }

    /// `true` once both headers exist at the destination.
    pub fn headers_ready(&self) -> bool {
        self.written(ArtifactKind::ConstantsHeader).is_some()
            && self.written(ArtifactKind::OutputHeader).is_some()
    }

    pub fn written_files(&self) -> impl Iterator<Item = &str> {
        self.written.iter().map(|(_, name)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names() {
        let names = ShaderNames::new("Toon").unwrap();
        assert_eq!(names.constants_struct(), "ToonShaderConstants");
        assert_eq!(names.output_struct(), "ToonVSOutput");
        assert_eq!(names.constants_guard(), "__TOON_SHADER_CONSTANTS__");
        assert_eq!(names.output_guard(), "__TOON_VS_OUTPUT__");
        let files = ArtifactKind::ALL.map(|kind| names.file_name(kind));
        assert_eq!(
            files,
            [
                "ToonShaderConstants.h",
                "ToonVSOutput.hs",
                "Toon_vv.pssl",
                "Toon_p.pssl",
            ]
        );
    }

    #[test]
    fn rejects_non_identifier_names() {
        assert_eq!(
            ShaderNames::new("My Shader"),
            Err(TranslateError::InvalidShaderName {
                name: "My Shader".into()
            })
        );
    }

    #[test]
    fn headers_ready_requires_both() {
        let mut session = ShaderSession::new(ShaderNames::new("T").unwrap(), "<memory>");
        assert!(!session.headers_ready());
        session.record(ArtifactKind::ConstantsHeader, "TShaderConstants.h");
        assert!(!session.headers_ready());
        session.record(ArtifactKind::OutputHeader, "TVSOutput.hs");
        assert!(session.headers_ready());
    }
}
