//! Source-dialect declaration kinds and their PSSL mapping.

use std::fmt;

/// Semantic attached to the clip-space position field, whatever its declared name.
pub const POSITION_SEMANTIC: &str = "S_POSITION";

/// Semantic attached to the fragment entry point's return value.
pub const TARGET_OUTPUT_SEMANTIC: &str = "S_TARGET_OUTPUT";

/// Name given to the position output when the vertex source declares none.
pub const SYNTHETIC_POSITION_NAME: &str = "Position";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Primitive kinds the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
    Sampler2D,
}

impl DeclKind {
    /// Classification order for `uniform` type tokens.
    ///
    /// Matching is by substring, so the order matters: `vec2` is tested before `float`, and so on.
    pub const UNIFORM_PRIORITY: [DeclKind; 6] = [
        DeclKind::Vec2,
        DeclKind::Vec3,
        DeclKind::Vec4,
        DeclKind::Mat4,
        DeclKind::Float,
        DeclKind::Sampler2D,
    ];

    /// Classification order for `in`/`out` type tokens (no matrices, no samplers).
    pub const VARYING_PRIORITY: [DeclKind; 4] = [
        DeclKind::Float,
        DeclKind::Vec2,
        DeclKind::Vec3,
        DeclKind::Vec4,
    ];

    /// Source-dialect keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            DeclKind::Float => "float",
            DeclKind::Vec2 => "vec2",
            DeclKind::Vec3 => "vec3",
            DeclKind::Vec4 => "vec4",
            DeclKind::Mat4 => "mat4",
            DeclKind::Sampler2D => "sampler2D",
        }
    }

    /// Classify a type token by substring match against `candidates`, first match wins.
    pub fn classify(type_token: &str, candidates: &[DeclKind]) -> Option<DeclKind> {
        candidates
            .iter()
            .copied()
            .find(|kind| type_token.contains(kind.keyword()))
    }

    /// PSSL type used for struct fields and unpacked locals.
    pub fn target_type(self) -> &'static str {
        match self {
            DeclKind::Float => "float",
            DeclKind::Vec2 => "float2",
            DeclKind::Vec3 => "float3",
            DeclKind::Vec4 => "float4",
            DeclKind::Mat4 => "matrix",
            DeclKind::Sampler2D => "Texture2D",
        }
    }

    /// Field type inside the `unistruct` constant buffer.
    ///
    /// Scalars and short vectors occupy a full 16-byte slot. Samplers are bound through
    /// registers and never appear in the constant buffer.
    pub fn constant_field_type(self) -> Option<&'static str> {
        match self {
            DeclKind::Mat4 => Some("Matrix4Unaligned"),
            DeclKind::Float | DeclKind::Vec2 | DeclKind::Vec3 | DeclKind::Vec4 => {
                Some("Vector4Unaligned")
            }
            DeclKind::Sampler2D => None,
        }
    }

    /// Channels of a 4-wide constant slot left unused by this kind.
    pub fn unused_channels(self) -> Option<&'static str> {
        match self {
            DeclKind::Float => Some("y, z and w"),
            DeclKind::Vec2 => Some("z and w"),
            DeclKind::Vec3 => Some("w"),
            DeclKind::Vec4 | DeclKind::Mat4 | DeclKind::Sampler2D => None,
        }
    }

    /// Expression reading this kind back out of its packed constant-buffer field.
    pub fn unpack_expr(self, field: &str) -> Option<String> {
        match self {
            DeclKind::Float => Some(format!("{field}.x")),
            DeclKind::Vec2 => Some(format!("float2({field}.xy)")),
            DeclKind::Vec3 => Some(format!("float3({field}.xyz)")),
            DeclKind::Vec4 | DeclKind::Mat4 => Some(field.to_owned()),
            DeclKind::Sampler2D => None,
        }
    }

    pub fn is_sampler(self) -> bool {
        self == DeclKind::Sampler2D
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One `uniform`/`in`/`out` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// 1-based source line, `0` for synthesized entries.
    pub line: usize,
}

impl Declaration {
    pub fn new(kind: DeclKind, name: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            line,
        }
    }

    /// `(target type, semantic)` pair for a struct field.
    pub fn field_mapping(&self) -> (&'static str, String) {
        (self.kind.target_type(), semantic_tag(&self.name))
    }
}

/// Semantic tag for a non-position field: the uppercased name with a leading `M_` removed.
pub fn semantic_tag(name: &str) -> String {
    let upper = name.to_ascii_uppercase();
    match upper.strip_prefix("M_") {
        Some(rest) if !rest.is_empty() => rest.to_owned(),
        _ => upper,
    }
}

/// `true` if `s` is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
