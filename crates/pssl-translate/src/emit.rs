//! Fixed templates for the four generated artifacts.

use std::fmt::Write;

use crate::rewrite::{constant_field, SamplerBinding, VERTEX_INPUT_STRUCT};
use crate::scan::{ConstantTable, InputTable, OutputTable};
use crate::session::ShaderNames;
use crate::types::POSITION_SEMANTIC;

/// `<Name>ShaderConstants.h`: the `unistruct` constant buffer.
pub fn emit_constants_header(names: &ShaderNames, constants: &ConstantTable) -> String {
    let guard = names.constants_guard();
    let mut out = String::new();
    let _ = writeln!(out, "// {} Shader Constants", names.shader_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}");
    let _ = writeln!(out);
    let _ = writeln!(out, "unistruct {}", names.constants_struct());
    let _ = writeln!(out, "{{");
    for decl in constants.values() {
        let Some(field_ty) = decl.kind.constant_field_type() else {
            continue;
        };
        if let Some(unused) = decl.kind.unused_channels() {
            let verb = if unused.contains(' ') { "are" } else { "is" };
            let _ = writeln!(out, "\t// {unused} {verb} not used.");
        }
        let _ = writeln!(out, "\t{field_ty} {};", constant_field(&decl.name));
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);
    let _ = writeln!(out, "#endif");
    out
}

/// `<Name>VSOutput.hs`: the struct passed from the vertex to the pixel stage.
pub fn emit_output_header(names: &ShaderNames, outputs: &OutputTable) -> String {
    let guard = names.output_guard();
    let mut out = String::new();
    let _ = writeln!(out, "// {} Shader Output", names.shader_name());
    let _ = writeln!(out);
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}");
    let _ = writeln!(out);
    let _ = writeln!(out, "struct {}", names.output_struct());
    let _ = writeln!(out, "{{");
    let position = outputs.position();
    let _ = writeln!(
        out,
        "\t{} {}\t: {POSITION_SEMANTIC};",
        position.kind.target_type(),
        position.name
    );
    for decl in outputs.fields() {
        let (ty, semantic) = decl.field_mapping();
        let _ = writeln!(out, "\t{ty} {}\t: {semantic};", decl.name);
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);
    let _ = writeln!(out, "#endif");
    out
}

fn write_includes(out: &mut String, constants_header: &str, output_header: &str) {
    let _ = writeln!(out, "#include \"{constants_header}\"");
    let _ = writeln!(out, "#include \"{output_header}\"");
    let _ = writeln!(out);
}

/// `<Name>_vv.pssl`: input struct plus the rewritten vertex entry point.
pub fn emit_vertex_shader(
    names: &ShaderNames,
    constants_header: &str,
    output_header: &str,
    inputs: &InputTable,
    body: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// {} Vertex Shader", names.shader_name());
    write_includes(&mut out, constants_header, output_header);
    let _ = writeln!(
        out,
        "// Replace this struct with one matching your program's vertex layout."
    );
    let _ = writeln!(out, "struct {VERTEX_INPUT_STRUCT}");
    let _ = writeln!(out, "{{");
    for decl in inputs.iter() {
        let (ty, semantic) = decl.field_mapping();
        let _ = writeln!(out, "\t{ty} {}\t: {semantic};", decl.name);
    }
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);
    out.push_str(body);
    out
}

/// `<Name>_p.pssl`: sampler/texture registers plus the rewritten pixel entry point.
pub fn emit_fragment_shader(
    names: &ShaderNames,
    constants_header: &str,
    output_header: &str,
    samplers: &[SamplerBinding],
    body: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// {} Pixel Shader", names.shader_name());
    write_includes(&mut out, constants_header, output_header);
    for binding in samplers {
        let _ = writeln!(
            out,
            "SamplerState {} : register(s{});",
            binding.sampler_register, binding.slot
        );
        let _ = writeln!(
            out,
            "Texture2D {} : register(t{});",
            binding.texture_register, binding.slot
        );
    }
    if !samplers.is_empty() {
        let _ = writeln!(out);
    }
    out.push_str(body);
    out
}
