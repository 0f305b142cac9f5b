//! `main` body extraction and rewriting for both stages.
//!
//! Every identifier is rewritten at most once, in a single tokenized pass over each source line.
//! Rules are tried in a fixed order and the first match wins:
//!
//! | stage    | rule                                                   | result                  |
//! |----------|--------------------------------------------------------|-------------------------|
//! | vertex   | output (or `gl_Position`) used as an assignment target | `l_output.<name>`       |
//! | both     | non-sampler uniform                                    | `l_<name>`              |
//! | vertex   | vertex input                                           | `_input.<name>`         |
//! | fragment | vertex output (the fragment stage's input)             | `_input.<name>`         |
//! | fragment | `texture(<sampler>` / `texture2D(<sampler>`            | `<tex>.Sample(<reg>`    |
//! | both     | `vec2`/`vec3`/`vec4`                                   | `float2`/`3`/`4`        |
//!
//! Identifiers reached through `.` (member and swizzle access) are never rewritten.
//!
//! Locating the end of `main` relies on raw brace counting. This is only correct for the supported
//! dialect subset: no string literals, and no braces inside comments.

use std::collections::HashSet;
use std::ops::Range;

use tracing::debug;

use crate::error::TranslateError;
use crate::lex::{self, Token, TokenKind};
use crate::scan::{self, ConstantTable, InputTable, OutputTable};
use crate::types::{ShaderStage, TARGET_OUTPUT_SEMANTIC};

/// Name of the vertex stage's local output struct variable.
pub const OUTPUT_LOCAL: &str = "l_output";
/// Name of the entry point's input parameter in both stages.
pub const INPUT_PARAM: &str = "_input";
/// Name of the vertex input struct.
pub const VERTEX_INPUT_STRUCT: &str = "ptVSInput";

/// Local variable holding an unpacked constant.
pub fn local_name(constant: &str) -> String {
    format!("l_{constant}")
}

/// Constant-buffer field backing a constant.
pub fn constant_field(constant: &str) -> String {
    format!("shc_{constant}")
}

/// Register pair assigned to one `sampler2D` uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerBinding {
    /// Declared sampler name in the source.
    pub name: String,
    pub slot: u32,
    pub sampler_register: String,
    pub texture_register: String,
}

/// Assign register slots to samplers in discovery order, starting at 0.
pub fn bind_samplers(constants: &ConstantTable) -> Vec<SamplerBinding> {
    constants
        .samplers()
        .zip(0u32..)
        .map(|(decl, slot)| SamplerBinding {
            name: decl.name.clone(),
            slot,
            sampler_register: format!("l_{}{}", decl.name, slot),
            texture_register: format!("l_{}ColorMap", decl.name),
        })
        .collect()
}

/// One local per non-sampler constant, reading it back out of its packed 4-wide slot.
pub fn unpack_constants(constants: &ConstantTable) -> Vec<String> {
    constants
        .values()
        .filter_map(|decl| {
            let expr = decl.kind.unpack_expr(&constant_field(&decl.name))?;
            Some(format!(
                "\t{} {} = {};",
                decl.kind.target_type(),
                local_name(&decl.name),
                expr
            ))
        })
        .collect()
}

/// A line of the synthesized body.
#[derive(Debug, Clone)]
enum BodyLine {
    /// Emitted verbatim.
    Template(String),
    /// Taken from the source; goes through the rewrite pass.
    Source(String),
}

impl BodyLine {
    fn source(text: &str) -> Self {
        BodyLine::Source(text.to_owned())
    }
}

/// Source split around the `main` signature, with declaration lines removed.
struct MainSplit<'a> {
    /// Retained lines before the signature.
    preamble: Vec<&'a str>,
    /// Text after the opening brace on the brace's own line.
    opening_rest: &'a str,
    /// Retained lines after the opening brace line, with their line numbers.
    rest: Vec<(usize, &'a str)>,
    main_line: usize,
}

/// `main` split at its closing brace.
struct MainBody<'a> {
    /// Text inside `main`, one entry per source line. The first entry is the remainder of the
    /// opening brace's line and the last is the text before the closing brace.
    inner: Vec<&'a str>,
    /// The rest of the closing brace's line, then every following line.
    after: Vec<&'a str>,
}

fn is_main_call(tokens: &[Token<'_>], i: usize) -> bool {
    let tok = &tokens[i];
    if tok.kind != TokenKind::Ident || tok.text != "main" {
        return false;
    }
    let prev = lex::prev_significant(tokens, i).map(|p| tokens[p].text);
    let next = lex::next_significant(tokens, i).map(|n| tokens[n].text);
    prev == Some("void") && next == Some("(")
}

fn is_main_signature(line: &str) -> Option<usize> {
    let tokens = lex::tokenize(line);
    let main = (0..tokens.len()).find(|&i| is_main_call(&tokens, i))?;
    let open = lex::next_significant(&tokens, main)?;
    let close = (open..tokens.len()).find(|&j| tokens[j].text == ")")?;
    Some(tokens[close].offset + 1)
}

/// Blank and `//` comment lines may sit between the signature and the opening brace.
fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("//")
}

fn split_main(src: &str, stage: ShaderStage) -> Result<MainSplit<'_>, TranslateError> {
    let retained: Vec<(usize, &str)> = scan::numbered_lines(src)
        .filter(|(_, line)| !scan::is_declaration_line(line))
        .collect();

    let (sig_idx, sig_end) = retained
        .iter()
        .enumerate()
        .find_map(|(idx, (_, line))| is_main_signature(line).map(|end| (idx, end)))
        .ok_or(TranslateError::MissingMainFunction { stage })?;
    let main_line = retained[sig_idx].0;
    let unbalanced = TranslateError::UnbalancedBraces {
        stage,
        line: main_line,
    };

    let after_sig = &retained[sig_idx].1[sig_end..];
    let (opening_rest, rest_start) = match after_sig.find('{') {
        Some(brace) => (&after_sig[brace + 1..], sig_idx + 1),
        None => {
            let brace_idx = retained[sig_idx + 1..]
                .iter()
                .position(|(_, line)| !is_blank_or_comment(line))
                .map(|off| sig_idx + 1 + off)
                .ok_or_else(|| unbalanced.clone())?;
            let line = retained[brace_idx].1;
            let brace = line.len() - line.trim_start().len();
            if !line[brace..].starts_with('{') {
                return Err(unbalanced);
            }
            (&line[brace + 1..], brace_idx + 1)
        }
    };

    Ok(MainSplit {
        preamble: retained[..sig_idx].iter().map(|(_, l)| *l).collect(),
        opening_rest,
        rest: retained[rest_start..].to_vec(),
        main_line,
    })
}

/// Follow brace depth from `main`'s opening brace to its matching closing brace.
fn close_main<'a>(
    split: &MainSplit<'a>,
    stage: ShaderStage,
) -> Result<MainBody<'a>, TranslateError> {
    let mut lines = std::iter::once(split.opening_rest)
        .chain(split.rest.iter().map(|(_, line)| *line));
    let mut depth = 1i32;
    let mut inner = Vec::new();

    while let Some(line) = lines.next() {
        let close_at = line.char_indices().find_map(|(idx, c)| {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            (depth == 0).then_some(idx)
        });
        if let Some(idx) = close_at {
            inner.push(&line[..idx]);
            let mut after = vec![&line[idx + 1..]];
            after.extend(lines.by_ref());
            return Ok(MainBody { inner, after });
        }
        inner.push(line);
    }

    Err(TranslateError::UnbalancedBraces {
        stage,
        line: split.main_line,
    })
}

/// Retained preamble, without the blank lines left behind by removed declarations at its top.
fn preamble_lines(split: &MainSplit<'_>) -> Vec<BodyLine> {
    let start = split
        .preamble
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(split.preamble.len());
    split.preamble[start..]
        .iter()
        .map(|l| BodyLine::source(l))
        .collect()
}

fn push_unpack_block(body: &mut Vec<BodyLine>, constants: &ConstantTable) {
    let unpacked = unpack_constants(constants);
    if unpacked.is_empty() {
        return;
    }
    body.push(BodyLine::Template(String::new()));
    body.extend(unpacked.into_iter().map(BodyLine::Template));
    body.push(BodyLine::Template(String::new()));
}

/// Blank source lines directly after the synthesized header are dropped.
fn body_is_fresh(body: &[BodyLine]) -> bool {
    matches!(body.last(), Some(BodyLine::Template(_)))
}

/// Append the text inside `main`. A blank remainder before the closing brace is dropped.
fn push_inner(body: &mut Vec<BodyLine>, inner: &[&str]) {
    let last = inner.len().saturating_sub(1);
    for (i, line) in inner.iter().enumerate() {
        let blank = line.trim().is_empty();
        if blank && (i == last || body_is_fresh(body)) {
            continue;
        }
        body.push(BodyLine::source(line));
    }
}

/// Append everything after `main`'s closing brace.
fn push_after(body: &mut Vec<BodyLine>, after: &[&str]) {
    for (i, line) in after.iter().enumerate() {
        if i > 0 || !line.trim().is_empty() {
            body.push(BodyLine::source(line));
        }
    }
}

/// Identifier-level rewrite rules for one stage.
struct Renamer<'a> {
    stage: ShaderStage,
    constants: HashSet<&'a str>,
    inputs: HashSet<&'a str>,
    outputs: HashSet<&'a str>,
    position: &'a str,
    samplers: &'a [SamplerBinding],
}

impl<'a> Renamer<'a> {
    fn rewrite_line(&self, line: &str) -> String {
        let tokens = lex::tokenize(line);
        let mut out = String::with_capacity(line.len() + 16);
        let mut skip_to = 0;

        for (i, tok) in tokens.iter().enumerate() {
            if i < skip_to {
                continue;
            }
            if tok.kind != TokenKind::Ident || is_member_access(&tokens, i) {
                out.push_str(tok.text);
                continue;
            }

            if self.stage == ShaderStage::Fragment {
                if let Some((replacement, resume)) = self.sampler_call(&tokens, i) {
                    out.push_str(&replacement);
                    skip_to = resume;
                    continue;
                }
            }

            match self.rename(&tokens, i) {
                Some(renamed) => out.push_str(&renamed),
                None => out.push_str(tok.text),
            }
        }
        out
    }

    fn rename(&self, tokens: &[Token<'_>], i: usize) -> Option<String> {
        let name = tokens[i].text;
        let vertex = self.stage == ShaderStage::Vertex;

        if vertex && (self.outputs.contains(name) || name == "gl_Position") {
            let next = lex::next_significant(tokens, i);
            if next.is_some_and(|n| lex::is_assign(tokens, n)) {
                let field = if name == "gl_Position" {
                    self.position
                } else {
                    name
                };
                return Some(format!("{OUTPUT_LOCAL}.{field}"));
            }
        }
        if self.constants.contains(name) {
            return Some(local_name(name));
        }
        if vertex && self.inputs.contains(name) {
            return Some(format!("{INPUT_PARAM}.{name}"));
        }
        if !vertex && self.outputs.contains(name) {
            return Some(format!("{INPUT_PARAM}.{name}"));
        }
        vector_keyword(name).map(str::to_owned)
    }

    /// `texture(Tex, uv)` → `l_TexColorMap.Sample(l_Tex0, uv)`.
    fn sampler_call(&self, tokens: &[Token<'_>], i: usize) -> Option<(String, usize)> {
        if !matches!(tokens[i].text, "texture" | "texture2D") {
            return None;
        }
        let open = lex::next_significant(tokens, i)?;
        if tokens[open].text != "(" {
            return None;
        }
        let arg = lex::next_significant(tokens, open)?;
        let binding = self.samplers.iter().find(|b| b.name == tokens[arg].text)?;

        let mut replacement = format!("{}.Sample", binding.texture_register);
        for tok in &tokens[i + 1..arg] {
            replacement.push_str(tok.text);
        }
        replacement.push_str(&binding.sampler_register);
        Some((replacement, arg + 1))
    }
}

fn is_member_access(tokens: &[Token<'_>], i: usize) -> bool {
    lex::prev_significant(tokens, i).is_some_and(|p| tokens[p].text == ".")
}

fn vector_keyword(name: &str) -> Option<&'static str> {
    match name {
        "vec2" => Some("float2"),
        "vec3" => Some("float3"),
        "vec4" => Some("float4"),
        _ => None,
    }
}

fn render(body: &[BodyLine], renamer: &Renamer<'_>) -> Vec<String> {
    body.iter()
        .map(|line| match line {
            BodyLine::Template(text) => text.clone(),
            BodyLine::Source(text) => renamer.rewrite_line(text),
        })
        .collect()
}

/// Rewrite the vertex stage into a function returning `<output_struct>`.
pub fn rewrite_vertex(
    vert_src: &str,
    constants: &ConstantTable,
    inputs: &InputTable,
    outputs: &OutputTable,
    output_struct: &str,
) -> Result<String, TranslateError> {
    let stage = ShaderStage::Vertex;
    let split = split_main(vert_src, stage)?;
    let main = close_main(&split, stage)?;

    let header = format!("{output_struct} main({VERTEX_INPUT_STRUCT} {INPUT_PARAM})");
    let local = format!("\t{output_struct} {OUTPUT_LOCAL};");
    let mut body = preamble_lines(&split);
    body.push(BodyLine::Template(header));
    body.push(BodyLine::Template("{".to_owned()));
    body.push(BodyLine::Template(local));
    push_unpack_block(&mut body, constants);
    push_inner(&mut body, &main.inner);
    body.push(BodyLine::Template(format!("\treturn {OUTPUT_LOCAL};")));
    body.push(BodyLine::Template("}".to_owned()));
    push_after(&mut body, &main.after);

    let renamer = Renamer {
        stage,
        constants: constants.values().map(|d| d.name.as_str()).collect(),
        inputs: inputs.iter().map(|d| d.name.as_str()).collect(),
        outputs: outputs.iter().map(|d| d.name.as_str()).collect(),
        position: outputs.position().name.as_str(),
        samplers: &[],
    };
    let rendered = render(&body, &renamer);
    debug!(lines = rendered.len(), "rewrote vertex body");
    Ok(join_lines(&rendered))
}

/// Rewritten fragment stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentBody {
    pub text: String,
    /// `false` when the fragment output is never assigned, so no `return` was emitted.
    pub returns: bool,
}

/// Rewrite the fragment stage into a function returning `float4 : S_TARGET_OUTPUT`.
pub fn rewrite_fragment(
    frag_src: &str,
    constants: &ConstantTable,
    outputs: &OutputTable,
    fragment_output: Option<&str>,
    samplers: &[SamplerBinding],
    output_struct: &str,
) -> Result<FragmentBody, TranslateError> {
    let stage = ShaderStage::Fragment;
    let split = split_main(frag_src, stage)?;
    let main = close_main(&split, stage)?;

    let header = format!("float4 main({output_struct} {INPUT_PARAM}) : {TARGET_OUTPUT_SEMANTIC}");
    let mut body = preamble_lines(&split);
    body.push(BodyLine::Template(header));
    body.push(BodyLine::Template("{".to_owned()));
    push_unpack_block(&mut body, constants);
    let main_start = body.len();
    push_inner(&mut body, &main.inner);
    let main_end = body.len();
    body.push(BodyLine::Template("}".to_owned()));
    push_after(&mut body, &main.after);

    let renamer = Renamer {
        stage,
        constants: constants.values().map(|d| d.name.as_str()).collect(),
        inputs: HashSet::new(),
        outputs: outputs.iter().map(|d| d.name.as_str()).collect(),
        position: outputs.position().name.as_str(),
        samplers,
    };
    let mut rendered = render(&body, &renamer);
    let returns = match fragment_output {
        Some(name) => return_output(&mut rendered, main_start..main_end, name),
        None => false,
    };

    debug!(lines = rendered.len(), returns, "rewrote fragment body");
    Ok(FragmentBody {
        text: join_lines(&rendered),
        returns,
    })
}

/// Make the fragment output the function's result.
///
/// A lone top-level assignment becomes `return <value>;`. Any other shape (several writes, a read,
/// a write inside a nested block) turns the output into a `float4` local that is returned after
/// the last line of `main`, so every path reaches a `return`.
fn return_output(lines: &mut Vec<String>, main: Range<usize>, name: &str) -> bool {
    let mut depth = 1;
    let mut uses = 0;
    let mut assignments = Vec::new();
    for i in main.clone() {
        let line = &lines[i];
        if let Some((offset, _)) = assignment_target_offset(line, name) {
            assignments.push((i, depth + brace_delta(&line[..offset])));
        }
        uses += count_uses(line, name);
        depth += brace_delta(line);
    }

    match assignments.as_slice() {
        [] => false,
        [(i, 1)] if uses == 1 => {
            lines[*i] = to_return(&lines[*i], name);
            true
        }
        _ => {
            lines.insert(main.end, format!("\treturn {name};"));
            lines.insert(main.start, format!("\tfloat4 {name};"));
            true
        }
    }
}

fn brace_delta(text: &str) -> i32 {
    let opens = text.matches('{').count() as i32;
    let closes = text.matches('}').count() as i32;
    opens - closes
}

/// Byte offsets of `name` in `line` and of the assigned value, when `name` is assigned to.
fn assignment_target_offset(line: &str, name: &str) -> Option<(usize, usize)> {
    let tokens = lex::tokenize(line);
    (0..tokens.len()).rev().find_map(|i| {
        let tok = &tokens[i];
        if tok.kind != TokenKind::Ident || tok.text != name || is_member_access(&tokens, i) {
            return None;
        }
        let eq = lex::next_significant(&tokens, i)?;
        if !lex::is_assign(&tokens, eq) {
            return None;
        }
        let value = lex::next_significant(&tokens, eq).map_or(line.len(), |v| tokens[v].offset);
        Some((tok.offset, value))
    })
}

fn count_uses(line: &str, name: &str) -> usize {
    let tokens = lex::tokenize(line);
    (0..tokens.len())
        .filter(|&i| {
            tokens[i].kind == TokenKind::Ident
                && tokens[i].text == name
                && !is_member_access(&tokens, i)
        })
        .count()
}

fn to_return(line: &str, name: &str) -> String {
    match assignment_target_offset(line, name) {
        Some((start, value)) => format!("{}return {}", &line[..start], &line[value..]),
        None => line.to_owned(),
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Scanner;

    type Tables = (ConstantTable, InputTable, OutputTable, Option<String>);

    fn tables(vert: &str, frag: &str) -> Tables {
        let mut scanner = Scanner::default();
        let scan = scanner.scan_constants(frag, vert).unwrap();
        let inputs = scanner.scan_inputs(vert).unwrap();
        let outputs = scanner.scan_outputs(vert).unwrap();
        (scan.constants, inputs, outputs, scan.fragment_output)
    }

    fn fragment(frag: &str) -> FragmentBody {
        let (c, _, o, fout) = tables("void main()\n{\n}\n", frag);
        rewrite_fragment(frag, &c, &o, fout.as_deref(), &[], "TVSOutput").unwrap()
    }

    #[test]
    fn sampler_slots_follow_discovery_order() {
        let (constants, ..) = tables(
            "uniform sampler2D Diffuse;\nvoid main()\n{\n}\n",
            "uniform sampler2D Diffuse;\nuniform sampler2D Normal;\n",
        );
        let bindings = bind_samplers(&constants);
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].slot, 0);
        assert_eq!(bindings[0].sampler_register, "l_Diffuse0");
        assert_eq!(bindings[1].slot, 1);
        assert_eq!(bindings[1].texture_register, "l_NormalColorMap");
    }

    #[test]
    fn unpack_skips_samplers() {
        let vert = "\
uniform float Time;
uniform vec2 Offset;
uniform sampler2D Tex;
uniform mat4 Projection;
";
        let (constants, ..) = tables(vert, "");
        assert_eq!(
            unpack_constants(&constants),
            [
                "\tfloat l_Time = shc_Time.x;",
                "\tfloat2 l_Offset = float2(shc_Offset.xy);",
                "\tmatrix l_Projection = shc_Projection;",
            ]
        );
    }

    #[test]
    fn vertex_missing_main_is_an_error() {
        let src = "uniform mat4 Projection;\n";
        let (c, i, o, _) = tables(src, "");
        let err = rewrite_vertex(src, &c, &i, &o, "TVSOutput").unwrap_err();
        assert_eq!(
            err,
            TranslateError::MissingMainFunction {
                stage: ShaderStage::Vertex
            }
        );
    }

    #[test]
    fn vertex_unclosed_main_is_an_error() {
        let src = "void main()\n{\n    if (true) {\n}\n";
        let (c, i, o, _) = tables(src, "");
        assert!(matches!(
            rewrite_vertex(src, &c, &i, &o, "TVSOutput"),
            Err(TranslateError::UnbalancedBraces { line: 1, .. })
        ));
    }

    #[test]
    fn comment_between_signature_and_brace_is_skipped() {
        let src = "void main()\n// entry point\n\n{\n}\n";
        let (c, i, o, _) = tables(src, "");
        let body = rewrite_vertex(src, &c, &i, &o, "TVSOutput").unwrap();
        assert_eq!(
            body,
            "TVSOutput main(ptVSInput _input)\n{\n\tTVSOutput l_output;\n\treturn l_output;\n}\n"
        );
    }

    #[test]
    fn statement_before_opening_brace_is_an_error() {
        let src = "void main()\nint x;\n{\n}\n";
        let (c, i, o, _) = tables(src, "");
        assert!(matches!(
            rewrite_vertex(src, &c, &i, &o, "TVSOutput"),
            Err(TranslateError::UnbalancedBraces { line: 1, .. })
        ));
    }

    #[test]
    fn vertex_epilogue_keeps_statement_before_brace() {
        let src = "out vec4 vPosition;\nvoid main() {\n    vPosition = vec4(0.0); }\n";
        let (c, i, o, _) = tables(src, "");
        let body = rewrite_vertex(src, &c, &i, &o, "TVSOutput").unwrap();
        assert_eq!(
            body,
            "TVSOutput main(ptVSInput _input)\n{\n\tTVSOutput l_output;\n    \
             l_output.vPosition = float4(0.0); \n\treturn l_output;\n}\n"
        );
    }

    #[test]
    fn member_access_is_not_renamed() {
        let renamer = Renamer {
            stage: ShaderStage::Vertex,
            constants: ["x"].into_iter().collect(),
            inputs: ["Normal"].into_iter().collect(),
            outputs: HashSet::new(),
            position: "Position",
            samplers: &[],
        };
        assert_eq!(
            renamer.rewrite_line("float y = v.x + x + Normal.x;"),
            "float y = v.x + l_x + _input.Normal.x;"
        );
    }

    #[test]
    fn fragment_output_written_twice_is_returned_at_the_end() {
        let body = fragment(
            "\
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0);
    FragColor = FragColor * 0.5;
}
",
        );
        assert!(body.returns);
        assert_eq!(
            body.text,
            "\
float4 main(TVSOutput _input) : S_TARGET_OUTPUT
{
\tfloat4 FragColor;
    FragColor = float4(1.0);
    FragColor = FragColor * 0.5;
\treturn FragColor;
}
"
        );
    }

    #[test]
    fn fragment_output_assigned_in_both_branches_returns_on_every_path() {
        let body = fragment(
            "\
uniform float Cutoff;
out vec4 FragColor;
void main()
{
    if (Cutoff > 0.5) {
        FragColor = vec4(1.0);
    } else {
        FragColor = vec4(0.0);
    }
}
",
        );
        assert!(body.returns);
        assert_eq!(
            body.text,
            "\
float4 main(TVSOutput _input) : S_TARGET_OUTPUT
{

\tfloat l_Cutoff = shc_Cutoff.x;

\tfloat4 FragColor;
    if (l_Cutoff > 0.5) {
        FragColor = float4(1.0);
    } else {
        FragColor = float4(0.0);
    }
\treturn FragColor;
}
"
        );
    }

    #[test]
    fn lone_nested_assignment_still_returns_at_the_end() {
        let body = fragment(
            "out vec4 FragColor;\nvoid main()\n{\n    if (true) { FragColor = vec4(1.0); }\n}\n",
        );
        let nested = "    if (true) { FragColor = float4(1.0); }\n";
        assert!(body.returns);
        assert!(body.text.contains(nested));
        assert!(body.text.ends_with("\treturn FragColor;\n}\n"));
    }

    #[test]
    fn lone_top_level_assignment_becomes_the_return() {
        let body = fragment("out vec4 FragColor;\nvoid main() { FragColor = v; }\n");
        assert!(body.returns);
        assert_eq!(
            body.text,
            "float4 main(TVSOutput _input) : S_TARGET_OUTPUT\n{\n return v; \n}\n"
        );
    }
}
