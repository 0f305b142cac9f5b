//! 7-bit-safe output encoding.

use crate::error::{Diagnostic, TranslateError};

/// What to do with characters outside 7-bit ASCII in generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPolicy {
    /// Replace with `?` and report each replacement.
    #[default]
    Lossy,
    /// Fail with [`TranslateError::NonAsciiOutput`] on the first offending character.
    Strict,
}

/// Make `text` 7-bit safe, recording every replaced character in `diagnostics`.
pub fn to_seven_bit(
    file_name: &str,
    text: &str,
    policy: EncodingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<String, TranslateError> {
    if text.is_ascii() {
        return Ok(text.to_owned());
    }

    let mut out = String::with_capacity(text.len());
    let mut line = 1;
    for ch in text.chars() {
        if ch.is_ascii() {
            if ch == '\n' {
                line += 1;
            }
            out.push(ch);
            continue;
        }
        match policy {
            EncodingPolicy::Strict => {
                return Err(TranslateError::NonAsciiOutput {
                    file_name: file_name.to_owned(),
                    line,
                    ch,
                })
            }
            EncodingPolicy::Lossy => {
                let diag = Diagnostic::LossyCharacter {
                    file_name: file_name.to_owned(),
                    line,
                    ch,
                };
                tracing::warn!("{diag}");
                diagnostics.push(diag);
                out.push('?');
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let mut diags = Vec::new();
        let out = to_seven_bit("a.h", "float4 x;\n", EncodingPolicy::Strict, &mut diags).unwrap();
        assert_eq!(out, "float4 x;\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn lossy_replaces_and_reports() {
        let mut diags = Vec::new();
        let src = "// ok\n// für\n";
        let out = to_seven_bit("a.h", src, EncodingPolicy::Lossy, &mut diags).unwrap();
        assert_eq!(out, "// ok\n// f?r\n");
        assert_eq!(
            diags,
            [Diagnostic::LossyCharacter {
                file_name: "a.h".into(),
                line: 2,
                ch: 'ü',
            }]
        );
    }

    #[test]
    fn strict_rejects() {
        let mut diags = Vec::new();
        let err = to_seven_bit("a.h", "é", EncodingPolicy::Strict, &mut diags).unwrap_err();
        assert_eq!(
            err,
            TranslateError::NonAsciiOutput {
                file_name: "a.h".into(),
                line: 1,
                ch: 'é',
            }
        );
    }
}
