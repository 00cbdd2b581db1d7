//! Reverse URL generation - substitutes values into route templates.

use crate::dispatch::ParamValue;

/// Replace `:name` tokens in `template` with supplied values.
///
/// The template is walked once, left to right. Tokens are read as whole
/// identifiers, so supplying `id` never touches a `:id2` token, and
/// substituted values are not rescanned. When `params` carries the same
/// name twice, the first entry wins. Tokens without a supplied value stay
/// in the output verbatim, and values are inserted with no escaping.
pub(crate) fn substitute(template: &str, params: &[(&str, ParamValue)]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(colon) = rest.find(':') {
        out.push_str(&rest[..colon]);
        let after = &rest[colon + 1..];

        let token_len = after
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if token_len == 0 {
            // Bare colon, not a placeholder
            out.push(':');
            rest = after;
            continue;
        }

        let token = &after[..token_len];
        match params.iter().find(|(name, _)| *name == token) {
            Some((_, value)) => match value {
                ParamValue::Int(n) => out.push_str(&n.to_string()),
                ParamValue::Str(s) => out.push_str(s),
            },
            None => {
                out.push(':');
                out.push_str(token);
            }
        }
        rest = &after[token_len..];
    }

    out.push_str(rest);
    out
}
