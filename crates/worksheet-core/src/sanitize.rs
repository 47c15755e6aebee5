//! Provider output sanitizing
//!
//! Chat models habitually wrap generated LaTeX in a Markdown code fence even
//! when told not to. The rest of the pipeline wants the literal document body,
//! so the fence is stripped here, once, right after the provider call.

/// Strip Markdown code-fence wrapping from provider output.
///
/// A wrapped block starts with a ``` fence line (any language tag runs to the
/// first line break) and ends with a matching ``` marker; both are removed
/// and the result trimmed. Wrapping is stripped to a fixpoint, so the
/// function is idempotent for every input. Text that is not wrapped passes
/// through unchanged apart from whitespace trimming.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    loop {
        let stripped = strip_fence(&text);
        if stripped == text {
            return text;
        }
        text = stripped;
    }
}

fn strip_fence(text: &str) -> String {
    if let Some(rest) = text.strip_prefix("```") {
        // The opening fence only counts if the fence line ends somewhere.
        if let Some(pos) = rest.find('\n') {
            let inner = &rest[pos + 1..];
            if let Some(body) = inner.strip_suffix("```") {
                return body.trim().to_string();
            }
        }
    }
    text.trim().to_string()
}
