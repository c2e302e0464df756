/// Builds the effective prompt sent to a backend: the base prompt, and when
/// style tags are selected, a deterministic `, style: ...` suffix with the
/// tags joined in selection order. Identical across every style-aware
/// adapter.
pub fn compose_prompt(prompt: &str, style_tags: &[String]) -> String {
    if style_tags.is_empty() {
        prompt.to_string()
    } else {
        format!("{}, style: {}", prompt, style_tags.join(", "))
    }
}
