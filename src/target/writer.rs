/// Emitted statements, one line each, without trailing newlines.
pub type Lines = Vec<String>;

/// The statement used where the target language needs a non-empty body.
pub const PLACEHOLDER: &str = "pass";

/// Prefixes every line with one indent unit.
pub fn indent(lines: Lines, unit: &str) -> Lines {
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{}{}", unit, line)
            }
        })
        .collect()
}

/// Renders a nested body one level deeper, substituting the placeholder when
/// nothing was emitted.
pub fn body(lines: Lines, unit: &str) -> Lines {
    if lines.is_empty() {
        indent(vec![PLACEHOLDER.to_string()], unit)
    } else {
        indent(lines, unit)
    }
}

/// Re-indents a fixed template written with four-space indentation.
pub fn reindent(template: &str, unit: &str) -> String {
    if unit == "    " {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    for line in template.split_inclusive('\n') {
        let stripped = line.trim_start_matches(' ');
        let levels = (line.len() - stripped.len()) / 4;
        out.push_str(&unit.repeat(levels));
        out.push_str(stripped);
    }
    out
}
