use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes raw style sheet text before it is embedded in the report
pub trait StyleFormatter {
    fn format(&self, raw: &str) -> String;
}

/// Rewrites CSS as one declaration per line, nested blocks indented by four
/// spaces. Quoted strings are copied untouched and semicolons inside
/// parentheses never end a declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssBeautifier;

impl StyleFormatter for CssBeautifier {
    fn format(&self, raw: &str) -> String {
        let collapsed = collapse_whitespace(raw.trim());
        let mut out = String::new();
        let mut line = String::new();
        let mut depth = 0usize;
        let mut parens = 0usize;
        let mut quote: Option<char> = None;

        for ch in collapsed.chars() {
            if let Some(open) = quote {
                line.push(ch);
                if ch == open {
                    quote = None;
                }
                continue;
            }

            match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    line.push(ch);
                }
                '(' => {
                    parens += 1;
                    line.push(ch);
                }
                ')' => {
                    parens = parens.saturating_sub(1);
                    line.push(ch);
                }
                // `url(data:...;base64,...)` keeps its semicolon
                ';' if parens > 0 => line.push(ch),
                '{' => {
                    let selector = line.trim();
                    let opener = if selector.is_empty() {
                        "{".to_string()
                    } else {
                        format!("{} {{", selector)
                    };
                    push_line(&mut out, depth, &opener);
                    line.clear();
                    depth += 1;
                    parens = 0;
                }
                ';' => {
                    line.push(';');
                    push_line(&mut out, depth, line.trim());
                    line.clear();
                }
                '}' => {
                    let trailing = line.trim();
                    if !trailing.is_empty() {
                        push_line(&mut out, depth, &format!("{};", trailing));
                    }
                    line.clear();
                    depth = depth.saturating_sub(1);
                    parens = 0;
                    push_line(&mut out, depth, "}");
                }
                _ => line.push(ch),
            }
        }
        push_line(&mut out, depth, line.trim());

        out.truncate(out.trim_end().len());
        out
    }
}

/// Collapses whitespace runs to one space outside quoted strings. An
/// unterminated quote keeps the rest of the text verbatim.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find(['"', '\'']) {
        out.push_str(&WHITESPACE.replace_all(&rest[..start], " "));
        let open = rest[start..].chars().next().unwrap_or('"');
        let body = &rest[start + 1..];
        match body.find(open) {
            Some(end) => {
                out.push_str(&rest[start..start + end + 2]);
                rest = &body[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(&WHITESPACE.replace_all(rest, " "));
    out
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    if text.is_empty() {
        return;
    }
    for _ in 0..depth {
        out.push_str("    ");
    }
    out.push_str(text);
    out.push('\n');
}
