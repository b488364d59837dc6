//! Text-level transforms applied to prose leaves.

/// Curl straight quotes.
///
/// A quote opens when it starts the text or follows whitespace or an opening
/// bracket and is followed by a non-space character; otherwise it closes. A
/// single quote right after a letter or digit is an apostrophe.
pub fn smart_quotes(text: &str) -> String {
    if !text.contains(['"', '\'']) {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1).copied();
        let opens = opens_after(prev) && next.is_some_and(|n| !n.is_whitespace());

        match c {
            '"' => out.push(if opens { '“' } else { '”' }),
            '\'' if prev.is_some_and(char::is_alphanumeric) => out.push('’'),
            '\'' => out.push(if opens { '‘' } else { '’' }),
            _ => out.push(c),
        }
    }

    out
}

fn opens_after(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(p) => p.is_whitespace() || matches!(p, '(' | '[' | '{' | '“' | '‘' | '—' | '–'),
    }
}

/// `---` becomes an em dash, `--` an en dash.
pub fn smart_dashes(text: &str) -> String {
    if !text.contains("--") {
        return text.to_string();
    }
    text.replace("---", "—").replace("--", "–")
}

/// Escape the characters LaTeX treats specially in running prose.
pub fn latex_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '$' | '#' | '%' | '&') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
