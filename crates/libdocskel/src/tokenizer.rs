//! Word splitting that keeps generic argument spans intact.

/// Split `text` on any character in `delimiters`, ignoring delimiters nested inside `<...>`.
///
/// Empty words are never produced. A stray `>` never drives the depth below zero; an unbalanced
/// `<` keeps it above zero for the rest of the input, so everything after it lands in one word.
pub fn split(text: &str, delimiters: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = (depth - 1).max(0),
            _ => {}
        }
        if depth == 0 && delimiters.contains(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Split on whitespace outside generic spans.
pub fn words(text: &str) -> Vec<String> {
    split(text, " \t\r\n")
}

/// Split a comma separated list (parameters, interfaces, throws clauses) outside generic spans.
pub fn list(text: &str) -> Vec<String> {
    split(text, ", \t\r\n")
}

/// Nesting depth left over after scanning `text`; zero iff `<` and `>` are balanced.
pub fn depth_after(text: &str) -> i32 {
    text.chars().fold(0, |depth, c| match c {
        '<' => depth + 1,
        '>' => depth - 1,
        _ => depth,
    })
}

/// The part of a type name before any generic argument list.
pub fn strip_generics(name: &str) -> &str {
    name.find('<').map_or(name, |idx| &name[..idx])
}

/// Byte range of the first balanced `<...>` span in `text`, including both brackets.
pub fn generic_span(text: &str) -> Option<(usize, usize)> {
    let start = text.find('<')?;
    let mut depth = 0;
    for (idx, c) in text[start..].char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start, start + idx + 1));
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte range of the parenthesized group opening at the first `(` in `text`, excluding the
/// parentheses themselves.
pub fn paren_span(text: &str) -> Option<(usize, usize)> {
    let start = text.find('(')?;
    let mut depth = 0;
    for (idx, c) in text[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start + 1, start + idx));
                }
            }
            _ => {}
        }
    }
    None
}

/// Names declared by a type-parameter clause such as `<K extends Comparable<K>, V>`.
pub fn type_parameter_names(clause: &str) -> Vec<String> {
    let clause = clause.trim();
    let inner = clause
        .strip_prefix('<')
        .and_then(|c| c.strip_suffix('>'))
        .unwrap_or(clause);
    split(inner, ",")
        .iter()
        .filter_map(|param| param.split_whitespace().next().map(str::to_string))
        .collect()
}
