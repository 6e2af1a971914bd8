//! Documented constant values: literal parsing and the `constant-values.html` pass.

use std::path::Path;

use tracing::debug;

use crate::{
    error::{DocskelError, Result},
    html::{self, Page},
    links::{LinkResolver, fragment},
    model::{ConstValue, Model},
    report::{Report, Warning},
    strategy::{Behaviors, Region},
};

/// File name of the constant values page, relative to the documentation root.
pub const CONSTANTS_PAGE: &str = "constant-values.html";

/// Parse a documented literal as a value of `declared_type`.
///
/// Returns the value plus a warning when the literal had to be kept raw or the type has no
/// literal form.
pub fn extract_constant_value(declared_type: &str, literal: &str) -> (ConstValue, Option<Warning>) {
    let literal = literal.trim();
    let malformed = || {
        (
            ConstValue::Raw(literal.to_string()),
            Some(Warning::MalformedConstantLiteral {
                declared_type: declared_type.to_string(),
                literal: literal.to_string(),
            }),
        )
    };
    let simple = declared_type.trim().rsplit('.').next().unwrap_or(declared_type);

    match simple {
        "String" => match literal
            .strip_prefix('"')
            .and_then(|l| l.strip_suffix('"'))
        {
            Some(body) if literal.len() >= 2 => (ConstValue::Str(unescape(body)), None),
            _ => malformed(),
        },
        "boolean" => match literal {
            "true" => (ConstValue::Bool(true), None),
            "false" => (ConstValue::Bool(false), None),
            _ => malformed(),
        },
        "byte" | "short" | "int" => match literal.parse::<i64>() {
            Ok(value) => (ConstValue::Int(value), None),
            Err(_) => malformed(),
        },
        "long" => match literal.trim_end_matches(['l', 'L']).parse::<i64>() {
            Ok(value) => (ConstValue::Int(value), None),
            Err(_) => malformed(),
        },
        "float" | "double" => {
            let value = match literal.trim_end_matches(['f', 'F', 'd', 'D']).parse::<f64>() {
                Ok(value) if value.is_finite() => ConstValue::Float(value),
                _ => ConstValue::Raw(literal.to_string()),
            };
            (value, None)
        }
        "char" => match parse_char(literal) {
            Some(code) => (ConstValue::Char(code), None),
            None => malformed(),
        },
        _ => (
            ConstValue::Null,
            Some(Warning::UnknownConstantType {
                declared_type: declared_type.to_string(),
                literal: literal.to_string(),
            }),
        ),
    }
}

/// A char literal as a code point: a number, `'c'`, or `'\uXXXX'`.
fn parse_char(literal: &str) -> Option<u32> {
    if let Ok(code) = literal.parse::<u32>() {
        return Some(code);
    }
    let body = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let unescaped = unescape(body);
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32),
        _ => None,
    }
}

/// Undo the escapes the generator writes into string and char literals.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Read `constant-values.html` under `root` and attach values to the model's fields.
///
/// A missing page is only a warning; a page that exists but cannot be read is fatal. Values for
/// types absent from the model are skipped silently when `filtered` is set.
pub fn apply_constants(
    root: &Path,
    behaviors: &Behaviors,
    links: &LinkResolver,
    model: &mut Model,
    report: &mut Report,
    filtered: bool,
) -> Result<()> {
    let path = root.join(CONSTANTS_PAGE);
    if !path.is_file() {
        report.warn(Warning::MissingConstantsPage { path });
        return Ok(());
    }
    let page = Page::load(root, CONSTANTS_PAGE)
        .map_err(|e| DocskelError::AllConstantDiscovery(path.clone(), e.to_string()))?;

    let region = Region::single(page.root());
    let mut applied = 0;
    for row in (behaviors.summary_rows)(&region) {
        let Ok(type_name) = links.resolve(&row.href) else {
            report.warn(Warning::UnresolvedLink {
                link: row.href.clone(),
                context: CONSTANTS_PAGE.to_string(),
            });
            continue;
        };
        let field_name = fragment(&row.href).unwrap_or(row.name.as_str()).to_string();
        let declared = html::fragments_text(&row.type_cell);
        let declared = declared.rsplit(' ').next().unwrap_or_default();
        let (value, warning) = extract_constant_value(declared, &row.last_cell);
        if let Some(warning) = warning {
            report.warn(warning);
        }

        let Some(ty) = model.get_mut(&type_name) else {
            if filtered {
                debug!("skipping constant {type_name}.{field_name} outside the filter");
            } else {
                report.warn(Warning::MemberDetailOrphan {
                    type_name,
                    member: field_name,
                });
            }
            continue;
        };
        match ty.fields.iter_mut().find(|f| f.name == field_name) {
            Some(field) => {
                field.constant = Some(value);
                applied += 1;
            }
            None => report.warn(Warning::MemberDetailOrphan {
                type_name,
                member: field_name,
            }),
        }
    }
    debug!("applied {applied} constant values");
    Ok(())
}
