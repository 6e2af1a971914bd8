//! Java source fragments for model entities, shared by the renderer and the search index.

use crate::{
    keywords::ROOT_OBJECT,
    model::{ConstValue, Field, Method, Modifiers, Param, TypeDef, TypeKind, TypeRef},
};

/// Source form of a canonical name: nesting separators become dots.
pub fn java_name(name: &str) -> String {
    name.replace('$', ".")
}

/// A Javadoc comment block, or nothing for an empty comment.
pub fn docs(comment: &[String], indent: &str) -> String {
    if comment.is_empty() {
        return String::new();
    }
    let mut output = format!("{indent}/**\n");
    for line in comment {
        if line.is_empty() {
            output.push_str(&format!("{indent} *\n"));
        } else {
            output.push_str(&format!("{indent} * {}\n", line.replace("*/", "*&#47;")));
        }
    }
    output.push_str(&format!("{indent} */\n"));
    output
}

/// Modifier keywords followed by a space, or nothing.
pub fn render_modifiers(modifiers: Modifiers) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        format!("{modifiers} ")
    }
}

/// A type use in source form.
pub fn render_type(ty: &TypeRef) -> String {
    java_name(&ty.to_string())
}

/// Comma-separated parameter list without parentheses.
pub fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", render_type(&p.ty), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// ` throws A, B`, or nothing.
pub fn render_throws(throws: &[TypeRef]) -> String {
    if throws.is_empty() {
        return String::new();
    }
    let names: Vec<String> = throws.iter().map(render_type).collect();
    format!(" throws {}", names.join(", "))
}

/// Modifiers of a type declaration that are legal in source.
///
/// Permitted subclasses are not recorded, so `sealed` and `non-sealed` are left out.
fn type_modifiers(ty: &TypeDef) -> Modifiers {
    let mut modifiers = ty.modifiers - (Modifiers::SEALED | Modifiers::NON_SEALED);
    match ty.kind {
        TypeKind::Class => {}
        TypeKind::Interface | TypeKind::Annotation => modifiers.remove(Modifiers::ABSTRACT),
        TypeKind::Enum => modifiers.remove(Modifiers::ABSTRACT | Modifiers::FINAL),
    }
    modifiers
}

/// Declaration line of a type, without the opening brace.
pub fn render_type_header(ty: &TypeDef) -> String {
    let mut output = format!(
        "{}{} {}{}",
        render_modifiers(type_modifiers(ty)),
        ty.kind.keyword(),
        ty.simple_name(),
        ty.type_params.as_deref().map(java_name).unwrap_or_default()
    );
    let interfaces: Vec<String> = ty.interfaces.iter().map(render_type).collect();
    match ty.kind {
        TypeKind::Class => {
            if let Some(supertype) = &ty.supertype
                && supertype.name != ROOT_OBJECT
            {
                output.push_str(&format!(" extends {}", render_type(supertype)));
            }
            if !interfaces.is_empty() {
                output.push_str(&format!(" implements {}", interfaces.join(", ")));
            }
        }
        TypeKind::Enum if !interfaces.is_empty() => {
            output.push_str(&format!(" implements {}", interfaces.join(", ")));
        }
        TypeKind::Interface if !interfaces.is_empty() => {
            output.push_str(&format!(" extends {}", interfaces.join(", ")));
        }
        _ => {}
    }
    output
}

/// Field declaration without initializer or semicolon.
pub fn render_field_signature(field: &Field) -> String {
    format!(
        "{}{} {}",
        render_modifiers(field.modifiers),
        render_type(&field.ty),
        field.name
    )
}

/// Method or constructor declaration without body.
///
/// Constructors are recognised by their missing return type.
pub fn render_method_signature(method: &Method) -> String {
    let type_params = method
        .type_params
        .as_deref()
        .map(|tp| format!("{} ", java_name(tp)))
        .unwrap_or_default();
    let returns = method
        .returns
        .as_ref()
        .map(|r| format!("{} ", render_type(r)))
        .unwrap_or_default();
    format!(
        "{}{type_params}{returns}{}({}){}",
        render_modifiers(method.modifiers),
        method.name,
        render_params(&method.params),
        render_throws(&method.throws)
    )
}

/// Whether `method` is declared without a body inside a type of kind `owner`.
pub fn is_bodiless(owner: TypeKind, method: &Method) -> bool {
    if method
        .modifiers
        .intersects(Modifiers::ABSTRACT | Modifiers::NATIVE)
    {
        return true;
    }
    owner.is_interface_like()
        && method.returns.is_some()
        && !method
            .modifiers
            .intersects(Modifiers::DEFAULT | Modifiers::STATIC | Modifiers::PRIVATE)
}

/// Initializer expression for a field, if one is needed or known.
pub fn field_initializer(owner: TypeKind, field: &Field) -> Option<String> {
    match &field.constant {
        Some(value) => Some(render_constant(value, &field.ty)),
        None if field.modifiers.contains(Modifiers::FINAL) || owner.is_interface_like() => {
            Some(zero_value(&field.ty))
        }
        None => None,
    }
}

/// The default value of a type in source form.
pub fn zero_value(ty: &TypeRef) -> String {
    if ty.dims > 0 || ty.varargs {
        return "null".to_string();
    }
    match ty.name.as_str() {
        "boolean" => "false",
        "char" => "'\\0'",
        "long" => "0L",
        "float" => "0.0f",
        "double" => "0.0d",
        "byte" | "short" | "int" => "0",
        _ => "null",
    }
    .to_string()
}

/// A documented constant as a literal of the field's type.
pub fn render_constant(value: &ConstValue, ty: &TypeRef) -> String {
    match value {
        ConstValue::Str(s) => format!("\"{}\"", escape(s, '"')),
        ConstValue::Bool(b) => b.to_string(),
        ConstValue::Int(i) if ty.name == "long" => format!("{i}L"),
        ConstValue::Int(i) => i.to_string(),
        ConstValue::Float(f) => render_float(*f, ty.name == "float"),
        ConstValue::Char(code) => render_char(*code),
        ConstValue::Raw(text) => match text.parse::<f64>() {
            Ok(value) if !value.is_finite() && matches!(ty.name.as_str(), "float" | "double") => {
                render_float(value, ty.name == "float")
            }
            _ => text.clone(),
        },
        ConstValue::Null => zero_value(ty),
    }
}

fn render_float(value: f64, single: bool) -> String {
    let (class, suffix) = if single {
        ("java.lang.Float", "f")
    } else {
        ("java.lang.Double", "d")
    };
    if value.is_nan() {
        format!("{class}.NaN")
    } else if value.is_infinite() && value > 0.0 {
        format!("{class}.POSITIVE_INFINITY")
    } else if value.is_infinite() {
        format!("{class}.NEGATIVE_INFINITY")
    } else {
        format!("{value:?}{suffix}")
    }
}

fn render_char(code: u32) -> String {
    match char::from_u32(code) {
        Some(c) if c.is_ascii_graphic() || c == ' ' => format!("'{}'", escape(&c.to_string(), '\'')),
        Some(_) if code <= 0xffff => format!("'\\u{code:04x}'"),
        _ => format!("(char) {code}"),
    }
}

/// Escape text for a literal delimited by `quote`.
fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Search path of a member: `p.A#m(int)` for methods, `p.A#NAME` for fields.
pub fn member_path(type_name: &str, member: &str) -> String {
    format!("{type_name}#{member}")
}
