//! Member signature keys, as written by the compiler into XML documentation.
//!
//! `T:Api.Controllers.ValuesController`,
//! `M:Api.Controllers.ValuesController.Get(System.Int32)`,
//! `M:Api.Store.Find(System.Collections.Generic.List{System.Int32})`.

use crate::model::{MemberLocator, TypeRef};

/// Kind of documented member; selects the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Type,
    Method,
    Property,
    Field,
}

impl MemberKind {
    pub fn prefix(self) -> &'static str {
        match self {
            MemberKind::Type => "T:",
            MemberKind::Method => "M:",
            MemberKind::Property => "P:",
            MemberKind::Field => "F:",
        }
    }

    /// Map the first character of a `name` attribute back to a kind.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'T' => Some(MemberKind::Type),
            'M' => Some(MemberKind::Method),
            'P' => Some(MemberKind::Property),
            'F' => Some(MemberKind::Field),
            _ => None,
        }
    }
}

/// Documentation name of a type.
///
/// Generic types render as `Outer{Arg1,Arg2}` with the arity suffix trimmed,
/// nested types use `.` rather than `+`.
pub fn type_name(t: &TypeRef) -> String {
    let name = if t.is_generic() {
        let base = t.name.split('`').next().unwrap_or(&t.name);
        let args: Vec<String> = t.args.iter().map(type_name).collect();
        format!("{}{{{}}}", base, args.join(","))
    } else {
        t.name.clone()
    };
    name.replace('+', ".")
}

/// Documentation name of an action method: `Type.Member(P1,P2)`, or the bare
/// `Type.Member` for methods without parameters.
pub fn method_name(locator: &MemberLocator) -> String {
    let mut name = member_name(&locator.declaring_type, &locator.member);
    if !locator.parameter_types.is_empty() {
        let params: Vec<String> = locator.parameter_types.iter().map(type_name).collect();
        name.push_str(&format!("({})", params.join(",")));
    }
    name
}

/// Documentation name of a property or field.
pub fn member_name(declaring_type: &TypeRef, member: &str) -> String {
    format!("{}.{}", type_name(declaring_type), member)
}

/// Friendly type name for rendered documentation.
///
/// `System.Int32` → `int`, `List`1[Int32]` → `List<int>`, nested and
/// namespaced names are shortened to the last segment.
pub fn display_name(t: Option<&TypeRef>) -> String {
    let Some(t) = t else {
        return "void".to_string();
    };
    if let Some(alias) = builtin_alias(&t.name) {
        return alias.to_string();
    }
    let short = short_name(&t.name);
    if t.is_generic() {
        let base = short.split('`').next().unwrap_or(short);
        let args: Vec<String> = t.args.iter().map(|a| display_name(Some(a))).collect();
        return format!("{}<{}>", base, args.join(", "));
    }
    short.to_string()
}

/// Types bound from the URI rather than the body: primitives, strings,
/// a few well-known value types and nullable forms of those.
pub fn is_simple_type(t: &TypeRef) -> bool {
    if t.name == "System.Nullable`1" {
        return t.args.first().is_some_and(is_simple_type);
    }
    builtin_alias(&t.name).is_some()
        || matches!(
            t.name.as_str(),
            "System.Char"
                | "System.SByte"
                | "System.UInt16"
                | "System.UInt32"
                | "System.UInt64"
                | "System.Guid"
                | "System.DateTime"
                | "System.DateTimeOffset"
                | "System.TimeSpan"
                | "System.Uri"
        )
}

fn builtin_alias(name: &str) -> Option<&'static str> {
    match name {
        "System.Int32" => Some("int"),
        "System.Int16" => Some("short"),
        "System.Byte" => Some("byte"),
        "System.Boolean" => Some("bool"),
        "System.Int64" => Some("long"),
        "System.Single" => Some("float"),
        "System.Double" => Some("double"),
        "System.Decimal" => Some("decimal"),
        "System.String" => Some("string"),
        _ => None,
    }
}

fn short_name(name: &str) -> &str {
    // Namespace dots never appear after the arity backtick.
    let head = name.split('`').next().unwrap_or(name);
    let start = head.rfind(['.', '+']).map(|i| i + 1).unwrap_or(0);
    &name[start..]
}
