//! Markdown description of a request, as shown in the Postman sidebar.
//!
//! Sections are emitted in a fixed order and skipped when empty:
//! Summary, Remarks, Parameters, Returns, Authorization, Obsolete and the
//! OData note. Lines end with two spaces so markdown keeps the line breaks.

use crate::model::*;

/// Trailing sentence for actions accepting OData query options.
pub const ODATA_NOTE: &str = "_Supports ASP.NET WebApi OData query string syntax_";

const BREAK: &str = "  \n";

/// Render an operation's documentation record.
///
/// `response_type` is the display name of the returned type; the Returns
/// section is skipped only when it is empty.
pub fn compose(record: &DocumentationRecord, response_type: &str) -> String {
    let action = &record.action;
    let mut out = String::new();

    if let Some(ref summary) = action.summary {
        out.push_str(&format!("**Summary** {}{}", summary, BREAK));
    }

    if let Some(ref remarks) = action.remarks {
        out.push_str(&format!("**Remarks** {}{}", remarks, BREAK));
    }

    if !record.parameters.is_empty() {
        out.push_str(&format!("**Parameters**{}", BREAK));
        for param in &record.parameters {
            out.push_str(&render_parameter(param));
        }
    }

    if !response_type.is_empty() {
        out.push_str(&format!("**Returns**{}", BREAK));
        out.push_str(&format!("`{}`", response_type));
        if let Some(ref returns) = action.returns {
            out.push_str(&format!(" - _{}_", returns));
        }
        out.push_str(BREAK);
    }

    let auth = &action.authorization;
    if auth.required {
        out.push_str("**Authorization** Required");
        if let Some(ref users) = auth.users {
            out.push_str(&format!(" _Users: [{}]_", users));
        }
        if let Some(ref roles) = auth.roles {
            out.push_str(&format!(" _Roles: [{}]_", roles));
        }
        out.push_str(BREAK);
    }

    if action.obsolete.obsolete {
        out.push_str("**Obsolete**");
        if let Some(ref message) = action.obsolete.message {
            out.push_str(&format!(" - _{}_", message));
        }
        out.push('\n');
    }

    if action.odata_query {
        out.push_str(ODATA_NOTE);
    }

    out
}

/// `` `int` id - _The identifier_, default [5], optional ``
fn render_parameter(param: &ParameterDoc) -> String {
    let mut line = format!("`{}` {} - ", param.type_name, param.name);
    if let Some(ref doc) = param.doc {
        line.push_str(&format!("_{}_, ", doc));
    }
    if let Some(ref default) = param.default_value {
        line.push_str(&format!("default [{}], ", default));
    }
    line.push_str(if param.optional { "optional" } else { "required" });
    line.push_str(BREAK);
    line
}

/// Folder description: the summary, then the remarks in italics.
pub fn folder_description(docs: &ControllerDocs) -> String {
    format!(
        "{}{}_{}_",
        docs.summary.as_deref().unwrap_or_default(),
        BREAK,
        docs.remarks.as_deref().unwrap_or(" ")
    )
}
