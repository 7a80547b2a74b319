//! Resolve controller, action and parameter documentation for catalog routes.

use super::index::{DocIndex, MemberNode};
use super::signature::{self, MemberKind};
use crate::markup;
use crate::model::*;

/// Correlates reflected route metadata with the documentation index.
///
/// Missing documentation is never an error: absent members resolve to empty
/// records with default flags.
pub struct DocResolver<'a> {
    index: &'a DocIndex,
}

impl<'a> DocResolver<'a> {
    pub fn new(index: &'a DocIndex) -> Self {
        Self { index }
    }

    pub fn controller_docs(&self, controller: &ControllerDescriptor) -> ControllerDocs {
        let node = self.type_node(&controller.type_ref);
        ControllerDocs {
            summary: tag_value(node, "summary"),
            remarks: tag_value(node, "remarks"),
            authorization: authorization(controller.authorize.as_ref()),
        }
    }

    pub fn action_docs(&self, route: &RouteDescription) -> ActionDocs {
        let node = self.method_node(route);
        ActionDocs {
            summary: tag_value(node, "summary"),
            remarks: tag_value(node, "remarks"),
            returns: tag_value(node, "returns"),
            authorization: authorization(route.authorize.as_ref()),
            obsolete: match route.obsolete {
                Some(ref marker) => ObsoleteInfo {
                    obsolete: true,
                    message: non_empty(marker.message.as_deref()),
                },
                None => ObsoleteInfo::default(),
            },
            odata_query: route.enable_query,
        }
    }

    /// Documentation of one parameter, from the `<param>` entry of its action.
    pub fn parameter_doc(
        &self,
        route: &RouteDescription,
        param: &ParameterDescriptor,
    ) -> Option<String> {
        let entry = self.method_node(route)?.param(&param.name)?;
        convert_text(&entry.inner_xml)
    }

    /// Action documentation plus one entry per declared parameter.
    pub fn record(&self, route: &RouteDescription) -> DocumentationRecord {
        let parameters = route
            .parameters
            .iter()
            .map(|param| ParameterDoc {
                type_name: signature::display_name(Some(&param.type_ref)),
                name: param.name.clone(),
                doc: self.parameter_doc(route, param),
                default_value: param.default_value.clone(),
                optional: param.optional,
            })
            .collect();

        DocumentationRecord {
            action: self.action_docs(route),
            parameters,
        }
    }

    /// Summary and returns of a type, newline separated.
    pub fn type_doc(&self, type_ref: &TypeRef) -> Option<String> {
        let node = self.type_node(type_ref);
        join_present([tag_value(node, "summary"), tag_value(node, "returns")])
    }

    /// Summary and value of a property or field, newline separated.
    ///
    /// Reads `<value>` rather than `<returns>`: compilers only emit
    /// `<returns>` for methods, so for properties and fields it is always
    /// empty.
    pub fn member_doc(&self, kind: MemberKind, declaring_type: &TypeRef, member: &str) -> Option<String> {
        let node = self
            .index
            .lookup(kind, &signature::member_name(declaring_type, member));
        join_present([tag_value(node, "summary"), tag_value(node, "value")])
    }

    /// Summary and returns of an action, newline separated.
    pub fn response_doc(&self, route: &RouteDescription) -> Option<String> {
        let node = self.method_node(route);
        join_present([tag_value(node, "summary"), tag_value(node, "returns")])
    }

    fn type_node(&self, type_ref: &TypeRef) -> Option<&'a MemberNode> {
        self.index
            .lookup(MemberKind::Type, &signature::type_name(type_ref))
    }

    fn method_node(&self, route: &RouteDescription) -> Option<&'a MemberNode> {
        self.index
            .lookup(MemberKind::Method, &signature::method_name(&route.locator))
    }
}

fn authorization(marker: Option<&Authorization>) -> AuthorizationInfo {
    let mut info = AuthorizationInfo::from(marker);
    info.users = non_empty(info.users.as_deref());
    info.roles = non_empty(info.roles.as_deref());
    info
}

/// Converted markdown of the first `tag` child, absent when missing or blank.
fn tag_value(node: Option<&MemberNode>, tag: &str) -> Option<String> {
    convert_text(&node?.tag(tag)?.inner_xml)
}

fn convert_text(inner_xml: &str) -> Option<String> {
    let trimmed = inner_xml.trim();
    if trimmed.is_empty() {
        return None;
    }
    non_empty(Some(&markup::convert(trimmed)))
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn join_present<const N: usize>(parts: [Option<String>; N]) -> Option<String> {
    let present: Vec<String> = parts.into_iter().flatten().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join("\n"))
    }
}
