//! Queryable index over a compiler-emitted XML documentation file.
//!
//! ```xml
//! <doc>
//!   <assembly><name>Api</name></assembly>
//!   <members>
//!     <member name="M:Api.TestController.Get(System.Int32)">
//!       <summary>Gets one item</summary>
//!       <param name="id">The identifier</param>
//!     </member>
//!   </members>
//! </doc>
//! ```

use super::signature::MemberKind;
use crate::error::{self, Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// A child tag of a `<member>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub tag: String,
    /// `name` attribute, set on `<param>` and `<typeparam>`
    pub name: Option<String>,
    /// Raw markup between the start and end tag, entities left escaped
    pub inner_xml: String,
}

/// Documentation of one member, child tags in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberNode {
    pub tags: Vec<DocTag>,
}

impl MemberNode {
    /// First child tag with the given name.
    pub fn tag(&self, tag: &str) -> Option<&DocTag> {
        self.tags.iter().find(|t| t.tag == tag)
    }

    /// The `<param name="...">` entry for a parameter.
    pub fn param(&self, name: &str) -> Option<&DocTag> {
        self.tags
            .iter()
            .find(|t| t.tag == "param" && t.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Default)]
pub struct DocIndex {
    /// Keyed by the full `name` attribute, prefix included (`M:...`)
    members: HashMap<String, MemberNode>,
}

impl DocIndex {
    /// Load and index a documentation file.
    pub fn load(path: &Path) -> Result<Self> {
        let xml = error::read_source("XML documentation file", path)?;
        Self::parse(&xml).map_err(|source| Error::MalformedDocumentation {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Index documentation text.
    pub fn parse(xml: &str) -> std::result::Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(xml)?;
        let mut members = HashMap::new();

        let root = doc.root_element();
        if root.tag_name().name() != "doc" {
            return Ok(Self { members });
        }

        let member_nodes = root
            .children()
            .filter(|n| n.has_tag_name("members"))
            .flat_map(|n| n.children())
            .filter(|n| n.has_tag_name("member"));

        for member in member_nodes {
            let Some(key) = member.attribute("name") else {
                continue;
            };
            let tags = member
                .children()
                .filter(|n| n.is_element())
                .map(|n| DocTag {
                    tag: n.tag_name().name().to_string(),
                    name: n.attribute("name").map(str::to_string),
                    inner_xml: inner_xml(xml, n),
                })
                .collect();
            // The first definition wins, as with a single-node query.
            members
                .entry(key.to_string())
                .or_insert(MemberNode { tags });
        }

        Ok(Self { members })
    }

    /// Find the documentation of a member by kind and signature
    /// (`signature` without the `X:` prefix).
    pub fn lookup(&self, kind: MemberKind, signature: &str) -> Option<&MemberNode> {
        self.members
            .get(&format!("{}{}", kind.prefix(), signature))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of indexed members of one kind.
    pub fn count(&self, kind: MemberKind) -> usize {
        self.members
            .keys()
            .filter(|k| k.chars().next().and_then(MemberKind::from_prefix) == Some(kind))
            .count()
    }
}

/// Source text between an element's start and end tag.
fn inner_xml(source: &str, node: roxmltree::Node) -> String {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) => source[first.range().start..last.range().end].to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly>
        <name>Api</name>
    </assembly>
    <members>
        <member name="T:Api.TestController">
            <summary>The Test Controller</summary>
            <remarks>
            This controller does not do much
            <para>See <see cref="T:Api.TestContent"/>.</para>
            </remarks>
        </member>
        <member name="M:Api.TestController.Get(System.Int32)">
            <summary>Gets &lt;one&gt; item</summary>
            <param name="id">The identifier</param>
            <param name="empty"></param>
        </member>
        <member name="P:Api.TestContent.Name">
            <summary>Gets or sets the name.</summary>
        </member>
    </members>
</doc>
"#;

    #[test]
    fn indexes_members_by_kind() {
        let index = DocIndex::parse(XML).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.count(MemberKind::Type), 1);
        assert_eq!(index.count(MemberKind::Method), 1);
        assert_eq!(index.count(MemberKind::Property), 1);
        assert_eq!(index.count(MemberKind::Field), 0);
    }

    #[test]
    fn lookup_hits_exact_signature_only() {
        let index = DocIndex::parse(XML).unwrap();
        assert!(index
            .lookup(MemberKind::Method, "Api.TestController.Get(System.Int32)")
            .is_some());
        assert!(index
            .lookup(MemberKind::Method, "Api.TestController.Get")
            .is_none());
        assert!(index
            .lookup(MemberKind::Type, "Api.TestController.Get(System.Int32)")
            .is_none());
    }

    #[test]
    fn keeps_inner_markup_and_entities() {
        let index = DocIndex::parse(XML).unwrap();
        let member = index
            .lookup(MemberKind::Method, "Api.TestController.Get(System.Int32)")
            .unwrap();
        assert_eq!(member.tag("summary").unwrap().inner_xml, "Gets &lt;one&gt; item");

        let controller = index.lookup(MemberKind::Type, "Api.TestController").unwrap();
        let remarks = &controller.tag("remarks").unwrap().inner_xml;
        assert!(remarks.contains(r#"<para>See <see cref="T:Api.TestContent"/>.</para>"#));
    }

    #[test]
    fn params_by_name() {
        let index = DocIndex::parse(XML).unwrap();
        let member = index
            .lookup(MemberKind::Method, "Api.TestController.Get(System.Int32)")
            .unwrap();
        assert_eq!(member.param("id").unwrap().inner_xml, "The identifier");
        assert_eq!(member.param("empty").unwrap().inner_xml, "");
        assert!(member.param("missing").is_none());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(DocIndex::parse("<doc><members></doc>").is_err());
    }

    #[test]
    fn foreign_root_yields_empty_index() {
        let index = DocIndex::parse("<project><members/></project>").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = DocIndex::load(Path::new("/nonexistent/Api.xml")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
