//! Data model for the route catalog and resolved documentation.

use serde::Deserialize;

/// A reflected type, as the runtime reports it.
///
/// `name` is the raw fully-qualified name, so it may still carry the `+`
/// nesting separator and a `` `N `` generic-arity suffix. `args` holds the
/// generic arguments in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TypeRefRepr")]
pub struct TypeRef {
    pub name: String,
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }
}

/// Catalog files may spell a non-generic type as a bare string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        args: Vec<TypeRef>,
    },
}

impl From<TypeRefRepr> for TypeRef {
    fn from(repr: TypeRefRepr) -> Self {
        match repr {
            TypeRefRepr::Name(name) => TypeRef::new(name),
            TypeRefRepr::Full { name, args } => TypeRef { name, args },
        }
    }
}

/// Authorization requirement attached to a controller or an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Authorization {
    #[serde(default)]
    pub users: Option<String>,
    #[serde(default)]
    pub roles: Option<String>,
}

/// Obsolete marker attached to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObsoleteMarker {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControllerDescriptor {
    /// Display name, also the grouping key (e.g. "Values" for ValuesController)
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub authorize: Option<Authorization>,
}

/// Everything needed to build the documentation key of an action method.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberLocator {
    pub declaring_type: TypeRef,
    pub member: String,
    /// Reflected parameter types of the method, in declaration order
    #[serde(default)]
    pub parameter_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// One documented HTTP operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteDescription {
    pub method: String,
    /// Raw relative path template; empty means "expand the route template"
    #[serde(default)]
    pub path: String,
    pub controller: ControllerDescriptor,
    pub action: String,
    /// Actual response type, when the action declares one explicitly
    #[serde(default)]
    pub response_type: Option<TypeRef>,
    /// Declared return type of the action method
    #[serde(default)]
    pub declared_type: Option<TypeRef>,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    pub locator: MemberLocator,
    #[serde(default)]
    pub authorize: Option<Authorization>,
    #[serde(default)]
    pub obsolete: Option<ObsoleteMarker>,
    /// Action accepts OData query options
    #[serde(default)]
    pub enable_query: bool,
}

impl RouteDescription {
    /// The type shown in the Returns section: the explicit response type wins
    /// over the declared return type.
    pub fn returned_type(&self) -> Option<&TypeRef> {
        self.response_type.as_ref().or(self.declared_type.as_ref())
    }
}

/// Identity of the API surface the catalog was discovered from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogSource {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteCatalog {
    pub source: CatalogSource,
    #[serde(default)]
    pub routes: Vec<RouteDescription>,
}

// -- Resolved documentation ---------------------------------------------------

/// Authorization facts as rendered in documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationInfo {
    pub required: bool,
    pub users: Option<String>,
    pub roles: Option<String>,
}

impl From<Option<&Authorization>> for AuthorizationInfo {
    fn from(marker: Option<&Authorization>) -> Self {
        match marker {
            Some(auth) => AuthorizationInfo {
                required: true,
                users: auth.users.clone(),
                roles: auth.roles.clone(),
            },
            None => AuthorizationInfo::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObsoleteInfo {
    pub obsolete: bool,
    pub message: Option<String>,
}

/// Controller-level documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerDocs {
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub authorization: AuthorizationInfo,
}

/// Action-level documentation, without parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDocs {
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub returns: Option<String>,
    pub authorization: AuthorizationInfo,
    pub obsolete: ObsoleteInfo,
    pub odata_query: bool,
}

/// A parameter line of the Parameters section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDoc {
    /// Display type name, e.g. `int` or `List<int>`
    pub type_name: String,
    pub name: String,
    pub doc: Option<String>,
    pub default_value: Option<String>,
    pub optional: bool,
}

/// Complete documentation of one operation, ready for composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationRecord {
    pub action: ActionDocs,
    /// In declared parameter order
    pub parameters: Vec<ParameterDoc>,
}
