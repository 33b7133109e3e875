//! Type model document: the JSON description of user-declared types.
//!
//! The document is a snapshot of what an annotation processor would see in
//! one processing round. Type strings stay as written here; the registry
//! parses and validates them on load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::PlanOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Parsed type model document.
pub struct ModelDocument {
    /// Generation options; every field has a default.
    #[serde(default)]
    pub options: PlanOptions,
    /// Declared types keyed by qualified name (`com.example.Person.Builder`).
    #[serde(default)]
    pub types: BTreeMap<String, TypeDeclDoc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Kind of a declared type.
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
/// Java modifiers relevant to naming and factory decisions.
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Abstract,
    Final,
    Default,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
/// Java access level of a declared member.
pub enum Visibility {
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    /// Access level implied by a modifier list.
    ///
    /// Members of interfaces without an access modifier are public.
    pub fn from_modifiers(modifiers: &[Modifier], owner_kind: TypeKind) -> Self {
        if modifiers.contains(&Modifier::Public) {
            Visibility::Public
        } else if modifiers.contains(&Modifier::Protected) {
            Visibility::Protected
        } else if modifiers.contains(&Modifier::Private) {
            Visibility::Private
        } else if owner_kind == TypeKind::Interface {
            Visibility::Public
        } else {
            Visibility::Package
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// One declared type as written in the document.
pub struct TypeDeclDoc {
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Type-variable names declared by this type, in order.
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Qualified name of the enclosing type, for nested types.
    #[serde(default)]
    pub enclosing: Option<String>,
    /// Direct supertypes (superclass and interfaces) as type strings.
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDeclDoc>,
    /// Explicitly declared constructors.
    #[serde(default)]
    pub constructors: Vec<ConstructorDeclDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One declared method.
pub struct MethodDeclDoc {
    pub name: String,
    /// Parameter types as type strings.
    #[serde(default)]
    pub params: Vec<String>,
    /// Return type string; defaults to `void`.
    #[serde(default = "default_return_type")]
    pub returns: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Method-level type variables (`<T> Builder<T> builder()`).
    #[serde(default)]
    pub type_params: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// One explicitly declared constructor.
pub struct ConstructorDeclDoc {
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

fn default_return_type() -> String {
    "void".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Modifier, ModelDocument, TypeKind, Visibility};
    use crate::config::GetterConvention;

    #[test]
    fn deserializes_minimal_document_with_defaults() {
        let doc: ModelDocument = serde_json::from_str(
            r#"{"types": {"a.B": {"methods": [{"name": "run"}]}}}"#,
        )
        .unwrap();
        let decl = &doc.types["a.B"];
        assert_eq!(decl.kind, TypeKind::Class);
        assert_eq!(decl.methods[0].returns, "void");
        assert!(decl.methods[0].params.is_empty());
        assert_eq!(doc.options.getter_convention, GetterConvention::Auto);
    }

    #[test]
    fn visibility_defaults_depend_on_owner_kind() {
        assert_eq!(
            Visibility::from_modifiers(&[Modifier::Abstract], TypeKind::Class),
            Visibility::Package
        );
        assert_eq!(
            Visibility::from_modifiers(&[Modifier::Abstract], TypeKind::Interface),
            Visibility::Public
        );
        assert_eq!(
            Visibility::from_modifiers(&[Modifier::Protected], TypeKind::Class),
            Visibility::Protected
        );
    }
}
