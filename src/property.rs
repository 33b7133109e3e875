//! Property descriptors derived from a value type's abstract getters.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::GetterConvention;
use crate::type_model::{ResolvedMethod, OBJECT_TYPE};
use crate::types::TypeRef;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One logical attribute of a value type.
pub struct Property {
    name: String,
    capitalized_name: String,
    getter_name: String,
    ty: TypeRef,
}

impl Property {
    /// Creates a property; the capitalized form is derived from `name`.
    pub fn new(name: impl Into<String>, getter_name: impl Into<String>, ty: TypeRef) -> Self {
        let name = name.into();
        Self {
            capitalized_name: capitalize(&name),
            name,
            getter_name: getter_name.into(),
            ty,
        }
    }

    /// Creates a property with an explicit capitalized form (`getURL` -> `URL`).
    pub fn with_capitalized_name(
        name: impl Into<String>,
        capitalized_name: impl Into<String>,
        getter_name: impl Into<String>,
        ty: TypeRef,
    ) -> Self {
        Self {
            name: name.into(),
            capitalized_name: capitalized_name.into(),
            getter_name: getter_name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capitalized_name(&self) -> &str {
        &self.capitalized_name
    }

    pub fn getter_name(&self) -> &str {
        &self.getter_name
    }

    /// Declared type of the property (the getter's instantiated return type).
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Serializable view of a property, used in plans.
pub struct PropertySummary {
    pub name: String,
    pub capitalized_name: String,
    pub getter: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl From<&Property> for PropertySummary {
    fn from(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            capitalized_name: property.capitalized_name.clone(),
            getter: property.getter_name.clone(),
            ty: property.ty.to_string(),
        }
    }
}

/// Upper-cases the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// JavaBeans decapitalization: `Name` -> `name`, but `URL` stays `URL`.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return name.to_string();
    }
    first.to_lowercase().chain(name.chars().skip(1)).collect()
}

/// Returns whether `name` is a legal Java identifier (keywords excluded).
pub fn is_java_identifier(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$").expect("valid regex")
    });
    re.is_match(name) && !JAVA_KEYWORDS.contains(&name)
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Splits a bean-style getter into its property suffix, e.g. `getName` -> `Name`.
///
/// `is` prefixes only count for boolean getters.
fn bean_suffix<'a>(getter: &'a str, ty: &TypeRef) -> Option<&'a str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^(get|is)(\p{Lu}.*)$").expect("valid regex"));
    let caps = re.captures(getter)?;
    if &caps[1] == "is" && !ty.is_boolean() {
        return None;
    }
    caps.get(2).map(|m| m.as_str())
}

/// Whether `method` describes a property getter on a value type.
pub fn is_property_getter(method: &ResolvedMethod) -> bool {
    method.is_abstract
        && method.param_count() == 0
        && !method.is_static()
        && !method.return_type.is_void()
        && method.declared_in != OBJECT_TYPE
}

/// Derives properties from a value type's method surface, in surface order.
pub fn properties_from_methods(
    methods: &[ResolvedMethod],
    convention: GetterConvention,
) -> Vec<Property> {
    let getters: Vec<&ResolvedMethod> = methods.iter().filter(|m| is_property_getter(m)).collect();

    let strip = match convention {
        GetterConvention::Plain => false,
        GetterConvention::Prefixed => true,
        GetterConvention::Auto => {
            !getters.is_empty()
                && getters
                    .iter()
                    .all(|m| bean_suffix(&m.name, &m.return_type).is_some())
        }
    };

    getters
        .into_iter()
        .map(|m| match bean_suffix(&m.name, &m.return_type).filter(|_| strip) {
            Some(suffix) => Property::with_capitalized_name(
                decapitalize(suffix),
                suffix,
                m.name.clone(),
                m.return_type.clone(),
            ),
            None => Property::new(m.name.clone(), m.name.clone(), m.return_type.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{capitalize, decapitalize, is_java_identifier, properties_from_methods, Property};
    use crate::config::GetterConvention;
    use crate::model::{Modifier, Visibility};
    use crate::type_model::ResolvedMethod;
    use crate::types::TypeRef;

    fn getter(name: &str, returns: &str) -> ResolvedMethod {
        ResolvedMethod {
            name: name.to_string(),
            declared_in: "a.Value".to_string(),
            param_types: Vec::new(),
            return_type: TypeRef::named(returns),
            visibility: Visibility::Public,
            modifiers: vec![Modifier::Public, Modifier::Abstract],
            is_abstract: true,
        }
    }

    #[test]
    fn capitalization_helpers() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize("URL"), "URL");
        assert_eq!(capitalize(""), "");
        assert_eq!(decapitalize("Name"), "name");
        assert_eq!(decapitalize("URL"), "URL");
        assert_eq!(decapitalize("X"), "x");
    }

    #[test]
    fn identifiers_exclude_keywords() {
        assert!(is_java_identifier("value"));
        assert!(is_java_identifier("_valueImpl2"));
        assert!(is_java_identifier("$x"));
        assert!(!is_java_identifier("class"));
        assert!(!is_java_identifier("2x"));
        assert!(!is_java_identifier(""));
    }

    #[test]
    fn auto_convention_strips_prefixes_when_all_getters_use_them() {
        let methods = vec![getter("getName", "java.lang.String"), getter("isActive", "boolean")];
        let props = properties_from_methods(&methods, GetterConvention::Auto);
        assert_eq!(props[0].name(), "name");
        assert_eq!(props[0].capitalized_name(), "Name");
        assert_eq!(props[0].getter_name(), "getName");
        assert_eq!(props[1].name(), "active");
        assert_eq!(props[1].getter_name(), "isActive");
    }

    #[test]
    fn auto_convention_keeps_names_when_any_getter_is_plain() {
        let methods = vec![getter("getName", "java.lang.String"), getter("age", "int")];
        let props = properties_from_methods(&methods, GetterConvention::Auto);
        assert_eq!(props[0].name(), "getName");
        assert_eq!(props[0].capitalized_name(), "GetName");
        assert_eq!(props[1].name(), "age");
    }

    #[test]
    fn is_prefix_requires_boolean() {
        let methods = vec![getter("isbn", "java.lang.String"), getter("isOpen", "java.lang.String")];
        let props = properties_from_methods(&methods, GetterConvention::Prefixed);
        assert_eq!(props[0].name(), "isbn");
        assert_eq!(props[1].name(), "isOpen");
    }

    #[test]
    fn non_getters_are_skipped() {
        let mut concrete = getter("getName", "java.lang.String");
        concrete.is_abstract = false;
        let methods = vec![concrete, getter("reset", "void")];
        assert!(properties_from_methods(&methods, GetterConvention::Auto).is_empty());
    }

    #[test]
    fn explicit_capitalized_name_is_kept() {
        let prop = Property::with_capitalized_name("url", "URL", "getURL", TypeRef::named("String"));
        assert_eq!(prop.capitalized_name(), "URL");
    }
}
