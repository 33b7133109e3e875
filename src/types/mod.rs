//! Java type references as they appear in the type model.

/// Tokenizer for type strings.
pub mod lexer;
/// Parser from tokens to [`TypeRef`].
pub mod parser;

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ValuegenError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A (possibly parameterized) type reference.
pub enum TypeRef {
    /// Named type with optional type arguments, e.g. `java.util.List<T>`.
    ///
    /// Primitives and `void` are declared types without arguments.
    Declared {
        /// Qualified (or simple) type name.
        name: String,
        /// Type arguments in declaration order.
        args: Vec<TypeRef>,
    },
    /// Type variable in scope, e.g. `T`.
    Variable(String),
    /// Array of the component type.
    Array(Box<TypeRef>),
    /// Unbounded wildcard `?`.
    Wildcard,
    /// `? extends T`
    WildcardExtends(Box<TypeRef>),
    /// `? super T`
    WildcardSuper(Box<TypeRef>),
}

/// Parses a type string such as `java.util.Map<K, java.util.List<V>>`.
///
/// No name is treated as a type variable; see [`TypeRef::bind_variables`].
pub fn parse_type_ref(input: &str) -> Result<TypeRef, ValuegenError> {
    let tokens = lexer::tokenize(input)?;
    parser::parse(&tokens, input)
}

/// Parses a type string and binds the given type-variable names.
pub fn parse_type_in_scope(input: &str, type_vars: &[String]) -> Result<TypeRef, ValuegenError> {
    Ok(parse_type_ref(input)?.bind_variables(type_vars))
}

impl TypeRef {
    /// Non-generic declared type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Declared type with type arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args,
        }
    }

    /// `void`, the return type of methods that cannot be properties.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Declared { name, args } if name == "void" && args.is_empty())
    }

    /// Primitive or boxed boolean; the only types allowed an `is` getter prefix.
    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeRef::Declared { name, args }
            if args.is_empty() && (name == "boolean" || name == "java.lang.Boolean"))
    }

    /// Qualified name of a declared type, `None` for variables, arrays and wildcards.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeRef::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type arguments of a declared type (empty for everything else).
    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// Rewrites argument-less declared names found in `type_vars` into variables.
    pub fn bind_variables(self, type_vars: &[String]) -> TypeRef {
        match self {
            TypeRef::Declared { name, args } => {
                if args.is_empty() && type_vars.iter().any(|v| v == &name) {
                    TypeRef::Variable(name)
                } else {
                    TypeRef::Declared {
                        name,
                        args: args
                            .into_iter()
                            .map(|a| a.bind_variables(type_vars))
                            .collect(),
                    }
                }
            }
            TypeRef::Array(component) => TypeRef::Array(Box::new(component.bind_variables(type_vars))),
            TypeRef::WildcardExtends(bound) => {
                TypeRef::WildcardExtends(Box::new(bound.bind_variables(type_vars)))
            }
            TypeRef::WildcardSuper(bound) => {
                TypeRef::WildcardSuper(Box::new(bound.bind_variables(type_vars)))
            }
            other => other,
        }
    }

    /// Replaces type variables bound in `env`; unbound variables are kept.
    pub fn substitute(&self, env: &BTreeMap<String, TypeRef>) -> TypeRef {
        if env.is_empty() {
            return self.clone();
        }
        match self {
            TypeRef::Variable(name) => env.get(name).cloned().unwrap_or_else(|| self.clone()),
            TypeRef::Declared { name, args } => TypeRef::Declared {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(env)).collect(),
            },
            TypeRef::Array(component) => TypeRef::Array(Box::new(component.substitute(env))),
            TypeRef::Wildcard => TypeRef::Wildcard,
            TypeRef::WildcardExtends(bound) => {
                TypeRef::WildcardExtends(Box::new(bound.substitute(env)))
            }
            TypeRef::WildcardSuper(bound) => TypeRef::WildcardSuper(Box::new(bound.substitute(env))),
        }
    }

    /// Erased form used to compare parameter lists for overriding.
    pub fn erasure(&self) -> String {
        match self {
            TypeRef::Declared { name, .. } => name.clone(),
            // Bounds are not tracked, so variables erase to their own name.
            TypeRef::Variable(name) => name.clone(),
            TypeRef::Array(component) => format!("{}[]", component.erasure()),
            TypeRef::Wildcard | TypeRef::WildcardExtends(_) | TypeRef::WildcardSuper(_) => {
                "java.lang.Object".to_string()
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Declared { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    write_type_list(f, args)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Variable(name) => f.write_str(name),
            TypeRef::Array(component) => write!(f, "{component}[]"),
            TypeRef::Wildcard => f.write_str("?"),
            TypeRef::WildcardExtends(bound) => write!(f, "? extends {bound}"),
            TypeRef::WildcardSuper(bound) => write!(f, "? super {bound}"),
        }
    }
}

/// Writes `A, B, C` for a type argument list.
pub(crate) fn write_type_list(f: &mut impl fmt::Write, types: &[TypeRef]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{parse_type_in_scope, parse_type_ref, TypeRef};

    #[test]
    fn parses_nested_generics_arrays_and_wildcards() {
        let ty = parse_type_ref("java.util.Map<K,java.util.List<? extends Number>>[]").unwrap();
        assert_eq!(
            ty.to_string(),
            "java.util.Map<K, java.util.List<? extends Number>>[]"
        );
    }

    #[test]
    fn non_ascii_qualified_names_parse() {
        let ty = parse_type_ref("café.Menü<a.Café>").unwrap();
        assert_eq!(ty.declared_name(), Some("café.Menü"));
        assert_eq!(ty.to_string(), "café.Menü<a.Café>");
    }

    #[test]
    fn annotations_are_dropped() {
        let ty = parse_type_ref("@javax.annotation.Nullable java.lang.String").unwrap();
        assert_eq!(ty, TypeRef::named("java.lang.String"));
    }

    #[test]
    fn unclosed_arguments_fail_with_position() {
        let err = parse_type_ref("List<String").unwrap_err();
        assert!(err.to_string().contains("expected '>' after type arguments at 11"));
    }

    #[test]
    fn binds_only_argument_less_names_in_scope() {
        let ty = parse_type_in_scope("Pair<T, U<T>>", &["T".to_string()]).unwrap();
        assert_eq!(
            ty,
            TypeRef::generic(
                "Pair",
                vec![
                    TypeRef::Variable("T".to_string()),
                    TypeRef::generic("U", vec![TypeRef::Variable("T".to_string())]),
                ]
            )
        );
    }

    #[test]
    fn substitution_replaces_bound_variables() {
        let ty = parse_type_in_scope("java.util.List<E>[]", &["E".to_string(), "F".to_string()])
            .unwrap();
        let mut env = BTreeMap::new();
        env.insert("E".to_string(), TypeRef::named("java.lang.String"));
        assert_eq!(
            ty.substitute(&env).to_string(),
            "java.util.List<java.lang.String>[]"
        );
        assert_eq!(TypeRef::Variable("F".to_string()).substitute(&env).to_string(), "F");
    }

    #[test]
    fn erasure_drops_arguments() {
        let ty = parse_type_ref("java.util.List<String>[]").unwrap();
        assert_eq!(ty.erasure(), "java.util.List[]");
    }
}
