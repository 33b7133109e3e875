//! Type-model query capability and its in-memory implementation.
//!
//! Naming and factory decisions only ever see a [`TypeModel`]; the JSON
//! document is one way to supply it, tests and embedders may supply others.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::error::ValuegenError;
use crate::model::{
    ConstructorDeclDoc, MethodDeclDoc, Modifier, ModelDocument, TypeDeclDoc, TypeKind, Visibility,
};
use crate::property::is_java_identifier;
use crate::types::{parse_type_in_scope, TypeRef};

/// Qualified name of the implicit root of every type hierarchy.
pub const OBJECT_TYPE: &str = "java.lang.Object";

#[derive(Debug, Clone, PartialEq)]
/// A declared type with all type strings parsed.
pub struct TypeDecl {
    pub qualified_name: String,
    pub kind: TypeKind,
    pub modifiers: Vec<Modifier>,
    pub type_params: Vec<String>,
    pub enclosing: Option<String>,
    pub supertypes: Vec<TypeRef>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<ConstructorDecl>,
}

#[derive(Debug, Clone, PartialEq)]
/// A method as declared, before instantiation against any subtype.
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub return_type: TypeRef,
    pub modifiers: Vec<Modifier>,
    pub visibility: Visibility,
    pub type_params: Vec<String>,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub params: Vec<TypeRef>,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq)]
/// A method reachable from some target type, with types instantiated for it.
pub struct ResolvedMethod {
    pub name: String,
    /// Qualified name of the declaring type.
    pub declared_in: String,
    pub param_types: Vec<TypeRef>,
    pub return_type: TypeRef,
    pub visibility: Visibility,
    pub modifiers: Vec<Modifier>,
    pub is_abstract: bool,
}

impl TypeDecl {
    /// Simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map(|(_, simple)| simple)
            .unwrap_or(&self.qualified_name)
    }

    /// The type as seen from inside its own declaration, e.g. `a.Pair<A, B>`.
    pub fn declared_type(&self) -> TypeRef {
        TypeRef::generic(
            self.qualified_name.clone(),
            self.type_params
                .iter()
                .map(|p| TypeRef::Variable(p.clone()))
                .collect(),
        )
    }

    /// Maps this type's parameters to `args`.
    ///
    /// Raw uses (no arguments) and arity mismatches bind nothing.
    pub fn binding_env(&self, args: &[TypeRef]) -> BTreeMap<String, TypeRef> {
        if args.len() != self.type_params.len() {
            return BTreeMap::new();
        }
        self.type_params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect()
    }
}

impl MethodDecl {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

impl ResolvedMethod {
    pub fn param_count(&self) -> usize {
        self.param_types.len()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

/// Read-only access to declared types and their method surfaces.
///
/// Queries never fail: an unknown type simply has no methods. Only
/// [`TypeModel::declared_type`] is required.
pub trait TypeModel {
    /// Returns the declaration for `qualified_name`, if known.
    fn declared_type(&self, qualified_name: &str) -> Option<&TypeDecl>;

    /// Returns the declaration enclosing `qualified_name`, if any.
    ///
    /// An explicit `enclosing` wins; otherwise the qualified-name prefix is
    /// used when it names a declared type.
    fn enclosing_type(&self, qualified_name: &str) -> Option<&TypeDecl> {
        let decl = self.declared_type(qualified_name)?;
        if let Some(enclosing) = &decl.enclosing {
            return self.declared_type(enclosing);
        }
        let (prefix, _) = qualified_name.rsplit_once('.')?;
        self.declared_type(prefix)
    }

    /// Own and inherited methods of `target`, most-derived first.
    ///
    /// Declarations overridden by a more-derived type (same name and erased
    /// parameter types) are dropped, and parameter and return types are
    /// instantiated with `target`'s type arguments through the whole
    /// supertype chain. `java.lang.Object` is walked last.
    fn methods_on(&self, target: &TypeRef) -> Vec<ResolvedMethod> {
        let mut walk = MethodWalk::default();
        let Some(name) = target.declared_name() else {
            debug!("no method surface for non-declared type {target}");
            return Vec::new();
        };
        if self.declared_type(name).is_none() {
            debug!("no method surface for unknown type {target}");
            return Vec::new();
        }
        walk.collect(self, target);
        walk.collect(self, &TypeRef::named(OBJECT_TYPE));
        walk.methods
    }
}

#[derive(Default)]
struct MethodWalk {
    visited: HashSet<String>,
    signatures: HashSet<(String, Vec<String>)>,
    methods: Vec<ResolvedMethod>,
}

impl MethodWalk {
    fn collect<M: TypeModel + ?Sized>(&mut self, model: &M, ty: &TypeRef) {
        let Some(name) = ty.declared_name() else {
            return;
        };
        if !self.visited.insert(name.to_string()) {
            return;
        }
        let Some(decl) = model.declared_type(name) else {
            debug!("skipping unknown supertype {ty}");
            return;
        };

        let env = decl.binding_env(ty.type_args());
        for method in &decl.methods {
            let method_env = if method.type_params.is_empty() {
                env.clone()
            } else {
                let mut shadowed = env.clone();
                for param in &method.type_params {
                    shadowed.remove(param);
                }
                shadowed
            };
            let param_types: Vec<TypeRef> = method
                .params
                .iter()
                .map(|p| p.substitute(&method_env))
                .collect();
            let signature = (
                method.name.clone(),
                param_types.iter().map(TypeRef::erasure).collect(),
            );
            if !self.signatures.insert(signature) {
                continue;
            }
            self.methods.push(ResolvedMethod {
                name: method.name.clone(),
                declared_in: decl.qualified_name.clone(),
                param_types,
                return_type: method.return_type.substitute(&method_env),
                visibility: method.visibility,
                modifiers: method.modifiers.clone(),
                is_abstract: method.is_abstract,
            });
        }

        for supertype in &decl.supertypes {
            self.collect(model, &supertype.substitute(&env));
        }
    }
}

#[derive(Debug, Clone, Default)]
/// [`TypeModel`] backed by a validated [`ModelDocument`].
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDecl>,
}

impl TypeRegistry {
    /// Validates and parses every declaration in `doc`.
    ///
    /// `java.lang.Object` is added unless the document declares it.
    pub fn from_document(doc: &ModelDocument) -> Result<Self, ValuegenError> {
        let mut types = BTreeMap::new();
        for (name, decl_doc) in &doc.types {
            let decl = parse_type_decl(name, decl_doc)?;
            types.insert(name.clone(), decl);
        }

        for decl in types.values() {
            if let Some(enclosing) = &decl.enclosing {
                if !types.contains_key(enclosing) {
                    return Err(ValuegenError::ModelError(format!(
                        "type '{}' names undeclared enclosing type '{}'",
                        decl.qualified_name, enclosing
                    )));
                }
            }
        }

        if !types.contains_key(OBJECT_TYPE) {
            types.insert(OBJECT_TYPE.to_string(), object_decl());
        }

        debug!("loaded type model with {} types", types.len());
        Ok(Self { types })
    }

    /// Parses a JSON type model document.
    pub fn from_json_str(input: &str) -> Result<Self, ValuegenError> {
        let doc: ModelDocument = serde_json::from_str(input)
            .map_err(|e| ValuegenError::SerializationError(e.to_string()))?;
        Self::from_document(&doc)
    }
}

impl TypeModel for TypeRegistry {
    fn declared_type(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.types.get(qualified_name)
    }
}

fn parse_type_decl(name: &str, doc: &TypeDeclDoc) -> Result<TypeDecl, ValuegenError> {
    validate_qualified_name(name, "type name")?;
    validate_modifiers(&doc.modifiers, &format!("type '{name}'"))?;
    for param in &doc.type_params {
        validate_identifier(param, &format!("type parameter of '{name}'"))?;
    }
    if let Some(enclosing) = &doc.enclosing {
        validate_qualified_name(enclosing, &format!("enclosing type of '{name}'"))?;
    }

    let supertypes = doc
        .supertypes
        .iter()
        .map(|s| parse_type_in_scope(s, &doc.type_params))
        .collect::<Result<Vec<_>, _>>()?;

    let methods = doc
        .methods
        .iter()
        .map(|m| parse_method_decl(name, doc, m))
        .collect::<Result<Vec<_>, _>>()?;

    let constructors = doc
        .constructors
        .iter()
        .map(|c| parse_constructor_decl(name, doc, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TypeDecl {
        qualified_name: name.to_string(),
        kind: doc.kind,
        modifiers: doc.modifiers.clone(),
        type_params: doc.type_params.clone(),
        enclosing: doc.enclosing.clone(),
        supertypes,
        methods,
        constructors,
    })
}

fn parse_method_decl(
    owner: &str,
    owner_doc: &TypeDeclDoc,
    doc: &MethodDeclDoc,
) -> Result<MethodDecl, ValuegenError> {
    let context = format!("method '{}' of '{}'", doc.name, owner);
    validate_identifier(&doc.name, &context)?;
    validate_modifiers(&doc.modifiers, &context)?;
    for param in &doc.type_params {
        validate_identifier(param, &format!("type parameter of {context}"))?;
    }

    let scope: Vec<String> = owner_doc
        .type_params
        .iter()
        .chain(doc.type_params.iter())
        .cloned()
        .collect();
    let params = doc
        .params
        .iter()
        .map(|p| parse_type_in_scope(p, &scope))
        .collect::<Result<Vec<_>, _>>()?;
    let return_type = parse_type_in_scope(&doc.returns, &scope)?;

    let is_abstract = match owner_doc.kind {
        TypeKind::Class => doc.modifiers.contains(&Modifier::Abstract),
        TypeKind::Interface => {
            !doc.modifiers.contains(&Modifier::Default)
                && !doc.modifiers.contains(&Modifier::Static)
                && !doc.modifiers.contains(&Modifier::Private)
        }
    };

    Ok(MethodDecl {
        name: doc.name.clone(),
        params,
        return_type,
        modifiers: doc.modifiers.clone(),
        visibility: Visibility::from_modifiers(&doc.modifiers, owner_doc.kind),
        type_params: doc.type_params.clone(),
        is_abstract,
    })
}

fn parse_constructor_decl(
    owner: &str,
    owner_doc: &TypeDeclDoc,
    doc: &ConstructorDeclDoc,
) -> Result<ConstructorDecl, ValuegenError> {
    validate_modifiers(&doc.modifiers, &format!("constructor of '{owner}'"))?;
    let params = doc
        .params
        .iter()
        .map(|p| parse_type_in_scope(p, &owner_doc.type_params))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConstructorDecl {
        params,
        visibility: Visibility::from_modifiers(&doc.modifiers, TypeKind::Class),
    })
}

fn validate_qualified_name(name: &str, context: &str) -> Result<(), ValuegenError> {
    if name.split('.').all(is_java_identifier) {
        Ok(())
    } else {
        Err(ValuegenError::ModelError(format!(
            "{context} '{name}' is not a valid qualified name"
        )))
    }
}

fn validate_identifier(name: &str, context: &str) -> Result<(), ValuegenError> {
    if is_java_identifier(name) {
        Ok(())
    } else {
        Err(ValuegenError::ModelError(format!(
            "{context}: '{name}' is not a valid identifier"
        )))
    }
}

fn validate_modifiers(modifiers: &[Modifier], context: &str) -> Result<(), ValuegenError> {
    let access = modifiers
        .iter()
        .filter(|m| matches!(m, Modifier::Public | Modifier::Protected | Modifier::Private))
        .count();
    if access > 1 {
        return Err(ValuegenError::ModelError(format!(
            "{context} declares more than one access modifier"
        )));
    }
    Ok(())
}

fn object_decl() -> TypeDecl {
    let method = |name: &str, returns: TypeRef, modifiers: &[Modifier]| MethodDecl {
        name: name.to_string(),
        params: Vec::new(),
        return_type: returns,
        modifiers: modifiers.to_vec(),
        visibility: Visibility::from_modifiers(modifiers, TypeKind::Class),
        type_params: Vec::new(),
        is_abstract: false,
    };
    let void = TypeRef::named("void");
    let mut methods = vec![
        method("hashCode", TypeRef::named("int"), &[Modifier::Public]),
        method("toString", TypeRef::named("java.lang.String"), &[Modifier::Public]),
        method(
            "getClass",
            TypeRef::generic("java.lang.Class", vec![TypeRef::Wildcard]),
            &[Modifier::Public, Modifier::Final],
        ),
        method("clone", TypeRef::named(OBJECT_TYPE), &[Modifier::Protected]),
        method("finalize", void.clone(), &[Modifier::Protected]),
        method("notify", void.clone(), &[Modifier::Public, Modifier::Final]),
        method("notifyAll", void.clone(), &[Modifier::Public, Modifier::Final]),
        method("wait", void, &[Modifier::Public, Modifier::Final]),
    ];
    let mut equals = method("equals", TypeRef::named("boolean"), &[Modifier::Public]);
    equals.params.push(TypeRef::named(OBJECT_TYPE));
    methods.push(equals);

    TypeDecl {
        qualified_name: OBJECT_TYPE.to_string(),
        kind: TypeKind::Class,
        modifiers: vec![Modifier::Public],
        type_params: Vec::new(),
        enclosing: None,
        supertypes: Vec::new(),
        methods,
        constructors: vec![ConstructorDecl {
            params: Vec::new(),
            visibility: Visibility::Public,
        }],
    }
}
