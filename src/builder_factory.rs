//! How a fresh instance of a user-written builder is obtained.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::Visibility;
use crate::source::SourceBuilder;
use crate::type_model::{TypeDecl, TypeModel};
use crate::types::{write_type_list, TypeRef};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Strategy for instantiating a builder with default property values.
pub enum BuilderFactory {
    /// `new Builder()`
    NoArgsConstructor,
    /// `Enclosing.builder()`
    BuilderMethod,
    /// `Enclosing.newBuilder()`
    NewBuilderMethod,
}

impl BuilderFactory {
    /// Decides how `builder_type` (a qualified name) can be instantiated.
    ///
    /// Static factories on the enclosing type are preferred, `builder()` over
    /// `newBuilder()`; they must be static, non-private, take no arguments and
    /// return exactly the builder type. Otherwise a non-private explicit
    /// no-argument constructor is used. `None` means no default construction
    /// is available; callers omit default-value support.
    pub fn from_builder_type(model: &dyn TypeModel, builder_type: &str) -> Option<Self> {
        let Some(builder) = model.declared_type(builder_type) else {
            debug!("unknown builder type {builder_type}; no factory");
            return None;
        };

        if let Some(enclosing) = model.enclosing_type(builder_type) {
            let return_type = builder.declared_type().to_string();
            if has_static_factory(enclosing, "builder", &return_type) {
                return Some(BuilderFactory::BuilderMethod);
            }
            if has_static_factory(enclosing, "newBuilder", &return_type) {
                return Some(BuilderFactory::NewBuilderMethod);
            }
        }

        if builder
            .constructors
            .iter()
            .any(|c| c.params.is_empty() && c.visibility != Visibility::Private)
        {
            return Some(BuilderFactory::NoArgsConstructor);
        }

        debug!("{builder_type} has no static factory and no accessible no-args constructor");
        None
    }

    /// Appends an expression creating a new `builder_type` instance.
    ///
    /// `builder_type` is the builder as used at the call site, with its type
    /// arguments, e.g. `a.Pair.Builder<K, V>`. Static factories are called on
    /// the type `model` reports as enclosing the builder, the same type
    /// [`BuilderFactory::from_builder_type`] searched.
    pub fn add_new_builder(
        self,
        model: &dyn TypeModel,
        code: &mut SourceBuilder,
        builder_type: &TypeRef,
    ) {
        code.push(&self.new_builder_expression(model, builder_type));
    }

    /// The expression [`BuilderFactory::add_new_builder`] appends.
    pub fn new_builder_expression(self, model: &dyn TypeModel, builder_type: &TypeRef) -> String {
        match self {
            BuilderFactory::NoArgsConstructor => format!("new {builder_type}()"),
            BuilderFactory::BuilderMethod => static_call(model, builder_type, "builder"),
            BuilderFactory::NewBuilderMethod => static_call(model, builder_type, "newBuilder"),
        }
    }
}

impl fmt::Display for BuilderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuilderFactory::NoArgsConstructor => "no-args constructor",
            BuilderFactory::BuilderMethod => "builder() method",
            BuilderFactory::NewBuilderMethod => "newBuilder() method",
        })
    }
}

// Return types are compared by their rendered form, so a factory returning a
// differently parameterized builder never matches.
fn has_static_factory(enclosing: &TypeDecl, name: &str, return_type: &str) -> bool {
    enclosing.methods.iter().any(|m| {
        m.name == name
            && m.is_static()
            && m.visibility != Visibility::Private
            && m.params.is_empty()
            && m.return_type.to_string() == return_type
    })
}

// Undeclared builders fall back to their qualified-name prefix.
fn static_call(model: &dyn TypeModel, builder_type: &TypeRef, method: &str) -> String {
    let name = builder_type.declared_name().unwrap_or_default();
    let enclosing = match model.enclosing_type(name) {
        Some(decl) => decl.qualified_name.as_str(),
        None => name.rsplit_once('.').map(|(outer, _)| outer).unwrap_or(name),
    };
    let args = builder_type.type_args();
    if args.is_empty() {
        return format!("{enclosing}.{method}()");
    }
    let mut out = format!("{enclosing}.<");
    // Writing into a String cannot fail.
    let _ = write_type_list(&mut out, args);
    out.push('>');
    out.push_str(method);
    out.push_str("()");
    out
}
