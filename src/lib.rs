pub mod builder_factory;
pub mod builder_methods;
pub mod config;
pub mod error;
pub mod model;
pub mod name_picker;
pub mod naming;
pub mod plan;
pub mod property;
pub mod source;
pub mod type_model;
pub mod types;

use std::fs;
use std::path::Path;

pub use builder_factory::BuilderFactory;
pub use config::{GetterConvention, PlanOptions};
pub use error::ValuegenError;
pub use model::ModelDocument;
pub use name_picker::pick_name;
pub use naming::{GeneratedVisibility, NameAndVisibility};
pub use plan::{plan_value_type, GenerationPlan};
pub use property::Property;
pub use source::SourceBuilder;
pub use type_model::{TypeModel, TypeRegistry};
pub use types::{parse_type_in_scope, parse_type_ref, TypeRef};

/// A loaded type model together with the options declared alongside it.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub options: PlanOptions,
    pub registry: TypeRegistry,
}

/// Parses and validates a JSON type model document.
pub fn load_model(input: &str) -> Result<LoadedModel, ValuegenError> {
    let doc: ModelDocument = serde_json::from_str(input)
        .map_err(|e| ValuegenError::SerializationError(e.to_string()))?;
    doc.options.validate()?;
    let registry = TypeRegistry::from_document(&doc)?;
    Ok(LoadedModel {
        options: doc.options,
        registry,
    })
}

/// Reads and loads a type model document from `path`.
pub fn load_model_from_path(path: impl AsRef<Path>) -> Result<LoadedModel, ValuegenError> {
    let input = fs::read_to_string(path.as_ref())?;
    load_model(&input)
}

/// Plans `value_type` from an in-memory model document.
pub fn plan_from_str(input: &str, value_type: &str) -> Result<GenerationPlan, ValuegenError> {
    let loaded = load_model(input)?;
    plan_value_type(&loaded.registry, &loaded.options, value_type)
}

/// Plans `value_type` from a model document on disk.
pub fn plan_from_path(
    path: impl AsRef<Path>,
    value_type: &str,
) -> Result<GenerationPlan, ValuegenError> {
    let loaded = load_model_from_path(path)?;
    plan_value_type(&loaded.registry, &loaded.options, value_type)
}

/// Parses the target and return type of a name pick.
///
/// Names matching the target declaration's type parameters are read as type
/// variables in both, so `a.Box` with return `T` compares against the raw
/// `T` the model reports for `a.Box<T>`.
pub fn parse_pick_types(
    model: &dyn TypeModel,
    target: &str,
    returns: &str,
) -> Result<(TypeRef, TypeRef), ValuegenError> {
    let target_ref = parse_type_ref(target)?;
    let scope = target_ref
        .declared_name()
        .and_then(|name| model.declared_type(name))
        .map(|decl| decl.type_params.clone())
        .unwrap_or_default();
    Ok((
        target_ref.bind_variables(&scope),
        parse_type_in_scope(returns, &scope)?,
    ))
}
