//! Planning pass: every naming and factory decision for one value type.
//!
//! The plan is what an emission layer consumes; it contains no Java source
//! besides the builder instantiation expression.

use log::debug;
use serde::Serialize;

use crate::builder_factory::BuilderFactory;
use crate::builder_methods::{self, BuilderMethodNames};
use crate::config::PlanOptions;
use crate::error::ValuegenError;
use crate::name_picker::pick_name;
use crate::naming::NameAndVisibility;
use crate::property::{properties_from_methods, PropertySummary};
use crate::type_model::TypeModel;
use crate::types::TypeRef;

#[derive(Debug, Clone, Serialize)]
/// Naming and factory decisions for one value type.
pub struct GenerationPlan {
    /// Qualified name of the value type.
    pub value_type: String,
    /// Qualified name of the user-written builder, if one is declared.
    pub builder_type: Option<String>,
    /// Selected strategy for creating a default builder.
    pub builder_factory: Option<BuilderFactory>,
    /// Expression creating a new builder, when a factory was found.
    pub new_builder_expression: Option<String>,
    /// Builder-level members (`build`, `buildPartial`, `clear`).
    pub builder_members: Vec<MemberPlan>,
    pub properties: Vec<PropertyPlan>,
    /// Non-fatal diagnostics (renamed members, missing builder, ...).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// A generated zero-argument member and the name it ends up with.
pub struct MemberPlan {
    pub preferred_name: String,
    pub returns: String,
    pub picked: NameAndVisibility,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyPlan {
    #[serde(flatten)]
    pub property: PropertySummary,
    /// Every builder method name for the property.
    pub methods: BuilderMethodNames,
    /// Builder-side getter, checked against the user's builder.
    pub builder_getter: NameAndVisibility,
}

impl GenerationPlan {
    /// Serializes the plan to JSON text.
    ///
    /// When `pretty` is `true`, output is formatted with indentation.
    pub fn to_json_string(&self, pretty: bool) -> Result<String, ValuegenError> {
        if pretty {
            serde_json::to_string_pretty(self)
                .map_err(|e| ValuegenError::SerializationError(e.to_string()))
        } else {
            serde_json::to_string(self).map_err(|e| ValuegenError::SerializationError(e.to_string()))
        }
    }

    /// Looks up a property plan by property name.
    pub fn property(&self, name: &str) -> Option<&PropertyPlan> {
        self.properties.iter().find(|p| p.property.name == name)
    }

    /// Looks up a builder-level member by its preferred name.
    pub fn builder_member(&self, preferred_name: &str) -> Option<&MemberPlan> {
        self.builder_members
            .iter()
            .find(|m| m.preferred_name == preferred_name)
    }
}

/// Plans generation for `value_type`.
///
/// Fails only when the options are invalid or the value type is not declared;
/// everything else degrades to warnings.
pub fn plan_value_type(
    model: &dyn TypeModel,
    options: &PlanOptions,
    value_type: &str,
) -> Result<GenerationPlan, ValuegenError> {
    options.validate()?;
    let value_decl = model
        .declared_type(value_type)
        .ok_or_else(|| ValuegenError::UnknownType(value_type.to_string()))?;
    let value_ref = value_decl.declared_type();
    let mut warnings = Vec::new();

    let builder_name = format!("{value_type}.{}", options.builder_name);
    let builder_decl = model.declared_type(&builder_name);
    if builder_decl.is_none() {
        warnings.push(format!(
            "no user builder '{builder_name}' declared; the generated builder has no user methods to respect"
        ));
    }
    // Inside the value type, the builder is parameterized by the value type's own variables.
    let builder_ref = TypeRef::generic(
        builder_name.clone(),
        value_decl
            .type_params
            .iter()
            .map(|p| TypeRef::Variable(p.clone()))
            .collect(),
    );

    let builder_factory = builder_decl
        .and_then(|_| BuilderFactory::from_builder_type(model, &builder_name));
    if builder_decl.is_some() && builder_factory.is_none() {
        warnings.push(format!(
            "'{builder_name}' has no builder() or newBuilder() factory and no accessible no-args constructor; default-value support omitted"
        ));
    }
    let new_builder_expression = builder_factory.map(|f| f.new_builder_expression(model, &builder_ref));

    let pick = |preferred: &str, returns: &TypeRef, warnings: &mut Vec<String>| {
        let picked = if builder_decl.is_some() {
            pick_name(model, &builder_ref, returns, preferred)
        } else {
            NameAndVisibility::public(preferred)
        };
        if picked.name() != preferred {
            warnings.push(format!(
                "{preferred}() on '{builder_name}' clashes with an existing method; generating {}() instead",
                picked.name()
            ));
        }
        picked
    };

    let builder_members = [
        ("build", value_ref.clone()),
        ("buildPartial", value_ref.clone()),
        ("clear", builder_ref.clone()),
    ]
    .into_iter()
    .map(|(name, returns)| MemberPlan {
        preferred_name: name.to_string(),
        picked: pick(name, &returns, &mut warnings),
        returns: returns.to_string(),
    })
    .collect();

    let methods = model.methods_on(&value_ref);
    let properties = properties_from_methods(&methods, options.getter_convention);
    if properties.is_empty() {
        warnings.push(format!("'{value_type}' declares no abstract getters"));
    }

    let properties = properties
        .iter()
        .map(|property| {
            let methods = builder_methods::all(property);
            let builder_getter = pick(methods.getter.as_str(), property.ty(), &mut warnings);
            PropertyPlan {
                property: PropertySummary::from(property),
                methods,
                builder_getter,
            }
        })
        .collect();

    debug!(
        "planned {value_type}: factory {:?}, {} warnings",
        builder_factory,
        warnings.len()
    );

    Ok(GenerationPlan {
        value_type: value_type.to_string(),
        builder_type: builder_decl.map(|_| builder_name.clone()),
        builder_factory,
        new_builder_expression,
        builder_members,
        properties,
        warnings,
    })
}
