//! Names of the builder methods generated for each property.
//!
//! Every function is total: each property yields every name, whatever its
//! type. Callers pick the subset that applies (`add_method` only matters for
//! collections, `put_method` for maps, and so on).

use serde::Serialize;

use crate::property::Property;

/// Getter name; taken from the property, never synthesized.
pub fn getter(property: &Property) -> String {
    property.getter_name().to_string()
}

pub fn setter(property: &Property) -> String {
    format!("set{}", property.capitalized_name())
}

pub fn nullable_setter(property: &Property) -> String {
    format!("setNullable{}", property.capitalized_name())
}

/// Accessor for a nested property builder.
pub fn get_builder_method(property: &Property) -> String {
    format!("get{}Builder", property.capitalized_name())
}

pub fn add_method(property: &Property) -> String {
    format!("add{}", property.capitalized_name())
}

pub fn add_all_method(property: &Property) -> String {
    format!("addAll{}", property.capitalized_name())
}

pub fn add_copies_method(property: &Property) -> String {
    format!("addCopiesTo{}", property.capitalized_name())
}

pub fn put_method(property: &Property) -> String {
    format!("put{}", property.capitalized_name())
}

pub fn put_all_method(property: &Property) -> String {
    format!("putAll{}", property.capitalized_name())
}

pub fn remove_method(property: &Property) -> String {
    format!("remove{}", property.capitalized_name())
}

pub fn remove_all_method(property: &Property) -> String {
    format!("removeAll{}", property.capitalized_name())
}

pub fn set_count_method(property: &Property) -> String {
    format!("setCount{}", property.capitalized_name())
}

pub fn mapper(property: &Property) -> String {
    format!("map{}", property.capitalized_name())
}

pub fn mutator(property: &Property) -> String {
    format!("mutate{}", property.capitalized_name())
}

pub fn clear_method(property: &Property) -> String {
    format!("clear{}", property.capitalized_name())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Every generated method name for one property.
pub struct BuilderMethodNames {
    pub getter: String,
    pub setter: String,
    pub nullable_setter: String,
    pub get_builder: String,
    pub add: String,
    pub add_all: String,
    pub add_copies: String,
    pub put: String,
    pub put_all: String,
    pub remove: String,
    pub remove_all: String,
    pub set_count: String,
    pub mapper: String,
    pub mutator: String,
    pub clear: String,
}

/// Computes the full name table for `property`.
pub fn all(property: &Property) -> BuilderMethodNames {
    BuilderMethodNames {
        getter: getter(property),
        setter: setter(property),
        nullable_setter: nullable_setter(property),
        get_builder: get_builder_method(property),
        add: add_method(property),
        add_all: add_all_method(property),
        add_copies: add_copies_method(property),
        put: put_method(property),
        put_all: put_all_method(property),
        remove: remove_method(property),
        remove_all: remove_all_method(property),
        set_count: set_count_method(property),
        mapper: mapper(property),
        mutator: mutator(property),
        clear: clear_method(property),
    }
}
