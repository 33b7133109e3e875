//! Safe names for generated zero-argument members.
//!
//! A generated accessor either overrides a compatible user declaration of the
//! same name, or moves to a fallback name (`_valueImpl`, `_valueImpl2`, ...)
//! that nothing in the type's method surface blocks.

use std::collections::HashMap;

use log::debug;

use crate::model::Visibility;
use crate::naming::{GeneratedVisibility, NameAndVisibility};
use crate::type_model::{ResolvedMethod, TypeModel};
use crate::types::TypeRef;

/// Picks a name for a zero-argument member returning `desired_return_type`
/// on `target_type`, preferring `preferred_name`.
///
/// - No existing zero-argument method named `preferred_name`: the name is
///   used as-is and public.
/// - An existing non-private method with an identical (instantiated) return
///   type: the name is reused, public only if the existing method is public.
/// - Otherwise fallback names are tried in order and are always package-private.
///
/// Overloads taking parameters never conflict. This never fails.
pub fn pick_name(
    model: &dyn TypeModel,
    target_type: &TypeRef,
    desired_return_type: &TypeRef,
    preferred_name: &str,
) -> NameAndVisibility {
    let methods = zero_arg_methods_by_name(model.methods_on(target_type));

    let Some(existing) = methods.get(preferred_name) else {
        return NameAndVisibility::public(preferred_name);
    };
    if let Some(visibility) = reuse_visibility(existing, desired_return_type) {
        return NameAndVisibility::new(preferred_name, visibility);
    }
    debug!(
        "{target_type}: existing {preferred_name}() returning {} cannot be overridden to return {desired_return_type}",
        existing.return_type
    );

    let mut attempt = 1usize;
    loop {
        let candidate = fallback_name(preferred_name, attempt);
        let usable = match methods.get(candidate.as_str()) {
            None => true,
            Some(existing) => reuse_visibility(existing, desired_return_type).is_some(),
        };
        if usable {
            debug!("{target_type}: {preferred_name}() renamed to {candidate}()");
            return NameAndVisibility::package(candidate);
        }
        attempt += 1;
    }
}

/// `_<name>Impl` for the first attempt, `_<name>Impl<attempt>` afterwards.
pub fn fallback_name(preferred_name: &str, attempt: usize) -> String {
    if attempt <= 1 {
        format!("_{preferred_name}Impl")
    } else {
        format!("_{preferred_name}Impl{attempt}")
    }
}

// Later entries replace earlier ones; only existence and compatibility matter.
fn zero_arg_methods_by_name(methods: Vec<ResolvedMethod>) -> HashMap<String, ResolvedMethod> {
    methods
        .into_iter()
        .filter(|m| m.param_count() == 0)
        .map(|m| (m.name.clone(), m))
        .collect()
}

// Visibility a generated override of `existing` must use, or `None` if it
// cannot override it.
fn reuse_visibility(
    existing: &ResolvedMethod,
    desired_return_type: &TypeRef,
) -> Option<GeneratedVisibility> {
    if existing.visibility == Visibility::Private || &existing.return_type != desired_return_type {
        return None;
    }
    if existing.visibility == Visibility::Public {
        Some(GeneratedVisibility::Public)
    } else {
        Some(GeneratedVisibility::Package)
    }
}
