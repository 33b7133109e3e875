use std::collections::BTreeMap;

use valuegen::model::{Modifier, TypeKind, Visibility};
use valuegen::type_model::{MethodDecl, TypeDecl};
use valuegen::{
    parse_type_ref, pick_name, GeneratedVisibility, NameAndVisibility, TypeModel, TypeRef,
    TypeRegistry,
};

/// Hand-built model that bypasses the JSON document entirely.
struct FakeModel {
    types: BTreeMap<String, TypeDecl>,
}

impl FakeModel {
    fn with_methods(name: &str, methods: Vec<MethodDecl>) -> Self {
        let decl = TypeDecl {
            qualified_name: name.to_string(),
            kind: TypeKind::Class,
            modifiers: vec![Modifier::Abstract],
            type_params: Vec::new(),
            enclosing: None,
            supertypes: Vec::new(),
            methods,
            constructors: Vec::new(),
        };
        let mut types = BTreeMap::new();
        types.insert(name.to_string(), decl);
        Self { types }
    }
}

impl TypeModel for FakeModel {
    fn declared_type(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.types.get(qualified_name)
    }
}

fn method(name: &str, returns: &str, visibility: Visibility, params: usize) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        params: vec![TypeRef::named("int"); params],
        return_type: TypeRef::named(returns),
        modifiers: Vec::new(),
        visibility,
        type_params: Vec::new(),
        is_abstract: true,
    }
}

#[test]
fn fake_model_drives_the_whole_decision_table() {
    let target = TypeRef::named("a.T");
    let string = TypeRef::named("java.lang.String");
    let model = FakeModel::with_methods(
        "a.T",
        vec![
            method("same", "java.lang.String", Visibility::Public, 0),
            method("narrow", "java.lang.String", Visibility::Package, 0),
            method("hidden", "java.lang.String", Visibility::Private, 0),
            method("wrong", "int", Visibility::Public, 0),
            method("_wrongImpl", "int", Visibility::Public, 0),
            method("overloaded", "int", Visibility::Public, 2),
        ],
    );

    let cases = [
        ("free", NameAndVisibility::public("free")),
        ("same", NameAndVisibility::public("same")),
        ("narrow", NameAndVisibility::package("narrow")),
        ("hidden", NameAndVisibility::package("_hiddenImpl")),
        ("wrong", NameAndVisibility::package("_wrongImpl2")),
        ("overloaded", NameAndVisibility::public("overloaded")),
    ];
    for (preferred, expected) in cases {
        assert_eq!(
            pick_name(&model, &target, &string, preferred),
            expected,
            "picking {preferred}"
        );
    }
}

#[test]
fn picks_are_never_private_and_only_narrow() {
    let input = r#"{
        "types": {
            "a.T": {
                "kind": "interface",
                "methods": [
                    {"name": "a", "returns": "int"},
                    {"name": "b", "returns": "long", "modifiers": ["private"]}
                ]
            }
        }
    }"#;
    let model = TypeRegistry::from_json_str(input).unwrap();
    let target = TypeRef::named("a.T");
    let int = TypeRef::named("int");

    // Interface members without modifiers are public, so the override stays public.
    assert_eq!(
        pick_name(&model, &target, &int, "a").visibility(),
        GeneratedVisibility::Public
    );
    assert_eq!(
        pick_name(&model, &target, &int, "b"),
        NameAndVisibility::package("_bImpl")
    );
}

#[test]
fn fallback_sequence_is_strictly_increasing() {
    let mut methods = vec![r#"{"name": "value", "returns": "int"}"#.to_string()];
    for suffix in ["", "2", "3", "4"] {
        methods.push(format!(
            r#"{{"name": "_valueImpl{suffix}", "returns": "int"}}"#
        ));
    }
    let input = format!(
        r#"{{"types": {{"a.T": {{"methods": [{}]}}}}}}"#,
        methods.join(",")
    );
    let model = TypeRegistry::from_json_str(&input).unwrap();
    let picked = pick_name(
        &model,
        &TypeRef::named("a.T"),
        &TypeRef::named("java.lang.String"),
        "value",
    );
    assert_eq!(picked, NameAndVisibility::package("_valueImpl5"));
}

#[test]
fn inherited_generic_getter_is_reused_when_instantiation_matches() {
    let input = r#"{
        "types": {
            "a.Container": {
                "kind": "interface",
                "type_params": ["E"],
                "methods": [{"name": "items", "returns": "java.util.List<E>"}]
            },
            "a.Names": {
                "modifiers": ["abstract"],
                "supertypes": ["a.Container<java.lang.String>"]
            }
        }
    }"#;
    let model = TypeRegistry::from_json_str(input).unwrap();
    let target = TypeRef::named("a.Names");

    let matching = parse_type_ref("java.util.List<java.lang.String>").unwrap();
    assert_eq!(
        pick_name(&model, &target, &matching, "items"),
        NameAndVisibility::public("items")
    );

    // The raw declaration `List<E>` must not be what is compared.
    let raw = parse_type_ref("java.util.List<E>").unwrap();
    assert_eq!(
        pick_name(&model, &target, &raw, "items"),
        NameAndVisibility::package("_itemsImpl")
    );
}

#[test]
fn unknown_target_has_no_conflicts() {
    let model = TypeRegistry::from_json_str(r#"{"types": {}}"#).unwrap();
    assert_eq!(
        pick_name(
            &model,
            &TypeRef::named("a.Missing"),
            &TypeRef::named("int"),
            "hashCode"
        ),
        NameAndVisibility::public("hashCode")
    );
}
