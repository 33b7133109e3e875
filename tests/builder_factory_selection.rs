use valuegen::{parse_type_ref, BuilderFactory, SourceBuilder, TypeRegistry};

const BUILDER: &str = "com.example.Person.Builder";

fn model(outer_methods: &str, constructors: &str) -> TypeRegistry {
    let input = format!(
        r#"{{
            "types": {{
                "com.example.Person": {{
                    "modifiers": ["public", "abstract"],
                    "methods": [{outer_methods}]
                }},
                "com.example.Person.Builder": {{
                    "modifiers": ["public", "static"],
                    "supertypes": ["com.example.Person_Builder"],
                    "constructors": [{constructors}]
                }}
            }}
        }}"#
    );
    TypeRegistry::from_json_str(&input).unwrap()
}

const STATIC_BUILDER: &str =
    r#"{"name": "builder", "returns": "com.example.Person.Builder", "modifiers": ["public", "static"]}"#;
const STATIC_NEW_BUILDER: &str =
    r#"{"name": "newBuilder", "returns": "com.example.Person.Builder", "modifiers": ["static"]}"#;
const PUBLIC_CONSTRUCTOR: &str = r#"{"params": [], "modifiers": ["public"]}"#;

#[test]
fn builder_method_takes_precedence_over_everything() {
    let outer = format!("{STATIC_NEW_BUILDER}, {STATIC_BUILDER}");
    let model = model(&outer, PUBLIC_CONSTRUCTOR);
    assert_eq!(
        BuilderFactory::from_builder_type(&model, BUILDER),
        Some(BuilderFactory::BuilderMethod)
    );
}

#[test]
fn new_builder_method_beats_constructor() {
    let model = model(STATIC_NEW_BUILDER, PUBLIC_CONSTRUCTOR);
    assert_eq!(
        BuilderFactory::from_builder_type(&model, BUILDER),
        Some(BuilderFactory::NewBuilderMethod)
    );
}

#[test]
fn package_private_constructor_is_enough() {
    let model = model("", r#"{"params": []}"#);
    assert_eq!(
        BuilderFactory::from_builder_type(&model, BUILDER),
        Some(BuilderFactory::NoArgsConstructor)
    );
}

#[test]
fn private_constructor_and_no_factories_yield_none() {
    let model = model("", r#"{"params": [], "modifiers": ["private"]}"#);
    assert_eq!(BuilderFactory::from_builder_type(&model, BUILDER), None);
}

#[test]
fn factory_on_the_builder_itself_is_not_considered() {
    let input = r#"{
        "types": {
            "com.example.Person": {},
            "com.example.Person.Builder": {
                "methods": [
                    {"name": "builder", "returns": "com.example.Person.Builder", "modifiers": ["public", "static"]}
                ]
            }
        }
    }"#;
    let model = TypeRegistry::from_json_str(input).unwrap();
    assert_eq!(BuilderFactory::from_builder_type(&model, BUILDER), None);
}

#[test]
fn top_level_builder_only_uses_constructors() {
    let input = r#"{
        "types": {
            "PersonBuilder": {"constructors": [{"modifiers": ["public"]}]}
        }
    }"#;
    let model = TypeRegistry::from_json_str(input).unwrap();
    assert_eq!(
        BuilderFactory::from_builder_type(&model, "PersonBuilder"),
        Some(BuilderFactory::NoArgsConstructor)
    );
}

#[test]
fn emitted_expressions_propagate_type_arguments() {
    let model = TypeRegistry::from_json_str(r#"{"types": {}}"#).unwrap();
    let builder = parse_type_ref("com.example.Pair.Builder<K, V>").unwrap();
    let mut code = SourceBuilder::new();

    code.push_line("// defaults").push("Builder<K, V> defaults = ");
    BuilderFactory::BuilderMethod.add_new_builder(&model, &mut code, &builder);
    code.push(";\n");
    code.push("Builder<K, V> other = ");
    BuilderFactory::NoArgsConstructor.add_new_builder(&model, &mut code, &builder);
    code.push(";\n");

    assert_eq!(
        code.build(),
        concat!(
            "// defaults\n",
            "Builder<K, V> defaults = com.example.Pair.<K, V>builder();\n",
            "Builder<K, V> other = new com.example.Pair.Builder<K, V>();\n"
        )
    );
}
