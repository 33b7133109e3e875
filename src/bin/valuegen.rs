use std::{env, path::PathBuf, process::ExitCode};

use valuegen::{
    builder_methods, load_model_from_path, parse_pick_types, pick_name, plan_value_type,
    BuilderFactory, GeneratedVisibility, Property, TypeModel, TypeRef,
};

#[derive(Debug, Default)]
struct CommandOptions {
    type_name: Option<String>,
    name: Option<String>,
    returns: Option<String>,
    getter: Option<String>,
    pretty: bool,
}

impl CommandOptions {
    fn required_type(&self, command: &str) -> Result<&str, String> {
        self.type_name
            .as_deref()
            .ok_or_else(|| format!("{command} requires --type <qualified name>"))
    }
}

fn main() -> ExitCode {
    env_logger::init();
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    if args.len() < 3 {
        return Err("not enough arguments".to_string());
    }

    let command = args[1].as_str();
    let options = parse_options(&args[3..])?;

    match command {
        "plan" => run_plan(&PathBuf::from(&args[2]), &options),
        "factory" => run_factory(&PathBuf::from(&args[2]), &options),
        "pick-name" => run_pick_name(&PathBuf::from(&args[2]), &options),
        "methods" => run_methods(&args[2], &options),
        _ => Err(format!("unknown command '{command}'")),
    }
}

fn run_plan(file: &PathBuf, options: &CommandOptions) -> Result<(), String> {
    let value_type = options.required_type("plan")?;
    let loaded = load_model_from_path(file).map_err(|e| e.to_string())?;
    let plan = plan_value_type(&loaded.registry, &loaded.options, value_type)
        .map_err(|e| e.to_string())?;
    for warning in &plan.warnings {
        eprintln!("warning: {warning}");
    }
    let output = plan.to_json_string(options.pretty).map_err(|e| e.to_string())?;
    println!("{output}");
    Ok(())
}

fn run_factory(file: &PathBuf, options: &CommandOptions) -> Result<(), String> {
    let builder_type = options.required_type("factory")?;
    let loaded = load_model_from_path(file).map_err(|e| e.to_string())?;
    match BuilderFactory::from_builder_type(&loaded.registry, builder_type) {
        Some(factory) => {
            let builder_ref = loaded
                .registry
                .declared_type(builder_type)
                .map(|decl| decl.declared_type())
                .unwrap_or_else(|| TypeRef::named(builder_type));
            println!("{factory}: {}", factory.new_builder_expression(&loaded.registry, &builder_ref));
        }
        None => println!("none"),
    }
    Ok(())
}

fn run_pick_name(file: &PathBuf, options: &CommandOptions) -> Result<(), String> {
    let target = options.required_type("pick-name")?;
    let name = options
        .name
        .as_deref()
        .ok_or_else(|| "pick-name requires --name <preferred name>".to_string())?;
    let returns = options
        .returns
        .as_deref()
        .ok_or_else(|| "pick-name requires --returns <type>".to_string())?;

    let loaded = load_model_from_path(file).map_err(|e| e.to_string())?;
    let (target_ref, returns_ref) =
        parse_pick_types(&loaded.registry, target, returns).map_err(|e| e.to_string())?;
    let picked = pick_name(&loaded.registry, &target_ref, &returns_ref, name);
    let visibility = match picked.visibility() {
        GeneratedVisibility::Public => "public",
        GeneratedVisibility::Package => "package",
    };
    println!("{} {visibility}", picked.name());
    Ok(())
}

fn run_methods(property_name: &str, options: &CommandOptions) -> Result<(), String> {
    if !valuegen::property::is_java_identifier(property_name) {
        return Err(format!("'{property_name}' is not a valid property name"));
    }
    let getter = options
        .getter
        .clone()
        .unwrap_or_else(|| property_name.to_string());
    let property = Property::new(property_name, getter, TypeRef::named("java.lang.Object"));
    let names = builder_methods::all(&property);
    let output = if options.pretty {
        serde_json::to_string_pretty(&names)
    } else {
        serde_json::to_string(&names)
    }
    .map_err(|e| e.to_string())?;
    println!("{output}");
    Ok(())
}

fn parse_options(args: &[String]) -> Result<CommandOptions, String> {
    let mut options = CommandOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--pretty" => {
                options.pretty = true;
                i += 1;
            }
            "--type" => {
                options.type_name = Some(option_value(args, i, "--type")?);
                i += 2;
            }
            "--name" => {
                options.name = Some(option_value(args, i, "--name")?);
                i += 2;
            }
            "--returns" => {
                options.returns = Some(option_value(args, i, "--returns")?);
                i += 2;
            }
            "--getter" => {
                options.getter = Some(option_value(args, i, "--getter")?);
                i += 2;
            }
            other => return Err(format!("unknown option '{other}'")),
        }
    }

    Ok(options)
}

fn option_value(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn print_usage() {
    eprintln!("usage:");
    eprintln!("  valuegen plan <model.json> --type <value type> [--pretty]");
    eprintln!("  valuegen factory <model.json> --type <builder type>");
    eprintln!("  valuegen pick-name <model.json> --type <target type> --name <name> --returns <type>");
    eprintln!("  valuegen methods <property> [--getter <name>] [--pretty]");
    eprintln!();
    eprintln!("set RUST_LOG=valuegen=debug to trace naming and factory decisions.");
}
