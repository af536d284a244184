//! Framework listing and schema commands

use suitegen::*;

pub fn cmd_list_frameworks() -> Result<()> {
    for framework in registry().frameworks() {
        println!(
            "{:<10} {:<11} .{}",
            framework.id(),
            framework.language(),
            framework.extension()
        );
    }
    Ok(())
}

pub fn cmd_schema(name: &str) -> Result<()> {
    match name {
        "spec" => print_schema::<SpecInput>(),
        "config" => print_schema::<ProjectConfig>(),
        _ => Err(format!("Unknown schema: {}. Use 'spec' or 'config'.", name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
