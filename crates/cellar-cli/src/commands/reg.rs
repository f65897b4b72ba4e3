use super::{json_pretty, Context, EXIT_FAILURE, EXIT_SUCCESS};
use cellar_core::{Hive, PrefixLayout};
use cellar_formats::{Registry, RegistryKey, RegistryValue};
use std::path::PathBuf;

/// `file` is either a hive name (`system`, `user`, `HKLM`, ...) looked up in
/// the prefix, or a path to any registry export.
pub fn run(
    file: &str,
    key_path: &str,
    value: Option<&str>,
    ctx: impl FnOnce() -> Result<Context, String>,
    json: bool,
) -> Result<u8, String> {
    let path = match Hive::parse(file) {
        Some(hive) => PrefixLayout::new(ctx()?.prefix).hive(hive),
        None => PathBuf::from(file),
    };
    let registry = Registry::from_file(&path).map_err(|e| format!("registry error: {e}"))?;

    let Some(key) = registry.get_key(key_path) else {
        return not_found(json);
    };
    match value {
        Some(name) => match key.value(name) {
            Some(v) if json => println!("{}", json_pretty(&value_json(v))?),
            Some(v) => println!("{}", v.data),
            None => return not_found(json),
        },
        None if json => println!("{}", json_pretty(&key_json(key))?),
        None => print_key(key),
    }
    Ok(EXIT_SUCCESS)
}

fn not_found(json: bool) -> Result<u8, String> {
    if json {
        println!("null");
    } else {
        println!("not found");
    }
    Ok(EXIT_FAILURE)
}

fn print_key(key: &RegistryKey) {
    for v in &key.values {
        match v.kind.as_deref() {
            Some(kind) => println!("{} ({kind}) = {}", v.name, v.data),
            None => println!("{} = {}", v.name, v.data),
        }
    }
    let mut subkeys: Vec<_> = key.subkeys.keys().collect();
    subkeys.sort();
    for name in subkeys {
        println!("[{name}]");
    }
}

fn value_json(v: &RegistryValue) -> serde_json::Value {
    serde_json::json!({
        "name": v.name,
        "kind": v.kind,
        "data": v.data,
    })
}

fn key_json(key: &RegistryKey) -> serde_json::Value {
    let mut subkeys: Vec<_> = key.subkeys.keys().collect();
    subkeys.sort();
    serde_json::json!({
        "name": key.name,
        "values": key.values.iter().map(value_json).collect::<Vec<_>>(),
        "subkeys": subkeys,
    })
}
