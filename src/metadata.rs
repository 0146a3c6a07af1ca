use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Directive lines look like `// ~name: Copy Date`.
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*// ~(\w+): (.*)$").expect("directive pattern")
});

static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z])([A-Z])").expect("camel case pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub description: String,
}

pub fn extract(identifier: &str, source: &str) -> Metadata {
    let mut found: HashMap<&str, String> = HashMap::new();

    for line in source.lines() {
        let Some(caps) = DIRECTIVE.captures(line) else { continue };
        let key = caps.get(1).map_or("", |m| m.as_str());
        let value = caps.get(2).map_or("", |m| m.as_str()).trim_end();
        match key {
            "name" => { found.insert("name", value.to_string()); }
            "description" => { found.insert("description", value.to_string()); }
            _ => {}
        }
    }

    let name = found.remove("name").unwrap_or_else(|| humanize(identifier));
    let description = found
        .remove("description")
        .unwrap_or_else(|| format!("Execute {} function", name));

    Metadata { name, description }
}

/// `getNowFromAPI` -> `Get Now From API`
pub fn humanize(identifier: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(identifier, "$1 $2");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
