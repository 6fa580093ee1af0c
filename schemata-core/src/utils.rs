//! Naming utilities for schema identifiers.

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to lower camelCase (e.g., "hello_world" -> "helloWorld").
///
/// Leading underscores are kept so that names such as `__typename` survive
/// unchanged.
pub fn to_camel_case(s: &str) -> String {
    let rest = s.trim_start_matches('_');
    let mut result = "_".repeat(s.len() - rest.len());

    for (i, part) in rest.split('_').filter(|p| !p.is_empty()).enumerate() {
        let mut chars = part.chars();
        if let Some(c) = chars.next() {
            if i == 0 {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            result.extend(chars);
        }
    }

    result
}

/// Returns true if `name` matches `[_A-Za-z][_0-9A-Za-z]*`.
pub fn is_graphql_name(name: &str) -> bool {
    invalid_name_reason(name).is_none()
}

/// Check a GraphQL name.
///
/// Returns None if valid, Some(reason) if invalid.
pub fn invalid_name_reason(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}
