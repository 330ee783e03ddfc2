//! Shared utility functions for code generation.

/// Rust reserved keywords that cannot be used as plain identifiers.
/// Source: https://doc.rust-lang.org/reference/keywords.html
pub const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Split an identifier into words on separators and lower-to-upper case boundaries.
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            // "someId" splits before 'I', "HTTPServer" splits before 'S'
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld", "ACTIVE" -> "Active")
pub fn to_pascal_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    let rest: String = chars.collect();
                    // All-caps words ("ACTIVE", "ID") are normalized, mixed case is preserved
                    let rest = if word.chars().any(|c| c.is_ascii_lowercase()) {
                        rest
                    } else {
                        rest.to_ascii_lowercase()
                    };
                    format!("{}{}", first.to_ascii_uppercase(), rest)
                }
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "someString" -> "some_string")
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
