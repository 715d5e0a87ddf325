/// C# keywords, which can't be used as bare identifiers.
pub const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Check whether a name is a C# keyword.
pub fn is_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

/// Check whether a name can be used as a type identifier in generated code.
///
/// - `"Player"` → valid
/// - `"_cache2"` → valid
/// - `"2D"`, `"my player"`, `"class"`, `""` → invalid
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }
    !is_keyword(name)
}

/// Turn an identifier into a display string for menus and titles.
///
/// Words start at a lowercase to uppercase change, at the last capital of
/// an acronym and at the first digit of a number. Acronyms and a number
/// with its trailing capitals stay whole.
///
/// - `"PlayerController"` → `"Player Controller"`
/// - `"UIManager"` → `"UI Manager"`
/// - `"Player2D"` → `"Player 2D"`
/// - `"m_health"` → `"Health"`
/// - `"_spawnPoint"` → `"Spawn Point"`
pub fn nicify(name: &str) -> String {
    let trimmed = name.strip_prefix("m_").unwrap_or(name);
    let chars: Vec<char> = trimmed.trim_start_matches('_').chars().collect();

    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c.is_whitespace() {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            continue;
        }
        if !word.is_empty() && starts_word(chars[i - 1], c, chars.get(i + 1).copied()) {
            words.push(std::mem::take(&mut word));
        }
        word.push(c);
    }
    if !word.is_empty() {
        words.push(word);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn starts_word(prev: char, c: char, next: Option<char>) -> bool {
    if c.is_uppercase() {
        return prev.is_lowercase() || next.is_some_and(char::is_lowercase);
    }
    c.is_numeric() && prev.is_alphabetic()
}

/// Normalize a host-relative path: forward slashes, no empty or `.`
/// segments, `..` folded into its parent where possible.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else {
                    segments.push(segment);
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Split a normalized path into its directory, file stem and extension
/// (without the dot). Missing parts are empty strings.
pub fn split_path(path: &str) -> (String, String, String) {
    let normalized = normalize_path(path);
    let (dir, file) = match normalized.rsplit_once('/') {
        Some((dir, file)) => (dir.to_string(), file),
        None => (String::new(), normalized.as_str()),
    };
    let (stem, ext) = match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
        _ => (file.to_string(), String::new()),
    };
    (dir, stem, ext)
}

/// Join a directory and a file name with a single forward slash.
pub fn join_path(dir: &str, file: &str) -> String {
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("Player"));
        assert!(is_valid_identifier("_cache2"));
        assert!(is_valid_identifier("Éclair"));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2D"));
        assert!(!is_valid_identifier("my player"));
        assert!(!is_valid_identifier("foo-bar"));
        assert!(!is_valid_identifier("class"));
    }

    #[test]
    fn test_nicify() {
        assert_eq!(nicify("PlayerController"), "Player Controller");
        assert_eq!(nicify("m_health"), "Health");
        assert_eq!(nicify("_spawnPoint"), "Spawn Point");
        assert_eq!(nicify("Inventory"), "Inventory");
    }

    #[test]
    fn test_nicify_keeps_acronyms_and_numbers() {
        assert_eq!(nicify("UIManager"), "UI Manager");
        assert_eq!(nicify("HUDController"), "HUD Controller");
        assert_eq!(nicify("NPCSpawner"), "NPC Spawner");
        assert_eq!(nicify("Player2D"), "Player 2D");
        assert_eq!(nicify("Level2Boss"), "Level 2 Boss");
        assert_eq!(nicify("SaveAsJSON"), "Save As JSON");
        assert_eq!(nicify("spawn_point"), "Spawn Point");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("Assets\\Scripts\\Foo.cs"), "Assets/Scripts/Foo.cs");
        assert_eq!(normalize_path("./Assets//Scripts/"), "Assets/Scripts");
        assert_eq!(normalize_path("Assets/Scripts/../Editor/Foo.cs"), "Assets/Editor/Foo.cs");
        assert_eq!(normalize_path("../Shared/Foo.cs"), "../Shared/Foo.cs");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(
            split_path("Assets/Scripts/Player.cs"),
            ("Assets/Scripts".to_string(), "Player".to_string(), "cs".to_string())
        );
        assert_eq!(
            split_path("Game.Core.Editor.asmdef"),
            (String::new(), "Game.Core.Editor".to_string(), "asmdef".to_string())
        );
        assert_eq!(
            split_path("Assets/NewAsset"),
            ("Assets".to_string(), "NewAsset".to_string(), String::new())
        );
        assert_eq!(
            split_path("Assets/.gitignore"),
            ("Assets".to_string(), ".gitignore".to_string(), String::new())
        );
    }
}
