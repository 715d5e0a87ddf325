use indexmap::IndexMap;
use log::warn;
use regex::Regex;
use serde::Serialize;

/// Characters accepted between a marker and the rest of the name.
const SEPARATORS: &str = r"[\s_-]*";

/// Options for matching a single marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartOptions {
    /// Also match the marker with the case of its first letter inverted
    /// (`class` also matches `Class`). Other letters must match exactly.
    pub first_letter_case_insensitive: bool,
    /// Prefixes only. Match when the marker is directly followed by an
    /// uppercase letter (or ends the name) instead of a separator.
    pub match_if_boundary_is_uppercase: bool,
    /// Strip the marker from the residual name.
    pub remove_marker: bool,
}

impl PartOptions {
    pub const DEFAULT: PartOptions = PartOptions {
        first_letter_case_insensitive: true,
        match_if_boundary_is_uppercase: true,
        remove_marker: true,
    };

    /// Same options, but the marker stays part of the residual name.
    pub const fn keep_marker(self) -> Self {
        PartOptions {
            remove_marker: false,
            ..self
        }
    }
}

impl Default for PartOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of classifying a name against a [`NamePattern`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: bool,
    pub residual_name: String,
    /// The marker as registered, whatever casing the user typed.
    pub matching_marker: Option<String>,
    pub is_prefix: bool,
}

impl MatchResult {
    fn miss(name: &str) -> Self {
        Self {
            matched: false,
            residual_name: name.to_string(),
            matching_marker: None,
            is_prefix: false,
        }
    }

    /// Matched with a non-empty residual name.
    pub fn has_residual(&self) -> bool {
        self.matched && !self.residual_name.is_empty()
    }

    /// Whether the matching marker equals `marker`, ignoring case.
    pub fn marker_is(&self, marker: &str) -> bool {
        self.matching_marker
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case(marker))
    }
}

#[derive(Debug, Clone)]
struct CompiledPart {
    options: PartOptions,
    regex: Regex,
}

/// Registry of prefix and suffix markers used to pick a template from a
/// typed file name and extract the identifier from it.
///
/// Registries are filled once and read-only afterwards. Registering the
/// same marker twice keeps the first options.
#[derive(Debug, Clone, Default)]
pub struct NamePattern {
    prefixes: IndexMap<String, CompiledPart>,
    suffixes: IndexMap<String, CompiledPart>,
}

impl NamePattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register each part as both a prefix and a suffix with default options.
    pub fn from_parts(parts: &[&str]) -> Self {
        Self::new()
            .with_prefixes(parts, PartOptions::DEFAULT)
            .with_suffixes(parts, PartOptions::DEFAULT)
    }

    pub fn with_prefixes(mut self, markers: &[&str], options: PartOptions) -> Self {
        for marker in markers {
            self.register_prefix(marker, options);
        }
        self
    }

    pub fn with_suffixes(mut self, markers: &[&str], options: PartOptions) -> Self {
        for marker in markers {
            self.register_suffix(marker, options);
        }
        self
    }

    pub fn register_prefix(&mut self, marker: &str, options: PartOptions) -> &mut Self {
        if !self.prefixes.contains_key(marker) {
            let alternatives = marker_alternatives(marker, options);
            let source = format!("^(?P<marker>{alternatives})(?P<sep>{SEPARATORS})");
            if let Some(regex) = compile(marker, &source) {
                self.prefixes
                    .insert(marker.to_string(), CompiledPart { options, regex });
            }
        }
        self
    }

    pub fn register_suffix(&mut self, marker: &str, options: PartOptions) -> &mut Self {
        if !self.suffixes.contains_key(marker) {
            let alternatives = marker_alternatives(marker, options);
            let source = format!("(?P<sep>{SEPARATORS})(?P<marker>{alternatives})$");
            if let Some(regex) = compile(marker, &source) {
                self.suffixes
                    .insert(marker.to_string(), CompiledPart { options, regex });
            }
        }
        self
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.keys().map(String::as_str)
    }

    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.suffixes.keys().map(String::as_str)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.match_name(name).matched
    }

    /// Classify a name. Prefixes are tried first, in registration order,
    /// then suffixes; the first hit wins.
    pub fn match_name(&self, name: &str) -> MatchResult {
        let name = name.trim();

        for (marker, part) in &self.prefixes {
            if let Some(result) = match_prefix(name, marker, part) {
                return result;
            }
        }

        for (marker, part) in &self.suffixes {
            if let Some(result) = match_suffix(name, marker, part) {
                return result;
            }
        }

        MatchResult::miss(name)
    }
}

fn match_prefix(name: &str, marker: &str, part: &CompiledPart) -> Option<MatchResult> {
    let caps = part.regex.captures(name)?;
    let whole = caps.get(0)?;
    let separated = caps.name("sep").is_some_and(|m| !m.as_str().is_empty());
    let rest = &name[whole.end()..];

    let boundary_ok = separated
        || (part.options.match_if_boundary_is_uppercase
            && rest.chars().next().is_none_or(char::is_uppercase));
    if !boundary_ok {
        return None;
    }

    let residual = if part.options.remove_marker { rest } else { name };
    Some(MatchResult {
        matched: true,
        residual_name: residual.trim().to_string(),
        matching_marker: Some(marker.to_string()),
        is_prefix: true,
    })
}

fn match_suffix(name: &str, marker: &str, part: &CompiledPart) -> Option<MatchResult> {
    let caps = part.regex.captures(name)?;
    let whole = caps.get(0)?;
    let separated = caps.name("sep").is_some_and(|m| !m.as_str().is_empty());
    let typed_marker = caps.name("marker")?.as_str();

    // A lowercase marker glued to the previous word would match inside
    // ordinary words ("Creditor"), so it needs a separator.
    let glued_ok = typed_marker.chars().next().is_some_and(char::is_uppercase);
    if !separated && !glued_ok {
        return None;
    }

    let residual = if part.options.remove_marker {
        &name[..whole.start()]
    } else {
        name
    };
    Some(MatchResult {
        matched: true,
        residual_name: residual.trim().to_string(),
        matching_marker: Some(marker.to_string()),
        is_prefix: false,
    })
}

/// Build the regex alternation for a marker and, if enabled, its variant
/// with the first letter's case inverted.
fn marker_alternatives(marker: &str, options: PartOptions) -> String {
    let mut alternatives = vec![regex::escape(marker)];
    if options.first_letter_case_insensitive {
        let inverted = invert_first_letter_case(marker);
        if inverted != marker {
            alternatives.push(regex::escape(&inverted));
        }
    }
    alternatives
        .iter()
        .map(|a| format!("(?:{a})"))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(marker: &str, source: &str) -> Option<Regex> {
    if marker.trim().is_empty() {
        warn!("ignoring empty name marker");
        return None;
    }
    match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("ignoring name marker {marker:?}: {e}");
            None
        }
    }
}

/// Invert the case of the first character only.
fn invert_first_letter_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_first_letter_case() {
        assert_eq!(invert_first_letter_case("class"), "Class");
        assert_eq!(invert_first_letter_case("Editor"), "editor");
        assert_eq!(invert_first_letter_case("SO"), "sO");
        assert_eq!(invert_first_letter_case(""), "");
    }

    #[test]
    fn test_marker_alternatives_escape() {
        let alternatives = marker_alternatives("a.b", PartOptions::DEFAULT);
        assert_eq!(alternatives, r"(?:a\.b)|(?:A\.b)");
    }

    #[test]
    fn test_marker_alternatives_without_case_variant() {
        let options = PartOptions {
            first_letter_case_insensitive: false,
            ..PartOptions::DEFAULT
        };
        assert_eq!(marker_alternatives("class", options), "(?:class)");
    }

    #[test]
    fn test_empty_marker_is_ignored() {
        let mut pattern = NamePattern::new();
        pattern.register_prefix("", PartOptions::DEFAULT);
        pattern.register_suffix("  ", PartOptions::DEFAULT);
        assert_eq!(pattern.prefixes().count(), 0);
        assert_eq!(pattern.suffixes().count(), 0);
    }

    #[test]
    fn test_keep_marker() {
        let options = PartOptions::DEFAULT.keep_marker();
        assert!(!options.remove_marker);
        assert!(options.first_letter_case_insensitive);
    }
}
