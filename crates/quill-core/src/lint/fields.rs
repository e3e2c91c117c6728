//! Shared frontmatter field checks

use regex::Regex;
use std::sync::OnceLock;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"))
}

/// Why `name` is not a valid skill/agent name, if it is not
#[must_use]
pub fn name_problem(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("name must not be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Some(format!(
            "name '{name}' is longer than {MAX_NAME_LEN} characters"
        ));
    }
    if !name_re().is_match(name) {
        return Some(format!(
            "name '{name}' must use lowercase letters, digits and single hyphens"
        ));
    }
    None
}

/// Why `description` is not a usable description, if it is not
#[must_use]
pub fn description_problem(description: &str) -> Option<String> {
    if description.trim().is_empty() {
        return Some("description must not be blank".to_string());
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Some(format!(
            "description is {len} characters, maximum is {MAX_DESCRIPTION_LEN}"
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_problem() {
        assert!(name_problem("code-review").is_none());
        assert!(name_problem("v2").is_none());
        assert!(name_problem("").is_some());
        assert!(name_problem("Code-Review").is_some());
        assert!(name_problem("code--review").is_some());
        assert!(name_problem("-review").is_some());
        assert!(name_problem("code_review").is_some());
        assert!(name_problem(&"a".repeat(65)).is_some());
        assert!(name_problem(&"a".repeat(64)).is_none());
    }

    #[test]
    fn test_description_problem() {
        assert!(description_problem("Reviews pull requests").is_none());
        assert!(description_problem("   ").is_some());
        assert!(description_problem(&"x".repeat(1025)).is_some());
    }
}
