use crate::error::{BranchCiError, Result};

/// Branch name pattern as written in a policy file (e.g. "main", "feature/*", "release-v?.*")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPattern {
    pub pattern: String,
}

impl BranchPattern {
    /// Create a new branch pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        BranchPattern {
            pattern: pattern.into(),
        }
    }

    /// Check whether a branch name matches this pattern.
    ///
    /// Rules, in order:
    /// 1. exact equality
    /// 2. `prefix/*` matches anything under `prefix/`
    /// 3. shell glob where `*`, `?` and `[...]` never match `/`
    ///
    /// A malformed glob is a non-match.
    pub fn matches(&self, branch_name: &str) -> bool {
        match self.try_matches(branch_name) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::debug!(pattern = %self.pattern, error = %e, "treating malformed pattern as non-match");
                false
            }
        }
    }

    /// Like [`matches`](Self::matches) but reports malformed globs.
    pub fn try_matches(&self, branch_name: &str) -> Result<bool> {
        if branch_name == self.pattern {
            return Ok(true);
        }

        if let Some(prefix) = self.pattern.strip_suffix("/*") {
            return Ok(branch_name
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/')));
        }

        let re = regex::Regex::new(&glob_to_regex(&self.pattern)?)
            .map_err(|e| BranchCiError::pattern(format!("{}: {}", self.pattern, e)))?;
        Ok(re.is_match(branch_name))
    }
}

/// Convenience wrapper around [`BranchPattern::matches`]
pub fn matches_pattern(branch_name: &str, pattern: &str) -> bool {
    BranchPattern::new(pattern).matches(branch_name)
}

/// Translate a shell glob into an anchored regex
fn glob_to_regex(glob: &str) -> Result<String> {
    let mut out = String::from("^");
    let mut chars = glob.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| BranchCiError::pattern(format!("{}: trailing escape", glob)))?;
                out.push_str(&regex::escape(&escaped.to_string()));
            }
            '[' => {
                let negated = chars.next_if_eq(&'^').is_some();
                let mut class = String::new();
                let mut items = 0;
                let mut closed = false;

                while let Some(c) = chars.next() {
                    let lo = match c {
                        ']' if items > 0 => {
                            closed = true;
                            break;
                        }
                        ']' | '-' => {
                            return Err(BranchCiError::pattern(format!(
                                "{}: unexpected '{}' in character class",
                                glob, c
                            )))
                        }
                        '\\' => chars.next().ok_or_else(|| {
                            BranchCiError::pattern(format!("{}: trailing escape", glob))
                        })?,
                        other => other,
                    };
                    class.push_str(&regex::escape(&lo.to_string()));

                    if chars.next_if_eq(&'-').is_some() {
                        let hi = match chars.next() {
                            Some('\\') => chars.next(),
                            Some(']') | None => None,
                            other => other,
                        }
                        .ok_or_else(|| {
                            BranchCiError::pattern(format!("{}: incomplete range", glob))
                        })?;
                        if hi < lo {
                            return Err(BranchCiError::pattern(format!(
                                "{}: reversed range {}-{}",
                                glob, lo, hi
                            )));
                        }
                        class.push('-');
                        class.push_str(&regex::escape(&hi.to_string()));
                    }
                    items += 1;
                }

                if !closed {
                    return Err(BranchCiError::pattern(format!(
                        "{}: unclosed character class",
                        glob
                    )));
                }

                if negated {
                    out.push_str(&format!("[^/{}]", class));
                } else {
                    // Intersect with non-separators so a class never matches '/'
                    out.push_str(&format!("[{}&&[^/]]", class));
                }
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    out.push('$');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches_pattern("main", "main"));
        assert!(!matches_pattern("develop", "main"));
    }

    #[test]
    fn test_prefix_wildcard() {
        assert!(matches_pattern("feature/auth", "feature/*"));
        assert!(matches_pattern("feature/a/b", "feature/*"));
        assert!(!matches_pattern("bugfix/auth", "feature/*"));
        assert!(!matches_pattern("feature", "feature/*"));
        assert!(!matches_pattern("features/auth", "feature/*"));
    }

    #[test]
    fn test_glob_star() {
        assert!(matches_pattern("release-v1.0", "release-*"));
        assert!(matches_pattern("release-", "release-*"));
        assert!(!matches_pattern("release-v1/hotfix", "release-*"));
        assert!(matches_pattern("team/feature/x", "team/*/x"));
    }

    #[test]
    fn test_glob_question_mark() {
        assert!(matches_pattern("v1", "v?"));
        assert!(!matches_pattern("v10", "v?"));
        assert!(!matches_pattern("a/b", "a?b"));
    }

    #[test]
    fn test_glob_character_class() {
        assert!(matches_pattern("env-a", "env-[abc]"));
        assert!(!matches_pattern("env-d", "env-[abc]"));
        assert!(matches_pattern("v7", "v[0-9]"));
        assert!(!matches_pattern("vx", "v[0-9]"));
        assert!(matches_pattern("vx", "v[^0-9]"));
        assert!(!matches_pattern("a/b", "a[^x]b"));
        assert!(!matches_pattern("a/b", "a[/]b"));
    }

    #[test]
    fn test_glob_escapes_regex_metacharacters() {
        assert!(matches_pattern("release.1", "release.?"));
        assert!(!matches_pattern("releaseX1", "release.1*"));
        assert!(matches_pattern("a+b", "a+*"));
        assert!(matches_pattern("lit*", "lit\\*"));
        assert!(!matches_pattern("litx", "lit\\*"));
    }

    #[test]
    fn test_malformed_patterns_do_not_match() {
        for pattern in ["feature/[", "[]", "a\\", "[z-a]", "[a-]"] {
            assert!(
                BranchPattern::new(pattern).try_matches("anything").is_err(),
                "expected '{}' to be rejected",
                pattern
            );
            assert!(!matches_pattern("anything", pattern));
        }
    }

    #[test]
    fn test_malformed_pattern_still_matches_exactly() {
        // Exact equality is checked before glob parsing
        assert!(matches_pattern("feature/[", "feature/["));
    }
}
