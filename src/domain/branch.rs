use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Branch names that always count as protected, compared case-insensitively.
pub const PROTECTED_BRANCHES: &[&str] = &["main", "master", "develop", "staging", "production"];

/// Semantic branch type inferred from the branch name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    Main,
    Develop,
    Staging,
    Release,
    Feature,
    Bugfix,
    Hotfix,
    Unknown,
}

impl BranchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchType::Main => "main",
            BranchType::Develop => "develop",
            BranchType::Staging => "staging",
            BranchType::Release => "release",
            BranchType::Feature => "feature",
            BranchType::Bugfix => "bugfix",
            BranchType::Hotfix => "hotfix",
            BranchType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification table, tried in order. A `true` flag means group 1 is a
/// prefix suffix that ends up in `metadata["suffix"]`.
const BRANCH_PATTERNS: &[(BranchType, &str, bool)] = &[
    (BranchType::Feature, r"^feature/(.+)$", true),
    (BranchType::Hotfix, r"^hotfix/(.+)$", true),
    (BranchType::Bugfix, r"^bugfix/(.+)$", true),
    (BranchType::Release, r"^release/(.+)$", true),
    (BranchType::Develop, r"^(develop|development)$", false),
    (BranchType::Staging, r"^staging$", false),
    (BranchType::Main, r"^(main|master)$", false),
];

const TICKET_PATTERN: &str = r"[A-Z]+-[0-9]+";

struct CompiledPatterns {
    branches: Vec<(BranchType, Regex, bool)>,
    ticket: Option<Regex>,
}

fn compiled_patterns() -> &'static CompiledPatterns {
    static PATTERNS: OnceLock<CompiledPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| CompiledPatterns {
        branches: BRANCH_PATTERNS
            .iter()
            .filter_map(|(branch_type, pattern, has_suffix)| {
                Regex::new(pattern)
                    .ok()
                    .map(|re| (*branch_type, re, *has_suffix))
            })
            .collect(),
        ticket: Regex::new(TICKET_PATTERN).ok(),
    })
}

/// Information derived from a branch name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub name: String,
    pub short_name: String,
    #[serde(rename = "type")]
    pub branch_type: BranchType,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub is_protected: bool,
}

impl BranchInfo {
    pub fn suffix(&self) -> Option<&str> {
        self.metadata.get("suffix").map(String::as_str)
    }

    pub fn ticket(&self) -> Option<&str> {
        self.metadata.get("ticket").map(String::as_str)
    }
}

/// Classify a branch by its short name.
///
/// Never fails: names that match none of the known families come back as
/// [`BranchType::Unknown`] with empty metadata.
pub fn classify(short_name: &str) -> BranchInfo {
    let (branch_type, metadata) = parse_branch_type(short_name);

    BranchInfo {
        name: short_name.to_string(),
        short_name: short_name.to_string(),
        branch_type,
        metadata,
        is_protected: is_protected(short_name),
    }
}

fn parse_branch_type(short_name: &str) -> (BranchType, BTreeMap<String, String>) {
    let patterns = compiled_patterns();
    let mut metadata = BTreeMap::new();

    for (branch_type, re, has_suffix) in &patterns.branches {
        let Some(captures) = re.captures(short_name) else {
            continue;
        };

        if *has_suffix {
            if let Some(suffix) = captures.get(1) {
                let suffix = suffix.as_str();
                metadata.insert("suffix".to_string(), suffix.to_string());

                if let Some(ticket) = patterns.ticket.as_ref().and_then(|t| t.find(suffix)) {
                    metadata.insert("ticket".to_string(), ticket.as_str().to_string());
                }
            }
        }

        return (*branch_type, metadata);
    }

    (BranchType::Unknown, metadata)
}

/// Case-insensitive membership in [`PROTECTED_BRANCHES`]
pub fn is_protected(short_name: &str) -> bool {
    PROTECTED_BRANCHES
        .iter()
        .any(|protected| protected.eq_ignore_ascii_case(short_name))
}
