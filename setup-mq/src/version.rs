use std::fmt;

/// Tokens that request the newest published release
const LATEST_TOKENS: [&str; 2] = ["*", "latest"];

/// What the user asked for, normalized into the tag forms a feed may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionIntent {
    Latest,
    Explicit { prefixed: String, unprefixed: String },
}

impl VersionIntent {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || LATEST_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
            return VersionIntent::Latest;
        }

        let unprefixed = raw.strip_prefix('v').unwrap_or(raw);
        VersionIntent::Explicit {
            prefixed: format!("v{unprefixed}"),
            unprefixed: unprefixed.to_string(),
        }
    }
}

impl fmt::Display for VersionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionIntent::Latest => f.write_str("latest"),
            VersionIntent::Explicit { prefixed, .. } => f.write_str(prefixed),
        }
    }
}
