use crate::error::{ActstreamError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// HasVerb
// ---------------------------------------------------------------------------

/// Anything that can be grouped by verb.
///
/// Host systems implement this for their own action records; the grouper and
/// renderer only ever look at the verb.
pub trait HasVerb {
    fn verb(&self) -> &str;
}

impl<T: HasVerb + ?Sized> HasVerb for &T {
    fn verb(&self) -> &str {
        (**self).verb()
    }
}

impl HasVerb for str {
    fn verb(&self) -> &str {
        self
    }
}

impl HasVerb for String {
    fn verb(&self) -> &str {
        self
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A single activity-stream entry: `<actor> <verb> [<target>]` at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub actor: String,
    pub verb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Action {
    pub fn new(actor: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            verb: verb.into(),
            target: None,
            description: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl HasVerb for Action {
    fn verb(&self) -> &str {
        &self.verb
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.actor, self.verb)?;
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a list of actions from a `.yaml`, `.yml` or `.json` file.
///
/// Order is preserved as written; callers that want a recency feed should
/// call [`sort_newest_first`] afterwards.
pub fn load_actions(path: &Path) -> Result<Vec<Action>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let data = std::fs::read_to_string(path)?;
    let actions: Vec<Action> = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&data)?,
        "json" => serde_json::from_str(&data)?,
        _ => return Err(ActstreamError::UnsupportedFormat(path.display().to_string())),
    };
    tracing::debug!(path = %path.display(), count = actions.len(), "loaded actions");
    Ok(actions)
}

/// Sort actions so the most recent comes first. Stable for equal timestamps.
pub fn sort_newest_first(actions: &mut [Action]) {
    actions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn display_with_and_without_target() {
        let a = Action::new("alice", "posted");
        assert_eq!(a.to_string(), "alice posted");
        let b = Action::new("bob", "commented on").with_target("issue 4");
        assert_eq!(b.to_string(), "bob commented on issue 4");
    }

    #[test]
    fn has_verb_through_references() {
        let a = Action::new("alice", "shared");
        let r = &a;
        assert_eq!(HasVerb::verb(&r), "shared");
        assert_eq!("liked".verb(), "liked");
    }

    #[test]
    fn load_yaml_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.yaml");
        std::fs::write(
            &path,
            "- actor: alice\n  verb: posted\n  timestamp: 2024-01-01T10:00:00Z\n\
             - actor: bob\n  verb: updated\n  target: wiki\n  timestamp: 2024-01-01T09:00:00Z\n",
        )
        .unwrap();
        let actions = load_actions(&path).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].verb, "posted");
        assert_eq!(actions[1].target.as_deref(), Some("wiki"));
    }

    #[test]
    fn load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.json");
        std::fs::write(
            &path,
            r#"[{"actor":"carol","verb":"removed","timestamp":"2024-03-05T12:00:00Z"}]"#,
        )
        .unwrap();
        let actions = load_actions(&path).unwrap();
        assert_eq!(actions[0].actor, "carol");
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.txt");
        std::fs::write(&path, "").unwrap();
        let err = load_actions(&path).unwrap_err();
        assert!(matches!(err, ActstreamError::UnsupportedFormat(_)));
    }

    #[test]
    fn sort_newest_first_orders_by_timestamp() {
        let t = |h| Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap();
        let mut actions = vec![
            Action::new("a", "posted").at(t(8)),
            Action::new("b", "posted").at(t(10)),
            Action::new("c", "posted").at(t(9)),
        ];
        sort_newest_first(&mut actions);
        let actors: Vec<_> = actions.iter().map(|a| a.actor.as_str()).collect();
        assert_eq!(actors, ["b", "c", "a"]);
    }
}
