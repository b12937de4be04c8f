use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".actstream.yaml";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Prefix shared by every activity template name.
pub const ACTIVITY_DIR: &str = "activity";

pub const ACTION_TEMPLATE: &str = "action.html";
pub const ACTIONS_TEMPLATE: &str = "actions.html";

// ---------------------------------------------------------------------------
// TemplateKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// A single action.
    Action,
    /// A group of actions sharing a verb.
    Actions,
}

impl TemplateKind {
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Action => ACTION_TEMPLATE,
            TemplateKind::Actions => ACTIONS_TEMPLATE,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Template names to try for `verb`, most specific first.
///
/// `"commented on"` with [`TemplateKind::Actions`] yields
/// `activity/commented_on/actions.html` then `activity/actions.html`.
pub fn activity_templates(verb: &str, kind: TemplateKind) -> Vec<String> {
    let file = kind.file_name();
    vec![
        format!("{ACTIVITY_DIR}/{}/{file}", verb.replace(' ', "_")),
        format!("{ACTIVITY_DIR}/{file}"),
    ]
}
