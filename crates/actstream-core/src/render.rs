//! Rendering of actions and verb groups.
//!
//! A [`Renderer`] owns two collaborators: a resolver that maps a verb to the
//! template names worth trying, and a render function that turns those names
//! plus a [`Fragment`] into text. Nothing is registered globally; callers wire
//! both in at construction.

use crate::action::HasVerb;
use crate::error::{ActstreamError, Result};
use crate::group::{group_verbs, Group};
use crate::paths::{activity_templates, TemplateKind};
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

/// What a render function is asked to render.
#[derive(Debug)]
pub enum Fragment<'a, A> {
    Action(&'a A),
    Group { verb: &'a str, actions: &'a [A] },
}

impl<A: HasVerb> Fragment<'_, A> {
    pub fn verb(&self) -> &str {
        match self {
            Fragment::Action(action) => action.verb(),
            Fragment::Group { verb, .. } => *verb,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Fragment::Action(_) => 1,
            Fragment::Group { actions, .. } => actions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

pub type PathResolver = fn(&str, TemplateKind) -> Vec<String>;

pub struct Renderer<A, P, F> {
    resolve: P,
    render: F,
    _action: PhantomData<fn(&A)>,
}

impl<A, F> Renderer<A, PathResolver, F>
where
    F: FnMut(&[String], Fragment<'_, A>) -> Result<String>,
{
    /// Renderer using the stock `activity/<verb>/<kind>` layout.
    pub fn with_default_paths(render: F) -> Self {
        Self::new(activity_templates, render)
    }
}

impl<A, P, F> Renderer<A, P, F>
where
    P: Fn(&str, TemplateKind) -> Vec<String>,
    F: FnMut(&[String], Fragment<'_, A>) -> Result<String>,
{
    pub fn new(resolve: P, render: F) -> Self {
        Self {
            resolve,
            render,
            _action: PhantomData,
        }
    }

    /// Render a single action with its `action.html` template.
    pub fn display_action(&mut self, action: &A) -> Result<String>
    where
        A: HasVerb,
    {
        let templates = (self.resolve)(action.verb(), TemplateKind::Action);
        (self.render)(&templates, Fragment::Action(action))
    }

    /// Render already-formed groups in order, each with its `actions.html`
    /// template, and concatenate the output.
    pub fn render_groups<I>(&mut self, groups: I) -> Result<String>
    where
        I: IntoIterator<Item = Group<A>>,
    {
        let mut out = String::new();
        for group in groups {
            let templates = (self.resolve)(&group.verb, TemplateKind::Actions);
            let fragment = Fragment::Group {
                verb: &group.verb,
                actions: &group.actions,
            };
            out.push_str(&(self.render)(&templates, fragment)?);
        }
        Ok(out)
    }

    /// Group `actions` by verb and render every group.
    pub fn display_grouped_actions<T>(&mut self, actions: T, aggressiveness: i64) -> Result<String>
    where
        T: IntoIterator<Item = A>,
        A: HasVerb,
    {
        self.render_groups(group_verbs(actions, aggressiveness)?)
    }
}

// ---------------------------------------------------------------------------
// TemplateDir
// ---------------------------------------------------------------------------

/// Render function backed by a directory of template files.
///
/// Templates are plain text with four placeholders: `{{ verb }}`,
/// `{{ count }}`, `{{ action }}` (the first action) and `{{ actions }}` (one
/// action per line). Substituted text is HTML-escaped.
#[derive(Debug, Clone)]
pub struct TemplateDir {
    root: PathBuf,
}

impl TemplateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First candidate that exists under the root.
    pub fn find(&self, candidates: &[String]) -> Result<PathBuf> {
        for (i, name) in candidates.iter().enumerate() {
            let path = self.root.join(name);
            if path.is_file() {
                if i > 0 {
                    tracing::debug!(
                        template = %name,
                        skipped = ?&candidates[..i],
                        "falling back to generic template"
                    );
                }
                return Ok(path);
            }
        }
        Err(ActstreamError::TemplateNotFound(candidates.to_vec()))
    }

    pub fn render<A>(&self, candidates: &[String], fragment: Fragment<'_, A>) -> Result<String>
    where
        A: HasVerb + fmt::Display,
    {
        let path = self.find(candidates)?;
        let template = std::fs::read_to_string(&path)?;
        Ok(fill(&template, &fragment))
    }
}

const PLACEHOLDERS: [(&str, Slot); 4] = [
    ("{{ verb }}", Slot::Verb),
    ("{{ count }}", Slot::Count),
    ("{{ actions }}", Slot::Actions),
    ("{{ action }}", Slot::Action),
];

#[derive(Clone, Copy)]
enum Slot {
    Verb,
    Count,
    Action,
    Actions,
}

/// Single left-to-right pass over `template`; inserted values are escaped and
/// never scanned for placeholders again.
fn fill<A>(template: &str, fragment: &Fragment<'_, A>) -> String
where
    A: HasVerb + fmt::Display,
{
    let lines: Vec<String> = match fragment {
        Fragment::Action(action) => vec![escape_html(&action.to_string())],
        Fragment::Group { actions, .. } => {
            actions.iter().map(|a| escape_html(&a.to_string())).collect()
        }
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match PLACEHOLDERS.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, slot)) => {
                match slot {
                    Slot::Verb => out.push_str(&escape_html(fragment.verb())),
                    Slot::Count => out.push_str(&fragment.len().to_string()),
                    Slot::Action => out.push_str(lines.first().map_or("", String::as_str)),
                    Slot::Actions => out.push_str(&lines.join("\n")),
                }
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
