//! Verb grouping.
//!
//! [`GroupVerbs`] walks a sequence of actions once and emits [`Group`]s of
//! actions sharing a verb. Up to `aggressiveness + 1` verbs may be buffered at
//! the same time; when a new verb arrives and the limit is already exceeded,
//! the verb that has been open longest is flushed first.
//!
//! For `post, update, update, remove, update, remove, share, update, share`:
//!
//! | aggressiveness | groups                                                         |
//! |----------------|----------------------------------------------------------------|
//! | 0              | post, update×2, remove, update, remove, share, update, share   |
//! | 1              | post, update×3, remove×2, share×2, update                      |
//! | 2              | post, update×4, remove×2, share×2                              |

use crate::action::HasVerb;
use crate::error::{ActstreamError, Result};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::iter::{Fuse, FusedIterator};
use std::num::{IntErrorKind, ParseIntError};

// ---------------------------------------------------------------------------
// Aggressiveness
// ---------------------------------------------------------------------------

/// How many verbs besides the current one may stay open before the oldest is
/// flushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Aggressiveness(usize);

impl Aggressiveness {
    pub const fn new(extra_open_verbs: usize) -> Self {
        Self(extra_open_verbs)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for Aggressiveness {
    type Error = ActstreamError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(ActstreamError::InvalidArgument(format!(
                "aggressiveness must be a non-negative integer, got {value}"
            )));
        }
        usize::try_from(value)
            .map(Self)
            .map_err(|_| too_large(&value.to_string()))
    }
}

impl std::str::FromStr for Aggressiveness {
    type Err = ActstreamError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s.trim().parse().map_err(|e: ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow => too_large(s.trim()),
            _ => ActstreamError::InvalidArgument(format!(
                "aggressiveness must be a non-negative integer, got '{s}'"
            )),
        })?;
        Self::try_from(value)
    }
}

fn too_large(value: &str) -> ActstreamError {
    ActstreamError::InvalidArgument(format!(
        "aggressiveness {value} is too large (maximum is {})",
        usize::MAX.min(i64::MAX as usize)
    ))
}

impl fmt::Display for Aggressiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A verb together with the actions flushed for it, in input order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<A> {
    pub verb: String,
    pub actions: Vec<A>,
}

impl<A> Group<A> {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GroupVerbs
// ---------------------------------------------------------------------------

/// Lazy iterator produced by [`group_verbs`].
///
/// Input is pulled only as far as needed to produce the next group, so
/// dropping the iterator early leaves nothing half-flushed.
pub struct GroupVerbs<I: Iterator> {
    actions: Fuse<I>,
    limit: usize,
    open: VecDeque<String>,
    buffers: HashMap<String, Vec<I::Item>>,
}

impl<I> GroupVerbs<I>
where
    I: Iterator,
    I::Item: HasVerb,
{
    pub fn new(actions: I, aggressiveness: Aggressiveness) -> Self {
        Self {
            actions: actions.fuse(),
            limit: aggressiveness.get(),
            open: VecDeque::new(),
            buffers: HashMap::new(),
        }
    }

    fn flush_oldest(&mut self) -> Option<Group<I::Item>> {
        let verb = self.open.pop_front()?;
        let actions = self.buffers.remove(&verb).unwrap_or_default();
        tracing::trace!(verb = %verb, size = actions.len(), "flushing verb group");
        Some(Group { verb, actions })
    }
}

impl<I> Iterator for GroupVerbs<I>
where
    I: Iterator,
    I::Item: HasVerb,
{
    type Item = Group<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(action) = self.actions.next() {
            if let Some(buffer) = self.buffers.get_mut(action.verb()) {
                buffer.push(action);
                continue;
            }

            let flushed = if self.open.len() > self.limit {
                self.flush_oldest()
            } else {
                None
            };

            let verb = action.verb().to_owned();
            self.open.push_back(verb.clone());
            self.buffers.insert(verb, vec![action]);

            if flushed.is_some() {
                return flushed;
            }
        }

        self.flush_oldest()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.actions.size_hint();
        let open = self.open.len();
        (open, upper.and_then(|u| u.checked_add(open)))
    }
}

impl<I> FusedIterator for GroupVerbs<I>
where
    I: Iterator,
    I::Item: HasVerb,
{
}

/// Group `actions` by verb, allowing up to `aggressiveness` extra verbs to
/// stay open at once.
///
/// Fails with [`ActstreamError::InvalidArgument`] when `aggressiveness` is
/// negative.
pub fn group_verbs<T>(actions: T, aggressiveness: i64) -> Result<GroupVerbs<T::IntoIter>>
where
    T: IntoIterator,
    T::Item: HasVerb,
{
    let aggressiveness = Aggressiveness::try_from(aggressiveness)?;
    Ok(GroupVerbs::new(actions.into_iter(), aggressiveness))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
