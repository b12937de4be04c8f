//! Helpers for rendering activity streams.
//!
//! The centerpiece is [`group::group_verbs`], a lazy partitioner that folds a
//! stream of actions into per-verb groups. [`render::Renderer`] turns those
//! groups into text through an injected template resolver and render
//! function.
//!
//! ```
//! use actstream_core::group::group_verbs;
//!
//! let verbs = ["post", "update", "update", "remove", "update"];
//! let groups: Vec<_> = group_verbs(verbs, 1)
//!     .unwrap()
//!     .map(|g| (g.verb, g.actions.len()))
//!     .collect();
//! assert_eq!(
//!     groups,
//!     vec![
//!         ("post".to_string(), 1),
//!         ("update".to_string(), 3),
//!         ("remove".to_string(), 1),
//!     ]
//! );
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod group;
pub mod paths;
pub mod render;

pub use action::{Action, HasVerb};
pub use error::{ActstreamError, Result};
pub use group::{group_verbs, Aggressiveness, Group, GroupVerbs};
pub use paths::TemplateKind;
pub use render::{Fragment, Renderer, TemplateDir};
