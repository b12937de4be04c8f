pub mod config;
pub mod group;
pub mod render;

use actstream_core::action::{load_actions, sort_newest_first, Action};
use actstream_core::config::Config;
use actstream_core::Aggressiveness;
use anyhow::Context;
use std::path::Path;

/// `--aggressiveness` wins over `grouping.aggressiveness` from the config.
pub(crate) fn resolve_aggressiveness(
    config: &Config,
    explicit: Option<&str>,
) -> anyhow::Result<Aggressiveness> {
    match explicit {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("bad --aggressiveness '{raw}'")),
        None => config
            .aggressiveness()
            .context("bad grouping.aggressiveness in config"),
    }
}

pub(crate) fn read_actions(file: &Path, newest_first: bool) -> anyhow::Result<Vec<Action>> {
    let mut actions = load_actions(file)
        .with_context(|| format!("failed to load actions from {}", file.display()))?;
    if newest_first {
        sort_newest_first(&mut actions);
    }
    Ok(actions)
}
