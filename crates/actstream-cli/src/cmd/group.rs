use super::{read_actions, resolve_aggressiveness};
use crate::output::{print_json, print_table};
use actstream_core::config::Config;
use actstream_core::GroupVerbs;
use anyhow::Context;
use std::path::Path;

pub fn run(
    root: &Path,
    file: &Path,
    aggressiveness: Option<&str>,
    newest_first: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let aggressiveness = resolve_aggressiveness(&config, aggressiveness)?;
    let actions = read_actions(file, newest_first)?;

    let groups: Vec<_> = GroupVerbs::new(actions.into_iter(), aggressiveness).collect();

    if json {
        print_json(&serde_json::json!({
            "aggressiveness": aggressiveness,
            "groups": groups,
        }))?;
        return Ok(());
    }

    if groups.is_empty() {
        println!("No actions.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            let summary: Vec<String> = g.actions.iter().map(|a| a.to_string()).collect();
            vec![g.verb.clone(), g.len().to_string(), summary.join("; ")]
        })
        .collect();
    print_table(&["VERB", "COUNT", "ACTIONS"], &rows);
    Ok(())
}
