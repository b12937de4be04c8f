use super::{read_actions, resolve_aggressiveness};
use crate::output::print_json;
use actstream_core::action::Action;
use actstream_core::config::Config;
use actstream_core::{Fragment, GroupVerbs, Renderer, TemplateDir};
use anyhow::Context;
use std::path::Path;

pub struct RenderOptions<'a> {
    pub aggressiveness: Option<&'a str>,
    pub templates: Option<&'a Path>,
    pub each: bool,
    pub newest_first: bool,
}

pub fn run(root: &Path, file: &Path, opts: RenderOptions<'_>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let templates = TemplateDir::new(match opts.templates {
        Some(dir) => dir.to_path_buf(),
        None => config.templates_dir(root),
    });
    let aggressiveness = resolve_aggressiveness(&config, opts.aggressiveness)?;
    let actions = read_actions(file, opts.newest_first)?;

    let mut renderer =
        Renderer::with_default_paths(|names: &[String], fragment: Fragment<'_, Action>| {
            templates.render(names, fragment)
        });

    let rendered = if opts.each {
        let mut out = String::new();
        for action in &actions {
            out.push_str(
                &renderer
                    .display_action(action)
                    .with_context(|| format!("failed to render '{action}'"))?,
            );
        }
        out
    } else {
        renderer
            .render_groups(GroupVerbs::new(actions.into_iter(), aggressiveness))
            .context("failed to render grouped actions")?
    };

    if json {
        print_json(&serde_json::json!({
            "templates": templates.root(),
            "output": rendered,
        }))?;
    } else {
        print!("{rendered}");
    }
    Ok(())
}
