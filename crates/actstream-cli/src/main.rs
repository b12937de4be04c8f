mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "actstream",
    about = "Group and render activity streams by verb",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: directory holding .actstream.yaml, else cwd)
    #[arg(long, global = true, env = "ACTSTREAM_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a file of actions groups by verb
    Group {
        /// Action list (.yaml, .yml or .json)
        file: PathBuf,
        /// Extra verbs allowed to stay open (default: from config)
        #[arg(long, short = 'a', allow_hyphen_values = true)]
        aggressiveness: Option<String>,
        /// Sort by timestamp, most recent first, before grouping
        #[arg(long)]
        newest_first: bool,
    },

    /// Render a file of actions through the activity templates
    Render {
        /// Action list (.yaml, .yml or .json)
        file: PathBuf,
        /// Extra verbs allowed to stay open (default: from config)
        #[arg(long, short = 'a', allow_hyphen_values = true)]
        aggressiveness: Option<String>,
        /// Template directory (default: templates.dir from config)
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Render each action on its own instead of grouping
        #[arg(long)]
        each: bool,
        /// Sort by timestamp, most recent first, before rendering
        #[arg(long)]
        newest_first: bool,
    },

    /// Inspect and validate .actstream.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Group {
            file,
            aggressiveness,
            newest_first,
        } => cmd::group::run(
            &root,
            &file,
            aggressiveness.as_deref(),
            newest_first,
            cli.json,
        ),
        Commands::Render {
            file,
            aggressiveness,
            templates,
            each,
            newest_first,
        } => cmd::render::run(
            &root,
            &file,
            cmd::render::RenderOptions {
                aggressiveness: aggressiveness.as_deref(),
                templates: templates.as_deref(),
                each,
                newest_first,
            },
            cli.json,
        ),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
