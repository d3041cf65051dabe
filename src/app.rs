use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::{
    config::PstreeConfig,
    context::Config,
    logger::init_logger,
    prelude::*,
    process::{
        ProcessRecord, ProcessStore,
        source::{self, ProcessSource, PsOutputSource},
    },
    render::{Renderer, debug_table::build_process_table},
    tree::{build_hierarchy, find_root, mark_selected, prune},
    users::UserDirectory,
};
use clap::{
    Parser,
    builder::{Styles, styling},
};

fn create_styles() -> Styles {
    styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Cyan.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(version, about = "Display the process table as a tree", styles = create_styles())]
pub struct Cli {
    /// Show all processes
    #[arg(short, long)]
    pub all: bool,

    /// Show only branches containing processes of this user [default: current user]
    #[arg(short, long, env = "PSTREE_USER")]
    pub user: Option<String>,

    /// Don't show branches containing only root processes
    #[arg(short = 'U', long)]
    pub no_root: bool,

    /// Print the tree to this many levels deep [default: 100]
    #[arg(short, long, env = "PSTREE_LEVEL")]
    pub level: Option<usize>,

    /// Wide output, not truncated to the terminal width
    #[arg(short, long)]
    pub wide: bool,

    /// Graphics characters (0=ASCII, 1=IBM-850, 2=VT100, 3=UTF-8) [default: from locale]
    #[arg(short, long, env = "PSTREE_GRAPHICS")]
    pub graphics: Option<u8>,

    /// Print debugging info to stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Read `ps` output from this file instead of the process table, `-` for stdin
    #[arg(short, long, env = "PSTREE_INPUT")]
    pub input: Option<String>,

    /// Start from these PIDs, or show only branches whose command contains these texts
    #[arg(value_name = "PID|TEXT")]
    pub targets: Vec<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.debug)?;

    let pstree_config = PstreeConfig::load()?;
    let mut config = Config::try_from((&cli, &pstree_config))?;

    // A ~ may reach us unexpanded when the path comes from PSTREE_INPUT
    let input = cli
        .input
        .as_ref()
        .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()));
    let source: Box<dyn ProcessSource> = match input {
        Some(path) => Box::new(PsOutputSource::new(path)),
        None => source::live_source(),
    };
    debug!("Reading processes from {}", source.name());
    let records = source.read_processes(&mut UserDirectory::new())?;
    if records.is_empty() {
        error!("no processes read");
        return Ok(());
    }

    let lines = render_tree(records, &mut config, cli.debug)?;

    let graphics = config.render.graphics;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    out.write_all(graphics.chars().init.as_bytes())?;
    for line in &lines {
        out.write_all(&graphics.encode(line))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Build, filter and draw the forest for `records`.
///
/// Every target PID found is drawn as its own tree; without one the tree
/// starts at the system root. `dump` logs the store after each stage.
pub fn render_tree(
    records: Vec<ProcessRecord>,
    config: &mut Config,
    dump: bool,
) -> Result<Vec<String>> {
    let mut store = ProcessStore::new(records);
    debug!("{} processes read", store.len());

    let mut roots = config.resolve_targets(&store);

    build_hierarchy(&mut store);
    if dump {
        debug!("Process hierarchy:\n{}", build_process_table(&store, false));
    }

    mark_selected(&mut store, &config.selection);
    prune(&mut store);
    if dump {
        debug!("Selected processes:\n{}", build_process_table(&store, true));
    }

    if roots.is_empty() {
        roots.push(find_root(&store)?);
    }

    let renderer = Renderer::new(&store, &config.render);
    Ok(roots
        .into_iter()
        .flat_map(|root| renderer.render(root))
        .collect())
}
