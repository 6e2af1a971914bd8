//! Command-line front end: reconstruct Java stubs from a javadoc HTML tree.

use std::{
    env,
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use libdocskel::{
    DEFAULT_THEME, Docskel, Extraction, Filter, Format, Highlighter, Progress, SearchDomain,
    SearchOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments.
struct Cli {
    /// Documentation root: the directory holding the all-types index, or a file inside it
    #[arg(default_value = "./")]
    root: PathBuf,

    /// Output the extracted model as raw JSON instead of Java stubs
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// List packages, types and members instead of rendering stubs
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Render only items matching this query
    #[arg(long)]
    search: Option<String>,

    /// Domains searched by --search: name, doc, path, signature
    #[arg(long, value_delimiter = ',', value_parser = ["name", "doc", "path", "signature"])]
    search_spec: Vec<String>,

    /// Match --search case-sensitively
    #[arg(long, default_value_t = false)]
    case_sensitive: bool,

    /// Render only matched members of matched types, not their full contents
    #[arg(long, default_value_t = false)]
    direct_match: bool,

    /// Write one .java file per top-level type under this directory
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pair the packages and types of ROOT with those of this second documentation root
    #[arg(long = "match", value_name = "OTHER_ROOT")]
    match_root: Option<PathBuf>,

    /// Accept absolute links under these documentation roots
    #[arg(long = "external-root", value_delimiter = ',', env = "DOCSKEL_EXTERNAL_ROOTS")]
    external_roots: Vec<String>,

    /// Extract only types whose canonical name matches this regular expression
    #[arg(long)]
    filter: Option<String>,

    /// Read the tree as this format instead of detecting it: legacy, jdk8, jdk11, jdk12, jdk13
    #[arg(long)]
    format: Option<Format>,

    /// Omit comments from rendered stubs
    #[arg(long, default_value_t = false)]
    no_comments: bool,

    /// Omit the frontmatter header from rendered stubs
    #[arg(long, default_value_t = false)]
    no_frontmatter: bool,

    /// Colorize output
    #[arg(long, default_value = "auto", value_parser = ["auto", "always", "never"], env = "DOCSKEL_COLOR")]
    color: String,

    /// Highlighting theme for colorized stubs
    #[arg(long, default_value = DEFAULT_THEME, env = "DOCSKEL_THEME")]
    theme: String,

    /// Paint the theme background behind colorized stubs
    #[arg(long, default_value_t = false)]
    theme_background: bool,

    /// Print the available highlighting themes and exit
    #[arg(long, default_value_t = false)]
    list_themes: bool,

    /// Disable paging
    #[arg(long, default_value_t = false)]
    no_page: bool,

    /// Enable quiet mode: errors only, no progress or failure summary
    #[arg(long, short, default_value_t = false)]
    quiet: bool,

    /// Log more detail; repeat for trace output
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(cli: &Cli) {
    let default = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn search_options(cli: &Cli, query: &str) -> SearchOptions {
    let mut options = SearchOptions::new(query);
    options.case_sensitive = cli.case_sensitive;
    options.expand_containers = !cli.direct_match;
    options.domains = cli
        .search_spec
        .iter()
        .fold(SearchDomain::empty(), |acc, spec| {
            acc | match spec.as_str() {
                "name" => SearchDomain::NAMES,
                "doc" => SearchDomain::DOCS,
                "path" => SearchDomain::PATHS,
                _ => SearchDomain::SIGNATURES,
            }
        });
    options.ensure_domains();
    options
}

/// Extract the tree, drawing a one-line progress counter on an interactive stderr.
fn inspect(ds: &Docskel, cli: &Cli, root: &PathBuf) -> Result<Extraction> {
    let show = !cli.quiet && cli.verbose == 0 && io::stderr().is_terminal();
    let mut progress = |event: Progress| match event {
        Progress::Type { index, total, name } if show => {
            eprint!("\r\x1b[2K[{}/{total}] {name}", index + 1);
        }
        Progress::Linking if show => eprint!("\r\x1b[2K"),
        other => debug!("{other:?}"),
    };
    ds.inspect_with_progress(root, &mut progress)
        .with_context(|| format!("reading {}", root.display()))
}

fn run(cli: &Cli) -> Result<()> {
    if cli.list_themes {
        println!("{}", Highlighter::themes().join("\n"));
        return Ok(());
    }
    let should_highlight = match cli.color.as_str() {
        "never" => false,
        "always" => true,
        _ => io::stdout().is_terminal(),
    };

    let ds = Docskel::new()
        .with_external_roots(cli.external_roots.iter().cloned())
        .with_filter(Filter::new(cli.filter.as_deref())?)
        .with_format(cli.format)
        .with_comments(!cli.no_comments)
        .with_frontmatter(!cli.no_frontmatter);

    if let Some(other) = &cli.match_root {
        let correspondence = ds.correspond(&cli.root, other)?;
        let mut output = String::new();
        for (left, right) in &correspondence.packages {
            output.push_str(&format!("package {left:?} -> {right:?}\n"));
        }
        for (left, right) in &correspondence.types {
            output.push_str(&format!("type {left} -> {right}\n"));
        }
        return emit(cli, output, false);
    }

    let extraction = inspect(&ds, cli, &cli.root)?;

    let (output, is_java) = if cli.raw {
        (serde_json::to_string_pretty(&extraction)?, false)
    } else if cli.list {
        let options = cli.search.as_deref().map(|q| search_options(cli, q));
        let items = ds.list_extraction(&extraction, options.as_ref());
        let width = items
            .iter()
            .map(|item| item.kind.label().len())
            .max()
            .unwrap_or(0);
        let lines: Vec<String> = items
            .iter()
            .map(|item| format!("{:<width$}  {}", item.kind.label(), item.path))
            .collect();
        (lines.join("\n"), false)
    } else if let Some(query) = &cli.search {
        let response = ds.search_extraction(&cli.root, &extraction, &search_options(cli, query))?;
        if response.results.is_empty() {
            eprintln!("No matches found for \"{query}\"");
        }
        (response.rendered, true)
    } else if let Some(out) = &cli.out {
        let written = ds.write_tree(&cli.root, &extraction, out)?;
        if !cli.quiet {
            eprintln!("Wrote {} files under {}", written.len(), out.display());
        }
        (String::new(), false)
    } else {
        (ds.render_extraction(&cli.root, &extraction)?, true)
    };

    if !cli.quiet && !extraction.report.failures.is_empty() {
        eprint!("{}", extraction.report.summary());
    }
    if output.is_empty() {
        return Ok(());
    }
    emit(cli, output, is_java && should_highlight)
}

/// Print `output`, highlighted and paged as requested.
fn emit(cli: &Cli, output: String, highlight: bool) -> Result<()> {
    let output = if highlight {
        Highlighter::new()
            .with_theme(&cli.theme)
            .with_background(cli.theme_background)
            .highlight(&output)?
    } else {
        output
    };
    if io::stdout().is_terminal() && !cli.no_page {
        page_output(output)
    } else {
        println!("{output}");
        Ok(())
    }
}

fn page_output(content: String) -> Result<()> {
    let pager = env::var("PAGER").unwrap_or_else(|_| "less -R".to_string());
    let words = shell_words::split(&pager).context("parsing $PAGER")?;
    let Some((program, args)) = words.split_first() else {
        println!("{content}");
        return Ok(());
    };
    let Ok(program) = which::which(program) else {
        debug!("pager {program} not found, writing to stdout");
        println!("{content}");
        return Ok(());
    };
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .context("starting pager")?;

    let Some(mut stdin) = child.stdin.take() else {
        bail!("Failed to open stdin for pager");
    };

    std::thread::spawn(move || {
        stdin.write_all(content.as_bytes()).ok();
        // Dropping stdin signals EOF to the pager.
        drop(stdin);
    });

    let status = child.wait().context("waiting for pager")?;
    if !status.success() {
        eprintln!("Pager exited with non-zero status: {status}");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
