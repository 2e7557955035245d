use anyhow::{anyhow, Error};
use clap::Parser;
use clap_verbosity_flag::Level as VerbosityLevel;
use clap_verbosity_flag::Verbosity;
use platforms_dto::{PlatformCaseStyle, PlatformCategory};
use platforms_tree::resolve::DEFAULT_URL_PREFIX;
use platforms_tree::{Registry, ResolveOptions};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::Subscriber;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    #[command(subcommand)]
    pub command: Command,

    /// Root of the platforms directory tree.
    #[clap(long, global = true, env = "PLATFORMS_ROOT", default_value = "platforms")]
    pub root: PathBuf,

    /// Prefix of every generated URL.
    #[clap(long, global = true, env = "PLATFORMS_URL_PREFIX", default_value = DEFAULT_URL_PREFIX)]
    pub url_prefix: String,

    /// Ignore fallbacks to platforms or guides that do not exist, instead of
    /// failing.
    #[clap(long, global = true, env = "PLATFORMS_LENIENT", hide_env_values = true)]
    pub lenient: bool,

    /// Output pretty formatted JSON (no colors).
    #[clap(long, global = true, env = "PLATFORMS_PRETTY", hide_env_values = true)]
    pub pretty: bool,

    #[command(flatten)]
    pub verbose: Verbosity,
}

impl Opts {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            url_prefix: self.url_prefix.clone(),
            strict: !self.lenient,
        }
    }

    /// `-q` turns logging off.
    fn max_log_level(&self) -> LevelFilter {
        match self.verbose.log_level() {
            None => LevelFilter::OFF,
            Some(VerbosityLevel::Error) => LevelFilter::ERROR,
            Some(VerbosityLevel::Warn) => LevelFilter::WARN,
            Some(VerbosityLevel::Info) => LevelFilter::INFO,
            Some(VerbosityLevel::Debug) => LevelFilter::DEBUG,
            Some(VerbosityLevel::Trace) => LevelFilter::TRACE,
        }
    }

    fn load(&self) -> Result<Registry, Error> {
        platforms_tree::load(&self.root, &self.resolve_options())
            .map_err(|e| anyhow!("{}: {e}", self.root.display()))
    }
}

#[derive(Debug, Parser)]
enum Command {
    /// List platforms.
    List(ListOpts),

    /// Get a platform, guide or integration by key. Platform aliases work too.
    Get(GetOpts),

    /// Search platforms, guides and integrations.
    Search(SearchOpts),

    /// Load the whole tree and check it. Outputs a summary.
    Validate,

    /// Output every resolved platform, with its guides and integrations.
    Dump,

    /// Convert a canonical option name (e.g. `before-send`) to a case style.
    Case(CaseOpts),
}

#[derive(Debug, Parser)]
pub struct ListOpts {
    /// Only list platforms in this category.
    #[clap(long, value_enum)]
    category: Option<PlatformCategory>,
}

#[derive(Debug, Parser)]
pub struct GetOpts {
    /// The key, e.g. `javascript` or `javascript.express`.
    key: String,
}

#[derive(Debug, Parser)]
pub struct SearchOpts {
    term: String,
}

#[derive(Debug, Parser)]
pub struct CaseOpts {
    /// The canonical name.
    name: String,

    /// The case style to apply.
    #[clap(long, value_enum, required_unless_present = "platform")]
    style: Option<PlatformCaseStyle>,

    /// Use the case style of this platform or guide.
    #[clap(long, conflicts_with = "style")]
    platform: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlatformListItem<'a> {
    key: &'a str,
    title: &'a str,
    url: &'a str,
    guides: usize,
    integrations: usize,
}

#[derive(Debug, Serialize)]
struct ValidateSummary {
    platforms: usize,
    guides: usize,
    integrations: usize,
}

fn output_json<J: Serialize>(out: &mut impl Write, value: J, opts: &Opts) -> Result<(), Error> {
    writeln!(
        out,
        "{}",
        if opts.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        }
    )?;
    Ok(())
}

fn list(out: &mut impl Write, opts: &Opts, list_opts: &ListOpts) -> Result<(), Error> {
    let registry = opts.load()?;
    let items: Vec<_> = registry
        .platforms()
        .iter()
        .filter(|p| list_opts.category.map_or(true, |c| p.config.has_category(c)))
        .map(|p| PlatformListItem {
            key: &p.key,
            title: p.display_title(),
            url: &p.url,
            guides: p.guides().len(),
            integrations: p.integrations().len(),
        })
        .collect();
    output_json(out, items, opts)
}

fn case(out: &mut impl Write, opts: &Opts, case_opts: &CaseOpts) -> Result<(), Error> {
    let style = match (case_opts.style, &case_opts.platform) {
        (Some(style), _) => style,
        (None, Some(key)) => {
            let registry = opts.load()?;
            let entry = registry
                .entry(key)
                .ok_or_else(|| anyhow!("no platform or guide named `{key}`"))?;
            entry.config().case_style.unwrap_or_default()
        }
        (None, None) => return Err(anyhow!("either --style or --platform is required")),
    };
    debug!(%style, name = %case_opts.name, "applying case style");
    output_json(out, style.apply(&case_opts.name), opts)
}

fn run(out: &mut impl Write, opts: &Opts) -> Result<(), Error> {
    match &opts.command {
        Command::List(list_opts) => list(out, opts, list_opts),
        Command::Get(GetOpts { key }) => {
            let registry = opts.load()?;
            let entry = registry
                .entry(key)
                .ok_or_else(|| anyhow!("no platform, guide or integration named `{key}`"))?;
            output_json(out, entry, opts)
        }
        Command::Search(SearchOpts { term }) => {
            let registry = opts.load()?;
            output_json(out, registry.search(term), opts)
        }
        Command::Validate => {
            let registry = opts.load()?;
            let summary = ValidateSummary {
                platforms: registry.len(),
                guides: registry.guides().count(),
                integrations: registry.integrations().count(),
            };
            output_json(out, summary, opts)
        }
        Command::Dump => {
            let registry = opts.load()?;
            output_json(out, &registry, opts)
        }
        Command::Case(case_opts) => case(out, opts, case_opts),
    }
}

fn main() {
    let opts = Opts::parse();

    // Initialize tracing.
    Subscriber::builder()
        .with_max_level(opts.max_log_level())
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();
    debug!(?opts);

    let stdout = std::io::stdout();
    if let Err(e) = run(&mut stdout.lock(), &opts) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
