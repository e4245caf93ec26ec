//! Plan and insert cross-site links for a tree of rendered sites.
//!
//! Expects `{base-dir}/{domain}/**/*.html`. Pages are grouped by the topic
//! their title matches in the keyword table.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rs_pbnkit::{ClusterLinker, InsertOptions, KeywordMap, Result, Scheme, SchemeOptions};

#[derive(Parser, Debug)]
#[command(
    name = "pbn-link",
    about = "Build topic clusters and link their pages across sites"
)]
struct Cli {
    /// Directory holding one sub-directory per domain
    base_dir: PathBuf,

    /// JSON object mapping synonyms to canonical topics
    #[arg(long)]
    keywords: PathBuf,

    /// Only link this topic
    #[arg(long)]
    topic: Option<String>,

    /// Link topology: cluster, pyramid, mesh or hub_spoke
    #[arg(long, default_value = "cluster")]
    scheme: String,

    /// Cross-site links per page (cluster scheme)
    #[arg(long, default_value_t = 2)]
    links_per_page: usize,

    /// Skip the pass that gives every page an incoming cross-site link
    #[arg(long)]
    no_coverage: bool,

    /// Seed for reproducible plans
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum text length of an element that may host a link
    #[arg(long, default_value_t = 50)]
    min_text_length: usize,

    /// Plan links without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Write the link plan to this JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print coverage reports and the links summary
    #[arg(long)]
    report: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let keywords = KeywordMap::from_file(&cli.keywords)?;
    let scheme = cli.scheme.parse::<Scheme>().unwrap_or_else(|_| {
        log::warn!("Unknown scheme: {}, using cluster", cli.scheme);
        Scheme::Cluster
    });
    let scheme_options = SchemeOptions {
        external_links_per_page: cli.links_per_page,
        ensure_full_coverage: !cli.no_coverage,
        ..SchemeOptions::default()
    };
    let insert_options = InsertOptions {
        min_text_length: cli.min_text_length,
        ..InsertOptions::default()
    };

    let mut linker = ClusterLinker::new(&cli.base_dir, keywords).with_insert_options(insert_options);
    if let Some(seed) = cli.seed {
        linker = linker.with_seed(seed);
    }

    if linker.build_clusters().is_empty() {
        println!("No clusters found under {}", cli.base_dir.display());
        return Ok(());
    }

    let planned = linker.create_links(cli.topic.as_deref(), scheme, &scheme_options);
    println!("Planned {planned} links with the {scheme} scheme");

    if cli.dry_run {
        println!("Dry run, no files changed");
    } else if planned > 0 {
        let stats = linker.insert_all_links();
        println!("Inserted links: {stats}");
    }

    if cli.report {
        println!("{}", linker.coverage_report_text(cli.topic.as_deref()));
        println!("{}", linker.links_summary());
    }

    if let Some(path) = &cli.export {
        linker.export_links_json(path)?;
        println!("Link plan written to {}", path.display());
    }
    Ok(())
}
