//! Splice new content into one rendered page, in place.
//!
//! With `--analyze` the page is only inspected and the structure report is
//! printed as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rs_pbnkit::{encoding, meta, ContentEngine, Error, OutputEncoding, Result, SpliceOptions};

#[derive(Parser, Debug)]
#[command(
    name = "pbn-replace",
    about = "Replace the article or listing content of a rendered WordPress page"
)]
struct Cli {
    /// Page to rewrite
    html_file: PathBuf,

    /// HTML fragment holding the new content (first <h1> becomes the title)
    fragment_file: PathBuf,

    /// Write UTF-8 and rewrite charset declarations instead of keeping the
    /// page's own encoding
    #[arg(long)]
    force_utf8: bool,

    /// New <title>, og:title, twitter:title and JSON-LD name
    #[arg(long)]
    title: Option<String>,

    /// New meta description, og:description, twitter:description and
    /// JSON-LD description
    #[arg(long)]
    description: Option<String>,

    /// Only print the page structure as JSON, change nothing
    #[arg(long)]
    analyze: bool,
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
    if cli.analyze {
        let (raw_html, _) = encoding::transcode_to_utf8(&read(&cli.html_file)?);
        let report = ContentEngine::new(&raw_html)?.analyze();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let fragment = String::from_utf8_lossy(&read(&cli.fragment_file)?).into_owned();
    let options = SpliceOptions {
        output_encoding: if cli.force_utf8 {
            OutputEncoding::ForceUtf8
        } else {
            OutputEncoding::Preserve
        },
        ..SpliceOptions::default()
    };

    let page_type = rs_pbnkit::replace_file(&cli.html_file, &fragment, &options)?;
    println!("{}: replaced {page_type} content", cli.html_file.display());

    if cli.title.is_some() || cli.description.is_some() {
        let bytes = read(&cli.html_file)?;
        let (html, detected) = encoding::transcode_to_utf8(&bytes);
        let html = rewrite_meta(&html, cli.title.as_deref(), cli.description.as_deref());
        write(&cli.html_file, &encoding::encode(&html, detected))?;
        println!("{}: head metadata updated", cli.html_file.display());
    }
    Ok(())
}

fn rewrite_meta(html: &str, title: Option<&str>, description: Option<&str>) -> String {
    match (title, description) {
        (Some(title), Some(description)) => meta::update_head_meta(html, title, description),
        (Some(title), None) => {
            let mut out = meta::replace_title(html, title);
            out = meta::replace_og_title(&out, title);
            out = meta::replace_twitter_title(&out, title);
            meta::replace_json_ld_field(&out, "name", title)
        }
        (None, Some(description)) => {
            let mut out = meta::replace_meta_content(html, "name", "description", description).0;
            out = meta::replace_meta_content(&out, "property", "og:description", description).0;
            out = meta::replace_twitter_description(&out, description);
            meta::replace_json_ld_field(&out, "description", description)
        }
        (None, None) => html.to_string(),
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
