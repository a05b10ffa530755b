use clap::{Parser, ValueEnum};
use lbpp::sources::PageSource;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lbpp")]
#[command(about = "Adds outbound search links under a film page's details")]
#[command(version)]
pub struct Args {
    /// Film page to augment (URL, file path, or `-` for stdin)
    pub source: String,

    /// Source type
    #[arg(short = 't', long = "type", value_enum, default_value_t = SourceTypeArg::Auto)]
    pub type_: SourceTypeArg,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the augmented page here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// URL the page was served from, for activation checks on file/stdin input
    #[arg(long)]
    pub page_url: Option<String>,

    /// Request every icon and bake failures into the output
    #[arg(long)]
    pub fetch_icons: bool,

    /// Stop waiting for icon requests after this many seconds and write what is known
    #[arg(long, default_value_t = 15)]
    pub settle_secs: u64,

    /// Print the link list as JSON instead of the augmented page
    #[arg(long)]
    pub links_only: bool,

    /// WebDriver endpoint for web sources (overrides config and WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceTypeArg {
    /// URL if the source has an http(s) scheme, stdin for `-`, file otherwise
    Auto,
    Web,
    File,
    Stdin,
}

/// Convert from CLI arguments to a page source
pub fn convert_source(arg_type: SourceTypeArg, source: &str) -> PageSource {
    match arg_type {
        SourceTypeArg::Web => PageSource::Web(source.to_string()),
        SourceTypeArg::File => PageSource::File(PathBuf::from(source)),
        SourceTypeArg::Stdin => PageSource::Stdin,
        SourceTypeArg::Auto => {
            if source == "-" {
                PageSource::Stdin
            } else if source.starts_with("http://") || source.starts_with("https://") {
                PageSource::Web(source.to_string())
            } else {
                PageSource::File(PathBuf::from(source))
            }
        }
    }
}
