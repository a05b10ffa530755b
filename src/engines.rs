use crate::extract::Identity;

/// How an engine wants the title and year phrased
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryForm {
    /// `title year`
    Plain,
    /// `title year trailer`
    Trailer,
    /// `title (year film)`, the encyclopedia's disambiguation style
    Film,
    /// `title:(title) AND year:(year)`
    ArchiveFields,
    /// Directory-listing search for video files
    OpenDirectory,
}

impl QueryForm {
    /// Builds the raw (unencoded) query string for `identity`
    pub fn format(&self, identity: &Identity) -> String {
        let Identity { title, year } = identity;
        match self {
            QueryForm::Plain => format!("{title} {year}"),
            QueryForm::Trailer => format!("{title} {year} trailer"),
            QueryForm::Film => format!("{title} ({year} film)"),
            QueryForm::ArchiveFields => format!("title:({title}) AND year:({year})"),
            QueryForm::OpenDirectory => {
                format!("intitle:\"index of\" \"{title}\" {year} (mkv|mp4|avi)")
            }
        }
    }
}

/// One query-string parameter, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// Carries the percent-encoded query
    Query(&'static str),
    /// Fixed flag, emitted verbatim (already encoded)
    Static(&'static str, &'static str),
}

/// A search engine's URL contract
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    /// Short display code
    pub label: &'static str,
    pub endpoint: &'static str,
    pub params: &'static [Param],
    pub form: QueryForm,
    /// Set where the auto-icon service is known to return nothing useful
    pub icon: Option<&'static str>,
}

/// Every engine, in panel order
pub static ENGINES: &[Engine] = &[
    Engine {
        label: "YT",
        endpoint: "https://www.youtube.com/results",
        params: &[Param::Query("search_query")],
        form: QueryForm::Trailer,
        icon: None,
    },
    Engine {
        label: "WIKI",
        endpoint: "https://en.wikipedia.org/w/index.php",
        params: &[
            Param::Query("search"),
            Param::Static("title", "Special%3ASearch"),
            Param::Static("ns0", "1"),
        ],
        form: QueryForm::Film,
        icon: None,
    },
    Engine {
        label: "IA",
        endpoint: "https://archive.org/search",
        params: &[Param::Query("query")],
        form: QueryForm::ArchiveFields,
        icon: None,
    },
    Engine {
        label: "DDG",
        endpoint: "https://duckduckgo.com/",
        params: &[Param::Query("q"), Param::Static("ia", "web")],
        form: QueryForm::Plain,
        icon: None,
    },
    Engine {
        label: "TD",
        endpoint: "https://www.torrentdownloads.pro/search/",
        params: &[Param::Query("search")],
        form: QueryForm::Plain,
        icon: Some("https://www.torrentdownloads.pro/favicon.ico"),
    },
    Engine {
        label: "FP",
        endpoint: "https://filepursuit.com/pursuit",
        params: &[Param::Query("q"), Param::Static("type", "video")],
        form: QueryForm::Plain,
        icon: None,
    },
    Engine {
        label: "DIR",
        endpoint: "https://www.google.com/search",
        params: &[Param::Query("q")],
        form: QueryForm::OpenDirectory,
        icon: None,
    },
];
