use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("No matching version for '{slug}'{filters}\n\n\
             Hint: the project may not publish builds for this game version\n\
             or loader. Check the project page on Modrinth for the versions\n\
             it actually supports.")]
    NoMatchingVersion { slug: String, filters: String },

    #[error("Version of '{0}' has no downloadable files")]
    NoFiles(String),

    #[error("Failed to download {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid target '{0}'\n\n\
             Expected one of:\n\
               mod@loader\n\
               mod:version@loader\n\
               resourcepack@version\n\
               shader@shaderloader\n\
               modpack@loader\n\
               datapack@version")]
    InvalidTarget(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Error for a version list where no entry satisfied the filters.
    pub fn no_matching_version(slug: &str, game_version: &str, loader: &str) -> Self {
        let mut filters = String::new();
        if !game_version.is_empty() {
            filters.push_str(&format!(" (game version {})", game_version));
        }
        if !loader.is_empty() {
            filters.push_str(&format!(" (loader {})", loader));
        }
        Error::NoMatchingVersion {
            slug: slug.to_string(),
            filters,
        }
    }
}
