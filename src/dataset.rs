use crate::error::{Result, TreemapError};
use crate::hierarchy::RawNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum DatasetPreset {
    #[default]
    VideoGames,
    Movies,
    Kickstarter,
}

impl DatasetPreset {
    pub const ALL: [DatasetPreset; 3] = [Self::VideoGames, Self::Movies, Self::Kickstarter];

    pub fn info(self) -> DatasetInfo {
        let (title, description, url) = match self {
            Self::VideoGames => (
                "Video Game Sales",
                "Top 100 Most Sold Video Games Grouped by Platform",
                "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/video-game-sales-data.json",
            ),
            Self::Movies => (
                "Movie Sales",
                "Top 100 Highest Grossing Movies Grouped By Genre",
                "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json",
            ),
            Self::Kickstarter => (
                "Kickstarter Pledges",
                "Top 100 Most Pledged Kickstarter Campaigns Grouped By Category",
                "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/kickstarter-funding-data.json",
            ),
        };
        DatasetInfo {
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        }
    }
}

/// Where dataset documents come from.
pub trait DatasetSource {
    fn fetch(&self, dataset: &DatasetInfo) -> Result<RawNode>;
}

/// Reads datasets from local files, keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    files: HashMap<String, PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, url: &str, path: impl Into<PathBuf>) -> Self {
        self.files.insert(url.to_string(), path.into());
        self
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self, dataset: &DatasetInfo) -> Result<RawNode> {
        let path = self
            .files
            .get(&dataset.url)
            .ok_or_else(|| TreemapError::fetch(&dataset.title, "no local file registered"))?;
        let contents = std::fs::read_to_string(path)
            .map_err(|err| TreemapError::fetch(&dataset.title, err))?;
        serde_json::from_str(&contents).map_err(|err| TreemapError::fetch(&dataset.title, err))
    }
}

/// In-memory documents, keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, json: &str) -> Self {
        self.documents.insert(url.to_string(), json.to_string());
        self
    }
}

impl DatasetSource for StaticSource {
    fn fetch(&self, dataset: &DatasetInfo) -> Result<RawNode> {
        let json = self
            .documents
            .get(&dataset.url)
            .ok_or_else(|| TreemapError::fetch(&dataset.title, "document not found"))?;
        serde_json::from_str(json).map_err(|err| TreemapError::fetch(&dataset.title, err))
    }
}

/// Blocking HTTP GET of the dataset URL.
#[cfg(feature = "fetch")]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("treemap-rs-renderer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| TreemapError::fetch("<client>", format!("failed to create HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "fetch")]
impl DatasetSource for HttpSource {
    fn fetch(&self, dataset: &DatasetInfo) -> Result<RawNode> {
        tracing::info!(url = %dataset.url, "fetching dataset");
        let response = self
            .client
            .get(&dataset.url)
            .send()
            .map_err(|err| TreemapError::fetch(&dataset.title, format!("request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TreemapError::fetch(
                &dataset.title,
                format!("server returned {status}"),
            ));
        }
        response
            .json::<RawNode>()
            .map_err(|err| TreemapError::fetch(&dataset.title, format!("invalid JSON: {err}")))
    }
}
