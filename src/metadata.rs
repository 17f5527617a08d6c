use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::TagEncResult;
use crate::id3v1;

/// Text fields rewritten on a file.
pub const FILE_FIELDS: [&str; 3] = ["title", "artist", "album"];

/// Text fields rewritten on a cluster's own metadata.
pub const CLUSTER_FIELDS: [&str; 2] = ["artist", "album"];

/// Field name to text value. Reading a missing field yields `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map_or("", String::as_str)
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Metadata {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Normal,
    Changed,
}

/// An audio file: live metadata plus the snapshot read from its tags.
#[derive(Debug, Clone)]
pub struct File {
    pub path: PathBuf,
    pub metadata: Metadata,
    orig_metadata: Metadata,
    state: FileState,
    updates: usize,
}

impl File {
    /// The snapshot is taken from `metadata` as given.
    pub fn new<P: Into<PathBuf>>(path: P, metadata: Metadata) -> Self {
        File {
            path: path.into(),
            orig_metadata: metadata.clone(),
            metadata,
            state: FileState::Normal,
            updates: 0,
        }
    }

    /// Load a file, reading its ID3v1 tag the way a host would (as Latin-1).
    /// A file without a tag gets empty metadata.
    pub fn open<P: AsRef<Path>>(path: P) -> TagEncResult<Self> {
        let path = path.as_ref();
        let metadata = match id3v1::read_tag(path)? {
            Some(m) => m,
            None => {
                log::warn!("no ID3v1 tag in {}", path.display());
                Metadata::new()
            }
        };
        Ok(File::new(path, metadata))
    }

    pub fn orig_metadata(&self) -> &Metadata {
        &self.orig_metadata
    }

    pub fn state(&self) -> FileState {
        self.state
    }

    /// Number of refresh signals received.
    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Refresh derived state after the live metadata was edited.
    pub fn update(&mut self) {
        self.state = if self.metadata == self.orig_metadata {
            FileState::Normal
        } else {
            FileState::Changed
        };
        self.updates += 1;
        log::trace!("refreshed {} ({:?})", self.path.display(), self.state);
    }
}

/// A group of files sharing artist/album metadata.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    pub metadata: Metadata,
    pub files: Vec<File>,
    updates: usize,
}

impl Cluster {
    pub fn new(album: &str, artist: &str) -> Self {
        let mut metadata = Metadata::new();
        metadata.set("album", album);
        metadata.set("artist", artist);
        Cluster {
            metadata,
            files: Vec::new(),
            updates: 0,
        }
    }

    /// Build a cluster named after the first file's album and artist.
    pub fn from_files(files: Vec<File>) -> Self {
        let (album, artist) = files
            .first()
            .map(|f| (f.metadata.get("album"), f.metadata.get("artist")))
            .unwrap_or_default();
        let mut cluster = Cluster::new(album, artist);
        cluster.files = files;
        cluster
    }

    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    pub fn update_count(&self) -> usize {
        self.updates
    }

    pub fn update(&mut self) {
        self.updates += 1;
        log::trace!(
            "refreshed cluster {} / {}",
            self.metadata.get("album"),
            self.metadata.get("artist")
        );
    }
}
