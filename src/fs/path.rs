//! Virtual paths of the DeepBox hierarchy.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Path delimiter.
pub const DELIMITER: char = '/';

/// Whether a path names a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathType {
    File,
    Directory,
}

/// An immutable slash-delimited path.
///
/// Equality and hashing only look at the segment sequence; the type tag,
/// the volume flag and an attached identifier do not take part.
#[derive(Debug, Clone)]
pub struct VirtualPath {
    segments: Vec<String>,
    path_type: PathType,
    volume: bool,
    file_id: Option<String>,
}

impl VirtualPath {
    /// The root directory `/`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            path_type: PathType::Directory,
            volume: true,
            file_id: None,
        }
    }

    /// Parse an absolute or relative path string.
    ///
    /// Empty segments are dropped, so `"/a//b/"` and `"a/b"` are the same path.
    /// Leading and trailing whitespace inside a segment is kept.
    pub fn parse(path: &str, path_type: PathType) -> Self {
        let segments: Vec<String> = path
            .split(DELIMITER)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            return Self::root();
        }
        Self {
            segments,
            path_type,
            volume: false,
            file_id: None,
        }
    }

    /// Shorthand for a directory path.
    pub fn directory(path: &str) -> Self {
        Self::parse(path, PathType::Directory)
    }

    /// Shorthand for a file path.
    pub fn file(path: &str) -> Self {
        Self::parse(path, PathType::File)
    }

    /// A child of this path. `name` is normalized with [`normalize_name`].
    pub fn child(&self, name: &str, path_type: PathType) -> Self {
        let mut segments = self.segments.clone();
        segments.push(normalize_name(name));
        Self {
            segments,
            path_type,
            volume: false,
            file_id: None,
        }
    }

    /// The parent directory, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(self.prefix(self.depth() - 1))
    }

    /// The ancestor at `depth` (1 = organization level), or the path itself
    /// when `depth` equals its own depth.
    pub fn ancestor(&self, depth: usize) -> Option<Self> {
        match depth {
            0 => Some(Self::root()),
            d if d < self.depth() => Some(self.prefix(d)),
            d if d == self.depth() => Some(self.clone().without_file_id()),
            _ => None,
        }
    }

    /// Every prefix from depth 1 down to the path itself, root excluded.
    ///
    /// The entries carry no identifiers so they can be used as cache keys.
    pub fn lineage(&self) -> Vec<Self> {
        (1..=self.depth())
            .filter_map(|depth| self.ancestor(depth))
            .collect()
    }

    fn prefix(&self, depth: usize) -> Self {
        if depth == 0 {
            return Self::root();
        }
        Self {
            segments: self.segments[..depth].to_vec(),
            path_type: PathType::Directory,
            volume: false,
            file_id: None,
        }
    }

    /// Last segment, empty for the root.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Distance from the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_directory(&self) -> bool {
        self.path_type == PathType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.path_type == PathType::File
    }

    pub fn path_type(&self) -> PathType {
        self.path_type
    }

    /// Whether this path is marked as a container boundary.
    pub fn is_volume(&self) -> bool {
        self.volume
    }

    pub fn with_volume(mut self, volume: bool) -> Self {
        self.volume = volume;
        self
    }

    /// Identifier attached by a listing or attribute lookup.
    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    pub fn with_file_id(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = Some(file_id.into());
        self
    }

    pub fn without_file_id(mut self) -> Self {
        self.file_id = None;
        self
    }

    /// True if `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &VirtualPath) -> bool {
        self.depth() > ancestor.depth() && self.segments.starts_with(&ancestor.segments)
    }

    /// Absolute string form, `/` for the root.
    pub fn absolute(&self) -> String {
        if self.is_root() {
            return DELIMITER.to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push(DELIMITER);
            out.push_str(segment);
        }
        out
    }
}

impl PartialEq for VirtualPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for VirtualPath {}

impl Hash for VirtualPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.absolute())
    }
}

/// Turn a remote display name into a single path segment.
///
/// A name containing the delimiter keeps only its last component.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim_end_matches(DELIMITER);
    match trimmed.rsplit(DELIMITER).next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => name.to_string(),
    }
}
