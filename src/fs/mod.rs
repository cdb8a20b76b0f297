/// Virtual filesystem: the path model and the navigation interface the
/// shell delegates to.

pub mod vfs;

use std::fmt;

use thiserror::Error;

pub use vfs::VirtualFs;

/// One named component of a path. The root segment is named `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
}

/// Current working directory as an ordered list of segments.
/// Never empty: the root segment is always first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn root() -> Self {
        Path { segments: vec![Segment { name: "/".into() }] }
    }

    /// Build from an absolute string such as `/home/user`.
    /// Empty components and a missing leading slash are tolerated.
    pub fn parse(abs: &str) -> Self {
        let mut path = Path::root();
        for part in abs.split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push(&mut self, name: &str) {
        self.segments.push(Segment { name: name.to_string() });
    }

    /// Drop the last segment. The root is never removed.
    pub fn pop(&mut self) {
        if self.segments.len() > 1 {
            self.segments.pop();
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Segment names below the root.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.segments[1..].iter().map(|s| s.name.as_str())
    }

    pub fn file_name(&self) -> &str {
        &self.segments[self.segments.len() - 1].name
    }
}

/// Segment names joined with `/` after every segment but the first and
/// the last: `["/", "home", "user"]` → `/home/user`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.segments.len() - 1;
        for (i, seg) in self.segments.iter().enumerate() {
            f.write_str(&seg.name)?;
            if i != 0 && i < last {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("no such file or directory")]
    NotFound,
    #[error("not a directory")]
    NotADirectory,
    #[error("is a directory")]
    IsADirectory,
}

/// Navigation interface used by `cd`, `pwd`, `ls` and `cat`.
pub trait FileSystem {
    /// The user's home directory.
    fn go_home(&self) -> Path;

    /// Resolve `target` against `cwd`. Supports `/`, `~`, `.` and `..`.
    /// The result must name an existing entry.
    fn resolve(&self, cwd: &Path, target: &str) -> Result<Path, FsError>;

    fn kind(&self, path: &Path) -> Option<EntryKind>;

    /// Entries of a directory, sorted by name.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, FsError>;

    fn read(&self, file: &Path) -> Result<String, FsError>;
}
