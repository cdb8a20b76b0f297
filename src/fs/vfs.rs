/// In-memory directory tree with the portfolio's files.

use std::collections::BTreeMap;

use super::{Entry, EntryKind, FileSystem, FsError, Path};

#[derive(Clone, Debug)]
enum Node {
    Dir(BTreeMap<String, Node>),
    File(String),
}

impl Node {
    fn kind(&self) -> EntryKind {
        match self {
            Node::Dir(_) => EntryKind::Dir,
            Node::File(_) => EntryKind::File,
        }
    }
}

#[derive(Clone, Debug)]
pub struct VirtualFs {
    root: Node,
    home: Path,
}

const ABOUT: &str = "# About\n\nHi! I build things for the web and for the terminal.\nThis site is a small playground: a biplane, a GameBoy cartridge, and this shell.\n";
const CONTACT: &str = "email: hello@example.com\ngithub: github.com/example\n";
const PROJECTS_README: &str = "# Projects\n\n- **termfolio**: this terminal, snake included\n- **gameboy**: exploded-view cartridge viewer\n- **14bis**: a biplane flying through clouds\n";
const MOTD: &str = "Welcome! Type `help` to get started.\n";

impl VirtualFs {
    /// An empty tree whose home directory is `home` (created on demand).
    pub fn empty(home: &str) -> Self {
        let mut fs = VirtualFs { root: Node::Dir(BTreeMap::new()), home: Path::parse(home) };
        let home = fs.home.clone();
        fs.mkdir_p(&home);
        fs
    }

    /// The default portfolio tree.
    pub fn portfolio(home: &str) -> Self {
        let mut fs = VirtualFs::empty(home);
        let base = fs.home.to_string();
        fs.add_file(&format!("{base}/about.md"), ABOUT);
        fs.add_file(&format!("{base}/contact.txt"), CONTACT);
        fs.add_file(&format!("{base}/projects/README.md"), PROJECTS_README);
        fs.add_file("/etc/motd", MOTD);
        fs
    }

    /// Add a file, creating parent directories.
    /// An existing directory at the same path is left alone.
    pub fn add_file(&mut self, abs: &str, content: &str) {
        let path = Path::parse(abs);
        if path.is_root() {
            return;
        }
        let mut parent = path.clone();
        parent.pop();
        let dir = self.mkdir_p(&parent);
        if let Node::Dir(children) = dir {
            let slot = children
                .entry(path.file_name().to_string())
                .or_insert_with(|| Node::File(String::new()));
            if let Node::File(text) = slot {
                *text = content.to_string();
            }
        }
    }

    /// Walk to `path`, creating directories. A file in the way is replaced.
    fn mkdir_p(&mut self, path: &Path) -> &mut Node {
        let mut node = &mut self.root;
        for name in path.components() {
            if let Node::File(_) = node {
                *node = Node::Dir(BTreeMap::new());
            }
            node = match node {
                Node::Dir(children) => children
                    .entry(name.to_string())
                    .or_insert_with(|| Node::Dir(BTreeMap::new())),
                Node::File(_) => unreachable!("replaced above"),
            };
        }
        if let Node::File(_) = node {
            *node = Node::Dir(BTreeMap::new());
        }
        node
    }

    fn node(&self, path: &Path) -> Option<&Node> {
        let mut node = &self.root;
        for name in path.components() {
            match node {
                Node::Dir(children) => node = children.get(name)?,
                Node::File(_) => return None,
            }
        }
        Some(node)
    }
}

impl FileSystem for VirtualFs {
    fn go_home(&self) -> Path {
        self.home.clone()
    }

    fn resolve(&self, cwd: &Path, target: &str) -> Result<Path, FsError> {
        let (mut path, rest) = if let Some(rest) = target.strip_prefix('/') {
            (Path::root(), rest)
        } else if target == "~" {
            (self.go_home(), "")
        } else if let Some(rest) = target.strip_prefix("~/") {
            (self.go_home(), rest)
        } else {
            (cwd.clone(), target)
        };

        for part in rest.split('/') {
            match part {
                "" | "." => {}
                ".." => path.pop(),
                name => {
                    match self.node(&path) {
                        Some(Node::Dir(children)) if children.contains_key(name) => path.push(name),
                        Some(Node::Dir(_)) | None => return Err(FsError::NotFound),
                        Some(Node::File(_)) => return Err(FsError::NotADirectory),
                    }
                }
            }
        }

        match self.node(&path) {
            Some(_) => Ok(path),
            None => Err(FsError::NotFound),
        }
    }

    fn kind(&self, path: &Path) -> Option<EntryKind> {
        self.node(path).map(Node::kind)
    }

    fn list(&self, dir: &Path) -> Result<Vec<Entry>, FsError> {
        match self.node(dir) {
            Some(Node::Dir(children)) => Ok(children
                .iter()
                .map(|(name, node)| Entry { name: name.clone(), kind: node.kind() })
                .collect()),
            Some(Node::File(_)) => Err(FsError::NotADirectory),
            None => Err(FsError::NotFound),
        }
    }

    fn read(&self, file: &Path) -> Result<String, FsError> {
        match self.node(file) {
            Some(Node::File(text)) => Ok(text.clone()),
            Some(Node::Dir(_)) => Err(FsError::IsADirectory),
            None => Err(FsError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs() -> VirtualFs {
        VirtualFs::portfolio("/home/user")
    }

    #[test]
    fn home_exists() {
        let fs = fs();
        assert_eq!(fs.go_home().to_string(), "/home/user");
        assert_eq!(fs.kind(&fs.go_home()), Some(EntryKind::Dir));
    }

    #[test]
    fn resolves_relative_absolute_and_tilde() {
        let fs = fs();
        let home = fs.go_home();
        assert_eq!(fs.resolve(&home, "projects").unwrap().to_string(), "/home/user/projects");
        assert_eq!(fs.resolve(&home, "..").unwrap().to_string(), "/home");
        assert_eq!(fs.resolve(&home, "../../..").unwrap().to_string(), "/");
        assert_eq!(fs.resolve(&Path::root(), "~/projects/.").unwrap().to_string(), "/home/user/projects");
        assert_eq!(fs.resolve(&home, "/etc/motd").unwrap().to_string(), "/etc/motd");
    }

    #[test]
    fn resolve_errors() {
        let fs = fs();
        let home = fs.go_home();
        assert_eq!(fs.resolve(&home, "nope"), Err(FsError::NotFound));
        assert_eq!(fs.resolve(&home, "about.md/x"), Err(FsError::NotADirectory));
    }

    #[test]
    fn list_is_sorted_with_kinds() {
        let fs = fs();
        let entries = fs.list(&fs.go_home()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["about.md", "contact.txt", "projects"]);
        assert_eq!(entries[2].kind, EntryKind::Dir);
        assert_eq!(fs.list(&Path::parse("/etc/motd")), Err(FsError::NotADirectory));
    }

    #[test]
    fn read_files_only() {
        let fs = fs();
        assert!(fs.read(&Path::parse("/etc/motd")).unwrap().contains("help"));
        assert_eq!(fs.read(&fs.go_home()), Err(FsError::IsADirectory));
        assert_eq!(fs.read(&Path::parse("/missing")), Err(FsError::NotFound));
    }

    #[test]
    fn add_file_creates_parents() {
        let mut fs = VirtualFs::empty("/root");
        fs.add_file("/a/b/c.txt", "hi");
        assert_eq!(fs.read(&Path::parse("/a/b/c.txt")).unwrap(), "hi");
        assert_eq!(fs.kind(&Path::parse("/a/b")), Some(EntryKind::Dir));
    }
}
