/// Applications: commands resolved outside the built-in registry.
///
/// The dispatcher asks an `AppResolver` first. The standard set covers
/// filesystem navigation (`ls`, `cd`, `pwd`, `cat`) and `clear`.

use crate::fs::{EntryKind, FileSystem, FsError, Path};
use crate::host::{Host, Output};

/// What an application may touch while it runs.
pub struct AppContext<'a> {
    pub out: &'a mut dyn Output,
    pub host: &'a mut dyn Host,
    pub fs: &'a dyn FileSystem,
    pub path: &'a mut Path,
}

pub trait Application {
    fn run(&self, ctx: &mut AppContext<'_>, args: &[String], options: &[String]);
}

pub trait AppResolver {
    fn resolve(&self, name: &str) -> Option<&dyn Application>;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StdApp {
    Ls,
    Cd,
    Pwd,
    Cat,
    Clear,
}

/// Resolver for the standard application set.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdApps;

impl AppResolver for StdApps {
    fn resolve(&self, name: &str) -> Option<&dyn Application> {
        match name {
            "ls" => Some(&StdApp::Ls),
            "cd" => Some(&StdApp::Cd),
            "pwd" => Some(&StdApp::Pwd),
            "cat" => Some(&StdApp::Cat),
            "clear" => Some(&StdApp::Clear),
            _ => None,
        }
    }
}

impl Application for StdApp {
    fn run(&self, ctx: &mut AppContext<'_>, args: &[String], options: &[String]) {
        match self {
            StdApp::Ls => ls(ctx, args, options),
            StdApp::Cd => cd(ctx, args),
            StdApp::Pwd => ctx.out.print(&format!("\n{}", ctx.path), false),
            StdApp::Cat => cat(ctx, args),
            StdApp::Clear => ctx.host.clear_screen(),
        }
    }
}

fn fail(ctx: &mut AppContext<'_>, app: &str, err: FsError, target: &str) {
    ctx.out.print(&format!("\n{app}: {err}: {target}"), false);
}

/// `ls [-l] [dir...]`. Directories get a trailing `/`.
fn ls(ctx: &mut AppContext<'_>, args: &[String], options: &[String]) {
    let mut long = false;
    for opt in options {
        match opt.as_str() {
            "-l" => long = true,
            other => {
                ctx.out.print(&format!("\nls: invalid option -- '{}'", other.trim_start_matches('-')), false);
                return;
            }
        }
    }

    let targets: Vec<&str> = if args.is_empty() {
        vec!["."]
    } else {
        args.iter().map(String::as_str).collect()
    };

    for target in targets {
        let dir = match ctx.fs.resolve(ctx.path, target) {
            Ok(p) => p,
            Err(e) => {
                fail(ctx, "ls", e, target);
                continue;
            }
        };
        let entries = match ctx.fs.list(&dir) {
            Ok(entries) => entries,
            // `ls file` just names the file
            Err(FsError::NotADirectory) => {
                ctx.out.print(&format!("\n{}", dir.file_name()), false);
                continue;
            }
            Err(e) => {
                fail(ctx, "ls", e, target);
                continue;
            }
        };
        let names: Vec<String> = entries
            .iter()
            .map(|e| match e.kind {
                EntryKind::Dir => format!("{}/", e.name),
                EntryKind::File => e.name.clone(),
            })
            .collect();
        let sep = if long { "\n" } else { "  " };
        ctx.out.print(&format!("\n{}", names.join(sep)), false);
    }
}

/// `cd [dir]`. No argument goes home.
fn cd(ctx: &mut AppContext<'_>, args: &[String]) {
    let target = match args.first() {
        Some(t) => t.as_str(),
        None => {
            *ctx.path = ctx.fs.go_home();
            return;
        }
    };
    match ctx.fs.resolve(ctx.path, target) {
        Ok(p) if ctx.fs.kind(&p) == Some(EntryKind::Dir) => *ctx.path = p,
        Ok(_) => fail(ctx, "cd", FsError::NotADirectory, target),
        Err(e) => fail(ctx, "cd", e, target),
    }
}

/// `cat file...`. Markdown files are printed with the markdown flag.
fn cat(ctx: &mut AppContext<'_>, args: &[String]) {
    if args.is_empty() {
        ctx.out.print("\ncat: missing file operand", false);
        return;
    }
    for target in args {
        let text = ctx
            .fs
            .resolve(ctx.path, target)
            .and_then(|p| ctx.fs.read(&p));
        match text {
            Ok(text) => {
                let markdown = target.ends_with(".md");
                ctx.out.print(&format!("\n{}", text.trim_end()), markdown);
            }
            Err(e) => fail(ctx, "cat", e, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::VirtualFs;
    use crate::host::{Effect, Sfx};
    use std::time::Duration;

    #[derive(Default)]
    struct Rec {
        printed: Vec<(String, bool)>,
        cleared: u32,
    }

    impl Output for Rec {
        fn print(&mut self, text: &str, markdown: bool) {
            self.printed.push((text.to_string(), markdown));
        }
    }

    impl Host for Rec {
        fn scroll_to_top(&mut self) {}
        fn play_video(&mut self, _clip: &str) {}
        fn start_effect(&mut self, _effect: Effect, _duration: Duration) {}
        fn play_sound(&mut self, _sfx: Sfx) {}
        fn clear_screen(&mut self) {
            self.cleared += 1;
        }
    }

    fn run(app: &str, line: &[&str], path: &mut Path) -> Rec {
        let fs = VirtualFs::portfolio("/home/user");
        let mut out = Rec::default();
        let mut host = Rec::default();
        let tokens: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        let (args, options) = crate::shell::parse::split_args(&tokens);
        {
            let mut ctx = AppContext { out: &mut out, host: &mut host, fs: &fs, path };
            StdApps.resolve(app).unwrap().run(&mut ctx, &args, &options);
        }
        out.cleared = host.cleared;
        out
    }

    fn home() -> Path {
        Path::parse("/home/user")
    }

    #[test]
    fn resolver_knows_std_apps() {
        for name in ["ls", "cd", "pwd", "cat", "clear"] {
            assert!(StdApps.resolve(name).is_some(), "{name}");
        }
        assert!(StdApps.resolve("snake").is_none());
    }

    #[test]
    fn ls_home() {
        let out = run("ls", &[], &mut home());
        assert_eq!(out.printed[0].0, "\nabout.md  contact.txt  projects/");
    }

    #[test]
    fn ls_long_and_bad_option() {
        let out = run("ls", &["-l"], &mut home());
        assert_eq!(out.printed[0].0, "\nabout.md\ncontact.txt\nprojects/");
        let out = run("ls", &["-z"], &mut home());
        assert_eq!(out.printed[0].0, "\nls: invalid option -- 'z'");
    }

    #[test]
    fn cd_moves_and_reports_errors() {
        let mut path = home();
        run("cd", &["projects"], &mut path);
        assert_eq!(path.to_string(), "/home/user/projects");

        let out = run("cd", &["nowhere"], &mut path);
        assert_eq!(out.printed[0].0, "\ncd: no such file or directory: nowhere");
        assert_eq!(path.to_string(), "/home/user/projects");

        let out = run("cd", &["README.md"], &mut path);
        assert_eq!(out.printed[0].0, "\ncd: not a directory: README.md");

        run("cd", &[], &mut path);
        assert_eq!(path, home());
    }

    #[test]
    fn pwd_prints_full_path() {
        let out = run("pwd", &[], &mut home());
        assert_eq!(out.printed[0].0, "\n/home/user");
    }

    #[test]
    fn cat_marks_markdown() {
        let out = run("cat", &["about.md", "contact.txt"], &mut home());
        assert!(out.printed[0].0.starts_with("\n# About"));
        assert!(out.printed[0].1);
        assert!(!out.printed[1].1);

        let out = run("cat", &["projects"], &mut home());
        assert_eq!(out.printed[0].0, "\ncat: is a directory: projects");
    }

    #[test]
    fn clear_goes_to_host() {
        let out = run("clear", &[], &mut home());
        assert_eq!(out.cleared, 1);
        assert!(out.printed.is_empty());
    }
}
