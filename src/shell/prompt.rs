/// Prompt rendering.

use crate::fs::Path;

/// Render `path`, abbreviating a leading `home` to `~`.
/// A trailing space follows unless the result is exactly `~`.
pub fn render_path(path: &Path, home: &str) -> String {
    let full = path.to_string();
    let mut out = if full == home {
        "~".to_string()
    } else if let Some(rest) = full.strip_prefix(home).filter(|r| r.starts_with('/')) {
        format!("~{rest}")
    } else {
        full
    };
    if out != "~" {
        out.push(' ');
    }
    out
}

/// The full prompt line as printed after each command.
pub fn prompt_line(user: &str, path: &Path, home: &str) -> String {
    format!("\n{}:{}$", user, render_path(path, home))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "/home/user";

    #[test]
    fn home_is_tilde_without_space() {
        assert_eq!(render_path(&Path::parse(HOME), HOME), "~");
        assert_eq!(prompt_line("user", &Path::parse(HOME), HOME), "\nuser:~$");
    }

    #[test]
    fn below_home_keeps_tail() {
        assert_eq!(render_path(&Path::parse("/home/user/projects"), HOME), "~/projects ");
    }

    #[test]
    fn outside_home() {
        assert_eq!(render_path(&Path::root(), HOME), "/ ");
        assert_eq!(render_path(&Path::parse("/home"), HOME), "/home ");
        // prefix only counts on a segment boundary
        assert_eq!(render_path(&Path::parse("/home/username"), HOME), "/home/username ");
    }
}
