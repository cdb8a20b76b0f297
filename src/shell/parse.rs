/// Line parsing: whitespace normalization, tokenizing, option splitting.

/// A tokenized command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
    pub options: Vec<String>,
}

/// Trim the line and collapse every whitespace run to one space.
pub fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split tokens into positional args and options (leading `-`).
/// Order is preserved within each list; empty tokens are dropped.
pub fn split_args<S: AsRef<str>>(tokens: &[S]) -> (Vec<String>, Vec<String>) {
    let mut args = Vec::new();
    let mut options = Vec::new();
    for tok in tokens.iter().map(AsRef::as_ref) {
        if tok.is_empty() {
            continue;
        }
        if tok.starts_with('-') {
            options.push(tok.to_string());
        } else {
            args.push(tok.to_string());
        }
    }
    (args, options)
}

/// Parse a raw line. `None` when nothing but whitespace was typed.
pub fn parse(line: &str) -> Option<CommandLine> {
    let normalized = normalize(line);
    let mut tokens = normalized.split(' ');
    let name = tokens.next().filter(|n| !n.is_empty())?.to_string();
    let rest: Vec<&str> = tokens.collect();
    let (args, options) = split_args(&rest);
    Some(CommandLine { name, args, options })
}
