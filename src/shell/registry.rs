/// Built-in command table.

use std::collections::HashMap;

/// Commands implemented by the dispatcher itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Builtin {
    Help,
    Secret,
    Matrix,
    Hack,
    Coffee,
    Home,
    Snake,
}

/// Name → built-in. Immutable once built.
#[derive(Clone, Debug)]
pub struct Registry {
    commands: HashMap<&'static str, Builtin>,
}

impl Registry {
    pub fn standard() -> Self {
        let mut commands = HashMap::new();
        commands.insert("help", Builtin::Help);
        commands.insert("secret", Builtin::Secret);
        commands.insert("matrix", Builtin::Matrix);
        commands.insert("hack", Builtin::Hack);
        commands.insert("coffee", Builtin::Coffee);
        commands.insert("home", Builtin::Home);
        commands.insert("snake", Builtin::Snake);
        Registry { commands }
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.commands.get(name).copied()
    }

    /// Sorted command names.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
