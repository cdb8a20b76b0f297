/// Canned text and ASCII art printed by the built-ins and the snake game.

pub const WELCOME: &str = "Welcome to termfolio. Type `help` to get started.";

pub const HELP: &str = "
Available commands:
  help
  clear
  ls
  cat
  cd
  pwd
  secret
  home
";

pub const SECRET: &str = "
Try these:
  matrix
  hack
  snake
  coffee
";

pub const MATRIX: &str = "
Wake up, Neo...
The Matrix has you...
Follow the white rabbit.

Initializing Matrix mode...
";

pub const HACK: &str = "ACCESS GRANTED... Just kidding! 😉";

pub const HOME: &str = "Returning to computer screen...";

pub const COFFEE: &str = r"
    ( (
     ) )
  .........
  |       |]
  \       /
   `---'
  COFFEE TIME!
  ";

pub const SKULL: &str = r#"
   .-""""-.
  /  _  _  \
  |  o _ o  |
  |  (_)    |
   \ '--'  /
    `-...-'
  GAME OVER!
  "#;

pub const SNAKE_BANNER: &str =
    "\nSnake Game Started!\nUse W/A/S/D keys to control direction\nType \"exit\" to quit\n";

pub const SNAKE_ENDED: &str = "Game ended.";
