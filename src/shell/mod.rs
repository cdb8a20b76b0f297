pub mod apps;
pub mod dispatch;
pub mod parse;
pub mod prompt;
pub mod registry;

pub use dispatch::Dispatcher;
