// Application assembly and the interactive REPL
pub mod repl;
pub mod setup;
