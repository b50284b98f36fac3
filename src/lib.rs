//! A tiny line-oriented command interpreter.
//!
//! Each input line is split on whitespace, recorded in the session history and then
//! executed either by one of the built-in commands (`cd`, `help`, `exit`, `history`)
//! or by launching an external program and waiting for it to finish.
//!
//! The main entry point is [`Interpreter`], which owns the builtin registry, the
//! process launcher and the session [`Environment`]. Lines come from any
//! [`LineSource`](io_adapters::LineSource): a rustyline editor for terminals or a
//! plain buffered reader for everything else.

mod builtin;
pub mod command;
pub mod env;
pub mod external;
pub mod history;
mod interpreter;
pub mod io_adapters;
pub mod lexer;

pub use builtin::{Builtin, BuiltinRegistry};
pub use command::{Command, Flow, Streams};
pub use env::Environment;
pub use interpreter::{DEFAULT_PROMPT, Interpreter};
