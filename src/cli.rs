//! CLI domain: parse, route and output only.
//! No digest logic; the route builds the tree through the library and renders it.

mod help;
mod output;
mod parse;
mod route;

pub use help::banner;
pub use output::map_error;
pub use parse::Cli;
pub use route::RunContext;
