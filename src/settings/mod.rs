//! Configuration loading and resolution.
//!
//! `load` layers the default config files, extra `--config` files, the
//! `CHERRY_PICK__SECTION__KEY` environment and finally the command line, then
//! validates the result into a [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{PostSourceConfig, ResolvedConfig};
