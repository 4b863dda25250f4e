//! Developer console shell.
//!
//! A local view switch over three panels (overview, repositories, apps)
//! rendering mock statistics. Nothing here persists; the panels stand in
//! for real backend queries behind the same shapes.

pub mod apps;
pub mod overview;
pub mod repositories;
pub mod shell;

pub use shell::{ActiveView, ConsoleShell};
