//! Page renderers. Each builds an HTML fragment that `render::render_page`
//! wraps in the site shell.

pub mod common;
pub mod embed;
pub mod portfolio;
pub mod social;
