//! fOS Engine
//!
//! Page host for the fOS browser engine: owns a parsed document, delivers
//! DOM events serially and simulates keyboard focus navigation.
//!
//! # Example
//! ```rust,ignore
//! use fos_engine::Page;
//! use fos_a11y::JumperConfig;
//!
//! let mut page = Page::from_html("https://example.com/", html)?;
//! page.install_jumper(JumperConfig::default());
//! page.finish_parsing();
//! assert!(page.jumper().unwrap().is_active());
//! ```

mod context;
mod events;
mod jumper;
mod page;
pub mod visibility;
mod window;

pub use context::PageContext;
pub use events::{Listener, ListenerId, ListenerTarget, is_window_event};
pub use jumper::JumperHandle;
pub use page::Page;
pub use visibility::{VisibilityState, visibility_of};
pub use window::{Global, Window};

// Re-export sub-crates for advanced usage
pub use fos_html as html;
pub use fos_css as css;
pub use fos_dom as dom;
pub use fos_a11y as a11y;
pub use fos_devtools as devtools;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Page error
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to read document: {0}")]
    Parse(#[from] fos_html::ParseError),
}
