//! fOS Accessibility
//!
//! Accessibility APIs for the fOS browser engine.
//!
//! Features:
//! - Focusability and tabindex semantics
//! - Sequential (Tab) focus navigation
//! - Skip links
//! - Jumper: makes in-page jump targets focusable

pub mod focus;
pub mod jumper;

pub use focus::{
    FocusManager, SkipLink, TabIndex, is_disabled, is_focusable, is_interactive,
    is_natively_focusable,
    sequential_focus_order,
};
pub use jumper::{
    FragmentOutcome, InitReport, InitTimings, Jumper, JumperApi, JumperConfig, JumperMode,
    JumperOverrides,
};

/// Jumper error. Recorded as warnings; never escapes initialization.
#[derive(Debug, thiserror::Error)]
pub enum JumperError {
    #[error("Invalid selector '{selector}': {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: fos_css::CssError,
    },

    #[error("Document has no body or document element")]
    MissingContainer,

    #[error("Invalid class token '{0}'")]
    InvalidClass(String),

    #[error(transparent)]
    Dom(#[from] fos_dom::DomError),
}
