//! Jumper
//!
//! Makes in-page jump targets focusable so that skip links and fragment
//! navigation move keyboard focus, not only the scroll position.
//!
//! Elements with an `id` that are not natively focusable and declare no
//! `tabindex` receive `tabindex="-1"`. The body gets a marker class before
//! any attribute is written, so its presence is a readiness signal.

mod api;
mod config;
mod eligibility;
mod fragment;
mod initializer;

pub use api::JumperApi;
pub use config::{JumperConfig, JumperMode, JumperOverrides};
pub use eligibility::{DEFAULT_SELECTOR, default_selector, is_jump_target};
pub use fragment::{FragmentOutcome, cleanup_after_blur, decode_fragment, handle_fragment, is_safe_fragment};
pub use initializer::{InitReport, InitTimings, Jumper};

/// Version reported by the runtime API
pub const VERSION: &str = "1.0.0";

/// Name the runtime API is installed under in the page's global scope
pub const API_NAME: &str = "jumper";

/// Default marker class on the body
pub const DEFAULT_BODY_CLASS: &str = "has-jumper";

/// Default value written to `tabindex`
pub const DEFAULT_TABINDEX: &str = "-1";

/// Timing mark names
pub mod marks {
    pub const START: &str = "jumper-start";
    pub const QUERY_COMPLETE: &str = "jumper-query-complete";
    pub const COMPLETE: &str = "jumper-complete";
    pub const QUERY: &str = "jumper-query";
    pub const TOTAL: &str = "jumper-total";
}
