//! Jumper integration: wires the utility into the page lifecycle and
//! exposes its runtime API on `window.jumper`.

use fos_a11y::jumper::{API_NAME, cleanup_after_blur};
use fos_a11y::{FragmentOutcome, Jumper, JumperApi, JumperConfig, JumperMode};
use fos_dom::{Document, DomEventType, ReadyState};

use crate::context::PageContext;
use crate::events::ListenerTarget;
use crate::page::Page;
use crate::window::Global;

/// `window.jumper`, bound to the live document
#[derive(Debug, Clone, Copy)]
pub struct JumperHandle<'a> {
    api: &'a JumperApi,
    document: &'a Document,
}

impl<'a> JumperHandle<'a> {
    pub fn is_active(&self) -> bool {
        self.api.is_active(self.document)
    }

    pub fn get_config(&self) -> JumperConfig {
        self.api.get_config()
    }

    pub fn version(&self) -> &'static str {
        self.api.version()
    }

    pub fn api(&self) -> &'a JumperApi {
        self.api
    }
}

impl Page {
    /// Install the utility. Runs once the structure is parsed (immediately
    /// if that already happened). In navigate mode it also follows every
    /// `hashchange` and handles the fragment the page was opened with.
    pub fn install_jumper(&mut self, config: JumperConfig) {
        let jumper = Jumper::new(config);
        tracing::debug!("Installing jumper ({:?} mode)", jumper.config().mode);

        if jumper.config().mode == JumperMode::Navigate {
            let on_hash = jumper.clone();
            self.add_event_listener(DomEventType::HashChange, ListenerTarget::Window, move |ctx, _| {
                if let Some(fragment) = ctx.url().fragment().map(str::to_string) {
                    fragment_pass(ctx, &on_hash, &fragment);
                }
            });
        }

        if self.ready_state() == ReadyState::Loading {
            self.add_once_listener(DomEventType::DOMContentLoaded, ListenerTarget::document(), move |ctx, _| {
                load_pass(ctx, &jumper);
            });
        } else {
            self.with_context(|ctx| load_pass(ctx, &jumper));
        }
    }

    /// The installed runtime API, if the utility has initialized
    pub fn jumper(&self) -> Option<JumperHandle<'_>> {
        let api = self.ctx.window.jumper_api(API_NAME)?;
        Some(JumperHandle { api, document: &self.ctx.document })
    }
}

fn load_pass(ctx: &mut PageContext, jumper: &Jumper) {
    let (document, timeline) = ctx.document_and_timeline();
    let report = jumper.initialize(document, Some(timeline));
    if !report.warnings.is_empty() {
        tracing::debug!("Jumper finished with {} warnings", report.warnings.len());
    }
    ctx.window_mut().set(API_NAME, Global::Jumper(jumper.api()));

    if jumper.config().mode == JumperMode::Navigate {
        if let Some(fragment) = ctx.url().fragment().map(str::to_string) {
            fragment_pass(ctx, jumper, &fragment);
        }
    }
}

fn fragment_pass(ctx: &mut PageContext, jumper: &Jumper, fragment: &str) {
    match jumper.handle_fragment(ctx.document_mut(), fragment) {
        FragmentOutcome::Focus { target, added } => {
            let focused = ctx.focus(target);
            if !focused {
                tracing::debug!("Fragment target could not take focus");
            }
            if !added {
                return;
            }
            if focused {
                ctx.add_once_listener(DomEventType::Blur, ListenerTarget::Node(target), move |ctx, _| {
                    cleanup_after_blur(ctx.document_mut().tree_mut(), target);
                });
            } else {
                // Never focused, so no blur will come to undo the change
                cleanup_after_blur(ctx.document_mut().tree_mut(), target);
            }
        }
        outcome => tracing::trace!("Fragment {:?}: {:?}", fragment, outcome),
    }
}
