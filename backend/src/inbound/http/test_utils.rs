//! Test helpers for inbound HTTP components.

use std::sync::Mutex;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{RenderError, View, ViewRenderer};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Renderer double that records every view so tests can assert on the
/// template/context contract instead of parsing markup.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    views: Mutex<Vec<View>>,
}

impl RecordingRenderer {
    /// Views rendered so far.
    pub fn views(&self) -> Vec<View> {
        self.views
            .lock()
            .map_or_else(|_| Vec::new(), |views| views.clone())
    }

    /// The most recently rendered view, if any.
    pub fn last_view(&self) -> Option<View> {
        self.views().pop()
    }
}

impl ViewRenderer for RecordingRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        self.views
            .lock()
            .map_err(|_| RenderError::template("renderer fixture lock poisoned"))?
            .push(view.clone());
        Ok(format!("rendered:{}", view.template().name()))
    }
}
