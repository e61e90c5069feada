//! Driven port for the view renderer collaborator.
//!
//! Handlers never build markup. They select a template and assemble a JSON
//! context; turning that pair into a page is the renderer's job. Tests can
//! assert on the template/context contract without parsing HTML.

use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by renderer adapters.
    pub enum RenderError {
        /// The template could not be rendered with the given context.
        Template { message: String } => "template rendering failed: {message}",
    }
}

/// The fixed set of page templates this site renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// Front-page post listing.
    Home,
    /// Single post with comments and sidebar listings.
    PostDetail,
    /// Signup form.
    SignUp,
    /// Signin form.
    SignIn,
    /// Contact form.
    Contact,
    /// Contact-form thank-you page.
    Success,
    /// Search results listing.
    Search,
    /// Posts carrying one tag.
    Tag,
}

impl Template {
    /// Stable template identifier used by renderer adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::PostDetail => "post_detail",
            Self::SignUp => "signup",
            Self::SignIn => "signin",
            Self::Contact => "contact",
            Self::Success => "success",
            Self::Search => "search",
            Self::Tag => "tag",
        }
    }
}

/// A template selection paired with its context mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    template: Template,
    context: Value,
}

impl View {
    /// Pair a template with its context.
    pub const fn new(template: Template, context: Value) -> Self {
        Self { template, context }
    }

    /// Selected template.
    pub const fn template(&self) -> Template {
        self.template
    }

    /// Context mapping handed to the renderer.
    pub const fn context(&self) -> &Value {
        &self.context
    }
}

/// Renders a [`View`] into a complete HTML document.
pub trait ViewRenderer: Send + Sync {
    /// Produce the page markup for `view`.
    fn render(&self, view: &View) -> Result<String, RenderError>;
}
