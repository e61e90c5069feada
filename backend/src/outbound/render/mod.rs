//! Outbound view-rendering adapters.

mod html;

pub use html::HtmlRenderer;
