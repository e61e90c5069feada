//! Server-rendered page handlers.
//!
//! One module per page group; each handler binds a URL pattern to port
//! reads/writes and selects a template with a context mapping. Shared
//! plumbing (pagination size, redirects, port-error mapping) lives here.

mod accounts;
mod contact;
mod home;
mod posts;
mod search;
mod tags;

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};
use pagination::Paginator;
use serde_json::{Value, json};

use crate::domain::forms::FieldErrors;
use crate::domain::ports::{
    CommentStoreError, PostStoreError, TagIndex, TagIndexError, Template, View,
};
use crate::domain::{ApiResult, Error, Slug, TagRank};
use crate::inbound::http::state::HttpState;

/// Posts shown per listing page.
pub(crate) const POSTS_PER_PAGE: usize = 6;
/// Posts shown in the recent-posts sidebar.
pub(crate) const RECENT_POSTS: usize = 5;

/// Register every page route on the given service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home)
        .service(posts::post_detail)
        .service(posts::submit_comment)
        .service(accounts::signup_page)
        .service(accounts::submit_signup)
        .service(accounts::signin_page)
        .service(accounts::submit_signin)
        .service(contact::contact_page)
        .service(contact::submit_feedback)
        .service(contact::success_page)
        .service(search::search)
        .service(tags::tag_page);
}

/// Query parameters shared by the listing pages.
///
/// `page` stays a raw string so non-numeric values clamp to the first page
/// instead of failing extraction.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ListingQuery {
    pub(crate) page: Option<String>,
    pub(crate) q: Option<String>,
}

pub(crate) fn listing_paginator() -> Result<Paginator, Error> {
    Paginator::new(POSTS_PER_PAGE)
        .map_err(|err| Error::internal(format!("invalid listing page size: {err}")))
}

/// Render `template` with `context` into a 200 HTML response.
pub(crate) fn render_page(
    state: &HttpState,
    template: Template,
    context: Value,
) -> ApiResult<HttpResponse> {
    let html = state
        .renderer
        .render(&View::new(template, context))
        .map_err(|err| Error::internal(err.to_string()))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

/// Redirect after a successful form submission.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// The submitting page's address, falling back to the site root.
pub(crate) fn referer_or_root(request: &HttpRequest) -> String {
    request
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/")
        .to_owned()
}

/// Parse a path segment as a slug, treating malformed input as a miss.
pub(crate) fn parse_slug(raw: &str) -> Result<Slug, Error> {
    Slug::new(raw).map_err(|_| Error::not_found("no such page"))
}

/// Form sub-context embedding submitted values and validation errors.
pub(crate) fn form_context(values: Value, errors: &FieldErrors) -> Value {
    json!({ "values": values, "errors": errors })
}

/// Global tag ranking for sidebar display.
pub(crate) async fn common_tags(tags: &dyn TagIndex) -> Result<Vec<TagRank>, Error> {
    tags.most_common().await.map_err(map_tag_index_error)
}

pub(crate) fn map_post_store_error(err: PostStoreError) -> Error {
    match err {
        PostStoreError::Connection { message } => Error::service_unavailable(message),
        PostStoreError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_comment_store_error(err: CommentStoreError) -> Error {
    match err {
        CommentStoreError::Connection { message } => Error::service_unavailable(message),
        CommentStoreError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_tag_index_error(err: TagIndexError) -> Error {
    match err {
        TagIndexError::Connection { message } => Error::service_unavailable(message),
        TagIndexError::Query { message } => Error::internal(message),
    }
}
