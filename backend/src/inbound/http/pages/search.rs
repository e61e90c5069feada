//! Substring search over post headings and content.

use actix_web::{HttpResponse, get, web};
use pagination::PageRequest;
use serde_json::json;

use crate::domain::ApiResult;
use crate::domain::ports::Template;
use crate::inbound::http::state::HttpState;

use super::{ListingQuery, listing_paginator, map_post_store_error, render_page};

/// Search posts by case-insensitive substring, six matches per page.
///
/// No query and an empty query both yield an empty result set with an
/// accurate count of zero; neither is an error or a wildcard match.
#[get("/search/")]
pub async fn search(
    state: web::Data<HttpState>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let term = query.q.as_deref().unwrap_or_default();
    let results = if term.is_empty() {
        Vec::new()
    } else {
        state
            .posts
            .search(term)
            .await
            .map_err(map_post_store_error)?
    };

    let page = listing_paginator()?.paginate(results, PageRequest::from_raw(query.page.as_deref()));

    render_page(
        &state,
        Template::Search,
        json!({
            "title": "Search",
            "query": term,
            "count": page.count,
            "page": page,
        }),
    )
}
