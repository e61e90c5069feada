//! Posts carrying one tag.

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::domain::ports::Template;
use crate::domain::{ApiResult, Error};
use crate::inbound::http::state::HttpState;

use super::{common_tags, map_tag_index_error, parse_slug, render_page};

/// List every post carrying a tag, unpaginated, with the global ranking.
#[get("/tag/{slug}/")]
pub async fn tag_page(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path.into_inner())?;
    let tag = state
        .tags
        .find_by_slug(&slug)
        .await
        .map_err(map_tag_index_error)?
        .ok_or_else(|| Error::not_found("no such tag"))?;

    let posts = state
        .tags
        .posts_tagged(&slug)
        .await
        .map_err(map_tag_index_error)?;
    let ranking = common_tags(state.tags.as_ref()).await?;

    render_page(
        &state,
        Template::Tag,
        json!({
            "title": format!("#TAG {}", tag.name()),
            "tag": tag,
            "posts": posts,
            "common_tags": ranking,
        }),
    )
}
