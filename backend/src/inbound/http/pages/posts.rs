//! Post detail page and comment submission.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::{Value, json};

use crate::domain::forms::{CommentForm, FieldErrors};
use crate::domain::ports::Template;
use crate::domain::{ApiResult, Error, NewComment, Post, Slug};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

use super::{
    RECENT_POSTS, common_tags, form_context, map_comment_store_error, map_post_store_error,
    parse_slug, referer_or_root, render_page, see_other,
};

async fn resolve_post(state: &HttpState, slug: &Slug) -> Result<Post, Error> {
    state
        .posts
        .find_by_slug(slug)
        .await
        .map_err(map_post_store_error)?
        .ok_or_else(|| Error::not_found("no such post"))
}

/// Full detail-page context: the post, its comments, the global tag
/// ranking, the recent-posts sidebar, and the comment form state.
async fn detail_context(
    state: &HttpState,
    post: &Post,
    comment_form: Value,
) -> Result<Value, Error> {
    let comments = state
        .comments
        .list_for_post(post.slug())
        .await
        .map_err(map_comment_store_error)?;
    let ranking = common_tags(state.tags.as_ref()).await?;
    let last_posts = state
        .posts
        .recent(RECENT_POSTS)
        .await
        .map_err(map_post_store_error)?;

    Ok(json!({
        "title": post.heading(),
        "post": post,
        "comments": comments,
        "common_tags": ranking,
        "last_posts": last_posts,
        "comment_form": comment_form,
    }))
}

/// Show one post with its comments, the tag ranking, and recent posts.
#[get("/post/{slug}/")]
pub async fn post_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path.into_inner())?;
    let post = resolve_post(&state, &slug).await?;
    let context = detail_context(
        &state,
        &post,
        form_context(json!({ "text": "" }), &FieldErrors::new()),
    )
    .await?;
    render_page(&state, Template::PostDetail, context)
}

/// Attach a comment to a post and bounce back to the submitting page.
///
/// The post is resolved before anything else so an unknown slug is a plain
/// miss whether or not the form is valid. On validation failure the detail
/// page re-renders with its full context plus the field errors.
#[post("/post/{slug}/")]
pub async fn submit_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    request: HttpRequest,
    session: SessionContext,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path.into_inner())?;
    let post = resolve_post(&state, &slug).await?;

    match form.validate() {
        Ok(body) => {
            let author = session.require_identity()?;
            let comment = NewComment::new(post.slug().clone(), author, body);
            state
                .comments
                .create(&comment)
                .await
                .map_err(map_comment_store_error)?;
            Ok(see_other(&referer_or_root(&request)))
        }
        Err(errors) => {
            let submitted = form.text.clone().unwrap_or_default();
            let context = detail_context(
                &state,
                &post,
                form_context(json!({ "text": submitted }), &errors),
            )
            .await?;
            render_page(&state, Template::PostDetail, context)
        }
    }
}
