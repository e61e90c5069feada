//! Front-page post listing.

use actix_web::{HttpResponse, get, web};
use pagination::PageRequest;
use serde_json::json;

use crate::domain::ApiResult;
use crate::domain::ports::Template;
use crate::inbound::http::state::HttpState;

use super::{ListingQuery, listing_paginator, map_post_store_error, render_page};

/// List all posts, six per page, newest first.
///
/// The `page` query parameter clamps to the nearest valid page, so hand
/// edited URLs always land somewhere sensible.
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let posts = state.posts.list_all().await.map_err(map_post_store_error)?;
    let page = listing_paginator()?.paginate(posts, PageRequest::from_raw(query.page.as_deref()));

    render_page(
        &state,
        Template::Home,
        json!({ "title": "Home", "page": page }),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{FixturePostRepository, Template};
    use crate::domain::{Post, Slug};
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::RecordingRenderer;

    use super::*;

    fn post(index: usize) -> Post {
        use chrono::{Duration, TimeZone, Utc};
        let base = Utc
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("valid time");
        Post::try_new(
            Slug::new(format!("post-{index}")).expect("valid slug"),
            format!("Post number {index}"),
            "body",
            base + Duration::minutes(i64::try_from(index).expect("small index")),
            Vec::new(),
        )
        .expect("valid post")
    }

    fn state_with_posts(count: usize) -> (web::Data<HttpState>, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::default());
        let mut state = HttpState::fixtures();
        state.posts = Arc::new(FixturePostRepository::with_posts(
            (1..=count).map(post).collect(),
        ));
        state.renderer = renderer.clone();
        (web::Data::new(state), renderer)
    }

    async fn render_home(uri: &str, count: usize) -> Value {
        let (state, renderer) = state_with_posts(count);
        let app =
            actix_test::init_service(App::new().app_data(state).service(home)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert!(response.status().is_success());

        let view = renderer.last_view().expect("home view rendered");
        assert_eq!(view.template(), Template::Home);
        view.context().clone()
    }

    fn page_field<'a>(context: &'a Value, field: &str) -> &'a Value {
        context
            .get("page")
            .and_then(|page| page.get(field))
            .expect("page field present")
    }

    #[actix_web::test]
    async fn thirteen_posts_make_three_pages_with_next() {
        let context = render_home("/", 13).await;
        assert_eq!(page_field(&context, "number"), 1);
        assert_eq!(page_field(&context, "total_pages"), 3);
        assert_eq!(page_field(&context, "count"), 13);
        assert_eq!(page_field(&context, "has_next"), true);
        assert_eq!(page_field(&context, "has_previous"), false);
        let items = page_field(&context, "items").as_array().expect("items array");
        assert_eq!(items.len(), 6);
        // Newest first: post-13 leads the page.
        assert_eq!(
            items.first().and_then(|item| item.get("heading")).and_then(Value::as_str),
            Some("Post number 13")
        );
    }

    #[rstest]
    #[case("/?page=99", 3)]
    #[case("/?page=0", 1)]
    #[case("/?page=banana", 1)]
    #[actix_web::test]
    async fn out_of_range_pages_clamp(#[case] uri: &str, #[case] expected_number: usize) {
        let context = render_home(uri, 13).await;
        assert_eq!(page_field(&context, "number"), expected_number);
    }

    #[actix_web::test]
    async fn empty_store_renders_zero_posts() {
        let context = render_home("/", 0).await;
        assert_eq!(page_field(&context, "count"), 0);
        let items = page_field(&context, "items").as_array().expect("items array");
        assert!(items.is_empty());
    }

    #[actix_web::test]
    async fn unreachable_store_is_service_unavailable() {
        use crate::domain::ports::{MockPostRepository, PostStoreError};

        let mut posts = MockPostRepository::new();
        posts
            .expect_list_all()
            .returning(|| Err(PostStoreError::connection("database unavailable")));

        let mut state = HttpState::fixtures();
        state.posts = Arc::new(posts);
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(home),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
