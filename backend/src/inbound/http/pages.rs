//! Catch-all SSR page handler.
//!
//! Registered as the application's default service so every path that no
//! API route claims is rendered by the page composer.

use actix_web::http::{Method, header};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Render the HTML page for the request path.
///
/// Only `GET` is served; any other method on an unmatched path is a 404.
/// The query string is ignored.
pub async fn render_page(req: HttpRequest, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    if *req.method() != Method::GET {
        return Err(Error::not_found("page not found"));
    }
    let html = state.pages.compose(req.path()).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::{PageComposer, PageTemplate, SiteMetadata};
    use crate::domain::ports::{MockProductService, MockUserService};
    use crate::domain::product::fixtures::{owner, product};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use std::sync::Arc;

    const TEMPLATE: &str = "<html prefix=\"{ssr-og}\"><title>{ssr-title}</title><!--{ssr-head}--></html>";

    fn state(products: MockProductService, users: MockUserService) -> web::Data<HttpState> {
        let products = Arc::new(products);
        let pages = PageComposer::new(
            Arc::new(PageTemplate::new(TEMPLATE)),
            SiteMetadata::default(),
            products.clone(),
            Arc::new(users),
        );
        web::Data::new(HttpState::new(products, Arc::new(pages)))
    }

    async fn get(
        state: web::Data<HttpState>,
        request: actix_test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .default_service(web::route().to(render_page)),
        )
        .await;
        actix_test::call_service(&app, request.to_request()).await
    }

    #[rstest]
    #[case("/")]
    #[case("/search?q=forest")]
    #[actix_web::test]
    async fn serves_default_pages_as_html(#[case] uri: &str) {
        let response = get(
            state(MockProductService::new(), MockUserService::new()),
            actix_test::TestRequest::get().uri(uri),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"text/html; charset=utf-8"[..])
        );
        let body = actix_test::read_body(response).await;
        let html = std::str::from_utf8(&body).expect("utf-8 html");
        assert!(html.contains("<title>Orbital Market</title>"));
        assert!(html.contains("og: https://ogp.me/ns/website#"));
    }

    #[actix_web::test]
    async fn serves_product_pages() {
        let mut products = MockProductService::new();
        products
            .expect_find_by_id()
            .return_once(|_| Ok(Some(product())));
        let mut users = MockUserService::new();
        users.expect_find_by_id().return_once(|_| Ok(Some(owner())));

        let response = get(
            state(products, users),
            actix_test::TestRequest::get().uri("/product/stylized-forest-pack"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let html = std::str::from_utf8(&body).expect("utf-8 html");
        assert!(html.contains("<title>Stylized Forest Pack</title>"));
        assert!(html.contains("og: https://ogp.me/ns/article#"));
    }

    #[rstest]
    #[case(actix_test::TestRequest::get().uri("/unknown-route"))]
    #[case(actix_test::TestRequest::post().uri("/"))]
    #[actix_web::test]
    async fn unmatched_requests_are_not_found(#[case] request: actix_test::TestRequest) {
        let response = get(
            state(MockProductService::new(), MockUserService::new()),
            request,
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
