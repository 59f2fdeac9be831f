use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, web, App, Error,
};
use toolbox_tools::BUILTIN_TOOL_NAMES;
use web_service::{server::app_config, AppState, ServerConfig};

async fn setup_app() -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    let config = ServerConfig {
        site_url: "https://tools.example.com".to_string(),
        ..ServerConfig::default()
    };
    let app_state = web::Data::new(AppState::new(&config).unwrap());
    test::init_service(App::new().app_data(app_state).configure(app_config)).await
}

async fn read_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

fn content_type(resp: &ServiceResponse) -> String {
    resp.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn home_page_lists_every_tool() {
    let app = setup_app().await;
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("text/html"));

    let html = read_text(resp).await;
    assert!(html.contains(r#"<html lang="zh-CN""#));
    assert!(html.contains("开发者工具箱"));
    for tool in BUILTIN_TOOL_NAMES {
        assert!(html.contains(&format!(r#"href="/tools/{tool}""#)), "{tool}");
    }
    assert!(html.contains(r#"<link rel="canonical" href="https://tools.example.com/""#));
}

#[actix_web::test]
async fn lang_query_switches_locale_and_sets_cookie() {
    let app = setup_app().await;
    let req = test::TestRequest::get().uri("/?lang=en").to_request();
    let resp = test::call_service(&app, req).await;

    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("locale=en;"));

    let html = read_text(resp).await;
    assert!(html.contains(r#"<html lang="en""#));
    assert!(html.contains("Dev Toolbox"));
    assert!(html.contains(r#"href="/tools/base64?lang=en""#));
}

#[actix_web::test]
async fn locale_cookie_is_honoured() {
    let app = setup_app().await;
    let req = test::TestRequest::get()
        .uri("/")
        .cookie(actix_web::cookie::Cookie::new("locale", "en"))
        .to_request();
    let html = read_text(test::call_service(&app, req).await).await;
    assert!(html.contains(r#"<html lang="en""#));
}

#[actix_web::test]
async fn home_search_shows_results() {
    let app = setup_app().await;
    let req = test::TestRequest::get().uri("/?q=color&lang=en").to_request();
    let html = read_text(test::call_service(&app, req).await).await;

    assert!(html.contains("Results for “color”"));
    assert!(html.contains(r#"class="search-results""#));
}

#[actix_web::test]
async fn tool_page_renders_form() {
    let app = setup_app().await;
    let req = test::TestRequest::get().uri("/tools/base64").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_text(resp).await;
    assert!(html.contains(r#"<form method="post" action="/tools/base64""#));
    assert!(html.contains(r#"name="text""#));
    assert!(html.contains(r#"name="url_safe""#));
    assert!(html.contains("application/ld+json"));
    assert!(html.contains("BreadcrumbList"));
}

#[actix_web::test]
async fn tool_form_post_shows_output() {
    let app = setup_app().await;
    let req = test::TestRequest::post()
        .uri("/tools/base64?lang=en")
        .set_form([("text", "hello"), ("action", "encode")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_text(resp).await;
    assert!(html.contains("<pre><code>aGVsbG8=</code></pre>"));
    // the submitted value is kept in the form
    assert!(html.contains(">hello</textarea>"));
}

#[actix_web::test]
async fn markdown_output_is_previewed() {
    let app = setup_app().await;
    let req = test::TestRequest::post()
        .uri("/tools/markdown-preview")
        .set_form([("markdown", "# Hi")])
        .to_request();
    let html = read_text(test::call_service(&app, req).await).await;

    assert!(html.contains(r#"<div class="preview"><h1>Hi</h1>"#));
}

#[actix_web::test]
async fn markdown_preview_has_no_script_links() {
    let app = setup_app().await;
    let req = test::TestRequest::post()
        .uri("/tools/markdown-preview")
        .set_form([(
            "markdown",
            "[click](javascript:alert(document.cookie)) ![img](data:text/html,x)",
        )])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_text(resp).await;
    assert!(html.contains(r##"<a href="#">click</a>"##));
    assert!(!html.contains(r#"href="javascript:"#));
    assert!(!html.contains(r#"src="data:"#));
}

#[actix_web::test]
async fn tool_rejections_render_inline() {
    let app = setup_app().await;
    let req = test::TestRequest::post()
        .uri("/tools/json-formatter?lang=en")
        .set_form([("text", "{\"a\":")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_text(resp).await;
    assert!(html.contains(r#"role="alert""#));
    assert!(html.contains("Invalid JSON at line 1"));
}

#[actix_web::test]
async fn unreadable_form_fields_render_inline() {
    let app = setup_app().await;
    let req = test::TestRequest::post()
        .uri("/tools/password-generator?lang=en")
        .set_form([("length", "abc")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_text(resp).await;
    assert!(html.contains("Some fields could not be read: length:"));
}

#[actix_web::test]
async fn unknown_pages_are_404_html() {
    let app = setup_app().await;

    for uri in ["/tools/nope", "/no/such/page"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(content_type(&resp).starts_with("text/html"));

        let html = read_text(resp).await;
        assert!(html.contains("noindex"));
        assert!(html.contains("页面未找到"));
    }
}

#[actix_web::test]
async fn sitemap_lists_every_tool_with_alternates() {
    let app = setup_app().await;
    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("application/xml"));

    let xml = read_text(resp).await;
    assert!(xml.contains("<loc>https://tools.example.com/</loc>"));
    for tool in BUILTIN_TOOL_NAMES {
        assert!(
            xml.contains(&format!("<loc>https://tools.example.com/tools/{tool}</loc>")),
            "{tool}"
        );
    }
    assert!(xml.contains(r#"hreflang="en""#));
}

#[actix_web::test]
async fn robots_points_at_sitemap() {
    let app = setup_app().await;
    let req = test::TestRequest::get().uri("/robots.txt").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(content_type(&resp).starts_with("text/plain"));

    let body = read_text(resp).await;
    assert!(body.contains("Disallow: /api/"));
    assert!(body.contains("Sitemap: https://tools.example.com/sitemap.xml"));
}

#[actix_web::test]
async fn og_image_escapes_title() {
    let app = setup_app().await;
    let req = test::TestRequest::get()
        .uri("/og?title=%3Cb%3EHi%3C%2Fb%3E&lang=en")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "image/svg+xml");
    assert!(resp.headers().contains_key(header::CACHE_CONTROL));

    let svg = read_text(resp).await;
    assert!(svg.contains("&lt;b&gt;Hi&lt;/b&gt;"));
    assert!(svg.contains("tools.example.com"));
}
