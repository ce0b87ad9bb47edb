use super::*;
use axum::{
    body::{self, Body},
    http::{header, Request},
};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    api: ApiContext,
    sink: Arc<TabularSink>,
    _dir: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = Arc::new(TabularSink::new(dir.path().join("interns.csv")));
    sink.ensure_initialized().expect("init");
    let api = ApiContext::new(Registry::seeded(), sink.clone());
    let router = build_router(Arc::new(AppState { api: api.clone() }));
    TestApp {
        router,
        api,
        sink,
        _dir: dir,
    }
}

async fn get_page(app: &TestApp, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = app.router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8(body.to_vec()).expect("utf8"))
}

async fn post_form(app: &TestApp, form: &str) -> axum::response::Response {
    let request = Request::post("/registration")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request");
    app.router.clone().oneshot(request).await.expect("response")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app();
    let (status, body) = get_page(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn dashboard_shows_seed_counts() {
    let app = test_app();
    let (status, body) = get_page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<strong>Total Trained Interns:</strong> 3"));
    assert!(body.contains("<strong>In Progress:</strong> 1"));
    assert!(body.contains("<strong>Completed:</strong> 2"));
}

#[tokio::test]
async fn registration_form_requires_all_fields() {
    let app = test_app();
    let (status, body) = get_page(&app, "/registration").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Interns Guide - Register Intern</title>"));
    for field in ["name='name' required", "name='email' required", "name='dept' required"] {
        assert!(body.contains(field), "missing {field}");
    }
}

#[tokio::test]
async fn posting_registration_redirects_home_and_persists() {
    let app = test_app();
    let response = post_form(&app, "name=Alex&email=alex%40co.com&dept=Python").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).expect("location"),
        "/"
    );

    let (_, dashboard) = get_page(&app, "/").await;
    assert!(dashboard.contains("<strong>Total Trained Interns:</strong> 4"));
    assert!(dashboard.contains("<strong>In Progress:</strong> 2"));

    let (_, onboarding) = get_page(&app, "/onboarding").await;
    assert!(onboarding.contains("<tr><td>Alex</td><td>Python</td><td>In Progress</td></tr>"));
    assert!(!onboarding.contains("alex@co.com"), "email must not be displayed");

    let rows = app.sink.read_rows().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, "alex@co.com");
}

#[tokio::test]
async fn missing_field_is_a_bad_request() {
    let app = test_app();
    let response = post_form(&app, "name=Alex&dept=Python").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(String::from_utf8_lossy(&body).contains("missing required field `email`"));

    assert_eq!(app.api.registry.len(), 3);
    assert_eq!(app.sink.row_count().expect("count"), 0);
}

#[tokio::test]
async fn deleted_table_surfaces_server_error() {
    let app = test_app();
    std::fs::remove_file(app.sink.path()).expect("remove table");

    let response = post_form(&app, "name=Alex&email=alex%40co.com&dept=Python").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(String::from_utf8_lossy(&body).contains("interns table not found"));

    assert_eq!(app.api.registry.len(), 3);
    assert!(!app.sink.path().exists());
}

#[tokio::test]
async fn onboarding_lists_every_intern_in_order() {
    let app = test_app();
    let (status, body) = get_page(&app, "/onboarding").await;
    assert_eq!(status, StatusCode::OK);

    let june = body.find("<td>June</td>").expect("June");
    let vismay = body.find("<td>Vismay</td>").expect("Vismay");
    let saahithi = body.find("<td>Saahithi</td>").expect("Saahithi");
    assert!(june < vismay && vismay < saahithi);
}

#[tokio::test]
async fn static_pages_render_their_titles() {
    let app = test_app();
    for (uri, title) in [
        ("/modules", "Learning Modules"),
        ("/schedule", "10-Day Schedule"),
        ("/resources", "Training Resources"),
        ("/assessments", "Assessment Tasks"),
        ("/contact", "Contact Us"),
    ] {
        let (status, body) = get_page(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.contains(&format!("<h2>{title}</h2>")), "{uri}");
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = test_app();
    let (status, body) = get_page(&app, "/interns/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("/interns/42"));
}
