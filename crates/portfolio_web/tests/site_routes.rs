use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use portfolio_core::db::open_db;
use portfolio_core::{ContactRouting, NotificationSender, TransportError};
use portfolio_web::{build_router, AppState};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingSender {
    subjects: Mutex<Vec<String>>,
    fail: bool,
}

impl NotificationSender for RecordingSender {
    fn send(
        &self,
        subject: &str,
        _body: &str,
        _from: &str,
        _to: &[String],
    ) -> Result<(), TransportError> {
        self.subjects.lock().unwrap().push(subject.to_string());
        if self.fail {
            return Err(TransportError::Delivery("connection refused".to_string()));
        }
        Ok(())
    }
}

struct Site {
    _dir: TempDir,
    db_path: PathBuf,
    sender: Arc<RecordingSender>,
    app: Router,
}

impl Site {
    fn new() -> Self {
        Self::with_sender(RecordingSender::default())
    }

    fn with_sender(sender: RecordingSender) -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("site.sqlite3");
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("site.css"), "body { margin: 0; }").unwrap();

        let sender = Arc::new(sender);
        let state = AppState::new(
            db_path.clone(),
            sender.clone(),
            ContactRouting {
                from_email: "site@example.com".to_string(),
                contact_email: "owner@example.com".to_string(),
            },
        );
        let app = build_router(state, &static_dir);
        Self {
            _dir: dir,
            db_path,
            sender,
            app,
        }
    }

    fn conn(&self) -> Connection {
        open_db(&self.db_path).unwrap()
    }

    fn contact_rows(&self) -> i64 {
        self.conn()
            .query_row("SELECT COUNT(*) FROM contact_messages;", [], |row| {
                row.get(0)
            })
            .unwrap()
    }

    fn mails_sent(&self) -> usize {
        self.sender.subjects.lock().unwrap().len()
    }

    async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response {
        self.request(
            Request::get(uri)
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post_contact(&self, form: &str) -> Response {
        self.request(
            Request::post("/contact")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn request(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn seed_project(conn: &Connection, slug: &str, featured: bool) {
    conn.execute(
        "INSERT INTO projects (
            title, slug, short_description, technologies, is_featured, is_active, created_at
        ) VALUES (?1, ?2, ?3, 'Rust, axum', ?4, 1, 1000);",
        params![
            format!("Project {slug}"),
            slug,
            format!("About {slug}"),
            i64::from(featured)
        ],
    )
    .unwrap();
}

const VALID_FORM: &str =
    "name=Ada&email=ada%40example.com&subject=Consulting&message=Are+you+available%3F";

#[tokio::test]
async fn home_lists_featured_projects_with_meta() {
    let site = Site::new();
    seed_project(&site.conn(), "lighthouse", true);
    seed_project(&site.conn(), "backstage", false);

    let response = site.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<title>Professional Portfolio</title>"));
    assert!(body.contains("Project lighthouse"));
    assert!(!body.contains("Project backstage"));
}

#[tokio::test]
async fn project_detail_renders_technologies() {
    let site = Site::new();
    seed_project(&site.conn(), "lighthouse", false);

    let response = site.get("/projects/lighthouse").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<title>Project: Project lighthouse</title>"));
    assert!(body.contains("<li>axum</li>"));
}

#[tokio::test]
async fn unknown_slug_and_unknown_route_give_404_page() {
    let site = Site::new();

    for uri in ["/projects/missing", "/no-such-page"] {
        let response = site.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(body_text(response).await.contains("Page Not Found"));
    }
}

#[tokio::test]
async fn resume_page_handles_missing_resume() {
    let site = Site::new();

    let body = body_text(site.get("/resume").await).await;
    assert!(body.contains("<title>My Resume</title>"));
    assert!(body.contains("not available"));

    site.conn()
        .execute(
            "INSERT INTO resumes (title, file_url, is_default, updated_at)
             VALUES ('CV', '/media/cv.pdf', 1, 1);",
            [],
        )
        .unwrap();
    let body = body_text(site.get("/resume").await).await;
    assert!(body.contains("cv.pdf"));
    assert!(!body.contains("not available"));
}

#[tokio::test]
async fn contact_form_renders_empty() {
    let site = Site::new();

    let response = site.get("/contact").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body = body_text(response).await;
    assert!(body.contains("<title>Contact Me</title>"));
    assert!(!body.contains("field-error"));
}

#[tokio::test]
async fn invalid_submission_rerenders_without_side_effects() {
    let site = Site::new();

    let response = site
        .post_contact("name=Ada&subject=Consulting&message=Hello")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("This field is required."));
    assert!(body.contains("value=\"Ada\""));
    assert_eq!(site.contact_rows(), 0);
    assert_eq!(site.mails_sent(), 0);
}

#[tokio::test]
async fn valid_submission_redirects_and_shows_notice_once() {
    let site = Site::new();

    let response = site.post_contact(VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/contact");
    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("portfolio_flash="));
    assert_eq!(site.contact_rows(), 1);
    assert_eq!(site.mails_sent(), 1);

    let cookie = set_cookie.split(';').next().unwrap().to_string();
    let first = site.get_with_cookie("/contact", &cookie).await;
    let cleared = first.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(cleared.contains("Max-Age=0"));
    assert!(body_text(first)
        .await
        .contains("Your message has been sent successfully!"));

    let second = body_text(site.get_with_cookie("/contact", &cookie).await).await;
    assert!(!second.contains("Your message has been sent successfully!"));
}

#[tokio::test]
async fn failed_page_leaves_notice_for_next_render() {
    let site = Site::new();

    let response = site.post_contact(VALID_FORM).await;
    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let missing = site.get_with_cookie("/projects/missing", &cookie).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(missing.headers().get(SET_COOKIE).is_none());
    assert!(!body_text(missing)
        .await
        .contains("Your message has been sent successfully!"));

    let next = site.get_with_cookie("/contact", &cookie).await;
    assert!(next.headers()[SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
    assert!(body_text(next)
        .await
        .contains("Your message has been sent successfully!"));
}

#[tokio::test]
async fn transport_failure_returns_500_and_keeps_message() {
    let site = Site::with_sender(RecordingSender {
        fail: true,
        ..RecordingSender::default()
    });

    let response = site.post_contact(VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(site.contact_rows(), 1);
    assert_eq!(site.mails_sent(), 1);
}

#[tokio::test]
async fn health_and_static_assets_are_served() {
    let site = Site::new();

    let health = site.get("/health").await;
    assert_eq!(health.status(), StatusCode::OK);
    assert!(body_text(health).await.starts_with("ok version="));

    let css = site.get("/static/site.css").await;
    assert_eq!(css.status(), StatusCode::OK);
    assert_eq!(body_text(css).await, "body { margin: 0; }");
}
