//! Integration tests for vista view dispatch
//!
//! Covers request handling, binding failures, interceptors, link flavors and
//! configuration-driven setup.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vista::*;

fn gallery() -> ViewServiceBuilder {
    let picture = ViewBinding::new(
        "pictureView",
        vec![ParamSpec::path_part("id"), ParamSpec::query("size").optional()],
        |args, _ctx| {
            let id: u32 = args.require("id")?;
            if id == 0 {
                return Err(ViewError::error_response(410, "picture deleted"));
            }
            let size = args.get::<String>("size")?.unwrap_or_else(|| "medium".into());
            Ok(Some(format!("/picture-{}.jsp", size)))
        },
    );

    let feed = ViewBinding::new(
        "feedView",
        vec![ParamSpec::qualifier("variant")],
        |args, _ctx| Ok(Some(format!("feed-{}.jsp", args.require::<String>("variant")?))),
    );

    let download = ViewBinding::new("downloadView", vec![ParamSpec::cookie("token")], |_, _| {
        Ok(None)
    });

    let mut builder = ViewService::builder()
        .with_template_prefix("/tpl/")
        .with_path_base(PathBase::new("http://localhost:8080", "/gallery", "/view"));
    builder
        .register(picture.route("/picture/${id}.html").with_signature(["id"]))
        .unwrap()
        .register(
            feed.route("/feed/${id}.xml")
                .with_signature(["id"])
                .with_qualifier("rss"),
        )
        .unwrap()
        .register(download.route("/download/${file}"))
        .unwrap();
    builder
}

// ============================================================================
// Request handling
// ============================================================================

#[test]
fn test_render_outcome() {
    let service = gallery().build();
    let mut ctx = ViewContext::new().with_query_string("size=large");

    assert_eq!(
        service.handle_request("/picture/5.html", &mut ctx).unwrap(),
        Outcome::Render("/tpl/picture-large.jsp".to_string())
    );
    assert_eq!(ctx.path_part("id"), Some("5"));
    assert_eq!(ctx.qualifier(), None);
}

#[test]
fn test_unknown_path_is_404() {
    let service = gallery().build();
    let outcome = service
        .handle_request("/nothing/here", &mut ViewContext::new())
        .unwrap();
    assert!(matches!(outcome, Outcome::Error { status: 404, .. }));
}

#[test]
fn test_invoke_view_reports_not_found() {
    let service = gallery().build();
    let err = service
        .invoke_view("/nothing/here", &mut ViewContext::new())
        .unwrap_err();
    assert!(matches!(err, ViewError::PageNotFound(_)));
}

#[test]
fn test_handler_error_response() {
    let service = gallery().build();
    assert_eq!(
        service
            .handle_request("/picture/0.html", &mut ViewContext::new())
            .unwrap(),
        Outcome::Error {
            status: 410,
            message: Some("picture deleted".to_string())
        }
    );
}

#[test]
fn test_conversion_failure_is_an_error() {
    let service = gallery().build();
    let result = service.handle_request("/picture/abc.html", &mut ViewContext::new());
    assert!(matches!(result, Err(ViewError::Conversion { .. })));
}

#[test]
fn test_qualifier_is_bound() {
    let service = gallery().build();
    let mut ctx = ViewContext::new();
    assert_eq!(
        service.handle_request("/feed/3.xml", &mut ctx).unwrap(),
        Outcome::Render("/tpl/feed-rss.jsp".to_string())
    );
    assert_eq!(ctx.qualifier(), Some("rss"));
}

#[test]
fn test_missing_cookie_is_404_and_handled_without_template() {
    let service = gallery().build();

    let outcome = service
        .handle_request("/download/a.zip", &mut ViewContext::new())
        .unwrap();
    assert!(matches!(outcome, Outcome::Error { status: 404, .. }));

    let mut ctx = ViewContext::new().with_cookie_header("token=t1");
    assert_eq!(
        service.handle_request("/download/a.zip", &mut ctx).unwrap(),
        Outcome::Handled
    );
}

// ============================================================================
// Interceptors
// ============================================================================

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<AtomicUsize>,
    invoked: Arc<Mutex<Vec<String>>>,
}

impl ViewInterceptor for Recorder {
    fn on_request(&self, _path: &str, _ctx: &ViewContext) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn on_view_handler_invocation(&self, _ctx: &ViewContext, handler_id: &str) {
        self.invoked.lock().unwrap().push(handler_id.to_string());
    }
}

struct MobileTemplates;

impl ViewInterceptor for MobileTemplates {
    fn on_rendering(&self, template: &str, ctx: &ViewContext) -> Option<String> {
        (ctx.cookie("mobile") == Some("1")).then(|| template.replace(".jsp", ".mobile.jsp"))
    }
}

struct ClaimErrors;

impl ViewInterceptor for ClaimErrors {
    fn on_error_response(&self, error: &ViewError, _ctx: &ViewContext) -> bool {
        error.status() == 404
    }
}

#[test]
fn test_interceptor_hooks_are_called() {
    let recorder = Recorder::default();
    let service = gallery().with_interceptor(recorder.clone()).build();

    service
        .handle_request("/picture/1.html", &mut ViewContext::new())
        .unwrap();
    service
        .handle_request("/missing", &mut ViewContext::new())
        .unwrap();

    assert_eq!(recorder.requests.load(Ordering::SeqCst), 2);
    assert_eq!(*recorder.invoked.lock().unwrap(), vec!["pictureView".to_string()]);
}

#[test]
fn test_interceptor_replaces_template() {
    let service = gallery().with_interceptor(MobileTemplates).build();
    let mut ctx = ViewContext::new().with_cookie("mobile", "1");
    assert_eq!(
        service.handle_request("/picture/1.html", &mut ctx).unwrap(),
        Outcome::Render("/tpl/picture-medium.mobile.jsp".to_string())
    );
}

#[test]
fn test_interceptor_claims_error() {
    let service = gallery().with_interceptor(ClaimErrors).build();
    assert_eq!(
        service
            .handle_request("/missing", &mut ViewContext::new())
            .unwrap(),
        Outcome::Handled
    );
    assert!(matches!(
        service
            .handle_request("/picture/0.html", &mut ViewContext::new())
            .unwrap(),
        Outcome::Error { status: 410, .. }
    ));
}

// ============================================================================
// Link building
// ============================================================================

#[rstest]
#[case(PathType::View, "/picture/9.html")]
#[case(PathType::Relative, "/gallery/view/picture/9.html")]
#[case(PathType::Absolute, "http://localhost:8080/gallery/view/picture/9.html")]
fn test_build_path_flavors(#[case] path_type: PathType, #[case] expected: &str) {
    let service = gallery().build();
    let data = PathData::new().with_field("id", 9);
    assert_eq!(
        service.build_path(&data, None, path_type).unwrap(),
        Some(expected.to_string())
    );
}

#[test]
fn test_build_path_uses_data_qualifier() {
    let service = gallery().build();
    let data = PathData::new().with_field("id", 9).with_qualifier("rss");
    assert_eq!(
        service.build_path(&data, Some(""), PathType::View).unwrap(),
        Some("/feed/9.xml".to_string())
    );
}

#[test]
fn test_build_path_errors() {
    let service = gallery().build();
    let data = PathData::new().with_field("nope", 1);

    assert!(matches!(
        service.build_path(&data, Some("unknown"), PathType::View),
        Err(ViewError::Route(_))
    ));
    assert!(matches!(
        service.build_path(&data, None, PathType::View),
        Err(ViewError::Route(_))
    ));
    assert_eq!(
        service
            .build_path(&data, Some("picture"), PathType::View)
            .unwrap(),
        None
    );
}

// ============================================================================
// Configuration
// ============================================================================

const CONFIG: &str = r#"
[server]
host = "photos.example.com"
port = 80

[routing]
context_path = "/app"
template_prefix = "/templates/"

[[views]]
pattern = "/album/${album}.html"
handler = "albumView"
signature = ["album"]

[[views]]
pattern = "/album/${album}/${page}.html"
handler = "albumView"
signature = ["album", "page"]
"#;

#[test]
fn test_service_from_config() {
    let config = VistaConfig::parse(CONFIG).unwrap();
    let service = ViewServiceBuilder::from_config(&config, |id| {
        (id == "albumView").then(|| ViewBinding::template(id, "album.jsp"))
    })
    .unwrap()
    .build();

    assert_eq!(
        service
            .handle_request("/album/2/3.html", &mut ViewContext::new())
            .unwrap(),
        Outcome::Render("/templates/album.jsp".to_string())
    );

    let data = PathData::new().with_field("album", 2).with_field("page", 3);
    assert_eq!(
        service.build_path(&data, None, PathType::Absolute).unwrap(),
        Some("http://photos.example.com/app/album/2/3.html".to_string())
    );
}

#[test]
fn test_config_with_unknown_handler_fails() {
    let config = VistaConfig::parse(CONFIG).unwrap();
    let err = ViewServiceBuilder::from_config(&config, |_| None).unwrap_err();
    assert!(err.to_string().contains("albumView"));
}
