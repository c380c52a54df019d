//! End-to-end flows over the rendered dashboard.
//!
//! These tests mount a full page in a `MemoryDocument`, drive it with the
//! events a browser host would forward, and talk to a mocked server for the
//! locale notification.

use leafcare_ui::config::Config;
use leafcare_ui::dom::{dashboard, DefaultAction, Document, MemoryDocument, ScrollBehavior};
use leafcare_ui::gallery::PanelState;
use leafcare_ui::i18n::{LocaleTable, LocalizationMetrics, TableValidator};
use leafcare_ui::notify::HttpNotifier;
use leafcare_ui::page::{Page, PageEvent};
use leafcare_ui::upload::{SelectedFile, UPLOADING_LABEL};
use reqwest::Url;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ==================== Test Helpers ====================

fn create_test_config(server_uri: &str) -> Config {
    Config {
        server_base_url: Url::parse(server_uri).unwrap(),
        server_lang: None,
        session_cookie: Some("session=test".to_string()),
        notify_timeout: Duration::from_secs(2),
        notify_max_attempts: 1,
    }
}

struct Mounted {
    doc: MemoryDocument,
    layout: dashboard::Dashboard,
    page: Page,
    metrics: Arc<LocalizationMetrics>,
}

fn mount_dashboard(config: &Config, uploads: &[&str], hint: Option<&str>) -> Mounted {
    let metrics = Arc::new(LocalizationMetrics::new());
    let notifier = Arc::new(HttpNotifier::new(config, metrics.clone()).unwrap());
    let mut doc = MemoryDocument::new();
    let layout = dashboard::build(&mut doc, uploads);
    let (page, _) = Page::mount(
        &mut doc,
        Arc::new(LocaleTable::builtin()),
        notifier,
        metrics.clone(),
        hint,
    );
    Mounted {
        doc,
        layout,
        page,
        metrics,
    }
}

fn text_for_key(doc: &MemoryDocument, key: &str) -> Vec<String> {
    doc.find_by_attribute("data-i18n")
        .into_iter()
        .filter(|el| doc.attribute(*el, "data-i18n").as_deref() == Some(key))
        .filter_map(|el| doc.text_content(el))
        .collect()
}

/// Poll the mock until `count` requests arrived or five seconds passed.
async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count || tokio::time::Instant::now() >= deadline {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// ==================== Localization Flow Tests ====================

#[tokio::test]
async fn test_locale_switch_relabels_page_and_notifies_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/set_language/hi"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(header("accept", "application/json"))
        .and(header("cookie", "session=test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "lang": "hi"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut m = mount_dashboard(&create_test_config(&server.uri()), &["a.jpg"], None);
    assert_eq!(text_for_key(&m.doc, "logout"), vec!["Logout"]);

    m.page
        .localizer_mut()
        .select_locale(&mut m.doc, "hi")
        .settled()
        .await;

    assert_eq!(m.page.localizer().active_locale(), "hi");
    assert_eq!(text_for_key(&m.doc, "logout"), vec!["लॉग आउट"]);
    assert!(m.doc.has_class(m.layout.locale_controls[1], "active"));
    assert!(!m.doc.has_class(m.layout.locale_controls[0], "active"));
    assert_eq!(m.metrics.notifications_sent(), 1);
    assert_eq!(m.metrics.notification_failures(), 0);
}

#[tokio::test]
async fn test_click_on_href_only_control_notifies_with_its_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/set_language/mr"))
        .respond_with(ResponseTemplate::new(302))
        .expect(1)
        .mount(&server)
        .await;

    let mut m = mount_dashboard(&create_test_config(&server.uri()), &[], Some("hi"));

    let action = m.page.dispatch(
        &mut m.doc,
        PageEvent::LocaleControlClicked(m.layout.locale_controls[2]),
    );
    assert_eq!(action, DefaultAction::Prevent);
    assert_eq!(m.page.localizer().active_locale(), "mr");

    let requests = wait_for_requests(&server, 1).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/set_language/mr");
}

#[tokio::test]
async fn test_unreachable_server_leaves_page_switched() {
    let mut m = mount_dashboard(&create_test_config("http://127.0.0.1:9"), &["a.jpg"], None);

    m.page
        .localizer_mut()
        .select_locale(&mut m.doc, "mr")
        .settled()
        .await;

    assert_eq!(m.page.localizer().active_locale(), "mr");
    assert_eq!(text_for_key(&m.doc, "logout"), vec!["लॉग आउट"]);
    assert_eq!(m.metrics.notification_failures(), 1);
}

#[tokio::test]
async fn test_unknown_server_hint_renders_base_locale() {
    let m = mount_dashboard(&create_test_config("http://127.0.0.1:9"), &[], Some("fr"));

    assert_eq!(m.page.localizer().active_locale(), "en");
    assert_eq!(text_for_key(&m.doc, "no_recent"), vec!["No recent uploads yet."]);
    assert!(m.doc.has_class(m.layout.locale_controls[0], "active"));
    assert_eq!(m.metrics.fallbacks(), 1);
    assert_eq!(m.metrics.notifications_sent(), 0);
}

#[test]
fn test_greeting_scenario() {
    let table = Arc::new(
        LocaleTable::builder("en")
            .locale("en", [("greeting", "Hello")])
            .locale("hi", [("greeting", "नमस्ते")])
            .build()
            .unwrap(),
    );
    let metrics = Arc::new(LocalizationMetrics::new());
    let notifier = Arc::new(HttpNotifier::new(&Config::default(), metrics.clone()).unwrap());

    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let first = doc.append(
        body,
        leafcare_ui::dom::El::new("h1").attr("data-i18n", "greeting"),
    );
    let second = doc.append(
        body,
        leafcare_ui::dom::El::new("p").attr("data-i18n", "greeting"),
    );
    let (mut page, _) = Page::mount(&mut doc, table, notifier, metrics, None);

    page.localizer_mut().apply_locale(&mut doc, "hi");
    assert_eq!(doc.text_content(first).as_deref(), Some("नमस्ते"));
    assert_eq!(doc.text_content(second).as_deref(), Some("नमस्ते"));

    let report = page.localizer_mut().apply_locale(&mut doc, "fr");
    assert!(report.fell_back);
    assert_eq!(doc.text_content(first).as_deref(), Some("Hello"));
    assert_eq!(doc.text_content(second).as_deref(), Some("Hello"));
}

// ==================== Gallery Flow Tests ====================

#[test]
fn test_history_click_reveals_and_highlights_thumbnail() {
    let mut m = mount_dashboard(&Config::default(), &["a.jpg", "b.jpg", "c.jpg"], None);
    let wrap = m.layout.gallery_wrap.unwrap();

    m.page
        .dispatch(&mut m.doc, PageEvent::HistoryItemClicked(m.layout.history_items[1]));

    assert_eq!(m.doc.style(wrap, "display").as_deref(), Some("block"));
    assert_eq!(
        m.doc.style(m.layout.thumbnails[1], "border").as_deref(),
        Some("2px solid #2b7a2b")
    );
    for other in [m.layout.thumbnails[0], m.layout.thumbnails[2]] {
        assert_ne!(m.doc.style(other, "border").as_deref(), Some("2px solid #2b7a2b"));
    }
    assert_eq!(m.doc.scroll_log(), &[(wrap, ScrollBehavior::Smooth)]);

    m.page
        .dispatch(&mut m.doc, PageEvent::HistoryItemClicked(m.layout.history_items[2]));
    assert_eq!(m.doc.style(wrap, "display").as_deref(), Some("none"));
    assert_eq!(m.page.gallery().unwrap().highlighted(), Some(m.layout.thumbnails[1]));
}

#[test]
fn test_view_all_opens_without_highlight() {
    let mut m = mount_dashboard(&Config::default(), &["a.jpg"], None);
    let link = m.layout.view_all_link.unwrap();

    for _ in 0..2 {
        let action = m.page.dispatch(&mut m.doc, PageEvent::ViewAllClicked(link));
        assert_eq!(action, DefaultAction::Prevent);
        assert_eq!(m.page.gallery().unwrap().panel(), PanelState::Visible);
    }
    assert_eq!(m.page.gallery().unwrap().highlighted(), None);
}

// ==================== Upload Flow Tests ====================

#[test]
fn test_plain_text_upload_is_rejected_inline() {
    let mut m = mount_dashboard(&Config::default(), &[], None);
    let input = m.doc.find_by_id("fileInput").unwrap();
    let preview = m.doc.find_by_id("preview").unwrap();

    m.page.dispatch(
        &mut m.doc,
        PageEvent::FileSelected(Some(SelectedFile::new("notes.txt", "text/plain"))),
    );

    assert_eq!(m.doc.attribute(input, "value").as_deref(), Some(""));
    assert_eq!(m.doc.text_content(preview).as_deref(), Some("Invalid file type"));
}

#[test]
fn test_image_upload_previews_then_submits() {
    let mut m = mount_dashboard(&Config::default(), &[], None);
    let preview = m.doc.find_by_id("preview").unwrap();
    let button = m.doc.find_by_id("uploadBtn").unwrap();

    m.page.dispatch(
        &mut m.doc,
        PageEvent::FileSelected(Some(SelectedFile::new("leaf.jpg", "image/jpeg"))),
    );
    let image = m.doc.children(preview)[0];
    assert_eq!(m.doc.live_object_urls().len(), 1);

    m.page.dispatch(&mut m.doc, PageEvent::PreviewLoaded(image));
    assert!(m.doc.live_object_urls().is_empty());

    m.page.dispatch(&mut m.doc, PageEvent::FormSubmitted);
    assert!(m.doc.attribute(button, "disabled").is_some());
    assert_eq!(m.doc.text_content(button).as_deref(), Some(UPLOADING_LABEL));
}

// ==================== Configuration Tests ====================

#[test]
fn test_builtin_table_validates_clean() {
    let report = TableValidator::validate(&LocaleTable::builtin());
    assert!(report.is_clean(), "{:?}", report);
}

#[test]
fn test_env_file_feeds_notifier_config() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "LEAFCARE_FLOW_TEST_URL=http://localhost:8080/app/").unwrap();
    dotenvy::from_path(file.path()).unwrap();

    let raw = std::env::var("LEAFCARE_FLOW_TEST_URL").unwrap();
    let base = Url::parse(&raw).unwrap();
    let url = leafcare_ui::notify::set_language_url(&base, "hi").unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/app/set_language/hi");
}
