//! End-to-end console sessions against a mock analytics server.

use apiline::{
    get_code, ConsoleController, PanelEvent, PanelExamples, PanelProfile, QueryPanel, Services,
    SessionSites, Tab, TextRenderer, PLACEHOLDER_SITE,
};
use apiline::panel::services::Clipboard;
use mockito::{Matcher, ServerGuard};
use pretty_assertions::assert_eq;

const SCHEMA: &str = r#"{
  "type": "object",
  "required": ["site_id", "metrics"],
  "properties": {
    "site_id": {"type": "string"},
    "metrics": {"type": "array"}
  }
}"#;

fn logged_in_profile(server: &ServerGuard) -> PanelProfile {
    let text = format!(
        "[default]\nhost = {}\nsites = a.com, b.com\nsite = b.com\napi_key = secret\nclipboard = memory\n",
        server.url()
    );
    PanelProfile::parse("default", &text).unwrap()
}

fn logged_out_profile(server: &ServerGuard) -> PanelProfile {
    let text = format!("[guest]\nhost = {}\nclipboard = memory\n", server.url());
    PanelProfile::parse("guest", &text).unwrap()
}

async fn console(profile: &PanelProfile) -> ConsoleController<SessionSites, Vec<u8>> {
    let panel = QueryPanel::new(
        profile.session(None),
        PanelExamples::for_request("query"),
        profile.schema_url(),
    );
    let mut controller = ConsoleController::new(
        panel,
        Services::from_profile(profile),
        TextRenderer::new(Vec::new(), false),
    );
    controller.mount(profile.schema_url().as_deref()).await;
    controller
}

#[tokio::test]
async fn validated_query_runs_against_selected_site() {
    let mut server = mockito::Server::new_async().await;
    let schema = server
        .mock("GET", "/api/docs/query/schema.json")
        .with_header("content-type", "application/json")
        .with_body(SCHEMA)
        .create_async()
        .await;
    let query = server
        .mock("POST", "/api/docs/query")
        .match_header("authorization", "Bearer secret")
        .match_body(Matcher::Exact(get_code("query", "b.com")))
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"{"results":[{"metrics":[3,4],"dimensions":[]}]}"#)
        .create_async()
        .await;

    let profile = logged_in_profile(&server);
    let mut console = console(&profile).await;
    schema.assert_async().await;

    let input = ":set {\"site_id\": 5, \"metrics\": []}\n:reset\n:run\n";
    console.run(input.as_bytes()).await.unwrap();

    query.assert_async().await;
    assert_eq!(console.panel().active_tab(), Tab::Response);
    assert!(!console.panel().is_dirty());

    let (_, _, out) = console.into_parts();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains(" ! /site_id: "));
    assert!(out.contains(" i Status: 200 - OK\n"));
    assert!(out.contains(r#"   1 | {"results": [{"metrics": [3, 4], "dimensions": []}]}"#));
}

#[tokio::test]
async fn unreachable_schema_leaves_validation_off() {
    let mut server = mockito::Server::new_async().await;
    let _schema = server
        .mock("GET", "/api/docs/query/schema.json")
        .with_status(404)
        .create_async()
        .await;

    let profile = logged_in_profile(&server);
    let mut console = console(&profile).await;

    console.handle_line(":set not json").await.unwrap();

    assert!(console.panel().query_editor().diagnostics().is_empty());
    assert_eq!(console.panel().code(), "not json");
}

#[tokio::test]
async fn logged_out_session_is_read_only_but_copyable() {
    let server = mockito::Server::new_async().await;
    let profile = logged_out_profile(&server);
    let mut console = console(&profile).await;

    console
        .run(&b":run\n:set {}\n:site a.com\n:copy\n"[..])
        .await
        .unwrap();

    let expected = get_code("query", "");
    assert!(expected.contains(PLACEHOLDER_SITE));
    assert_eq!(console.panel().code(), expected);
    assert_eq!(
        console.services().clipboard.last_text(),
        Some(expected.as_str())
    );

    let (_, _, out) = console.into_parts();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Cannot run: read-only"));
    assert!(out.contains("Cannot edit: read-only"));
    assert!(out.contains("Cannot select site: read-only"));
}

#[tokio::test]
async fn result_of_superseded_run_is_dropped() {
    let mut server = mockito::Server::new_async().await;
    let _schema = server
        .mock("GET", "/api/docs/query/schema.json")
        .with_status(404)
        .create_async()
        .await;
    let _query = server
        .mock("POST", "/api/docs/query")
        .with_status(200)
        .with_body(r#"{"results":[]}"#)
        .create_async()
        .await;

    let profile = logged_in_profile(&server);
    let mut console = console(&profile).await;

    console.handle_line(":run").await.unwrap();
    assert!(console.panel().is_running());
    console.handle_line(":set {}").await.unwrap();
    assert!(!console.panel().is_running());

    let (mut panel, mut services, _) = console.into_parts();
    let completion = services.query.next_completion().await.unwrap();
    assert_eq!(completion.sequence, 1);

    let events = panel.complete_run(completion.sequence, completion.result);

    assert_eq!(events, vec![PanelEvent::StaleResultDropped { sequence: 1 }]);
    assert!(panel.result().is_none());
    assert_eq!(panel.code(), "{}");
}
