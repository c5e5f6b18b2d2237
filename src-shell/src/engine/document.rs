//! Document engine
//!
//! Fetches pages over HTTP and parses them, without running scripts. The
//! inspection probes are recognized and answered from the parsed document
//! and the shared cookie jar; any other expression is reported as
//! unsupported.

use parking_lot::Mutex;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::redirect::Policy;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use lipton_core::probe;
use lipton_core::{
    EngineEvent, EngineFactory, EngineView, EventSink, RequestId, ScriptError, ScriptOutcome,
};

use crate::error::Result;

const USER_AGENT: &str = "Mozilla/5.0 (LiptonWeb)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(12);
const MAX_REDIRECTS: usize = 5;

/// Creates [`DocumentView`]s sharing one HTTP client and cookie jar
pub struct DocumentEngine {
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl DocumentEngine {
    pub fn new() -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, jar })
    }
}

impl EngineFactory for DocumentEngine {
    fn create_view(&self, sink: EventSink) -> Box<dyn EngineView> {
        tracing::debug!(session = %sink.session().short(), "Creating document view");
        Box::new(DocumentView::new(self.client.clone(), self.jar.clone(), sink))
    }
}

/// Last document fetched by a view
#[derive(Debug, Default)]
struct Page {
    url: Option<Url>,
    body: Option<String>,
}

pub struct DocumentView {
    client: reqwest::Client,
    jar: Arc<Jar>,
    sink: EventSink,
    page: Arc<Mutex<Page>>,
    /// Bumped by every navigation and on drop; a fetch only reports back
    /// while its generation is current
    generation: Arc<AtomicU64>,
    history: Vec<String>,
    cursor: usize,
}

impl DocumentView {
    fn new(client: reqwest::Client, jar: Arc<Jar>, sink: EventSink) -> Self {
        Self {
            client,
            jar,
            sink,
            page: Arc::new(Mutex::new(Page::default())),
            generation: Arc::new(AtomicU64::new(0)),
            history: Vec::new(),
            cursor: 0,
        }
    }

    fn fetch(&self, url: String) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Until the new document arrives there is nothing to inspect
        self.page.lock().body = None;

        self.sink.emit(EngineEvent::LoadStarted);
        self.sink.emit(EngineEvent::UrlChanged(url.clone()));

        let client = self.client.clone();
        let sink = self.sink.clone();
        let page = self.page.clone();
        let current = self.generation.clone();

        tokio::spawn(async move {
            let result = fetch_document(&client, &url).await;

            if current.load(Ordering::SeqCst) != generation {
                tracing::trace!(url = %url, "Discarding superseded load");
                return;
            }

            match result {
                Ok((final_url, body)) => {
                    let title = page_title(&body).unwrap_or_else(|| final_url.to_string());

                    {
                        let mut page = page.lock();
                        page.url = Some(final_url.clone());
                        page.body = Some(body);
                    }

                    if final_url.as_str() != url {
                        sink.emit(EngineEvent::UrlChanged(final_url.to_string()));
                    }
                    sink.emit(EngineEvent::TitleChanged(title));
                    sink.emit(EngineEvent::LoadFinished(true));
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to fetch page");

                    {
                        let mut page = page.lock();
                        page.url = Url::parse(&url).ok();
                        page.body = None;
                    }

                    sink.emit(EngineEvent::LoadFinished(false));
                }
            }
        });
    }

    fn answer(&self, script: &str) -> ScriptOutcome {
        let page = self.page.lock();

        match script {
            probe::ELEMENTS => {
                let summary = page.body.as_deref().map(element_summary).unwrap_or_default();
                Ok(Some(Value::String(summary)))
            }
            probe::COOKIES => {
                let header = page.url.as_ref().and_then(|url| self.jar.cookies(url));
                let cookies = header
                    .as_ref()
                    .and_then(|h| h.to_str().ok())
                    .map(cookie_text)
                    .unwrap_or_default();
                Ok(Some(Value::String(cookies)))
            }
            // Nothing here can write storage
            probe::LOCAL_STORAGE => Ok(Some(Value::String("{}".to_string()))),
            _ => Err(ScriptError::Unsupported(
                "the document engine does not run scripts".to_string(),
            )),
        }
    }
}

impl EngineView for DocumentView {
    fn load(&mut self, url: &str) {
        // A new navigation drops the forward entries
        self.history.truncate(self.cursor + 1);
        self.history.push(url.to_string());
        self.cursor = self.history.len() - 1;
        self.fetch(url.to_string());
    }

    fn back(&mut self) {
        if self.cursor == 0 || self.history.is_empty() {
            return;
        }
        self.cursor -= 1;
        self.fetch(self.history[self.cursor].clone());
    }

    fn forward(&mut self) {
        if self.cursor + 1 >= self.history.len() {
            return;
        }
        self.cursor += 1;
        self.fetch(self.history[self.cursor].clone());
    }

    fn reload(&mut self) {
        if let Some(url) = self.history.get(self.cursor).cloned() {
            self.fetch(url);
        }
    }

    fn evaluate(&self, script: &str, request: RequestId) {
        let outcome = self.answer(script);
        self.sink.script_result(request, outcome);
    }
}

impl Drop for DocumentView {
    fn drop(&mut self) {
        // Silences any fetch still in flight
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

async fn fetch_document(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<(Url, String), reqwest::Error> {
    let resp = client.get(url).send().await?.error_for_status()?;
    let final_url = resp.url().clone();
    let body = resp.text().await?;
    Ok((final_url, body))
}

fn page_title(body: &str) -> Option<String> {
    let doc = Html::parse_document(body);

    if let Ok(sel) = Selector::parse("title") {
        for el in doc.select(&sel) {
            let text = el.text().collect::<Vec<_>>().join(" ");
            let cleaned = normalize_whitespace(&text);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }

    let og_title = Selector::parse("meta[property='og:title']").ok()?;
    doc.select(&og_title)
        .filter_map(|el| el.value().attr("content"))
        .map(normalize_whitespace)
        .find(|t| !t.is_empty())
}

/// `tag#id.class` per element in document order
fn element_summary(body: &str) -> String {
    let doc = Html::parse_document(body);
    let Ok(all) = Selector::parse("*") else {
        return String::new();
    };

    doc.select(&all)
        .take(probe::ELEMENTS_SCANNED)
        .map(describe_element)
        .take(probe::ELEMENTS_SHOWN)
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_element(el: ElementRef<'_>) -> String {
    let value = el.value();
    let mut line = value.name().to_lowercase();

    if let Some(id) = value.id().filter(|id| !id.is_empty()) {
        line.push('#');
        line.push_str(id);
    }

    let classes: Vec<&str> = value.classes().collect();
    if !classes.is_empty() {
        line.push('.');
        line.push_str(&classes.join("."));
    }

    line
}

/// Cookie header value to one cookie per line
fn cookie_text(header: &str) -> String {
    header
        .split(';')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipton_core::{SessionEvent, SessionId};
    use serde_json::json;
    use tokio::sync::mpsc;

    fn view() -> (DocumentView, mpsc::UnboundedReceiver<SessionEvent>) {
        let engine = DocumentEngine::new().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let view = DocumentView::new(
            engine.client.clone(),
            engine.jar.clone(),
            EventSink::new(SessionId::new(), tx),
        );
        (view, rx)
    }

    fn outcome(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> (RequestId, ScriptOutcome) {
        match rx.try_recv().unwrap().event {
            EngineEvent::ScriptResult { request, outcome } => (request, outcome),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_element_summary() {
        let body = r#"<html><head><title>T</title></head>
            <body><div id="main" class="wide">x</div><p id="">y</p></body></html>"#;

        assert_eq!(
            element_summary(body),
            "html\nhead\ntitle\nbody\ndiv#main.wide\np"
        );
    }

    #[test]
    fn test_element_summary_is_capped() {
        let body = format!("<html><body>{}</body></html>", "<p></p>".repeat(80));
        let summary = element_summary(&body);

        assert_eq!(summary.lines().count(), probe::ELEMENTS_SHOWN);
        assert!(summary.starts_with("html\nhead\nbody\np"));
    }

    #[test]
    fn test_page_title() {
        assert_eq!(
            page_title("<title>\n  Example\n  Domain </title>"),
            Some("Example Domain".to_string())
        );
        assert_eq!(
            page_title(r#"<meta property="og:title" content="From OG">"#),
            Some("From OG".to_string())
        );
        assert_eq!(page_title("<p>no title</p>"), None);
    }

    #[test]
    fn test_cookie_text() {
        assert_eq!(cookie_text("sid=1; lang=en"), "sid=1\nlang=en");
        assert_eq!(cookie_text(""), "");
    }

    #[test]
    fn test_probes_answered_from_page() {
        let (view, mut rx) = view();
        let url = Url::parse("https://example.com/").unwrap();
        view.jar.add_cookie_str("sid=1", &url);
        {
            let mut page = view.page.lock();
            page.url = Some(url);
            page.body = Some("<html><body class=\"home\"></body></html>".to_string());
        }

        view.evaluate(probe::ELEMENTS, RequestId(1));
        assert_eq!(
            outcome(&mut rx),
            (RequestId(1), Ok(Some(json!("html\nhead\nbody.home"))))
        );

        view.evaluate(probe::COOKIES, RequestId(2));
        assert_eq!(outcome(&mut rx), (RequestId(2), Ok(Some(json!("sid=1")))));

        view.evaluate(probe::LOCAL_STORAGE, RequestId(3));
        assert_eq!(outcome(&mut rx), (RequestId(3), Ok(Some(json!("{}")))));
    }

    #[test]
    fn test_probes_before_any_load() {
        let (view, mut rx) = view();

        view.evaluate(probe::ELEMENTS, RequestId(1));
        assert_eq!(outcome(&mut rx).1, Ok(Some(json!(""))));

        view.evaluate(probe::COOKIES, RequestId(2));
        assert_eq!(outcome(&mut rx).1, Ok(Some(json!(""))));
    }

    #[test]
    fn test_arbitrary_script_is_unsupported() {
        let (view, mut rx) = view();

        view.evaluate("1 + 1", RequestId(7));
        let (request, result) = outcome(&mut rx);

        assert_eq!(request, RequestId(7));
        assert!(matches!(result, Err(ScriptError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_inspection_sees_no_stale_document_while_loading() {
        let (mut view, mut rx) = view();
        view.page.lock().body = Some("<html><body id=\"old\"></body></html>".to_string());

        // The fetch task cannot run before this test yields
        view.load("https://example.invalid/");
        assert_eq!(rx.try_recv().unwrap().event, EngineEvent::LoadStarted);
        assert_eq!(
            rx.try_recv().unwrap().event,
            EngineEvent::UrlChanged("https://example.invalid/".to_string())
        );

        view.evaluate(probe::ELEMENTS, RequestId(1));
        assert_eq!(outcome(&mut rx), (RequestId(1), Ok(Some(json!("")))));
    }

    #[test]
    fn test_history_bounds_without_loads() {
        let (mut view, mut rx) = view();

        view.back();
        view.forward();
        view.reload();

        assert!(rx.try_recv().is_err());
        assert_eq!(view.generation.load(Ordering::SeqCst), 0);
    }
}
