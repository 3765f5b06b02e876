use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wikihop::crawler::{self, Crawler, CrawlerConfig, ScopeFilter, SearchResult};
use wikihop::report::Report;

fn article_body(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|name| format!(r#"<li><a href="/wiki/{}" title="{}">{}</a></li>"#, name, name, name))
        .collect();
    format!(
        r#"<div id="mw-navigation"><a href="/wiki/Main_Page">Main</a></div>
<div id="bodyContent"><ul>{}</ul>
<a href="/wiki/Category:Animals">cat</a>
<a href="/wiki/Special:Random">random</a>
<a href="/w/index.php?title=X">edit</a>
</div>
<div id="footer"><a href="/wiki/Privacy_policy">privacy</a></div>"#,
        anchors
    )
}

/// A page may be fetched at most once; the search can stop before reaching it
async fn serve(server: &MockServer, name: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_body(links)))
        .expect(0..=1)
        .mount(server)
        .await;
}

fn crawler() -> Crawler {
    let scope = ScopeFilter::new(["/wiki/"], crawler::extract::WIKIPEDIA_EXCLUDE.iter().copied());
    Crawler::new(Arc::new(
        CrawlerConfig::new().with_scope(scope).with_batch_size(2).with_request_timeout(2),
    ))
}

#[tokio::test]
async fn test_random_start_to_target() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Special:Random"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/wiki/Matter"))
        .mount(&server)
        .await;
    // once through the redirect, once by the search
    Mock::given(method("GET"))
        .and(path("/wiki/Matter"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_body(&["Physics", "Mass", "Energy"])))
        .expect(2)
        .mount(&server)
        .await;
    serve(&server, "Physics", &["Energy", "Chemistry_lab"]).await;
    serve(&server, "Mass", &[]).await;
    serve(&server, "Energy", &["Chemistry"]).await;
    serve(&server, "Chemistry_lab", &[]).await;

    let crawler = crawler();
    let random = Url::parse(&format!("{}/wiki/Special:Random", server.uri()))?;
    let start = crawler.fetcher().resolve_random_page(&random).await?;
    let target = Url::parse(&format!("{}/wiki/Chemistry", server.uri()))?;

    let outcome = crawler::search(&crawler, start.clone(), target.clone()).await?;

    let path = outcome.path().expect("Chemistry is reachable from Matter");
    assert_eq!(path.hops(), 2);
    assert_eq!(path.titles(), vec!["Matter", "Energy", "Chemistry"]);

    let mut report = Report::new();
    report.record(start, target, outcome);
    assert_eq!(report.average_hops(), Some(2.0));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_target() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    serve(&server, "Island", &["Beach", "Harbor"]).await;
    serve(&server, "Beach", &["Harbor"]).await;
    serve(&server, "Harbor", &["Island"]).await;

    let start = Url::parse(&format!("{}/wiki/Island", server.uri()))?;
    let target = Url::parse(&format!("{}/wiki/Mainland", server.uri()))?;
    let outcome = crawler::search(&crawler(), start, target).await?;

    assert_eq!(outcome.result, SearchResult::Exhausted);
    assert_eq!(outcome.expanded, 3);
    assert_eq!(outcome.discovered, 3);
    Ok(())
}
