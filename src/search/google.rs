// src/search/google.rs
use crate::error::Result;
use crate::search::SearchClient;
use crate::session::Session;
use crate::types::{Credentials, DorkerError, SearchItem, SearchPage};
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Option<Vec<CseItem>>,
    #[serde(default)]
    queries: Option<CseQueries>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct CseQueries {
    #[serde(rename = "nextPage", default)]
    next_page: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct CseErrorResponse {
    error: CseError,
}

#[derive(Debug, Deserialize)]
struct CseError {
    message: String,
}

/// Google Custom Search JSON API client.
#[derive(Clone)]
pub struct GoogleSearchClient {
    name: String,
    session: Session,
    credentials: Credentials,
    base_url: String,
}

impl GoogleSearchClient {
    pub fn new(session: Session, credentials: Credentials) -> Self {
        Self {
            name: "google".to_string(),
            session,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/customsearch/v1", self.base_url)
    }
}

#[async_trait]
impl SearchClient for GoogleSearchClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, start: u32, num: u32) -> Result<SearchPage> {
        let start = start.to_string();
        let num = num.to_string();

        let response = self
            .session
            .client
            .get(self.endpoint())
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("cx", self.credentials.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("start", start.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<CseErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(DorkerError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: CseResponse = serde_json::from_str(&body)
            .map_err(|e| DorkerError::ParseError(format!("Failed to parse response: {}", e)))?;

        let has_more = data
            .queries
            .and_then(|q| q.next_page)
            .map_or(false, |pages| !pages.is_empty());

        let items = data
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| SearchItem {
                title: item.title,
                url: item.link,
                snippet: item.snippet,
            })
            .collect();

        Ok(SearchPage { items, has_more })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Config;
    use mockito::{Matcher, Server};

    fn client(base_url: String) -> GoogleSearchClient {
        let session = Session::new(&Config::default()).unwrap();
        let credentials = Credentials {
            api_key: "test-key".to_string(),
            engine_id: "test-cx".to_string(),
        };
        GoogleSearchClient::new(session, credentials).with_base_url(base_url)
    }

    #[tokio::test]
    async fn test_parses_items_and_next_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("cx".into(), "test-cx".into()),
                Matcher::UrlEncoded("q".into(), "site:example.com".into()),
                Matcher::UrlEncoded("num".into(), "10".into()),
                Matcher::UrlEncoded("start".into(), "11".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "items": [
                    {"title": "Home", "link": "https://www.example.com/", "snippet": "Welcome"},
                    {"title": "Docs", "link": "https://docs.example.com/start"}
                ],
                "queries": {"nextPage": [{"startIndex": 21}]}
            }"#,
            )
            .create_async()
            .await;

        let page = client(server.url())
            .search("site:example.com", 11, 10)
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].url, "https://www.example.com/");
        assert_eq!(page.items[1].snippet, "");
        assert!(page.has_more);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_items_is_empty_page() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"searchInformation": {"totalResults": "0"}}"#)
            .create_async()
            .await;

        let page = client(server.url()).search("site:none.test", 1, 10).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error": {"code": 429, "message": "Quota exceeded"}}"#)
            .create_async()
            .await;

        let err = client(server.url()).search("q", 1, 10).await.unwrap_err();
        match err {
            DorkerError::ApiError { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/customsearch/v1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client(server.url()).search("q", 1, 10).await.unwrap_err();
        assert!(matches!(err, DorkerError::ParseError(_)));
    }
}
