// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Downloading of the trending listing page.
///
/// The collector only ever issues one GET per attempt. The request carries a
/// browser-like header set because the listing is served as regular HTML.
use std::{future::Future, time::Duration};

use reqwest::{
    Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::Error;

/// Default location of the trending listing.
pub const DEFAULT_TRENDING_URL: &str = "https://github.com/trending";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Source of raw listing markup.
///
/// The HTTP implementation is [`HttpPageSource`]; tests substitute in-memory
/// sources.
pub trait PageSource
{
    /// Downloads the listing page and returns its body.
    fn fetch_page(&self,) -> impl Future<Output = Result<String, Error,>,>;
}

/// [`PageSource`] backed by a single GET through `reqwest`.
#[derive(Debug, Clone,)]
pub struct HttpPageSource
{
    client: Client,
    url:    String,
}

impl HttpPageSource
{
    /// Builds a client with browser-like default headers and the given
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] when the HTTP client cannot be initialised.
    pub fn new(url: impl Into<String,>, timeout: Duration,) -> Result<Self, Error,>
    {
        let client = Client::builder()
            .default_headers(browser_headers(),)
            .timeout(timeout,)
            .build()
            .map_err(|e| Error::fetch(format!("failed to initialize HTTP client: {e}"),),)?;

        Ok(Self {
            client,
            url: url.into(),
        },)
    }

    /// URL the source downloads.
    pub fn url(&self,) -> &str
    {
        &self.url
    }
}

impl PageSource for HttpPageSource
{
    async fn fetch_page(&self,) -> Result<String, Error,>
    {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url,).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!("received {} bytes from {}", body.len(), self.url);
        Ok(body,)
    }
}

fn browser_headers() -> HeaderMap
{
    let mut headers = HeaderMap::with_capacity(3,);
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT,),);
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT,),);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE,),);
    headers
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn browser_headers_mimic_a_desktop_client()
    {
        let headers = browser_headers();
        let agent = headers.get(USER_AGENT,).and_then(|value| value.to_str().ok(),);
        assert!(agent.is_some_and(|value| value.starts_with("Mozilla/5.0")));
        assert!(headers.contains_key(ACCEPT));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
    }

    #[test]
    fn http_source_keeps_configured_url()
    {
        let source = HttpPageSource::new(DEFAULT_TRENDING_URL, Duration::from_secs(1,),)
            .expect("client should build",);
        assert_eq!(source.url(), "https://github.com/trending");
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_fetch_error()
    {
        let source = HttpPageSource::new("http://127.0.0.1:9/trending", Duration::from_secs(1,),)
            .expect("client should build",);
        let error = source.fetch_page().await.expect_err("expected connection failure",);
        assert!(matches!(error, Error::Fetch { .. }));
    }
}
