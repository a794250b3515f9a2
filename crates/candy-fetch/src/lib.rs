// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use candy_app::{Dataset, parse_dataset};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/fivethirtyeight/data/master/candy-power-ranking/candy-data.csv";

/// Blocking client for the one dataset request the viewer makes.
#[derive(Debug, Clone)]
pub struct Client {
    url: Url,
    timeout: Option<Duration>,
    http: HttpClient,
}

impl Client {
    /// `timeout = None` waits for the response indefinitely.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let url = parse_dataset_url(url)?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { url, timeout, http })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn fetch_text(&self) -> Result<String> {
        debug!(url = %self.url, "requesting dataset");
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .map_err(|error| connection_error(self.url.as_str(), error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        response
            .text()
            .with_context(|| format!("read dataset body from {}", self.url))
    }

    pub fn fetch_dataset(&self) -> Result<Dataset> {
        let body = self.fetch_text()?;
        let dataset = parse_dataset(&body);
        info!(
            url = %self.url,
            bytes = body.len(),
            columns = dataset.headers.len(),
            rows = dataset.rows.len(),
            "dataset fetched"
        );
        Ok(dataset)
    }
}

pub fn parse_dataset_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("source.url must not be empty");
    }

    let url = Url::parse(trimmed).with_context(|| format!("invalid dataset URL {trimmed:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("dataset URL {trimmed:?} uses unsupported scheme {other:?}; use http or https"),
    }
}

fn connection_error(url: &str, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("timed out fetching {url} -- raise [source].timeout or remove it");
    }
    anyhow!("cannot reach {url} ({error})")
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    let body = body.trim();
    if !body.is_empty() && body.len() < 100 && !body.contains('<') {
        return anyhow!("server error ({}): {}", status.as_u16(), body);
    }

    anyhow!("server returned {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::{Client, DEFAULT_DATASET_URL, clean_error_response, parse_dataset_url};
    use reqwest::StatusCode;
    use std::time::Duration;

    #[test]
    fn default_url_is_accepted() {
        let client = Client::new(DEFAULT_DATASET_URL, None).expect("default url should parse");
        assert_eq!(client.url(), DEFAULT_DATASET_URL);
        assert_eq!(client.timeout(), None);
    }

    #[test]
    fn empty_url_is_rejected() {
        let error = Client::new("   ", None).expect_err("empty url should fail");
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let error = parse_dataset_url("file:///tmp/candy.csv").expect_err("file url should fail");
        assert!(error.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn garbage_url_is_rejected() {
        let error = parse_dataset_url("not a url").expect_err("garbage should fail");
        assert!(error.to_string().contains("invalid dataset URL"));
    }

    #[test]
    fn timeout_is_kept() {
        let client = Client::new("http://127.0.0.1:9/data.csv", Some(Duration::from_secs(3)))
            .expect("client should build");
        assert_eq!(client.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn short_plain_error_bodies_are_surfaced() {
        let error = clean_error_response(StatusCode::NOT_FOUND, "404: Not Found\n");
        assert_eq!(error.to_string(), "server error (404): 404: Not Found");
    }

    #[test]
    fn html_error_bodies_are_hidden() {
        let error = clean_error_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(error.to_string(), "server returned 502");
    }
}
