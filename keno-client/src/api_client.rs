use anyhow::{bail, Context, Result};
use domain::event_stream::FrameDecoder;
use domain::{ArchiveEvent, DrawRecord};
use futures_util::stream::StreamExt;
use log::*;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Which server endpoint to read the archive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/parse-keno`: the whole run arrives in one body once it finished.
    Buffered,
    /// `/parse-keno/stream`: events arrive as the run produces them.
    Streaming,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Buffered => "/parse-keno",
            Endpoint::Streaming => "/parse-keno/stream",
        }
    }
}

/// Everything collected from one archive run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ArchiveDownload {
    pub draws: Vec<DrawRecord>,
    pub last_progress: u8,
    /// Total reported by the completion event, if it arrived.
    pub reported_total: Option<usize>,
}

impl ArchiveDownload {
    pub fn apply(&mut self, event: ArchiveEvent) {
        match event {
            ArchiveEvent::Progress(progress) => {
                self.last_progress = progress.progress;
                self.draws.push(progress.result);
            }
            ArchiveEvent::Complete(complete) => {
                self.reported_total = Some(complete.total);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.reported_total.is_some()
    }
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }

    /// Starts a run and reads its events as the body arrives, calling
    /// `on_event` for each one before it is folded into the download.
    pub async fn fetch_archive<F>(&self, endpoint: Endpoint, mut on_event: F) -> Result<ArchiveDownload>
    where
        F: FnMut(&ArchiveEvent),
    {
        let url = self.url_for(endpoint);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Parse request failed with status {status}: {body}");
        }

        let mut body = response.bytes_stream();
        let mut decoder = FrameDecoder::new();
        let mut download = ArchiveDownload::default();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.context("Failed to read response body")?;
            trace!("Received {} bytes", chunk.len());

            for event in decoder.push(&chunk)? {
                on_event(&event);
                download.apply(event);
            }
        }

        if let Some(event) = decoder.finish()? {
            on_event(&event);
            download.apply(event);
        }

        Ok(download)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ArchiveParser, CompletionEvent};
    use std::time::Duration;

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let api = ApiClient::new(Client::new(), "http://localhost:4000/".to_string());
        assert_eq!(api.url_for(Endpoint::Buffered), "http://localhost:4000/parse-keno");
        assert_eq!(
            api.url_for(Endpoint::Streaming),
            "http://localhost:4000/parse-keno/stream"
        );
    }

    #[test]
    fn test_download_collects_a_full_run() {
        let mut download = ArchiveDownload::default();
        for event in ArchiveParser::new(Duration::ZERO).events() {
            download.apply(event);
        }

        assert_eq!(download.draws.len(), 100);
        assert_eq!(download.last_progress, 100);
        assert_eq!(download.reported_total, Some(100));
        assert!(download.is_complete());
    }

    #[test]
    fn test_only_completion_event_marks_download_complete() {
        assert!(!ArchiveDownload::default().is_complete());

        let mut download = ArchiveDownload::default();
        download.apply(ArchiveEvent::Complete(CompletionEvent::new(0)));
        assert!(download.is_complete());
        assert!(download.draws.is_empty());
    }
}
