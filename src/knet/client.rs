//! Blocking HTTP client for the KNet service
//!
//! Both panels talk to KNet through this client: the settings panel pulls the
//! pipeline listing once at construction, the feedback panel forwards a
//! summary of each submitted report. Calls run inline in the frame update, so
//! the agent carries a short timeout.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{debug, error};

use super::{PipelineCatalog, PipelineListing};

/// Timeout applied to every KNet request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the KNet pipeline-listing and feedback endpoints
#[derive(Clone)]
pub struct KnetClient {
    agent: ureq::Agent,
    base_url: String,
}

impl KnetClient {
    /// Create a client for the given base URL (no trailing slash)
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Retrieve the pipeline listing from KNet.
    ///
    /// Never fails: any error (connection, timeout, non-200 status, malformed
    /// body) is logged and an empty catalog is returned, so the settings
    /// panel can still be constructed.
    pub fn fetch_pipelines(&self) -> PipelineCatalog {
        match self.request_pipelines() {
            Ok(listing) => PipelineCatalog::from_listing(listing),
            Err(e) => {
                error!("Failed to retrieve KNet pipelines: {:#}", e);
                PipelineCatalog::default()
            }
        }
    }

    fn request_pipelines(&self) -> Result<PipelineListing> {
        let url = format!("{}/query_type", self.base_url);

        let response = self
            .agent
            .get(&url)
            .call()
            .with_context(|| format!("Failed to fetch pipeline listing from {}", url))?;

        // The service only ever answers 200 here; anything else is a fault.
        if response.status() != 200 {
            bail!("{}: {}", response.status(), response.status_text());
        }

        let body = response
            .into_string()
            .context("Failed to read pipeline listing response")?;

        serde_json::from_str(&body).context("Failed to parse pipeline listing")
    }

    /// Forward a feedback summary for a conversation to KNet.
    ///
    /// `feedback` is the JSON-encoded issue summary; the body is form-encoded
    /// as the service expects. Any 2xx answer counts as success.
    pub fn send_feedback(&self, feedback: &str, conv_id: &str) -> Result<()> {
        let url = format!("{}/feedback", self.base_url);

        let response = self
            .agent
            .post(&url)
            .send_form(&[("feedback", feedback), ("conv_id", conv_id)])
            .with_context(|| format!("Failed to submit feedback to {}", url))?;

        debug!("KNet feedback accepted with status {}", response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knet::AUTO_PIPELINE_DESCRIPTION;
    use std::io::Read;
    use std::thread;

    /// Serve exactly one request with a canned response, capturing what the
    /// client sent.
    fn serve_once(
        status: u16,
        body: &str,
    ) -> (String, thread::JoinHandle<(String, String)>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let base = format!("http://127.0.0.1:{}", port);
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let mut request = server.recv().unwrap();
            let url = request.url().to_string();
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            request.respond(response).unwrap();
            (url, received)
        });

        (base, handle)
    }

    /// A base URL nothing is listening on
    fn dead_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }

    #[test]
    fn fetch_pipelines_appends_automatic_entry() {
        let (base, handle) = serve_once(
            200,
            r#"{"pipelines":[{"name":"vector","description":"Vector search"}]}"#,
        );

        let catalog = KnetClient::new(&base).fetch_pipelines();
        let (url, _) = handle.join().unwrap();

        assert_eq!(url, "/query_type");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.description_for(Some("vector")), "Vector search");
        assert_eq!(catalog.description_for(None), AUTO_PIPELINE_DESCRIPTION);
    }

    #[test]
    fn fetch_pipelines_non_200_yields_empty_catalog() {
        let (base, handle) = serve_once(500, "internal error");

        let catalog = KnetClient::new(&base).fetch_pipelines();
        handle.join().unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn fetch_pipelines_malformed_body_yields_empty_catalog() {
        let (base, handle) = serve_once(200, "not json at all");

        let catalog = KnetClient::new(&base).fetch_pipelines();
        handle.join().unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn fetch_pipelines_connection_error_yields_empty_catalog() {
        let catalog = KnetClient::new(&dead_endpoint()).fetch_pipelines();
        assert!(catalog.is_empty());
    }

    #[test]
    fn send_feedback_posts_form_encoded_fields() {
        let (base, handle) = serve_once(200, "ok");

        let result = KnetClient::new(&base)
            .send_feedback(r#"{"correctness":"incorrect"}"#, "conv-1");
        let (url, received) = handle.join().unwrap();

        assert!(result.is_ok());
        assert_eq!(url, "/feedback");
        assert!(received.contains("feedback="));
        assert!(received.contains("conv_id=conv-1"));
    }

    #[test]
    fn send_feedback_non_2xx_is_an_error() {
        let (base, handle) = serve_once(502, "bad gateway");

        let result = KnetClient::new(&base).send_feedback("{}", "conv-1");
        handle.join().unwrap();

        assert!(result.is_err());
    }
}
