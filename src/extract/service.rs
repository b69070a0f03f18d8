// src/extract/service.rs
use reqwest::blocking::{multipart, Client};
use serde_json::json;
use std::{path::PathBuf, time::Duration};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.pspdfkit.com/build";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status; `body` is its message.
    #[error("{body}")]
    Rejected { status: u16, body: String },
}

/// Turns one PDF into spreadsheet bytes.
pub trait Converter {
    fn convert(&self, file_name: &str, pdf: Vec<u8>) -> Result<Vec<u8>, ExtractError>;
}

/// Build instructions asking for the whole uploaded `file` part as xlsx.
pub fn instructions() -> serde_json::Value {
    json!({
        "parts": [{ "file": "file" }],
        "output": { "type": "xlsx" }
    })
}

/// Remote conversion over the document build API.
pub struct HttpConverter {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpConverter {
    pub fn new(endpoint: Url, api_key: String, timeout: Duration) -> Result<Self, ExtractError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

impl Converter for HttpConverter {
    #[instrument(level = "debug", skip(self, pdf), fields(bytes = pdf.len()))]
    fn convert(&self, file_name: &str, pdf: Vec<u8>) -> Result<Vec<u8>, ExtractError> {
        let file = multipart::Part::bytes(pdf)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new()
            .part("file", file)
            .text("instructions", instructions().to_string());

        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()?;

        let status = resp.status();
        debug!(%status, "conversion response");
        if !status.is_success() {
            let body = resp
                .text()
                .unwrap_or_else(|e| format!("{} (response body unreadable: {})", status, e));
            return Err(ExtractError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.bytes()?.to_vec())
    }
}
