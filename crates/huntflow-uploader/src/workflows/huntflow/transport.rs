use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use crate::config::ApiConfig;

/// Status code the service answers with on success.
pub const SERVICE_OK: u16 = 200;

const FILE_PARSE_HEADER: &str = "X-File-Parse";

/// Single request against the service, with a path relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    Get {
        path: String,
    },
    PostJson {
        path: String,
        body: Value,
    },
    PostFile {
        path: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
        /// Ask the service to extract résumé fields from the upload.
        parse: bool,
    },
}

impl ServiceRequest {
    pub fn path(&self) -> &str {
        match self {
            ServiceRequest::Get { path }
            | ServiceRequest::PostJson { path, .. }
            | ServiceRequest::PostFile { path, .. } => path,
        }
    }
}

/// Status code and body exactly as the service returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Value,
}

impl ServiceResponse {
    pub fn is_ok(&self) -> bool {
        self.status == SERVICE_OK
    }
}

/// Synchronous request/response capability. A returned `Err` means no response arrived.
pub trait Transport {
    fn send(&self, request: ServiceRequest) -> Result<ServiceResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: ServiceRequest) -> Result<ServiceResponse, TransportError> {
        (**self).send(request)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{header} header value is not valid")]
    InvalidHeader { header: &'static str },
    #[error("unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Blocking HTTP transport authenticating every call with the run's bearer token.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| TransportError::InvalidHeader {
                header: "Authorization",
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| TransportError::InvalidHeader {
                header: "User-Agent",
            })?;

        // No client-side deadline: a call waits for the service as long as the OS allows.
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ServiceRequest) -> Result<ServiceResponse, TransportError> {
        let url = self.url(request.path());
        let failed = |err: reqwest::Error| TransportError::Request {
            url: url.clone(),
            message: err.to_string(),
        };

        let builder = match request {
            ServiceRequest::Get { .. } => self.client.get(&url),
            ServiceRequest::PostJson { body, .. } => self.client.post(&url).json(&body),
            ServiceRequest::PostFile {
                file_name,
                content_type,
                bytes,
                parse,
                ..
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(failed)?;
                let builder = self.client.post(&url).multipart(Form::new().part("file", part));
                if parse {
                    builder.header(FILE_PARSE_HEADER, "true")
                } else {
                    builder
                }
            }
        };

        let response = builder.send().map_err(failed)?;
        let status = response.status().as_u16();
        let text = response.text().map_err(failed)?;

        Ok(ServiceResponse {
            status,
            body: decode_body(&text),
        })
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Non-JSON bodies (proxy error pages, plain text) are kept verbatim as a JSON string.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_url_normalises_slashes() {
        assert_eq!(
            join_url("https://api.example.test/", "account/1/vacancies"),
            "https://api.example.test/account/1/vacancies"
        );
        assert_eq!(
            join_url("https://api.example.test", "/accounts"),
            "https://api.example.test/accounts"
        );
    }

    #[test]
    fn decode_body_keeps_non_json_text() {
        assert_eq!(decode_body("{\"id\": 5}"), json!({ "id": 5 }));
        assert_eq!(decode_body("  "), Value::Null);
        assert_eq!(
            decode_body("<html>Bad Gateway</html>"),
            Value::String("<html>Bad Gateway</html>".to_string())
        );
    }

    #[test]
    fn transport_rejects_tokens_with_control_characters() {
        let config = ApiConfig {
            base_url: "https://api.example.test/".to_string(),
            token: "bad\ntoken".to_string(),
            user_agent: "test".to_string(),
        };
        match HttpTransport::new(&config) {
            Err(TransportError::InvalidHeader { header }) => assert_eq!(header, "Authorization"),
            Err(other) => panic!("expected invalid header, got {other:?}"),
            Ok(_) => panic!("expected invalid header"),
        }
    }

    #[test]
    fn request_path_is_shared_by_all_variants() {
        let request = ServiceRequest::PostFile {
            path: "account/1/upload".to_string(),
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
            parse: true,
        };
        assert_eq!(request.path(), "account/1/upload");
    }
}
