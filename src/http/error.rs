use std::time::Duration;

/// Failure of a fetch, terminal once surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  /// Connection, TLS or body-read failure
  #[error("request failed: {0}")]
  Transport(String),

  /// The attempt did not complete within its timeout
  #[error("request timed out after {}ms", .0.as_millis())]
  Timeout(Duration),

  /// Non-2xx response
  #[error("HTTP {status}: {reason}")]
  Status { status: u16, reason: String },

  /// 2xx response whose payload reports a failure
  #[error("{0}")]
  Application(String),

  /// 2xx response that is not the expected JSON shape
  #[error("failed to decode response: {0}")]
  Decode(String),

  /// Every record was filtered out during normalization
  #[error("no valid {0} found in response")]
  NoValidRecords(&'static str),
}

impl FetchError {
  /// HTTP status code, when the failure came from one.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

impl From<reqwest::Error> for FetchError {
  fn from(e: reqwest::Error) -> Self {
    if let Some(status) = e.status() {
      return Self::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
      };
    }
    Self::Transport(e.to_string())
  }
}
