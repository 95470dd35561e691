use thiserror::Error;

/// Failure modes of a completion call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or reachability failure before a usable response arrived
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server-provided error message when
    /// the body carried one, so Display can surface it verbatim to the user.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// 2xx response with an empty choices array
    #[error("response contained no choices")]
    NoChoices,

    /// The client does not implement the streaming variant
    #[error("streaming is not supported by this client")]
    StreamingUnsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_server_message() {
        let err = ApiError::Http {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "rate limited");
    }
}
