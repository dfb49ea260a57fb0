//! Outbound call observability
//!
//! Every call the client makes to the engine, together with its response, is
//! reported to an injected [`CallObserver`]. This is a side effect visible to
//! test doubles; it is not part of the functional contract. The default
//! observer reports through `tracing`.

/// A single outbound engine call and its outcome.
#[derive(Debug)]
pub struct CallEvent<'a> {
    /// HTTP method
    pub method: &'a str,

    /// Full request URL
    pub url: &'a str,

    /// Serialized request body, when one was sent
    pub request_body: Option<&'a str>,

    /// HTTP status, absent when the call failed at the transport level
    pub status: Option<u16>,

    /// Response body, absent when the call failed at the transport level
    pub response_body: Option<&'a str>,
}

/// Observer notified of every outbound call and its response
pub trait CallObserver: Send + Sync {
    fn on_call(&self, event: &CallEvent<'_>);
}

/// Default observer reporting calls through `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn on_call(&self, event: &CallEvent<'_>) {
        match event.status {
            Some(status) => {
                tracing::info!(
                    method = event.method,
                    url = event.url,
                    status = status,
                    "engine call completed"
                );
            }
            None => {
                tracing::error!(
                    method = event.method,
                    url = event.url,
                    "engine call failed at transport level"
                );
            }
        }

        if let Some(body) = event.request_body {
            tracing::debug!(body, "engine request body");
        }
        if let Some(body) = event.response_body {
            tracing::debug!(body, "engine response body");
        }
    }
}
