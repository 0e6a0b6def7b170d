//! Minimal Slack Web API client.
//!
//! Covers the one method this tool needs: `chat.postMessage`, with an
//! optional `thread_ts` for threaded replies. The Web API wraps every
//! response in an envelope with an `ok` flag; failures carry a short error
//! code in `error`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::ReplySource;
use crate::error::{Error, Result};

const SLACK_API_BASE: &str = "https://slack.com/api";

pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct PostMessageBody<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
}

#[derive(Deserialize)]
struct PostMessageEnvelope {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Outcome of a successful post: the platform-assigned message timestamp.
#[derive(Debug, Clone)]
pub struct PostResult {
    pub ts: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, SLACK_API_BASE)
    }

    /// Builds a client against a non-default API base. Tests point this at
    /// a local mock server.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    /// Posts a message, optionally threaded under `thread_ts`.
    ///
    /// Returns the new message's `ts`.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<PostResult> {
        let url = format!("{}/chat.postMessage", self.base_url);
        let body = PostMessageBody {
            channel,
            text,
            thread_ts,
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| api_error(channel, format!("request failed: {e}")))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| api_error(channel, format!("failed to read response: {e}")))?;

        tracing::debug!(%status, body = %raw, "chat.postMessage response");

        if !status.is_success() {
            return Err(api_error(channel, format!("HTTP {status}: {raw}")));
        }

        let envelope: PostMessageEnvelope = serde_json::from_str(&raw)
            .map_err(|e| api_error(channel, format!("failed to parse response: {e}")))?;

        if !envelope.ok {
            let code = envelope.error.unwrap_or_else(|| "unknown_error".into());
            return Err(api_error(channel, code));
        }

        match envelope.ts {
            Some(ts) => Ok(PostResult { ts }),
            None => Err(api_error(channel, "response missing ts".into())),
        }
    }
}

fn api_error(channel: &str, detail: String) -> Error {
    Error::Api {
        channel: channel.to_string(),
        detail,
    }
}

/// Posts the root message, then each reply threaded under it.
///
/// Reply content is resolved per reply, immediately before its post call,
/// so a failing file read or API call halts the remaining sequence while
/// leaving everything already posted in place. Returns the number of
/// replies posted.
pub async fn post_with_replies(
    client: &SlackClient,
    channel: &str,
    text: &str,
    replies: &[ReplySource],
) -> Result<usize> {
    let root = client.post_message(channel, text, None).await?;
    tracing::info!(
        channel,
        content = text,
        ts = %root.ts,
        "main message posted successfully"
    );

    let mut posted = 0;
    for reply in replies {
        let reply_text = reply.resolve()?;
        let result = client
            .post_message(channel, &reply_text, Some(&root.ts))
            .await?;
        tracing::info!(
            channel,
            content = %reply_text,
            thread_ts = %root.ts,
            ts = %result.ts,
            "thread reply posted successfully"
        );
        posted += 1;
    }

    Ok(posted)
}
