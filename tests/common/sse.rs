//! Server-Sent Events reader
//!
//! Reads an SSE response body frame by frame. Frames are separated by a blank
//! line; comment lines start with `:`.

use std::time::Duration;

use axum::body::{Body, BodyDataStream};
use futures_util::StreamExt;
use tokio::time::timeout;

/// How long a read waits before giving up
pub const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// One parsed SSE frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SseFrame {
    pub event: Option<String>,
    pub data: String,
    pub comments: Vec<String>,
}

impl SseFrame {
    fn parse(raw: &str) -> Self {
        let mut frame = SseFrame::default();
        let mut data_lines = Vec::new();

        for line in raw.lines() {
            if let Some(comment) = line.strip_prefix(':') {
                frame.comments.push(comment.trim().to_string());
            } else if let Some(event) = line.strip_prefix("event:") {
                frame.event = Some(event.trim_start().to_string());
            } else if let Some(data) = line.strip_prefix("data:") {
                data_lines.push(data.strip_prefix(' ').unwrap_or(data).to_string());
            }
        }

        frame.data = data_lines.join("\n");
        frame
    }

    /// True for frames that only carry comments, e.g. keep-alives
    pub fn is_comment(&self) -> bool {
        self.event.is_none() && self.data.is_empty()
    }
}

/// Frame-by-frame reader over a streaming body
pub struct SseReader {
    stream: BodyDataStream,
    buffer: String,
}

impl SseReader {
    pub fn new(body: Body) -> Self {
        Self {
            stream: body.into_data_stream(),
            buffer: String::new(),
        }
    }

    /// Next frame, comments included
    ///
    /// Returns `None` when the stream ends, errors, or stays silent for
    /// [`READ_TIMEOUT`].
    pub async fn next_raw(&mut self) -> Option<SseFrame> {
        loop {
            if let Some(pos) = self.buffer.find("\n\n") {
                let raw: String = self.buffer.drain(..pos + 2).collect();
                return Some(SseFrame::parse(&raw));
            }

            let chunk = timeout(READ_TIMEOUT, self.stream.next()).await.ok()??.ok()?;
            self.buffer.push_str(&String::from_utf8_lossy(&chunk));
        }
    }

    /// Next frame carrying an event, skipping keep-alive comments
    pub async fn next_event(&mut self) -> Option<SseFrame> {
        loop {
            let frame = self.next_raw().await?;
            if !frame.is_comment() {
                return Some(frame);
            }
        }
    }

    /// True when the stream has finished
    ///
    /// A stream that is still open but silent reports `false`.
    pub async fn is_closed(&mut self) -> bool {
        if !self.buffer.is_empty() {
            return false;
        }
        matches!(
            timeout(READ_TIMEOUT, self.stream.next()).await,
            Ok(None) | Ok(Some(Err(_)))
        )
    }
}
