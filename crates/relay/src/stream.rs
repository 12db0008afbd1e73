use crate::Result;
use alloy::primitives::Bytes;
use futures_util::{stream::BoxStream, StreamExt};
use oval_types::{EventKind, PendingEvent, StreamEvent};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Incremental decoder for a `text/event-stream` body.
///
/// Only `data:` fields are read. Comments, `event:` and `id:` fields are
/// skipped, and a chunk may end anywhere, including mid-line.
#[derive(Debug, Default, Clone)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    /// Feed a chunk, returning the payload of every complete `data:` line.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\r', '\n']);

            if let Some(data) = line.strip_prefix("data:") {
                let data = data.trim_start();
                if !data.is_empty() {
                    out.push(data.to_owned());
                }
            }
        }
        out
    }
}

/// A subscription to the relay's event stream, yielding events of one
/// [`EventKind`].
pub struct EventStream {
    kind: EventKind,
    body: Option<BoxStream<'static, reqwest::Result<Bytes>>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
}

impl core::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventStream")
            .field("kind", &self.kind)
            .field("open", &self.is_open())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl EventStream {
    /// Wrap a byte stream.
    pub fn new(kind: EventKind, body: BoxStream<'static, reqwest::Result<Bytes>>) -> Self {
        Self { kind, body: Some(body), decoder: SseDecoder::default(), pending: VecDeque::new() }
    }

    /// The kind of event yielded.
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// True until the stream ends or is closed.
    pub const fn is_open(&self) -> bool {
        self.body.is_some()
    }

    /// Drop the connection. Already buffered events are discarded.
    pub fn close(&mut self) {
        if self.body.take().is_some() {
            debug!(kind = %self.kind, "closed relay event stream");
        }
        self.pending.clear();
    }

    /// Wait for the next event of this stream's kind.
    ///
    /// Returns `None` once the stream has ended or been closed. Events that
    /// fail to parse are logged and skipped. Only transport failures are
    /// yielded as errors, and they end the stream.
    pub async fn next_event(&mut self) -> Option<Result<PendingEvent>> {
        loop {
            while let Some(data) = self.pending.pop_front() {
                match serde_json::from_str::<StreamEvent>(&data) {
                    Ok(event) => {
                        let event = PendingEvent::from(event);
                        if event.kind() == self.kind {
                            return Some(Ok(event));
                        }
                        trace!(hash = %event.hash(), kind = %event.kind(), "skipping event");
                    }
                    Err(err) => warn!(%err, data, "skipping undecodable relay event"),
                }
            }

            let body = self.body.as_mut()?;
            match body.next().await {
                Some(Ok(chunk)) => {
                    let decoded = self.decoder.push(&chunk);
                    self.pending.extend(decoded);
                }
                Some(Err(err)) => {
                    self.body = None;
                    return Some(Err(err.into()));
                }
                None => {
                    debug!(kind = %self.kind, "relay event stream ended");
                    self.body = None;
                    return None;
                }
            }
        }
    }
}
