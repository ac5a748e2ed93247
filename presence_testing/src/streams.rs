//! Streams with scripted behaviour for framing tests.

use std::{
    collections::VecDeque,
    io::{self, Read},
};

use tokio::io::{AsyncWriteExt, DuplexStream, duplex};

/// One scripted outcome of a [`ScriptedReader`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Deliver these bytes, at most one per `read` call.
    Bytes(Vec<u8>),
    /// Fail a single `read` with [`io::ErrorKind::Interrupted`].
    Interrupted,
    /// Fail a single `read` with the given error kind.
    Fail(io::ErrorKind),
}

/// Blocking reader that replays [`Step`]s, then reports end-of-stream.
///
/// Bytes trickle out one per call so every read primitive sees the worst
/// case of a socket delivering single bytes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedReader {
    steps: VecDeque<Step>,
    delivered: usize,
}

impl ScriptedReader {
    /// Create a reader that is immediately at end-of-stream.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Append bytes to deliver.
    #[must_use]
    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.steps.push_back(Step::Bytes(bytes.into()));
        self
    }

    /// Append a single interrupted read.
    #[must_use]
    pub fn interrupted(mut self) -> Self {
        self.steps.push_back(Step::Interrupted);
        self
    }

    /// Append a read failing with `kind`.
    #[must_use]
    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fail(kind));
        self
    }

    /// Number of bytes handed out so far.
    #[must_use]
    pub fn delivered(&self) -> usize { self.delivered }
}

impl Read for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let Some(step) = self.steps.front_mut() else {
                return Ok(0);
            };
            match step {
                Step::Bytes(bytes) if bytes.is_empty() => {
                    self.steps.pop_front();
                }
                Step::Bytes(bytes) => {
                    let Some(slot) = buf.first_mut() else {
                        return Ok(0);
                    };
                    *slot = bytes.remove(0);
                    self.delivered += 1;
                    return Ok(1);
                }
                Step::Interrupted => {
                    self.steps.pop_front();
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                Step::Fail(kind) => {
                    let kind = *kind;
                    self.steps.pop_front();
                    return Err(io::Error::new(kind, "scripted failure"));
                }
            }
        }
    }
}

/// Return the read half of a duplex pipe holding `bytes` whose writer has
/// already closed.
///
/// # Panics
///
/// Panics if `bytes` cannot be written into the pipe buffer.
pub async fn closed_duplex(bytes: &[u8]) -> DuplexStream {
    let (mut writer, reader) = duplex(bytes.len().max(1));
    writer
        .write_all(bytes)
        .await
        .expect("duplex buffer sized for payload");
    drop(writer);
    reader
}
