use serde::Deserialize;

/// One decoded object from the generation stream. Unknown fields are
/// ignored; `response` may be absent on bookkeeping objects such as the
/// final `done` marker.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
}

/// Extract the reply fragment from one stream line.
///
/// Lines that are not valid JSON, or valid objects without a
/// `response` field, are skipped; they never abort the stream.
pub(crate) fn response_fragment(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<GenerateChunk>(line) {
        Ok(chunk) => {
            if chunk.done {
                tracing::trace!("generation stream marked done");
            }
            chunk.response
        }
        Err(e) => {
            tracing::debug!("skipping malformed stream line: {}", e);
            None
        }
    }
}

/// Reassembles newline-delimited lines from byte chunks that may split
/// anywhere, including inside a UTF-8 sequence. Parsing happens as
/// bytes arrive; nothing waits for end-of-stream.
pub(crate) struct LineAssembler {
    pending: Vec<u8>,
}

impl LineAssembler {
    pub(crate) fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Absorb one byte chunk and return every line it completes.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let rest = self.pending.split_off(pos + 1);
            let mut line = std::mem::replace(&mut self.pending, rest);
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// The trailing line, if the stream ended without a final newline.
    pub(crate) fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}
