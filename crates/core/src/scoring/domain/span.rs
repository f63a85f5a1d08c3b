use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Matched,
    Mismatched,
}

/// Half-open `[start, end)` character range over a normalized sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn matched(start: usize, end: usize) -> Self {
        Self {
            kind: SpanKind::Matched,
            start,
            end,
        }
    }

    pub fn mismatched(start: usize, end: usize) -> Self {
        Self {
            kind: SpanKind::Mismatched,
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn is_mismatched(&self) -> bool {
        self.kind == SpanKind::Mismatched
    }
}

/// Builds a coalesced span list by feeding one classification per character.
///
/// Consecutive characters of the same kind extend the open span; a change of
/// kind closes it. The result covers `[0, pushed)` with no gaps.
#[derive(Debug, Default)]
pub(crate) struct SpanBuilder {
    spans: Vec<Span>,
    position: usize,
}

impl SpanBuilder {
    pub(crate) fn push(&mut self, kind: SpanKind) {
        let next = self.position + 1;
        match self.spans.last_mut() {
            Some(last) if last.kind == kind && last.end == self.position => last.end = next,
            _ => self.spans.push(Span {
                kind,
                start: self.position,
                end: next,
            }),
        }
        self.position = next;
    }

    pub(crate) fn finish(self) -> Vec<Span> {
        self.spans
    }
}
