//! Artifact registry — the ordered descriptor table and the scan algorithm.
//!
//! The registry is built once at process start-up, passed by reference into
//! parsing and rendering, and never mutated on the hot path. There is no
//! global registration state: callers construct an explicit value (usually
//! via [`ArtifactRegistry::builtin`]) and tests build a fresh registry per
//! case.

use std::sync::Arc;

use tagstream_core::error::RegistrationError;
use tagstream_core::{Artifact, ArtifactType, ParsedMessage};
use tracing::{debug, info};

use crate::code::CodeKind;
use crate::thinking::ThinkingKind;
use crate::tool_use::ToolUseKind;

/// Ordered, read-mostly collection of artifact-kind descriptors.
///
/// Descriptors are kept sorted by ascending priority; registration order
/// breaks priority ties (stable sort).
#[derive(Default)]
pub struct ArtifactRegistry {
    types: Vec<Arc<dyn ArtifactType>>,
}

/// Total order over opening-tag candidates: earliest start offset wins,
/// then lowest descriptor priority. Tuple comparison makes the selection
/// unambiguous and testable in isolation.
pub(crate) fn candidate_key(start: usize, priority: u32) -> (usize, u32) {
    (start, priority)
}

/// An opening-tag match selected during the scan.
struct Candidate {
    /// Byte offset of the opening tag in the buffer.
    start: usize,
    /// Byte offset just past the opening tag.
    open_end: usize,
    /// Index into `types`.
    idx: usize,
}

impl ArtifactRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// A registry pre-loaded with the built-in kinds
    /// (thinking, code, tool_use).
    pub fn builtin() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        registry.register(Arc::new(ThinkingKind))?;
        registry.register(Arc::new(CodeKind))?;
        registry.register(Arc::new(ToolUseKind))?;
        Ok(registry)
    }

    /// Register a descriptor, keeping the table ordered by ascending
    /// priority. Fails fast when the descriptor violates the required
    /// contract or duplicates an already-registered kind.
    pub fn register(&mut self, descriptor: Arc<dyn ArtifactType>) -> Result<(), RegistrationError> {
        validate(descriptor.as_ref())?;

        if self.types.iter().any(|t| t.kind() == descriptor.kind()) {
            return Err(RegistrationError::DuplicateKind(descriptor.kind().to_string()));
        }

        info!(kind = %descriptor.kind(), priority = descriptor.priority(), "Registered artifact kind");
        self.types.push(descriptor);
        self.types.sort_by_key(|t| t.priority());
        Ok(())
    }

    /// All registered descriptors, in priority order.
    pub fn descriptors(&self) -> &[Arc<dyn ArtifactType>] {
        &self.types
    }

    /// Look up a descriptor by kind (for render dispatch).
    pub fn descriptor(&self, kind: &str) -> Option<&Arc<dyn ArtifactType>> {
        self.types.iter().find(|t| t.kind() == kind)
    }

    /// All descriptors whose opening pattern matches anywhere in `buffer`.
    pub fn handlers_for(&self, buffer: &str) -> Vec<Arc<dyn ArtifactType>> {
        self.types
            .iter()
            .filter(|t| t.opening_pattern().is_match(buffer))
            .cloned()
            .collect()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Reset to empty. Test isolation only — never used on the runtime
    /// hot path.
    pub fn clear(&mut self) {
        self.types.clear();
    }

    /// Scan the full buffer and extract every artifact.
    ///
    /// Parsing never fails: unclosed tags become incomplete artifacts and
    /// tag-like text that matches no registered pattern stays plain text.
    pub fn parse(&self, buffer: &str) -> ParsedMessage {
        let mut artifacts = Vec::new();
        let mut remaining = String::new();
        let mut cursor = 0;

        while cursor < buffer.len() {
            let Some(candidate) = self.next_candidate(buffer, cursor) else {
                remaining.push_str(&buffer[cursor..]);
                break;
            };

            // Gap text between the cursor and the opening tag is aggregated,
            // in encounter order, into the single remainder string.
            remaining.push_str(&buffer[cursor..candidate.start]);

            let descriptor = &self.types[candidate.idx];
            let opening_tag = &buffer[candidate.start..candidate.open_end];
            let tag_name = descriptor.tag_name(opening_tag);
            let closing = descriptor.closing_pattern(&tag_name);

            let (content, complete, next_cursor) = match closing.find(&buffer[candidate.open_end..])
            {
                Some(m) => (
                    &buffer[candidate.open_end..candidate.open_end + m.start()],
                    true,
                    candidate.open_end + m.end(),
                ),
                // An incomplete artifact always consumes the rest of the
                // buffer, so the loop terminates here.
                None => (&buffer[candidate.open_end..], false, buffer.len()),
            };

            debug!(
                kind = %descriptor.kind(),
                tag = %tag_name,
                start = candidate.start,
                complete,
                "Extracted artifact"
            );

            artifacts.push(Artifact {
                kind: descriptor.kind().to_string(),
                tag_name,
                content: content.trim().to_string(),
                attributes: descriptor.parse_attributes(opening_tag),
                complete,
            });
            cursor = next_cursor;
        }

        ParsedMessage {
            artifacts,
            remaining_content: remaining.trim().to_string(),
        }
    }

    /// Find the next opening-tag match at or after `cursor`, selected by
    /// the `(start_offset, priority)` total order.
    fn next_candidate(&self, buffer: &str, cursor: usize) -> Option<Candidate> {
        let mut best: Option<(Candidate, (usize, u32))> = None;

        for (idx, descriptor) in self.types.iter().enumerate() {
            let Some(m) = descriptor.opening_pattern().find(&buffer[cursor..]) else {
                continue;
            };
            let start = cursor + m.start();
            let key = candidate_key(start, descriptor.priority());
            let better = match &best {
                Some((_, best_key)) => key < *best_key,
                None => true,
            };
            if better {
                best = Some((
                    Candidate {
                        start,
                        open_end: cursor + m.end(),
                        idx,
                    },
                    key,
                ));
            }
        }

        best.map(|(candidate, _)| candidate)
    }
}

/// Contract check run at registration time.
///
/// The trait guarantees the five capabilities exist; this validates what can
/// still go wrong at runtime: empty identity or degenerate patterns.
fn validate(descriptor: &dyn ArtifactType) -> Result<(), RegistrationError> {
    let fail = |reason: &str| RegistrationError::InvalidDescriptor {
        kind: descriptor.kind().to_string(),
        reason: reason.to_string(),
    };

    if descriptor.kind().is_empty() {
        return Err(fail("kind identifier is empty"));
    }
    if descriptor.opening_pattern().as_str().is_empty() {
        return Err(fail("opening pattern is empty"));
    }
    if descriptor.closing_pattern(descriptor.kind()).as_str().is_empty() {
        return Err(fail("closing pattern is empty"));
    }
    Ok(())
}
