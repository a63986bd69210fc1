//! File Documenter
//!
//! Produces documentation for one file. Small files get a single generation
//! call over the whole content; large files are split into line-bounded
//! chunks, each documented independently, then consolidated in one
//! tree-reduction call that sees every chunk document at once. Generation
//! errors propagate un-retried; the retry policy lives in the client wrapper.

use std::path::Path;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::debug;

use crate::ai::{ChatMessage, SharedClient};
use crate::constants::chunking;
use crate::prompts::{self, keys, SharedPrompts};
use crate::types::Result;

const CHUNK_USER_PROMPT: &str = "Maintain a precise, factual tone. Provide documentation for \
    this chunk of code in a professional format, strictly based on the provided code.";

const CONSOLIDATE_USER_PROMPT: &str = "Using the provided chunk-level documentations, consolidate \
    the information into a single, detailed file-level documentation. Maintain clarity and \
    consistency, and make sure to follow the structure provided.";

const FILE_USER_PROMPT: &str = "Maintain a precise and factual tone. Avoid assumptions and \
    speculation. Provide the documentation for the target file in a professional format.";

/// Split content into chunks of at most `size` lines, preserving line order.
pub fn chunk_lines(content: &str, size: usize) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();
    lines.chunks(size).map(|chunk| chunk.join("\n")).collect()
}

/// Whether a file of `line_count` lines is chunked: the count must exceed the
/// chunk size, and the excess must strictly exceed the slack allowance.
pub fn needs_chunking(line_count: usize) -> bool {
    line_count > chunking::CHUNK_SIZE_LINES
        && line_count - chunking::CHUNK_SIZE_LINES > chunking::CHUNK_EXCESS_LINES
}

/// Generates file-level documentation.
pub struct FileDocumenter {
    client: SharedClient,
    prompts: SharedPrompts,
}

impl FileDocumenter {
    pub fn new(client: SharedClient, prompts: SharedPrompts) -> Self {
        Self { client, prompts }
    }

    /// Document one file with the given model.
    pub async fn document_file(&self, path: &Path, model: &str) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        // Undecodable bytes are replaced rather than failing the file.
        let content = String::from_utf8_lossy(&bytes).into_owned();
        let line_count = content.lines().count();

        if !needs_chunking(line_count) {
            debug!(path = %path.display(), line_count, "documenting file in one call");
            return self.document_whole(path, &content, model).await;
        }

        debug!(path = %path.display(), line_count, "documenting file in chunks");
        let chunks = chunk_lines(&content, chunking::CHUNK_SIZE_LINES);
        // `buffered` keeps chunk order so the consolidation input preserves
        // the file's line order.
        let chunk_docs: Vec<String> = stream::iter(chunks)
            .map(|chunk| self.document_chunk(path, chunk, model))
            .buffered(chunking::CHUNK_CONCURRENCY)
            .try_collect()
            .await?;

        self.consolidate(path, &chunk_docs, model).await
    }

    async fn document_whole(&self, path: &Path, content: &str, model: &str) -> Result<String> {
        let template = prompts::template(self.prompts.as_ref(), keys::FILE_PROMPT);
        let system = format!(
            "{}\nNow, based on this information, generate the documentation for the \
             following file:\n\nFile Path: {}\nCode:\n{}",
            template,
            path.display(),
            content
        );
        self.client
            .generate(
                model,
                &[ChatMessage::system(system), ChatMessage::user(FILE_USER_PROMPT)],
            )
            .await
    }

    async fn document_chunk(&self, path: &Path, chunk: String, model: &str) -> Result<String> {
        let template = prompts::template(self.prompts.as_ref(), keys::FILE_CHUNK_PROMPT);
        let system = format!(
            "{}\n\nBased on this information, generate the documentation for the following \
             code chunk:\n\nFile Path: {}\nCode:\n{}",
            template,
            path.display(),
            chunk
        );
        self.client
            .generate(
                model,
                &[ChatMessage::system(system), ChatMessage::user(CHUNK_USER_PROMPT)],
            )
            .await
    }

    /// Tree reduction: one call that sees every chunk document at once.
    async fn consolidate(&self, path: &Path, chunk_docs: &[String], model: &str) -> Result<String> {
        let template = prompts::template(self.prompts.as_ref(), keys::FILE_CONSOLIDATE_PROMPT);
        let system = format!(
            "{}\n\nBelow are the chunk-level documentations to be consolidated into \
             file-level documentation:\nFile Path: {}\n\n{}",
            template,
            path.display(),
            chunk_docs.join("\n\n")
        );
        self.client
            .generate(
                model,
                &[
                    ChatMessage::system(system),
                    ChatMessage::user(CONSOLIDATE_USER_PROMPT),
                ],
            )
            .await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ai::client::testing::RecordingClient;
    use crate::prompts::MemoryPromptStore;
    use proptest::prelude::*;

    fn make_file(lines: usize) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.rs");
        let content: String = (0..lines).map(|i| format!("let x{} = {};\n", i, i)).collect();
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn documenter(client: Arc<RecordingClient>) -> FileDocumenter {
        FileDocumenter::new(client, Arc::new(MemoryPromptStore::new()))
    }

    #[test]
    fn test_chunking_boundary() {
        // Excess must strictly exceed the slack, not merely equal it.
        assert!(!needs_chunking(300));
        assert!(!needs_chunking(350));
        assert!(needs_chunking(351));
        assert!(needs_chunking(360));
    }

    #[test]
    fn test_chunk_lines_preserves_content() {
        let content: String = (0..360).map(|i| format!("line{}\n", i)).collect();
        let chunks = chunk_lines(&content, 300);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.lines().count() <= 300));
        let total: usize = chunks.iter().map(|c| c.lines().count()).sum();
        assert_eq!(total, 360);
        assert!(chunks[0].starts_with("line0"));
        assert!(chunks[1].starts_with("line300"));
    }

    #[tokio::test]
    async fn test_file_at_slack_boundary_not_chunked() {
        let (_dir, path) = make_file(350);
        let client = Arc::new(RecordingClient::always("doc"));
        let doc = documenter(client.clone());

        let result = doc.document_file(&path, "m").await.unwrap();
        assert_eq!(result, "doc");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_large_file_chunked_and_consolidated() {
        let (_dir, path) = make_file(360);
        let client = Arc::new(RecordingClient::always("chunk doc"));
        let doc = documenter(client.clone());

        doc.document_file(&path, "m").await.unwrap();
        // Two chunk calls plus one consolidation call.
        assert_eq!(client.call_count(), 3);

        let calls = client.calls();
        let consolidation = calls
            .iter()
            .find(|c| c.system.contains("chunk-level documentations"))
            .expect("consolidation call present");
        // The consolidation prompt sees all chunk outputs at once.
        assert_eq!(consolidation.system.matches("chunk doc").count(), 2);
    }

    #[tokio::test]
    async fn test_generation_error_propagates_unretried() {
        let (_dir, path) = make_file(10);
        let client = Arc::new(RecordingClient::new(|_| {
            Err(crate::types::DocError::rate_limited("limit"))
        }));
        let doc = documenter(client.clone());

        let err = doc.document_file(&path, "m").await.unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(client.call_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_chunking_preserves_total_line_count(line_count in 1usize..2000) {
            let content: String = (0..line_count).map(|i| format!("l{}\n", i)).collect();
            let chunks = chunk_lines(&content, chunking::CHUNK_SIZE_LINES);
            let total: usize = chunks.iter().map(|c| c.lines().count()).sum();
            prop_assert_eq!(total, line_count);
            prop_assert!(chunks.iter().all(|c| c.lines().count() <= chunking::CHUNK_SIZE_LINES));
        }
    }
}
