//! Hierarchy Orchestrator
//!
//! Bottom-up, concurrency-bounded walk over the selected paths of a
//! project tree. Each folder visit joins its subfolder and file results
//! before synthesizing the folder's own documentation, so parents always
//! see completed child summaries. Visits are deduplicated through a
//! lock-free processed set, and any single child failure is logged and
//! omitted rather than aborting the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dashmap::DashSet;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::file::FileDocumenter;
use super::folder::{FolderDocumenter, SectionOutcome};
use super::path_key;
use super::project::ProjectDocumenter;
use super::selection::SelectedPaths;
use crate::ai::SharedClient;
use crate::constants::orchestrator::{DEFAULT_DISPATCH_WORKERS, DEFAULT_RUN_WORKERS};
use crate::prompts::SharedPrompts;
use crate::storage::SharedStore;
use crate::types::{DocLevel, DocumentRecord, ModelSelection, Result, SectionRecord};

// ============================================================================
// Run Description
// ============================================================================

/// One documentation run over a project tree.
#[derive(Debug, Clone)]
pub struct DocumentationRun {
    /// Owner of the generated documents.
    pub user_id: i64,
    /// Project root folder. Always treated as the single project-level node.
    pub root_path: PathBuf,
    /// Display name recorded with every document.
    pub project_name: String,
    /// Absolute paths chosen for documentation.
    pub selected: SelectedPaths,
}

/// Tuning knobs for a run.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Worker cap for the root folder's fan-out pools.
    pub entry_workers: usize,
    /// Worker cap for fan-out pools below the root.
    pub dispatch_workers: usize,
    /// Models used per hierarchy level.
    pub models: ModelSelection,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            entry_workers: DEFAULT_RUN_WORKERS,
            dispatch_workers: DEFAULT_DISPATCH_WORKERS,
            models: ModelSelection::default(),
        }
    }
}

/// Aggregated results for one visited folder, returned to its parent.
#[derive(Debug, Default)]
pub struct FolderOutcome {
    /// Completed file documentation, keyed by file path.
    pub files: BTreeMap<String, String>,
    /// Completed subfolder outcomes, keyed by folder path.
    pub subfolders: BTreeMap<String, FolderOutcome>,
    /// Combined folder-level document, when this folder was itself selected.
    pub folder_summary: Option<String>,
    /// Combined project-level document. Set only at the root.
    pub project_summary: Option<String>,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Drives a full documentation run: walk, generate, persist.
pub struct HierarchyOrchestrator {
    files: FileDocumenter,
    folders: FolderDocumenter,
    projects: ProjectDocumenter,
    store: SharedStore,
    config: OrchestratorConfig,
}

impl HierarchyOrchestrator {
    pub fn new(
        client: SharedClient,
        prompts: SharedPrompts,
        store: SharedStore,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            files: FileDocumenter::new(client.clone(), prompts.clone()),
            folders: FolderDocumenter::new(client.clone(), prompts.clone()),
            projects: ProjectDocumenter::new(client, prompts),
            store,
            config,
        }
    }

    /// Execute a documentation run from its root.
    ///
    /// Returns `None` when the root has no selected content at all.
    pub async fn run(&self, run: &DocumentationRun) -> Result<Option<FolderOutcome>> {
        info!(
            project = %run.project_name,
            root = %run.root_path.display(),
            selected = run.selected.len(),
            "starting documentation run"
        );
        let processed = DashSet::new();
        let outcome = self.visit_folder(run, &run.root_path, true, &processed).await?;
        info!(
            project = %run.project_name,
            folders_visited = processed.len(),
            "documentation run finished"
        );
        Ok(outcome)
    }

    /// Visit one folder: recurse into subfolders, document files, then
    /// synthesize this folder's own document if it was selected.
    ///
    /// Returns `Ok(None)` when the folder is pruned (nothing selected
    /// beneath it) or was already visited by a sibling branch.
    fn visit_folder<'a>(
        &'a self,
        run: &'a DocumentationRun,
        folder: &'a Path,
        is_project_root: bool,
        processed: &'a DashSet<PathBuf>,
    ) -> BoxFuture<'a, Result<Option<FolderOutcome>>> {
        async move {
            if !run.selected.is_selected_or_has_selected_children(folder) {
                debug!(folder = %folder.display(), "no selected content, pruning");
                return Ok(None);
            }
            // Atomic membership test and insert. A second branch reaching
            // the same folder observes `false` and backs off.
            if !processed.insert(folder.to_path_buf()) {
                debug!(folder = %folder.display(), "folder already processed");
                return Ok(None);
            }

            let (selected_files, selected_subfolders) = run.selected.direct_children(folder);
            info!(
                folder = %folder.display(),
                files = selected_files.len(),
                subfolders = selected_subfolders.len(),
                "processing folder"
            );

            let workers = if is_project_root {
                self.config.entry_workers
            } else {
                self.config.dispatch_workers
            };

            let mut outcome = FolderOutcome::default();

            // Subfolders complete before this folder's own synthesis.
            let mut subfolder_results = stream::iter(selected_subfolders)
                .map(|subfolder| async move {
                    let result = self.visit_folder(run, &subfolder, false, processed).await;
                    (subfolder, result)
                })
                .buffer_unordered(workers);
            while let Some((subfolder, result)) = subfolder_results.next().await {
                match result {
                    Ok(Some(child)) => {
                        outcome.subfolders.insert(path_key(&subfolder), child);
                    }
                    Ok(None) => {
                        debug!(subfolder = %subfolder.display(), "subfolder produced no documentation");
                    }
                    Err(err) => {
                        warn!(
                            subfolder = %subfolder.display(),
                            error = %err,
                            "subfolder documentation failed, omitting from aggregation"
                        );
                    }
                }
            }

            let mut file_results = stream::iter(selected_files)
                .map(|file| async move {
                    let result = self
                        .files
                        .document_file(&file, &self.config.models.file_model)
                        .await;
                    (file, result)
                })
                .buffer_unordered(workers);
            while let Some((file, result)) = file_results.next().await {
                match result {
                    Ok(doc) => {
                        // Write-through: file documents are persisted as soon
                        // as they are ready, not batched at the end.
                        self.persist_node(
                            &self.record(run, &file, DocLevel::File, doc.clone(), &self.config.models.file_model),
                            &[],
                        );
                        outcome.files.insert(path_key(&file), doc);
                    }
                    Err(err) => {
                        warn!(
                            file = %file.display(),
                            error = %err,
                            "file documentation failed, omitting from aggregation"
                        );
                    }
                }
            }

            if run.selected.contains(folder) {
                // Child folders are never project roots, so only their
                // folder-level summaries feed upward.
                let subfolder_docs: BTreeMap<String, String> = outcome
                    .subfolders
                    .iter()
                    .filter_map(|(path, child)| {
                        child
                            .folder_summary
                            .as_ref()
                            .filter(|summary| !summary.trim().is_empty())
                            .map(|summary| (path.clone(), summary.clone()))
                    })
                    .collect();

                if is_project_root {
                    let doc = self
                        .projects
                        .document_project(
                            folder,
                            &run.project_name,
                            &outcome.files,
                            &subfolder_docs,
                            &self.config.models.project_model,
                        )
                        .await;
                    let sections = section_records(
                        doc.sections.iter().map(|(s, o)| (s.title(), o)),
                    );
                    self.persist_node(
                        &self.record(
                            run,
                            folder,
                            DocLevel::Project,
                            doc.combined.clone(),
                            &self.config.models.project_model,
                        ),
                        &sections,
                    );
                    outcome.project_summary = Some(doc.combined);
                } else {
                    let doc = self
                        .folders
                        .document_folder(
                            folder,
                            &outcome.files,
                            &subfolder_docs,
                            &self.config.models.folder_model,
                        )
                        .await;
                    let sections = section_records(
                        doc.sections.iter().map(|(s, o)| (s.header(), o)),
                    );
                    self.persist_node(
                        &self.record(
                            run,
                            folder,
                            DocLevel::Folder,
                            doc.combined.clone(),
                            &self.config.models.folder_model,
                        ),
                        &sections,
                    );
                    outcome.folder_summary = Some(doc.combined);
                }
            } else {
                debug!(
                    folder = %folder.display(),
                    "folder not selected, passing child results upward only"
                );
            }

            Ok(Some(outcome))
        }
        .boxed()
    }

    fn record(
        &self,
        run: &DocumentationRun,
        path: &Path,
        level: DocLevel,
        content: String,
        model: &str,
    ) -> DocumentRecord {
        DocumentRecord {
            user_id: run.user_id,
            path: path_key(path),
            content,
            project_name: run.project_name.clone(),
            level,
            root_path: path_key(&run.root_path),
            model: model.to_string(),
        }
    }

    /// Persist one document and its section rows. Store failures are
    /// logged and contained so one lost write never aborts the walk.
    fn persist_node(&self, record: &DocumentRecord, sections: &[SectionRecord]) {
        match self.store.store_document(record) {
            Ok(document_id) => {
                for section in sections {
                    if let Err(err) = self.store.store_section(document_id, section) {
                        warn!(
                            path = %record.path,
                            section = %section.name,
                            error = %err,
                            "failed to persist section"
                        );
                    }
                }
            }
            Err(err) => {
                warn!(path = %record.path, error = %err, "failed to persist document");
            }
        }
    }
}

fn section_records<'a, I>(sections: I) -> Vec<SectionRecord>
where
    I: Iterator<Item = (&'a str, &'a SectionOutcome)>,
{
    sections
        .map(|(name, outcome)| outcome.to_record(name))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::testing::RecordingClient;
    use crate::prompts::MemoryPromptStore;
    use crate::types::DocError;
    use std::sync::{Arc, Mutex};

    // In-memory stand-in with the same upsert-by-path semantics as the
    // SQLite store.
    #[derive(Default)]
    struct MemoryStore {
        docs: Mutex<Vec<DocumentRecord>>,
        sections: Mutex<Vec<(i64, SectionRecord)>>,
        fail_documents: bool,
    }

    impl MemoryStore {
        fn shared() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn documents(&self) -> Vec<DocumentRecord> {
            self.docs.lock().unwrap().clone()
        }

        fn sections_for(&self, document_id: i64) -> Vec<SectionRecord> {
            self.sections
                .lock()
                .unwrap()
                .iter()
                .filter(|(id, _)| *id == document_id)
                .map(|(_, s)| s.clone())
                .collect()
        }

        fn document_id(&self, path: &str) -> Option<i64> {
            self.docs
                .lock()
                .unwrap()
                .iter()
                .position(|d| d.path == path)
                .map(|i| i as i64)
        }
    }

    impl crate::storage::DocumentStore for MemoryStore {
        fn store_document(&self, record: &DocumentRecord) -> crate::types::Result<i64> {
            if self.fail_documents {
                return Err(DocError::Persistence("store offline".into()));
            }
            let mut docs = self.docs.lock().unwrap();
            if let Some(i) = docs.iter().position(|d| d.path == record.path) {
                docs[i] = record.clone();
                let id = i as i64;
                self.sections.lock().unwrap().retain(|(sid, _)| *sid != id);
                Ok(id)
            } else {
                docs.push(record.clone());
                Ok((docs.len() - 1) as i64)
            }
        }

        fn store_section(
            &self,
            document_id: i64,
            section: &SectionRecord,
        ) -> crate::types::Result<()> {
            self.sections
                .lock()
                .unwrap()
                .push((document_id, section.clone()));
            Ok(())
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }

    const FULL_DOC: &str = "### 1. Overview and Purpose\nOverview text.\n\
        ### 2. Key Functions\nFunctions text.\n\
        ### 3. Architecture\nArchitecture text.\n\
        ### 4. Inter-File Relationships\nRelations text.\n\
        ### 5. Dependencies and External Calls\nDeps text.\n\
        ### 6. Code Snippets and Examples\nSnippets text.";

    struct Fixture {
        _dir: tempfile::TempDir,
        root: PathBuf,
        lib: PathBuf,
        main_rs: PathBuf,
        util_rs: PathBuf,
    }

    /// root/
    ///   main.rs
    ///   lib/
    ///     util.rs
    ///   skipme/
    ///     ignored.rs
    fn project_tree() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let lib = root.join("lib");
        let skipme = root.join("skipme");
        std::fs::create_dir(&lib).unwrap();
        std::fs::create_dir(&skipme).unwrap();
        let main_rs = root.join("main.rs");
        let util_rs = lib.join("util.rs");
        std::fs::write(&main_rs, "fn main() {}\n").unwrap();
        std::fs::write(&util_rs, "pub fn util() {}\n").unwrap();
        std::fs::write(skipme.join("ignored.rs"), "pub fn hidden() {}\n").unwrap();
        Fixture { _dir: dir, root, lib, main_rs, util_rs }
    }

    fn full_run(fixture: &Fixture) -> DocumentationRun {
        DocumentationRun {
            user_id: 7,
            root_path: fixture.root.clone(),
            project_name: "demo".into(),
            selected: SelectedPaths::new(vec![
                fixture.root.clone(),
                fixture.lib.clone(),
                fixture.main_rs.clone(),
                fixture.util_rs.clone(),
            ]),
        }
    }

    fn orchestrator(
        client: Arc<RecordingClient>,
        store: Arc<MemoryStore>,
    ) -> HierarchyOrchestrator {
        HierarchyOrchestrator::new(
            client,
            Arc::new(MemoryPromptStore::new()),
            store,
            OrchestratorConfig::default(),
        )
    }

    #[tokio::test]
    async fn run_persists_every_level_once() {
        init_tracing();
        let fixture = project_tree();
        let client = Arc::new(RecordingClient::always(FULL_DOC));
        let store = MemoryStore::shared();
        let orch = orchestrator(client.clone(), store.clone());

        let outcome = orch.run(&full_run(&fixture)).await.unwrap().unwrap();
        assert!(outcome.project_summary.is_some());
        assert!(outcome.folder_summary.is_none());

        let docs = store.documents();
        let root_key = path_key(&fixture.root);
        let projects: Vec<_> = docs.iter().filter(|d| d.level == DocLevel::Project).collect();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].path, root_key);
        assert_eq!(projects[0].root_path, root_key);
        assert_eq!(projects[0].user_id, 7);

        let folders: Vec<_> = docs.iter().filter(|d| d.level == DocLevel::Folder).collect();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].path, path_key(&fixture.lib));

        let files: Vec<_> = docs.iter().filter(|d| d.level == DocLevel::File).collect();
        assert_eq!(files.len(), 2);

        // Section rows: six per folder, four per project, none per file.
        let folder_id = store.document_id(&path_key(&fixture.lib)).unwrap();
        assert_eq!(store.sections_for(folder_id).len(), 6);
        let project_id = store.document_id(&root_key).unwrap();
        assert_eq!(store.sections_for(project_id).len(), 4);
        let file_id = store.document_id(&path_key(&fixture.main_rs)).unwrap();
        assert!(store.sections_for(file_id).is_empty());
    }

    #[tokio::test]
    async fn children_complete_before_their_parent() {
        let fixture = project_tree();
        let client = Arc::new(RecordingClient::always(FULL_DOC));
        let store = MemoryStore::shared();
        let orch = orchestrator(client.clone(), store.clone());

        orch.run(&full_run(&fixture)).await.unwrap();

        let calls = client.calls();
        let util_key = fixture.util_rs.display().to_string();
        let folder_marker = format!("Folder Path: {}", fixture.lib.display());

        // File calls carry the file path in the system prompt and the fixed
        // file instruction as the user message.
        let util_calls: Vec<u64> = calls
            .iter()
            .filter(|c| {
                c.system.contains(&util_key)
                    && c.user.contains("Maintain a precise and factual tone")
            })
            .map(|c| c.seq)
            .collect();
        let folder_calls: Vec<u64> = calls
            .iter()
            .filter(|c| c.system.contains(&folder_marker))
            .map(|c| c.seq)
            .collect();
        let project_calls: Vec<u64> = calls
            .iter()
            .filter(|c| c.user.contains("section for project demo"))
            .map(|c| c.seq)
            .collect();
        assert_eq!(util_calls.len(), 1);
        assert_eq!(folder_calls.len(), 6);
        assert_eq!(project_calls.len(), 4);

        let util_seq = util_calls[0];
        assert!(folder_calls.iter().all(|&seq| seq > util_seq));
        let last_folder = *folder_calls.iter().max().unwrap();
        assert!(project_calls.iter().all(|&seq| seq > last_folder));
    }

    #[tokio::test]
    async fn unselected_subtrees_are_never_read() {
        let fixture = project_tree();
        let client = Arc::new(RecordingClient::always(FULL_DOC));
        let store = MemoryStore::shared();
        let orch = orchestrator(client.clone(), store.clone());

        orch.run(&full_run(&fixture)).await.unwrap();

        assert!(client
            .calls()
            .iter()
            .all(|c| !c.system.contains("skipme") && !c.user.contains("skipme")));
        assert!(store.documents().iter().all(|d| !d.path.contains("skipme")));
    }

    #[tokio::test]
    async fn run_without_selected_content_returns_none() {
        let fixture = project_tree();
        let client = Arc::new(RecordingClient::always(FULL_DOC));
        let store = MemoryStore::shared();
        let orch = orchestrator(client.clone(), store.clone());

        let run = DocumentationRun {
            user_id: 7,
            root_path: fixture.root.clone(),
            project_name: "demo".into(),
            selected: SelectedPaths::new(Vec::<PathBuf>::new()),
        };
        assert!(orch.run(&run).await.unwrap().is_none());
        assert_eq!(client.call_count(), 0);
        assert!(store.documents().is_empty());
    }

    #[tokio::test]
    async fn failed_file_is_omitted_but_run_continues() {
        init_tracing();
        let fixture = project_tree();
        let client = Arc::new(RecordingClient::new(|call| {
            if call.system.contains("util.rs") {
                Err(DocError::Service("model unavailable".into()))
            } else {
                Ok(FULL_DOC.to_string())
            }
        }));
        let store = MemoryStore::shared();
        let orch = orchestrator(client.clone(), store.clone());

        let outcome = orch.run(&full_run(&fixture)).await.unwrap().unwrap();
        assert!(outcome.project_summary.is_some());

        let docs = store.documents();
        assert!(docs.iter().all(|d| d.path != path_key(&fixture.util_rs)));
        // The folder document is still generated, fed only by what exists.
        assert!(docs
            .iter()
            .any(|d| d.level == DocLevel::Folder && d.path == path_key(&fixture.lib)));
        let folder_synthesis: Vec<_> = client
            .calls()
            .into_iter()
            .filter(|c| c.system.contains(&format!("Folder Path: {}", fixture.lib.display())))
            .collect();
        assert_eq!(folder_synthesis.len(), 6);
        assert!(folder_synthesis
            .iter()
            .any(|c| c.user.contains("No file documentation available")));
    }

    #[tokio::test]
    async fn store_failures_do_not_abort_the_walk() {
        init_tracing();
        let fixture = project_tree();
        let client = Arc::new(RecordingClient::always(FULL_DOC));
        let store = Arc::new(MemoryStore {
            fail_documents: true,
            ..MemoryStore::default()
        });
        let orch = orchestrator(client.clone(), store.clone());

        let outcome = orch.run(&full_run(&fixture)).await.unwrap().unwrap();
        assert!(outcome.project_summary.is_some());
        assert!(store.documents().is_empty());
        // Generation still happened for every node.
        assert_eq!(client.call_count(), 2 + 6 + 4);
    }

    #[tokio::test]
    async fn folder_summaries_feed_the_project_prompt() {
        let fixture = project_tree();
        let client = Arc::new(RecordingClient::always(FULL_DOC));
        let store = MemoryStore::shared();
        let orch = orchestrator(client.clone(), store.clone());

        orch.run(&full_run(&fixture)).await.unwrap();

        let lib_key = path_key(&fixture.lib);
        let project_overview = client
            .calls()
            .into_iter()
            .find(|c| c.user.contains("Generate the Project Overview section for project demo"))
            .unwrap();
        assert!(project_overview.system.contains(&lib_key));
    }
}
