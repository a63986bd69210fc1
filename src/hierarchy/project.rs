//! Project Documenter
//!
//! Synthesizes the four project-wide sections from root-level files and
//! immediate child folder summaries only. The six fine-grained extracted
//! sections are folded into the four coarser project buckets before prompt
//! assembly. Shares the folder documenter's containment policy: a failing
//! section becomes a placeholder, never an abort.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use super::folder::{combine, SectionOutcome};
use crate::ai::{ChatMessage, SharedClient};
use crate::prompts::{self, SharedPrompts};
use crate::sections::{extractor, ProjectSection};

/// A completed project-level document.
#[derive(Debug)]
pub struct ProjectDocumentation {
    /// Concatenation of the four rendered section bodies, in section order.
    pub combined: String,
    pub sections: Vec<(ProjectSection, SectionOutcome)>,
}

/// Per-bucket contributions keyed by source path.
type ProjectBuckets = BTreeMap<ProjectSection, BTreeMap<String, String>>;

/// Generates project-level documentation.
pub struct ProjectDocumenter {
    client: SharedClient,
    prompts: SharedPrompts,
}

impl ProjectDocumenter {
    pub fn new(client: SharedClient, prompts: SharedPrompts) -> Self {
        Self { client, prompts }
    }

    /// Synthesize the four project sections from root files and immediate
    /// child folder summaries.
    pub async fn document_project(
        &self,
        project_path: &Path,
        project_name: &str,
        root_file_docs: &BTreeMap<String, String>,
        root_folder_docs: &BTreeMap<String, String>,
        model: &str,
    ) -> ProjectDocumentation {
        let file_buckets = extractor::extract_all(root_file_docs).into_project_buckets();
        let folder_buckets = extractor::extract_all(root_folder_docs).into_project_buckets();

        let mut sections = Vec::with_capacity(ProjectSection::ALL.len());
        for section in ProjectSection::ALL {
            let format_template = prompts::template(self.prompts.as_ref(), section.prompt_key());
            let files_summary = bucket_summary(&file_buckets, section, "File");
            let folders_summary = bucket_summary(&folder_buckets, section, "Folder");

            let system = project_prompt(
                project_path,
                project_name,
                section.title(),
                &format_template,
                &files_summary,
                &folders_summary,
            );
            let user = format!(
                "Generate the {} section for project {}, focusing on providing a \
                 comprehensive project-level perspective. Include only information that is \
                 explicitly present in the source documentation.",
                section.title(),
                project_name
            );

            let result = self
                .client
                .generate(
                    model,
                    &[ChatMessage::system(system.clone()), ChatMessage::user(user)],
                )
                .await;
            if let Err(err) = &result {
                warn!(
                    project = project_name,
                    section = section.title(),
                    error = %err,
                    "section generation failed, substituting placeholder"
                );
            }

            sections.push((
                section,
                SectionOutcome {
                    prompt: system,
                    result,
                },
            ));
        }

        let combined = combine(
            sections
                .iter()
                .map(|(section, outcome)| outcome.rendered(section.title())),
        );

        ProjectDocumentation { combined, sections }
    }
}

/// Format one bucket's contributions, or an explicit absence statement so
/// the model never has to guess about missing inputs.
fn bucket_summary(buckets: &ProjectBuckets, section: ProjectSection, doc_type: &str) -> String {
    let contributions = buckets
        .get(&section)
        .filter(|paths| !paths.is_empty());
    let Some(contributions) = contributions else {
        return format!(
            "No {} level documentation available for this section.",
            doc_type.to_lowercase()
        );
    };
    contributions
        .iter()
        .map(|(path, content)| format!("{}: {}\n{}", doc_type, path, content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn project_prompt(
    project_path: &Path,
    project_name: &str,
    section_name: &str,
    section_format: &str,
    files_summary: &str,
    folders_summary: &str,
) -> String {
    format!(
        "You are a technical documentation expert creating comprehensive project-level \
documentation. Your task is to synthesize information from root-level files and immediate \
child folders into cohesive, accurate project documentation.

Key Requirements:
- Create high-level project documentation that provides a clear overview of the entire system
- Synthesize information from both files and folders documentations to create a complete picture
- Maintain consistent terminology and technical accuracy
- Focus on project-wide patterns, architectures, and relationships
- Include only information that is explicitly present in the source documentation
- If no source documentation is available for a section, clearly state that the information \
is not available

Context:
Project Name: {}
Project Path: {}
Section: {}

Available Documentation:
File Documentation:
{}

Folder Documentation:
{}

Output Format:
{}

Guidelines:
1. Focus on project-wide concerns and architectural decisions
2. Highlight relationships between major components
3. Maintain technical accuracy while providing high-level overview
4. Use consistent terminology throughout
5. Include relevant cross-references between components
6. Emphasize project-wide patterns and standards
7. Consider both immediate implementation details and long-term maintenance
8. If no documentation is available for certain aspects, explicitly state this rather than \
making assumptions",
        project_name,
        project_path.display(),
        section_name,
        files_summary,
        folders_summary,
        section_format
    )
}

// =============================================================================
// Tests
// =============================================================================
