//! Folder Documenter
//!
//! Synthesizes the six canonical sections of a folder-level document from
//! its children's outputs. Subfolder inputs are prior folder-level combined
//! texts, so a folder's aggregate looks like a file's aggregate to its
//! parent. Each section is generated independently; a failing section is
//! carried as a structured error and rendered as a placeholder string only
//! at the serialization boundary, so the fixed schema always holds.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::ai::{ChatMessage, SharedClient};
use crate::prompts::{self, SharedPrompts};
use crate::sections::{extractor, CanonicalSection, SectionContentMap};
use crate::types::{DocError, SectionRecord};

/// Outcome of one section's generation call, kept error-aware internally.
#[derive(Debug)]
pub struct SectionOutcome {
    /// The literal system prompt used, persisted for auditability.
    pub prompt: String,
    pub result: Result<String, DocError>,
}

impl SectionOutcome {
    /// Render the section body, substituting the error placeholder at the
    /// boundary so the document always carries all of its sections.
    pub fn rendered(&self, section_name: &str) -> String {
        match &self.result {
            Ok(text) => text.clone(),
            Err(_) => format!("Error generating documentation for {}", section_name),
        }
    }

    pub fn to_record(&self, section_name: &str) -> SectionRecord {
        SectionRecord {
            name: section_name.to_string(),
            content: self.rendered(section_name),
            prompt: self.prompt.clone(),
        }
    }
}

/// A completed folder-level document.
#[derive(Debug)]
pub struct FolderDocumentation {
    /// Concatenation of the six rendered section bodies, in section order.
    pub combined: String,
    pub sections: Vec<(CanonicalSection, SectionOutcome)>,
}

/// Generates folder-level documentation by section synthesis.
pub struct FolderDocumenter {
    client: SharedClient,
    prompts: SharedPrompts,
}

impl FolderDocumenter {
    pub fn new(client: SharedClient, prompts: SharedPrompts) -> Self {
        Self { client, prompts }
    }

    /// Synthesize all six sections for a folder from its children's docs.
    ///
    /// Section failures never abort the other sections.
    pub async fn document_folder(
        &self,
        folder: &Path,
        file_docs: &BTreeMap<String, String>,
        subfolder_docs: &BTreeMap<String, String>,
        model: &str,
    ) -> FolderDocumentation {
        let file_sections = extractor::extract_all(file_docs);
        let subfolder_sections = if subfolder_docs.is_empty() {
            None
        } else {
            Some(extractor::extract_all(subfolder_docs))
        };

        let mut sections = Vec::with_capacity(CanonicalSection::ALL.len());
        for section in CanonicalSection::ALL {
            let format_template = prompts::template(self.prompts.as_ref(), section.prompt_key());
            let file_summaries = format_summaries(&file_sections, section, "File");
            let subfolder_summaries = subfolder_sections
                .as_ref()
                .map(|s| format_summaries(s, section, "Subfolder"))
                .unwrap_or_default();

            let system = synthesis_prompt(
                folder,
                section.header(),
                &format_template,
                &file_summaries,
                &subfolder_summaries,
            );
            let user = format!(
                "Generate the {} section for {}, focusing on accuracy and clarity. Include \
                 only information that is explicitly present in the source documentation.",
                section.header(),
                folder.display()
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
                    folder = %folder.display(),
                    section = section.header(),
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
                .map(|(section, outcome)| outcome.rendered(section.header())),
        );

        FolderDocumentation { combined, sections }
    }
}

/// Concatenate rendered section bodies. No headers are re-inserted; the
/// generated text already carries its own headings.
pub(crate) fn combine<I: Iterator<Item = String>>(bodies: I) -> String {
    let mut combined = String::new();
    for body in bodies {
        combined.push('\n');
        combined.push_str(&body);
        combined.push_str("\n\n");
    }
    combined
}

/// Human-readable rendering of every contributing path's extracted text for
/// one section.
pub(crate) fn format_summaries(
    extracted: &SectionContentMap,
    section: CanonicalSection,
    doc_type: &str,
) -> String {
    let Some(contributions) = extracted.for_section(section) else {
        return format!("No {} documentation available.", doc_type.to_lowercase());
    };
    contributions
        .iter()
        .map(|(path, content)| format!("{}: {}\n{}: {}", doc_type, path, section.header(), content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn synthesis_prompt(
    folder: &Path,
    section_name: &str,
    section_format: &str,
    file_summaries: &str,
    subfolder_summaries: &str,
) -> String {
    let subfolder_heading = if subfolder_summaries.is_empty() {
        ""
    } else {
        "Subfolders Documentation:"
    };
    format!(
        "You are a technical documentation expert creating comprehensive folder-level \
documentation. Your task is to synthesize information from multiple files and subfolders \
into cohesive, accurate documentation.

Key Requirements:
- Focus on factual information derived directly from the provided documentation
- Maintain consistent terminology across sections
- Highlight relationships and dependencies between components
- Use clear, precise language without speculation
- Include only information that is explicitly present in the source documentation

Context:
Folder Path: {}
Section: {}

Files Documentation:
{}
{}
{}

Output Format:
{}

Guidelines:
1. Synthesize information across all files and subfolders to create a unified narrative
2. Preserve technical accuracy and specificity from source documentation
3. Highlight common patterns and relationships
4. Use consistent terminology throughout
5. Format code examples with proper syntax highlighting
6. Include cross-references between related components",
        folder.display(),
        section_name,
        file_summaries,
        subfolder_heading,
        subfolder_summaries,
        section_format
    )
}

// =============================================================================
// Tests
// =============================================================================
