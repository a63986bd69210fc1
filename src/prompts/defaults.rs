//! Built-in Prompt Templates
//!
//! Fallback templates used when the prompt store has no override for a key.
//! Folder and project templates are output-format scaffolds handed to the
//! synthesis prompts; file templates steer file-level generation toward the
//! canonical section structure the extractor understands.

use super::keys;

/// Look up the built-in template for a prompt key.
pub fn builtin(key: &str) -> Option<&'static str> {
    match key {
        keys::FILE_PROMPT => Some(FILE_PROMPT),
        keys::FILE_CHUNK_PROMPT => Some(FILE_CHUNK_PROMPT),
        keys::FILE_CONSOLIDATE_PROMPT => Some(FILE_CONSOLIDATE_PROMPT),
        keys::FOLDER_OVERVIEW => Some(FOLDER_OVERVIEW),
        keys::FOLDER_KEY_FUNCTIONS => Some(FOLDER_KEY_FUNCTIONS),
        keys::FOLDER_ARCHITECTURE => Some(FOLDER_ARCHITECTURE),
        keys::FOLDER_INTER_RS => Some(FOLDER_INTER_RS),
        keys::FOLDER_DEPENDENCIES => Some(FOLDER_DEPENDENCIES),
        keys::FOLDER_EXAMPLES => Some(FOLDER_EXAMPLES),
        keys::PROJECT_OVERVIEW => Some(PROJECT_OVERVIEW),
        keys::PROJECT_INFRASTRUCTURE => Some(PROJECT_INFRASTRUCTURE),
        keys::PROJECT_ORGANIZATION => Some(PROJECT_ORGANIZATION),
        keys::PROJECT_DEPENDENCIES => Some(PROJECT_DEPENDENCIES),
        _ => None,
    }
}

// =============================================================================
// File-Level Templates
// =============================================================================

const FILE_PROMPT: &str = "\
You are a technical documentation expert. Generate comprehensive, factual \
documentation for a single source file. Structure the output with these \
numbered sections, each under its own heading: 1. Overview and Purpose, \
2. Key Functions, 3. Architecture, 4. Inter-File Relationships, \
5. Dependencies and External Calls, 6. Code Snippets and Examples. \
Base every statement strictly on the provided code.";

const FILE_CHUNK_PROMPT: &str = "\
You are a technical documentation expert. Generate precise documentation \
for a chunk of a larger source file. Describe what the chunk contains: its \
functions, types, and the dependencies it touches. Do not speculate about \
code outside the chunk.";

const FILE_CONSOLIDATE_PROMPT: &str = "\
You are a technical documentation expert. Consolidate the provided \
chunk-level documentation into a single coherent file-level document. \
Structure the output with these numbered sections, each under its own \
heading: 1. Overview and Purpose, 2. Key Functions, 3. Architecture, \
4. Inter-File Relationships, 5. Dependencies and External Calls, \
6. Code Snippets and Examples. Remove chunk-boundary artifacts and \
duplicated statements.";

// =============================================================================
// Folder-Level Section Formats
// =============================================================================

const FOLDER_OVERVIEW: &str = r#"### 1. Overview and Purpose

**Folder Overview**
[Provide a comprehensive summary that:
- Describes the folder's primary functionality
- Explains how it fits into the larger system
- Highlights key features and capabilities]

**Purpose and Scope**
[Define:
- The folder's main responsibilities
- Core problems it solves
- Target users/consumers of this code
- Boundaries and limitations]"#;

const FOLDER_KEY_FUNCTIONS: &str = r#"### 2. Key Functions

**Core Functionality**
[List and describe the most important functions/classes, including:
- Function signatures with parameter types and return values
- Pre/post conditions
- Error handling
- Performance characteristics
- Threading/concurrency considerations]

**Function Categories**
[Group related functions by:
- Data processing
- Business logic
- Utility functions
- API endpoints
- etc.]"#;

const FOLDER_ARCHITECTURE: &str = r#"### 3. Architecture

**Design Patterns**
[Document:
- Architectural patterns used
- Design principles followed
- Class hierarchies
- Component interactions]

**Technical Decisions**
[Explain:
- Key architectural choices
- Trade-offs made
- Performance considerations
- Scalability approach]"#;

const FOLDER_INTER_RS: &str = r#"### 4. Inter-File Relationships

**Component Dependencies**
[Map out:
- File dependencies and import hierarchy
- Data flow between components
- Shared resources
- Integration points]

**Communication Patterns**
[Detail:
- Inter-module communication
- Event handling
- State management
- Resource sharing]"#;

const FOLDER_DEPENDENCIES: &str = r#"### 5. Dependencies and External Calls

**External Dependencies**
[List:
- Required libraries and versions
- External services
- System requirements
- Configuration dependencies]

**Integration Points**
[Document:
- API calls
- Database interactions
- File system operations
- Network communications]"#;

const FOLDER_EXAMPLES: &str = r#"### 6. Code Snippets and Examples

**Common Use Cases**
[Provide:
- Complete, runnable examples
- Expected inputs and outputs
- Error handling examples
- Configuration examples]

**Integration Examples**
[Show:
- How to use with other components
- Common patterns
- Best practices
- Performance optimization examples]"#;

// =============================================================================
// Project-Level Section Formats
// =============================================================================

const PROJECT_OVERVIEW: &str = r#"### 1. Project Overview

**Project Summary**
[Provide:
- Project name and purpose
- Core functionality and features
- Target users/stakeholders
- Business value and use cases]"#;

const PROJECT_INFRASTRUCTURE: &str = r#"### 2. Technical Infrastructure

**Development Environment**
[Document:
- Required development tools
- Build system and process
- Testing framework
- Development workflows]

**Project Architecture**
[Detail:
- High-level system architecture
- Key components and their relationships
- Technology stack
- Design principles and patterns]"#;

const PROJECT_ORGANIZATION: &str = r#"### 3. Component Organization

**Project Structure**
[Document:
- Directory organization
- Key folders and their purposes
- File naming conventions
- Module organization]

**Core Components**
[Detail:
- Major subsystems
- Critical services
- Shared libraries
- Utility modules]

**Integration Points**
[Specify:
- Internal component interactions
- External system interfaces
- API endpoints
- Data flow patterns]"#;

const PROJECT_DEPENDENCIES: &str = r#"### 4. Dependencies and Requirements

**Technical Requirements**
[List:
- System requirements
- Runtime dependencies
- External services
- Third-party libraries]

**Integration Requirements**
[Detail:
- API dependencies
- Service integrations
- Database requirements
- Authentication systems]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_key_has_a_builtin() {
        for key in [
            keys::FILE_PROMPT,
            keys::FILE_CHUNK_PROMPT,
            keys::FILE_CONSOLIDATE_PROMPT,
            keys::FOLDER_OVERVIEW,
            keys::FOLDER_KEY_FUNCTIONS,
            keys::FOLDER_ARCHITECTURE,
            keys::FOLDER_INTER_RS,
            keys::FOLDER_DEPENDENCIES,
            keys::FOLDER_EXAMPLES,
            keys::PROJECT_OVERVIEW,
            keys::PROJECT_INFRASTRUCTURE,
            keys::PROJECT_ORGANIZATION,
            keys::PROJECT_DEPENDENCIES,
        ] {
            assert!(builtin(key).is_some(), "missing builtin for {}", key);
        }
    }

    #[test]
    fn test_unknown_key_has_no_builtin() {
        assert!(builtin("nope").is_none());
    }
}
