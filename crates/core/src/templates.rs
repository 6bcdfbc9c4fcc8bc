//! Document templates installed under `.claude/templates/`

/// All workflow templates, as `(file-name, content)` pairs
pub fn all_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        ("requirements-template.md", requirements_template()),
        ("design-template.md", design_template()),
        ("tasks-template.md", tasks_template()),
        ("product-template.md", product_template()),
        ("tech-template.md", tech_template()),
        ("structure-template.md", structure_template()),
        ("bug-report-template.md", bug_report_template()),
        ("bug-analysis-template.md", bug_analysis_template()),
        ("bug-verification-template.md", bug_verification_template()),
    ]
}

pub fn requirements_template() -> &'static str {
    r#"# Requirements Document

## Introduction

[Provide a brief overview of the feature, its purpose, and its value to users]

## Alignment with Product Vision

[Explain how this feature supports the goals outlined in product.md]

## Requirements

### 1. Main Requirement Category

#### 1.1 Specific Requirement
**User Story:** As a [role], I want [feature], so that [benefit]

WHEN [event] THEN [system] SHALL [response]

#### 1.2 Another Specific Requirement
**User Story:** As a [role], I want [feature], so that [benefit]

IF [precondition] THEN [system] SHALL [response]

## Non-Functional Requirements

### Performance
- [Performance requirements]

### Security
- [Security requirements]

### Reliability
- [Reliability requirements]

### Usability
- [Usability requirements]
"#
}

pub fn design_template() -> &'static str {
    r#"# Design Document

## Overview

[High-level description of the feature and its place in the overall system]

## Steering Document Alignment

### Technical Standards (tech.md)
[How the design follows documented technical patterns and standards]

### Project Structure (structure.md)
[How the implementation will follow project organization conventions]

## Architecture

[Describe the overall architecture and design patterns used]

```mermaid
graph TD
    A[Component A] --> B[Component B]
    B --> C[Component C]
```

## Components and Interfaces

### Component 1
- **Purpose:** [What this component does]
- **Interfaces:** [Public methods/APIs]
- **Dependencies:** [What it depends on]

## Data Models

### Model 1
```
[Define the structure of Model1 in your language]
- id: [unique identifier type]
- name: [string/text type]
```

## Error Handling

### Error Scenarios
1. **Scenario 1:** [Description]
   - **Handling:** [How to handle]
   - **User Impact:** [What user sees]

## Testing Strategy

### Unit Testing
- [Unit testing approach and key components to test]

### Integration Testing
- [Integration testing approach and key flows to test]

### End-to-End Testing
- [E2E testing approach and user scenarios to test]
"#
}

pub fn tasks_template() -> &'static str {
    r#"# Implementation Plan

## Task Overview
[Brief description of the implementation approach]

## Steering Document Compliance
[How tasks follow structure.md conventions and tech.md patterns]

## Tasks

- [ ] 1. Set up project structure and core interfaces
  - Create directory structure for components
  - Define core interfaces and types
  - _Requirements: 1.1_

- [ ] 2. Implement data models and validation
  - Overview of data modeling approach
  - _Requirements: 2.0_

- [ ] 2.1 Create base model classes
  - Define data structures/schemas
  - Implement validation methods
  - Write unit tests for models
  - _Requirements: 2.1, 2.2_

- [ ] 2.2 Implement specific model classes
  - Create concrete model implementations
  - Test model interactions
  - _Requirements: 2.3_

- [ ] 3. Create service layer
  - Define service contracts and base classes
  - Add error handling and service unit tests
  - _Requirements: 3.1, 3.2_

- [ ] 4. Integration and testing
  - Integrate all components
  - Write end-to-end tests
  - _Requirements: All_
"#
}

pub fn product_template() -> &'static str {
    r#"# Product Overview

## Product Purpose
[Describe the core purpose of this product/project. What problem does it solve?]

## Target Users
[Who are the primary users of this product? What are their needs and pain points?]

## Key Features
[List the main features that deliver value to users]

1. **Feature 1**: [Description]
2. **Feature 2**: [Description]

## Business Objectives
[What are the business goals this product aims to achieve?]

- [Objective 1]
- [Objective 2]

## Success Metrics
[How will we measure the success of this product?]

- [Metric 1]: [Target]
- [Metric 2]: [Target]

## Product Principles
[Core principles that guide product decisions]

1. **[Principle 1]**: [Explanation]
2. **[Principle 2]**: [Explanation]

## Future Vision
[Where do we see this product evolving in the future?]
"#
}

pub fn tech_template() -> &'static str {
    r#"# Technology Stack

## Project Type
[What kind of project this is: web application, CLI tool, library, API service, etc.]

## Core Technologies

### Primary Language(s)
- **Language**: [e.g., Python 3.11, Go 1.21, TypeScript, Rust]
- **Language-specific tools**: [package managers, build tools, etc.]

### Key Dependencies/Libraries
- **[Library/Framework name]**: [Purpose and version]

### Application Architecture
[How the application is structured: MVC, event-driven, plugin-based, client-server, etc.]

### Data Storage (if applicable)
- **Primary storage**: [e.g., PostgreSQL, files, in-memory]
- **Data formats**: [e.g., JSON, Protocol Buffers, binary]

### External Integrations (if applicable)
- **APIs**: [External services you integrate with]
- **Protocols**: [e.g., HTTP/REST, gRPC, WebSocket]

## Development Environment

### Build & Development Tools
- **Build System**: [e.g., Make, Gradle, npm scripts, cargo]
- **Package Management**: [e.g., pip, npm, cargo, go mod]

### Code Quality Tools
- **Static Analysis**: [Tools for code quality and correctness]
- **Formatting**: [Code style enforcement tools]
- **Testing Framework**: [Unit, integration, and/or end-to-end testing tools]

## Technical Requirements & Constraints

### Performance Requirements
- [e.g., response time, throughput, memory usage, startup time]

### Compatibility Requirements
- **Platform Support**: [Operating systems, architectures, versions]

### Security & Compliance
- **Security Requirements**: [Authentication, encryption, data protection]

## Technical Decisions & Rationale

### Decision Log
1. **[Technology/Pattern Choice]**: [Why this was chosen, alternatives considered]

## Known Limitations
- [Limitation 1]: [Impact and potential future solutions]
"#
}

pub fn structure_template() -> &'static str {
    r#"# Project Structure

## Directory Organization

```
[Define your project's directory structure, e.g.:]

project-root/
|-- src/                    # Source code
|-- tests/                  # Test files
|-- docs/                   # Documentation
`-- [build/dist/out]        # Build output
```

## Naming Conventions

### Files
- **Components/Modules**: [e.g., `PascalCase`, `snake_case`, `kebab-case`]
- **Tests**: [e.g., `[filename]_test`, `[filename].test`]

### Code
- **Classes/Types**: [e.g., `PascalCase`, `snake_case`]
- **Functions/Methods**: [e.g., `camelCase`, `snake_case`]
- **Constants**: [e.g., `UPPER_SNAKE_CASE`]

## Import Patterns

### Import Order
1. External dependencies
2. Internal modules
3. Relative imports

## Code Organization Principles

1. **Single Responsibility**: Each file should have one clear purpose
2. **Modularity**: Code should be organized into reusable modules
3. **Testability**: Structure code to be easily testable
4. **Consistency**: Follow patterns established in the codebase

## Module Boundaries
[How different parts of the project interact and maintain separation of concerns]

## Documentation Standards
- All public APIs must have documentation
- Complex logic should include inline comments
- Follow language-specific documentation conventions
"#
}

pub fn bug_report_template() -> &'static str {
    r#"# Bug Report

## Bug Summary
[Provide a clear, concise description of the bug]

## Bug Details

### Expected Behavior
[Describe what should happen]

### Actual Behavior
[Describe what actually happens]

### Steps to Reproduce
1. [Step 1]
2. [Step 2]
3. [Observe the issue]

### Environment
- **Version**: [Application/system version]
- **Platform**: [OS, browser, device, etc.]
- **Configuration**: [Relevant settings or environment details]

## Impact Assessment

### Severity
- [ ] Critical - System unusable
- [ ] High - Major functionality broken
- [ ] Medium - Feature impaired but workaround exists
- [ ] Low - Minor issue or cosmetic

### Affected Users
[Who is impacted by this bug?]

### Affected Features
[What functionality is broken or impaired?]

## Additional Context

### Error Messages
```
[Include any error messages, stack traces, or logs]
```

## Initial Analysis

### Suspected Root Cause
[Initial thoughts on what might be causing the issue]

### Affected Components
[List files, modules, or systems that might be involved]
"#
}

pub fn bug_analysis_template() -> &'static str {
    r#"# Bug Analysis

## Root Cause Analysis

### Investigation Summary
[Overview of the investigation process and findings]

### Root Cause
[The underlying cause of the bug]

### Contributing Factors
[Any secondary factors that led to or exacerbated the issue]

## Technical Details

### Affected Code Locations

- **File**: `path/to/file.ext`
  - **Function/Method**: `functionName()`
  - **Issue**: [Description of the problem in this location]

### Data Flow Analysis
[How data moves through the system and where it breaks]

## Solution Approach

### Fix Strategy
[High-level approach to solving the problem]

### Alternative Solutions
[Other possible approaches considered]

### Risks and Trade-offs
[Potential risks of the chosen solution]

## Implementation Plan

### Changes Required

1. **Change 1**: [Description]
   - File: `path/to/file`
   - Modification: [What needs to be changed]

### Testing Strategy
[How to verify the fix works]

### Rollback Plan
[How to revert if the fix causes issues]
"#
}

pub fn bug_verification_template() -> &'static str {
    r#"# Bug Verification

## Fix Implementation Summary
[Brief description of what was changed to fix the bug]

## Test Results

### Original Bug Reproduction
- [ ] **Before Fix**: Bug successfully reproduced
- [ ] **After Fix**: Bug no longer occurs

### Regression Testing
- [ ] **Related Feature 1**: [Test result]
- [ ] **Integration Points**: [Test result]

### Edge Case Testing
- [ ] **Edge Case 1**: [Description and result]
- [ ] **Error Conditions**: [How errors are handled]

## Code Quality Checks

### Automated Tests
- [ ] **Unit Tests**: All passing
- [ ] **Integration Tests**: All passing
- [ ] **Linting**: No issues

### Manual Code Review
- [ ] **Code Style**: Follows project conventions
- [ ] **Error Handling**: Appropriate error handling added

## Closure Checklist
- [ ] **Original issue resolved**: Bug no longer occurs
- [ ] **No regressions introduced**: Related functionality intact
- [ ] **Tests passing**: All automated tests pass
- [ ] **Documentation updated**: Relevant docs reflect changes
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_present() {
        let templates = all_templates();
        assert_eq!(templates.len(), 9);

        for (name, content) in templates {
            assert!(name.ends_with("-template.md"));
            assert!(content.starts_with("# "), "{} should start with a heading", name);
        }
    }

    #[test]
    fn test_tasks_template_uses_checkbox_format() {
        assert!(tasks_template().contains("- [ ] 1."));
        assert!(tasks_template().contains("_Requirements:"));
    }
}
