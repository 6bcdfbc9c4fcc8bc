//! Markdown content for the workflow slash commands
//!
//! Each function returns the body of one command file installed under
//! `.claude/commands/`. The content is static; setup writes it verbatim.

/// All workflow commands, as `(file-name, content)` pairs
pub fn all_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("spec-create.md", spec_create_command()),
        ("spec-requirements.md", spec_requirements_command()),
        ("spec-design.md", spec_design_command()),
        ("spec-tasks.md", spec_tasks_command()),
        ("spec-execute.md", spec_execute_command()),
        ("spec-auto-run.md", spec_auto_run_command()),
        ("spec-status.md", spec_status_command()),
        ("spec-list.md", spec_list_command()),
        ("spec-steering-setup.md", spec_steering_setup_command()),
        ("bug-create.md", bug_create_command()),
        ("bug-analyze.md", bug_analyze_command()),
        ("bug-fix.md", bug_fix_command()),
        ("bug-verify.md", bug_verify_command()),
        ("bug-status.md", bug_status_command()),
    ]
}

pub fn spec_create_command() -> &'static str {
    r#"# Spec Create Command

Create a new feature specification following the spec-driven workflow.

## Usage
```
/spec-create <feature-name> [description]
```

## Workflow Philosophy

You are an AI assistant that specializes in spec-driven development. Guide the user through a systematic approach to feature development.

### Core Principles
- **Structured Development**: Follow the sequential phases without skipping steps
- **User Approval Required**: Each phase must be explicitly approved before proceeding
- **Atomic Implementation**: Execute one task at a time during implementation
- **Requirement Traceability**: All tasks must reference specific requirements

## Workflow Sequence

**CRITICAL**: Follow this exact sequence - do NOT skip steps:

1. **Requirements Phase** (this command): create requirements.md, get approval
2. **Design Phase** (`/spec-design`): create design.md, get approval
3. **Tasks Phase** (`/spec-tasks`): create tasks.md, get approval, then ask the
   user if they want task commands generated; if yes run
   `specflow generate-task-commands {feature-name}`
4. **Implementation Phase** (`/spec-execute` or generated commands)

## Instructions

1. **Create Directory Structure**
   - Create `.claude/specs/{feature-name}/` directory
   - Initialize empty requirements.md, design.md, and tasks.md files

2. **Check for Steering Documents**
   - Load .claude/steering/product.md, tech.md, and structure.md if present
   - Use them to guide the spec creation

3. **Analyze Existing Codebase** (BEFORE writing requirements)
   - Search for similar features and reusable components
   - Review architecture patterns and naming conventions
   - Note what can be reused vs. what needs to be built from scratch

4. **Generate Initial Requirements**
   - Use the template from `.claude/templates/requirements-template.md`
   - Create user stories in "As a [role], I want [feature], so that [benefit]" format
   - Write acceptance criteria in EARS format (WHEN/IF/THEN statements)

5. **Request User Approval**
   - Present the requirements document with reuse opportunities highlighted
   - Ask: "Do the requirements look good? If so, we can move on to the design."
   - Accept only clear affirmative responses; revise until explicitly approved

## Rules
- Only create ONE spec at a time
- Always use kebab-case for feature names
- Always analyze the existing codebase before writing requirements
- Do not proceed without explicit user approval
- Do NOT run task command generation during /spec-create

## Example
```
/spec-create user-authentication "Allow users to sign up and log in securely"
```

## Next Steps
After user approval, proceed to `/spec-design`.
"#
}

pub fn spec_requirements_command() -> &'static str {
    r#"# Spec Requirements Command

Generate or update requirements document for an existing spec.

## Usage
```
/spec-requirements [feature-name]
```

## Phase Overview
**Your Role**: Generate comprehensive requirements based on user input

This is Phase 1 of the spec workflow.

## Instructions

1. **Identify Current Spec**
   - If no feature-name provided, look for specs in `.claude/specs/`
   - If multiple specs exist, ask the user to specify which one

2. **Load Context**
   - Load steering documents (product.md, tech.md, structure.md) if present
   - Analyze the codebase for similar features and patterns

3. **Generate Requirements Document**
   - Use EARS format (Easy Approach to Requirements Syntax)
   - Each requirement has a user story plus numbered acceptance criteria:
     "WHEN [event] THEN [system] SHALL [response]"
   - Include non-functional requirements (performance, security, reliability)
   - Ensure requirements support the goals outlined in product.md

## Requirements Format
```markdown
# Requirements Document

## Introduction
[Brief summary of the feature]

## Requirements

### Requirement 1
**User Story:** As a [role], I want [feature], so that [benefit]

#### Acceptance Criteria
1. WHEN [event] THEN [system] SHALL [response]
2. IF [condition] THEN [system] SHALL [response]
```

## Critical Rules
- **NEVER** proceed to the next phase without explicit user approval
- If the user provides feedback, revise and ask for approval again

## Next Phase
After approval, proceed to `/spec-design`.
"#
}

pub fn spec_design_command() -> &'static str {
    r#"# Spec Design Command

Generate design document based on approved requirements.

## Usage
```
/spec-design [feature-name]
```

## Phase Overview
**Your Role**: Create technical architecture and design

This is Phase 2 of the spec workflow.

## Instructions

1. **Prerequisites**
   - Ensure requirements.md exists and is approved in `.claude/specs/{feature-name}/`
   - Load steering documents (tech.md, structure.md, product.md) if present

2. **Codebase Research** (MANDATORY)
   - Map existing patterns: data models, API patterns, component structures
   - Catalog reusable utilities, helpers, and middleware
   - Identify integration points with existing auth, storage, and APIs
   - Note what needs to be built vs. what can be reused or extended

3. **Create Design Document**
   - Sections: Overview, Architecture (with Mermaid diagrams), Components and
     Interfaces, Data Models, Error Handling, Testing Strategy
   - Build on existing patterns rather than creating new ones
   - Follow tech.md standards and structure.md conventions

4. **Approval Process**
   - Present the complete design, highlighting code reuse
   - Ask: "Does the design look good? If so, we can move on to the implementation plan."
   - Revise until explicit approval is received

## Critical Rules
- **NEVER** proceed to the next phase without explicit user approval

## Next Phase
After approval, proceed to `/spec-tasks`.
"#
}

pub fn spec_tasks_command() -> &'static str {
    r#"# Spec Tasks Command

Generate implementation task list based on approved design.

## Usage
```
/spec-tasks [feature-name]
```

## Phase Overview
**Your Role**: Break design into executable implementation tasks

This is Phase 3 of the spec workflow, and the FINAL step before command
generation. Sequence: Create Tasks -> Get Approval -> Ask User -> Generate Commands.

## Instructions

1. **Prerequisites**
   - Ensure design.md exists and is approved in `.claude/specs/{feature-name}/`
   - Load requirements.md and design.md for complete context
   - Load steering documents (structure.md, tech.md) if present

2. **Generate Task List**
   - Break the design into atomic, executable coding tasks
   - Each task references specific requirements using `_Requirements: X.Y_`
   - Reference existing code to reuse using `_Leverage: path/to/file_`
   - Focus ONLY on coding tasks (no deployment, user testing, training)
   - Build incrementally; each task builds on previous tasks

### Task Format
Use this exact format for all tasks:

```markdown
- [ ] 1. Task description
  - Specific implementation details
  - _Requirements: 1.1, 2.3_
  - _Leverage: existing-component.ts, utils/helpers.js_

- [ ] 2. Another task description
  - _Requirements: 2.1_

- [ ] 2.1 Subtask description
  - _Requirements: 2.1_
  - _Leverage: shared/component.ts_
```

**Format Rules:**
- Start with `- [ ]` (dash, space, brackets with a space inside)
- Follow with the task number and period: `1.` or `2.1`
- Add metadata lines with `_Requirements:` and `_Leverage:` as needed

3. **Approval Process**
   - Present the complete task list
   - Ask: "Do the tasks look good?"
   - Revise until explicit approval is received

4. **Generate Task Commands** (ONLY after tasks approval)
   - Ask: "Would you like me to generate individual task commands for easier
     execution? (yes/no)"
   - **IF YES**: Execute `specflow generate-task-commands {feature-name}`
   - **IF NO**: Continue with the traditional `/spec-execute` approach
   - Generated commands live in `.claude/commands/{feature-name}/` and are
     invoked as `/{feature-name}-task-{task-id}`
   - Inform the user to restart Claude Code for new commands to be visible

## Next Phase
After approval and command generation:
- Use `/spec-execute` or the individual task commands to implement
- Check progress with `/spec-status {feature-name}`
"#
}

pub fn spec_execute_command() -> &'static str {
    r#"# Spec Execute Command

Execute specific tasks from the approved task list.

## Usage
```
/spec-execute [task-id] [feature-name]
```

## Phase Overview
**Your Role**: Execute tasks systematically with validation

This is Phase 4 of the spec workflow.

## Instructions

1. **Prerequisites**
   - Load requirements.md, design.md, and tasks.md from
     `.claude/specs/{feature-name}/`
   - Load steering documents (product.md, tech.md, structure.md) if present
   - Identify the specific task to execute

2. **Process**
   - Execute ONLY the specified task (never multiple tasks)
   - Implement following existing code patterns and conventions
   - Validate the implementation against the referenced requirements
   - Run tests and checks if applicable

3. **Task Completion Protocol**
   1. **Update tasks.md**: Change the task status from `- [ ]` to `- [x]`
   2. **Confirm to user**: State clearly "Task X has been marked as complete"
   3. **Stop execution**: Do not proceed to the next task automatically
   4. **Wait for instruction**: Let the user decide next steps

## Task Selection
- If no task-id is given, recommend the next pending task from tasks.md
- If no feature-name is given and only one spec exists, use it; otherwise ask

## Examples
```
/spec-execute 1 user-authentication
/spec-execute 2.1 user-authentication
```

## Important Rules
- Only execute ONE task at a time
- **ALWAYS** mark completed tasks as [x] in tasks.md
- Always stop after completing a task and wait for user approval
- Never skip tasks or jump ahead
"#
}

pub fn spec_auto_run_command() -> &'static str {
    r#"# Spec Auto Run Command

Execute all tasks for a specification automatically without manual intervention.

## Usage
```
/spec-auto-run <spec-name> [options]
```

## Instructions

1. **Prerequisites**
   - Verify `.claude/specs/{spec-name}/` exists with a `tasks.md` file
   - Load requirements.md, design.md, and steering documents for context

2. **Process**
   - Execute: `specflow auto-run-tasks {spec-name}`
   - Monitor execution progress and provide feedback
   - Report completion status and task results

3. **Error Handling**
   - If the spec directory doesn't exist: suggest `/spec-create`
   - If tasks.md is missing: suggest `/spec-tasks`

## Options

- `--mode automatic|interactive`: Execution mode (default: automatic)
- `--tasks <selection>`: Task selection ("all", "1-3", "2,4,6", "2.1-2.3", "1,3-5")
- `--continue-on-error`: Continue execution after task failures
- `--resume-from <task-id>`: Resume from a specific task ID
- `--no-progress`: Suppress detailed progress output

## Task Ordering
Tasks are executed in hierarchical order regardless of selection:
parent tasks before subtasks (2 before 2.1), sequential numbering
(1, 2, 3), subtask ordering (2.1, 2.2, 2.3).

## Execution Modes

### Automatic Mode (Default)
- Executes all selected tasks without interruption
- Stops only on errors (unless --continue-on-error is set)

### Interactive Mode
- Prompts for confirmation before each task
- On failure, offers retry, skip, or abort

## Examples
```bash
/spec-auto-run user-authentication
/spec-auto-run user-authentication --mode interactive --tasks "1-3"
/spec-auto-run user-authentication --resume-from "2.2"
/spec-auto-run user-authentication --continue-on-error
```

## Next Steps
After completion, review the implementation against requirements, run the
test suite, and check progress with `/spec-status {spec-name}`.
"#
}

pub fn spec_status_command() -> &'static str {
    r#"# Spec Status Command

Show current status of all specs or a specific spec.

## Usage
```
/spec-status [feature-name]
```

## Instructions

1. **If no feature-name provided:**
   - List all specs in `.claude/specs/` with their current phase and
     completion status

2. **If feature-name provided:**
   - Show detailed status: current phase, completed vs pending tasks, and
     next recommended actions

3. **Output Format:**
   ```
   Spec: user-authentication
   Phase: Implementation
   Progress: Requirements | Design | Tasks complete
   Implementation: 3/8 tasks complete
   Next: Execute task 4 - "Implement password validation"
   ```

## Workflow Phases
- **Requirements**: Gathering and documenting requirements
- **Design**: Creating technical design and architecture
- **Tasks**: Breaking down into implementation tasks
- **Implementation**: Executing individual tasks
- **Complete**: All tasks finished and integrated
"#
}

pub fn spec_list_command() -> &'static str {
    r#"# Spec List Command

List all specs in the current project.

## Usage
```
/spec-list
```

## Instructions

1. **Scan Directory**
   - Look in `.claude/specs/` for spec directories
   - Check for requirements.md, design.md, and tasks.md in each

2. **Display Information**
   - Feature name, current phase, completion status, last modified date,
     and a brief description from the requirements

3. **Output Format**
   ```
   Project Specs Overview

   1. user-authentication (Complete)
      Phase: Implementation (7/8 tasks)
      Last updated: 2025-01-15

   2. data-export (In Progress)
      Phase: Design
      Last updated: 2025-01-14
   ```

4. **Additional Actions**
   - Show the total spec count and suggest next actions for each spec
"#
}

pub fn spec_steering_setup_command() -> &'static str {
    r#"# Spec Steering Setup Command

Create or update steering documents that provide persistent project context.

## Usage
```
/spec-steering-setup
```

## Instructions

You are setting up steering documents that guide all future spec development.

## Process

1. **Check for Existing Steering Documents**
   - Look for `.claude/steering/` with product.md, tech.md, structure.md
   - If they exist, load and display the current content

2. **Analyze the Project**
   - Review package manifests, README files, configuration, and source
     structure to understand the project type, stack, and conventions

3. **Present Inferred Details**
   - Show what you learned about the product, technology stack, and
     project structure
   - Ask: "Do these inferred details look correct? Please let me know which
     ones to keep or discard."

4. **Gather Missing Information**
   - Ask targeted questions about the problem the product solves, primary
     users, technical constraints, coding standards, and testing requirements

5. **Generate Steering Documents**
   - Create `.claude/steering/` if it doesn't exist and write three files:
     - **product.md**: Product vision, users, features, objectives
     - **tech.md**: Technology stack, tools, constraints, decisions
     - **structure.md**: File organization, naming conventions, patterns

6. **Review and Confirm**
   - Present the generated documents and ask for approval before saving

## Important Notes
- Steering documents are persistent and referenced by all spec commands
- Keep each document focused on its specific domain
- Never include sensitive data (passwords, API keys, credentials)
"#
}

pub fn bug_create_command() -> &'static str {
    r#"# Bug Create Command

Initialize a new bug fix workflow for tracking and resolving bugs.

## Usage
```
/bug-create <bug-name> [description]
```

## Workflow Overview

This is the streamlined bug fix workflow, a lighter alternative to the full
spec workflow for addressing bugs and issues.

### Bug Fix Phases
1. **Report Phase** (this command) - Document the bug
2. **Analysis Phase** (`/bug-analyze`) - Investigate root cause
3. **Fix Phase** (`/bug-fix`) - Implement solution
4. **Verification Phase** (`/bug-verify`) - Confirm resolution

## Instructions

1. **Create Directory Structure**
   - Create `.claude/bugs/{bug-name}/` directory
   - Initialize report.md, analysis.md, and verification.md files

2. **Load Context** (if available)
   - Check .claude/steering/tech.md and structure.md for project context

3. **Generate Bug Report**
   - Use the template from `.claude/templates/bug-report-template.md`
   - Include expected vs actual behavior, steps to reproduce, environment
     details, impact assessment, and initial analysis

4. **Save and Proceed**
   - Save the completed report to report.md
   - Ask: "Is this bug report accurate? If so, we can move on to the analysis."
   - Wait for explicit approval before proceeding

## Rules
- Only create ONE bug fix at a time
- Always use kebab-case for bug names
- Do not proceed without user approval between phases

## Example
```
/bug-create login-timeout "Users getting logged out too quickly"
```

## Next Steps
After bug report approval, proceed to `/bug-analyze`.
"#
}

pub fn bug_analyze_command() -> &'static str {
    r#"# Bug Analyze Command

Investigate and analyze the root cause of a reported bug.

## Usage
```
/bug-analyze [bug-name]
```

## Phase Overview
**Your Role**: Investigate the bug and identify the root cause

This is Phase 2 of the bug fix workflow.

## Instructions

1. **Prerequisites**
   - Ensure report.md exists and is complete; load it for context
   - Load steering documents (tech.md, structure.md) if present

2. **Investigation Process**
   - Search the codebase for the relevant functionality
   - Map data flow and identify potential failure points
   - Determine the underlying cause, not just the symptom
   - Design a fix strategy and plan the testing approach

3. **Create Analysis Document**
   - Document findings in analysis.md: root cause, affected code locations,
     fix strategy, alternatives considered, and implementation plan

4. **Approval Process**
   - Present the complete analysis
   - Ask: "Does this analysis look correct? If so, we can proceed to implement the fix."
   - Revise until explicit approval is received

## Analysis Guidelines
- Don't just fix symptoms; find the real cause
- Prefer minimal, targeted fixes that reuse existing patterns
- Understand why existing tests didn't catch the bug

## Next Phase
After approval, proceed to `/bug-fix`.
"#
}

pub fn bug_fix_command() -> &'static str {
    r#"# Bug Fix Command

Implement the fix for the analyzed bug.

## Usage
```
/bug-fix [bug-name]
```

## Phase Overview
**Your Role**: Implement the solution based on the approved analysis

This is Phase 3 of the bug fix workflow.

## Instructions

1. **Prerequisites**
   - Ensure analysis.md exists and is approved
   - Load report.md and analysis.md for complete context
   - Load steering documents (tech.md, structure.md) if present

2. **Implementation Process**
   - Execute changes exactly as outlined in analysis.md
   - Make targeted, minimal changes following existing conventions
   - Add appropriate error handling and regression tests

3. **Testing Requirements**
   - Test the specific bug scenario from the report
   - Verify related functionality still works
   - Run the existing test suite if available

4. **Confirm Completion**
   - Present a summary of the changes and test results
   - Ask: "The fix has been implemented. Should we proceed to verification?"
   - Wait for user approval before proceeding

## Critical Rules
- **ONLY** implement the fix outlined in the approved analysis
- **NEVER** make changes beyond the planned fix scope
- **MUST** wait for user approval before proceeding to verification

## Next Phase
After approval, proceed to `/bug-verify`.
"#
}

pub fn bug_verify_command() -> &'static str {
    r#"# Bug Verify Command

Verify that the bug fix works correctly and doesn't introduce regressions.

## Usage
```
/bug-verify [bug-name]
```

## Phase Overview
**Your Role**: Thoroughly verify the fix works and document the results

This is Phase 4 (final) of the bug fix workflow.

## Instructions

1. **Prerequisites**
   - Ensure the fix has been implemented
   - Load report.md and analysis.md for context

2. **Verification Process**
   - Reproduce the original steps from report.md and verify the bug no
     longer occurs
   - Test edge cases mentioned in the analysis
   - Run regression tests on related functionality
   - Review the code changes for quality and project standards

3. **Create Verification Document**
   - Record results in verification.md: fix summary, test results,
     code quality checks, and a closure checklist

### Verification Structure
```markdown
## Fix Implementation Summary
[Brief description of what was changed]

## Test Results
- Original Bug Reproduction: [Before/After results]
- Regression Testing: [Related functionality status]

## Closure Checklist
- [ ] Original issue resolved
- [ ] No regressions introduced
- [ ] Tests passing
```

4. **Final Approval**
   - Present the verification results
   - Ask: "The bug fix has been verified successfully. Is this bug resolved?"
   - Get final confirmation before closing

## Critical Rules
- **THOROUGHLY** test the original bug scenario
- **VERIFY** no regressions in related functionality
- **GET** final user approval before considering the bug resolved
"#
}

pub fn bug_status_command() -> &'static str {
    r#"# Bug Status Command

Show current status of all bug fixes or a specific bug fix.

## Usage
```
/bug-status [bug-name]
```

## Instructions

1. **If no bug-name provided:**
   - List all bugs in `.claude/bugs/` with their current phase

2. **If bug-name provided:**
   - Show detailed status: current phase, completed vs pending phases, and
     next recommended actions

3. **Output Format:**
   ```
   Bug: login-timeout
   Phase: Fix Implementation
   Progress: Report and Analysis complete, Fix in progress
   Next: Complete implementation and verify fix works
   ```

## Bug Fix Phases
- **Report**: Bug description and impact assessment
- **Analysis**: Root cause investigation and solution planning
- **Fix**: Implementation of the planned solution
- **Verification**: Testing and confirmation of resolution
- **Complete**: Bug fully resolved and verified
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_commands_present() {
        let commands = all_commands();
        assert_eq!(commands.len(), 14);

        let names: Vec<&str> = commands.iter().map(|(name, _)| *name).collect();
        assert!(names.contains(&"spec-create.md"));
        assert!(names.contains(&"spec-auto-run.md"));
        assert!(names.contains(&"bug-verify.md"));
    }

    #[test]
    fn test_commands_are_markdown_documents() {
        for (name, content) in all_commands() {
            assert!(content.starts_with("# "), "{} should start with a heading", name);
            assert!(content.contains("## Usage"), "{} should document usage", name);
        }
    }

    #[test]
    fn test_auto_run_references_cli() {
        assert!(spec_auto_run_command().contains("specflow auto-run-tasks"));
        assert!(spec_tasks_command().contains("specflow generate-task-commands"));
    }
}
