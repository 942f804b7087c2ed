//! Report rendering and output formats.
//!
//! The text templates are fixed wording consumed by CI logs and snapshot
//! tests; JSON and YAML render the structured report value instead.

use crate::registry::ComparisonReport;
use crate::schema::SchemaComparison;

/// Emitted when a report contains any removal. Removals are breaking.
const MAJOR_BUMP_NOTICE: &str = "Since there are deletions, a major version bump is required.";

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Human-readable text with the fixed templates.
    #[default]
    Text,
    Json,
    Yaml,
}

/// Renders a registry comparison in the requested output format.
pub fn render_registry_report(
    report: &ComparisonReport,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(registry_report_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// Renders a schema comparison in the requested output format.
///
/// JSON and YAML serialize the surviving raw ops; text renders the grouped
/// per-entity messages.
pub fn render_schema_comparison(
    comparison: &SchemaComparison,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(schema_comparison_text(comparison)),
        OutputFormat::Json => serde_json::to_string_pretty(&comparison.ops)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(&comparison.ops)
            .map_err(|e| format!("YAML serialization failed: {e}")),
    }
}

fn registry_report_text(report: &ComparisonReport) -> String {
    if !report.has_changes() {
        return "No changes have been detected.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("The following commands and flags have modified: (+ added, - removed)\n\n");

    for command in &report.removed_commands {
        out.push_str(&format!("\t-{command}\n"));
    }
    for command in &report.added_commands {
        out.push_str(&format!("\t+{command}\n"));
    }

    for command in &report.diff_commands {
        out.push_str(&format!("\t {}\n", command.name));
        for entry in command
            .flags
            .iter()
            .chain(&command.flag_chars)
            .chain(&command.aliases)
        {
            let sign = if entry.added { '+' } else { '-' };
            out.push_str(&format!("\t\t{sign}{}\n", entry.name));
        }
    }

    out.push_str(
        "\nCommand or flag differences detected. If intended, please update the snapshot file and run again.\n",
    );

    if report.has_removals() {
        out.push_str(&format!("\n{MAJOR_BUMP_NOTICE}\n"));
    }

    out
}

fn schema_comparison_text(comparison: &SchemaComparison) -> String {
    if !comparison.has_changes() {
        return "No changes have been detected.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("\nFound the following schema changes:\n");
    for group in &comparison.entities {
        out.push_str(&format!("\n{}\n", group.entity));
        for message in &group.messages {
            out.push_str(&format!("  - {message}\n"));
        }
    }
    out.push_str("\nIf intended, please update the schema file(s) and run again.\n");

    if comparison.has_removals() {
        out.push_str(&format!("\n{MAJOR_BUMP_NOTICE}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CommandChanges, compare_registry};
    use crate::schema::compare_schemas;
    use command_snapshot_core::{ChangeEntry, CommandDescriptor, RegistrySnapshot, SchemaDocument};
    use serde_json::json;

    fn sample_report() -> ComparisonReport {
        ComparisonReport {
            added_commands: vec!["bar".to_string()],
            removed_commands: vec!["gone".to_string()],
            diff_commands: vec![CommandChanges {
                name: "foo".to_string(),
                plugin: "plugin-foo".to_string(),
                flags: vec![ChangeEntry::added("json"), ChangeEntry::removed("force")],
                flag_chars: vec![ChangeEntry::added("j")],
                aliases: vec![ChangeEntry::removed("foo:old")],
            }],
        }
    }

    #[test]
    fn test_no_changes_text() {
        let report = ComparisonReport::default();
        let text = render_registry_report(&report, OutputFormat::Text).unwrap();
        assert_eq!(text, "No changes have been detected.\n");
    }

    #[test]
    fn test_registry_text_exact_layout() {
        let text = render_registry_report(&sample_report(), OutputFormat::Text).unwrap();
        let expected = "The following commands and flags have modified: (+ added, - removed)\n\
                        \n\
                        \t-gone\n\
                        \t+bar\n\
                        \t foo\n\
                        \t\t+json\n\
                        \t\t-force\n\
                        \t\t+j\n\
                        \t\t-foo:old\n\
                        \n\
                        Command or flag differences detected. If intended, please update the snapshot file and run again.\n\
                        \n\
                        Since there are deletions, a major version bump is required.\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_additions_only_skip_major_bump_notice() {
        let previous = RegistrySnapshot::from_entries(vec![
            CommandDescriptor::new("foo", "plugin-foo").with_flags(["a"]),
        ]);
        let current = RegistrySnapshot::from_entries(vec![
            CommandDescriptor::new("foo", "plugin-foo").with_flags(["a", "b"]),
        ]);
        let report = compare_registry(&previous, &current);
        let text = render_registry_report(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("\t\t+b"));
        assert!(!text.contains("major version bump"));
    }

    #[test]
    fn test_registry_json_round_trips() {
        let report = sample_report();
        let raw = render_registry_report(&report, OutputFormat::Json).unwrap();
        let back: ComparisonReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_registry_yaml_contains_camel_case_keys() {
        let raw = render_registry_report(&sample_report(), OutputFormat::Yaml).unwrap();
        assert!(raw.contains("addedCommands"));
        assert!(raw.contains("diffCommands"));
    }

    fn schema_comparison() -> SchemaComparison {
        let previous: SchemaDocument = serde_json::from_value(json!({
            "commands": { "x": { "type": "object", "extra": true } }
        }))
        .unwrap();
        let current: SchemaDocument = serde_json::from_value(json!({
            "commands": { "x": { "type": "string" } }
        }))
        .unwrap();
        compare_schemas(&current, &previous)
    }

    #[test]
    fn test_schema_text_exact_layout() {
        let text = render_schema_comparison(&schema_comparison(), OutputFormat::Text).unwrap();
        let expected = "\nFound the following schema changes:\n\
                        \n\
                        commands.x.extra\n\
                        \x20\x20- commands.x.extra was not found in latest schema\n\
                        \n\
                        commands.x.type\n\
                        \x20\x20- commands.x.type was changed from object to string\n\
                        \n\
                        If intended, please update the schema file(s) and run again.\n\
                        \n\
                        Since there are deletions, a major version bump is required.\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_schema_no_changes_text() {
        let doc = SchemaDocument::default();
        let comparison = compare_schemas(&doc, &doc);
        let text = render_schema_comparison(&comparison, OutputFormat::Text).unwrap();
        assert_eq!(text, "No changes have been detected.\n");
    }

    #[test]
    fn test_schema_json_is_the_op_list() {
        let raw = render_schema_comparison(&schema_comparison(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let ops = value.as_array().unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0]["op"], "remove");
        assert_eq!(ops[1]["op"], "replace");
    }
}
