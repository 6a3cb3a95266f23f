// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Every diagnostic carries the flat `message`/`offset`/`length` triple that
//! editors consume, plus line/column locations and any suggested fix.
//!
//! Use `genscript check --format json` to get this output.

use serde::Serialize;

use genscript_ast::{LineMap, Span};

use crate::codes::ErrorCodeRegistry;
use crate::{Diagnostic, LabelStyle, Severity};

/// A complete JSON diagnostic report for one file.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    pub file: String,
    /// True when there are no errors.
    pub success: bool,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// A single diagnostic in JSON form, enriched with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// "error", "warning", or "note".
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// e.g. "Resolution", "Instruction".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Byte offset of the primary span.
    pub offset: usize,
    /// Byte length of the primary span.
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<JsonSuggestion>,
}

/// A source location with line/column (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub source_line: String,
}

/// A labeled span in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonLabel {
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub start: LineCol,
    pub end: LineCol,
}

/// Line/column pair (1-based).
#[derive(Debug, Serialize)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

/// A concrete text replacement.
#[derive(Debug, Serialize)]
pub struct JsonSuggestion {
    pub span: Span,
    pub replacement: String,
    /// The full line after applying the fix.
    pub result_line: String,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let lines = SourceLines { source, map: LineMap::new(source) };

    let error_count = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
    let warning_count = diagnostics.iter().filter(|d| d.severity == Severity::Warning).count();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: error_count == 0,
        diagnostics: diagnostics
            .iter()
            .map(|d| to_json_diagnostic(d, &lines, &registry))
            .collect(),
        error_count,
        warning_count,
    }
}

struct SourceLines<'a> {
    source: &'a str,
    map: LineMap,
}

impl SourceLines<'_> {
    fn line_col(&self, offset: usize) -> LineCol {
        let (line, column) = self.map.offset_to_line_col(offset);
        LineCol { line: line as usize, column: column as usize, byte_offset: offset }
    }

    fn text(&self, line: usize) -> &str {
        self.map.line_text(self.source, line as u32).unwrap_or("")
    }
}

fn to_json_diagnostic(diag: &Diagnostic, lines: &SourceLines<'_>, registry: &ErrorCodeRegistry) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_ref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_span().map(|span| {
        let at = lines.line_col(span.start);
        SourceLocation {
            line: at.line,
            column: at.column,
            source_line: lines.text(at.line).to_string(),
        }
    });

    let labels = diag
        .labels
        .iter()
        .map(|l| JsonLabel {
            role: l.style,
            message: l.message.clone(),
            start: lines.line_col(l.span.start),
            end: lines.line_col(l.span.end),
        })
        .collect();

    let suggestion = diag.help.as_ref().and_then(|h| h.suggestion.as_ref()).map(|s| {
        let at = lines.line_col(s.span.start);
        let original = lines.text(at.line);
        let start = at.column.saturating_sub(1).min(original.len());
        let end = (start + s.span.len()).min(original.len());
        let result_line = format!(
            "{}{}{}",
            original.get(..start).unwrap_or(""),
            s.replacement,
            original.get(end..).unwrap_or("")
        );
        JsonSuggestion { span: s.span, replacement: s.replacement.clone(), result_line }
    });

    JsonDiagnostic {
        severity: diag.severity,
        code,
        category,
        message: diag.message.clone(),
        offset: diag.offset(),
        length: diag.length(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.as_ref().map(|h| h.message.clone()),
        suggestion,
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;

    #[test]
    fn report_carries_offset_and_length() {
        let source = "#org 0xA\nmsgbox 0xB MSG_FATE\nend";
        let analysis = analyze(source);
        let report = to_json_report(&analysis.diagnostics, source, "script.rbc");
        assert!(!report.success);
        assert_eq!(report.error_count, 1);

        let value = serde_json::to_value(&report).unwrap_or_default();
        let diag = &value["diagnostics"][0];
        assert_eq!(diag["message"], "Symbol \"MSG_FATE\" is not defined.");
        assert_eq!(diag["offset"], 20);
        assert_eq!(diag["length"], 8);
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["code"], "E0212");
        assert_eq!(diag["category"], "Resolution");
        assert_eq!(diag["location"]["line"], 2);
        assert_eq!(diag["location"]["column"], 12);
        assert_eq!(diag["labels"][0]["role"], "primary");
        assert_eq!(diag["suggestion"]["result_line"], "msgbox 0xB MSG_FACE");
    }

    #[test]
    fn clean_report() {
        let report = to_json_report(&[], "end", "script.rbc");
        assert!(report.success);
        assert!(to_json_string(&report).contains("\"diagnostics\": []"));
    }
}
