// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rich terminal formatter for diagnostics.
//!
//! ```text
//! error[E0210]: Dynamic offset "@1" is already defined.
//!   --> script.rbc:3:6
//!    |
//!  2 | #org @1
//!    |      -- first defined here
//!  3 | #org @1
//!    |      ^^ redefined here
//! ```

use std::collections::BTreeMap;

use colored::Colorize;

use genscript_ast::LineMap;

use crate::{Diagnostic, Help, LabelStyle, Severity};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// A source line with its labels.
struct AnnotatedLine {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation>,
}

struct Annotation {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<String>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let Some(primary) = diagnostic.primary_span() else {
            self.format_footer(&mut out, diagnostic);
            return out;
        };
        let annotated = self.collect_annotated_lines(diagnostic);

        // --> file:line:col
        let file = self.file_name.unwrap_or("<source>");
        let (line, col) = self.offset_to_line_col(primary.start);
        out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, line, col));

        let max_line = annotated.last().map_or(1, |a| a.line_num);
        let gutter_width = max_line.to_string().len().max(2);

        out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));

        let mut prev_line_num: Option<usize> = None;
        for annotated_line in &annotated {
            if let Some(prev) = prev_line_num {
                if annotated_line.line_num > prev + 1 {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
            }

            let number = format!("{:>width$}", annotated_line.line_num, width = gutter_width + 1);
            out.push_str(&format!("{} {} {}\n", number.blue().bold(), "|".blue(), annotated_line.text));
            self.format_annotations(&mut out, annotated_line, gutter_width);

            prev_line_num = Some(annotated_line.line_num);
        }

        self.format_footer(&mut out, diagnostic);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity_str = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".blue().bold(),
        };

        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                code.0.as_str().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity_str, diagnostic.message.bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic) {
        let gutter_width = 2;

        for note in &diagnostic.notes {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter_width + 1),
                "=".cyan(),
                "note".cyan().bold(),
                note
            ));
        }

        if let Some(ref help) = diagnostic.help {
            self.format_help(out, help, gutter_width);
        }
    }

    fn format_help(&self, out: &mut String, help: &Help, gutter_width: usize) {
        out.push_str(&format!(
            "{} {} {}: {}\n",
            " ".repeat(gutter_width + 1),
            "=".cyan(),
            "help".cyan().bold(),
            help.message
        ));

        let Some(ref suggestion) = help.suggestion else {
            return;
        };
        let (line, col) = self.offset_to_line_col(suggestion.span.start);
        let Some(source_line) = self.get_line(line) else {
            return;
        };

        // The line with the replacement applied, then tildes under it.
        let start = col.saturating_sub(1).min(source_line.len());
        let end = (start + suggestion.span.len()).min(source_line.len());
        let prefix = source_line.get(..start).unwrap_or("");
        let suffix = source_line.get(end..).unwrap_or("");

        out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
        let number = format!("{:>width$}", line, width = gutter_width + 1);
        out.push_str(&format!(
            "{} {} {}{}{}\n",
            number.blue().bold(),
            "|".blue(),
            prefix,
            suggestion.replacement.green(),
            suffix,
        ));
        out.push_str(&format!(
            "{} {} {}{}\n",
            " ".repeat(gutter_width + 1),
            "|".blue(),
            " ".repeat(start),
            "~".repeat(suggestion.replacement.len()).green(),
        ));
    }

    fn collect_annotated_lines(&self, diagnostic: &Diagnostic) -> Vec<AnnotatedLine> {
        let mut lines_map: BTreeMap<usize, AnnotatedLine> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.offset_to_line_col(label.span.end);

            // Multi-line spans only annotate their first line.
            let effective_col_end = if end_line == line_num {
                col_end
            } else {
                self.get_line(line_num).map_or(0, str::len) + 1
            };

            let entry = lines_map.entry(line_num).or_insert_with(|| AnnotatedLine {
                line_num,
                text: self.get_line(line_num).unwrap_or("").to_string(),
                annotations: Vec::new(),
            });

            entry.annotations.push(Annotation {
                col_start,
                // Zero-length spans still get one caret.
                col_end: effective_col_end.max(col_start + 1),
                style: label.style,
                message: label.message.clone(),
            });
        }

        lines_map.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, annotated_line: &AnnotatedLine, gutter_width: usize) {
        let mut sorted: Vec<&Annotation> = annotated_line.annotations.iter().collect();
        sorted.sort_by_key(|a| (a.style.priority(), a.col_start));

        let line_len = annotated_line.text.len() + 2;
        let mut underline = vec![' '; line_len];
        let mut messages: Vec<(usize, LabelStyle, &str)> = Vec::new();

        for ann in &sorted {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            let end = ann.col_end.saturating_sub(1).min(line_len);
            for slot in underline.iter_mut().take(end).skip(ann.col_start - 1) {
                *slot = ch;
            }
            if let Some(ref msg) = ann.message {
                messages.push((ann.col_start, ann.style, msg));
            }
        }

        let underline_str: String = underline.iter().collect::<String>().trim_end().to_string();
        if underline_str.is_empty() {
            return;
        }
        let colored_underline = color_underline(&underline_str);
        let margin = format!("{} {}", " ".repeat(gutter_width + 1), "|".blue());

        match messages.as_slice() {
            [] => out.push_str(&format!("{} {}\n", margin, colored_underline)),
            [(_, style, msg)] => out.push_str(&format!("{} {} {}\n", margin, colored_underline, styled(msg, *style))),
            _ => {
                out.push_str(&format!("{} {}\n", margin, colored_underline));
                for (col, style, msg) in messages.iter().rev() {
                    out.push_str(&format!(
                        "{} {}{} {}\n",
                        margin,
                        " ".repeat(col.saturating_sub(1)),
                        styled("|", *style),
                        styled(msg, *style),
                    ));
                }
            }
        }
    }

    /// Convert byte offset to (line, col), both 1-based.
    fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let (line, col) = self.line_map.offset_to_line_col(offset);
        (line as usize, col as usize)
    }

    /// Get source line text by 1-based line number.
    fn get_line(&self, line_num: usize) -> Option<&str> {
        self.line_map.line_text(self.source, line_num as u32)
    }
}

impl LabelStyle {
    fn priority(&self) -> u8 {
        match self {
            LabelStyle::Primary => 0,
            LabelStyle::Secondary => 1,
        }
    }
}

fn styled(text: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => text.red().bold().to_string(),
        LabelStyle::Secondary => text.blue().to_string(),
    }
}

/// Color the underline characters (^ in red, - in blue).
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut current_char = None;
    let mut run = String::new();

    for ch in s.chars() {
        let kind = match ch {
            '^' | '-' => Some(ch),
            _ => None,
        };
        if kind != current_char && !run.is_empty() {
            result.push_str(&flush_run(&run, current_char));
            run.clear();
        }
        run.push(ch);
        current_char = kind;
    }

    if !run.is_empty() {
        result.push_str(&flush_run(&run, current_char));
    }
    result
}

fn flush_run(run: &str, kind: Option<char>) -> String {
    match kind {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}
