use std::io::Write;

use owo_colors::OwoColorize;
use sectioner_core::{ExtractionStats, SectionRecord};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Record output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
    /// `Section i: <title> (Page n)` blocks
    Text,
}

pub fn write_sections(
    w: &mut dyn Write,
    sections: &[SectionRecord],
    format: OutputFormat,
    color: ColorMode,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, sections)?;
            writeln!(w)?;
        }
        OutputFormat::Jsonl => {
            for section in sections {
                serde_json::to_writer(&mut *w, section)?;
                writeln!(w)?;
            }
        }
        OutputFormat::Text => print_text_sections(w, sections, color)?,
    }
    Ok(())
}

fn print_text_sections(
    w: &mut dyn Write,
    sections: &[SectionRecord],
    color: ColorMode,
) -> std::io::Result<()> {
    for (i, section) in sections.iter().enumerate() {
        let header = format!(
            "Section {}: {} (Page {})",
            i + 1,
            section.title,
            section.page_number
        );
        if color.enabled() {
            writeln!(w, "{}", header.bold().cyan())?;
        } else {
            writeln!(w, "{}", header)?;
        }
        writeln!(w, "{}", section.text)?;
        writeln!(w)?;
    }
    Ok(())
}

/// Print the run summary.
pub fn print_summary(
    w: &mut dyn Write,
    file_name: &str,
    sections: usize,
    stats: &ExtractionStats,
    color: ColorMode,
) -> std::io::Result<()> {
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{} {}", "SUMMARY".bold(), file_name.bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "SUMMARY {}", file_name)?;
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "  Pages: {}", stats.pages_total)?;
    if color.enabled() {
        writeln!(w, "  {} {}", "Sections:".green(), sections)?;
    } else {
        writeln!(w, "  Sections: {}", sections)?;
    }

    let lines = format!(
        "Lines: {} titles, {} junk, {} content",
        stats.title_lines, stats.junk_lines, stats.content_lines
    );
    if color.enabled() {
        writeln!(w, "  {}", lines.dimmed())?;
    } else {
        writeln!(w, "  {}", lines)?;
    }

    if stats.filtered_short > 0 {
        let msg = format!("Dropped (text too short): {}", stats.filtered_short);
        if color.enabled() {
            writeln!(w, "  {}", msg.dimmed())?;
        } else {
            writeln!(w, "  {}", msg)?;
        }
    }
    if stats.pages_unreadable > 0 {
        if color.enabled() {
            writeln!(w, "  {} {}", "Unreadable pages:".yellow(), stats.pages_unreadable)?;
        } else {
            writeln!(w, "  Unreadable pages: {}", stats.pages_unreadable)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SectionRecord> {
        vec![
            SectionRecord::new(1, "1. Cover", "hospital stays", "p.pdf"),
            SectionRecord::new(2, "General Information", "continued", "p.pdf"),
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_sections(&mut buf, &sample(), format, ColorMode(false)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_format() {
        assert_eq!(
            render(OutputFormat::Text),
            "Section 1: 1. Cover (Page 1)\nhospital stays\n\n\
             Section 2: General Information (Page 2)\ncontinued\n\n"
        );
    }

    #[test]
    fn test_jsonl_one_record_per_line() {
        let out = render(OutputFormat::Jsonl);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["page_number"], 2);
        assert_eq!(second["title"], "General Information");
    }

    #[test]
    fn test_json_array() {
        let parsed: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
        assert_eq!(parsed[0]["text"], "hospital stays");
    }

    #[test]
    fn test_summary_mentions_unreadable_pages() {
        let stats = ExtractionStats {
            pages_total: 3,
            pages_unreadable: 1,
            ..Default::default()
        };
        let mut buf = Vec::new();
        print_summary(&mut buf, "p.pdf", 2, &stats, ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Pages: 3"));
        assert!(out.contains("Sections: 2"));
        assert!(out.contains("Unreadable pages: 1"));
        assert!(!out.contains("Dropped"));
    }
}
