use crate::core::classify;
use crate::domain::model::{CommuneRecord, Paragraph, Severity, TaxDetails, TaxNotice};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

/// Everything displayed for one selected commune.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupView<'a> {
    pub commune: &'a CommuneRecord,
    pub notice: TaxNotice,
    pub details: Option<TaxDetails>,
}

impl<'a> LookupView<'a> {
    pub fn for_record(commune: &'a CommuneRecord) -> Self {
        Self {
            commune,
            notice: classify::classify(commune),
            details: classify::details(commune.tax_type),
        }
    }
}

/// Terminal rendering of notices, details sections and candidate lists.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    pub color: bool,
    pub show_links: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            color: false,
            show_links: true,
        }
    }
}

impl TextRenderer {
    pub fn new(color: bool, show_links: bool) -> Self {
        Self { color, show_links }
    }

    /// 色彩只在輸出為終端機時啟用，管線或重導向一律輸出純文字
    pub fn for_output(color: bool, is_terminal: bool, show_links: bool) -> Self {
        Self::new(color && is_terminal, show_links)
    }

    pub fn view(&self, view: &LookupView<'_>) -> String {
        let mut out = self.notice(&view.notice);
        if let Some(details) = &view.details {
            out.push('\n');
            out.push_str(&self.details(details));
        }
        out
    }

    pub fn notice(&self, notice: &TaxNotice) -> String {
        let icon = match notice.severity {
            Severity::Success => "✔",
            Severity::Warning => "⚠",
            Severity::Error => "✖",
        };
        let title = format!("{} {}", icon, notice.title);
        let title = if self.color {
            match notice.severity {
                Severity::Success => title.green().bold().to_string(),
                Severity::Warning => title.yellow().bold().to_string(),
                Severity::Error => title.red().bold().to_string(),
            }
        } else {
            title
        };
        format!("{}\n  {}\n", title, notice.message)
    }

    pub fn details(&self, details: &TaxDetails) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading(&details.conditions_heading));
        for condition in &details.conditions {
            let _ = writeln!(out, "  • {}", self.paragraph(condition));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.heading(&details.alternatives_heading));
        for paragraph in &details.alternatives {
            let _ = writeln!(out, "  {}", self.paragraph(paragraph));
        }
        out
    }

    pub fn candidates(&self, candidates: &[&CommuneRecord]) -> String {
        if candidates.is_empty() {
            return "Aucune commune trouvée.\n".to_string();
        }
        let mut out = String::new();
        for (index, record) in candidates.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} ({})", index + 1, record.name, record.code);
        }
        out
    }

    pub fn record_line(&self, record: &CommuneRecord) -> String {
        format!("{}\t{}\t{}", record.code, record.name, record.tax_type)
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paragraph(&self, paragraph: &Paragraph) -> String {
        if !self.show_links || paragraph.links.is_empty() {
            return paragraph.text.clone();
        }
        let mut text = paragraph.text.clone();
        for link in &paragraph.links {
            let _ = write!(text, " <{}>", link.url);
        }
        text
    }
}

pub fn view_json(view: &LookupView<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}
