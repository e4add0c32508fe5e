//! Report values flowing from generation to storage.

use std::fmt;

use serde::Serialize;

use crate::dataset::TabularDataset;

/// A single generation request: the dataset plus the uploaded file name.
#[derive(Debug, Clone, Copy)]
pub struct ReportRequest<'a> {
    pub dataset: &'a TabularDataset,
    pub file_name: &'a str,
}

impl<'a> ReportRequest<'a> {
    #[must_use]
    pub const fn new(dataset: &'a TabularDataset, file_name: &'a str) -> Self {
        Self { dataset, file_name }
    }
}

/// One of the four narrative fields returned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Title,
    ExecutiveSummary,
    Insights,
    Recommendations,
}

impl ReportSection {
    pub const ALL: [Self; 4] = [
        Self::Title,
        Self::ExecutiveSummary,
        Self::Insights,
        Self::Recommendations,
    ];

    /// JSON key the model is asked to produce for this section.
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::Title => "titulo",
            Self::ExecutiveSummary => "sumario_executivo",
            Self::Insights => "analise_insights",
            Self::Recommendations => "recomendacoes",
        }
    }

    /// Text used when the model leaves this section out.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Title => "Relatório de Análise",
            Self::ExecutiveSummary => "<p>Não foi possível gerar o sumário executivo.</p>",
            Self::Insights => "<p>Não foi possível gerar a análise.</p>",
            Self::Recommendations => "<p>Não foi possível gerar as recomendações.</p>",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}

/// The four narrative fields, possibly containing inline HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredReport {
    pub title: String,
    pub executive_summary: String,
    pub insights: String,
    pub recommendations: String,
    /// Sections that fell back to their placeholder.
    pub degraded: Vec<ReportSection>,
}

impl StructuredReport {
    #[must_use]
    pub fn section(&self, section: ReportSection) -> &str {
        match section {
            ReportSection::Title => &self.title,
            ReportSection::ExecutiveSummary => &self.executive_summary,
            ReportSection::Insights => &self.insights,
            ReportSection::Recommendations => &self.recommendations,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// A complete, self-contained HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport(String);

impl RenderedReport {
    /// MIME type every rendered report is stored with.
    pub const CONTENT_TYPE: &'static str = "text/html";

    #[must_use]
    pub const fn new(html: String) -> Self {
        Self(html)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An object in the remote bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageObject {
    pub key: String,
    pub content: String,
    pub content_type: String,
}

impl StorageObject {
    #[must_use]
    pub fn html(key: impl Into<String>, report: &RenderedReport) -> Self {
        Self {
            key: key.into(),
            content: report.as_str().to_string(),
            content_type: RenderedReport::CONTENT_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json_keys_match_prompt_contract() {
        let keys: Vec<&str> = ReportSection::ALL.iter().map(|s| s.json_key()).collect();
        assert_eq!(
            keys,
            vec![
                "titulo",
                "sumario_executivo",
                "analise_insights",
                "recomendacoes"
            ]
        );
    }

    #[test]
    fn section_accessor_returns_matching_field() {
        let report = StructuredReport {
            title: "T".into(),
            executive_summary: "S".into(),
            insights: "I".into(),
            recommendations: "R".into(),
            degraded: Vec::new(),
        };
        assert_eq!(report.section(ReportSection::Insights), "I");
        assert!(!report.is_degraded());
    }

    #[test]
    fn storage_object_carries_html_content_type() {
        let report = RenderedReport::new("<html></html>".into());
        let object = StorageObject::html("a.html", &report);
        assert_eq!(object.content_type, "text/html");
        assert_eq!(object.content, "<html></html>");
    }
}
