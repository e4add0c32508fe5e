//! HTML rendering of the report document.
//!
//! The output is a single self-contained file: inline CSS, no scripts, no
//! external references. Narrative fields are inserted verbatim because the
//! model is asked to return presentational HTML; table cells and the file
//! name are escaped.

use std::fmt::Write as _;

use relata_core::{RenderedReport, ReportSection, StructuredReport, TabularDataset};

const DOCUMENT_TITLE: &str = "Relatório de Produtividade";

const CSS: &str = "\
body { background-color: white !important; color: black !important; font-family: sans-serif; margin: 2rem; }
h1, h2, h3, h4, h5, h6, p, th, td { color: black !important; }
table { width: 100%; border-collapse: collapse; font-family: sans-serif; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: left; }
tr:nth-child(even) { background-color: #f2f2f2; }";

/// Escape text for use inside HTML element content or attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render every row of `dataset` as an HTML table.
#[must_use]
pub fn dataset_to_html(dataset: &TabularDataset) -> String {
    let mut html = String::with_capacity(64 * (dataset.row_count() + 1) * dataset.column_count().max(1));

    html.push_str("<table border=\"1\" class=\"dataframe table table-striped table-hover\">\n");
    html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
    for column in dataset.columns() {
        let _ = writeln!(html, "      <th>{}</th>", escape_html(column));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in dataset.rows() {
        html.push_str("    <tr>\n");
        for cell in row {
            let _ = writeln!(html, "      <td>{}</td>", escape_html(&cell.to_string()));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

/// Narrative sections in document order.
const SECTION_HEADINGS: [(ReportSection, &str); 3] = [
    (ReportSection::ExecutiveSummary, "Sumário Executivo"),
    (ReportSection::Insights, "Análise e Insights"),
    (ReportSection::Recommendations, "Recomendações"),
];

/// Assemble the full report document.
#[must_use]
pub fn render_report(
    report: &StructuredReport,
    display_name: &str,
    table_html: &str,
) -> RenderedReport {
    let mut html = String::with_capacity(
        4096 + report.executive_summary.len()
            + report.insights.len()
            + report.recommendations.len()
            + table_html.len(),
    );

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    let _ = writeln!(html, "<title>{DOCUMENT_TITLE}</title>");
    let _ = writeln!(html, "<style>\n{CSS}\n</style>");
    html.push_str("</head>\n<body>\n");

    let _ = writeln!(
        html,
        "<h1>{} - {}</h1>",
        report.title,
        escape_html(display_name)
    );
    for (section, heading) in SECTION_HEADINGS {
        let _ = writeln!(html, "<h2>{heading}</h2>\n{}", report.section(section));
    }

    html.push_str("<br><h3>Dados Brutos</h3>\n");
    html.push_str("<p>A tabela abaixo contém todos os dados completos da planilha.</p>\n");
    html.push_str(table_html);
    html.push_str("\n</body>\n</html>\n");

    RenderedReport::new(html)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use relata_core::CellValue;

    use super::*;

    fn report() -> StructuredReport {
        StructuredReport {
            title: "Banco de Horas".into(),
            executive_summary: "<p>Resumo <b>forte</b>.</p>".into(),
            insights: "<p>Insights.</p>".into(),
            recommendations: "<ul><li>Um</li></ul>".into(),
            degraded: Vec::new(),
        }
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn table_escapes_cells_and_headers() {
        let dataset = TabularDataset::new(
            vec!["<col>".into()],
            vec![vec![CellValue::Text("R&D".into())]],
        )
        .unwrap();
        let html = dataset_to_html(&dataset);
        assert!(html.contains("<th>&lt;col&gt;</th>"));
        assert!(html.contains("<td>R&amp;D</td>"));
        assert!(html.starts_with("<table"));
        assert!(html.ends_with("</table>"));
    }

    #[test]
    fn document_is_self_contained() {
        let html = render_report(&report(), "dados.csv", "<table></table>");
        let text = html.as_str();
        assert!(text.starts_with("<!DOCTYPE html>"));
        assert!(text.contains("<meta charset=\"UTF-8\">"));
        assert!(text.contains("<style>"));
        assert!(!text.contains("<link"));
        assert!(!text.contains("<script"));
        assert!(!text.contains("src="));
    }

    #[test]
    fn narrative_fields_are_verbatim_and_name_is_escaped() {
        let html = render_report(&report(), "<dados>.csv", "<table></table>");
        let text = html.as_str();
        assert!(text.contains("<h1>Banco de Horas - &lt;dados&gt;.csv</h1>"));
        assert!(text.contains("<p>Resumo <b>forte</b>.</p>"));
        assert!(text.contains("<ul><li>Um</li></ul>"));
    }

    #[test]
    fn sections_appear_in_order() {
        let html = render_report(&report(), "d.csv", "<table id=\"raw\"></table>");
        let text = html.as_str();
        let positions: Vec<usize> = [
            "<h1>",
            "Sumário Executivo",
            "Análise e Insights",
            "Recomendações",
            "Dados Brutos",
            "<table id=\"raw\">",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap())
        .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
