//! Embedded templates - default configuration and the Markdown report

use miette::Diagnostic;
use rust_embed::Embed;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::analysis::AnalysisReport;
use crate::cli::helpers::{format_mm, format_num, format_opt, format_p, truncate_str};

/// Embedded template files
#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const CONFIG_TEMPLATE: &str = "config.yaml";
const REPORT_TEMPLATE: &str = "report.md.tera";

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// The commented default configuration file
pub fn config_template() -> Result<String, TemplateError> {
    let file = EmbeddedTemplates::get(CONFIG_TEMPLATE)
        .ok_or_else(|| TemplateError::NotFound(CONFIG_TEMPLATE.to_string()))?;
    String::from_utf8(file.data.into_owned())
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Markdown report renderer using Tera
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    /// Create a renderer with the embedded report template
    pub fn new() -> Result<Self, TemplateError> {
        let file = EmbeddedTemplates::get(REPORT_TEMPLATE)
            .ok_or_else(|| TemplateError::NotFound(REPORT_TEMPLATE.to_string()))?;
        let source = std::str::from_utf8(&file.data)
            .map_err(|e| TemplateError::RenderError(e.to_string()))?;

        let mut tera = Tera::default();
        tera.add_raw_template(REPORT_TEMPLATE, source)
            .map_err(|e| TemplateError::RenderError(e.to_string()))?;
        Ok(Self { tera })
    }

    /// Render a report for the table at `source`
    pub fn render(&self, source: &str, report: &AnalysisReport) -> Result<String, TemplateError> {
        let view = ReportView::new(source, report);
        let context =
            Context::from_serialize(&view).map_err(|e| TemplateError::RenderError(e.to_string()))?;
        self.tera
            .render(REPORT_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

#[derive(Serialize)]
struct NamedValue {
    name: &'static str,
    value: String,
}

#[derive(Serialize)]
struct BandView {
    sigmas: u8,
    coverage: String,
    lower: String,
    upper: String,
}

#[derive(Serialize)]
struct TestView {
    name: String,
    statistic: String,
    p_value: String,
    verdict: String,
}

#[derive(Serialize)]
struct RowView {
    line: usize,
    subject: String,
    min: String,
    max: String,
    mean: String,
    range: String,
}

#[derive(Serialize)]
struct AnomalyView {
    kind: String,
    description: String,
    count: usize,
    rows: Vec<RowView>,
}

#[derive(Serialize)]
struct BoxView {
    min: String,
    q1: String,
    median: String,
    q3: String,
    max: String,
    outliers: usize,
}

/// Report values pre-formatted for the template
#[derive(Serialize)]
struct ReportView {
    source: String,
    rows: usize,
    valid_rows: usize,
    coerced_cells: usize,
    statistics: Vec<NamedValue>,
    std_dev: String,
    guidance: String,
    bands: Vec<BandView>,
    alpha: String,
    seed: Option<String>,
    normality: Vec<TestView>,
    anomalies: Vec<AnomalyView>,
    filter_lo: String,
    filter_hi: String,
    filter_rows: usize,
    filter_mean: String,
    filter_std: String,
    range_box: Option<BoxView>,
}

impl ReportView {
    fn new(source: &str, report: &AnalysisReport) -> Self {
        let s = &report.summary;
        let statistics = vec![
            NamedValue { name: "Count", value: s.count.to_string() },
            NamedValue { name: "Mean (mm)", value: format_mm(s.mean) },
            NamedValue { name: "Standard deviation (mm)", value: format_mm(s.std_dev) },
            NamedValue { name: "Minimum (mm)", value: format_mm(s.min) },
            NamedValue { name: "Maximum (mm)", value: format_mm(s.max) },
            NamedValue { name: "Skewness", value: format_num(s.skewness, 3) },
            NamedValue { name: "Excess kurtosis", value: format_num(s.kurtosis, 3) },
            NamedValue { name: "5th percentile (mm)", value: format_mm(s.percentiles.p5) },
            NamedValue { name: "Median (mm)", value: format_mm(s.percentiles.p50) },
            NamedValue { name: "95th percentile (mm)", value: format_mm(s.percentiles.p95) },
        ];

        let bands = report
            .variability
            .bands
            .iter()
            .map(|b| BandView {
                sigmas: b.sigmas,
                coverage: format!("{}", b.coverage),
                lower: format_mm(b.lower),
                upper: format_mm(b.upper),
            })
            .collect();

        let n = &report.normality;
        let normality = [&n.shapiro_wilk, &n.kolmogorov_smirnov]
            .into_iter()
            .map(|r| TestView {
                name: r.test.to_string(),
                statistic: format_num(r.statistic, 4),
                p_value: format_p(r.p_value),
                verdict: r.verdict.to_string(),
            })
            .collect();

        let anomalies = report
            .anomalies
            .sets()
            .into_iter()
            .map(|set| AnomalyView {
                kind: set.kind.to_string(),
                description: set.description.clone(),
                count: set.count,
                rows: set
                    .rows
                    .iter()
                    .map(|r| RowView {
                        line: r.line,
                        subject: truncate_str(&r.display_label(), 24),
                        min: format_opt(r.min_width),
                        max: format_opt(r.max_width),
                        mean: format_opt(r.mean_width),
                        range: format_opt(r.range_width),
                    })
                    .collect(),
            })
            .collect();

        let (filter_lo, filter_hi) = report
            .filtered
            .range
            .map_or(("n/a".to_string(), "n/a".to_string()), |(lo, hi)| {
                (format_mm(lo), format_mm(hi))
            });

        let range_box = report.charts.range_box.as_ref().map(|b| BoxView {
            min: format_mm(b.min),
            q1: format_mm(b.q1),
            median: format_mm(b.median),
            q3: format_mm(b.q3),
            max: format_mm(b.max),
            outliers: b.outliers.len(),
        });

        Self {
            source: source.to_string(),
            rows: report.rows,
            valid_rows: report.valid_rows,
            coerced_cells: report.coerced_cells,
            statistics,
            std_dev: format_mm(report.variability.std_dev),
            guidance: report.variability.guidance.clone(),
            bands,
            alpha: format!("{}", n.alpha),
            seed: n.seed.map(|s| s.to_string()),
            normality,
            anomalies,
            filter_lo,
            filter_hi,
            filter_rows: report.filtered.rows,
            filter_mean: format_mm(report.filtered.summary.mean),
            filter_std: format_mm(report.filtered.summary.std_dev),
            range_box,
        }
    }
}
