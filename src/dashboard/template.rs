//! Page template
//!
//! The built-in page is the askama template `templates/dashboard.html`. A
//! custom page can be loaded at runtime instead: any HTML document with an
//! element carrying `id="table-body"` (its content is replaced by the rows)
//! and one carrying `id="weightChart"` (the chart canvas). Both are checked
//! once in [`Template::parse`]. The rows and the chart scripts come from the
//! same askama fragments either way, so every cell is escaped by askama.

use askama::Template as _;
use std::path::Path;

use super::error::{DashboardError, DashboardResult};
use super::model::{DashboardView, TableRow};

/// Id of the element whose content is replaced by the table rows
pub const TABLE_BODY_ID: &str = "table-body";

/// Id of the canvas the chart is drawn on
pub const CHART_CANVAS_ID: &str = "weightChart";

/// Chart.js build loaded by the page
pub const DEFAULT_CHART_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Paragraph shown when the workouts could not be loaded
pub const LOAD_ERROR_HTML: &str =
    r#"<p style="color:red;">Error loading data. Make sure data/workouts.json exists.</p>"#;

/// Built-in dashboard page
#[derive(askama::Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    rows: &'a [TableRow],
    table_body_id: &'a str,
    canvas_id: &'a str,
    chart_js_url: &'a str,
    chart_config: Option<String>,
}

/// Table rows spliced into a custom page
#[derive(askama::Template)]
#[template(path = "rows.html")]
struct TableRows<'a> {
    rows: &'a [TableRow],
}

/// Chart bootstrap, or the error paragraph when `chart_config` is `None`
#[derive(askama::Template)]
#[template(path = "scripts.html")]
struct PageScripts<'a> {
    canvas_id: &'a str,
    chart_js_url: &'a str,
    chart_config: Option<String>,
}

/// A validated page template
#[derive(Debug, Clone)]
pub struct Template {
    layout: Layout,
    chart_js_url: String,
}

#[derive(Debug, Clone)]
enum Layout {
    BuiltIn,
    Custom(CustomPage),
}

/// Runtime page with its insertion points located
#[derive(Debug, Clone)]
struct CustomPage {
    source: String,
    /// Byte offset just past the table body's opening tag
    rows_start: usize,
    /// Byte offset of the table body's closing tag
    rows_end: usize,
    /// Byte offset of `</body>`, or the end of the document
    body_end: usize,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            layout: Layout::BuiltIn,
            chart_js_url: DEFAULT_CHART_JS_URL.to_string(),
        }
    }
}

impl Template {
    /// Validate a custom page and locate the insertion points
    pub fn parse(html: impl Into<String>) -> DashboardResult<Self> {
        let source = html.into();

        let (rows_start, rows_end) = element_content(&source, TABLE_BODY_ID)
            .ok_or(DashboardError::MissingElement(TABLE_BODY_ID))?;

        if find_id(&source, CHART_CANVAS_ID).is_none() {
            return Err(DashboardError::MissingElement(CHART_CANVAS_ID));
        }

        let body_end = source
            .rfind("</body>")
            .filter(|idx| *idx >= rows_end)
            .unwrap_or(source.len());

        Ok(Self {
            layout: Layout::Custom(CustomPage {
                source,
                rows_start,
                rows_end,
                body_end,
            }),
            chart_js_url: DEFAULT_CHART_JS_URL.to_string(),
        })
    }

    /// Load and validate a template file
    pub async fn from_file(path: &Path) -> DashboardResult<Self> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DashboardError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(html)
    }

    /// Builder method: load Chart.js from another URL
    pub fn with_chart_js_url(mut self, url: impl Into<String>) -> Self {
        self.chart_js_url = url.into();
        self
    }

    /// Render the page.
    ///
    /// With a view, the table body holds one row per record and the chart
    /// script follows the page content. Without one (load failed), the table
    /// body is left empty, no chart is created and the error paragraph is
    /// shown instead.
    pub fn render(&self, view: Option<&DashboardView>) -> DashboardResult<String> {
        let rows = view.map(|v| v.rows.as_slice()).unwrap_or_default();
        let chart_config = view.and_then(chart_json);

        match &self.layout {
            Layout::BuiltIn => {
                let page = DashboardPage {
                    rows,
                    table_body_id: TABLE_BODY_ID,
                    canvas_id: CHART_CANVAS_ID,
                    chart_js_url: &self.chart_js_url,
                    chart_config,
                };
                Ok(page.render()?)
            }
            Layout::Custom(page) => {
                let rows = TableRows { rows }.render()?;
                let scripts = PageScripts {
                    canvas_id: CHART_CANVAS_ID,
                    chart_js_url: &self.chart_js_url,
                    chart_config,
                }
                .render()?;
                Ok(page.splice(&rows, &scripts))
            }
        }
    }
}

impl CustomPage {
    fn splice(&self, rows: &str, scripts: &str) -> String {
        let mut html = String::with_capacity(self.source.len() + rows.len() + scripts.len() + 1);
        html.push_str(&self.source[..self.rows_start]);
        html.push_str(rows);
        html.push_str(&self.source[self.rows_end..self.body_end]);
        html.push_str(scripts.trim_start());
        html.push('\n');
        html.push_str(&self.source[self.body_end..]);
        html
    }
}

/// Chart config as an inline script literal
fn chart_json(view: &DashboardView) -> Option<String> {
    // `<` only appears inside JSON strings, where \u003c is equivalent
    // and cannot close the script element early.
    match serde_json::to_string(&view.chart) {
        Ok(json) => Some(json.replace('<', "\\u003c")),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize chart config");
            None
        }
    }
}

/// Byte offset of the `id` attribute set to `id`.
///
/// The attribute must start after whitespace, so `data-id="..."` does not
/// count.
fn find_id(html: &str, id: &str) -> Option<usize> {
    [format!("id=\"{}\"", id), format!("id='{}'", id)]
        .iter()
        .filter_map(|attr| {
            html.match_indices(attr.as_str())
                .map(|(idx, _)| idx)
                .find(|&idx| idx > 0 && html.as_bytes()[idx - 1].is_ascii_whitespace())
        })
        .min()
}

/// Content range of the element carrying `id`: from just after its opening
/// tag to the start of its closing tag.
fn element_content(html: &str, id: &str) -> Option<(usize, usize)> {
    let attr = find_id(html, id)?;
    let tag_start = html[..attr].rfind('<')?;
    let tag_name: String = html[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag_name.is_empty() {
        return None;
    }

    let content_start = attr + html[attr..].find('>')? + 1;
    let closing = format!("</{}>", tag_name);
    let content_end = content_start + html[content_start..].find(&closing)?;

    Some((content_start, content_end))
}
