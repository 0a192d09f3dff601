//! Notebook to HTML export.
//!
//! Reads a Jupyter `.ipynb` document and writes a standalone page: markdown
//! cells rendered to HTML, code cells escaped inside `<pre>`, Vega-Lite
//! outputs embedded with `vegaEmbed`, and PNG outputs inlined as data URIs.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;
use serde_json::{Map, Value as Json};

use crate::error::{Error, Result};

const HEADER: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
  <style>
  .code {
    padding: 10px;
    margin: 5px;
    border-radius: 5px;
    background: #f7f7f7;
    border: 1px solid #cfcfcf;
  }
  body {
    font-family: -apple-system,BlinkMacSystemFont,avenir next,avenir,helvetica,helvetica neue,ubuntu,roboto,noto,segoe ui,arial,sans-serif
  }
  .code > pre {
    margin: 0px;
  }
  </style>
</head>
<body>
"#;

const FOOTER: &str = "</body>\n</html>\n";

const VEGA_LITE_MIME_PREFIX: &str = "application/vnd.vegalite.v";
const PNG_MIME: &str = "image/png";

/// Cell source: one string or a list of lines.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Whole text.
    Text(String),
    /// Lines, each keeping its trailing newline.
    Lines(Vec<String>),
}

impl Default for Source {
    fn default() -> Self {
        Source::Text(String::new())
    }
}

impl Source {
    /// The joined text.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Source::Text(text) => text.clone(),
            Source::Lines(lines) => lines.concat(),
        }
    }
}

/// One output of a code cell.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Output {
    /// Mime bundle. Stream and error outputs have none.
    #[serde(default)]
    pub data: Map<String, Json>,
}

impl Output {
    /// The first Vega-Lite spec in the bundle, any schema version.
    #[must_use]
    pub fn vega_lite(&self) -> Option<&Json> {
        self.data
            .iter()
            .find(|(mime, _)| mime.starts_with(VEGA_LITE_MIME_PREFIX) && mime.ends_with("+json"))
            .map(|(_, spec)| spec)
    }

    /// The base64 PNG payload, whitespace removed.
    #[must_use]
    pub fn png(&self) -> Option<String> {
        let text = match self.data.get(PNG_MIME)? {
            Json::String(s) => s.clone(),
            Json::Array(lines) => lines.iter().filter_map(Json::as_str).collect(),
            _ => return None,
        };
        Some(text.split_whitespace().collect())
    }
}

/// A notebook cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    /// Markdown text.
    Markdown {
        /// Cell source.
        #[serde(default)]
        source: Source,
    },
    /// Code with its outputs.
    Code {
        /// Cell source.
        #[serde(default)]
        source: Source,
        /// Execution outputs.
        #[serde(default)]
        outputs: Vec<Output>,
    },
    /// Raw text, not exported.
    Raw {
        /// Cell source.
        #[serde(default)]
        source: Source,
    },
}

/// A Jupyter notebook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notebook {
    /// Cells in document order.
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Parse notebook JSON.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] on invalid JSON, [`Error::Notebook`] when the document
    /// is not a notebook.
    pub fn parse(json: &str) -> Result<Self> {
        let value: Json = serde_json::from_str(json)?;
        if value.get("cells").is_none() {
            return Err(Error::Notebook("missing `cells`".to_string()));
        }
        serde_json::from_value(value).map_err(|e| Error::Notebook(e.to_string()))
    }

    /// Read and parse a notebook file.
    ///
    /// # Errors
    ///
    /// I/O errors, plus those of [`Notebook::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Render as a standalone HTML page.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut body = String::new();
        for (index, cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Markdown { source } => {
                    body.push_str(&format!("<div>{}</div>\n", markdown_to_html(&source.text())));
                }
                Cell::Code { source, outputs } => {
                    body.push_str(&format!(
                        "<div class=\"code\"><pre>{}</pre></div>\n",
                        escape_html(&source.text())
                    ));
                    render_outputs(&mut body, index, outputs);
                }
                Cell::Raw { .. } => {}
            }
        }
        page(&body)
    }
}

fn render_outputs(body: &mut String, index: usize, outputs: &[Output]) {
    let mut embeds = 0;
    for output in outputs {
        if let Some(spec) = output.vega_lite() {
            let id = if embeds == 0 {
                format!("vis{index}")
            } else {
                format!("vis{index}_{embeds}")
            };
            embeds += 1;
            body.push_str(&format!(
                concat!(
                    "<div id=\"{id}\"></div>\n",
                    "<script type=\"text/javascript\">\n",
                    "  var spec = {spec};\n",
                    "  var opt = {{\"renderer\": \"canvas\", \"actions\": false}};\n",
                    "  vegaEmbed(\"#{id}\", spec, opt);\n",
                    "</script>\n"
                ),
                id = id,
                spec = script_json(spec),
            ));
        } else if let Some(png) = output.png() {
            match base64::engine::general_purpose::STANDARD.decode(&png) {
                Ok(_) => body.push_str(&format!("<img src=\"data:image/png;base64,{png}\">\n")),
                Err(e) => log::warn!("skipping invalid PNG output in cell {index}: {e}"),
            }
        }
    }
}

/// Wrap an HTML body in the page template.
pub(crate) fn page(body: &str) -> String {
    let mut out = String::with_capacity(HEADER.len() + body.len() + FOOTER.len());
    out.push_str(HEADER);
    out.push_str(body);
    out.push_str(FOOTER);
    out
}

/// Render CommonMark (with tables) to HTML.
pub(crate) fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Serialize a spec for inline `<script>` use.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the `\uXXXX`
/// escapes decode to the same text, so markup cannot close the script.
fn script_json(spec: &Json) -> String {
    spec.to_string()
        .replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Default output path: the input with an `.html` extension.
#[must_use]
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("html")
}

/// Convert a notebook file to HTML.
///
/// Returns the path written.
///
/// # Errors
///
/// I/O errors, or a malformed notebook.
pub fn convert(input: impl AsRef<Path>, output: Option<&Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);
    let notebook = Notebook::load(input)?;
    fs::write(&output, notebook.render_html())?;
    log::info!("wrote {} ({} cells)", output.display(), notebook.cells.len());
    Ok(output)
}
