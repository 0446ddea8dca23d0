//! Standalone HTML export of the résumé document.
//!
//! # Responsibility
//! - Render one self-contained HTML file: inline styles, inline image data.
//! - Derive the export file name from the owner's name.
//!
//! # Invariants
//! - Every user-supplied string passes through `escape_html` before output.
//! - Output depends only on the document; identical input gives identical bytes.
//! - Fixed dashboard tiles render career, education, salary, portfolio, whatever the map order.

use crate::model::document::{
    Document, DashboardTile, TILE_CAREER, TILE_EDUCATION, TILE_PORTFOLIO, TILE_SALARY,
};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static UNSAFE_FILE_CHARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[/\\:*?"<>|\x00-\x1f\x7f]"#).expect("valid file name regex")
});

const STYLE: &str = r#"
@import url('https://fonts.googleapis.com/icon?family=Material+Icons');
:root {
  --bg: #ffffff;
  --card: #f8fafc;
  --text: #0f172a;
  --muted: #64748b;
  --accent: #38bdf8;
  --border: #e2e8f0;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, "Pretendard", "Segoe UI", sans-serif;
  background: var(--bg);
  color: var(--text);
  line-height: 1.6;
}
a { color: var(--accent); text-decoration: none; }
.container { max-width: 900px; margin: 0 auto; padding: 40px 20px 80px; }
header { margin-bottom: 48px; display: flex; justify-content: space-between; align-items: flex-start; }
.header-content { flex: 1; }
header h1 { font-size: 36px; margin: 0 0 8px; }
header p { color: var(--muted); margin: 0; }
.header-meta { margin-top: 16px; display: flex; flex-wrap: wrap; gap: 16px; font-size: 14px; }
.profile-picture-container {
  width: 120px; height: 120px; border-radius: 50%; overflow: hidden;
  border: 2px dashed var(--border); background: var(--card);
  display: flex; align-items: center; justify-content: center;
}
.profile-picture-container img { width: 100%; height: 100%; object-fit: cover; }
section { margin-bottom: 48px; }
section h2 { font-size: 22px; margin-bottom: 20px; border-bottom: 1px solid var(--border); padding-bottom: 8px; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: 12px; padding: 20px; margin-bottom: 16px; }
.summary { white-space: pre-line; }
.experience-item { display: grid; grid-template-columns: 120px 1fr; gap: 20px; }
.experience-period { color: var(--muted); font-size: 14px; }
.experience-content h3 { margin: 0 0 4px; font-size: 18px; }
.experience-content span { font-size: 14px; color: var(--muted); }
.experience-content ul { margin: 12px 0 0; padding-left: 18px; }
.experience-content li { margin-bottom: 6px; font-size: 14px; }
.skill-list { display: flex; flex-wrap: wrap; gap: 10px; }
.skill { background: var(--bg); border: 1px solid var(--border); border-radius: 999px; padding: 6px 14px; font-size: 13px; }
.project h3 { margin: 0 0 8px; font-size: 18px; }
.project p { margin: 0; font-size: 14px; color: var(--muted); }
.resume_dashboard {
  display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 16px; list-style: none; padding: 0; margin: 0 0 48px 0;
}
.resume_dashboard .item {
  background: var(--card); border: 1px solid var(--border); border-radius: 12px;
  padding: 20px; display: flex; flex-direction: column;
}
.resume_dashboard .tit { font-size: 14px; color: var(--muted); margin-bottom: 8px; display: flex; align-items: center; gap: 6px; }
.resume_dashboard .txt { margin: 0; display: flex; flex-direction: column; }
.resume_dashboard .txt_top { display: flex; align-items: center; gap: 8px; flex-wrap: wrap; }
.resume_dashboard .emph { font-weight: bold; font-size: 18px; color: var(--text); }
.resume_dashboard .badge_state { background: var(--accent); color: #000; font-size: 11px; padding: 2px 6px; border-radius: 4px; font-weight: bold; }
.resume_dashboard .txt_bottom { font-size: 13px; color: var(--muted); margin-top: 4px; }
@media (max-width: 640px) {
  .experience-item { grid-template-columns: 1fr; }
  .resume_dashboard { grid-template-columns: 1fr; }
}
@media print {
  .container { padding: 0; }
  .card, .resume_dashboard .item { break-inside: avoid; }
}
"#;

/// Display layout of one fixed dashboard tile.
struct TileLayout {
    key: &'static str,
    label: &'static str,
    icon: &'static str,
    emph: &'static str,
    badge: Option<&'static str>,
    bottom: Option<&'static str>,
}

const TILE_LAYOUTS: [TileLayout; 4] = [
    TileLayout {
        key: TILE_CAREER,
        label: "경력",
        icon: "work",
        emph: "company",
        badge: Some("status"),
        bottom: Some("total"),
    },
    TileLayout {
        key: TILE_EDUCATION,
        label: "학력",
        icon: "school",
        emph: "school",
        badge: None,
        bottom: Some("desc"),
    },
    TileLayout {
        key: TILE_SALARY,
        label: "희망연봉",
        icon: "payments",
        emph: "value",
        badge: None,
        bottom: None,
    },
    TileLayout {
        key: TILE_PORTFOLIO,
        label: "포트폴리오",
        icon: "folder",
        emph: "count",
        badge: None,
        bottom: None,
    },
];

/// Rendered export: file name plus complete HTML text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content: String,
}

impl Artifact {
    /// Writes the artifact into `dir`, overwriting a previous export.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, self.content.as_bytes())?;
        info!(
            "event=artifact_write module=export status=ok bytes={}",
            self.content.len()
        );
        Ok(path)
    }
}

/// Renders the document into a standalone HTML artifact.
pub fn render(doc: &Document) -> Artifact {
    let mut html = String::with_capacity(STYLE.len() + 8 * 1024);
    let personal = &doc.personal;

    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\" />\n");
    line(&mut html, 2, &format!("<title>Resume - {}</title>", escape_html(&personal.name)));
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    html.push_str("  <style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n  <div class=\"container\">\n");

    render_header(&mut html, doc);
    render_dashboard(&mut html, doc);
    render_sections(&mut html, doc);

    html.push_str("  </div>\n</body>\n</html>\n");

    let artifact = Artifact {
        file_name: export_file_name(&personal.name),
        content: html,
    };
    info!(
        "event=document_render module=export status=ok bytes={} experience={} skills={} projects={} image={}",
        artifact.content.len(),
        doc.experience.len(),
        doc.skills.len(),
        doc.projects.len(),
        personal.profile_image.is_some()
    );
    artifact
}

/// Builds `resume_<name>.html` with file-system-unsafe characters replaced.
pub fn export_file_name(owner_name: &str) -> String {
    let trimmed = owner_name.trim();
    if trimmed.is_empty() {
        return "resume.html".to_string();
    }
    let safe = UNSAFE_FILE_CHARS_RE.replace_all(trimmed, "_");
    format!("resume_{safe}.html")
}

/// Escapes text for element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_header(html: &mut String, doc: &Document) {
    let personal = &doc.personal;
    html.push_str("    <header>\n      <div class=\"header-content\">\n");
    line(html, 8, &format!("<h1>{}</h1>", escape_html(&personal.name)));
    line(html, 8, &format!("<p>{}</p>", escape_html(&personal.role)));
    html.push_str("        <div class=\"header-meta\">\n");
    line(html, 10, &format!("<span>📧 {}</span>", escape_html(&personal.email)));
    line(html, 10, &format!("<span>🌐 {}</span>", escape_html(&personal.github)));
    line(html, 10, &format!("<span>📍 {}</span>", escape_html(&personal.location)));
    html.push_str("        </div>\n      </div>\n");
    if let Some(image) = &personal.profile_image {
        html.push_str("      <div class=\"profile-picture-container\">\n");
        line(
            html,
            8,
            &format!(
                "<img src=\"{}\" alt=\"Profile\" />",
                escape_html(image.as_data_url())
            ),
        );
        html.push_str("      </div>\n");
    }
    html.push_str("    </header>\n");
}

fn render_dashboard(html: &mut String, doc: &Document) {
    html.push_str("    <ul class=\"resume_dashboard\">\n");
    for layout in &TILE_LAYOUTS {
        if let Some(fields) = doc.dashboard.get(layout.key) {
            render_fixed_tile(html, layout, fields);
        }
    }
    for (key, fields) in &doc.dashboard {
        if TILE_LAYOUTS.iter().any(|layout| layout.key == key.as_str()) {
            continue;
        }
        render_extra_tile(html, key, fields);
    }
    html.push_str("    </ul>\n");
}

fn render_fixed_tile(html: &mut String, layout: &TileLayout, fields: &DashboardTile) {
    let field = |name: &str| escape_html(fields.get(name).map(String::as_str).unwrap_or(""));

    tile_open(html, layout.icon, layout.label);
    html.push_str("          <span class=\"txt_top\">\n");
    line(html, 12, &format!("<span class=\"emph\">{}</span>", field(layout.emph)));
    if let Some(badge) = layout.badge {
        line(html, 12, &format!("<span class=\"badge_state\">{}</span>", field(badge)));
    }
    html.push_str("          </span>\n");
    if let Some(bottom) = layout.bottom {
        line(html, 10, &format!("<span class=\"txt_bottom\">{}</span>", field(bottom)));
    }
    tile_close(html);
}

fn render_extra_tile(html: &mut String, key: &str, fields: &DashboardTile) {
    tile_open(html, "label", &escape_html(key));
    html.push_str("          <span class=\"txt_top\">\n");
    for value in fields.values() {
        line(html, 12, &format!("<span class=\"emph\">{}</span>", escape_html(value)));
    }
    html.push_str("          </span>\n");
    tile_close(html);
}

fn tile_open(html: &mut String, icon: &str, label: &str) {
    html.push_str("      <li class=\"item\">\n");
    line(
        html,
        8,
        &format!(
            "<strong class=\"tit\"><span class=\"material-icons\" style=\"font-size:16px;\">{icon}</span>{label}</strong>"
        ),
    );
    html.push_str("        <p class=\"txt\">\n");
}

fn tile_close(html: &mut String) {
    html.push_str("        </p>\n      </li>\n");
}

fn render_sections(html: &mut String, doc: &Document) {
    html.push_str("    <section>\n      <h2>Summary</h2>\n");
    line(html, 6, &format!("<div class=\"card summary\">{}</div>", escape_html(&doc.summary)));
    html.push_str("    </section>\n");

    html.push_str("    <section>\n      <h2>Experience</h2>\n");
    for entry in &doc.experience {
        html.push_str("      <div class=\"card experience-item\">\n");
        line(
            html,
            8,
            &format!("<div class=\"experience-period\">{}</div>", escape_html(&entry.period)),
        );
        html.push_str("        <div class=\"experience-content\">\n");
        line(html, 10, &format!("<h3>{}</h3>", escape_html(&entry.company)));
        line(html, 10, &format!("<span>{}</span>", escape_html(&entry.position)));
        html.push_str("          <ul>\n");
        for task in &entry.tasks {
            line(html, 12, &format!("<li>{}</li>", escape_html(task)));
        }
        html.push_str("          </ul>\n        </div>\n      </div>\n");
    }
    html.push_str("    </section>\n");

    html.push_str("    <section>\n      <h2>Skills</h2>\n      <div class=\"skill-list\">\n");
    for skill in &doc.skills {
        line(html, 8, &format!("<span class=\"skill\">{}</span>", escape_html(skill)));
    }
    html.push_str("      </div>\n    </section>\n");

    html.push_str("    <section>\n      <h2>Projects</h2>\n");
    for project in &doc.projects {
        html.push_str("      <div class=\"card project\">\n");
        line(html, 8, &format!("<h3>{}</h3>", escape_html(&project.title)));
        line(html, 8, &format!("<p>{}</p>", escape_html(&project.description)));
        html.push_str("      </div>\n");
    }
    html.push_str("    </section>\n");
}

fn line(html: &mut String, indent: usize, content: &str) {
    html.push_str(&" ".repeat(indent));
    html.push_str(content);
    html.push('\n');
}
