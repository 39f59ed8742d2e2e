//! HTML page layout and form controls.
//!
//! Pages are plain server-rendered documents: a navigation sidebar, a main
//! column, and GET forms whose query strings drive every view.

use std::fmt::Write as _;

/// Leaflet assets loaded by every page.
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", Helvetica, Arial, sans-serif; color: #262730; display: flex; }
nav { width: 15rem; min-height: 100vh; background: #f0f2f6; padding: 1.5rem 1rem; box-sizing: border-box; flex-shrink: 0; }
nav h4 { margin: 1.2rem 0 0.3rem; font-size: 0.8rem; text-transform: uppercase; color: #808495; }
nav a { display: block; padding: 0.3rem 0.5rem; border-radius: 0.4rem; color: #262730; text-decoration: none; }
nav a.active { background: #dde1ea; font-weight: 600; }
main { flex: 1; padding: 2rem 3rem; max-width: 80rem; }
.alert { padding: 0.8rem 1rem; border-radius: 0.5rem; margin: 0.8rem 0; }
.alert-info { background: #e8f0fe; color: #0b3d91; }
.alert-success { background: #e6f4ea; color: #1e6b34; }
.alert-warning { background: #fff8e1; color: #7a5a00; }
.alert-error { background: #fdecea; color: #8a1c1c; }
form.filters { display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 1rem; align-items: end; }
form.filters label { display: block; font-size: 0.9rem; margin-bottom: 0.3rem; }
form.filters select, form.filters input[type=text] { width: 100%; padding: 0.4rem; box-sizing: border-box; }
.grid3 { display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 1rem; }
.grid3 svg, figure svg { width: 100%; height: auto; }
table.data { border-collapse: collapse; margin: 0.8rem 0; font-size: 0.9rem; }
table.data th, table.data td { border: 1px solid #e6e9ef; padding: 0.3rem 0.6rem; text-align: right; }
table.data th { background: #f7f8fa; }
details { border: 1px solid #e6e9ef; border-radius: 0.5rem; padding: 0.5rem 1rem; margin: 0.8rem 0; }
summary { cursor: pointer; font-weight: 600; }
.gallery { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1rem; }
.gallery img, .sidebar-art img { width: 100%; border-radius: 10px; }
figcaption { font-size: 0.85rem; color: #555; }
.map { width: 100%; height: 600px; border-radius: 0.5rem; }
a.button { display: inline-block; padding: 0.4rem 0.8rem; border: 1px solid #ccc; border-radius: 0.4rem; text-decoration: none; color: #262730; margin: 0.3rem 0; }
"#;

// ============================================================================
// Navigation
// ============================================================================

/// Pages of the dashboard, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    /// Start page
    Home,
    /// Iceberg shapefile viewer
    Shapes,
    /// Iceberg spatial distributions
    Spatial,
    /// Melt-rate statistics
    Statistics,
    /// Image gallery
    Gallery,
    /// Acknowledgements
    Acknowledgements,
}

impl NavItem {
    /// All pages in navigation order.
    pub const ALL: [NavItem; 6] = [
        NavItem::Home,
        NavItem::Shapes,
        NavItem::Spatial,
        NavItem::Statistics,
        NavItem::Gallery,
        NavItem::Acknowledgements,
    ];

    /// Route path.
    pub fn path(&self) -> &'static str {
        match self {
            NavItem::Home => "/",
            NavItem::Shapes => "/shapes",
            NavItem::Spatial => "/spatial",
            NavItem::Statistics => "/statistics",
            NavItem::Gallery => "/gallery",
            NavItem::Acknowledgements => "/acknowledgements",
        }
    }

    /// Link text.
    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Home => "Home",
            NavItem::Shapes => "Iceberg shapefile viewer",
            NavItem::Spatial => "Iceberg spatial distributions",
            NavItem::Statistics => "Statistics dashboard",
            NavItem::Gallery => "Image gallery",
            NavItem::Acknowledgements => "Acknowledgements",
        }
    }

    /// Navigation group heading (empty for the ungrouped start page).
    pub fn section(&self) -> &'static str {
        match self {
            NavItem::Home => "",
            NavItem::Shapes | NavItem::Spatial | NavItem::Statistics => "Data",
            NavItem::Gallery | NavItem::Acknowledgements => "About",
        }
    }
}

/// Wrap a body in the full document with navigation.
pub fn page(title: &str, active: NavItem, body: &str) -> String {
    let mut nav = String::new();
    let mut section = "";
    for item in NavItem::ALL {
        if item.section() != section {
            section = item.section();
            let _ = write!(nav, "<h4>{}</h4>", escape(section));
        }
        let class = if item == active { " class=\"active\"" } else { "" };
        let _ = write!(nav, "<a href=\"{}\"{class}>{}</a>", item.path(), escape(item.label()));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | ICE-AGE</title>\n\
         <link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\">\n\
         <script src=\"{LEAFLET_JS}\"></script>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<nav>{nav}</nav>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

// ============================================================================
// Text
// ============================================================================

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a query-string component.
pub fn encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for b in text.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// `path?k=v&...` with encoded values.
pub fn href(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect();
    format!("{path}?{}", query.join("&"))
}

/// Severity of an [`alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Neutral information
    Info,
    /// Positive confirmation
    Success,
    /// Something the user should check
    Warning,
    /// A section could not be shown
    Error,
}

impl Level {
    fn class(&self) -> &'static str {
        match self {
            Level::Info => "alert-info",
            Level::Success => "alert-success",
            Level::Warning => "alert-warning",
            Level::Error => "alert-error",
        }
    }
}

/// A coloured message box. `message` is escaped.
pub fn alert(level: Level, message: &str) -> String {
    format!("<div class=\"alert {}\">{}</div>", level.class(), escape(message))
}

/// A coloured box around trusted markup.
pub fn alert_html(level: Level, markup: &str) -> String {
    format!("<div class=\"alert {}\">{markup}</div>", level.class())
}

/// Collapsible section around trusted markup.
pub fn expander(title: &str, body: &str, open: bool) -> String {
    let open = if open { " open" } else { "" };
    format!("<details{open}><summary>{}</summary>{body}</details>", escape(title))
}

/// Data table; every cell is escaped.
pub fn table<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table class=\"data\"><thead><tr>");
    for h in headers {
        let _ = write!(out, "<th>{}</th>", escape(h.as_ref()));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Link styled as a button.
pub fn button_link(href: &str, label: &str) -> String {
    format!("<a class=\"button\" href=\"{}\">{}</a>", escape(href), escape(label))
}

// ============================================================================
// Form controls
// ============================================================================

/// Drop-down of `(value, label)` options.
pub fn select(name: &str, label: &str, options: &[(String, String)], selected: &str) -> String {
    let mut out = format!(
        "<div><label for=\"{name}\">{}</label><select id=\"{name}\" name=\"{name}\" onchange=\"this.form.submit()\">",
        escape(label),
        name = escape(name)
    );
    for (value, text) in options {
        let sel = if value == selected { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{}\"{sel}>{}</option>", escape(value), escape(text));
    }
    out.push_str("</select></div>");
    out
}

/// Multi-select list; every selected value is submitted under `name`.
pub fn multi_select(name: &str, label: &str, options: &[String], selected: &[String]) -> String {
    let mut out = format!(
        "<div><label for=\"{name}\">{}</label><select id=\"{name}\" name=\"{name}\" multiple size=\"6\">",
        escape(label),
        name = escape(name)
    );
    for value in options {
        let sel = if selected.contains(value) { " selected" } else { "" };
        let _ = write!(out, "<option{sel}>{}</option>", escape(value));
    }
    out.push_str("</select></div>");
    out
}

/// Single-line text input.
pub fn text_input(name: &str, label: &str, value: &str, placeholder: &str) -> String {
    format!(
        "<div><label for=\"{name}\">{}</label><input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\" placeholder=\"{}\"></div>",
        escape(label),
        escape(value),
        escape(placeholder),
        name = escape(name)
    )
}

/// Radio group of `(value, label)` options.
pub fn radio(name: &str, label: &str, options: &[(&str, &str)], selected: &str) -> String {
    let mut out = format!("<div><label>{}</label>", escape(label));
    for (value, text) in options {
        let checked = if *value == selected { " checked" } else { "" };
        let _ = write!(
            out,
            "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{checked} onchange=\"this.form.submit()\"> {}</label>",
            escape(name),
            escape(value),
            escape(text)
        );
    }
    out.push_str("</div>");
    out
}

/// GET form around the given controls with an apply button.
pub fn form(action: &str, controls: &[String]) -> String {
    format!(
        "<form class=\"filters\" method=\"get\" action=\"{}\">{}<div><button type=\"submit\">Apply</button></div></form>",
        escape(action),
        controls.concat()
    )
}
