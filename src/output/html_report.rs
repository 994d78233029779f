//! Standalone HTML report of a search: header with username and date,
//! then a numbered table of every service checked.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Local};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::output::console::summary_line;
use crate::probe::ProbeVerdict;

const STYLE: &str = r#"
body { font-family: Helvetica, Arial, sans-serif; margin: 40px; color: #222; }
header { display: flex; justify-content: space-between; border-bottom: 1px solid #999; margin-bottom: 24px; }
header h1 { font-size: 18px; margin: 0 0 4px 0; }
header p { font-size: 12px; color: #555; margin: 2px 0; }
table { border-collapse: collapse; width: 100%; font-size: 13px; }
th { background: #000; color: #f5f5f5; text-align: left; padding: 6px 8px; }
td { border: 0.5px solid #999; padding: 4px 8px; }
td.found { color: #1a7f37; }
td.missing { color: #b42318; }
"#;

pub fn render_html_report(username: &str, generated_at: DateTime<Local>, items: &[ProbeVerdict]) -> String {
    let mut html = String::with_capacity(1024 + items.len() * 160);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>Search report: {}</title>", encode_text(username));
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);

    html.push_str("<header>\n<div>\n<h1>Username search report</h1>\n");
    let _ = writeln!(html, "<p>{}</p>\n</div>\n<div>", summary_line(items));
    let _ = writeln!(html, "<p>Date: {}</p>", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(html, "<p>Username: {}</p>\n</div>\n</header>", encode_text(username));

    html.push_str("<table>\n<tr><th>#</th><th>&#10003;</th><th>Site</th><th>Link</th></tr>\n");
    for (i, it) in items.iter().enumerate() {
        let name = encode_text(&it.service_name);
        if it.found {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td class=\"found\">&#10003;</td><td>{}</td><td><a href=\"{}\">{}</a></td></tr>",
                i + 1,
                name,
                encode_double_quoted_attribute(&it.resolved_url),
                encode_text(&it.resolved_url),
            );
        } else {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td class=\"missing\">&#10007;</td><td>{}</td><td>Not found</td></tr>",
                i + 1,
                name,
            );
        }
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}

pub fn write_html_report(path: &Path, username: &str, items: &[ProbeVerdict]) -> anyhow::Result<()> {
    std::fs::write(path, render_html_report(username, Local::now(), items))?;
    Ok(())
}
