//! Table-of-contents rendering.
//!
//! Consumes the extracted heading list plus the active heading id and emits
//! a `<nav>` fragment. An article with no `h2`/`h3` headings gets no ToC at
//! all, not an empty shell.

use crate::dom::escape_html;
use crate::outline::{Heading, HeadingLevel};

/// Render the ToC nav, or `None` when there are no headings.
///
/// Each entry links to its heading anchor; the active entry carries an
/// `active` class and `aria-current` so the host can highlight it. `h3`
/// entries are indented one level via the `toc-h3` class.
pub fn render(headings: &[Heading], active: Option<&str>) -> Option<String> {
    if headings.is_empty() {
        return None;
    }

    let mut out = String::from("<nav class=\"toc\"><ul>");
    for heading in headings {
        let level_class = match heading.level {
            HeadingLevel::H2 => "toc-h2",
            HeadingLevel::H3 => "toc-h3",
        };
        let is_active = active == Some(heading.id.as_str());
        out.push_str("<li class=\"");
        out.push_str(level_class);
        out.push_str("\"><a href=\"#");
        out.push_str(&heading.id);
        out.push('"');
        if is_active {
            out.push_str(" class=\"active\" aria-current=\"true\"");
        }
        out.push('>');
        out.push_str(&escape_html(&heading.text));
        out.push_str("</a></li>");
    }
    out.push_str("</ul></nav>");
    Some(out)
}
