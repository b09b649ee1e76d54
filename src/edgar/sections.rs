// Filing HTML -> sectioned Document.
//
// Annual reports are organized under "PART I" .. "PART IV" headings. We
// flatten the HTML to lines of text, then start a new segment at every line
// that opens with one of those headings. A table of contents repeats the
// headings, so the same label can label several segments.

use scraper::{ElementRef, Html, Node};

use crate::document::{Document, Segment};
use crate::error::Result;

/// Label for text that precedes the first PART heading (cover page etc).
pub const PREAMBLE_SECTION: &str = "PREAMBLE";

const PART_NUMERALS: [&str; 4] = ["IV", "III", "II", "I"];

/// Elements whose text never belongs to the filing narrative.
/// `ix:header` holds hidden inline XBRL facts.
const SKIPPED: &[&str] = &["script", "style", "head", "title", "noscript", "ix:header"];

/// Elements that end a line of text.
const BLOCK: &[&str] = &[
    "p", "div", "br", "tr", "li", "table", "section", "article", "h1", "h2", "h3", "h4", "h5",
    "h6", "center", "hr",
];

/// Convert filing HTML to plain text with one line per block element.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    push_element(&mut out, document.root_element());

    out.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_element(out: &mut String, element: ElementRef<'_>) {
    let tag = element.value().name();
    if SKIPPED.contains(&tag) {
        return;
    }
    let block = BLOCK.contains(&tag);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    push_element(out, el);
                }
            }
            Node::Text(text) => out.push_str(text),
            _ => {}
        }
    }
    if block {
        out.push('\n');
    } else if tag == "td" || tag == "th" {
        out.push(' ');
    }
}

/// If `line` opens with a PART heading, return the normalized label and the
/// rest of the line.
pub fn part_heading(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim_start();
    let head = trimmed.get(..4)?;
    if !head.eq_ignore_ascii_case("part") {
        return None;
    }
    let after_part = &trimmed[4..];
    let numeral_start = after_part.trim_start();
    if numeral_start.len() == after_part.len() {
        return None;
    }

    for numeral in PART_NUMERALS {
        let Some(candidate) = numeral_start.get(..numeral.len()) else {
            continue;
        };
        if !candidate.eq_ignore_ascii_case(numeral) {
            continue;
        }
        let rest = &numeral_start[numeral.len()..];
        if rest.chars().next().is_some_and(char::is_alphanumeric) {
            continue;
        }
        let rest = rest.trim_start_matches(|c: char| !c.is_alphanumeric());
        return Some((format!("PART {numeral}"), rest));
    }
    None
}

/// Split flattened filing text into PART segments.
pub fn split_parts(text: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut label = PREAMBLE_SECTION.to_string();
    let mut body: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some((next_label, rest)) = part_heading(line) {
            if !body.is_empty() {
                segments.push(Segment::new(label, body.join("\n")));
            }
            label = next_label;
            body = Vec::new();
            if !rest.is_empty() {
                body.push(rest);
            }
        } else if !line.trim().is_empty() {
            body.push(line);
        }
    }
    if !body.is_empty() {
        segments.push(Segment::new(label, body.join("\n")));
    }
    segments
}

/// Flatten HTML and split it into a validated document.
pub fn document_from_html(html: &str) -> Result<Document> {
    Document::new(split_parts(&html_to_text(html)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_heading_variants() {
        assert_eq!(
            part_heading("PART II — OTHER INFORMATION"),
            Some(("PART II".to_string(), "OTHER INFORMATION"))
        );
        assert_eq!(part_heading("Part IV"), Some(("PART IV".to_string(), "")));
        assert_eq!(part_heading("  part iii."), Some(("PART III".to_string(), "")));
        assert_eq!(part_heading("Partnership interests"), None);
        assert_eq!(part_heading("PART Income"), None);
        assert_eq!(part_heading("PARTIAL"), None);
    }

    #[test]
    fn test_html_to_text_skips_hidden_and_breaks_blocks() {
        let html = "<html><head><title>10-K</title><style>p{}</style></head><body>\
                    <div>Cover&nbsp;page</div><p>PART I</p><p>Risk   factors</p>\
                    <script>var x = 1;</script></body></html>";
        let text = html_to_text(html);
        assert_eq!(text, "Cover page\nPART I\nRisk factors");
    }

    #[test]
    fn test_table_cells_join_on_one_line() {
        let html = "<table><tr><td>PART II</td><td>Item 5. Market</td></tr></table>";
        assert_eq!(html_to_text(html), "PART II Item 5. Market");
    }

    #[test]
    fn test_split_parts_labels_and_preamble() {
        let text = "Annual report\nPART I\nBusiness overview\nPART II Market risk\nLoss";
        let segments = split_parts(text);
        let labels: Vec<&str> = segments.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(labels, vec![PREAMBLE_SECTION, "PART I", "PART II"]);
        assert_eq!(segments[2].text, "Market risk\nLoss");
    }

    #[test]
    fn test_heading_without_body_produces_no_segment() {
        let segments = split_parts("PART I\nPART II\nText");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].section, "PART II");
    }
}
