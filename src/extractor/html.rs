//! Field extraction from a saved elibrary.ru author profile page.
//!
//! Every pass is an independent selection over the same set of table rows.
//! The publication table is irregular (citation cells and title/venue cells do
//! not line up element by element), so the i-th entry of each list is only
//! matched up with the others afterwards, by position.

use scraper::{ElementRef, Html, Node, Selector};

pub const FALLBACK_DISPLAY_NAME: &str = "author name not found";
pub const FALLBACK_AFFILIATION: &str = "affiliation not found";

const NAME_MARKER: &str = "span";
const AFFILIATION_MARKER: &str = "i";
const ROW: &str = "tr";
const NESTED_TABLE: &str = "tr table";
const TITLE: &str = "b";
const TITLE_LABEL: &str = "span";
const JOINT_AUTHORS: &str = "i";
const CELL: &str = "td";
const CITATION_CELL: &str = "td:nth-child(3)";

/// Titles rendered in the secondary table layout carry this literal in their text.
const SUBTABLE_MARKER: &str = "table";

/// Header cells of the publication table.
const HEADER_SENTINELS: [&str; 2] = ["№", "ПубликацияЦитирований"];

/// Elements whose boundaries separate words in element text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "center", "dd", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td",
    "tfoot", "th", "thead", "tr", "ul",
];

pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Text of the first name marker, if the page has one.
pub fn find_display_name(doc: &Html) -> Option<String> {
    first_text(doc, NAME_MARKER)
}

pub fn extract_display_name(doc: &Html) -> String {
    find_display_name(doc).unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string())
}

/// Text of the first affiliation marker, if the page has one.
pub fn find_affiliation(doc: &Html) -> Option<String> {
    first_text(doc, AFFILIATION_MARKER)
}

pub fn extract_affiliation(doc: &Html) -> String {
    find_affiliation(doc).unwrap_or_else(|| FALLBACK_AFFILIATION.to_string())
}

/// The publication rows of a page, with nested sub-tables removed.
#[derive(Debug, Clone)]
pub struct TableRows {
    cleaned: Option<Html>,
}

impl TableRows {
    pub fn empty() -> Self {
        Self { cleaned: None }
    }

    pub fn rows(&self) -> Vec<ElementRef<'_>> {
        match (&self.cleaned, selector(ROW)) {
            (Some(doc), Some(row)) => doc.select(&row).collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All elements matching `css` inside the rows, in document order.
    fn select_within(&self, css: &str) -> Vec<ElementRef<'_>> {
        let Some(sel) = selector(css) else {
            return Vec::new();
        };

        self.rows()
            .into_iter()
            .flat_map(|row| row.select(&sel).collect::<Vec<_>>())
            .collect()
    }
}

/// Selects the table rows of `doc`, stripping any tables nested inside a row
/// so they cannot contribute rows or cells of their own.
///
/// Returns an empty row set instead of failing when the rows cannot be selected.
pub fn extract_table_rows(doc: &Html) -> TableRows {
    let Some(nested) = selector(NESTED_TABLE) else {
        return TableRows::empty();
    };

    let mut cleaned = doc.clone();
    let nested_ids: Vec<_> = cleaned.select(&nested).map(|table| table.id()).collect();
    for id in nested_ids {
        if let Some(mut node) = cleaned.tree.get_mut(id) {
            node.detach();
        }
    }

    TableRows {
        cleaned: Some(cleaned),
    }
}

pub fn extract_titles(rows: &TableRows) -> Vec<String> {
    rows.select_within(TITLE)
        .into_iter()
        .map(|title| {
            let text = element_text(title);
            if text.contains(SUBTABLE_MARKER) {
                subtable_title_label(title)
            } else {
                text
            }
        })
        .collect()
}

/// Title rule for the secondary table layout: the outer text is markup noise
/// and the real title sits in the inner labels.
///
/// Labels are joined with a space; an empty label still takes its separator
/// once something precedes it.
fn subtable_title_label(title: ElementRef<'_>) -> String {
    let Some(label) = selector(TITLE_LABEL) else {
        return String::new();
    };

    let mut joined = String::new();
    for text in title.select(&label).map(element_text) {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(&text);
    }
    joined
}

pub fn extract_joint_authors(rows: &TableRows) -> Vec<String> {
    rows.select_within(JOINT_AUTHORS)
        .into_iter()
        .map(element_text)
        .collect()
}

pub fn extract_venues(rows: &TableRows) -> Vec<String> {
    rows.select_within(CELL)
        .into_iter()
        .map(element_text)
        .filter(|text| !is_numeric_cell(text) && !HEADER_SENTINELS.contains(&text.as_str()))
        .map(|text| strip_ordinal(&text).to_string())
        .collect()
}

/// Drops a leading "12. " style ordinal: everything after the first ". ".
pub fn strip_ordinal(cell: &str) -> &str {
    match cell.find(". ") {
        Some(index) => &cell[index + 2..],
        None => cell,
    }
}

/// Citation tokens: the non-blank third cell of every row.
pub fn extract_citation_counts(rows: &TableRows) -> Vec<String> {
    rows.select_within(CITATION_CELL)
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

// Empty text counts as numeric, so blank cells never become venues.
fn is_numeric_cell(text: &str) -> bool {
    text.chars().all(|ch| ch.is_ascii_digit())
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn first_text(doc: &Html, css: &str) -> Option<String> {
    let sel = selector(css)?;
    let node = doc.select(&sel).next()?;
    Some(element_text(node))
}

/// Descendant text with whitespace runs (including non-breaking spaces)
/// collapsed to a single space.
///
/// A `br` and the start of a block element separate words, as does the end
/// of a block element followed by text.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    append_text(element, &mut raw);
    collapse_whitespace(&raw)
}

fn append_text(element: ElementRef<'_>, buf: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(el) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.name();
                let block = BLOCK_ELEMENTS.contains(&name);

                if block || name == "br" {
                    buf.push(' ');
                }
                append_text(child_element, buf);
                if block && child.next_sibling().is_some_and(|next| next.value().is_text()) {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() {
                    buf.push(' ');
                }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
        <html><body>
          <span>Иванов Иван Иванович</span>
          <i>Московский государственный университет</i>
          <table>
            <tr><td>№</td><td><span>Публикация</span><span>Цитирований</span></td></tr>
            <tr>
              <td>1</td>
              <td><b>First Paper</b> <i>Petrov P., Ivanov I.</i> Journal of Testing, 2020</td>
              <td>5</td>
            </tr>
            <tr>
              <td>2</td>
              <td><b>Second Paper</b> <i>Ivanov I.</i> Acta Examplia, 2021</td>
              <td>0</td>
            </tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_scalars() {
        let doc = parse_document(PROFILE);
        assert_eq!(extract_display_name(&doc), "Иванов Иван Иванович");
        assert_eq!(
            extract_affiliation(&doc),
            "Московский государственный университет"
        );
    }

    #[test]
    fn test_missing_markers_fall_back() {
        let doc = parse_document("<html><body><p>nothing here</p></body></html>");
        assert!(find_display_name(&doc).is_none());
        assert_eq!(extract_display_name(&doc), FALLBACK_DISPLAY_NAME);
        assert_eq!(extract_affiliation(&doc), FALLBACK_AFFILIATION);
    }

    #[test]
    fn test_positional_lists() {
        let doc = parse_document(PROFILE);
        let rows = extract_table_rows(&doc);

        assert_eq!(rows.len(), 3);
        assert_eq!(extract_titles(&rows), vec!["First Paper", "Second Paper"]);
        assert_eq!(
            extract_joint_authors(&rows),
            vec!["Petrov P., Ivanov I.", "Ivanov I."]
        );
        assert_eq!(
            extract_venues(&rows),
            vec!["Journal of Testing, 2020", "Acta Examplia, 2021"]
        );
        assert_eq!(extract_citation_counts(&rows), vec!["5", "0"]);
    }

    #[test]
    fn test_nested_tables_are_stripped() {
        let doc = parse_document(
            r#"<table>
                <tr>
                  <td>1</td>
                  <td><b>Paper</b> <i>Smith J.</i> Venue
                    <table><tr><td>x</td><td>y</td><td>99</td></tr></table>
                  </td>
                  <td>4</td>
                </tr>
              </table>"#,
        );
        let rows = extract_table_rows(&doc);

        assert_eq!(rows.len(), 1);
        assert_eq!(extract_citation_counts(&rows), vec!["4"]);
        assert_eq!(extract_venues(&rows), vec!["Venue"]);
    }

    #[test]
    fn test_subtable_title_uses_label() {
        let doc = parse_document(
            r#"<table><tr>
                <td>1</td>
                <td><b><span>Real Title</span> table layout</b></td>
                <td>0</td>
              </tr></table>"#,
        );
        let rows = extract_table_rows(&doc);
        assert_eq!(extract_titles(&rows), vec!["Real Title"]);
    }

    #[test]
    fn test_citation_cell_must_be_third_and_non_blank() {
        let doc = parse_document(
            r#"<table>
                <tr><td>1</td><td>only two cells</td></tr>
                <tr><td>2</td><td>blank third</td><td>&nbsp;</td></tr>
                <tr><td>3</td><td>three cells</td><td>7</td><td>8</td></tr>
              </table>"#,
        );
        let rows = extract_table_rows(&doc);
        assert_eq!(extract_citation_counts(&rows), vec!["7"]);
    }

    #[test]
    fn test_no_table_yields_empty_lists() {
        let doc = parse_document("<html><body><span>Name</span></body></html>");
        let rows = extract_table_rows(&doc);

        assert!(rows.is_empty());
        assert!(extract_titles(&rows).is_empty());
        assert!(extract_citation_counts(&rows).is_empty());
        assert!(TableRows::empty().rows().is_empty());
    }

    #[test]
    fn test_strip_ordinal() {
        assert_eq!(strip_ordinal("12. Journal of Testing"), "Journal of Testing");
        assert_eq!(strip_ordinal("Journal of Testing"), "Journal of Testing");
    }

    #[test]
    fn test_header_and_numeric_cells_are_not_venues() {
        assert!(is_numeric_cell("42"));
        assert!(is_numeric_cell(""));
        assert!(!is_numeric_cell("1."));
        assert!(!is_numeric_cell("²"));
        assert!(!is_numeric_cell("½"));
        assert!(!is_numeric_cell("Ⅻ"));

        let doc = parse_document(
            r#"<table><tr><td>№</td><td>ПубликацияЦитирований</td><td>17</td></tr></table>"#,
        );
        let rows = extract_table_rows(&doc);
        assert!(extract_venues(&rows).is_empty());
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let doc = parse_document("<p><span>  Sidorov\n\t S.\u{a0}S.  </span></p>");
        assert_eq!(find_display_name(&doc).unwrap(), "Sidorov S. S.");
    }

    #[test]
    fn test_line_breaks_separate_cell_text() {
        let doc = parse_document(
            r#"<table><tr>
                <td>1</td>
                <td><b>Title</b><br><i>Иванов И.И.</i><br>Программирование, 2020</td>
                <td>0</td>
              </tr></table>"#,
        );
        let rows = extract_table_rows(&doc);

        assert_eq!(extract_titles(&rows), vec!["Title"]);
        assert_eq!(extract_joint_authors(&rows), vec!["Иванов И.И."]);
        assert_eq!(extract_venues(&rows), vec!["Программирование, 2020"]);
    }

    #[test]
    fn test_block_boundaries_separate_text() {
        let doc = parse_document("<span><div>Ivanov</div>Ivan<p>Ivanovich</p></span>");
        assert_eq!(find_display_name(&doc).unwrap(), "Ivanov Ivan Ivanovich");

        let doc = parse_document("<span>Ivan<b>ov</b></span>");
        assert_eq!(find_display_name(&doc).unwrap(), "Ivanov");
    }

    #[test]
    fn test_subtable_title_keeps_empty_label_separators() {
        let doc = parse_document(
            r#"<table><tr>
                <td>1</td>
                <td><b><span>First</span><span></span><span>Second</span> table</b></td>
                <td>0</td>
              </tr></table>"#,
        );
        let rows = extract_table_rows(&doc);
        assert_eq!(extract_titles(&rows), vec!["First  Second"]);
    }
}
