//! Minimal glossary CSV reader
//!
//! Format: `term,definition[,relatedUrl[,relatedName]]`, one entry per line.
//! Double quotes toggle quoting so a field may contain commas. Doubled
//! quotes and newlines inside quoted fields are not supported. A first row
//! whose first cell contains "term" (any case) is treated as a header.

use super::GlossaryTerm;

/// Split one CSV line into trimmed fields
///
/// Quote characters only toggle the quoted state and are not kept.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

fn is_header(fields: &[String]) -> bool {
    fields
        .first()
        .is_some_and(|cell| cell.to_lowercase().contains("term"))
}

fn optional(field: Option<&String>) -> Option<String> {
    field.filter(|f| !f.is_empty()).cloned()
}

/// Parse glossary CSV text into terms
///
/// Blank lines and rows without both a term and a definition are skipped.
pub fn parse_csv_content(content: &str) -> Vec<GlossaryTerm> {
    let mut rows = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_csv_line)
        .peekable();

    if rows.peek().is_some_and(|fields| is_header(fields)) {
        rows.next();
    }

    rows.filter_map(|fields| {
        let term = fields.first().filter(|t| !t.is_empty())?;
        let definition = fields.get(1).filter(|d| !d.is_empty())?;
        Some(GlossaryTerm {
            term: term.clone(),
            definition: definition.clone(),
            related_url: optional(fields.get(2)),
            related_name: optional(fields.get(3)),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        assert_eq!(parse_csv_line("cloud,nuvem"), vec!["cloud", "nuvem"]);
        assert_eq!(parse_csv_line(" a , b ,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_quoted_field_with_comma() {
        assert_eq!(
            parse_csv_line(r#""server, primary",servidor principal"#),
            vec!["server, primary", "servidor principal"]
        );
    }

    #[test]
    fn test_header_is_skipped() {
        let terms = parse_csv_content("Term,Definition\ncloud,nuvem\n");
        assert_eq!(terms, vec![GlossaryTerm::new("cloud", "nuvem")]);

        let terms = parse_csv_content("Glossary terms,Translation\ncloud,nuvem\n");
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn test_first_row_kept_without_header() {
        let terms = parse_csv_content("cloud,nuvem\nserver,servidor");
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[1].definition, "servidor");
    }

    #[test]
    fn test_optional_related_fields() {
        let content = "term,definition,url,name\n\
                       cloud,nuvem,https://example.org/cloud,Cloud Guide\n\
                       api,interface,,\n";
        let terms = parse_csv_content(content);
        assert_eq!(terms[0].related_url.as_deref(), Some("https://example.org/cloud"));
        assert_eq!(terms[0].related_name.as_deref(), Some("Cloud Guide"));
        assert_eq!(terms[1].related_url, None);
        assert_eq!(terms[1].related_name, None);
    }

    #[test]
    fn test_incomplete_rows_and_blank_lines_skipped() {
        let terms = parse_csv_content("\r\ncloud,nuvem\r\n\r\nlonely\r\n,orphan\r\n");
        assert_eq!(terms, vec![GlossaryTerm::new("cloud", "nuvem")]);
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_csv_content("").is_empty());
        assert!(parse_csv_content("term,definition").is_empty());
    }
}
