// src/tasks/colours.rs

//! Colour keywords that `lightningcss` would print as equally long hex.
//!
//! The printer picks the shortest spelling of every colour and prefers hex on
//! a tie, so `blue` comes out as `#00f`. A keyword written in the input is put
//! back wherever its hex spelling lands in a declaration value; a keyword
//! that is strictly shorter than its hex is already kept by the printer.

/// Keywords exactly as long as their shortest hex form.
const EQUAL_LENGTH_KEYWORDS: &[(&str, &str)] = &[
    ("aqua", "#0ff"),
    ("blue", "#00f"),
    ("crimson", "#dc143c"),
    ("cyan", "#0ff"),
    ("darkred", "#8b0000"),
    ("dimgray", "#696969"),
    ("dimgrey", "#696969"),
    ("hotpink", "#ff69b4"),
    ("lime", "#0f0"),
    ("oldlace", "#fdf5e6"),
    ("skyblue", "#87ceeb"),
    ("thistle", "#d8bfd8"),
];

/// Rewrite hex colours in `printed` back to the keywords used in `source`.
///
/// Only tokens in declaration values are touched: id selectors, quoted
/// strings and `url()` arguments keep their text.
pub(crate) fn keep_named_colours(printed: &str, source: &str) -> String {
    let used = keywords_in(source);
    if used.is_empty() {
        return printed.to_string();
    }

    let mut out = String::with_capacity(printed.len());
    let mut copied = 0;
    let mut cursor = 0;

    while let Some(offset) = printed[cursor..].find('#') {
        let start = cursor + offset;
        let end = start
            + 1
            + printed[start + 1..]
                .bytes()
                .take_while(|b| is_ident_byte(*b))
                .count();

        let keyword = used
            .iter()
            .find(|(_, hex)| hex.eq_ignore_ascii_case(&printed[start..end]))
            .map(|(name, _)| *name);

        if let Some(name) = keyword {
            if in_declaration_value(printed, start, end) {
                out.push_str(&printed[copied..start]);
                out.push_str(name);
                copied = end;
            }
        }
        cursor = end;
    }

    out.push_str(&printed[copied..]);
    out
}

/// Equal-length keywords appearing as whole identifiers in `source`, first
/// spelling wins when two keywords share a hex value.
fn keywords_in(source: &str) -> Vec<(&'static str, &'static str)> {
    let mut used: Vec<(&'static str, &'static str)> = Vec::new();

    for word in source.split(|c: char| !(c.is_ascii() && is_ident_byte(c as u8))) {
        let Some(&(name, hex)) = EQUAL_LENGTH_KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
        else {
            continue;
        };
        if !used.iter().any(|(_, seen)| *seen == hex) {
            used.push((name, hex));
        }
    }

    used
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn in_declaration_value(css: &str, start: usize, end: usize) -> bool {
    let Some(colon) = css[..start].rfind(|c: char| matches!(c, '{' | '}' | ';' | ':')) else {
        return false;
    };
    if css.as_bytes()[colon] != b':' {
        return false;
    }

    let value = &css[colon + 1..start];
    if value.contains(|c: char| c == '"' || c == '\'') || value.contains("url(") {
        return false;
    }

    // `a:hover #abc {` is a selector, not a value.
    let next = css[end..]
        .find(|c: char| matches!(c, '{' | '}' | ';'))
        .map(|i| css.as_bytes()[end + i]);
    next != Some(b'{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_source_replaces_its_hex() {
        assert_eq!(
            keep_named_colours("body{color:#00f}", "body { color: blue; }"),
            "body{color:blue}"
        );
        assert_eq!(
            keep_named_colours("a {\n  border: 1px solid #DC143C;\n}\n", "a{border:1px solid Crimson}"),
            "a {\n  border: 1px solid crimson;\n}\n"
        );
    }

    #[test]
    fn hex_written_as_hex_stays_hex() {
        assert_eq!(
            keep_named_colours("a{color:#00f}", "a { color: #00f; }"),
            "a{color:#00f}"
        );
    }

    #[test]
    fn selectors_and_strings_are_left_alone() {
        let source = "#00f { color: blue; } .x:hover #0ff { color: aqua; }";
        assert_eq!(
            keep_named_colours("#00f{color:#00f}.x:hover #0ff{color:#0ff}", source),
            "#00f{color:blue}.x:hover #0ff{color:aqua}"
        );
        assert_eq!(
            keep_named_colours("a{content:\"#00f\";color:#00f}", "a { content: \"#00f\"; color: blue; }"),
            "a{content:\"#00f\";color:blue}"
        );
    }

    #[test]
    fn longer_hex_tokens_and_custom_properties_do_not_match() {
        let source = "--blue-500: 1; a { color: blue; }";
        assert_eq!(
            keep_named_colours("a{color:#00ff;fill:#00f}", source),
            "a{color:#00ff;fill:blue}"
        );
        assert_eq!(keywords_in("--blue-500: 1"), Vec::new());
    }

    #[test]
    fn first_keyword_wins_for_shared_hex() {
        assert_eq!(
            keep_named_colours("a{color:#0ff}b{color:#0ff}", "a{color:cyan}b{color:aqua}"),
            "a{color:cyan}b{color:cyan}"
        );
    }
}
