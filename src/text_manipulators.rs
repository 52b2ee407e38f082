/// Last non-empty path segment of a link, without query string or fragment.
/// `/movie/dune-part-two/?ref=home` gives `dune-part-two`.
pub fn last_path_segment(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or("");
    path.split('/').rev().find(|segment| !segment.is_empty())
}

/// Spreadsheet column letters for a zero-based column index: 0 is `A`, 25 is
/// `Z`, 26 is `AA`.
pub fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1 reference for zero-based row and column indices.
pub fn a1_reference(row: u32, column: u32) -> String {
    format!("{}{}", column_letters(column), row + 1)
}

/// Qualifies a range with its worksheet, quoting the name the way the Sheets
/// API expects (`'Sheet name'!A1:B2`, embedded quotes doubled).
pub fn sheet_range(sheet_name: &str, range: &str) -> String {
    format!("'{}'!{}", sheet_name.replace('\'', "''"), range)
}
