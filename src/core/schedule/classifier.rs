//! Header row classification: which columns hold which weekday

use indexmap::IndexMap;

use crate::data::weekdays::Weekday;

/// Column index → weekday, in column order
pub type DayColumns = IndexMap<usize, Weekday>;

/// Map each header cell containing a known day token to its weekday.
///
/// Tokens are tried in table order and the first one contained in the cell
/// wins. Cells with no token (e.g. a time column or "Notes") are left out.
pub fn classify_header<S: AsRef<str>>(
    header: &[Option<S>],
    tokens: &IndexMap<String, Weekday>,
) -> DayColumns {
    let mut columns = DayColumns::new();

    for (idx, cell) in header.iter().enumerate() {
        let Some(text) = cell.as_ref().map(AsRef::as_ref) else {
            continue;
        };
        if let Some(day) = match_day(text, tokens) {
            tracing::debug!(column = idx, %day, header = text, "classified day column");
            columns.insert(idx, day);
        }
    }

    columns
}

fn match_day(text: &str, tokens: &IndexMap<String, Weekday>) -> Option<Weekday> {
    tokens
        .iter()
        .find(|(token, _)| text.contains(token.as_str()))
        .map(|(_, day)| *day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::options::ParseOptions;

    fn header(cells: &[&str]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|c| (!c.is_empty()).then(|| c.to_string()))
            .collect()
    }

    #[test]
    fn test_german_header() {
        let opts = ParseOptions::german();
        let columns = classify_header(&header(&["", "Mo.", "Di.", "Mi."]), &opts.day_tokens);

        let expected: DayColumns = [
            (1, Weekday::Monday),
            (2, Weekday::Tuesday),
            (3, Weekday::Wednesday),
        ]
        .into_iter()
        .collect();
        assert_eq!(columns, expected);
    }

    #[test]
    fn test_unmatched_cells_ignored() {
        let opts = ParseOptions::german();
        let columns = classify_header(
            &header(&["Zeit", "Notes", "Do. 04.12.", "Freitag"]),
            &opts.day_tokens,
        );
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.get(&2), Some(&Weekday::Thursday));
        assert_eq!(columns.get(&3), Some(&Weekday::Friday));
        assert!(!columns.contains_key(&1));
    }

    #[test]
    fn test_first_token_wins() {
        // "Mo/Di" contains two tokens; table order decides
        let opts = ParseOptions::german();
        let columns = classify_header(&header(&["Mo/Di"]), &opts.day_tokens);
        assert_eq!(columns.get(&0), Some(&Weekday::Monday));
    }

    #[test]
    fn test_custom_tokens() {
        let opts = ParseOptions::new().with_day_tokens([
            ("Lun", Weekday::Monday),
            ("Mar", Weekday::Tuesday),
        ]);
        let columns = classify_header(&header(&["Heure", "Lundi", "Mardi", "Mo."]), &opts.day_tokens);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.get(&1), Some(&Weekday::Monday));
        assert_eq!(columns.get(&2), Some(&Weekday::Tuesday));
        assert!(!columns.contains_key(&3));
    }
}
