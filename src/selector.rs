use crate::{error::PeriodError, period::Period};
use regex::Regex;

/// The fixed `PREFIX_YYYYMM.EXT` naming convention, anchored at both ends.
#[derive(Clone, Debug)]
pub struct FilePattern {
    regex: Regex,
}

impl FilePattern {
    pub fn new(prefix: &str, extension: &str) -> Self {
        let pattern = format!(
            r"^{}_(\d{{6}})\.{}$",
            regex::escape(prefix),
            regex::escape(extension)
        );
        let regex = Regex::new(&pattern).expect("escaped literals form a valid pattern");
        FilePattern { regex }
    }

    /// The date token of a matching name, or `None` if the name does not fit the pattern.
    pub fn token<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub period: Period,
}

/// Everything learned from one listing: the valid candidates in listing order, and the
/// names that had the right shape but an unusable date.
#[derive(Debug, Default)]
pub struct Selection {
    pub candidates: Vec<Candidate>,
    pub rejected: Vec<(String, PeriodError)>,
}

impl Selection {
    /// The candidate with the latest period. On equal periods the one listed first wins.
    pub fn most_recent(&self) -> Option<&Candidate> {
        self.candidates.iter().fold(None, |best, c| match best {
            Some(b) if b.period >= c.period => Some(b),
            _ => Some(c),
        })
    }
}

pub fn scan<I, S>(entries: I, pattern: &FilePattern) -> Selection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = Selection::default();

    for entry in entries {
        let name = entry.as_ref();
        let token = match pattern.token(name) {
            Some(token) => token,
            None => continue,
        };

        match token.parse::<Period>() {
            Ok(period) => selection.candidates.push(Candidate {
                name: name.to_owned(),
                period,
            }),
            Err(err) => selection.rejected.push((name.to_owned(), err)),
        }
    }

    selection
}

/// Pick the newest candidate among `entries`, `None` when nothing matches.
pub fn select<I, S>(entries: I, pattern: &FilePattern) -> Option<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan(entries, pattern).most_recent().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnes() -> FilePattern {
        FilePattern::new("BASE_DE_DADOS_CNES", "ZIP")
    }

    #[test]
    fn picks_latest_period() {
        let entries = [
            "BASE_DE_DADOS_CNES_202401.ZIP",
            "BASE_DE_DADOS_CNES_202403.ZIP",
            "OTHER_FILE.TXT",
        ];

        let chosen = select(entries, &cnes()).unwrap();
        assert_eq!(chosen.name, "BASE_DE_DADOS_CNES_202403.ZIP");
        assert_eq!(chosen.period, Period::new(2024, 3).unwrap());
    }

    #[test]
    fn latest_wins_across_years_regardless_of_order() {
        let entries = [
            "BASE_DE_DADOS_CNES_202312.ZIP",
            "BASE_DE_DADOS_CNES_202501.ZIP",
            "BASE_DE_DADOS_CNES_202411.ZIP",
        ];
        let chosen = select(entries, &cnes()).unwrap();
        assert_eq!(chosen.name, "BASE_DE_DADOS_CNES_202501.ZIP");
    }

    #[test]
    fn empty_listing_is_not_found() {
        assert_eq!(select(Vec::<String>::new(), &cnes()), None);
        assert_eq!(select(["README.TXT", "cnes.zip"], &cnes()), None);
    }

    #[test]
    fn invalid_month_is_excluded_not_fatal() {
        let entries = [
            "BASE_DE_DADOS_CNES_202413.ZIP",
            "BASE_DE_DADOS_CNES_202400.ZIP",
            "BASE_DE_DADOS_CNES_202402.ZIP",
        ];
        let selection = scan(entries, &cnes());

        assert_eq!(selection.candidates.len(), 1);
        assert_eq!(selection.rejected.len(), 2);
        assert_eq!(
            selection.most_recent().map(|c| c.name.as_str()),
            Some("BASE_DE_DADOS_CNES_202402.ZIP")
        );
    }

    #[test]
    fn only_invalid_dates_is_not_found() {
        assert_eq!(select(["BASE_DE_DADOS_CNES_202413.ZIP"], &cnes()), None);

        let selection = scan(["BASE_DE_DADOS_CNES_000001.ZIP"], &cnes());
        assert!(selection.candidates.is_empty());
        assert!(matches!(
            selection.rejected[0].1,
            PeriodError::InvalidYear { year: 0, .. }
        ));
    }

    #[test]
    fn pattern_is_anchored_and_case_sensitive() {
        let entries = [
            "XBASE_DE_DADOS_CNES_202401.ZIP",
            "BASE_DE_DADOS_CNES_202401.ZIP.bak",
            "BASE_DE_DADOS_CNES_202401.zip",
            "base_de_dados_cnes_202401.ZIP",
            "BASE_DE_DADOS_CNES_2024011.ZIP",
            "BASE_DE_DADOS_CNES_202401XZIP",
        ];
        assert_eq!(select(entries, &cnes()), None);
    }

    #[test]
    fn ties_go_to_first_listed() {
        let pattern = FilePattern::new("DATA", "ZIP");
        let selection = Selection {
            candidates: vec![
                Candidate {
                    name: "first".into(),
                    period: Period::new(2024, 5).unwrap(),
                },
                Candidate {
                    name: "second".into(),
                    period: Period::new(2024, 5).unwrap(),
                },
            ],
            rejected: vec![],
        };
        assert_eq!(selection.most_recent().unwrap().name, "first");

        let dup = ["DATA_202405.ZIP", "DATA_202405.ZIP"];
        assert_eq!(scan(dup, &pattern).candidates.len(), 2);
    }

    #[test]
    fn selection_is_repeatable() {
        let entries = vec![
            "BASE_DE_DADOS_CNES_202208.ZIP".to_string(),
            "BASE_DE_DADOS_CNES_202309.ZIP".to_string(),
            "BASE_DE_DADOS_CNES_202107.ZIP".to_string(),
        ];
        let first = select(&entries, &cnes());
        let second = select(&entries, &cnes());
        assert_eq!(first, second);
    }

    #[test]
    fn selected_period_dominates_all_candidates() {
        let entries: Vec<String> = (2015..2025)
            .flat_map(|y| (1..=12).map(move |m| format!("BASE_DE_DADOS_CNES_{:04}{:02}.ZIP", y, m)))
            .rev()
            .collect();
        let selection = scan(&entries, &cnes());
        let best = selection.most_recent().unwrap();
        assert!(selection.candidates.iter().all(|c| best.period >= c.period));
        assert_eq!(best.name, "BASE_DE_DADOS_CNES_202412.ZIP");
    }
}
