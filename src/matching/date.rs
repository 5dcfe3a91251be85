//! Date matcher - digit groups that read as a calendar date.
//!
//! Handles undelimited runs (`13031987`, `870313`) and separated forms
//! (`13/3/87`, `1987-03-13`) in day/month/year, month/day/year and
//! year/month/day order.

use regex::Regex;
use std::sync::LazyLock;

use super::{DatePattern, Match, Pattern, sort_matches};
use crate::guesses::REFERENCE_YEAR;

const DATE_MIN_YEAR: i32 = 1000;
const DATE_MAX_YEAR: i32 = 2050;

static SEPARATED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,4})([ /\\_.\-])(\d{1,2})([ /\\_.\-])(\d{1,4})$").expect("valid date pattern")
});

/// Split points of an undelimited digit run, keyed by its length.
fn splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dmy {
    day: u32,
    month: u32,
    year: i32,
    four_digit_year: bool,
}

fn map_ints_to_dm(a: i32, b: i32) -> Option<(u32, u32)> {
    [(a, b), (b, a)]
        .into_iter()
        .find(|&(d, m)| (1..=31).contains(&d) && (1..=12).contains(&m))
        .map(|(d, m)| (d as u32, m as u32))
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}

/// Interprets three integers as a date, or rejects them. The middle value
/// must be a plausible day or month; the year sits first or last.
fn map_ints_to_dmy(ints: [i32; 3]) -> Option<Dmy> {
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }

    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for &int in &ints {
        if (99 < int && int < DATE_MIN_YEAR) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    // Year last reads as day/month; year first reads as month/day.
    let year_splits = [(ints[2], ints[0], ints[1]), (ints[0], ints[2], ints[1])];

    for &(year, a, b) in &year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            // A four-digit year settles the order; no fallback to two digits.
            return map_ints_to_dm(a, b).map(|(day, month)| Dmy {
                day,
                month,
                year,
                four_digit_year: true,
            });
        }
    }

    for &(year, a, b) in &year_splits {
        if let Some((day, month)) = map_ints_to_dm(a, b) {
            return Some(Dmy {
                day,
                month,
                year: two_to_four_digit_year(year),
                four_digit_year: year > 99,
            });
        }
    }

    None
}

fn parse_digits(digits: &str) -> Option<i32> {
    digits.parse().ok()
}

fn date_pattern(dmy: Dmy, separator: Option<char>) -> Pattern {
    Pattern::Date(DatePattern {
        separator,
        year: dmy.year,
        month: dmy.month,
        day: dmy.day,
        four_digit_year: dmy.four_digit_year,
    })
}

/// Finds date-like substrings. Dates nested strictly inside a longer date
/// match are dropped.
pub fn date_match(chars: &[char]) -> Vec<Match> {
    let n = chars.len();
    let mut matches = Vec::new();

    // Undelimited: 4 to 8 digits.
    for start in 0..n {
        for end in start + 4..=(start + 8).min(n) {
            let window = &chars[start..end];
            if !window.iter().all(char::is_ascii_digit) {
                break;
            }
            let token: String = window.iter().collect();

            let best = splits(token.len())
                .iter()
                .filter_map(|&(k, l)| {
                    let ints = [
                        parse_digits(&token[..k])?,
                        parse_digits(&token[k..l])?,
                        parse_digits(&token[l..])?,
                    ];
                    map_ints_to_dmy(ints)
                })
                .min_by_key(|dmy| (dmy.year - REFERENCE_YEAR).abs());

            if let Some(dmy) = best {
                matches.push(Match::new(start, end, token, date_pattern(dmy, None)));
            }
        }
    }

    // Separated: 6 to 10 characters with the same separator twice.
    for start in 0..n {
        for end in start + 6..=(start + 10).min(n) {
            let token: String = chars[start..end].iter().collect();
            let Some(caps) = SEPARATED_DATE.captures(&token) else {
                continue;
            };
            if caps[2] != caps[4] {
                continue;
            }
            let ints = (|| {
                Some([
                    parse_digits(&caps[1])?,
                    parse_digits(&caps[3])?,
                    parse_digits(&caps[5])?,
                ])
            })();
            let separator = caps[2].chars().next();
            if let Some(dmy) = ints.and_then(map_ints_to_dmy) {
                matches.push(Match::new(start, end, token.clone(), date_pattern(dmy, separator)));
            }
        }
    }

    let mut kept: Vec<Match> = matches
        .iter()
        .filter(|m| {
            !matches
                .iter()
                .any(|other| other.start <= m.start && other.end >= m.end && other.len() > m.len())
        })
        .cloned()
        .collect();

    sort_matches(&mut kept);
    kept
}
