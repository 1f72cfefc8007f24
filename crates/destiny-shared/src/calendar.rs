//! Birth dates and the date → mansion resolver.
//!
//! The year is cut into 28 ranges, one per mansion. Each range runs from its
//! start day (inclusive) to the next range's start day (exclusive), and the
//! last range (斗, from Dec 19) wraps over New Year. Only month and day take
//! part in the lookup, so the result never depends on the year or on the
//! clock. Feb 29 sits inside 室 together with Feb 28 and Mar 1.

use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::{self, CatalogRecord};
use crate::constants::MIN_BIRTH_YEAR;
use crate::error::InvalidDateError;
use crate::types::ConstellationId;

// ---------------------------------------------------------------------------
// Range table
// ---------------------------------------------------------------------------

/// First day of a mansion's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeStart {
    pub month: u32,
    pub day: u32,
    pub id: ConstellationId,
}

const fn start(month: u32, day: u32, id: u8) -> RangeStart {
    RangeStart {
        month,
        day,
        id: ConstellationId(id),
    }
}

/// Range starts in calendar order. Spring (from the equinox) belongs to the
/// East mansions, summer to the South, autumn to the West, winter to the
/// North.
pub const RANGES: [RangeStart; 28] = [
    start(1, 2, 8),    // 牛
    start(1, 15, 9),   // 女
    start(1, 28, 10),  // 虚
    start(2, 10, 11),  // 危
    start(2, 23, 12),  // 室
    start(3, 8, 13),   // 壁
    start(3, 21, 0),   // 角
    start(4, 3, 1),    // 亢
    start(4, 16, 2),   // 氐
    start(4, 29, 3),   // 房
    start(5, 12, 4),   // 心
    start(5, 25, 5),   // 尾
    start(6, 7, 6),    // 箕
    start(6, 20, 21),  // 井
    start(7, 3, 22),   // 鬼
    start(7, 16, 23),  // 柳
    start(7, 29, 24),  // 星
    start(8, 11, 25),  // 张
    start(8, 24, 26),  // 翼
    start(9, 6, 27),   // 轸
    start(9, 19, 14),  // 奎
    start(10, 2, 15),  // 娄
    start(10, 15, 16), // 胃
    start(10, 28, 17), // 昴
    start(11, 10, 18), // 毕
    start(11, 23, 19), // 觜
    start(12, 6, 20),  // 参
    start(12, 19, 7),  // 斗
];

/// Mansion id covering a (month, day) pair.
fn lookup(month: u32, day: u32) -> ConstellationId {
    let idx = RANGES.partition_point(|s| (s.month, s.day) <= (month, day));
    // Jan 1 precedes every start and wraps into the last range.
    let slot = if idx == 0 { RANGES.len() - 1 } else { idx - 1 };
    RANGES[slot].id
}

/// Resolve a validated birth date to its catalog record.
pub fn resolve(date: BirthDate) -> &'static CatalogRecord {
    let id = lookup(date.month(), date.day());
    // RANGES only names ids that exist in the catalog (checked by tests).
    &catalog::all()[id.index()]
}

/// Parse `YYYY-MM-DD` (year window `[1950, current year]`) and resolve it.
pub fn resolve_str(input: &str) -> Result<&'static CatalogRecord, InvalidDateError> {
    input.parse::<BirthDate>().map(resolve)
}

/// Human-readable span of a mansion, e.g. `12/19 - 1/1`.
pub fn span_label(id: ConstellationId) -> Option<String> {
    let pos = RANGES.iter().position(|s| s.id == id)?;
    let first = RANGES[pos];
    let next = RANGES[(pos + 1) % RANGES.len()];
    // Any non-leap year gives the common span; 室 gains Feb 29 in leap years.
    let last = NaiveDate::from_ymd_opt(2023, next.month, next.day)?.pred_opt()?;
    Some(format!(
        "{}/{} - {}/{}",
        first.month,
        first.day,
        last.month(),
        last.day()
    ))
}

// ---------------------------------------------------------------------------
// BirthDate
// ---------------------------------------------------------------------------

/// Inclusive range of accepted birth years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub min: i32,
    pub max: i32,
}

impl YearWindow {
    /// No year bound; only the calendar components are checked.
    pub const ANY: YearWindow = YearWindow {
        min: i32::MIN,
        max: i32::MAX,
    };

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// `[1950, current local year]`, the range offered by the picker.
    pub fn through_current_year() -> Self {
        Self::new(MIN_BIRTH_YEAR, Local::now().year())
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// A validated calendar date in canonical `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn parse(input: &str, window: YearWindow) -> Result<Self, InvalidDateError> {
        let malformed = || InvalidDateError::Malformed(input.to_string());

        let bytes = input.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return Err(malformed());
        }

        let year: i32 = input[0..4].parse().map_err(|_| malformed())?;
        let month: u32 = input[5..7].parse().map_err(|_| malformed())?;
        let day: u32 = input[8..10].parse().map_err(|_| malformed())?;

        if !(1..=12).contains(&month) {
            return Err(InvalidDateError::InvalidMonth(month));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(InvalidDateError::InvalidDay { year, month, day })?;

        if !window.contains(year) {
            return Err(InvalidDateError::YearOutOfRange {
                year,
                min: window.min,
                max: window.max,
            });
        }

        Ok(Self(date))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidDateError> {
        Self::parse(&format!("{year:04}-{month:02}-{day:02}"), YearWindow::ANY)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for BirthDate {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, YearWindow::through_current_year())
    }
}

impl std::fmt::Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for BirthDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Stored records predate "now", so only the components are re-checked.
impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BirthDate::parse(&raw, YearWindow::ANY).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn id_of(s: &str) -> u8 {
        resolve(BirthDate::parse(s, YearWindow::ANY).unwrap()).id.0
    }

    #[test]
    fn test_table_is_sorted_and_complete() {
        for pair in RANGES.windows(2) {
            assert!((pair[0].month, pair[0].day) < (pair[1].month, pair[1].day));
        }
        let mut ids: Vec<u8> = RANGES.iter().map(|s| s.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..28).collect::<Vec<u8>>());
        // No range may start on the leap day or right after it.
        assert!(!RANGES
            .iter()
            .any(|s| (s.month, s.day) == (2, 29) || (s.month, s.day) == (3, 1)));
    }

    #[test]
    fn test_boundaries_inclusive_on_start() {
        assert_eq!(id_of("2000-03-20"), 13);
        assert_eq!(id_of("2000-03-21"), 0);
        assert_eq!(id_of("2000-12-18"), 20);
        assert_eq!(id_of("2000-12-19"), 7);
        assert_eq!(id_of("2000-12-31"), 7);
        assert_eq!(id_of("2001-01-01"), 7);
        assert_eq!(id_of("2001-01-02"), 8);
    }

    #[test]
    fn test_leap_day_matches_neighbours() {
        let leap = id_of("2024-02-29");
        assert_eq!(leap, id_of("2024-02-28"));
        assert_eq!(leap, id_of("2024-03-01"));
        assert_eq!(catalog::all()[leap as usize].full_name, "室火猪");
    }

    #[test]
    fn test_every_day_maps_once_with_expected_spans() {
        for (year, leap) in [(2023, false), (2024, true)] {
            let mut counts: HashMap<u8, u32> = HashMap::new();
            let mut day = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
            while day.year() == year {
                let id = lookup(day.month(), day.day()).0;
                *counts.entry(id).or_default() += 1;
                day = day.succ_opt().unwrap();
            }
            assert_eq!(counts.len(), 28);
            assert_eq!(counts.values().sum::<u32>(), if leap { 366 } else { 365 });
            for (id, n) in counts {
                let expected = match id {
                    7 => 14,
                    12 if leap => 14,
                    _ => 13,
                };
                assert_eq!(n, expected, "id {id} in {year}");
            }
        }
    }

    #[test]
    fn test_whole_window_resolves() {
        let window = YearWindow::through_current_year();
        let mut day = NaiveDate::from_ymd_opt(window.min, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(window.max, 12, 31).unwrap();
        while day <= end {
            let text = day.format("%Y-%m-%d").to_string();
            let first = resolve_str(&text).expect("valid date must resolve");
            assert_eq!(first.id, resolve_str(&text).unwrap().id);
            assert_eq!(first.id, lookup(day.month(), day.day()));
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let any = YearWindow::ANY;
        assert!(matches!(
            BirthDate::parse("1990-1-01", any),
            Err(InvalidDateError::Malformed(_))
        ));
        assert!(matches!(
            BirthDate::parse("19a0-01-01", any),
            Err(InvalidDateError::Malformed(_))
        ));
        assert_eq!(
            BirthDate::parse("1990-13-01", any),
            Err(InvalidDateError::InvalidMonth(13))
        );
        assert_eq!(
            BirthDate::parse("2023-02-29", any),
            Err(InvalidDateError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert_eq!(
            BirthDate::parse("1949-12-31", YearWindow::new(1950, 2024)),
            Err(InvalidDateError::YearOutOfRange {
                year: 1949,
                min: 1950,
                max: 2024
            })
        );
        assert!(resolve_str("not a date").is_err());
    }

    #[test]
    fn test_future_year_rejected() {
        let next = Local::now().year() + 1;
        let input = format!("{next}-01-01");
        assert!(matches!(
            input.parse::<BirthDate>(),
            Err(InvalidDateError::YearOutOfRange { .. })
        ));
    }

    #[test]
    fn test_display_and_serde() {
        let date = BirthDate::from_ymd(1990, 5, 7).unwrap();
        assert_eq!(date.to_string(), "1990-05-07");
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"1990-05-07\"");
        let back: BirthDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<BirthDate>("\"1990-02-30\"").is_err());
    }

    #[test]
    fn test_span_labels() {
        assert_eq!(span_label(ConstellationId(7)).unwrap(), "12/19 - 1/1");
        assert_eq!(span_label(ConstellationId(12)).unwrap(), "2/23 - 3/7");
        assert_eq!(span_label(ConstellationId(0)).unwrap(), "3/21 - 4/2");
        assert!(span_label(ConstellationId(99)).is_none());
    }
}
