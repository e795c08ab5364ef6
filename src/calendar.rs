//! Date-string parsing, day-index conversion and AD/BC formatting.
//!
//! Years follow the astronomical convention: year 0 is 1 BC, year -1 is
//! 2 BC. Nothing here validates the calendar; a month of 13 or a day of 31
//! in February produce a day index by the same formula as any other triple.

const DEFAULT_TIME: &str = "00:00:00";

/// A parsed eclipse timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EclipseDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: String,
}

impl EclipseDate {
    pub fn day_index(&self) -> i64 {
        date_to_jdn(self.year, self.month, self.day)
    }
}

/// Convert a year, month, day to a Julian Day Number.
///
/// All divisions are floor divisions so the formula stays continuous
/// across the BC/AD boundary.
pub fn date_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let year = year as i64;
    let month = month as i64;
    let day = day as i64;

    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Parse timestamps such as `"0-01-10 07:34:47"` or `"-3974-07-25 16:41:19"`.
///
/// The string must start with `year-month-day` (month and day take at most
/// two digits). The first `dd:dd:dd` run found anywhere is taken as the
/// time of day, kept as written and not range checked; without one the
/// time defaults to midnight.
pub fn parse_eclipse_date(raw: &str) -> Option<EclipseDate> {
    let trimmed = raw.trim();
    let (year, rest) = take_signed(trimmed)?;
    let rest = rest.strip_prefix('-')?;
    let (month, rest) = take_digits(rest, 2)?;
    let rest = rest.strip_prefix('-')?;
    let (day, _) = take_digits(rest, 2)?;

    Some(EclipseDate {
        year: i32::try_from(year).ok()?,
        month: month as u32,
        day: day as u32,
        time: find_time(trimmed).unwrap_or_else(|| DEFAULT_TIME.to_string()),
    })
}

fn take_signed(s: &str) -> Option<(i64, &str)> {
    match s.strip_prefix('-') {
        Some(rest) => {
            let (value, rest) = take_digits(rest, usize::MAX)?;
            Some((-value, rest))
        }
        None => take_digits(s, usize::MAX),
    }
}

/// Leading run of ASCII digits, at most `max` of them.
fn take_digits(s: &str, max: usize) -> Option<(i64, &str)> {
    let len = s
        .bytes()
        .take(max)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if len == 0 {
        return None;
    }
    let value = s[..len].parse::<i64>().ok()?;
    Some((value, &s[len..]))
}

fn find_time(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let start = bytes.windows(8).position(|w| {
        w.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b':',
            _ => b.is_ascii_digit(),
        })
    })?;
    // the window is pure ASCII, so both ends are char boundaries
    s.get(start..start + 8).map(str::to_string)
}

/// `AD 2024` / `BC 1` style year label.
pub fn format_year(year: i32) -> String {
    if year < 1 {
        format!("BC {}", (year - 1).abs())
    } else {
        format!("AD {year}")
    }
}

/// `AD 0033-04-03` / `BC 0001-01-10` style label with a four-digit year.
pub fn format_unified_date(year: i32, month: u32, day: u32) -> String {
    let prefix = if year < 1 { "BC" } else { "AD" };
    let abs_year = if year < 1 { (year - 1).abs() } else { year };
    format!("{prefix} {abs_year:04}-{month:02}-{day:02}")
}

/// `AD 33-04-03` style label, as used in pattern exports.
pub fn format_full_date(year: i32, month: u32, day: u32) -> String {
    format!("{}-{month:02}-{day:02}", format_year(year))
}
