use std::collections::HashSet;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::calendar::{format_full_date, EclipseDate};
use crate::error::HexError;
use crate::schema::{category, kind};

/// Solar or lunar eclipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EclipseCategory {
    Solar,
    Lunar,
}

impl EclipseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solar => category::SOLAR,
            Self::Lunar => category::LUNAR,
        }
    }
}

impl FromStr for EclipseCategory {
    type Err = HexError;

    /// Accepts the Korean source labels (`일식`, `월식`) and English names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "일식" || s.eq_ignore_ascii_case(category::SOLAR) {
            Ok(Self::Solar)
        } else if s == "월식" || s.eq_ignore_ascii_case(category::LUNAR) {
            Ok(Self::Lunar)
        } else {
            Err(HexError::InvalidData(format!("Unknown eclipse category: {s}")))
        }
    }
}

impl fmt::Display for EclipseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eclipse kind. Current data only carries total eclipses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EclipseKind {
    Total,
}

impl EclipseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => kind::TOTAL,
        }
    }
}

impl FromStr for EclipseKind {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "개기" || s.eq_ignore_ascii_case(kind::TOTAL) {
            Ok(Self::Total)
        } else {
            Err(HexError::InvalidData(format!("Unknown eclipse kind: {s}")))
        }
    }
}

impl fmt::Display for EclipseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One eclipse, immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EclipseEvent {
    pub id: String,
    pub original_date: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: String,
    pub kind: EclipseKind,
    pub category: EclipseCategory,
    /// Julian Day Number of (year, month, day).
    pub day_index: i64,
}

impl EclipseEvent {
    pub fn new(
        id: impl Into<String>,
        original_date: impl Into<String>,
        date: EclipseDate,
        kind: EclipseKind,
        category: EclipseCategory,
    ) -> Self {
        let day_index = date.day_index();
        Self {
            id: id.into(),
            original_date: original_date.into(),
            year: date.year,
            month: date.month,
            day: date.day,
            time: date.time,
            kind,
            category,
            day_index,
        }
    }

    pub fn full_date(&self) -> String {
        format_full_date(self.year, self.month, self.day)
    }
}

/// Eclipse events sorted ascending by day index, identifiers unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSequence {
    events: Vec<EclipseEvent>,
}

impl EventSequence {
    /// Sort (stable) by day index and reject repeated identifiers.
    pub fn new(mut events: Vec<EclipseEvent>) -> Result<Self, HexError> {
        {
            let mut seen = HashSet::with_capacity(events.len());
            for event in &events {
                if !seen.insert(event.id.as_str()) {
                    return Err(HexError::DuplicateEventId(event.id.clone()));
                }
            }
        }
        events.sort_by_key(|e| e.day_index);
        Ok(Self { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&EclipseEvent> {
        self.events.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EclipseEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[EclipseEvent] {
        &self.events
    }
}

impl Index<usize> for EventSequence {
    type Output = EclipseEvent;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.events[idx]
    }
}

impl<'a> IntoIterator for &'a EventSequence {
    type Item = &'a EclipseEvent;
    type IntoIter = std::slice::Iter<'a, EclipseEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
