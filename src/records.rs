//! Core row type for the daily rentals dataset, plus the fixed-order
//! calendar categories used as grouping keys.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Calendar months in fixed order. Grouping keys sort by declaration order,
/// never by label, so January always precedes February in any output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Month from a 1-based calendar ordinal.
    pub fn from_ordinal(n: u32) -> Option<Month> {
        (1..=12).contains(&n).then(|| Self::ALL[(n - 1) as usize])
    }

    pub fn from_date(date: NaiveDate) -> Month {
        Self::ALL[date.month0() as usize]
    }
}

impl FromStr for Month {
    type Err = anyhow::Error;

    /// Accepts a 1-12 ordinal, a three-letter abbreviation, or a full
    /// month name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Ok(n) = key.parse::<u32>() {
            return match Month::from_ordinal(n) {
                Some(m) => Ok(m),
                None => bail!("month ordinal out of range: {n}"),
            };
        }
        let lower = key.to_ascii_lowercase();
        let month = match lower.get(..3) {
            Some("jan") => Month::Jan,
            Some("feb") => Month::Feb,
            Some("mar") => Month::Mar,
            Some("apr") => Month::Apr,
            Some("may") => Month::May,
            Some("jun") => Month::Jun,
            Some("jul") => Month::Jul,
            Some("aug") => Month::Aug,
            Some("sep") => Month::Sep,
            Some("oct") => Month::Oct,
            Some("nov") => Month::Nov,
            Some("dec") => Month::Dec,
            _ => bail!("unrecognized month `{s}`"),
        };
        Ok(month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Days of the week, Sunday first. As with [`Month`], declaration order is
/// the ordering contract for every table keyed by weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    pub fn from_date(date: NaiveDate) -> Weekday {
        match date.weekday() {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

impl FromStr for Weekday {
    type Err = anyhow::Error;

    /// Accepts a 0-6 ordinal (0 = Sunday), a three-letter abbreviation, or
    /// a full day name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Ok(n) = key.parse::<usize>() {
            return match Weekday::ALL.get(n) {
                Some(&d) => Ok(d),
                None => bail!("weekday ordinal out of range: {n}"),
            };
        }
        let lower = key.to_ascii_lowercase();
        let day = match lower.get(..3) {
            Some("sun") => Weekday::Sunday,
            Some("mon") => Weekday::Monday,
            Some("tue") => Weekday::Tuesday,
            Some("wed") => Weekday::Wednesday,
            Some("thu") => Weekday::Thursday,
            Some("fri") => Weekday::Friday,
            Some("sat") => Weekday::Saturday,
            _ => bail!("unrecognized weekday `{s}`"),
        };
        Ok(day)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the daily rentals CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RentalRecord {
    pub dteday: NaiveDate,
    pub season: String,
    pub weathersit: String,
    #[serde(deserialize_with = "bool_flag")]
    pub workingday: bool,
    pub weekday: Weekday,
    pub mnth: Month,
    pub yr: String,
    pub registered: u64,
    pub casual: u64,
    pub cnt: u64,
}

impl RentalRecord {
    /// True when the total column equals registered + casual.
    pub fn is_consistent(&self) -> bool {
        self.cnt == self.registered + self.casual
    }
}

fn bool_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "unrecognized working-day flag `{other}`"
        ))),
    }
}
