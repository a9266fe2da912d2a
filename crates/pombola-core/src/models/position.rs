use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub slug: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    /// Honorific, e.g. "Ms" or "Dr"
    #[serde(default)]
    pub title: String,
    /// Party slugs in membership order, current party first
    #[serde(default)]
    pub parties: Vec<String>,
}

impl Person {
    pub fn absolute_url(&self) -> String {
        format!("/person/{}/", self.slug)
    }

    /// Upper-cased slug of the person's first party, as the PMG API labels parties
    pub fn party_label(&self) -> Option<String> {
        self.parties.first().map(|p| p.to_uppercase())
    }

    /// Initials of all given names, e.g. "Jane Mary" -> "JM"
    pub fn initials(&self) -> String {
        self.given_name
            .split_whitespace()
            .filter_map(|name| name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Name in the PMG API's "Family, Title INITIALS" format
    pub fn attendance_name(&self) -> String {
        format!("{}, {} {}", self.family_name, self.title, self.initials())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub person: Person,
    pub title: String,
    pub title_slug: String,
    /// Open start means "since before records began"
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Open end means the position is current
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Position {
    /// Inclusive on both ends.
    pub fn is_active_at_date(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= date)
            && self.end_date.map_or(true, |end| date <= end)
    }

    /// True when the active range overlaps any day of `year`.
    pub fn is_active_during_year(&self, year: i32) -> bool {
        let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return false;
        };
        self.start_date.map_or(true, |start| start <= last)
            && self.end_date.map_or(true, |end| end >= first)
    }

    pub fn has_title_slug_prefix(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().any(|p| self.title_slug.starts_with(p))
    }
}
