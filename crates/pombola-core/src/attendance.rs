//! Committee-attendance dashboard.
//!
//! Attendance comes from the PMG API as one bucket per reporting year. For
//! the selected year the records are filtered by party, split into
//! attendance "as minister" and "as MP" using ministerial position dates,
//! tallied per attendance code and reduced to the rows the page shows.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{fetch_all_pages, AttendanceSource, DOWNLOAD_URL};
use crate::cache::CacheRegion;
use crate::models::{AnnualAttendance, AttendanceCode, Member, MemberAttendance, Position};
use crate::positions::{PositionStore, MINISTER_TITLE_PREFIXES};
use crate::utils::{last_value, path_of_url, profile_slug};

/// Cache region holding PMG API responses
pub const CACHE_REGION: &str = "pmg_api";

/// Sentinel aggregate attendance when there are no meetings to divide by
pub const NO_AGGREGATE: i64 = -1;

// ============================================================================
// Query
// ============================================================================

/// Which side of a member's attendance to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionFilter {
    #[default]
    Ministers,
    Mps,
}

impl PositionFilter {
    /// "mps" selects MP attendance; anything else shows ministers.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("mps") => PositionFilter::Mps,
            _ => PositionFilter::Ministers,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PositionFilter::Ministers => "ministers",
            PositionFilter::Mps => "mps",
        }
    }
}

impl std::fmt::Display for PositionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GET parameters of the dashboard. All optional.
#[derive(Debug, Clone, Default)]
pub struct AttendanceQuery {
    pub year: Option<String>,
    pub party: Option<String>,
    pub position: Option<String>,
}

impl AttendanceQuery {
    /// Build from decoded query pairs. A repeated parameter takes its last value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let take = |key| last_value(pairs, key).map(str::to_string);
        Self {
            year: take("year"),
            party: take("party"),
            position: take("position"),
        }
    }
}

// ============================================================================
// Data acquisition
// ============================================================================

/// Return every year's attendance, most recent year first.
///
/// The assembled result set is cached under `url` with no expiry. On a cache
/// hit no request is made.
pub async fn download_attendance_data<S: AttendanceSource>(
    source: &S,
    cache: &CacheRegion,
    url: &str,
) -> Result<Vec<AnnualAttendance>> {
    match cache.get::<Vec<AnnualAttendance>>(url) {
        Ok(Some(cached)) => return Ok(cached.data),
        Ok(None) => {}
        Err(e) => warn!(url = %url, error = %e, "Ignoring unreadable cached attendance data"),
    }

    let results = fetch_all_pages(source, url).await?;

    if let Err(e) = cache.set(url, &results) {
        warn!(url = %url, error = %e, "Failed to cache attendance data");
    }

    Ok(results)
}

// ============================================================================
// Filtering
// ============================================================================

/// Zero-attendance record for a minister the API has no meetings for
pub fn build_minister_zero_attendance(position: &Position) -> MemberAttendance {
    let person = &position.person;
    MemberAttendance {
        member: Member {
            name: person.attendance_name(),
            pa_url: Some(person.absolute_url()),
            party_name: person.party_label(),
        },
        meetings: None,
    }
}

/// Keep the records matching `party`, split each member's meetings between
/// ministerial and MP attendance, and return the side `position` asks for.
///
/// A meeting counts as ministerial when any of the member's ministerial
/// positions is active on the meeting date. In `Ministers` mode, ministers
/// with no ministerial meetings at all get a zero-attendance record.
pub fn filter_attendance<P: PositionStore + ?Sized>(
    annual_attendance: &AnnualAttendance,
    party: Option<&str>,
    position: PositionFilter,
    store: &P,
) -> Result<Vec<MemberAttendance>> {
    let party = party.filter(|p| !p.is_empty());

    let records = annual_attendance
        .meetings_by_member
        .iter()
        .filter(|ma| party.is_none() || ma.member.party_name.as_deref() == party);

    let year = annual_attendance.year();
    let mut ministers: BTreeMap<String, Vec<Position>> = BTreeMap::new();
    for p in store.active_during_year(MINISTER_TITLE_PREFIXES, year)? {
        ministers.entry(p.person.slug.clone()).or_default().push(p);
    }
    debug!(year, ministers = ministers.len(), "Active ministers");

    // Ministers still waiting for a ministerial attendance record
    let mut unseen: BTreeSet<&str> = ministers.keys().map(String::as_str).collect();

    let mut minister_attendance = Vec::new();
    let mut mp_attendance = Vec::new();

    for record in records {
        let slug = record.member.pa_url.as_deref().and_then(profile_slug);

        let Some(positions) = slug.as_deref().and_then(|s| ministers.get(s)) else {
            // Not a minister this year, or no way to tell
            mp_attendance.push(record.clone());
            continue;
        };

        let (as_minister, as_mp): (Vec<_>, Vec<_>) = record
            .meetings()
            .iter()
            .cloned()
            .partition(|meeting| positions.iter().any(|p| p.is_active_at_date(meeting.date)));

        if !as_minister.is_empty() {
            minister_attendance.push(MemberAttendance::new(record.member.clone(), as_minister));
            if let Some(slug) = slug.as_deref() {
                unseen.remove(slug);
            }
        }

        if !as_mp.is_empty() {
            mp_attendance.push(MemberAttendance::new(record.member.clone(), as_mp));
        }
    }

    match position {
        PositionFilter::Ministers => {
            for slug in unseen {
                let Some(first) = ministers.get(slug).and_then(|ps| ps.first()) else {
                    continue;
                };
                let record = build_minister_zero_attendance(first);
                if party.is_some() && record.member.party_name.as_deref() != party {
                    continue;
                }
                minister_attendance.push(record);
            }
            Ok(minister_attendance)
        }
        PositionFilter::Mps => Ok(mp_attendance),
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Occurrences of each attendance code for one member
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub member: Member,
    pub counts: BTreeMap<AttendanceCode, u32>,
}

impl AttendanceSummary {
    fn count_where(&self, pred: impl Fn(AttendanceCode) -> bool) -> u32 {
        self.counts
            .iter()
            .filter(|(code, _)| pred(**code))
            .map(|(_, n)| n)
            .sum()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn present(&self) -> u32 {
        self.count_where(AttendanceCode::is_present)
    }

    pub fn arrive_late(&self) -> u32 {
        self.count_where(AttendanceCode::is_arrive_late)
    }

    pub fn depart_early(&self) -> u32 {
        self.count_where(AttendanceCode::is_depart_early)
    }
}

/// Tally each record's meetings by attendance code. Records without
/// meetings tally as zero present.
pub fn get_attendance_summary(attendance: &[MemberAttendance]) -> Vec<AttendanceSummary> {
    attendance
        .iter()
        .map(|record| {
            let mut counts = BTreeMap::new();
            if record.has_meetings() {
                for meeting in record.meetings() {
                    *counts.entry(meeting.attendance).or_insert(0) += 1;
                }
            } else {
                counts.insert(AttendanceCode::Present, 0);
            }
            AttendanceSummary {
                member: record.member.clone(),
                counts,
            }
        })
        .collect()
}

/// `num` as a whole-number percentage of `total` (1 of 3 is 33). Halves
/// round to even. A zero total gives 0.
pub fn calculate_abs_percentage(num: u32, total: u32) -> i64 {
    if total == 0 {
        return 0;
    }
    (f64::from(num) / f64::from(total) * 100.0).round_ties_even() as i64
}

// ============================================================================
// Page context
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MpRow {
    pub name: String,
    pub pa_url: Option<String>,
    pub party_name: Option<String>,
    pub present: i64,
    pub absent: i64,
    pub arrive_late: i64,
    pub depart_early: i64,
    pub total: u32,
}

/// Ministers only show how many meetings they attended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinisterRow {
    pub name: String,
    pub pa_url: Option<String>,
    pub party_name: Option<String>,
    pub present: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttendanceRows {
    Ministers(Vec<MinisterRow>),
    Mps {
        rows: Vec<MpRow>,
        /// Percentage present across all rows, or `NO_AGGREGATE`
        aggregate_attendance: i64,
    },
}

impl AttendanceRows {
    fn empty(position: PositionFilter) -> Self {
        match position {
            PositionFilter::Ministers => AttendanceRows::Ministers(Vec::new()),
            PositionFilter::Mps => AttendanceRows::Mps {
                rows: Vec::new(),
                aggregate_attendance: NO_AGGREGATE,
            },
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AttendanceRows::Ministers(rows) => rows.len(),
            AttendanceRows::Mps { rows, .. } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceContext {
    pub year: String,
    pub party: String,
    pub position: &'static str,
    pub years: Vec<String>,
    pub parties: Vec<String>,
    pub download_url: &'static str,
    pub rows: AttendanceRows,
}

fn mp_rows(summaries: &[AttendanceSummary]) -> AttendanceRows {
    let mut aggregate_total = 0;
    let mut aggregate_present = 0;

    let rows: Vec<MpRow> = summaries
        .iter()
        .map(|summary| {
            let total = summary.total();
            let present = summary.present();
            aggregate_total += total;
            aggregate_present += present;

            let present_perc = calculate_abs_percentage(present, total);
            MpRow {
                name: summary.member.name.clone(),
                pa_url: summary.member.pa_url.as_deref().map(path_of_url),
                party_name: summary.member.party_name.clone(),
                present: present_perc,
                absent: 100 - present_perc,
                arrive_late: calculate_abs_percentage(summary.arrive_late(), total),
                depart_early: calculate_abs_percentage(summary.depart_early(), total),
                total,
            }
        })
        .collect();

    let aggregate_attendance = if aggregate_total == 0 {
        NO_AGGREGATE
    } else {
        calculate_abs_percentage(aggregate_present, aggregate_total)
    };

    AttendanceRows::Mps {
        rows,
        aggregate_attendance,
    }
}

fn minister_rows(summaries: &[AttendanceSummary]) -> AttendanceRows {
    AttendanceRows::Ministers(
        summaries
            .iter()
            .map(|summary| MinisterRow {
                name: summary.member.name.clone(),
                pa_url: summary.member.pa_url.as_deref().map(path_of_url),
                party_name: summary.member.party_name.clone(),
                present: summary.present(),
            })
            .collect(),
    )
}

/// Build the dashboard context from every year's data and the request's
/// GET parameters. The year defaults to the first (most recent) bucket.
pub fn build_context<P: PositionStore + ?Sized>(
    data: &[AnnualAttendance],
    query: &AttendanceQuery,
    store: &P,
) -> Result<AttendanceContext> {
    let year = query
        .year
        .clone()
        .or_else(|| data.first().map(|a| a.year().to_string()))
        .unwrap_or_default();
    let party = query.party.clone().unwrap_or_default();
    let position = PositionFilter::from_query(query.position.as_deref());

    let mut years = Vec::with_capacity(data.len());
    let mut parties = Vec::new();
    let mut rows = AttendanceRows::empty(position);

    for annual_attendance in data {
        let annual_year = annual_attendance.year().to_string();

        if annual_year == year {
            parties = annual_attendance
                .meetings_by_member
                .iter()
                .filter_map(|ma| ma.member.party_name.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let attendance =
                filter_attendance(annual_attendance, Some(party.as_str()), position, store)?;
            let summaries = get_attendance_summary(&attendance);

            rows = match position {
                PositionFilter::Mps => mp_rows(&summaries),
                PositionFilter::Ministers => minister_rows(&summaries),
            };
        }

        years.push(annual_year);
    }

    debug!(year = %year, party = %party, position = %position, rows = rows.len(), "Built attendance context");

    Ok(AttendanceContext {
        year,
        party,
        position: position.as_str(),
        years,
        parties,
        download_url: DOWNLOAD_URL,
        rows,
    })
}

/// Fetch (or read from cache) the attendance data and build the context.
pub async fn load_attendance_context<S, P>(
    source: &S,
    cache: &CacheRegion,
    url: &str,
    store: &P,
    query: &AttendanceQuery,
) -> Result<AttendanceContext>
where
    S: AttendanceSource,
    P: PositionStore + ?Sized,
{
    let data = download_attendance_data(source, cache, url).await?;
    build_context(&data, query, store)
}

// ============================================================================
// Tests
// ============================================================================
