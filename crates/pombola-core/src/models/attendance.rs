use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Committee meeting attendance code as reported by the PMG API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttendanceCode {
    /// Present
    #[serde(rename = "P")]
    Present,
    /// Absent
    #[serde(rename = "A")]
    Absent,
    /// Absent with apologies
    #[serde(rename = "AP")]
    AbsentWithApologies,
    /// Departed early
    #[serde(rename = "DE")]
    DepartedEarly,
    /// Arrived late
    #[serde(rename = "L")]
    Late,
    /// Arrived late and departed early
    #[serde(rename = "LDE")]
    LateAndDepartedEarly,
    /// Anything the API adds later. Counted in totals only.
    #[serde(other)]
    Unknown,
}

impl AttendanceCode {
    /// Codes that count as having attended the meeting
    pub fn is_present(self) -> bool {
        matches!(
            self,
            AttendanceCode::Present
                | AttendanceCode::Late
                | AttendanceCode::LateAndDepartedEarly
                | AttendanceCode::DepartedEarly
        )
    }

    pub fn is_arrive_late(self) -> bool {
        matches!(self, AttendanceCode::Late | AttendanceCode::LateAndDepartedEarly)
    }

    pub fn is_depart_early(self) -> bool {
        matches!(
            self,
            AttendanceCode::DepartedEarly | AttendanceCode::LateAndDepartedEarly
        )
    }
}

impl std::fmt::Display for AttendanceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceCode::Present => write!(f, "P"),
            AttendanceCode::Absent => write!(f, "A"),
            AttendanceCode::AbsentWithApologies => write!(f, "AP"),
            AttendanceCode::DepartedEarly => write!(f, "DE"),
            AttendanceCode::Late => write!(f, "L"),
            AttendanceCode::LateAndDepartedEarly => write!(f, "LDE"),
            AttendanceCode::Unknown => write!(f, "?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub date: NaiveDate,
    pub attendance: AttendanceCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub pa_url: Option<String>,
    #[serde(default)]
    pub party_name: Option<String>,
}

/// One member's meetings for a reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberAttendance {
    pub member: Member,
    // The API sends `null` for members without records
    #[serde(default)]
    pub meetings: Option<Vec<Meeting>>,
}

impl MemberAttendance {
    pub fn new(member: Member, meetings: Vec<Meeting>) -> Self {
        Self {
            member,
            meetings: Some(meetings),
        }
    }

    pub fn meetings(&self) -> &[Meeting] {
        self.meetings.as_deref().unwrap_or_default()
    }

    pub fn has_meetings(&self) -> bool {
        !self.meetings().is_empty()
    }
}

/// All members' attendance for the reporting year ending on `end_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualAttendance {
    pub end_date: NaiveDate,
    #[serde(default)]
    pub meetings_by_member: Vec<MemberAttendance>,
}

impl AnnualAttendance {
    pub fn year(&self) -> i32 {
        self.end_date.year()
    }
}

/// One page of the `meetings-by-member` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AttendancePage {
    #[serde(default)]
    pub results: Vec<AnnualAttendance>,
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attendance_page() {
        let json = r#"{
            "count": 2,
            "next": "https://api.pmg.org.za/committee-meeting-attendance/meetings-by-member/?page=2",
            "results": [{
                "end_date": "2016-12-31",
                "meetings_by_member": [{
                    "member": {"name": "Doe, Ms J", "pa_url": "http://www.pa.org.za/person/jane-doe/", "party_name": "ANC"},
                    "meetings": [
                        {"date": "2016-03-01", "attendance": "P", "alternate_member": false},
                        {"date": "2016-04-01", "attendance": "LDE"},
                        {"date": "2016-05-01", "attendance": "U"}
                    ]
                }, {
                    "member": {"name": "Nobody, Mr N", "pa_url": null, "party_name": null},
                    "meetings": null
                }]
            }]
        }"#;

        let page: AttendancePage = serde_json::from_str(json).expect("valid page");
        assert!(page.next.is_some());
        assert_eq!(page.results.len(), 1);

        let year = &page.results[0];
        assert_eq!(year.year(), 2016);

        let jane = &year.meetings_by_member[0];
        assert_eq!(jane.member.party_name.as_deref(), Some("ANC"));
        assert_eq!(jane.meetings()[1].attendance, AttendanceCode::LateAndDepartedEarly);
        assert_eq!(jane.meetings()[2].attendance, AttendanceCode::Unknown);

        let nobody = &year.meetings_by_member[1];
        assert!(nobody.member.pa_url.is_none());
        assert!(!nobody.has_meetings());
    }

    #[test]
    fn test_code_classification() {
        let present: Vec<_> = [
            AttendanceCode::Present,
            AttendanceCode::Absent,
            AttendanceCode::AbsentWithApologies,
            AttendanceCode::DepartedEarly,
            AttendanceCode::Late,
            AttendanceCode::LateAndDepartedEarly,
            AttendanceCode::Unknown,
        ]
        .into_iter()
        .filter(|c| c.is_present())
        .collect();
        assert_eq!(
            present,
            vec![
                AttendanceCode::Present,
                AttendanceCode::DepartedEarly,
                AttendanceCode::Late,
                AttendanceCode::LateAndDepartedEarly,
            ]
        );

        assert!(AttendanceCode::LateAndDepartedEarly.is_arrive_late());
        assert!(AttendanceCode::LateAndDepartedEarly.is_depart_early());
        assert!(!AttendanceCode::Late.is_depart_early());
        assert!(!AttendanceCode::DepartedEarly.is_arrive_late());
    }
}
