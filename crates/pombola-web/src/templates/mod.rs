//! Askama Templates
//!
//! Template structs for rendering HTML pages. Handlers flatten the core
//! contexts into plain strings and flags so the templates stay logic-free.

use askama::Template;
use askama_web::WebTemplate;

use pombola_core::attendance::{AttendanceContext, AttendanceRows, NO_AGGREGATE};
use pombola_core::county::{CountyPerformanceContext, Form};

/// County-performance call-to-action page.
#[derive(Template, WebTemplate)]
#[template(path = "county-performance.html")]
pub struct CountyPerformanceTemplate {
    pub suppress_banner: bool,
    /// Petition form first, then the senate form
    pub forms: Vec<Form>,
    pub show_opportunity: bool,
    pub show_threat: bool,
}

impl From<CountyPerformanceContext> for CountyPerformanceTemplate {
    fn from(ctx: CountyPerformanceContext) -> Self {
        Self {
            suppress_banner: ctx.suppress_banner,
            forms: vec![ctx.petition_form, ctx.senate_form],
            show_opportunity: ctx.show_opportunity,
            show_threat: ctx.show_threat,
        }
    }
}

/// An `<option>` in one of the dashboard's filter selects.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>, current: &str) -> Self {
        let value = value.into();
        let selected = value == current;
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}

/// One table row of the dashboard. Percentage columns are empty for
/// ministers, who only show a meeting count.
pub struct AttendanceRowView {
    pub name: String,
    pub url: String,
    pub party: String,
    pub present: String,
    pub absent: String,
    pub arrive_late: String,
    pub depart_early: String,
    pub total: String,
}

/// Committee attendance dashboard.
#[derive(Template, WebTemplate)]
#[template(path = "south_africa/mp_attendance.html")]
pub struct AttendanceTemplate {
    pub year: String,
    pub year_options: Vec<SelectOption>,
    pub party_options: Vec<SelectOption>,
    pub position_options: Vec<SelectOption>,
    pub show_mps: bool,
    pub rows: Vec<AttendanceRowView>,
    pub has_aggregate: bool,
    pub aggregate_attendance: i64,
    pub download_url: String,
}

impl From<AttendanceContext> for AttendanceTemplate {
    fn from(ctx: AttendanceContext) -> Self {
        let year_options = ctx
            .years
            .iter()
            .map(|y| SelectOption::new(y.as_str(), y.as_str(), &ctx.year))
            .collect();

        let party_options = std::iter::once(SelectOption::new("", "All parties", &ctx.party))
            .chain(
                ctx.parties
                    .iter()
                    .map(|p| SelectOption::new(p.as_str(), p.as_str(), &ctx.party)),
            )
            .collect();

        let position_options = vec![
            SelectOption::new("ministers", "Ministers", ctx.position),
            SelectOption::new("mps", "MPs", ctx.position),
        ];

        let (show_mps, rows, aggregate_attendance) = match ctx.rows {
            AttendanceRows::Mps {
                rows,
                aggregate_attendance,
            } => {
                let rows = rows
                    .into_iter()
                    .map(|r| AttendanceRowView {
                        name: r.name,
                        url: r.pa_url.unwrap_or_default(),
                        party: r.party_name.unwrap_or_default(),
                        present: format!("{}%", r.present),
                        absent: format!("{}%", r.absent),
                        arrive_late: format!("{}%", r.arrive_late),
                        depart_early: format!("{}%", r.depart_early),
                        total: r.total.to_string(),
                    })
                    .collect();
                (true, rows, aggregate_attendance)
            }
            AttendanceRows::Ministers(rows) => {
                let rows = rows
                    .into_iter()
                    .map(|r| AttendanceRowView {
                        name: r.name,
                        url: r.pa_url.unwrap_or_default(),
                        party: r.party_name.unwrap_or_default(),
                        present: r.present.to_string(),
                        absent: String::new(),
                        arrive_late: String::new(),
                        depart_early: String::new(),
                        total: String::new(),
                    })
                    .collect();
                (false, rows, NO_AGGREGATE)
            }
        };

        Self {
            year: ctx.year,
            year_options,
            party_options,
            position_options,
            show_mps,
            rows,
            has_aggregate: show_mps && aggregate_attendance != NO_AGGREGATE,
            aggregate_attendance,
            download_url: ctx.download_url.to_string(),
        }
    }
}
