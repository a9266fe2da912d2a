//! Route configuration.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/county-performance/", get(handlers::county::county_performance))
        .route("/mp-attendance/", get(handlers::attendance::mp_attendance))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::path::Path;
    use std::time::Duration;

    use axum::http::StatusCode;
    use chrono::NaiveDate;

    use pombola_core::attendance::CACHE_REGION;
    use pombola_core::cache::CacheManager;
    use pombola_core::models::{AnnualAttendance, AttendanceCode, Meeting, Member, MemberAttendance};
    use pombola_core::Config;

    const ATTENDANCE_URL: &str = "http://127.0.0.1:9/meetings-by-member/";

    fn test_config(dir: &Path) -> Config {
        Config {
            attendance_url: ATTENDANCE_URL.to_string(),
            api_timeout: Duration::from_secs(2),
            cache_dir: dir.join("cache"),
            positions_file: dir.join("positions.json"),
            ..Config::default()
        }
    }

    async fn serve(config: Config) -> SocketAddr {
        let app = create_router(AppState::new(config).expect("state"));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
        addr
    }

    async fn get(addr: SocketAddr, uri: &str) -> (StatusCode, String) {
        let response = reqwest::get(format!("http://{}{}", addr, uri))
            .await
            .expect("send request");
        let status = StatusCode::from_u16(response.status().as_u16()).expect("status");
        (status, response.text().await.expect("body"))
    }

    fn meeting(month: u32, code: AttendanceCode) -> Meeting {
        Meeting {
            date: NaiveDate::from_ymd_opt(2016, month, 1).unwrap(),
            attendance: code,
        }
    }

    fn seed_cache(config: &Config) {
        let data = vec![AnnualAttendance {
            end_date: NaiveDate::from_ymd_opt(2016, 12, 31).unwrap(),
            meetings_by_member: vec![
                MemberAttendance::new(
                    Member {
                        name: "Doe, Ms J".to_string(),
                        pa_url: Some("http://www.pa.org.za/person/jane-doe/".to_string()),
                        party_name: Some("ANC".to_string()),
                    },
                    vec![
                        meeting(2, AttendanceCode::Present),
                        meeting(3, AttendanceCode::Absent),
                        meeting(4, AttendanceCode::Present),
                    ],
                ),
                MemberAttendance::new(
                    Member {
                        name: "Roe, Mr J".to_string(),
                        pa_url: Some("http://www.pa.org.za/person/john-roe/".to_string()),
                        party_name: Some("DA".to_string()),
                    },
                    vec![meeting(2, AttendanceCode::Late)],
                ),
            ],
        }];

        CacheManager::new(config.cache_dir.clone())
            .unwrap()
            .region(CACHE_REGION)
            .unwrap()
            .set(&config.attendance_url, &data)
            .unwrap();
    }

    #[tokio::test]
    async fn test_county_performance_variants() {
        let dir = tempfile::tempdir().unwrap();
        let addr = serve(test_config(dir.path())).await;

        let (status, body) = get(addr, "/county-performance/?variant=o").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"id="opportunity""#));
        assert!(!body.contains(r#"id="threat""#));
        assert!(!body.contains("site-banner"));
        assert!(body.contains(r#"id="petition-form""#));
        assert!(body.contains(r#"id="senate-form""#));

        let (_, body) = get(addr, "/county-performance/?variant=t").await;
        assert!(body.contains(r#"id="threat""#));
        assert!(!body.contains(r#"id="opportunity""#));

        let (_, unset) = get(addr, "/county-performance/").await;
        let (status, invalid) = get(addr, "/county-performance/?variant=zzz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unset, invalid);
        assert!(!unset.contains(r#"id="opportunity""#));
        assert!(!unset.contains(r#"id="threat""#));
    }

    #[tokio::test]
    async fn test_repeated_parameters_take_last_value() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        seed_cache(&config);
        let addr = serve(config).await;

        let (status, body) = get(addr, "/county-performance/?variant=o&variant=t").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"id="threat""#));
        assert!(!body.contains(r#"id="opportunity""#));

        let (status, body) = get(addr, "/mp-attendance/?position=mps&year=2017&year=2016").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Committee meeting attendance 2016"));
        assert!(body.contains(r#"<strong id="aggregate-attendance">75%</strong>"#));
    }

    #[tokio::test]
    async fn test_attendance_from_cache_mps() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        seed_cache(&config);

        let (status, body) = get(serve(config).await, "/mp-attendance/?position=mps&year=2016").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a href="/person/jane-doe/">Doe, Ms J</a>"#));
        assert!(body.contains("<td>67%</td>"));
        // 3 present of 4 meetings
        assert!(body.contains(r#"<strong id="aggregate-attendance">75%</strong>"#));
        assert!(body.contains(r#"<option value="DA">DA</option>"#));
        assert!(body.contains("site-banner"));
    }

    #[tokio::test]
    async fn test_attendance_party_with_no_meetings() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        seed_cache(&config);

        let (status, body) = get(serve(config).await, "/mp-attendance/?position=mps&party=EFF").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No attendance data for this selection."));
        assert!(!body.contains(r#"id="aggregate-attendance""#));
    }

    #[tokio::test]
    async fn test_attendance_ministers_from_positions() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        seed_cache(&config);
        std::fs::write(
            &config.positions_file,
            r#"{"positions": [
                {"person": {"slug": "jane-doe", "given_name": "Jane", "family_name": "Doe", "title": "Ms", "parties": ["anc"]},
                 "title": "Minister of Finance", "title_slug": "minister-of-finance",
                 "start_date": "2016-03-15", "end_date": null},
                {"person": {"slug": "sam-poe", "given_name": "Sam Lee", "family_name": "Poe", "title": "Dr", "parties": ["da"]},
                 "title": "Deputy Minister of Health", "title_slug": "deputy-minister-of-health",
                 "start_date": "2015-01-01", "end_date": null}
            ]}"#,
        )
        .unwrap();

        let (status, body) = get(serve(config).await, "/mp-attendance/").await;
        assert_eq!(status, StatusCode::OK);
        // Jane attended one of her two meetings as minister
        assert!(body.contains(r#"<a href="/person/jane-doe/">Doe, Ms J</a>"#));
        assert!(body.contains("<td>1</td>"));
        // Sam has no meetings at all
        assert!(body.contains(r#"<a href="/person/sam-poe/">Poe, Dr SL</a>"#));
        assert!(body.contains("<td>0</td>"));
        assert!(!body.contains("Roe, Mr J"));
    }

    #[tokio::test]
    async fn test_attendance_upstream_failure_is_server_error() {
        let dir = tempfile::tempdir().unwrap();

        let addr = serve(test_config(dir.path())).await;

        let (status, body) = get(addr, "/mp-attendance/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Server Error (500)"));
    }
}
