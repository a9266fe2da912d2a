//! Platform settings touched by the test profile.
//!
//! The test run installs every optional app, points search at its own index
//! and recomputes the feature flags from what ends up installed.

use std::collections::BTreeMap;

use serde::Serialize;

/// Middleware the test run needs so that speeches can be installed
pub const FAKE_INSTANCE_MIDDLEWARE: &str = "pombola.middleware.FakeInstanceMiddleware";

const DEFAULT_DATABASE_NAME: &str = "pombola";

const BASE_MIDDLEWARE: &[&str] = &[
    "django.middleware.common.CommonMiddleware",
    "django.contrib.sessions.middleware.SessionMiddleware",
    "django.middleware.csrf.CsrfViewMiddleware",
    "django.contrib.auth.middleware.AuthenticationMiddleware",
    "django.contrib.messages.middleware.MessageMiddleware",
];

const BASE_INSTALLED_APPS: &[&str] = &[
    "django.contrib.auth",
    "django.contrib.contenttypes",
    "django.contrib.sessions",
    "django.contrib.staticfiles",
    "haystack",
    "mapit",
    "pombola.core",
    "pombola.search",
    "pombola.slug_helpers",
];

const ALL_OPTIONAL_APPS: &[&str] = &[
    "pombola.spinner",
    "pombola.info",
    "pombola.tasks",
    "pombola.feedback",
    "pombola.scorecards",
    "pombola.place_data",
    "pombola.votematch",
    "speeches",
    "pombola.interests_register",
    "pombola.budgets",
    "pombola.bills",
    "pombola.wordcloud",
];

const APPS_REQUIRED_BY_SPEECHES: &[&str] = &["instances", "django_select2", "popolo"];

const BASE_TEST_RUNNER_ARGS: &[&str] = &["--with-doctest", "--with-yanc"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub middleware_classes: Vec<String>,
    pub installed_apps: Vec<String>,
    pub all_optional_apps: Vec<String>,
    pub apps_required_by_speeches: Vec<String>,
    pub search_index_name: String,
    pub enabled_features: BTreeMap<String, bool>,
    pub test_runner_args: Vec<String>,
    pub country_app: Option<String>,
    pub mapit_country: String,
}

impl Settings {
    /// Settings shared by every deployment before country overrides
    pub fn base() -> Self {
        let installed_apps = strings(BASE_INSTALLED_APPS);
        let all_optional_apps = strings(ALL_OPTIONAL_APPS);
        let enabled_features = make_enabled_features(&installed_apps, &all_optional_apps);

        Self {
            middleware_classes: strings(BASE_MIDDLEWARE),
            installed_apps,
            all_optional_apps,
            apps_required_by_speeches: strings(APPS_REQUIRED_BY_SPEECHES),
            search_index_name: DEFAULT_DATABASE_NAME.to_string(),
            enabled_features,
            test_runner_args: strings(BASE_TEST_RUNNER_ARGS),
            country_app: None,
            mapit_country: String::new(),
        }
    }

    /// Apply the test-run overrides. `database_name` is the value of the
    /// `DATABASE_NAME` environment variable, if set.
    pub fn for_tests(mut self, database_name: Option<&str>) -> Self {
        push_unique(&mut self.middleware_classes, FAKE_INSTANCE_MIDDLEWARE);

        self.search_index_name = format!(
            "{}_test",
            database_name.unwrap_or(DEFAULT_DATABASE_NAME)
        );

        let extra: Vec<String> = self
            .all_optional_apps
            .iter()
            .chain(&self.apps_required_by_speeches)
            .cloned()
            .collect();
        for app in &extra {
            push_unique(&mut self.installed_apps, app);
        }

        self.enabled_features = make_enabled_features(&self.installed_apps, &self.all_optional_apps);

        self.test_runner_args.push("-a".to_string());
        self.test_runner_args.push("!country".to_string());

        self.country_app = None;
        self.mapit_country = "Global".to_string();
        self
    }

    pub fn is_enabled(&self, feature: &str) -> bool {
        self.enabled_features.get(feature).copied().unwrap_or(false)
    }
}

/// Feature flag per optional app, keyed by the app name without its
/// `pombola.` prefix. An app counts as installed under either name.
pub fn make_enabled_features(
    installed_apps: &[String],
    all_optional_apps: &[String],
) -> BTreeMap<String, bool> {
    all_optional_apps
        .iter()
        .map(|app| {
            let key = app.strip_prefix("pombola.").unwrap_or(app);
            let qualified = format!("pombola.{}", key);
            let enabled = installed_apps
                .iter()
                .any(|installed| *installed == qualified || installed == key);
            (key.to_string(), enabled)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_enabled_features() {
        let installed = strings(&["pombola.core", "pombola.info", "speeches", "budgets"]);
        let optional = strings(&["pombola.info", "speeches", "pombola.budgets", "pombola.bills"]);

        let features = make_enabled_features(&installed, &optional);
        assert_eq!(
            features,
            BTreeMap::from([
                ("info".to_string(), true),
                ("speeches".to_string(), true),
                ("budgets".to_string(), true),
                ("bills".to_string(), false),
            ])
        );
    }

    #[test]
    fn test_base_has_no_optional_features() {
        let base = Settings::base();
        assert!(base.enabled_features.values().all(|enabled| !enabled));
        assert!(!base.is_enabled("speeches"));
    }

    #[test]
    fn test_for_tests_profile() {
        let settings = Settings::base().for_tests(None);

        assert_eq!(settings.search_index_name, "pombola_test");
        assert!(settings.middleware_classes.iter().any(|m| m == FAKE_INSTANCE_MIDDLEWARE));
        assert!(settings.enabled_features.values().all(|enabled| *enabled));
        assert!(settings.is_enabled("speeches"));
        assert!(settings.installed_apps.iter().any(|a| a == "instances"));
        assert!(settings.test_runner_args.ends_with(&["-a".to_string(), "!country".to_string()]));
        assert_eq!(settings.country_app, None);
        assert_eq!(settings.mapit_country, "Global");
    }

    #[test]
    fn test_for_tests_uses_database_name() {
        let settings = Settings::base().for_tests(Some("za_pombola"));
        assert_eq!(settings.search_index_name, "za_pombola_test");
    }

    #[test]
    fn test_for_tests_does_not_duplicate() {
        let mut base = Settings::base();
        base.middleware_classes.push(FAKE_INSTANCE_MIDDLEWARE.to_string());
        base.installed_apps.push("speeches".to_string());

        let settings = base.for_tests(None);
        let count = |list: &[String], item: &str| list.iter().filter(|x| *x == item).count();
        assert_eq!(count(&settings.middleware_classes, FAKE_INSTANCE_MIDDLEWARE), 1);
        assert_eq!(count(&settings.installed_apps, "speeches"), 1);
    }
}
