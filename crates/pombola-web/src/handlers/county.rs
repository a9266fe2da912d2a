//! County-performance page handler

use axum::extract::Query;

use pombola_core::county::{CountyPerformanceContext, Variant};
use pombola_core::utils::last_value;

use crate::templates::CountyPerformanceTemplate;

pub async fn county_performance(
    Query(params): Query<Vec<(String, String)>>,
) -> CountyPerformanceTemplate {
    let variant = Variant::from_query(last_value(&params, "variant"));
    CountyPerformanceContext::from_variant(variant).into()
}
