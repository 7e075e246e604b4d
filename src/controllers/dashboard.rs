use axum::Json;
use axum::extract::State;
use common::Error;
use models::DashboardStats;
use store::Store;

#[instrument(skip(store))]
pub(crate) async fn get_dashboard_stats(
	State(store): State<Store>,
) -> Result<Json<DashboardStats>, Error> {
	let stats = DashboardStats::collect(&store).await?;

	Ok(Json(stats))
}
