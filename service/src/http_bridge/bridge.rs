use crate::http_bridge::model::{ErrorResponse, SpectrumResponse};
use crate::workflow::runner::Runner;
use anyhow::Context;
use serde_json::json;
use spectrumcore::processing::QueryParams;
use spectrumcore::telemetry::LogManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use warp::{http::StatusCode, Filter, Rejection, Reply};

/// HTTP routes: `GET /getData`, `GET /health` and `POST /reload`.
pub fn routes(
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let runner_filter = warp::any().map(move || runner.clone());

    let data_route = warp::path("getData")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<QueryParams>())
        .and(runner_filter.clone())
        .map(|params: QueryParams, runner: Arc<Runner>| match runner.query(&params) {
            Ok(outcome) => warp::reply::with_status(
                warp::reply::json(&SpectrumResponse::from(&outcome)),
                StatusCode::OK,
            ),
            Err(err) => warp::reply::with_status(
                warp::reply::json(&ErrorResponse::new(err)),
                StatusCode::BAD_REQUEST,
            ),
        });

    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|runner: Arc<Runner>| {
            let status = runner.status();
            warp::reply::json(&json!({
                "status": "ok",
                "records": status.records,
                "rows_read": status.rows_read,
                "dropped_rows": status.dropped_rows,
                "queries": status.metrics.queries,
                "rejected": status.metrics.rejected,
                "empty_results": status.metrics.empty_results,
                "records_returned": status.metrics.records_returned,
            }))
        });

    let reload_route = warp::path("reload")
        .and(warp::path::end())
        .and(warp::post())
        .and(runner_filter)
        .and_then(|runner: Arc<Runner>| async move {
            let reloaded = tokio::task::spawn_blocking(move || runner.reload())
                .await
                .context("joining reload task")
                .and_then(|result| result);
            let reply = match reloaded {
                Ok(report) => warp::reply::with_status(
                    warp::reply::json(&json!({
                        "status": "ok",
                        "records": report.records,
                        "rows_read": report.rows_read,
                        "dropped_rows": report.dropped_rows,
                    })),
                    StatusCode::OK,
                ),
                Err(err) => {
                    LogManager::new("http").warn(&format!("reload failed: {:#}", err));
                    warp::reply::with_status(
                        warp::reply::json(&ErrorResponse::new(format!("{:#}", err))),
                        StatusCode::INTERNAL_SERVER_ERROR,
                    )
                }
            };
            Ok::<_, Rejection>(reply)
        });

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"]);

    data_route.or(health_route).or(reload_route).with(cors)
}

/// Serves the routes on `addr` until Ctrl+C.
pub fn serve(runner: Arc<Runner>, addr: SocketAddr) -> anyhow::Result<()> {
    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating runtime for HTTP bridge")?;

    runtime.block_on(async move {
        let (bound, server) = warp::serve(routes(runner))
            .try_bind_with_graceful_shutdown(addr, async {
                if signal::ctrl_c().await.is_err() {
                    LogManager::new("http").warn("could not listen for Ctrl+C; stopping bridge");
                }
            })
            .with_context(|| format!("binding HTTP bridge to {}", addr))?;
        LogManager::new("http").record(&format!(
            "HTTP bridge listening on http://{} (Ctrl+C to stop)",
            bound
        ));
        server.await;
        LogManager::new("http").record("HTTP bridge stopped");
        Ok::<(), anyhow::Error>(())
    })
}
