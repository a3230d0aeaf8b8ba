//! Walks through the common SDK calls and prints each result envelope.
//!
//! ```text
//! BASEMENT_JWT=<token from the developer playground> cargo run -p usage
//! ```
//!
//! Without `BASEMENT_JWT` the token is read from the launch URL in
//! `BASEMENT_LAUNCH_URL`. `BASEMENT_MODE` selects `embedded` (default) or
//! `external`; `RUST_LOG` controls log output.

use basement::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct SaveGame {
    test: &'static str,
    a: [u32; 3],
}

fn print_result<T: Serialize>(title: &str, result: &ApiResult<T>) -> Result<(), serde_json::Error> {
    println!("--- {title} ---");
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mode = std::env::var("BASEMENT_MODE").unwrap_or_else(|_| DeploymentMode::Embedded.into());
    let mut builder = BasementSdk::builder().deployment_mode(mode).debug(true);
    builder = match std::env::var("BASEMENT_JWT") {
        Ok(token) => builder.overwrite_jwt(token),
        Err(_) => builder.context(UrlContext::from_env()?),
    };
    let mut sdk = builder.build()?;
    tracing::info!(mode = ?sdk.deployment_mode(), "sdk ready");

    print_result("Channel Status", &sdk.get_channel_status().await)?;
    print_result(
        "Custom Activity",
        &sdk.send_custom_activity("test label", "test eventid").await,
    )?;

    let save = SaveGame {
        test: "test",
        a: [1, 2, 3],
    };
    print_result("Set State", &sdk.set_state("sdk-test", &save).await)?;

    let state = sdk.get_state(Some("sdk-test"), None, None).await;
    print_result("Get State", &state)?;
    if let Some(record) = state.data().and_then(|records| records.first()) {
        let decoded: Option<serde_json::Value> = record.decode_state()?;
        println!("decoded: {decoded:?}");
    }

    print_result("Set User Score", &sdk.set_user_score(100.0, "123").await)?;
    print_result("Get User Scores", &sdk.get_user_scores(100, 0, None).await)?;

    sdk.shutdown();
    Ok(())
}
