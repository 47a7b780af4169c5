//! Example: Send a signed request and branch on the status code.
//!
//! Run with: cargo run --example raw_request -- /key/users org=<organization id>

use std::sync::Arc;

use pritunl_api_client::auth::EnvCredentials;
use pritunl_api_client::rest::{PritunlClient, Request};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "/status".to_string());

    let mut request = Request::get(path);
    for pair in args {
        if let Some((key, value)) = pair.split_once('=') {
            request = request.query(key, value);
        }
    }

    let client = PritunlClient::builder()
        .credentials(Arc::new(EnvCredentials::from_env()?))
        .build()?;

    let decoded = client.execute_json::<serde_json::Value>(request).await?;
    match decoded.value {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None if decoded.response.is_unauthorized() => eprintln!("unauthorized"),
        None => eprintln!("not found"),
    }

    Ok(())
}
