//! Example: List organizations and their users.
//!
//! Run with: PRITUNL_HOST=... PRITUNL_TOKEN=... PRITUNL_SECRET=... cargo run --example list_organizations

use pritunl_api_client::rest::PritunlClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = PritunlClientBuilder::from_env()?.build()?;

    for org in client.list_organizations().await? {
        println!("{} ({})", org.name, org.id);
        for user in client.list_users(&org.id).await? {
            let state = if user.disabled { "disabled" } else { "enabled" };
            println!("  {} <{}> {}", user.name, user.email.unwrap_or_default(), state);
        }
    }

    Ok(())
}
