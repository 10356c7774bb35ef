use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::time::Duration;

/// Connect to MongoDB and verify the deployment answers a ping.
///
/// The returned client is process-scoped: handlers share it through the store,
/// and `main` calls `Client::shutdown` once the server has stopped.
pub async fn connect(uri: &str, database: &str, timeout: Duration) -> anyhow::Result<Client> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("recipe-server".to_string());
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);

    let client = Client::with_options(options)?;

    tokio::time::timeout(timeout, client.database(database).run_command(doc! { "ping": 1 }))
        .await
        .map_err(|_| anyhow::anyhow!("ping timed out after {}s", timeout.as_secs()))??;

    Ok(client)
}
