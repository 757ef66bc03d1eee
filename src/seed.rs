//! Seeds the transaction store from a remote JSON document.

use axum::{Json, extract::State};

use crate::{
    Error, MessageBody,
    app_state::SeedState,
    stores::TransactionStore,
    transaction::NewTransaction,
};

/// The seed document used when no other URL is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The message sent to the client after a successful seed.
pub const SEED_SUCCESS_MESSAGE: &str = "Database initialized with seed data";

/// Fetch the list of transactions at `url`.
///
/// # Errors
/// Returns [Error::SeedFetch] if the request fails, the response has an error
/// status, or the body is not a JSON array of transactions.
pub async fn fetch_seed_transactions(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<NewTransaction>, Error> {
    let transactions = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<NewTransaction>>()
        .await?;

    Ok(transactions)
}

/// Replace the contents of `store` with the transactions at `url`.
///
/// Returns the number of transactions in the store afterwards.
///
/// # Errors
/// Returns an error if the seed document cannot be fetched or the store
/// cannot be written to. If fetching fails the store is left untouched.
pub async fn seed_database(
    client: &reqwest::Client,
    url: &str,
    store: &impl TransactionStore,
) -> Result<usize, Error> {
    let transactions = fetch_seed_transactions(client, url)
        .await
        .inspect_err(|error| tracing::error!("could not fetch seed data from {url}: {error}"))?;

    let count = store.replace_all(transactions)?;
    tracing::info!("Seeded the database with {count} transactions from {url}");

    Ok(count)
}

/// Replace every transaction with a freshly fetched copy of the seed document.
pub async fn get_init<T>(State(state): State<SeedState<T>>) -> Result<Json<MessageBody>, Error>
where
    T: TransactionStore,
{
    seed_database(&state.http_client, &state.seed_url, &state.transaction_store).await?;

    Ok(Json(MessageBody {
        message: SEED_SUCCESS_MESSAGE.to_owned(),
    }))
}
