use crate::{Location, SourceError};

use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads the raw bytes behind a [`Location`].
pub async fn read(location: &Location) -> Result<Vec<u8>, SourceError> {
    match location {
        Location::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| SourceError::Io {
                    location: location.to_string(),
                    source,
                })
        }
        Location::Url(url) => fetch_url(url).await,
    }
}

async fn fetch_url(url: &str) -> Result<Vec<u8>, SourceError> {
    let fetch_err = |source| SourceError::Fetch {
        location: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_err)?;

    log::debug!("Fetching {url}");
    let response = client.get(url).send().await.map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            location: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(fetch_err)?;
    Ok(body.to_vec())
}
