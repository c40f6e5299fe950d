use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Result, ShowcaseError};
use crate::model::Team;
use crate::normalize::{normalize_team, normalize_teams};

/// Read-only client for the showcase backend.
///
/// `ShowcaseClient` wraps a [`reqwest::Client`] and returns records already
/// run through the normalizer.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> showcase_data::Result<()> {
/// use showcase_data::ShowcaseClient;
///
/// let client = ShowcaseClient::new("https://api.example.com");
/// let projects = client.get_projects().await?;
/// println!("Found {} projects", projects.len());
/// # Ok(())
/// # }
/// ```
pub struct ShowcaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShowcaseClient {
    /// Create a new client with default settings against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the showcase project summaries.
    #[instrument(skip(self))]
    pub async fn get_projects(&self) -> Result<Vec<Team>> {
        let url = self.endpoint(&["showcase", "projects"])?;
        let body = get_json(&self.http, url.as_str()).await?;
        let projects = normalize_teams(&body);
        debug!(count = projects.len(), "fetched showcase projects");
        Ok(projects)
    }

    /// Fetch a single team's detail record. A 404 or an empty payload
    /// becomes [`ShowcaseError::NotFound`].
    #[instrument(skip(self))]
    pub async fn get_team(&self, id: &str) -> Result<Team> {
        let id = id.trim();
        if matches!(id, "" | "." | "..") {
            return Err(ShowcaseError::NotFound { id: id.to_owned() });
        }
        let url = self.endpoint(&["teams", id])?;
        let body = get_json(&self.http, url.as_str())
            .await
            .map_err(|err| match err {
                ShowcaseError::UnexpectedStatus { status, .. }
                    if status == reqwest::StatusCode::NOT_FOUND =>
                {
                    ShowcaseError::NotFound { id: id.to_owned() }
                }
                other => other,
            })?;

        let record = match body.get("data") {
            Some(inner) if inner.is_object() => inner,
            _ => &body,
        };
        if !record.as_object().is_some_and(|o| !o.is_empty()) {
            return Err(ShowcaseError::NotFound { id: id.to_owned() });
        }

        let team = normalize_team(record);
        debug!(id = %team.id, members = team.members.len(), "fetched team");
        Ok(team)
    }

    /// Append `segments` to the base URL path, percent-encoding each one so
    /// caller input cannot escape its segment.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let invalid = |reason: String| ShowcaseError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Fetch a URL and parse the response body as JSON.
async fn get_json(client: &reqwest::Client, url: &str) -> Result<Value> {
    debug!(url, "fetching resource");

    let response = client.get(url).send().await.map_err(|e| ShowcaseError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ShowcaseError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| ShowcaseError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(serde_json::from_str(&body)?)
}
