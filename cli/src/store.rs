//! Persistence collaborator: pushes the summary JSON into a github
//! repository through the contents api.

use {
    anyhow::{
        anyhow,
        Context,
    },
    base64::Engine,
    chrono::Utc,
    reqwest::StatusCode,
    serde::Deserialize,
    tracing::info,
};

const USER_AGENT: &str = "delegation-cli";

pub struct GithubStore {
    owner:  String,
    repo:   String,
    path:   String,
    token:  String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ContentsResponse {
    sha: String,
}

impl GithubStore {
    pub fn new(repo: &str, path: String, token: String) -> anyhow::Result<Self> {
        let (owner, repo) = repo
            .split_once('/')
            .ok_or_else(|| anyhow!("expected <owner>/<repo>, got {}", repo))?;
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            path,
            token,
            client: reqwest::Client::new(),
        })
    }

    fn contents_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/contents/{}",
            self.owner, self.repo, self.path
        )
    }

    /// Sha of the file as it currently exists, if it does. Updating an
    /// existing file without its sha is rejected by the api.
    async fn current_sha(&self) -> anyhow::Result<Option<String>> {
        let response = self
            .client
            .get(self.contents_url())
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let contents: ContentsResponse = response.error_for_status()?.json().await?;
        Ok(Some(contents.sha))
    }

    pub async fn publish(&self, payload: &str) -> anyhow::Result<()> {
        let sha = self
            .current_sha()
            .await
            .context("could not read the current file")?;
        let mut body = serde_json::json!({
            "message": format!("Add data for timestamp {}", Utc::now().timestamp_millis()),
            "content": base64::prelude::BASE64_STANDARD.encode(payload),
        });
        if let Some(sha) = sha {
            body["sha"] = serde_json::Value::String(sha);
        }
        self.client
            .put(self.contents_url())
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .context("github rejected the update")?;
        info!(path = self.path.as_str(), "summary saved to github");
        Ok(())
    }
}
