use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::follow::Publisher;
use crate::netrc::Credentials;

#[derive(Serialize)]
struct LoginRequest<'a> {
    login_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub id: String,
}

#[derive(Serialize)]
struct PostDraft<'a> {
    channel_id: &'a str,
    message: &'a str,
    user_id: &'a str,
}

#[derive(Serialize)]
struct PostPatch<'a> {
    message: &'a str,
}

/// HTTP client for the Mattermost REST API (v4).
///
/// `login` must succeed before any other call; after that the session
/// token and the authenticated user id are fixed for the process.
pub struct Client {
    server_url: String,
    agent: ureq::Agent,
    token: Option<String>,
    self_id: Option<String>,
}

impl Client {
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_defaults(),
            token: None,
            self_id: None,
        }
    }

    /// Server URL as stored (trailing slashes trimmed).
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Build a full API URL.
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v4{}", self.server_url, endpoint)
    }

    fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Authenticated GET, returning the raw response body.
    fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, String> {
        let url = self.api_url(endpoint);
        let mut req = self.agent.get(&url);
        if let Some(auth) = self.bearer() {
            req = req.header("Authorization", &auth);
        }
        for &(key, value) in params {
            req = req.query(key, value);
        }
        req.call()
            .map_err(|e| format!("GET {endpoint} failed: {e}"))?
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("GET {endpoint}: failed to read response: {e}"))
    }

    /// Authenticated POST with a JSON body, returning the raw response body.
    fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<String, String> {
        let url = self.api_url(endpoint);
        let mut req = self.agent.post(&url);
        if let Some(auth) = self.bearer() {
            req = req.header("Authorization", &auth);
        }
        req.send_json(body)
            .map_err(|e| format!("POST {endpoint} failed: {e}"))?
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("POST {endpoint}: failed to read response: {e}"))
    }

    /// Authenticated PUT with a JSON body, returning the raw response body.
    fn put<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<String, String> {
        let url = self.api_url(endpoint);
        let mut req = self.agent.put(&url);
        if let Some(auth) = self.bearer() {
            req = req.header("Authorization", &auth);
        }
        req.send_json(body)
            .map_err(|e| format!("PUT {endpoint} failed: {e}"))?
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("PUT {endpoint}: failed to read response: {e}"))
    }

    /// Authenticate with the server. The session token comes back in the
    /// `Token` response header, the user record in the body.
    pub fn login(&mut self, creds: &Credentials) -> Result<(), Error> {
        let url = self.api_url("/users/login");
        let request = LoginRequest {
            login_id: &creds.login,
            password: &creds.password,
        };

        let mut resp = self
            .agent
            .post(&url)
            .send_json(&request)
            .map_err(|e| Error::Auth(e.to_string()))?;

        let token = resp
            .headers()
            .get("Token")
            .and_then(|v| v.to_str().ok())
            .map(|t| t.to_string())
            .ok_or_else(|| Error::Auth("login response carried no session token".to_string()))?;

        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Auth(format!("failed to read login response: {e}")))?;
        let user: User = serde_json::from_str(&body)
            .map_err(|e| Error::Auth(format!("bad login response: {e}")))?;

        self.token = Some(token);
        self.self_id = Some(user.id);
        Ok(())
    }

    /// Resolve the account's team when exactly one exists. Asking for two
    /// is enough to tell "one" from "several" without listing everything.
    pub fn team_id(&self) -> Result<String, Error> {
        let body = self
            .get("/teams", &[("page", "0"), ("per_page", "2")])
            .map_err(Error::NotFound)?;
        let teams: Vec<Team> = serde_json::from_str(&body)
            .map_err(|e| Error::NotFound(format!("bad teams response: {e}")))?;
        single_team_id(&teams)
    }

    /// Resolve a channel slug to its id, within the given team name or,
    /// when none is given, within the account's sole team.
    pub fn channel_id(&self, channel: &str, team: Option<&str>) -> Result<String, Error> {
        let endpoint = match team {
            Some(team_name) => format!("/teams/name/{team_name}/channels/name/{channel}"),
            None => {
                let team_id = self.team_id()?;
                format!("/teams/{team_id}/channels/name/{channel}")
            }
        };

        let body = self.get(&endpoint, &[]).map_err(Error::NotFound)?;
        let ch: Channel = serde_json::from_str(&body)
            .map_err(|e| Error::NotFound(format!("bad channel response: {e}")))?;
        Ok(ch.id)
    }

    /// Create a new post and return its id.
    pub fn create_post(&self, channel_id: &str, text: &str) -> Result<String, Error> {
        let user_id = self
            .self_id
            .as_deref()
            .ok_or_else(|| Error::Auth("not logged in".to_string()))?;

        let draft = PostDraft {
            channel_id,
            message: text,
            user_id,
        };
        let body = self.post("/posts", &draft).map_err(Error::Publish)?;
        let post: Post = serde_json::from_str(&body)
            .map_err(|e| Error::Publish(format!("bad post response: {e}")))?;
        Ok(post.id)
    }

    /// Replace the full text of an existing post. A post that no longer
    /// exists is a hard failure, never turned back into a create.
    pub fn patch_post(&self, post_id: &str, text: &str) -> Result<String, Error> {
        let patch = PostPatch { message: text };
        let endpoint = format!("/posts/{post_id}/patch");
        let body = self.put(&endpoint, &patch).map_err(Error::Publish)?;
        let post: Post = serde_json::from_str(&body)
            .map_err(|e| Error::Publish(format!("bad patch response: {e}")))?;
        Ok(post.id)
    }
}

impl Publisher for Client {
    fn create(&mut self, channel_id: &str, text: &str) -> Result<String, Error> {
        self.create_post(channel_id, text)
    }

    fn revise(&mut self, post_id: &str, text: &str) -> Result<String, Error> {
        self.patch_post(post_id, text)
    }
}

/// The single-or-nothing team rule: one team resolves, none is a lookup
/// failure, several require an explicit --team.
pub fn single_team_id(teams: &[Team]) -> Result<String, Error> {
    match teams {
        [] => Err(Error::NotFound(
            "this account belongs to no team".to_string(),
        )),
        [team] => Ok(team.id.clone()),
        _ => Err(Error::AmbiguousTeam),
    }
}
