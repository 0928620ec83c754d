//! Client for the remote user directory API.

use gloo_net::http::Request;
use serde::Deserialize;

use crate::types::{User, UserLocation, UserName, UserPicture};

const API_BASE: &str = "https://randomuser.me/api/";

/// One page of loosely-typed directory records.
#[derive(Debug, Clone, Deserialize)]
struct DirectoryResponse {
    #[serde(default)]
    results: Vec<DirectoryRecord>,
}

/// A raw directory record. Fields the canonical shape does not know are
/// ignored; missing ones default to empty.
#[derive(Debug, Clone, Deserialize)]
struct DirectoryRecord {
    #[serde(default)]
    name: UserName,
    #[serde(default)]
    email: String,
    #[serde(default)]
    picture: UserPicture,
    #[serde(default)]
    location: UserLocation,
    #[serde(default)]
    login: DirectoryLogin,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DirectoryLogin {
    #[serde(default)]
    uuid: String,
}

impl From<DirectoryRecord> for User {
    fn from(record: DirectoryRecord) -> Self {
        User {
            // The remote login identifier becomes the local record id.
            id: record.login.uuid,
            name: record.name,
            email: record.email,
            picture: record.picture,
            location: record.location,
        }
    }
}

/// Fetches `count` users from the remote directory and maps them into the
/// canonical shape. Failures are returned, never swallowed; the table
/// surfaces them with a retry.
pub async fn fetch_users(count: usize) -> Result<Vec<User>, String> {
    let url = format!("{}?results={}", API_BASE, count);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let payload: DirectoryResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(payload.results.into_iter().map(User::from).collect())
}
