use mmpipe::client::{single_team_id, Channel, Client, Post, Team, User};
use mmpipe::error::Error;

#[test]
fn test_server_url_trailing_slash_trimmed() {
    let client = Client::new("https://chat.example.com/");
    assert_eq!(client.server_url(), "https://chat.example.com");

    let client = Client::new("https://chat.example.com");
    assert_eq!(client.server_url(), "https://chat.example.com");
}

#[test]
fn test_deserialize_user() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "u1abc",
        "username": "bot",
        "email": "bot@example.com"
    }))
    .unwrap();
    assert_eq!(user.id, "u1abc");
}

#[test]
fn test_deserialize_team_list() {
    let teams: Vec<Team> = serde_json::from_value(serde_json::json!([
        {"id": "t1", "name": "core", "display_name": "Core"},
        {"id": "t2", "name": "ops", "display_name": "Ops"}
    ]))
    .unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, "t1");
    assert_eq!(teams[1].name, "ops");
}

#[test]
fn test_deserialize_channel() {
    let ch: Channel = serde_json::from_value(serde_json::json!({
        "id": "c9",
        "name": "town-square",
        "team_id": "t1",
        "type": "O"
    }))
    .unwrap();
    assert_eq!(ch.id, "c9");
    assert_eq!(ch.name, "town-square");
}

#[test]
fn test_deserialize_post() {
    let post: Post = serde_json::from_value(serde_json::json!({
        "id": "p42",
        "channel_id": "c9",
        "message": "hello"
    }))
    .unwrap();
    assert_eq!(post.id, "p42");
}

#[test]
fn test_single_team_resolves() {
    let teams: Vec<Team> =
        serde_json::from_value(serde_json::json!([{"id": "t1", "name": "core"}])).unwrap();
    assert_eq!(single_team_id(&teams).unwrap(), "t1");
}

#[test]
fn test_zero_teams_is_not_found() {
    let err = single_team_id(&[]).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_two_teams_is_ambiguous() {
    let teams: Vec<Team> = serde_json::from_value(serde_json::json!([
        {"id": "t1", "name": "core"},
        {"id": "t2", "name": "ops"}
    ]))
    .unwrap();
    let err = single_team_id(&teams).unwrap_err();
    assert!(matches!(err, Error::AmbiguousTeam));
    // The diagnostic must point at the flag that disambiguates.
    assert!(err.to_string().contains("--team"));
}

#[test]
fn test_create_post_requires_login() {
    // No network: the missing identity is caught before any request.
    let client = Client::new("https://chat.example.com");
    let err = client.create_post("c9", "hello").unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}
