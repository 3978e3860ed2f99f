use chrono::{DateTime, Utc};
use entity::friendship::FriendshipStatus;
use entity::{Chat, Game, GameSession, Message, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Selector for `GET /users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Confirm,
    FetchUser,
    FetchHubData,
}

impl Intent {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "confirm" => Some(Intent::Confirm),
            "fetch-user" => Some(Intent::FetchUser),
            "fetch-hub-data" => Some(Intent::FetchHubData),
            _ => None,
        }
    }
}

/// Body of `POST /users`. Everything is optional at the wire level so that
/// missing fields surface as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    pub email_address: Option<String>,
    pub username: Option<String>,
    pub privy_id: Option<String>,
    pub bio: Option<String>,
    pub avatar_type: Option<String>,
    pub avatar: Option<String>,
    pub wallet_address: Option<String>,
}

/// A validated user row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub privy_id: String,
    pub email_address: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar_type: String,
    pub avatar: Option<String>,
    pub wallet_address: Option<String>,
}

/// Result of the `confirm` intent. Absence is a normal outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub exists: bool,
    pub user: Option<User>,
}

/// Public profile of the other side of a friendship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendProfile {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friend {
    pub friendship_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub friend: FriendProfile,
}

/// A game session the user played in, with its game expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    #[serde(flatten)]
    pub session: GameSession,
    pub joined_at: DateTime<Utc>,
    pub game: Option<Game>,
}

/// A chat the user belongs to, with their read marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMembership {
    pub chat: Chat,
    pub last_read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubChat {
    #[serde(flatten)]
    pub chat: Chat,
    pub last_read_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastMessage")]
    pub last_message: Option<Message>,
    #[serde(rename = "unreadCount")]
    pub unread_count: u64,
}

/// Everything the hub screen needs in one response.
#[derive(Debug, Clone, Serialize)]
pub struct HubSnapshot {
    pub user: User,
    pub friends: Vec<Friend>,
    pub games: Vec<Game>,
    pub sessions: Vec<SessionSummary>,
    pub chats: Vec<HubChat>,
}
