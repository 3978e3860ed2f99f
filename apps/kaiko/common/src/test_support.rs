use crate::error::ServiceError;
use crate::models::{ChatMembership, Friend, NewUser, SessionSummary};
use crate::store::RecordStore;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use entity::chat::ChatType;
use entity::{Chat, Game, GameSession, Message, User};
use std::sync::Mutex;
use uuid::Uuid;

/// Which store call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    UserLookup,
    Insert,
    Friends,
    Games,
    Sessions,
    Memberships,
    LastMessage,
    UnreadCount,
}

#[derive(Default)]
pub struct FakeStore {
    users: Mutex<Vec<User>>,
    friends: Vec<Friend>,
    games: Vec<Game>,
    sessions: Vec<SessionSummary>,
    memberships: Vec<ChatMembership>,
    messages: Vec<Message>,
    failure: Option<Failure>,
}

impl FakeStore {
    pub fn with_user(mut self, user: User) -> Self {
        self.users.get_mut().unwrap().push(user);
        self
    }

    pub fn with_game(mut self, game: Game) -> Self {
        self.games.push(game);
        self
    }

    pub fn with_membership(mut self, chat: Chat, last_read_at: Option<DateTime<Utc>>) -> Self {
        self.memberships.push(ChatMembership { chat, last_read_at });
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Adds `count` sessions, most recently joined first.
    pub fn with_sessions(mut self, count: usize) -> Self {
        let now = Utc::now();
        for i in 0..count {
            self.sessions.push(SessionSummary {
                session: GameSession {
                    id: Uuid::new_v4(),
                    game_id: Uuid::new_v4(),
                    status: "completed".to_string(),
                    started_at: None,
                    completed_at: None,
                    created_at: now,
                },
                joined_at: now - Duration::minutes(i as i64),
                game: None,
            });
        }
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check(&self, call: Failure) -> Result<(), ServiceError> {
        if self.failure == Some(call) {
            return Err(ServiceError::Database(sea_orm::DbErr::Custom(format!(
                "injected {:?} failure",
                call
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn find_user(&self, privy_id: &str) -> Result<Option<User>, ServiceError> {
        self.check(Failure::UserLookup)?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.privy_id == privy_id).cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, ServiceError> {
        self.check(Failure::Insert)?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.privy_id == new_user.privy_id) {
            return Err(ServiceError::Conflict("User already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            privy_id: new_user.privy_id,
            email_address: new_user.email_address,
            username: new_user.username,
            bio: new_user.bio,
            avatar_type: new_user.avatar_type,
            avatar: new_user.avatar,
            wallet_address: new_user.wallet_address,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn accepted_friends(&self, _user_id: Uuid) -> Result<Vec<Friend>, ServiceError> {
        self.check(Failure::Friends)?;
        Ok(self.friends.clone())
    }

    async fn active_games(&self) -> Result<Vec<Game>, ServiceError> {
        self.check(Failure::Games)?;
        Ok(self.games.iter().filter(|g| g.is_active).cloned().collect())
    }

    async fn recent_sessions(
        &self,
        _user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<SessionSummary>, ServiceError> {
        self.check(Failure::Sessions)?;
        Ok(self.sessions.iter().take(limit as usize).cloned().collect())
    }

    async fn chat_memberships(&self, _user_id: Uuid) -> Result<Vec<ChatMembership>, ServiceError> {
        self.check(Failure::Memberships)?;
        Ok(self.memberships.clone())
    }

    async fn last_message(&self, chat_id: Uuid) -> Result<Option<Message>, ServiceError> {
        self.check(Failure::LastMessage)?;
        Ok(self
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .max_by_key(|m| m.created_at)
            .cloned())
    }

    async fn count_messages_after(
        &self,
        chat_id: Uuid,
        after: Option<DateTime<Utc>>,
    ) -> Result<u64, ServiceError> {
        self.check(Failure::UnreadCount)?;
        Ok(self
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .filter(|m| after.is_none_or(|after| m.created_at > after))
            .count() as u64)
    }
}

pub fn user(privy_id: &str) -> User {
    User {
        id: Uuid::new_v4(),
        privy_id: privy_id.to_string(),
        email_address: format!("{}@kaiko.test", privy_id),
        username: privy_id.to_string(),
        bio: None,
        avatar_type: entity::user::DEFAULT_AVATAR_TYPE.to_string(),
        avatar: None,
        wallet_address: None,
        created_at: Utc::now(),
    }
}

pub fn chat(name: &str) -> Chat {
    let now = Utc::now();
    Chat {
        id: Uuid::new_v4(),
        name: Some(name.to_string()),
        chat_type: ChatType::Group,
        created_at: now,
        updated_at: now,
    }
}

pub fn message(chat_id: Uuid, content: &str, created_at: DateTime<Utc>) -> Message {
    Message {
        id: Uuid::new_v4(),
        chat_id,
        sender_id: Uuid::new_v4(),
        content: content.to_string(),
        created_at,
    }
}

pub fn game(name: &str, is_active: bool) -> Game {
    Game {
        id: Uuid::new_v4(),
        name: name.to_string(),
        icon: None,
        game_type: "arcade".to_string(),
        is_active,
        created_at: Utc::now(),
    }
}
