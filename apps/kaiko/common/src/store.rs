//! Read/insert access to the record store.
//!
//! Handlers and the query executor only ever see [`RecordStore`]; the
//! sea-orm backed [`DatabaseStore`] is constructed once at startup and
//! injected.

use crate::error::ServiceError;
use crate::models::{ChatMembership, Friend, FriendProfile, NewUser, SessionSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::friendship::FriendshipStatus;
use entity::{
    Game, Message, User, chat, chat_participant, friendship, game, game_session,
    game_session_player, message, user,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Looks a user up by external identity id. `None` when absent.
    async fn find_user(&self, privy_id: &str) -> Result<Option<User>, ServiceError>;

    /// Inserts a user. A duplicate identity id is reported as `Conflict`.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, ServiceError>;

    /// Accepted friendships in either direction, newest first.
    async fn accepted_friends(&self, user_id: Uuid) -> Result<Vec<Friend>, ServiceError>;

    async fn active_games(&self) -> Result<Vec<Game>, ServiceError>;

    /// Sessions the user played in, most recently joined first.
    async fn recent_sessions(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<SessionSummary>, ServiceError>;

    async fn chat_memberships(&self, user_id: Uuid) -> Result<Vec<ChatMembership>, ServiceError>;

    async fn last_message(&self, chat_id: Uuid) -> Result<Option<Message>, ServiceError>;

    /// Messages in the chat created strictly after `after`, or all of them
    /// when `after` is `None`.
    async fn count_messages_after(
        &self,
        chat_id: Uuid,
        after: Option<DateTime<Utc>>,
    ) -> Result<u64, ServiceError>;
}

#[derive(Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(database_url: &str, sql_logging: bool) -> Result<Self, ServiceError> {
        let db = Database::connect(
            ConnectOptions::new(database_url)
                .sqlx_logging(sql_logging)
                .to_owned(),
        )
        .await?;

        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RecordStore for DatabaseStore {
    async fn find_user(&self, privy_id: &str) -> Result<Option<User>, ServiceError> {
        let user = user::Entity::find()
            .filter(user::Column::PrivyId.eq(privy_id))
            .one(&self.db)
            .await?;

        Ok(user)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, ServiceError> {
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            privy_id: Set(new_user.privy_id),
            email_address: Set(new_user.email_address),
            username: Set(new_user.username),
            bio: Set(new_user.bio),
            avatar_type: Set(new_user.avatar_type),
            avatar: Set(new_user.avatar),
            wallet_address: Set(new_user.wallet_address),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(user) => {
                debug!("Inserted user {} ({})", user.id, user.privy_id);
                Ok(user)
            }
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    debug!("Duplicate user rejected by store: {}", detail);
                    Err(ServiceError::Conflict("User already exists".to_string()))
                }
                _ => Err(err.into()),
            },
        }
    }

    async fn accepted_friends(&self, user_id: Uuid) -> Result<Vec<Friend>, ServiceError> {
        let friendships = friendship::Entity::find()
            .filter(friendship::Column::Status.eq(FriendshipStatus::Accepted))
            .filter(
                Condition::any()
                    .add(friendship::Column::RequesterId.eq(user_id))
                    .add(friendship::Column::AddresseeId.eq(user_id)),
            )
            .order_by_desc(friendship::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let counterpart_ids: Vec<Uuid> = friendships
            .iter()
            .filter_map(|f| f.counterpart_of(user_id))
            .collect();
        if counterpart_ids.is_empty() {
            return Ok(Vec::new());
        }

        let profiles: HashMap<Uuid, User> = user::Entity::find()
            .filter(user::Column::Id.is_in(counterpart_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        debug!(
            "Loaded {} accepted friendships for user {}",
            friendships.len(),
            user_id
        );

        Ok(friendships
            .into_iter()
            .filter_map(|f| {
                let profile = profiles.get(&f.counterpart_of(user_id)?)?;
                Some(Friend {
                    friendship_id: f.id,
                    status: f.status,
                    created_at: f.created_at,
                    friend: FriendProfile {
                        id: profile.id,
                        username: profile.username.clone(),
                        avatar: profile.avatar.clone(),
                    },
                })
            })
            .collect())
    }

    async fn active_games(&self) -> Result<Vec<Game>, ServiceError> {
        let games = game::Entity::find()
            .filter(game::Column::IsActive.eq(true))
            .order_by_asc(game::Column::Name)
            .all(&self.db)
            .await?;

        Ok(games)
    }

    async fn recent_sessions(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<SessionSummary>, ServiceError> {
        let players = game_session_player::Entity::find()
            .filter(game_session_player::Column::UserId.eq(user_id))
            .order_by_desc(game_session_player::Column::JoinedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        if players.is_empty() {
            return Ok(Vec::new());
        }

        let session_ids: Vec<Uuid> = players.iter().map(|p| p.session_id).collect();
        let mut sessions: HashMap<Uuid, _> = game_session::Entity::find()
            .filter(game_session::Column::Id.is_in(session_ids))
            .find_also_related(game::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(session, game)| (session.id, (session, game)))
            .collect();

        // Keep the join-time ordering of the player rows.
        Ok(players
            .into_iter()
            .filter_map(|player| {
                let (session, game) = sessions.remove(&player.session_id)?;
                Some(SessionSummary {
                    session,
                    joined_at: player.joined_at,
                    game,
                })
            })
            .collect())
    }

    async fn chat_memberships(&self, user_id: Uuid) -> Result<Vec<ChatMembership>, ServiceError> {
        let rows = chat_participant::Entity::find()
            .filter(chat_participant::Column::UserId.eq(user_id))
            .find_also_related(chat::Entity)
            .order_by_desc(chat::Column::UpdatedAt)
            .order_by_asc(chat::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(participant, chat)| {
                Some(ChatMembership {
                    chat: chat?,
                    last_read_at: participant.last_read_at,
                })
            })
            .collect())
    }

    async fn last_message(&self, chat_id: Uuid) -> Result<Option<Message>, ServiceError> {
        let message = message::Entity::find()
            .filter(message::Column::ChatId.eq(chat_id))
            .order_by_desc(message::Column::CreatedAt)
            .one(&self.db)
            .await?;

        Ok(message)
    }

    async fn count_messages_after(
        &self,
        chat_id: Uuid,
        after: Option<DateTime<Utc>>,
    ) -> Result<u64, ServiceError> {
        let mut query = message::Entity::find().filter(message::Column::ChatId.eq(chat_id));
        if let Some(after) = after {
            query = query.filter(message::Column::CreatedAt.gt(after));
        }

        Ok(query.count(&self.db).await?)
    }
}
