//! Builds the read-only views served by `GET /users`.

use crate::config::{ServiceConfig, UnreadPolicy};
use crate::error::ServiceError;
use crate::models::{ChatMembership, Confirmation, HubChat, HubSnapshot};
use crate::store::RecordStore;
use entity::User;
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct HubOptions {
    /// Upper bound on chats enriched at the same time.
    pub chat_detail_concurrency: usize,
    pub recent_sessions_limit: u64,
    pub unread_policy: UnreadPolicy,
}

impl Default for HubOptions {
    fn default() -> Self {
        Self {
            chat_detail_concurrency: 8,
            recent_sessions_limit: 10,
            unread_policy: UnreadPolicy::Zero,
        }
    }
}

impl From<&ServiceConfig> for HubOptions {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            chat_detail_concurrency: config.chat_detail_concurrency,
            recent_sessions_limit: config.recent_sessions_limit,
            unread_policy: config.unread_policy,
        }
    }
}

#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn RecordStore>,
    options: HubOptions,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn RecordStore>, options: HubOptions) -> Self {
        Self { store, options }
    }

    pub async fn confirm(&self, privy_id: &str) -> Result<Confirmation, ServiceError> {
        let user = self.store.find_user(privy_id).await?;

        Ok(Confirmation {
            exists: user.is_some(),
            user,
        })
    }

    pub async fn fetch_user(&self, privy_id: &str) -> Result<User, ServiceError> {
        self.store
            .find_user(privy_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    /// Aggregates the hub snapshot. Any failed sub-read aborts the whole
    /// call with `AggregationFailed`; there is no partial result.
    pub async fn fetch_hub_data(&self, privy_id: &str) -> Result<HubSnapshot, ServiceError> {
        let user = self.fetch_user(privy_id).await?;

        let (friends, games, sessions, memberships) = futures::try_join!(
            self.store.accepted_friends(user.id),
            self.store.active_games(),
            self.store
                .recent_sessions(user.id, self.options.recent_sessions_limit),
            self.store.chat_memberships(user.id),
        )
        .map_err(|e| {
            warn!("Hub aggregation for user {} failed: {}", user.id, e);
            ServiceError::aggregation(e)
        })?;

        debug!(
            "User {}: {} friends, {} games, {} sessions, {} chats",
            user.id,
            friends.len(),
            games.len(),
            sessions.len(),
            memberships.len()
        );

        // `buffered` yields in input order, so chats keep membership order.
        let chats = stream::iter(memberships)
            .map(|membership| self.chat_details(membership))
            .buffered(self.options.chat_detail_concurrency.max(1))
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| {
                warn!("Chat enrichment for user {} failed: {}", user.id, e);
                ServiceError::aggregation(e)
            })?;

        Ok(HubSnapshot {
            user,
            friends,
            games,
            sessions,
            chats,
        })
    }

    async fn chat_details(&self, membership: ChatMembership) -> Result<HubChat, ServiceError> {
        let chat_id = membership.chat.id;
        let last_message = self.store.last_message(chat_id).await?;

        let unread_count = match (membership.last_read_at, self.options.unread_policy) {
            (Some(read_at), _) => {
                self.store
                    .count_messages_after(chat_id, Some(read_at))
                    .await?
            }
            (None, UnreadPolicy::All) => self.store.count_messages_after(chat_id, None).await?,
            // Never opened: reported as 0 unless UnreadPolicy::All.
            (None, UnreadPolicy::Zero) => 0,
        };

        Ok(HubChat {
            chat: membership.chat,
            last_read_at: membership.last_read_at,
            last_message,
            unread_count,
        })
    }
}
