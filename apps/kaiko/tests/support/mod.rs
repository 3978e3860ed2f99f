#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::DatabaseStore;
use entity::chat::ChatType;
use entity::friendship::FriendshipStatus;
use entity::{
    chat, chat_participant, friendship, game, game_session, game_session_player, message, user,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

/// Fresh in-memory database with every migration applied.
pub async fn setup() -> (DatabaseConnection, DatabaseStore) {
    let db = Database::connect(
        ConnectOptions::new("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false)
            .to_owned(),
    )
    .await
    .expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    (db.clone(), DatabaseStore::new(db))
}

/// Fixed reference time; whole seconds keep stored timestamps comparable.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub async fn insert_user(db: &DatabaseConnection, privy_id: &str) -> user::Model {
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        privy_id: Set(privy_id.to_string()),
        email_address: Set(format!("{}@kaiko.test", privy_id)),
        username: Set(format!("user_{}", privy_id)),
        bio: Set(None),
        avatar_type: Set("default".to_string()),
        avatar: Set(Some(format!("{}.png", privy_id))),
        wallet_address: Set(None),
        created_at: Set(at(0)),
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn insert_friendship(
    db: &DatabaseConnection,
    requester: &user::Model,
    addressee: &user::Model,
    status: FriendshipStatus,
) -> friendship::Model {
    friendship::ActiveModel {
        id: Set(Uuid::new_v4()),
        requester_id: Set(requester.id),
        addressee_id: Set(addressee.id),
        status: Set(status),
        created_at: Set(at(1)),
    }
    .insert(db)
    .await
    .expect("insert friendship")
}

pub async fn insert_game(db: &DatabaseConnection, name: &str, is_active: bool) -> game::Model {
    game::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        icon: Set(Some(format!("/icons/{}.png", name))),
        game_type: Set("arcade".to_string()),
        is_active: Set(is_active),
        created_at: Set(at(0)),
    }
    .insert(db)
    .await
    .expect("insert game")
}

pub async fn insert_session(
    db: &DatabaseConnection,
    game: &game::Model,
    player: &user::Model,
    joined_at: DateTime<Utc>,
) -> game_session::Model {
    let session = game_session::ActiveModel {
        id: Set(Uuid::new_v4()),
        game_id: Set(game.id),
        status: Set("completed".to_string()),
        started_at: Set(Some(joined_at)),
        completed_at: Set(None),
        created_at: Set(joined_at),
    }
    .insert(db)
    .await
    .expect("insert session");

    game_session_player::ActiveModel {
        session_id: Set(session.id),
        user_id: Set(player.id),
        joined_at: Set(joined_at),
    }
    .insert(db)
    .await
    .expect("insert session player");

    session
}

pub async fn insert_chat(
    db: &DatabaseConnection,
    name: Option<&str>,
    updated_at: DateTime<Utc>,
) -> chat::Model {
    chat::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.map(str::to_string)),
        chat_type: Set(if name.is_some() {
            ChatType::Group
        } else {
            ChatType::Direct
        }),
        created_at: Set(at(0)),
        updated_at: Set(updated_at),
    }
    .insert(db)
    .await
    .expect("insert chat")
}

pub async fn join_chat(
    db: &DatabaseConnection,
    chat: &chat::Model,
    member: &user::Model,
    last_read_at: Option<DateTime<Utc>>,
) {
    chat_participant::ActiveModel {
        chat_id: Set(chat.id),
        user_id: Set(member.id),
        last_read_at: Set(last_read_at),
        joined_at: Set(at(0)),
    }
    .insert(db)
    .await
    .expect("insert chat participant");
}

pub async fn post_message(
    db: &DatabaseConnection,
    chat: &chat::Model,
    sender: &user::Model,
    content: &str,
    created_at: DateTime<Utc>,
) -> message::Model {
    message::ActiveModel {
        id: Set(Uuid::new_v4()),
        chat_id: Set(chat.id),
        sender_id: Set(sender.id),
        content: Set(content.to_string()),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
    .expect("insert message")
}
