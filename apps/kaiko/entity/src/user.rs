use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Avatar kind stored when onboarding does not pick one.
pub const DEFAULT_AVATAR_TYPE: &str = "default";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Identity id issued by the external auth provider.
    #[sea_orm(unique)]
    pub privy_id: String,
    pub email_address: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar_type: String,
    pub avatar: Option<String>,
    pub wallet_address: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chat_participant::Entity")]
    ChatParticipant,
    #[sea_orm(has_many = "super::game_session_player::Entity")]
    GameSessionPlayer,
}

impl Related<super::chat_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatParticipant.def()
    }
}

impl Related<super::game_session_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameSessionPlayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
