use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Chats::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Chats::Name).string())
                    .col(ColumnDef::new(Chats::Type).string_len(16).not_null())
                    .col(ColumnDef::new(Chats::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Chats::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChatParticipants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChatParticipants::ChatId).uuid().not_null())
                    .col(ColumnDef::new(ChatParticipants::UserId).uuid().not_null())
                    .col(ColumnDef::new(ChatParticipants::LastReadAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ChatParticipants::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ChatParticipants::ChatId)
                            .col(ChatParticipants::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_participants_chat")
                            .from(ChatParticipants::Table, ChatParticipants::ChatId)
                            .to(Chats::Table, Chats::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_participants_user")
                            .from(ChatParticipants::Table, ChatParticipants::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::ChatId).uuid().not_null())
                    .col(ColumnDef::new(Messages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(ColumnDef::new(Messages::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_chat")
                            .from(Messages::Table, Messages::ChatId)
                            .to(Chats::Table, Chats::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_sender")
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves both the latest-message lookup and the unread count.
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_chat_created")
                    .table(Messages::Table)
                    .col(Messages::ChatId)
                    .col(Messages::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChatParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Chats {
    Table,
    Id,
    Name,
    Type,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ChatParticipants {
    Table,
    ChatId,
    UserId,
    LastReadAt,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    ChatId,
    SenderId,
    Content,
    CreatedAt,
}
