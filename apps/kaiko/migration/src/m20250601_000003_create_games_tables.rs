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
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Name).string().not_null())
                    .col(ColumnDef::new(Games::Icon).string())
                    .col(ColumnDef::new(Games::Type).string().not_null())
                    .col(
                        ColumnDef::new(Games::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameSessions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GameSessions::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameSessions::Status).string().not_null())
                    .col(ColumnDef::new(GameSessions::StartedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(GameSessions::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(GameSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_sessions_game")
                            .from(GameSessions::Table, GameSessions::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameSessionPlayers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameSessionPlayers::SessionId).uuid().not_null())
                    .col(ColumnDef::new(GameSessionPlayers::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(GameSessionPlayers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GameSessionPlayers::SessionId)
                            .col(GameSessionPlayers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_session_players_session")
                            .from(GameSessionPlayers::Table, GameSessionPlayers::SessionId)
                            .to(GameSessions::Table, GameSessions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_session_players_user")
                            .from(GameSessionPlayers::Table, GameSessionPlayers::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_session_players_user_joined")
                    .table(GameSessionPlayers::Table)
                    .col(GameSessionPlayers::UserId)
                    .col(GameSessionPlayers::JoinedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameSessionPlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    Name,
    Icon,
    Type,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GameSessions {
    Table,
    Id,
    GameId,
    Status,
    StartedAt,
    CompletedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GameSessionPlayers {
    Table,
    SessionId,
    UserId,
    JoinedAt,
}
