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
                    .table(Friendships::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Friendships::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Friendships::RequesterId).uuid().not_null())
                    .col(ColumnDef::new(Friendships::AddresseeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Friendships::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Friendships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendships_requester")
                            .from(Friendships::Table, Friendships::RequesterId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendships_addressee")
                            .from(Friendships::Table, Friendships::AddresseeId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_friendships_requester_addressee")
                    .table(Friendships::Table)
                    .col(Friendships::RequesterId)
                    .col(Friendships::AddresseeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_friendships_addressee")
                    .table(Friendships::Table)
                    .col(Friendships::AddresseeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friendships::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Friendships {
    Table,
    Id,
    RequesterId,
    AddresseeId,
    Status,
    CreatedAt,
}
