use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Scores {
    Table,
    Id,
    Player,
    Seed,
    Moves,
    Seconds,
    Won,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scores::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Scores::Player).text().null())
                    .col(ColumnDef::new(Scores::Seed).text().null())
                    .col(ColumnDef::new(Scores::Moves).big_integer().not_null())
                    .col(ColumnDef::new(Scores::Seconds).big_integer().not_null())
                    .col(
                        ColumnDef::new(Scores::Won)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Scores::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Leaderboard ordering: won DESC, seconds, moves, created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_scores_rank")
                    .table(Scores::Table)
                    .col(Scores::Won)
                    .col(Scores::Seconds)
                    .col(Scores::Moves)
                    .col(Scores::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_scores_rank")
                    .table(Scores::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await?;

        Ok(())
    }
}
