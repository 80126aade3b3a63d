//! SeaORM adapter for the score ledger.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Order, QueryOrder, QuerySelect, Set};

use crate::entities::scores;

pub mod dto;

pub use dto::ScoreCreate;

/// Append one score row.
pub async fn create_score<C: ConnectionTrait>(
    conn: &C,
    dto: ScoreCreate,
) -> Result<scores::Model, sea_orm::DbErr> {
    let row = scores::ActiveModel {
        id: sea_orm::NotSet,
        player: Set(dto.player),
        seed: Set(dto.seed),
        moves: Set(dto.moves),
        seconds: Set(dto.seconds),
        won: Set(dto.won),
        created_at: Set(dto.created_at),
    };

    row.insert(conn).await
}

/// Leaderboard page: won first, then fastest, fewest moves, earliest, lowest id.
pub async fn find_top<C: ConnectionTrait>(
    conn: &C,
    limit: u64,
) -> Result<Vec<scores::Model>, sea_orm::DbErr> {
    scores::Entity::find()
        .order_by(scores::Column::Won, Order::Desc)
        .order_by(scores::Column::Seconds, Order::Asc)
        .order_by(scores::Column::Moves, Order::Asc)
        .order_by(scores::Column::CreatedAt, Order::Asc)
        .order_by(scores::Column::Id, Order::Asc)
        .limit(limit)
        .all(conn)
        .await
}
