use sea_orm_migration::prelude::*;

/// Rewrites movement rows stored with the legacy `ALLOTED` spelling.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let update = Query::update()
            .table(MovementHistories::Table)
            .value(MovementHistories::Status, "ALLOTTED")
            .and_where(Expr::col(MovementHistories::Status).eq("ALLOTED"))
            .to_owned();

        manager.exec_stmt(update).await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // The legacy spelling is still accepted on read; nothing to undo.
        Ok(())
    }
}

#[derive(DeriveIden)]
enum MovementHistories {
    Table,
    Status,
}
