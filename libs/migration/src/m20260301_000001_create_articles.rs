use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(pk_uuid(Articles::Id))
                    .col(string(Articles::Slug).unique_key())
                    .col(string(Articles::Title))
                    .col(text(Articles::Excerpt).default(""))
                    .col(text(Articles::Content))
                    .col(string(Articles::Author))
                    .col(string(Articles::Category).default(""))
                    .col(json(Articles::Tags).default("[]"))
                    .col(string_null(Articles::FeaturedImage))
                    .col(boolean(Articles::Published).default(false))
                    .col(
                        timestamp_with_time_zone(Articles::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Articles::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_category")
                    .table(Articles::Table)
                    .col(Articles::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_published_created_at")
                    .table(Articles::Table)
                    .col(Articles::Published)
                    .col(Articles::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER articles_touch_updated_at
                    BEFORE UPDATE ON articles
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS articles_touch_updated_at ON articles")
            .await?;

        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    Slug,
    Title,
    Excerpt,
    Content,
    Author,
    Category,
    Tags,
    FeaturedImage,
    Published,
    CreatedAt,
    UpdatedAt,
}
