use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Loans::Table)
                    .col(Loans::UserId)
                    .name("idx_loans_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Loans::Table)
                    .col(Loans::Status)
                    .col(Loans::ReturnDate)
                    .name("idx_loans_status_return_date")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .name("idx_reservations_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reviews::Table)
                    .col(Reviews::BookId)
                    .name("idx_reviews_book_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(BookAuthors::Table)
                    .col(BookAuthors::AuthorId)
                    .name("idx_book_authors_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(BookCategories::Table)
                    .col(BookCategories::CategoryId)
                    .name("idx_book_categories_category_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_book_categories_category_id",
            "idx_book_authors_author_id",
            "idx_reviews_book_id",
            "idx_reservations_user_id",
            "idx_loans_status_return_date",
            "idx_loans_user_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Loans {
    Table,
    UserId,
    Status,
    ReturnDate,
}

#[derive(Iden)]
enum Reservations {
    Table,
    UserId,
}

#[derive(Iden)]
enum Reviews {
    Table,
    BookId,
}

#[derive(Iden)]
enum BookAuthors {
    Table,
    AuthorId,
}

#[derive(Iden)]
enum BookCategories {
    Table,
    CategoryId,
}
