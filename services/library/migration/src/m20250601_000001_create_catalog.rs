use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Books::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Books::Description).string_len(1000).not_null())
                    .col(
                        ColumnDef::new(Books::AvailableCopies)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Books::TotalCopies)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .check(
                        Expr::col(Books::AvailableCopies).gte(0).and(
                            Expr::col(Books::AvailableCopies).lte(Expr::col(Books::TotalCopies)),
                        ),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Authors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Authors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Authors::FirstName).string().not_null())
                    .col(ColumnDef::new(Authors::LastName).string().not_null())
                    .col(ColumnDef::new(Authors::Biography).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Categories::Description).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookAuthors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookAuthors::BookId).integer().not_null())
                    .col(ColumnDef::new(BookAuthors::AuthorId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookAuthors::BookId)
                            .col(BookAuthors::AuthorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookAuthors::Table, BookAuthors::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookAuthors::Table, BookAuthors::AuthorId)
                            .to(Authors::Table, Authors::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookCategories::BookId).integer().not_null())
                    .col(ColumnDef::new(BookCategories::CategoryId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookCategories::BookId)
                            .col(BookCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookCategories::Table, BookCategories::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookCategories::Table, BookCategories::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BookAuthors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Authors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
    Title,
    Description,
    AvailableCopies,
    TotalCopies,
}

#[derive(Iden)]
enum Authors {
    Table,
    Id,
    FirstName,
    LastName,
    Biography,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
enum BookAuthors {
    Table,
    BookId,
    AuthorId,
}

#[derive(Iden)]
enum BookCategories {
    Table,
    BookId,
    CategoryId,
}
