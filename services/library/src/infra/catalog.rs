use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, sea_query::OnConflict,
};

use athenaeum_core::sea_ext::lower_contains;
use athenaeum_domain::id::{BookAuthorKey, BookCategoryKey};
use athenaeum_library_schema::{authors, book_authors, book_categories, books, categories};

use crate::domain::repository::{
    AuthorRepository, BookAuthorRepository, BookCategoryRepository, BookRepository,
    CategoryRepository,
};
use crate::domain::types::{Author, Book, BookQuery, Category, NewAuthor, NewBook, NewCategory};
use crate::error::LibraryServiceError;
use crate::infra::{restrict_violation_as, tx_db_err};

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

impl BookRepository for DbBookRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, LibraryServiceError> {
        let model = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find book by id")?;
        Ok(model.map(book_from_model))
    }

    async fn list(&self) -> Result<Vec<Book>, LibraryServiceError> {
        let models = books::Entity::find()
            .order_by_asc(books::Column::Id)
            .all(&self.db)
            .await
            .context("list books")?;
        Ok(models.into_iter().map(book_from_model).collect())
    }

    async fn search(&self, query: &BookQuery) -> Result<Vec<Book>, LibraryServiceError> {
        let select = match query {
            BookQuery::Title(part) => {
                books::Entity::find().filter(lower_contains(books::Column::Title, part))
            }
            BookQuery::AvailableCopies { min, max } => books::Entity::find()
                .filter(books::Column::AvailableCopies.between(*min, *max)),
            BookQuery::AuthorName(part) => books::Entity::find()
                .inner_join(authors::Entity)
                .filter(
                    Condition::any()
                        .add(lower_contains(
                            (authors::Entity, authors::Column::FirstName),
                            part,
                        ))
                        .add(lower_contains(
                            (authors::Entity, authors::Column::LastName),
                            part,
                        )),
                )
                .distinct(),
            BookQuery::CategoryName(part) => books::Entity::find()
                .inner_join(categories::Entity)
                .filter(lower_contains(
                    (categories::Entity, categories::Column::Name),
                    part,
                ))
                .distinct(),
        };
        let models = select
            .order_by_asc(books::Column::Id)
            .all(&self.db)
            .await
            .context("search books")?;
        Ok(models.into_iter().map(book_from_model).collect())
    }

    async fn create(&self, book: &NewBook) -> Result<Book, LibraryServiceError> {
        let model = books::ActiveModel {
            title: Set(book.title.clone()),
            description: Set(book.description.clone()),
            available_copies: Set(book.available_copies),
            total_copies: Set(book.total_copies),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create book")?;
        Ok(book_from_model(model))
    }

    async fn update(&self, id: i32, book: &NewBook) -> Result<bool, LibraryServiceError> {
        let result = books::Entity::update_many()
            .set(books::ActiveModel {
                title: Set(book.title.clone()),
                description: Set(book.description.clone()),
                available_copies: Set(book.available_copies),
                total_copies: Set(book.total_copies),
                ..Default::default()
            })
            .filter(books::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update book")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        self.db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    book_authors::Entity::delete_many()
                        .filter(book_authors::Column::BookId.eq(id))
                        .exec(txn)
                        .await?;
                    book_categories::Entity::delete_many()
                        .filter(book_categories::Column::BookId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = books::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .map_err(|e| {
                restrict_violation_as(tx_db_err(e), LibraryServiceError::BookInUse, "delete book")
            })
    }
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        id: model.id,
        title: model.title,
        description: model.description,
        available_copies: model.available_copies,
        total_copies: model.total_copies,
    }
}

// ── Author repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAuthorRepository {
    pub db: DatabaseConnection,
}

impl AuthorRepository for DbAuthorRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, LibraryServiceError> {
        let model = authors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find author by id")?;
        Ok(model.map(author_from_model))
    }

    async fn list(&self) -> Result<Vec<Author>, LibraryServiceError> {
        let models = authors::Entity::find()
            .order_by_asc(authors::Column::Id)
            .all(&self.db)
            .await
            .context("list authors")?;
        Ok(models.into_iter().map(author_from_model).collect())
    }

    async fn create(&self, author: &NewAuthor) -> Result<Author, LibraryServiceError> {
        let model = authors::ActiveModel {
            first_name: Set(author.first_name.clone()),
            last_name: Set(author.last_name.clone()),
            biography: Set(author.biography.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create author")?;
        Ok(author_from_model(model))
    }

    async fn update(&self, id: i32, author: &NewAuthor) -> Result<bool, LibraryServiceError> {
        let result = authors::Entity::update_many()
            .set(authors::ActiveModel {
                first_name: Set(author.first_name.clone()),
                last_name: Set(author.last_name.clone()),
                biography: Set(author.biography.clone()),
                ..Default::default()
            })
            .filter(authors::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update author")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    book_authors::Entity::delete_many()
                        .filter(book_authors::Column::AuthorId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = authors::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete author")?;
        Ok(deleted)
    }
}

fn author_from_model(model: authors::Model) -> Author {
    Author {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        biography: model.biography,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, LibraryServiceError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        Ok(model.map(category_from_model))
    }

    async fn list(&self) -> Result<Vec<Category>, LibraryServiceError> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
            .context("list categories")?;
        Ok(models.into_iter().map(category_from_model).collect())
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, LibraryServiceError> {
        let model = categories::ActiveModel {
            name: Set(category.name.clone()),
            description: Set(category.description.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create category")?;
        Ok(category_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        category: &NewCategory,
    ) -> Result<bool, LibraryServiceError> {
        let result = categories::Entity::update_many()
            .set(categories::ActiveModel {
                name: Set(category.name.clone()),
                description: Set(category.description.clone()),
                ..Default::default()
            })
            .filter(categories::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update category")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, LibraryServiceError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    book_categories::Entity::delete_many()
                        .filter(book_categories::Column::CategoryId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = categories::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete category")?;
        Ok(deleted)
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

// ── BookAuthor repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookAuthorRepository {
    pub db: DatabaseConnection,
}

impl BookAuthorRepository for DbBookAuthorRepository {
    async fn exists(&self, key: BookAuthorKey) -> Result<bool, LibraryServiceError> {
        let model = book_authors::Entity::find_by_id((key.book_id, key.author_id))
            .one(&self.db)
            .await
            .context("find book author")?;
        Ok(model.is_some())
    }

    async fn list(&self) -> Result<Vec<BookAuthorKey>, LibraryServiceError> {
        let models = book_authors::Entity::find()
            .order_by_asc(book_authors::Column::BookId)
            .order_by_asc(book_authors::Column::AuthorId)
            .all(&self.db)
            .await
            .context("list book authors")?;
        Ok(models
            .into_iter()
            .map(|m| BookAuthorKey::new(m.book_id, m.author_id))
            .collect())
    }

    async fn insert_if_absent(&self, key: BookAuthorKey) -> Result<(), LibraryServiceError> {
        book_authors::Entity::insert(book_authors::ActiveModel {
            book_id: Set(key.book_id),
            author_id: Set(key.author_id),
        })
        .on_conflict(
            OnConflict::columns([book_authors::Column::BookId, book_authors::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert book author")?;
        Ok(())
    }

    async fn delete(&self, key: BookAuthorKey) -> Result<bool, LibraryServiceError> {
        let result = book_authors::Entity::delete_by_id((key.book_id, key.author_id))
            .exec(&self.db)
            .await
            .context("delete book author")?;
        Ok(result.rows_affected > 0)
    }
}

// ── BookCategory repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookCategoryRepository {
    pub db: DatabaseConnection,
}

impl BookCategoryRepository for DbBookCategoryRepository {
    async fn exists(&self, key: BookCategoryKey) -> Result<bool, LibraryServiceError> {
        let model = book_categories::Entity::find_by_id((key.book_id, key.category_id))
            .one(&self.db)
            .await
            .context("find book category")?;
        Ok(model.is_some())
    }

    async fn list(&self) -> Result<Vec<BookCategoryKey>, LibraryServiceError> {
        let models = book_categories::Entity::find()
            .order_by_asc(book_categories::Column::BookId)
            .order_by_asc(book_categories::Column::CategoryId)
            .all(&self.db)
            .await
            .context("list book categories")?;
        Ok(models
            .into_iter()
            .map(|m| BookCategoryKey::new(m.book_id, m.category_id))
            .collect())
    }

    async fn insert_if_absent(&self, key: BookCategoryKey) -> Result<(), LibraryServiceError> {
        book_categories::Entity::insert(book_categories::ActiveModel {
            book_id: Set(key.book_id),
            category_id: Set(key.category_id),
        })
        .on_conflict(
            OnConflict::columns([
                book_categories::Column::BookId,
                book_categories::Column::CategoryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert book category")?;
        Ok(())
    }

    async fn delete(&self, key: BookCategoryKey) -> Result<bool, LibraryServiceError> {
        let result = book_categories::Entity::delete_by_id((key.book_id, key.category_id))
            .exec(&self.db)
            .await
            .context("delete book category")?;
        Ok(result.rows_affected > 0)
    }
}
