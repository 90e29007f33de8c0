//! Generic CRUD over any SeaORM entity keyed by a UUID with a searchable name.
//!
//! Domain crates wrap [`BaseRepository`] in their own repository type and
//! translate [`DbErr`] into domain errors at that boundary.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, QueryOrder,
};
use std::marker::PhantomData;
use uuid::Uuid;

/// Entity with a UUID primary key and a textual name column.
pub trait NamedEntity:
    EntityTrait<PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>, ActiveModel: Send + Sync, Model: Sync>
{
    /// Column matched by [`CrudRepository::search_by_name`].
    fn name_column() -> Self::Column;
}

#[async_trait]
pub trait CrudRepository<E: NamedEntity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<E::Model>, DbErr>;

    /// All rows sorted ascending by `column`.
    async fn get_all_ordered_by(&self, column: E::Column) -> Result<Vec<E::Model>, DbErr>;

    async fn search(&self, condition: Condition) -> Result<Vec<E::Model>, DbErr>;

    /// Rows whose name contains `fragment` (case-sensitive substring).
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<E::Model>, DbErr>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr>;

    async fn add(&self, model: E::ActiveModel) -> Result<E::Model, DbErr>;

    /// Persist every set field of `model`. Fails with [`DbErr::RecordNotUpdated`]
    /// when no row matches its primary key.
    async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr>;

    /// Remove the row with `id`, returning the number of rows deleted.
    /// An unknown id is not an error.
    async fn delete(&self, id: Uuid) -> Result<u64, DbErr>;
}

pub struct BaseRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl<E> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

#[async_trait]
impl<E> CrudRepository<E> for BaseRepository<E>
where
    E: NamedEntity,
    E::ActiveModel: ActiveModelBehavior,
    E::Model: IntoActiveModel<E::ActiveModel>,
{
    async fn get_all(&self) -> Result<Vec<E::Model>, DbErr> {
        E::find().all(&self.db).await
    }

    async fn get_all_ordered_by(&self, column: E::Column) -> Result<Vec<E::Model>, DbErr> {
        E::find().order_by_asc(column).all(&self.db).await
    }

    async fn search(&self, condition: Condition) -> Result<Vec<E::Model>, DbErr> {
        E::find().filter(condition).all(&self.db).await
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<E::Model>, DbErr> {
        E::find()
            .filter(E::name_column().contains(fragment))
            .all(&self.db)
            .await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    async fn add(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }

    async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveValue::Set, ConnectOptions, ConnectionTrait, Database};

    mod gadget {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "gadgets")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: Uuid,
            pub label: String,
            pub quantity: i32,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}

        impl super::NamedEntity for Entity {
            fn name_column() -> Column {
                Column::Label
            }
        }
    }

    async fn repo() -> BaseRepository<gadget::Entity> {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        db.execute_unprepared("PRAGMA case_sensitive_like = ON")
            .await
            .unwrap();
        db.execute_unprepared(
            "CREATE TABLE gadgets (id BLOB PRIMARY KEY NOT NULL, label TEXT NOT NULL, quantity INTEGER NOT NULL)",
        )
        .await
        .unwrap();
        BaseRepository::new(db)
    }

    async fn seed(repo: &BaseRepository<gadget::Entity>, label: &str, quantity: i32) -> gadget::Model {
        repo.add(gadget::ActiveModel {
            id: Set(Uuid::now_v7()),
            label: Set(label.to_string()),
            quantity: Set(quantity),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_then_get_by_id() {
        let repo = repo().await;
        let added = seed(&repo, "Sprocket", 4).await;

        let found = repo.get_by_id(added.id).await.unwrap();
        assert_eq!(found, Some(added));
        assert!(repo.get_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_column() {
        let repo = repo().await;
        seed(&repo, "b", 30).await;
        seed(&repo, "c", 10).await;
        seed(&repo, "a", 20).await;

        let by_quantity: Vec<i32> = repo
            .get_all_ordered_by(gadget::Column::Quantity)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.quantity)
            .collect();
        assert_eq!(by_quantity, vec![10, 20, 30]);

        let by_label: Vec<String> = repo
            .get_all_ordered_by(gadget::Column::Label)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(by_label, vec!["a", "b", "c"]);
        assert_eq!(repo.get_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_by_name_is_case_sensitive_substring() {
        let repo = repo().await;
        seed(&repo, "Gear small", 1).await;
        seed(&repo, "Gear large", 1).await;
        seed(&repo, "Spring", 1).await;

        assert_eq!(repo.search_by_name("Gear").await.unwrap().len(), 2);
        assert_eq!(repo.search_by_name("large").await.unwrap().len(), 1);
        assert!(repo.search_by_name("gear").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_with_condition() {
        let repo = repo().await;
        seed(&repo, "low", 2).await;
        seed(&repo, "high", 50).await;

        let hits = repo
            .search(Condition::all().add(gadget::Column::Quantity.gte(10)))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "high");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repo().await;
        let added = seed(&repo, "Widget", 1).await;

        let updated = repo
            .update(gadget::ActiveModel {
                id: Set(added.id),
                label: Set("Widget v2".to_string()),
                quantity: Set(8),
            })
            .await
            .unwrap();
        assert_eq!(updated.label, "Widget v2");
        assert_eq!(updated.quantity, 8);

        assert_eq!(repo.delete(added.id).await.unwrap(), 1);
        assert_eq!(repo.delete(added.id).await.unwrap(), 0);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_row_fails() {
        let repo = repo().await;
        let result = repo
            .update(gadget::ActiveModel {
                id: Set(Uuid::now_v7()),
                label: Set("ghost".to_string()),
                quantity: Set(0),
            })
            .await;
        assert!(result.is_err());
    }
}
