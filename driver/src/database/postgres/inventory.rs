use sqlx::PgConnection;

use kernel::interface::query::InventoryQuery;
use kernel::prelude::entity::{FilmId, Inventory, InventoryId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresInventoryRepository;

#[async_trait::async_trait]
impl InventoryQuery for PostgresInventoryRepository {
    type Transaction = PostgresTransaction;
    async fn lock_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &InventoryId,
    ) -> error_stack::Result<Option<Inventory>, KernelError> {
        PgInventoryInternal::lock_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    inventory_id: i32,
    film_id: i32,
}

impl From<InventoryRow> for Inventory {
    fn from(value: InventoryRow) -> Self {
        Inventory::new(
            InventoryId::new(value.inventory_id),
            FilmId::new(value.film_id),
        )
    }
}

pub(in crate::database) struct PgInventoryInternal;

impl PgInventoryInternal {
    async fn lock_by_id(
        con: &mut PgConnection,
        id: &InventoryId,
    ) -> error_stack::Result<Option<Inventory>, KernelError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            // language=postgresql
            r#"
            SELECT inventory_id::int4 AS inventory_id, film_id::int4 AS film_id
            FROM inventory
            WHERE inventory_id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        if row.is_some() {
            tracing::debug!(inventory_id = id.as_ref(), "Inventory row locked");
        }
        Ok(row.map(Inventory::from))
    }
}
