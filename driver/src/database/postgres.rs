use std::ops::{Deref, DerefMut};

use error_stack::ResultExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnCustomerQuery, DependOnInventoryQuery, DependOnRentalQuery, DependOnStaffQuery,
};
use kernel::interface::update::DependOnRentalModifier;
use kernel::KernelError;

use crate::error::ConvertError;
use crate::{env, optional_env};

pub use self::{customer::*, inventory::*, rental::*, staff::*};

mod customer;
mod inventory;
mod rental;
mod staff;

static POSTGRES_URL: &str = "POSTGRES_URL";
static POSTGRES_MAX_CONNECTIONS: &str = "POSTGRES_MAX_CONNECTIONS";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let max_connections = match optional_env(POSTGRES_MAX_CONNECTIONS) {
            Some(value) => value
                .parse::<u32>()
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| {
                    format!("{POSTGRES_MAX_CONNECTIONS} is not a number: {value}")
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .convert_error()?;
        tracing::info!(max_connections, "Connected to postgres");
        Ok(Self { pool })
    }
}

/// Rolled back by sqlx when dropped without `commit`.
pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()?;
        tracing::debug!("Transaction committed");
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()?;
        tracing::debug!("Transaction rolled back");
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        tracing::debug!("Transaction started");
        Ok(PostgresTransaction(transaction))
    }
}

impl DependOnCustomerQuery for PostgresDatabase {
    type CustomerQuery = PostgresCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &PostgresCustomerRepository
    }
}

impl DependOnStaffQuery for PostgresDatabase {
    type StaffQuery = PostgresStaffRepository;
    fn staff_query(&self) -> &Self::StaffQuery {
        &PostgresStaffRepository
    }
}

impl DependOnInventoryQuery for PostgresDatabase {
    type InventoryQuery = PostgresInventoryRepository;
    fn inventory_query(&self) -> &Self::InventoryQuery {
        &PostgresInventoryRepository
    }
}

impl DependOnRentalQuery for PostgresDatabase {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier for PostgresDatabase {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &PostgresRentalRepository
    }
}

#[cfg(test)]
pub(in crate::database) mod fixture {
    use rand::Rng;
    use sqlx::PgConnection;

    use kernel::prelude::entity::{CustomerId, FilmId, InventoryId, StaffId};

    /// Rows inserted for one test. Names carry a random suffix so runs do not
    /// collide on the unique columns.
    pub struct Fixture {
        pub active_customer: CustomerId,
        pub inactive_customer: CustomerId,
        pub staff: StaffId,
        pub inventory: InventoryId,
        pub film: FilmId,
        pub film_title: String,
    }

    pub async fn insert(con: &mut PgConnection) -> Result<Fixture, sqlx::Error> {
        let suffix = rand::thread_rng().gen_range(0..u32::MAX);
        let film_title = format!("Academy Dinosaur {suffix}");

        // language=postgresql
        let film_id: i32 =
            sqlx::query_scalar("INSERT INTO film (title) VALUES ($1) RETURNING film_id")
                .bind(&film_title)
                .fetch_one(&mut *con)
                .await?;
        // language=postgresql
        let inventory_id: i32 = sqlx::query_scalar(
            "INSERT INTO inventory (film_id, store_id) VALUES ($1, 1) RETURNING inventory_id",
        )
        .bind(film_id)
        .fetch_one(&mut *con)
        .await?;
        let active_customer = insert_customer(con, "Mary", "Smith", true).await?;
        let inactive_customer = insert_customer(con, "Linda", "Williams", false).await?;
        // language=postgresql
        let staff_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO staff (store_id, first_name, last_name, username)
            VALUES (1, 'Mike', 'Hillyer', $1)
            RETURNING staff_id
            "#,
        )
        .bind(format!("mike{suffix}"))
        .fetch_one(&mut *con)
        .await?;

        Ok(Fixture {
            active_customer,
            inactive_customer,
            staff: StaffId::new(staff_id),
            inventory: InventoryId::new(inventory_id),
            film: FilmId::new(film_id),
            film_title,
        })
    }

    /// Removes a committed fixture together with any rentals that point at it.
    pub async fn delete(con: &mut PgConnection, fixture: &Fixture) -> Result<(), sqlx::Error> {
        // language=postgresql
        sqlx::query("DELETE FROM rental WHERE inventory_id = $1")
            .bind(fixture.inventory.as_ref())
            .execute(&mut *con)
            .await?;
        // language=postgresql
        sqlx::query("DELETE FROM inventory WHERE inventory_id = $1")
            .bind(fixture.inventory.as_ref())
            .execute(&mut *con)
            .await?;
        // language=postgresql
        sqlx::query("DELETE FROM film WHERE film_id = $1")
            .bind(fixture.film.as_ref())
            .execute(&mut *con)
            .await?;
        // language=postgresql
        sqlx::query("DELETE FROM customer WHERE customer_id = ANY($1)")
            .bind(vec![
                *fixture.active_customer.as_ref(),
                *fixture.inactive_customer.as_ref(),
            ])
            .execute(&mut *con)
            .await?;
        // language=postgresql
        sqlx::query("DELETE FROM staff WHERE staff_id = $1")
            .bind(fixture.staff.as_ref())
            .execute(&mut *con)
            .await?;
        Ok(())
    }

    async fn insert_customer(
        con: &mut PgConnection,
        first_name: &str,
        last_name: &str,
        active: bool,
    ) -> Result<CustomerId, sqlx::Error> {
        // language=postgresql
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO customer (store_id, first_name, last_name, activebool)
            VALUES (1, $1, $2, $3)
            RETURNING customer_id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(active)
        .fetch_one(con)
        .await?;
        Ok(CustomerId::new(id))
    }
}
