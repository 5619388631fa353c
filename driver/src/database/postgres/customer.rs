use sqlx::PgConnection;

use kernel::interface::query::CustomerQuery;
use kernel::prelude::entity::{Customer, CustomerId, FirstName, IsActive, LastName};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for PostgresCustomerRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        PgCustomerInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    customer_id: i32,
    first_name: String,
    last_name: String,
    activebool: bool,
}

impl From<CustomerRow> for Customer {
    fn from(value: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(value.customer_id),
            FirstName::new(value.first_name),
            LastName::new(value.last_name),
            IsActive::new(value.activebool),
        )
    }
}

pub(in crate::database) struct PgCustomerInternal;

impl PgCustomerInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT customer_id::int4 AS customer_id, first_name, last_name, activebool
            FROM customer
            WHERE customer_id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }
}
