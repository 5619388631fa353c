use sqlx::PgConnection;

use kernel::interface::query::StaffQuery;
use kernel::prelude::entity::{FirstName, LastName, Staff, StaffId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresStaffRepository;

#[async_trait::async_trait]
impl StaffQuery for PostgresStaffRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &StaffId,
    ) -> error_stack::Result<Option<Staff>, KernelError> {
        PgStaffInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct StaffRow {
    staff_id: i32,
    first_name: String,
    last_name: String,
}

impl From<StaffRow> for Staff {
    fn from(value: StaffRow) -> Self {
        Staff::new(
            StaffId::new(value.staff_id),
            FirstName::new(value.first_name),
            LastName::new(value.last_name),
        )
    }
}

pub(in crate::database) struct PgStaffInternal;

impl PgStaffInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &StaffId,
    ) -> error_stack::Result<Option<Staff>, KernelError> {
        let row = sqlx::query_as::<_, StaffRow>(
            // language=postgresql
            r#"
            SELECT staff_id::int4 AS staff_id, first_name, last_name
            FROM staff
            WHERE staff_id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Staff::from))
    }
}
