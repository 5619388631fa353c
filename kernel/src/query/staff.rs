use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Staff, StaffId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait StaffQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &StaffId,
    ) -> error_stack::Result<Option<Staff>, KernelError>;
}

pub trait DependOnStaffQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type StaffQuery: StaffQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn staff_query(&self) -> &Self::StaffQuery;
}
