use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Inventory, InventoryId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait InventoryQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Finds the item and takes an exclusive lock on its row that is held
    /// until `con` commits or rolls back. A competing locker waits.
    async fn lock_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &InventoryId,
    ) -> error_stack::Result<Option<Inventory>, KernelError>;
}

pub trait DependOnInventoryQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type InventoryQuery: InventoryQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn inventory_query(&self) -> &Self::InventoryQuery;
}
