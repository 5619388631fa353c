use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{
    CustomerId, InventoryId, Rental, RentalDetail, RentalId, SelectLimit, SelectOffset,
};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;

    /// Whether any rental of the item still has no return date.
    async fn has_open_rental(
        &self,
        con: &mut Self::Transaction,
        inventory_id: &InventoryId,
    ) -> error_stack::Result<bool, KernelError>;

    async fn find_detail_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError>;

    /// Newest `rental_date` first.
    async fn find_details_by_customer_id(
        &self,
        con: &mut Self::Transaction,
        customer_id: &CustomerId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError>;

    /// Newest `rental_date` first.
    async fn find_details_by_inventory_id(
        &self,
        con: &mut Self::Transaction,
        inventory_id: &InventoryId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_query(&self) -> &Self::RentalQuery;
}
