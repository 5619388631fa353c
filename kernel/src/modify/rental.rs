use time::OffsetDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{DraftRental, Rental, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        draft: &DraftRental,
    ) -> error_stack::Result<Rental, KernelError>;

    /// Sets `return_date` and `last_update` to `now` only if the rental is
    /// still open, as one atomic step. `None` means nothing was updated: the
    /// rental is missing or was already returned.
    async fn close(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
        now: OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
