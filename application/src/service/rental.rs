use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnInventoryQuery, DependOnRentalQuery,
    DependOnStaffQuery, InventoryQuery, RentalQuery, StaffQuery,
};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{CustomerId, DraftRental, InventoryId, RentalId, StaffId};
use kernel::{KernelError, Missing, Rejection};

use crate::transfer::{
    CreateRentalDto, GetCustomerRentalsDto, GetInventoryRentalsDto, GetRentalDto,
    RentalDetailDto, ReturnRentalDto,
};

fn reject(rejection: Rejection) -> Report<KernelError> {
    tracing::warn!(%rejection, "rental request rejected");
    Report::new(KernelError::Rejected(rejection))
}

fn detail_missing(id: &RentalId) -> Report<KernelError> {
    Report::new(KernelError::Internal)
        .attach_printable(format!("Rental {} has no detail row", id.as_ref()))
}

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnCustomerQuery
    + DependOnInventoryQuery
    + DependOnRentalQuery
    + DependOnStaffQuery
    + DependOnRentalModifier
{
    /// Opens a rental of one inventory item.
    ///
    /// Every check and the insert share one transaction. The inventory row is
    /// locked before availability is checked, so concurrent attempts on the
    /// same item are ordered: the later one waits and then sees the earlier
    /// one's rental. Any rejection drops the transaction, which rolls it back.
    #[tracing::instrument(skip_all, fields(
        customer_id = dto.customer_id,
        inventory_id = dto.inventory_id,
        staff_id = dto.staff_id,
    ))]
    async fn create_rental(
        &self,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDetailDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let customer = self
            .customer_query()
            .find_by_id(&mut transaction, &customer_id)
            .await?
            .ok_or_else(|| reject(Rejection::NotFound(Missing::Customer(customer_id))))?;
        if !customer.can_rent() {
            return Err(reject(Rejection::InactiveCustomer(customer_id)));
        }

        let inventory_id = InventoryId::new(dto.inventory_id);
        self.inventory_query()
            .lock_by_id(&mut transaction, &inventory_id)
            .await?
            .ok_or_else(|| reject(Rejection::NotFound(Missing::Inventory(inventory_id))))?;

        if self
            .rental_query()
            .has_open_rental(&mut transaction, &inventory_id)
            .await?
        {
            return Err(reject(Rejection::ItemUnavailable(inventory_id)));
        }

        let staff_id = StaffId::new(dto.staff_id);
        self.staff_query()
            .find_by_id(&mut transaction, &staff_id)
            .await?
            .ok_or_else(|| reject(Rejection::NotFound(Missing::Staff(staff_id))))?;

        let draft = DraftRental::open(
            inventory_id,
            customer_id,
            staff_id,
            OffsetDateTime::now_utc(),
        );
        let rental = self
            .rental_modifier()
            .create(&mut transaction, &draft)
            .await?;
        let detail = self
            .rental_query()
            .find_detail_by_id(&mut transaction, rental.id())
            .await?
            .ok_or_else(|| detail_missing(rental.id()))?;
        transaction.commit().await?;

        tracing::info!(rental_id = rental.id().as_ref(), "rental created");
        Ok(RentalDetailDto::from(detail))
    }
}

impl<T> CreateRentalService for T where
    T: DependOnCustomerQuery
        + DependOnInventoryQuery
        + DependOnRentalQuery
        + DependOnStaffQuery
        + DependOnRentalModifier
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static + Sync + Send + DependOnRentalQuery + DependOnRentalModifier
{
    /// Closes an open rental.
    ///
    /// The close itself only applies while `return_date` is still null, so of
    /// two concurrent returns exactly one wins and the other is rejected as
    /// already returned.
    #[tracing::instrument(skip_all, fields(rental_id = dto.rental_id))]
    async fn return_rental(
        &self,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDetailDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let rental_id = RentalId::new(dto.rental_id);
        let rental = self
            .rental_query()
            .find_by_id(&mut transaction, &rental_id)
            .await?
            .ok_or_else(|| reject(Rejection::NotFound(Missing::Rental(rental_id))))?;
        if !rental.is_open() {
            return Err(reject(Rejection::AlreadyReturned(rental_id)));
        }

        self.rental_modifier()
            .close(&mut transaction, &rental_id, OffsetDateTime::now_utc())
            .await?
            .ok_or_else(|| reject(Rejection::AlreadyReturned(rental_id)))?;
        let detail = self
            .rental_query()
            .find_detail_by_id(&mut transaction, &rental_id)
            .await?
            .ok_or_else(|| detail_missing(&rental_id))?;
        transaction.commit().await?;

        tracing::info!("rental returned");
        Ok(RentalDetailDto::from(detail))
    }
}

impl<T> ReturnRentalService for T where T: DependOnRentalQuery + DependOnRentalModifier {}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalQuery {
    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDetailDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let id = RentalId::new(dto.rental_id);
        let detail = self
            .rental_query()
            .find_detail_by_id(&mut transaction, &id)
            .await?;
        transaction.roll_back().await?;

        Ok(detail.map(RentalDetailDto::from))
    }

    async fn get_rentals_by_customer(
        &self,
        dto: GetCustomerRentalsDto,
    ) -> error_stack::Result<Vec<RentalDetailDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let details = self
            .rental_query()
            .find_details_by_customer_id(&mut transaction, &customer_id, &dto.limit, &dto.offset)
            .await?;
        transaction.roll_back().await?;

        Ok(details.into_iter().map(RentalDetailDto::from).collect())
    }

    async fn get_rentals_by_inventory(
        &self,
        dto: GetInventoryRentalsDto,
    ) -> error_stack::Result<Vec<RentalDetailDto>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let inventory_id = InventoryId::new(dto.inventory_id);
        let details = self
            .rental_query()
            .find_details_by_inventory_id(
                &mut transaction,
                &inventory_id,
                &dto.limit,
                &dto.offset,
            )
            .await?;
        transaction.roll_back().await?;

        Ok(details.into_iter().map(RentalDetailDto::from).collect())
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery {}
