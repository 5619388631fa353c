//! In-memory stand-in for the rental store.
//!
//! Writes are buffered per transaction and only become visible on commit.
//! Row locks are async mutexes held by the transaction, so a second locker
//! really waits, and dropping a transaction discards its writes and releases
//! its locks.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use error_stack::Report;
use time::OffsetDateTime;
use tokio::sync::OwnedMutexGuard;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnInventoryQuery, DependOnRentalQuery,
    DependOnStaffQuery, InventoryQuery, RentalQuery, StaffQuery,
};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    Customer, CustomerId, DraftRental, FilmId, FilmTitle, FirstName, Inventory, InventoryId,
    IsActive, LastName, Rental, RentalDetail, RentalId, SelectLimit, SelectOffset, Staff, StaffId,
};
use kernel::KernelError;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
enum Row {
    Inventory(InventoryId),
    Rental(RentalId),
}

#[derive(Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    staff: HashMap<StaffId, Staff>,
    inventory: HashMap<InventoryId, Inventory>,
    films: HashMap<FilmId, FilmTitle>,
    rentals: BTreeMap<RentalId, Rental>,
    last_rental_id: i32,
}

#[derive(Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    locks: Arc<Mutex<HashMap<Row, Arc<tokio::sync::Mutex<()>>>>>,
}

fn poisoned() -> Report<KernelError> {
    Report::new(KernelError::Internal).attach_printable("memory store lock poisoned")
}

impl MemoryDatabase {
    /// Three customers (the third inactive), one clerk, two items.
    pub fn seeded() -> Self {
        let db = Self::default();
        {
            let mut tables = db.tables.lock().expect("fresh lock");
            for (id, first, last, active) in [
                (1, "Mary", "Smith", true),
                (2, "Patricia", "Johnson", true),
                (3, "Linda", "Williams", false),
            ] {
                let customer = Customer::new(
                    CustomerId::new(id),
                    FirstName::new(first),
                    LastName::new(last),
                    IsActive::new(active),
                );
                tables.customers.insert(CustomerId::new(id), customer);
            }
            tables.staff.insert(
                StaffId::new(1),
                Staff::new(
                    StaffId::new(1),
                    FirstName::new("Mike"),
                    LastName::new("Hillyer"),
                ),
            );
            for (inventory_id, film_id, title) in
                [(10, 1, "Academy Dinosaur"), (11, 2, "Ace Goldfinger")]
            {
                tables
                    .films
                    .insert(FilmId::new(film_id), FilmTitle::new(title));
                tables.inventory.insert(
                    InventoryId::new(inventory_id),
                    Inventory::new(InventoryId::new(inventory_id), FilmId::new(film_id)),
                );
            }
        }
        db
    }

    pub fn committed_rentals(&self) -> Vec<Rental> {
        self.tables
            .lock()
            .map(|tables| tables.rentals.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn open_rentals_of(&self, inventory_id: InventoryId) -> usize {
        self.committed_rentals()
            .iter()
            .filter(|rental| rental.inventory_id() == &inventory_id && rental.is_open())
            .count()
    }
}

pub struct MemoryTransaction {
    tables: Arc<Mutex<Tables>>,
    locks: Arc<Mutex<HashMap<Row, Arc<tokio::sync::Mutex<()>>>>>,
    held: HashSet<Row>,
    guards: Vec<OwnedMutexGuard<()>>,
    pending: BTreeMap<RentalId, Rental>,
}

impl MemoryTransaction {
    async fn lock(&mut self, row: Row) -> error_stack::Result<(), KernelError> {
        if self.held.contains(&row) {
            return Ok(());
        }
        let mutex = {
            let mut locks = self.locks.lock().map_err(|_| poisoned())?;
            let mutex = locks.entry(row).or_default();
            Arc::clone(mutex)
        };
        let guard = mutex.lock_owned().await;
        self.held.insert(row);
        self.guards.push(guard);
        // Let a competing transaction run up to this lock.
        tokio::task::yield_now().await;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> error_stack::Result<T, KernelError> {
        let tables = self.tables.lock().map_err(|_| poisoned())?;
        Ok(f(&tables))
    }

    /// Committed rentals overlaid with this transaction's own writes.
    fn rentals(&self) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = self.read(|tables| tables.rentals.clone())?;
        rentals.extend(self.pending.clone());
        Ok(rentals.into_values().collect())
    }

    fn details(
        &self,
        predicate: impl Fn(&Rental) -> bool,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError> {
        let rentals = self.rentals()?;
        self.read(|tables| {
            let mut details = rentals
                .into_iter()
                .filter(|rental| predicate(rental))
                .filter_map(|rental| {
                    let inventory = tables.inventory.get(rental.inventory_id())?;
                    let film_title = tables.films.get(inventory.film_id())?.clone();
                    let customer_name = tables.customers.get(rental.customer_id())?.full_name();
                    let staff_name = tables.staff.get(rental.staff_id())?.full_name();
                    Some(RentalDetail::new(rental, film_title, customer_name, staff_name))
                })
                .collect::<Vec<_>>();
            details.sort_by(|a, b| {
                (b.rental().rental_date().as_ref(), b.rental().id().as_ref())
                    .cmp(&(a.rental().rental_date().as_ref(), a.rental().id().as_ref()))
            });
            details
        })
    }
}

fn page(
    details: Vec<RentalDetail>,
    limit: &SelectLimit,
    offset: &SelectOffset,
) -> Vec<RentalDetail> {
    details
        .into_iter()
        .skip(usize::try_from(*offset.as_ref()).unwrap_or_default())
        .take(usize::try_from(*limit.as_ref()).unwrap_or_default())
        .collect()
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        let pending = std::mem::take(&mut self.pending);
        let mut tables = self.tables.lock().map_err(|_| poisoned())?;
        tables.rentals.extend(pending);
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<MemoryTransaction, KernelError> {
        Ok(MemoryTransaction {
            tables: Arc::clone(&self.tables),
            locks: Arc::clone(&self.locks),
            held: HashSet::new(),
            guards: Vec::new(),
            pending: BTreeMap::new(),
        })
    }
}

pub struct MemoryRepository;

#[async_trait::async_trait]
impl CustomerQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        con.read(|tables| tables.customers.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl StaffQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &StaffId,
    ) -> error_stack::Result<Option<Staff>, KernelError> {
        con.read(|tables| tables.staff.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl InventoryQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn lock_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &InventoryId,
    ) -> error_stack::Result<Option<Inventory>, KernelError> {
        if con.read(|tables| !tables.inventory.contains_key(id))? {
            return Ok(None);
        }
        con.lock(Row::Inventory(*id)).await?;
        con.read(|tables| tables.inventory.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl RentalQuery for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.rentals()?.into_iter().find(|rental| rental.id() == id))
    }

    async fn has_open_rental(
        &self,
        con: &mut MemoryTransaction,
        inventory_id: &InventoryId,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con
            .rentals()?
            .iter()
            .any(|rental| rental.inventory_id() == inventory_id && rental.is_open()))
    }

    async fn find_detail_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError> {
        Ok(con
            .details(|rental| rental.id() == id)?
            .into_iter()
            .next())
    }

    async fn find_details_by_customer_id(
        &self,
        con: &mut MemoryTransaction,
        customer_id: &CustomerId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError> {
        let details = con.details(|rental| rental.customer_id() == customer_id)?;
        Ok(page(details, limit, offset))
    }

    async fn find_details_by_inventory_id(
        &self,
        con: &mut MemoryTransaction,
        inventory_id: &InventoryId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError> {
        let details = con.details(|rental| rental.inventory_id() == inventory_id)?;
        Ok(page(details, limit, offset))
    }
}

#[async_trait::async_trait]
impl RentalModifier for MemoryRepository {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        draft: &DraftRental,
    ) -> error_stack::Result<Rental, KernelError> {
        let id = {
            let mut tables = con.tables.lock().map_err(|_| poisoned())?;
            tables.last_rental_id += 1;
            RentalId::new(tables.last_rental_id)
        };
        let rental = Rental::from_draft(id, draft.clone());
        con.pending.insert(id, rental.clone());
        Ok(rental)
    }

    async fn close(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
        now: OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        con.lock(Row::Rental(*id)).await?;
        let closed = con
            .rentals()?
            .into_iter()
            .find(|rental| rental.id() == id)
            .and_then(|rental| rental.close(now));
        if let Some(rental) = &closed {
            con.pending.insert(*id, rental.clone());
        }
        Ok(closed)
    }
}

impl DependOnCustomerQuery for MemoryDatabase {
    type CustomerQuery = MemoryRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &MemoryRepository
    }
}

impl DependOnStaffQuery for MemoryDatabase {
    type StaffQuery = MemoryRepository;
    fn staff_query(&self) -> &Self::StaffQuery {
        &MemoryRepository
    }
}

impl DependOnInventoryQuery for MemoryDatabase {
    type InventoryQuery = MemoryRepository;
    fn inventory_query(&self) -> &Self::InventoryQuery {
        &MemoryRepository
    }
}

impl DependOnRentalQuery for MemoryDatabase {
    type RentalQuery = MemoryRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &MemoryRepository
    }
}

impl DependOnRentalModifier for MemoryDatabase {
    type RentalModifier = MemoryRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &MemoryRepository
    }
}
