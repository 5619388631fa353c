use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    full_name, CustomerId, DraftRental, FilmTitle, FirstName, InventoryId, LastName, LastUpdate,
    Rental, RentalDate, RentalDetail, RentalId, ReturnDate, SelectLimit, SelectOffset, StaffId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn has_open_rental(
        &self,
        con: &mut PostgresTransaction,
        inventory_id: &InventoryId,
    ) -> error_stack::Result<bool, KernelError> {
        PgRentalInternal::has_open_rental(con, inventory_id).await
    }

    async fn find_detail_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError> {
        PgRentalInternal::find_detail_by_id(con, id).await
    }

    async fn find_details_by_customer_id(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError> {
        PgRentalInternal::find_details_by_customer_id(con, customer_id, limit, offset).await
    }

    async fn find_details_by_inventory_id(
        &self,
        con: &mut PostgresTransaction,
        inventory_id: &InventoryId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError> {
        PgRentalInternal::find_details_by_inventory_id(con, inventory_id, limit, offset).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        draft: &DraftRental,
    ) -> error_stack::Result<Rental, KernelError> {
        PgRentalInternal::create(con, draft).await
    }

    async fn close(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
        now: OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::close(con, id, now).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    rental_id: i32,
    rental_date: OffsetDateTime,
    inventory_id: i32,
    customer_id: i32,
    staff_id: i32,
    return_date: Option<OffsetDateTime>,
    last_update: OffsetDateTime,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.rental_id),
            RentalDate::new(value.rental_date),
            InventoryId::new(value.inventory_id),
            CustomerId::new(value.customer_id),
            StaffId::new(value.staff_id),
            value.return_date.map(ReturnDate::new),
            LastUpdate::new(value.last_update),
        )
    }
}

#[derive(sqlx::FromRow)]
struct RentalDetailRow {
    #[sqlx(flatten)]
    rental: RentalRow,
    film_title: String,
    customer_first_name: String,
    customer_last_name: String,
    staff_first_name: String,
    staff_last_name: String,
}

impl From<RentalDetailRow> for RentalDetail {
    fn from(value: RentalDetailRow) -> Self {
        RentalDetail::new(
            Rental::from(value.rental),
            FilmTitle::new(value.film_title),
            full_name(
                &FirstName::new(value.customer_first_name),
                &LastName::new(value.customer_last_name),
            ),
            full_name(
                &FirstName::new(value.staff_first_name),
                &LastName::new(value.staff_last_name),
            ),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT rental_id::int4 AS rental_id, rental_date::timestamptz AS rental_date,
                   inventory_id::int4 AS inventory_id, customer_id::int4 AS customer_id,
                   staff_id::int4 AS staff_id, return_date::timestamptz AS return_date,
                   last_update::timestamptz AS last_update
            FROM rental
            WHERE rental_id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn has_open_rental(
        con: &mut PgConnection,
        inventory_id: &InventoryId,
    ) -> error_stack::Result<bool, KernelError> {
        let exists = sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(
                SELECT 1 FROM rental
                WHERE inventory_id = $1 AND return_date IS NULL
            )
            "#,
        )
        .bind(inventory_id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(exists)
    }

    async fn find_detail_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError> {
        let row = sqlx::query_as::<_, RentalDetailRow>(
            // language=postgresql
            r#"
            SELECT r.rental_id::int4 AS rental_id, r.rental_date::timestamptz AS rental_date,
                   r.inventory_id::int4 AS inventory_id, r.customer_id::int4 AS customer_id,
                   r.staff_id::int4 AS staff_id, r.return_date::timestamptz AS return_date,
                   r.last_update::timestamptz AS last_update,
                   f.title AS film_title,
                   c.first_name AS customer_first_name, c.last_name AS customer_last_name,
                   s.first_name AS staff_first_name, s.last_name AS staff_last_name
            FROM rental r
            JOIN inventory i ON i.inventory_id = r.inventory_id
            JOIN film f ON f.film_id = i.film_id
            JOIN customer c ON c.customer_id = r.customer_id
            JOIN staff s ON s.staff_id = r.staff_id
            WHERE r.rental_id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(RentalDetail::from))
    }

    async fn find_details_by_customer_id(
        con: &mut PgConnection,
        customer_id: &CustomerId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError> {
        let rows = sqlx::query_as::<_, RentalDetailRow>(
            // language=postgresql
            r#"
            SELECT r.rental_id::int4 AS rental_id, r.rental_date::timestamptz AS rental_date,
                   r.inventory_id::int4 AS inventory_id, r.customer_id::int4 AS customer_id,
                   r.staff_id::int4 AS staff_id, r.return_date::timestamptz AS return_date,
                   r.last_update::timestamptz AS last_update,
                   f.title AS film_title,
                   c.first_name AS customer_first_name, c.last_name AS customer_last_name,
                   s.first_name AS staff_first_name, s.last_name AS staff_last_name
            FROM rental r
            JOIN inventory i ON i.inventory_id = r.inventory_id
            JOIN film f ON f.film_id = i.film_id
            JOIN customer c ON c.customer_id = r.customer_id
            JOIN staff s ON s.staff_id = r.staff_id
            WHERE r.customer_id = $1
            ORDER BY r.rental_date DESC, r.rental_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id.as_ref())
        .bind(i64::from(*limit.as_ref()))
        .bind(i64::from(*offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(RentalDetail::from).collect())
    }

    async fn find_details_by_inventory_id(
        con: &mut PgConnection,
        inventory_id: &InventoryId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<RentalDetail>, KernelError> {
        let rows = sqlx::query_as::<_, RentalDetailRow>(
            // language=postgresql
            r#"
            SELECT r.rental_id::int4 AS rental_id, r.rental_date::timestamptz AS rental_date,
                   r.inventory_id::int4 AS inventory_id, r.customer_id::int4 AS customer_id,
                   r.staff_id::int4 AS staff_id, r.return_date::timestamptz AS return_date,
                   r.last_update::timestamptz AS last_update,
                   f.title AS film_title,
                   c.first_name AS customer_first_name, c.last_name AS customer_last_name,
                   s.first_name AS staff_first_name, s.last_name AS staff_last_name
            FROM rental r
            JOIN inventory i ON i.inventory_id = r.inventory_id
            JOIN film f ON f.film_id = i.film_id
            JOIN customer c ON c.customer_id = r.customer_id
            JOIN staff s ON s.staff_id = r.staff_id
            WHERE r.inventory_id = $1
            ORDER BY r.rental_date DESC, r.rental_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(inventory_id.as_ref())
        .bind(i64::from(*limit.as_ref()))
        .bind(i64::from(*offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(RentalDetail::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        draft: &DraftRental,
    ) -> error_stack::Result<Rental, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            INSERT INTO rental (rental_date, inventory_id, customer_id, staff_id, last_update)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING rental_id::int4 AS rental_id, rental_date::timestamptz AS rental_date,
                      inventory_id::int4 AS inventory_id, customer_id::int4 AS customer_id,
                      staff_id::int4 AS staff_id, return_date::timestamptz AS return_date,
                      last_update::timestamptz AS last_update
            "#,
        )
        .bind(draft.rental_date().as_ref())
        .bind(draft.inventory_id().as_ref())
        .bind(draft.customer_id().as_ref())
        .bind(draft.staff_id().as_ref())
        .bind(draft.last_update().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Rental::from(row))
    }

    async fn close(
        con: &mut PgConnection,
        id: &RentalId,
        now: OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            UPDATE rental
            SET return_date = $2, last_update = $2
            WHERE rental_id = $1 AND return_date IS NULL
            RETURNING rental_id::int4 AS rental_id, rental_date::timestamptz AS rental_date,
                      inventory_id::int4 AS inventory_id, customer_id::int4 AS customer_id,
                      staff_id::int4 AS staff_id, return_date::timestamptz AS return_date,
                      last_update::timestamptz AS last_update
            "#,
        )
        .bind(id.as_ref())
        .bind(now)
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{DraftRental, RentalId, SelectLimit, SelectOffset};
    use kernel::KernelError;

    use crate::database::postgres::{fixture, PostgresDatabase, PostgresRentalRepository};
    use crate::error::ConvertError;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_then_close_once() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let fixture = fixture::insert(&mut con).await.convert_error()?;

        assert!(
            !PostgresRentalRepository
                .has_open_rental(&mut con, &fixture.inventory)
                .await?
        );

        let draft = DraftRental::open(
            fixture.inventory,
            fixture.active_customer,
            fixture.staff,
            OffsetDateTime::now_utc(),
        );
        let created = PostgresRentalRepository.create(&mut con, &draft).await?;
        assert!(created.is_open());
        assert_eq!(created.inventory_id(), &fixture.inventory);
        assert!(
            PostgresRentalRepository
                .has_open_rental(&mut con, &fixture.inventory)
                .await?
        );

        let found = PostgresRentalRepository
            .find_by_id(&mut con, created.id())
            .await?;
        assert_eq!(found.as_ref().map(|rental| rental.id()), Some(created.id()));

        let closed = PostgresRentalRepository
            .close(&mut con, created.id(), OffsetDateTime::now_utc())
            .await?
            .expect("open rental closes");
        assert!(!closed.is_open());
        let return_date = closed.return_date().clone();

        let again = PostgresRentalRepository
            .close(&mut con, created.id(), OffsetDateTime::now_utc())
            .await?;
        assert!(again.is_none());

        let found = PostgresRentalRepository
            .find_by_id(&mut con, created.id())
            .await?
            .expect("rental still exists");
        assert_eq!(found.return_date(), &return_date);
        assert!(
            !PostgresRentalRepository
                .has_open_rental(&mut con, &fixture.inventory)
                .await?
        );

        let missing = PostgresRentalRepository
            .close(&mut con, &RentalId::new(-1), OffsetDateTime::now_utc())
            .await?;
        assert!(missing.is_none());

        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn details_are_joined_and_newest_first() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let fixture = fixture::insert(&mut con).await.convert_error()?;

        let earlier = OffsetDateTime::now_utc() - Duration::days(2);
        let first = PostgresRentalRepository
            .create(
                &mut con,
                &DraftRental::open(
                    fixture.inventory,
                    fixture.active_customer,
                    fixture.staff,
                    earlier,
                ),
            )
            .await?;
        PostgresRentalRepository
            .close(&mut con, first.id(), earlier + Duration::days(1))
            .await?;
        let second = PostgresRentalRepository
            .create(
                &mut con,
                &DraftRental::open(
                    fixture.inventory,
                    fixture.active_customer,
                    fixture.staff,
                    OffsetDateTime::now_utc(),
                ),
            )
            .await?;

        let detail = PostgresRentalRepository
            .find_detail_by_id(&mut con, second.id())
            .await?
            .expect("created rental");
        assert_eq!(detail.film_title().as_ref(), &fixture.film_title);
        assert_eq!(detail.customer_name(), "Mary Smith");
        assert_eq!(detail.staff_name(), "Mike Hillyer");

        let by_customer = PostgresRentalRepository
            .find_details_by_customer_id(
                &mut con,
                &fixture.active_customer,
                &SelectLimit::default(),
                &SelectOffset::default(),
            )
            .await?;
        let ids = by_customer
            .iter()
            .map(|detail| *detail.rental().id())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![*second.id(), *first.id()]);

        let paged = PostgresRentalRepository
            .find_details_by_inventory_id(
                &mut con,
                &fixture.inventory,
                &SelectLimit::new(1),
                &SelectOffset::new(1),
            )
            .await?;
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].rental().id(), first.id());

        con.roll_back().await?;
        Ok(())
    }
}
