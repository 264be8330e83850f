use crate::{
    Db,
    types::{DateTime, OfferRow},
};
use offers_core::{
    models::{Direction, OfferData, OfferId, OfferRecord, Page, PageRequest, Sort, SortProperty},
    ports::{OfferRepository, Replaced},
};
use sqlx::{QueryBuilder, Sqlite};
use time::OffsetDateTime;
use tracing::{Level, event};

const OFFER_COLUMNS: &str = r#"
    select
        id,
        created_at,
        description,
        currency,
        amount,
        duration,
        cancelled
    from
        offer
"#;

impl OfferRepository for Db {
    async fn create_offer(
        &self,
        data: OfferData,
        as_of: OffsetDateTime,
    ) -> Result<OfferId, Self::Error> {
        let price = data.price();
        let created_at = DateTime::from(as_of);
        let id: i64 = sqlx::query_scalar(
            r#"
            insert into
                offer (created_at, description, currency, amount, duration, cancelled)
            values
                ($1, $2, $3, $4, $5, $6)
            returning
                id
            "#,
        )
        .bind(created_at)
        .bind(data.description())
        .bind(price.currency.code())
        .bind(price.value.to_string())
        .bind(data.duration().to_string())
        .bind(data.cancelled())
        .fetch_one(&self.writer)
        .await?;

        event!(Level::DEBUG, id, %created_at, "created offer");
        OfferId::new(id).map_err(|err| sqlx::Error::Decode(Box::new(err)))
    }

    async fn replace_offer(
        &self,
        offer_id: OfferId,
        data: OfferData,
        as_of: OffsetDateTime,
    ) -> Result<Replaced, Self::Error> {
        let price = data.price();
        let amount = price.value.to_string();
        let duration = data.duration().to_string();

        // The writer pool has a single connection, so nothing can slip in
        // between the update and the insert.
        let mut tx = self.writer.begin().await?;

        let updated = sqlx::query(
            r#"
            update
                offer
            set
                description = $2,
                currency = $3,
                amount = $4,
                duration = $5,
                cancelled = $6
            where
                id = $1
            "#,
        )
        .bind(offer_id.get())
        .bind(data.description())
        .bind(price.currency.code())
        .bind(&amount)
        .bind(&duration)
        .bind(data.cancelled())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let outcome = if updated > 0 {
            Replaced::Updated
        } else {
            // An explicit id also advances the autoincrement sequence, so it
            // must leave room for the ids later creates are assigned
            let offer_id = offer_id
                .chosen()
                .map_err(|err| sqlx::Error::Encode(Box::new(err)))?;
            let created_at = DateTime::from(as_of);

            sqlx::query(
                r#"
                insert into
                    offer (id, created_at, description, currency, amount, duration, cancelled)
                values
                    ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(offer_id.get())
            .bind(created_at)
            .bind(data.description())
            .bind(price.currency.code())
            .bind(&amount)
            .bind(&duration)
            .bind(data.cancelled())
            .execute(&mut *tx)
            .await?;

            event!(
                Level::DEBUG,
                id = offer_id.get(),
                %created_at,
                "inserted offer with chosen id"
            );
            Replaced::Created
        };

        tx.commit().await?;

        event!(Level::DEBUG, id = offer_id.get(), ?outcome, "replaced offer");
        Ok(outcome)
    }

    async fn delete_offer(&self, offer_id: OfferId) -> Result<bool, Self::Error> {
        let deleted = sqlx::query(
            r#"
            delete from
                offer
            where
                id = $1
            "#,
        )
        .bind(offer_id.get())
        .execute(&self.writer)
        .await?
        .rows_affected();

        event!(Level::DEBUG, id = offer_id.get(), deleted, "deleted offer");
        Ok(deleted > 0)
    }

    async fn get_offer(&self, offer_id: OfferId) -> Result<Option<OfferRecord>, Self::Error> {
        let mut query = QueryBuilder::<Sqlite>::new(OFFER_COLUMNS);
        query.push(" where id = ").push_bind(offer_id.get());

        query
            .build_query_as::<OfferRow>()
            .fetch_optional(&self.reader)
            .await?
            .map(OfferRow::into_record)
            .transpose()
    }

    async fn list_offers(&self, request: PageRequest) -> Result<Page<OfferRecord>, Self::Error> {
        // Count and slice come from the same snapshot
        let mut tx = self.reader.begin().await?;

        let total: i64 = sqlx::query_scalar("select count(*) from offer")
            .fetch_one(&mut *tx)
            .await?;

        // A page whose offset does not even fit in SQLite's integers is
        // necessarily past the end
        let offset = request.offset().and_then(|offset| i64::try_from(offset).ok());
        let items = if let Some(offset) = offset {
            let limit = i64::try_from(request.size.get()).unwrap_or(i64::MAX);

            let mut query = QueryBuilder::<Sqlite>::new(OFFER_COLUMNS);
            query
                .push(" order by ")
                .push(order_by(request.sort))
                .push(" limit ")
                .push_bind(limit)
                .push(" offset ")
                .push_bind(offset);

            query
                .build_query_as::<OfferRow>()
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .map(OfferRow::into_record)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        tx.commit().await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

/// The order by clause for a sort, always falling back to ascending id so
/// that pages are stable.
fn order_by(sort: Option<Sort>) -> &'static str {
    let Some(Sort {
        property,
        direction,
    }) = sort
    else {
        return "id asc";
    };

    match (property, direction) {
        (SortProperty::Id, Direction::Asc) => "id asc",
        (SortProperty::Id, Direction::Desc) => "id desc",
        (SortProperty::CreatedAt, Direction::Asc) => "created_at asc, id asc",
        (SortProperty::CreatedAt, Direction::Desc) => "created_at desc, id asc",
        (SortProperty::Description, Direction::Asc) => "description asc, id asc",
        (SortProperty::Description, Direction::Desc) => "description desc, id asc",
        (SortProperty::Price, Direction::Asc) => "cast(amount as real) asc, id asc",
        (SortProperty::Price, Direction::Desc) => "cast(amount as real) desc, id asc",
        (SortProperty::Cancelled, Direction::Asc) => "cancelled asc, id asc",
        (SortProperty::Cancelled, Direction::Desc) => "cancelled desc, id asc",
    }
}
