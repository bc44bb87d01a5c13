use crate::error::StoreResult;
use crate::models::{Contact, Page, PageRequest, Sort, SortDirection};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT,
    phone TEXT NOT NULL,
    address TEXT
)"#;

const SELECT_COLUMNS: &str = "SELECT id, first_name, last_name, phone, address FROM contacts";

// $1 is the search text; strpos keeps it literal, unlike LIKE patterns.
// lower() folds per the database LC_CTYPE, so non-ASCII folding may differ from fold_case.
const SEARCH_PREDICATE: &str = "strpos(lower(first_name), lower($1)) > 0 \
     OR strpos(lower(coalesce(last_name, '')), lower($1)) > 0 \
     OR strpos(lower(phone), lower($1)) > 0 \
     OR strpos(lower(coalesce(address, '')), lower($1)) > 0";

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: String,
    first_name: String,
    last_name: Option<String>,
    phone: String,
    address: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            address: row.address,
        }
    }
}

/// Build the `ORDER BY` clause for a sort.
///
/// Byte-wise collation and null placement match the in-memory store, and the
/// id tie-break is always ascending.
pub(crate) fn order_by_clause(sort: &Sort) -> String {
    let (direction, nulls) = match sort.direction {
        SortDirection::Asc => ("ASC", "NULLS FIRST"),
        SortDirection::Desc => ("DESC", "NULLS LAST"),
    };
    format!(
        "ORDER BY {} COLLATE \"C\" {} {}, id COLLATE \"C\" ASC",
        sort.field.column(),
        direction,
        nulls
    )
}

/// Build the paged select, optionally filtered by the search predicate.
///
/// Without a filter the limit and offset bind to `$1`/`$2`, with one they
/// shift to `$2`/`$3`.
pub(crate) fn page_query(sort: &Sort, filtered: bool) -> String {
    if filtered {
        format!(
            "{} WHERE {} {} LIMIT $2 OFFSET $3",
            SELECT_COLUMNS,
            SEARCH_PREDICATE,
            order_by_clause(sort)
        )
    } else {
        format!(
            "{} {} LIMIT $1 OFFSET $2",
            SELECT_COLUMNS,
            order_by_clause(sort)
        )
    }
}

/// Contact repository backed by a Postgres connection pool.
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and make sure the contacts table exists.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Create the contacts table if missing.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::info!("Contacts table ready");
        Ok(())
    }

    fn limit_offset(request: &PageRequest) -> (i64, i64) {
        let limit = i64::try_from(request.size).unwrap_or(i64::MAX);
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        (limit, offset)
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn save(&self, mut contact: Contact) -> StoreResult<Contact> {
        if contact.is_new() {
            contact.id = Uuid::new_v4().to_string();
        }

        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (id, first_name, last_name, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                address = EXCLUDED.address
            RETURNING id, first_name, last_name, phone, address
            "#,
        )
        .bind(&contact.id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.phone)
        .bind(&contact.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Contact>> {
        let row = sqlx::query_as::<_, ContactRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::from))
    }

    async fn exists_by_id(&self, id: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM contacts WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<Contact>> {
        let (limit, offset) = Self::limit_offset(request);

        let rows = sqlx::query_as::<_, ContactRow>(&page_query(&request.sort, false))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let total = self.count().await?;

        Ok(Page::new(rows.into_iter().map(Contact::from).collect(), total))
    }

    async fn search(&self, text: &str, request: &PageRequest) -> StoreResult<Page<Contact>> {
        let (limit, offset) = Self::limit_offset(request);

        let rows = sqlx::query_as::<_, ContactRow>(&page_query(&request.sort, true))
            .bind(text)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM contacts WHERE {}",
            SEARCH_PREDICATE
        ))
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page::new(
            rows.into_iter().map(Contact::from).collect(),
            total.max(0) as u64,
        ))
    }

    async fn count(&self) -> StoreResult<u64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }
}
