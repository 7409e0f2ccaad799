//! Member repository for database operations.

use crate::entities::{Member, MemberChanges, MemberFilter, NewMember};
use crate::types::{StoreError, StoreResult};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

const MEMBER_COLUMNS: &str =
    "identifier, display_name, email, sex, grade, password_hash, created_at, updated_at";

/// Repository for member database operations
#[derive(Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Find a member by its unique identifier
    pub async fn find_by_identifier(&self, identifier: i64) -> StoreResult<Option<Member>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE identifier = ?");
        let row = sqlx::query(&query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(member_from_row).transpose().map_err(StoreError::from)
    }

    /// Return one window of members matching `filter` in insertion order, plus the total match count.
    ///
    /// `limit = None` returns every row from `offset` onwards.
    pub async fn find(
        &self,
        filter: &MemberFilter,
        offset: u64,
        limit: Option<u64>,
    ) -> StoreResult<(Vec<Member>, u64)> {
        let (where_clause, display_name) = match filter {
            MemberFilter::All => ("", None),
            MemberFilter::DisplayName(name) => ("WHERE display_name = ?", Some(name.as_str())),
        };

        // Count and window come from the same read transaction so they agree.
        let mut tx = self.pool.begin().await?;

        let count_query = format!("SELECT COUNT(*) FROM members {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(name) = display_name {
            count = count.bind(name);
        }
        let total = count.fetch_one(&mut *tx).await?;

        let list_query = format!(
            "SELECT {MEMBER_COLUMNS} FROM members {where_clause} ORDER BY seq LIMIT ? OFFSET ?"
        );
        let mut list = sqlx::query(&list_query);
        if let Some(name) = display_name {
            list = list.bind(name);
        }
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map_or(-1, |value| i64::try_from(value).unwrap_or(i64::MAX));
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let rows = list.bind(limit).bind(offset).fetch_all(&mut *tx).await?;

        tx.commit().await?;

        let members = rows
            .iter()
            .map(member_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(?filter, offset, returned = members.len(), total, "member window fetched");
        Ok((members, u64::try_from(total).unwrap_or(0)))
    }

    /// Insert a member. A duplicate identifier fails atomically with [`StoreError::Conflict`].
    pub async fn insert(&self, member: &NewMember) -> StoreResult<Member> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO members (identifier, display_name, email, sex, grade, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(member.identifier)
        .bind(&member.display_name)
        .bind(&member.email)
        .bind(&member.sex)
        .bind(&member.grade)
        .bind(&member.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|err| StoreError::from_insert(err, member.identifier))?;

        Ok(Member {
            identifier: member.identifier,
            display_name: member.display_name.clone(),
            email: member.email.clone(),
            sex: member.sex.clone(),
            grade: member.grade.clone(),
            password_hash: member.password_hash.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Rewrite the provided non-identifier fields. Returns the number of affected rows.
    pub async fn update(&self, identifier: i64, changes: &MemberChanges) -> StoreResult<u64> {
        let mut assignments = Vec::new();
        let mut values = Vec::new();

        let fields = [
            ("display_name", &changes.display_name),
            ("email", &changes.email),
            ("sex", &changes.sex),
            ("grade", &changes.grade),
            ("password_hash", &changes.password_hash),
        ];
        for (column, value) in fields {
            if let Some(value) = value {
                assignments.push(format!("{column} = ?"));
                values.push(value.clone());
            }
        }

        if assignments.is_empty() {
            let exists = self.find_by_identifier(identifier).await?.is_some();
            return Ok(u64::from(exists));
        }

        assignments.push("updated_at = ?".to_string());
        values.push(Utc::now().to_rfc3339());

        let statement = format!(
            "UPDATE members SET {} WHERE identifier = ?",
            assignments.join(", ")
        );
        let mut query = sqlx::query(&statement);
        for value in values {
            query = query.bind(value);
        }

        let result = query.bind(identifier).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete a member by identifier. Returns the number of affected rows.
    pub async fn delete(&self, identifier: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM members WHERE identifier = ?")
            .bind(identifier)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn member_from_row(row: &SqliteRow) -> Result<Member, sqlx::Error> {
    Ok(Member {
        identifier: row.try_get("identifier")?,
        display_name: row.try_get("display_name")?,
        email: row.try_get("email")?,
        sex: row.try_get("sex")?,
        grade: row.try_get("grade")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
