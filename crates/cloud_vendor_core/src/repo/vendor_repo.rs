//! Cloud vendor repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `cloud_vendors` storage.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `CloudVendor::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Every list query is ordered by `vendor_id ASC`.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::cloud_vendor::{CloudVendor, VendorId, VendorValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const VENDOR_SELECT_SQL: &str = "SELECT
    vendor_id,
    vendor_name,
    vendor_address,
    vendor_phone_number
FROM cloud_vendors";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for vendor persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(VendorValidationError),
    Db(DbError),
    NotFound(VendorId),
    AlreadyExists(VendorId),
    InvalidData(String),
    /// Connection schema is not at the version this binary writes.
    UninitializedConnection {
        actual_version: u32,
        expected_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "cloud vendor not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "cloud vendor already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted vendor data: {message}"),
            Self::UninitializedConnection {
                actual_version,
                expected_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VendorValidationError> for RepoError {
    fn from(value: VendorValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Pagination options for listing vendors.
///
/// The default value lists every vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for cloud vendor CRUD operations.
pub trait CloudVendorRepository {
    /// Inserts a new vendor and returns its id.
    fn create_vendor(&self, vendor: &CloudVendor) -> RepoResult<VendorId>;
    /// Replaces every non-key field of an existing vendor.
    fn update_vendor(&self, vendor: &CloudVendor) -> RepoResult<()>;
    /// Removes a vendor permanently.
    fn delete_vendor(&self, vendor_id: &str) -> RepoResult<()>;
    fn get_vendor(&self, vendor_id: &str) -> RepoResult<Option<CloudVendor>>;
    fn list_vendors(&self, query: &VendorListQuery) -> RepoResult<Vec<CloudVendor>>;
    /// Exact, case-sensitive match on `vendor_name`.
    fn find_by_name(&self, vendor_name: &str) -> RepoResult<Vec<CloudVendor>>;
    fn count_vendors(&self) -> RepoResult<u64>;
}

/// SQLite-backed cloud vendor repository.
pub struct SqliteCloudVendorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCloudVendorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                actual_version,
                expected_version,
            });
        }
        Ok(Self { conn })
    }
}

impl CloudVendorRepository for SqliteCloudVendorRepository<'_> {
    fn create_vendor(&self, vendor: &CloudVendor) -> RepoResult<VendorId> {
        vendor.validate()?;

        let result = self.conn.execute(
            "INSERT INTO cloud_vendors (
                vendor_id,
                vendor_name,
                vendor_address,
                vendor_phone_number
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                vendor.vendor_id.as_str(),
                vendor.vendor_name.as_str(),
                vendor.vendor_address.as_deref(),
                vendor.vendor_phone_number.as_deref(),
            ],
        );

        match result {
            Ok(_) => Ok(vendor.vendor_id.clone()),
            Err(err) if is_primary_key_conflict(&err) => {
                Err(RepoError::AlreadyExists(vendor.vendor_id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_vendor(&self, vendor: &CloudVendor) -> RepoResult<()> {
        vendor.validate()?;

        let changed = self.conn.execute(
            "UPDATE cloud_vendors
             SET
                vendor_name = ?1,
                vendor_address = ?2,
                vendor_phone_number = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE vendor_id = ?4;",
            params![
                vendor.vendor_name.as_str(),
                vendor.vendor_address.as_deref(),
                vendor.vendor_phone_number.as_deref(),
                vendor.vendor_id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(vendor.vendor_id.clone()));
        }

        Ok(())
    }

    fn delete_vendor(&self, vendor_id: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM cloud_vendors WHERE vendor_id = ?1;",
            [vendor_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(vendor_id.to_string()));
        }

        Ok(())
    }

    fn get_vendor(&self, vendor_id: &str) -> RepoResult<Option<CloudVendor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VENDOR_SELECT_SQL} WHERE vendor_id = ?1;"))?;

        let mut rows = stmt.query([vendor_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_vendor_row(row)?));
        }

        Ok(None)
    }

    fn list_vendors(&self, query: &VendorListQuery) -> RepoResult<Vec<CloudVendor>> {
        let mut sql = format!("{VENDOR_SELECT_SQL} ORDER BY vendor_id ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query(params_from_iter(bind_values))?;
        collect_vendors(rows)
    }

    fn find_by_name(&self, vendor_name: &str) -> RepoResult<Vec<CloudVendor>> {
        let mut stmt = self.conn.prepare(&format!(
            "{VENDOR_SELECT_SQL}
             WHERE vendor_name = ?1
             ORDER BY vendor_id ASC;"
        ))?;
        let rows = stmt.query([vendor_name])?;
        collect_vendors(rows)
    }

    fn count_vendors(&self) -> RepoResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cloud_vendors;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative vendor count `{count}`")))
    }
}

fn collect_vendors(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<CloudVendor>> {
    let mut vendors = Vec::new();
    while let Some(row) = rows.next()? {
        vendors.push(parse_vendor_row(row)?);
    }
    Ok(vendors)
}

fn parse_vendor_row(row: &Row<'_>) -> RepoResult<CloudVendor> {
    let vendor = CloudVendor {
        vendor_id: row.get("vendor_id")?,
        vendor_name: row.get("vendor_name")?,
        vendor_address: row.get("vendor_address")?,
        vendor_phone_number: row.get("vendor_phone_number")?,
    };
    vendor.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "row `{}` in cloud_vendors failed validation: {err}",
            vendor.vendor_id
        ))
    })?;
    Ok(vendor)
}

fn is_primary_key_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
