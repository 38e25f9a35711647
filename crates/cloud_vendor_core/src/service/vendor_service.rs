//! Cloud vendor use-case service.
//!
//! # Responsibility
//! - Provide the `CloudVendorService` CRUD entry points for core callers.
//! - Map repository failures into caller-facing semantic errors.
//! - Emit metadata-only operation logs.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - Logs carry vendor ids only, never names, addresses or phone numbers.

use crate::db::DbError;
use crate::model::cloud_vendor::{CloudVendor, VendorValidationError};
use crate::repo::vendor_repo::{CloudVendorRepository, RepoError, VendorListQuery};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result message returned by successful write operations.
pub const SUCCESS_MESSAGE: &str = "Success";
/// Message used when a required vendor is absent.
pub const VENDOR_NOT_FOUND_MESSAGE: &str = "Requested Cloud Vendor does not exist";

const LIST_DEFAULT_LIMIT: u32 = 50;
const LIST_LIMIT_MAX: u32 = 500;

pub type ServiceResult<T> = Result<T, VendorServiceError>;

/// Service error for cloud vendor use-cases.
#[derive(Debug)]
pub enum VendorServiceError {
    /// Lookup argument is blank.
    InvalidInput(&'static str),
    /// Vendor record violates field rules.
    Validation(VendorValidationError),
    VendorNotFound(String),
    VendorAlreadyExists(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl VendorServiceError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Validation(_) => "validation_failed",
            Self::VendorNotFound(_) => "vendor_not_found",
            Self::VendorAlreadyExists(_) => "vendor_already_exists",
            Self::Repo(_) => "storage_error",
        }
    }
}

impl Display for VendorServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(field) => write!(f, "{field} cannot be empty"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::VendorNotFound(id) => write!(f, "{VENDOR_NOT_FOUND_MESSAGE}: {id}"),
            Self::VendorAlreadyExists(id) => write!(f, "cloud vendor already exists: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VendorServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for VendorServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::VendorNotFound(id),
            RepoError::AlreadyExists(id) => Self::VendorAlreadyExists(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for VendorServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Use-case service for cloud vendor records.
pub struct CloudVendorService<R: CloudVendorRepository> {
    repo: R,
}

impl<R: CloudVendorRepository> CloudVendorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new vendor record.
    ///
    /// # Contract
    /// - Rejects duplicate ids with `VendorAlreadyExists`; the stored record
    ///   is left untouched.
    /// - Returns `SUCCESS_MESSAGE`.
    pub fn create_cloud_vendor(&self, vendor: &CloudVendor) -> ServiceResult<&'static str> {
        let outcome = self.repo.create_vendor(vendor);
        log_write("vendor_create", &vendor.vendor_id, &outcome);
        outcome?;
        Ok(SUCCESS_MESSAGE)
    }

    /// Replaces an existing vendor record identified by `vendor_id`.
    ///
    /// # Contract
    /// - Full replacement: optional fields set to `None` are cleared.
    /// - Missing ids return `VendorNotFound`.
    pub fn update_cloud_vendor(&self, vendor: &CloudVendor) -> ServiceResult<&'static str> {
        let outcome = self.repo.update_vendor(vendor);
        log_write("vendor_update", &vendor.vendor_id, &outcome);
        outcome?;
        Ok(SUCCESS_MESSAGE)
    }

    /// Permanently deletes a vendor record.
    pub fn delete_cloud_vendor(&self, vendor_id: &str) -> ServiceResult<&'static str> {
        let vendor_id = normalize_arg(vendor_id, "vendor id")?;
        let outcome = self.repo.delete_vendor(vendor_id);
        log_write("vendor_delete", vendor_id, &outcome);
        outcome?;
        Ok(SUCCESS_MESSAGE)
    }

    /// Gets one vendor by id; `None` when absent.
    pub fn get_cloud_vendor(&self, vendor_id: &str) -> ServiceResult<Option<CloudVendor>> {
        let vendor_id = normalize_arg(vendor_id, "vendor id")?;
        let vendor = self.repo.get_vendor(vendor_id)?;
        debug!(
            "event=vendor_get module=service status=ok vendor_id={} found={}",
            vendor_id,
            vendor.is_some()
        );
        Ok(vendor)
    }

    /// Gets one vendor by id, treating absence as `VendorNotFound`.
    pub fn require_cloud_vendor(&self, vendor_id: &str) -> ServiceResult<CloudVendor> {
        self.get_cloud_vendor(vendor_id)?
            .ok_or_else(|| VendorServiceError::VendorNotFound(vendor_id.trim().to_string()))
    }

    /// Lists every vendor ordered by `vendor_id ASC`.
    pub fn get_all_cloud_vendors(&self) -> ServiceResult<Vec<CloudVendor>> {
        let vendors = self.repo.list_vendors(&VendorListQuery::default())?;
        debug!(
            "event=vendor_list module=service status=ok count={}",
            vendors.len()
        );
        Ok(vendors)
    }

    /// Lists one page of vendors ordered by `vendor_id ASC`.
    ///
    /// Limit defaults to 50 and clamps to 500.
    pub fn list_cloud_vendors(&self, query: &VendorListQuery) -> ServiceResult<Vec<CloudVendor>> {
        let normalized = VendorListQuery {
            limit: Some(normalize_list_limit(query.limit)),
            offset: query.offset,
        };
        let vendors = self.repo.list_vendors(&normalized)?;
        debug!(
            "event=vendor_list module=service status=ok limit={:?} offset={} count={}",
            normalized.limit,
            normalized.offset,
            vendors.len()
        );
        Ok(vendors)
    }

    /// Lists vendors whose name matches exactly (case-sensitive).
    pub fn get_by_vendor_name(&self, vendor_name: &str) -> ServiceResult<Vec<CloudVendor>> {
        let vendor_name = normalize_arg(vendor_name, "vendor name")?;
        let vendors = self.repo.find_by_name(vendor_name)?;
        debug!(
            "event=vendor_find_by_name module=service status=ok count={}",
            vendors.len()
        );
        Ok(vendors)
    }

    pub fn count_cloud_vendors(&self) -> ServiceResult<u64> {
        Ok(self.repo.count_vendors()?)
    }
}

/// Normalizes a list page size: `None` -> default, `0` -> 1, large -> max.
pub fn normalize_list_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(LIST_DEFAULT_LIMIT).clamp(1, LIST_LIMIT_MAX)
}

fn normalize_arg<'a>(value: &'a str, field: &'static str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(VendorServiceError::InvalidInput(field));
    }
    Ok(trimmed)
}

fn log_write<T>(event: &str, vendor_id: &str, outcome: &Result<T, RepoError>) {
    match outcome {
        Ok(_) => info!("event={event} module=service status=ok vendor_id={vendor_id}"),
        Err(err) => warn!(
            "event={} module=service status=error vendor_id={} error_code={}",
            event,
            vendor_id,
            repo_error_code(err)
        ),
    }
}

fn repo_error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::NotFound(_) => "vendor_not_found",
        RepoError::AlreadyExists(_) => "vendor_already_exists",
        RepoError::InvalidData(_) => "invalid_data",
        RepoError::Db(_) | RepoError::UninitializedConnection { .. } => "storage_error",
    }
}
