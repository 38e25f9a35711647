//! Core domain logic for the cloud vendor registry.
//! This crate is the single source of truth for vendor record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::cloud_vendor::{CloudVendor, VendorId, VendorValidationError, MAX_VENDOR_ID_LEN};
pub use repo::vendor_repo::{
    CloudVendorRepository, RepoError, RepoResult, SqliteCloudVendorRepository, VendorListQuery,
};
pub use service::vendor_service::{
    normalize_list_limit, CloudVendorService, ServiceResult, VendorServiceError, SUCCESS_MESSAGE,
    VENDOR_NOT_FOUND_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
