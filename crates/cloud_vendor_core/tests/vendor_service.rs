use cloud_vendor_core::db::open_db_in_memory;
use cloud_vendor_core::{
    CloudVendor, CloudVendorService, SqliteCloudVendorRepository, VendorListQuery,
    VendorServiceError, VendorValidationError, SUCCESS_MESSAGE,
};
use rusqlite::Connection;

fn service_for(conn: &Connection) -> CloudVendorService<SqliteCloudVendorRepository<'_>> {
    let repo = SqliteCloudVendorRepository::try_new(conn)
        .expect("migrated connection should be accepted");
    CloudVendorService::new(repo)
}

#[test]
fn write_operations_return_success_message() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = service_for(&conn);

    let vendor = CloudVendor::new("C1", "Amazon").with_address("USA");
    assert_eq!(service.create_cloud_vendor(&vendor).unwrap(), SUCCESS_MESSAGE);

    let updated = CloudVendor::new("C1", "Amazon").with_address("Seattle, USA");
    assert_eq!(service.update_cloud_vendor(&updated).unwrap(), "Success");

    assert_eq!(service.delete_cloud_vendor("C1").unwrap(), "Success");
    assert!(service.get_cloud_vendor("C1").unwrap().is_none());
}

#[test]
fn get_cloud_vendor_trims_id_and_require_maps_absence_to_not_found() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = service_for(&conn);
    service
        .create_cloud_vendor(&CloudVendor::new("C1", "Amazon"))
        .unwrap();

    let found = service.get_cloud_vendor("  C1 ").unwrap().unwrap();
    assert_eq!(found.vendor_name, "Amazon");

    let err = service.require_cloud_vendor("C2").unwrap_err();
    assert!(matches!(err, VendorServiceError::VendorNotFound(ref id) if id == "C2"));
    assert_eq!(err.code(), "vendor_not_found");
    assert!(err
        .to_string()
        .starts_with("Requested Cloud Vendor does not exist"));
}

#[test]
fn blank_lookup_arguments_are_invalid_input() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = service_for(&conn);

    for err in [
        service.get_cloud_vendor("  ").unwrap_err(),
        service.delete_cloud_vendor("").unwrap_err(),
        service.get_by_vendor_name("\t").unwrap_err(),
    ] {
        assert_eq!(err.code(), "invalid_input");
    }
}

#[test]
fn errors_keep_conflict_validation_and_not_found_distinct() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = service_for(&conn);
    service
        .create_cloud_vendor(&CloudVendor::new("C1", "Amazon"))
        .unwrap();

    let conflict = service
        .create_cloud_vendor(&CloudVendor::new("C1", "Other"))
        .unwrap_err();
    assert!(matches!(conflict, VendorServiceError::VendorAlreadyExists(_)));

    let invalid = service
        .create_cloud_vendor(&CloudVendor::new("C2", "Azure").with_phone_number("n/a"))
        .unwrap_err();
    assert!(matches!(invalid, VendorServiceError::Validation(_)));

    let missing = service
        .update_cloud_vendor(&CloudVendor::new("C9", "Ghost"))
        .unwrap_err();
    assert!(matches!(missing, VendorServiceError::VendorNotFound(_)));

    let missing_delete = service.delete_cloud_vendor("C9").unwrap_err();
    assert_eq!(missing_delete.code(), "vendor_not_found");
}

#[test]
fn get_all_and_get_by_name_return_id_ordered_vendors() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = service_for(&conn);
    for (id, name) in [("C3", "Google"), ("C2", "Amazon"), ("C1", "Amazon")] {
        service
            .create_cloud_vendor(&CloudVendor::new(id, name))
            .unwrap();
    }

    let all = service.get_all_cloud_vendors().unwrap();
    let ids: Vec<_> = all.iter().map(|v| v.vendor_id.as_str()).collect();
    assert_eq!(ids, ["C1", "C2", "C3"]);
    assert_eq!(service.count_cloud_vendors().unwrap(), 3);

    let amazon = service.get_by_vendor_name(" Amazon ").unwrap();
    let ids: Vec<_> = amazon.iter().map(|v| v.vendor_id.as_str()).collect();
    assert_eq!(ids, ["C1", "C2"]);
}

#[test]
fn list_cloud_vendors_pages_are_consistent_with_full_listing() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = service_for(&conn);
    for index in 0..7 {
        service
            .create_cloud_vendor(&CloudVendor::new(format!("V{index:02}"), "Vendor"))
            .unwrap();
    }

    let all = service.get_all_cloud_vendors().unwrap();
    let mut paged = Vec::new();
    let mut offset = 0;
    loop {
        let page = service
            .list_cloud_vendors(&VendorListQuery {
                limit: Some(3),
                offset,
            })
            .unwrap();
        if page.is_empty() {
            break;
        }
        offset += page.len() as u32;
        paged.extend(page);
    }
    assert_eq!(paged, all);

    let default_page = service
        .list_cloud_vendors(&VendorListQuery::default())
        .unwrap();
    assert_eq!(default_page.len(), 7);
}

#[test]
fn padded_vendor_name_is_rejected_so_name_lookup_stays_exact() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let service = service_for(&conn);

    let err = service
        .create_cloud_vendor(&CloudVendor::new("C1", "Amazon "))
        .expect_err("padded name must be rejected");
    assert!(matches!(
        err,
        VendorServiceError::Validation(VendorValidationError::NameHasSurroundingWhitespace)
    ));
    assert_eq!(service.count_cloud_vendors().expect("count should succeed"), 0);

    service
        .create_cloud_vendor(&CloudVendor::new("C1", "Amazon"))
        .expect("trimmed name should be accepted");
    let stored = service
        .require_cloud_vendor("C1")
        .expect("vendor should exist");
    let hits = service
        .get_by_vendor_name(&stored.vendor_name)
        .expect("name lookup should succeed");
    assert_eq!(hits, vec![stored]);

    let padded_update = service
        .update_cloud_vendor(&CloudVendor::new("C1", " Amazon"))
        .expect_err("padded name must be rejected on update");
    assert_eq!(padded_update.code(), "validation_failed");
}
