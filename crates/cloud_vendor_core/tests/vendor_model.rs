use cloud_vendor_core::CloudVendor;
use serde_json::json;

#[test]
fn vendor_serializes_with_camel_case_keys() {
    let vendor = CloudVendor::new("C1", "Amazon")
        .with_address("USA")
        .with_phone_number("123456");

    let value = serde_json::to_value(&vendor).unwrap();
    assert_eq!(
        value,
        json!({
            "vendorId": "C1",
            "vendorName": "Amazon",
            "vendorAddress": "USA",
            "vendorPhoneNumber": "123456",
        })
    );
}

#[test]
fn vendor_deserializes_with_optional_fields_missing() {
    let vendor: CloudVendor =
        serde_json::from_str(r#"{"vendorId":"C2","vendorName":"Azure"}"#).unwrap();

    assert_eq!(vendor, CloudVendor::new("C2", "Azure"));
    assert!(vendor.validate().is_ok());
}

#[test]
fn unknown_snake_case_payload_is_rejected() {
    let result = serde_json::from_str::<CloudVendor>(r#"{"vendor_id":"C2","vendor_name":"x"}"#);
    assert!(result.is_err());
}
