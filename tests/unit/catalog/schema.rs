use super::*;

fn record_json(device_id: &str) -> serde_json::Value {
    serde_json::json!({
        "credits": "Apple Inc.",
        "color_str": "Natural Titanium",
        "meta_title": "iPhone mockup",
        "meta_description": "Wrap a screenshot in an iPhone frame",
        "display_resolution": [1179.0, 2556.0],
        "device_type": "phone",
        "device_id": device_id,
        "name": "iPhone 15 Pro",
        "orientations": [{
            "alt": "iPhone 15 Pro portrait",
            "name": "portrait",
            "coordinates": [[100.0, 80.0], [1079.0, 80.0], [1079.0, 2476.0], [100.0, 2476.0]],
            "template_image_size": [1280, 2640]
        }],
        "available_perspectives": ["flat"]
    })
}

#[test]
fn deserializes_and_validates_a_record() {
    let device: CatalogDevice = serde_json::from_value(record_json("iphone-15-pro")).unwrap();
    device.validate().unwrap();
    assert_eq!(device.device_id, "iphone-15-pro");
    assert!(!device.is_legacy);
    assert!(device.short_name.is_none());
}

#[test]
fn validate_rejects_empty_id_and_bad_resolution() {
    let mut device: CatalogDevice = serde_json::from_value(record_json("")).unwrap();
    assert!(device.validate().is_err());

    device.device_id = "x".into();
    device.display_resolution = [0.0, 2556.0];
    assert!(device.validate().is_err());

    device.display_resolution = [f64::NAN, 2556.0];
    assert!(device.validate().is_err());
}

#[test]
fn validate_checks_color_hexcode() {
    let mut device: CatalogDevice =
        serde_json::from_value(record_json("iphone-15-pro")).unwrap();
    device.color = Some(CatalogColor {
        id: "black".into(),
        name: "Black".into(),
        hexcode: "#1b1b1f".into(),
    });
    device.validate().unwrap();

    device.color.as_mut().unwrap().hexcode = "1b1b1f".into();
    assert!(device.validate().is_err());
}

#[test]
fn hexcode_pattern() {
    assert!(is_valid_hexcode("#fff"));
    assert!(is_valid_hexcode("#a1B2c3"));
    assert!(!is_valid_hexcode("fff"));
    assert!(!is_valid_hexcode("#ffff"));
    assert!(!is_valid_hexcode("#ggg"));
}

#[test]
fn info_screen_is_first_orientation_bounding_box() {
    let device: CatalogDevice = serde_json::from_value(record_json("iphone-15-pro")).unwrap();
    let info = device.info();
    assert_eq!(info.width, 1179.0);
    assert_eq!(info.height, 2556.0);
    let screen = info.screen.unwrap();
    assert_eq!((screen.x0, screen.y0), (100.0, 80.0));
    assert_eq!((screen.x1, screen.y1), (1079.0, 2476.0));
}

#[test]
fn load_catalog_drops_invalid_records() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let good = record_json("pixel-9");
    let mut bad = record_json("");
    bad["name"] = serde_json::json!("");
    let not_a_record = serde_json::json!({"device_id": "fragment"});

    let json = serde_json::json!([good, bad, not_a_record]).to_string();
    let devices = load_catalog(&json).unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].device_id, "pixel-9");
}

#[test]
fn load_catalog_rejects_non_array() {
    assert!(load_catalog("{}").is_err());
    assert!(load_catalog("not json").is_err());
}
