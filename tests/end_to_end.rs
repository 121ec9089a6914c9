// tests/end_to_end.rs

use monoraster::config::FontFailurePolicy;
use monoraster::rasterizer::{FontManager, FontSpec, HeadlessFontDriver};
use monoraster::{decode, encode, Config, ErrorKind, Framebuffer, RasterService, Response, SINE_WAVE};
use std::path::PathBuf;
use std::sync::Arc;

fn service_with(driver: HeadlessFontDriver) -> RasterService {
    let fonts = FontManager::new(
        driver,
        FontSpec {
            path: PathBuf::from("./font/segoe-ui-emoji.ttf"),
            face_index: 0,
        },
        FontFailurePolicy::Fatal,
    );
    RasterService::with_font_provider(Config::default(), Arc::new(fonts))
}

#[test_log::test]
fn empty_text_encodes_the_blank_panel() {
    let service = service_with(HeadlessFontDriver::unavailable());
    let payload = service.render_text("", 64, 10).unwrap();
    assert_eq!(payload, encode(Framebuffer::new(128, 64).unwrap()));
    assert!(payload.as_str().starts_with("AAAA"));
    let fb = decode(payload.as_str(), 128, 64).unwrap();
    assert_eq!(fb.as_bytes(), &[0u8; 1024][..]);
}

#[test_log::test]
fn text_payload_decodes_to_centered_glyph() {
    let service = service_with(HeadlessFontDriver::new().with_advance(2000));
    let payload = service.render_text("A", 20, 10).unwrap();
    let fb = decode(payload.as_str(), 128, 64).unwrap();
    assert_eq!(fb.count_on(), 36 * 14);
    assert!(fb.get_pixel(46, 53).is_on());
    assert!(fb.get_pixel(81, 40).is_on());
    // Byte 53 * 16 + 46 / 8 holds x = 46 at bit 7 - 6.
    assert_eq!(fb.as_bytes()[53 * 16 + 5] & 0b0000_0010, 0b0000_0010);
}

#[test_log::test]
fn missing_font_gives_error_response_every_time() {
    let service = service_with(HeadlessFontDriver::unavailable());
    for _ in 0..2 {
        let response = Response::from(service.render_text("A", 64, 10));
        match &response {
            Response::Error { kind, message } => {
                assert_eq!(*kind, ErrorKind::FontUnavailable);
                assert!(message.contains("segoe-ui-emoji.ttf"), "{}", message);
            }
            other => panic!("expected error, got {:?}", other),
        }
        let json: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "FontUnavailable");
        assert!(json.get("payload").is_none());
    }
}

#[test_log::test]
fn script_payload_and_failure() {
    let service = service_with(HeadlessFontDriver::new());

    let payload = service.render_script(SINE_WAVE).unwrap();
    let fb = decode(payload.as_str(), 128, 64).unwrap();
    assert_eq!(fb.count_on(), 128);

    let response = Response::from(service.render_script("set_pixel(0, 0); image.setRGB(0, 0, 1);"));
    let json: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["kind"], "ScriptExecutionError");
    assert!(json.get("payload").is_none());
}

#[test_log::test]
fn script_can_draw_text_through_the_service_fonts() {
    let service = service_with(HeadlessFontDriver::new());
    let payload = service
        .render_script(r#"draw_text("A", 0, 12, 10); set_pixel(127, 63);"#)
        .unwrap();
    let fb = decode(payload.as_str(), 128, 64).unwrap();
    assert_eq!(fb.count_on(), 8 * 7 + 1);
}

#[test_log::test]
fn ok_response_round_trips_through_json() {
    let service = service_with(HeadlessFontDriver::new());
    let response = Response::from(service.render_text("AB", 20, 10));
    assert!(response.is_ok());
    let json: serde_json::Value = serde_json::from_str(&response.to_json()).unwrap();
    assert_eq!(json["status"], "ok");
    let payload = json["payload"].as_str().unwrap();
    assert_eq!(payload.len(), 1368);
    assert!(decode(payload, 128, 64).unwrap().count_on() > 0);
}

#[test_log::test]
fn truetype_font_file_renders_through_the_service() {
    let mut config = Config::default();
    config.font.path = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/quad-kern.ttf"));
    let service = RasterService::new(config);

    // "AB" at 20 px measures 24 px, so the pen starts at x = 52 on baseline y = 54.
    let payload = service.render_text("AB", 20, 10).unwrap();
    let fb = decode(payload.as_str(), 128, 64).unwrap();
    assert!(fb.get_pixel(59, 42).is_on());
    assert!(!fb.get_pixel(59, 40).is_on());
    assert!(fb.get_pixel(67, 44).is_on());

    // Mapped to .notdef: nothing to draw, not an error.
    let blank = service.render_text("C", 20, 10).unwrap();
    assert_eq!(decode(blank.as_str(), 128, 64).unwrap().count_on(), 0);
}
