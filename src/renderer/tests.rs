// src/renderer/tests.rs

#[cfg(test)]
mod render_tests {
    use crate::color::BinaryColor;
    use crate::config::FontFailurePolicy;
    use crate::error::RasterError;
    use crate::framebuffer::Framebuffer;
    use crate::rasterizer::curves::Segment;
    use crate::rasterizer::{FontManager, FontProvider, FontSpec, GlyphSource, HeadlessFontDriver};
    use crate::renderer::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicI32, Ordering};
    use test_log::test; // For logging within tests

    // --- Stub provider reporting a fixed width for "A" ---
    struct FixedWidth(f32);

    impl GlyphSource for FixedWidth {
        fn advance(&self, ch: char) -> Option<f32> {
            (ch == 'A').then_some(self.0)
        }

        fn outline(&self, _ch: char) -> Option<Vec<Segment>> {
            None
        }
    }

    struct StubProvider {
        width: f32,
        last_size: AtomicI32,
    }

    impl StubProvider {
        fn new(width: f32) -> Self {
            Self {
                width,
                last_size: AtomicI32::new(0),
            }
        }
    }

    impl FontProvider for StubProvider {
        fn sized(&self, point_size: i32) -> Result<Box<dyn GlyphSource>, RasterError> {
            self.last_size.store(point_size, Ordering::SeqCst);
            Ok(Box::new(FixedWidth(self.width)))
        }
    }

    fn headless(driver: HeadlessFontDriver) -> FontManager<HeadlessFontDriver> {
        FontManager::new(
            driver,
            FontSpec {
                path: PathBuf::from("./font/segoe-ui-emoji.ttf"),
                face_index: 0,
            },
            FontFailurePolicy::Fatal,
        )
    }

    fn renderer() -> GlyphRenderer {
        GlyphRenderer::new(128, 64).unwrap()
    }

    #[test]
    fn placement_centers_forty_pixels_on_128() {
        let placement = renderer().place(40, 10).unwrap();
        assert_eq!(placement.origin_x, 44);
        assert_eq!(placement.origin_y, 54);
    }

    #[test]
    fn placement_uses_floor_division() {
        let r = renderer();
        assert_eq!(r.place(41, 0).unwrap().origin_x, 43);
        // Wider than the canvas: negative origin, not an error.
        assert_eq!(r.place(131, 0).unwrap().origin_x, -2);
        assert_eq!(r.place(300, 0).unwrap().origin_x, -86);
        assert_eq!(r.place(0, 0).unwrap().origin_x, 64);
    }

    #[test]
    fn placement_allows_baseline_outside_raster() {
        let r = renderer();
        assert_eq!(r.place(10, -20).unwrap().origin_y, 84);
        assert_eq!(r.place(10, 100).unwrap().origin_y, -36);
    }

    #[test]
    fn placement_rejects_unrepresentable_offset() {
        let err = renderer().place(10, i32::MIN).unwrap_err();
        assert!(matches!(err, RasterError::InvalidArgument(_)));
    }

    #[test]
    fn new_rejects_bad_dimensions() {
        assert!(matches!(
            GlyphRenderer::new(0, 64),
            Err(RasterError::InvalidDimension { width: 0, height: 64 })
        ));
    }

    #[test]
    fn stub_measurement_drives_origin() {
        let provider = StubProvider::new(40.0);
        let fb = renderer()
            .render(
                &GlyphRequest {
                    text: "A",
                    point_size: 20,
                    baseline_offset: 10,
                },
                &provider,
            )
            .unwrap();
        assert_eq!(provider.last_size.load(Ordering::SeqCst), 20);
        // The stub has no outlines, so nothing is drawn.
        assert_eq!(fb, Framebuffer::new(128, 64).unwrap());
    }

    #[test]
    fn headless_glyph_lands_centered() {
        // Two-em advance: "A" at 20 px measures 40 px.
        let fonts = headless(HeadlessFontDriver::new().with_advance(2000));
        let fb = renderer()
            .render(
                &GlyphRequest {
                    text: "A",
                    point_size: 20,
                    baseline_offset: 10,
                },
                &fonts,
            )
            .unwrap();

        // Box spans 2..38 px from the origin at x = 44, 14 px above y = 54.
        assert_eq!(fb.count_on(), 36 * 14);
        assert_eq!(fb.get_pixel(46, 53), BinaryColor::On);
        assert_eq!(fb.get_pixel(81, 40), BinaryColor::On);
        assert_eq!(fb.get_pixel(45, 53), BinaryColor::Off);
        assert_eq!(fb.get_pixel(82, 53), BinaryColor::Off);
        assert_eq!(fb.get_pixel(60, 54), BinaryColor::Off);
        assert_eq!(fb.get_pixel(60, 39), BinaryColor::Off);
    }

    #[test]
    fn empty_text_is_blank_and_skips_font() {
        let fonts = headless(HeadlessFontDriver::unavailable());
        let fb = renderer()
            .render(
                &GlyphRequest {
                    text: "",
                    point_size: 20,
                    baseline_offset: 10,
                },
                &fonts,
            )
            .unwrap();
        assert_eq!(fb, Framebuffer::new(128, 64).unwrap());
        assert_eq!(fonts.driver().load_count(), 0);
    }

    #[test]
    fn non_positive_point_size_is_invalid() {
        let fonts = headless(HeadlessFontDriver::new());
        for point_size in [0, -12] {
            let err = renderer()
                .render(
                    &GlyphRequest {
                        text: "A",
                        point_size,
                        baseline_offset: 10,
                    },
                    &fonts,
                )
                .unwrap_err();
            assert!(matches!(err, RasterError::InvalidArgument(_)));
        }
    }

    #[test]
    fn missing_font_asset_is_reported() {
        let fonts = headless(HeadlessFontDriver::unavailable());
        let err = renderer()
            .render(
                &GlyphRequest {
                    text: "A",
                    point_size: 20,
                    baseline_offset: 10,
                },
                &fonts,
            )
            .unwrap_err();
        match err {
            RasterError::FontUnavailable(message) => {
                assert!(message.contains("segoe-ui-emoji.ttf"))
            }
            other => panic!("expected FontUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn uncovered_text_renders_blank() {
        let fonts = headless(HeadlessFontDriver::new().with_missing(['\u{1F4A9}']));
        let fb = renderer()
            .render(
                &GlyphRequest {
                    text: "\u{1F4A9}",
                    point_size: 64,
                    baseline_offset: 10,
                },
                &fonts,
            )
            .unwrap();
        assert_eq!(fb.count_on(), 0);
    }

    #[test]
    fn oversized_text_is_clipped_not_rejected() {
        let fonts = headless(HeadlessFontDriver::new());
        let fb = renderer()
            .render(
                &GlyphRequest {
                    text: "WWWWWW",
                    point_size: 64,
                    baseline_offset: 0,
                },
                &fonts,
            )
            .unwrap();
        assert!(fb.count_on() > 0);
    }
}
