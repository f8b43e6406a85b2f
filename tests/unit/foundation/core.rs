use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(1, 1).is_ok());
}

#[test]
fn centered_origin_rounds_down() {
    let canvas = Canvas::new(3840, 2160).unwrap();
    let p = canvas.centered_origin(2097, 505);
    assert_eq!(p, Point::new(871.0, 827.0));

    let tiny = Canvas::new(10, 10).unwrap();
    assert_eq!(tiny.centered_origin(13, 10), Point::new(-2.0, 0.0));
}

#[test]
fn premul_from_straight_scales_color_channels() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c, Rgba8Premul { r: 128, g: 64, b: 0, a: 128 });
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 255).to_array(),
        [10, 20, 30, 255]
    );
}

#[test]
fn premul_image_checks_buffer_length() {
    assert!(PremulImage::new(2, 2, vec![0; 16]).is_ok());
    assert!(PremulImage::new(2, 2, vec![0; 15]).is_err());
}

#[test]
fn filled_image_reports_pixels() {
    let img = PremulImage::filled(3, 2, Rgba8Premul::from_straight_rgba(1, 2, 3, 255)).unwrap();
    assert_eq!(img.pixel(2, 1), Some([1, 2, 3, 255]));
    assert_eq!(img.pixel(3, 0), None);
    assert!(!img.is_empty());
    assert!(PremulImage::transparent(0, 5).unwrap().is_empty());
}
