use super::*;
use crate::foundation::core::Rgba8Premul;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_translucent_black_darkens_opaque_dst() {
    let dst = [200, 200, 200, 255];
    let src = [0, 0, 0, 80];
    let out = over(dst, src);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 137);
}

#[test]
fn paste_over_clips_at_every_edge() {
    let bg = Rgba8Premul::from_straight_rgba(0, 0, 0, 255);
    let fg = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
    let mut dst = PremulImage::filled(4, 4, bg).unwrap();
    let src = PremulImage::filled(3, 3, fg).unwrap();

    paste_over(&mut dst, &src, -2, -2);
    assert_eq!(dst.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 255]));

    paste_over(&mut dst, &src, 3, 3);
    assert_eq!(dst.pixel(3, 3), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(2, 3), Some([0, 0, 0, 255]));

    // Entirely outside: untouched.
    let before = dst.clone();
    paste_over(&mut dst, &src, 10, 0);
    paste_over(&mut dst, &src, 0, -3);
    assert_eq!(dst, before);
}

#[test]
fn paste_over_respects_source_alpha() {
    let bg = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
    let mut dst = PremulImage::filled(2, 1, bg).unwrap();
    let mut src = PremulImage::transparent(2, 1).unwrap();
    src.data[0..4].copy_from_slice(&[0, 0, 0, 255]);

    paste_over(&mut dst, &src, 0, 0);
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 0), Some([255, 255, 255, 255]));
}
