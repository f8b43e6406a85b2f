use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 13);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    assert!(blur_rgba8_premul(&[0u8; 7], 1, 2, 1, 1.0).is_err());
}

#[test]
fn kernel_sums_to_one_in_q16() {
    for radius in [1u32, 5, 20] {
        let k = gaussian_kernel_q16(radius, radius as f32 / 2.0).unwrap();
        assert_eq!(k.len(), (2 * radius + 1) as usize);
        assert_eq!(k.iter().sum::<u32>(), 65536);
        assert!(k[radius as usize] >= k[0]);
    }
}

#[test]
fn gaussian_blur_radius_is_the_standard_deviation() {
    // One opaque half-plane starting at x = 60 on a single row; the vertical pass is then a no-op.
    let mut img = PremulImage::transparent(121, 1).unwrap();
    for x in 60..121usize {
        img.data[x * 4..x * 4 + 4].copy_from_slice(&[0, 0, 0, 255]);
    }

    let out = gaussian_blur(&img, 10).unwrap();
    let alpha = |x: u32| out.pixel(x, 0).unwrap()[3];

    // One sigma outside the edge the Gaussian tail holds ~17% of the mass, one sigma inside ~85%.
    assert!((38..=49).contains(&alpha(50)), "alpha(50) = {}", alpha(50));
    assert!((212..=223).contains(&alpha(70)), "alpha(70) = {}", alpha(70));
    // Three sigma out the tail is gone.
    assert!(alpha(25) <= 1);
    assert_eq!(alpha(0), 0);
}

#[test]
fn gaussian_blur_keeps_dimensions_and_softens_edges() {
    let mut img = PremulImage::transparent(9, 9).unwrap();
    for y in 3..6u32 {
        for x in 3..6u32 {
            let idx = ((y * 9 + x) * 4) as usize;
            img.data[idx..idx + 4].copy_from_slice(&[0, 0, 0, 255]);
        }
    }

    let out = gaussian_blur(&img, 2).unwrap();
    assert_eq!((out.width, out.height), (9, 9));
    let inner = out.pixel(4, 4).unwrap()[3];
    let edge = out.pixel(2, 4).unwrap()[3];
    assert!(inner > edge);
    assert!(edge > 0);
}
