use crate::foundation::core::PremulImage;
use crate::foundation::error::{HabitError, HabitResult};

const KERNEL_SIGMAS: u32 = 3;

/// Gaussian blur whose standard deviation is `radius` pixels.
///
/// The kernel is truncated at `3 * radius`. A radius of 0 returns a copy of the input.
pub fn gaussian_blur(src: &PremulImage, radius: u32) -> HabitResult<PremulImage> {
    let half_width = radius.saturating_mul(KERNEL_SIGMAS);
    let data = blur_rgba8_premul(&src.data, src.width, src.height, half_width, radius as f32)?;
    PremulImage::new(src.width, src.height, data)
}

/// Separable blur with an explicit kernel half-width (`radius`) and standard deviation.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> HabitResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| HabitError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(HabitError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    convolve(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    convolve(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> HabitResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(HabitError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(HabitError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push the rounding residue into the center tap so the kernel sums to exactly 1.0.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn convolve(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let (w, h) = (width as usize, height as usize);
    // (pixels per line, pixel step along a line, line count, step between lines)
    let (len, step, lines, line_step) = match axis {
        Axis::Horizontal => (w, 1, h, w),
        Axis::Vertical => (h, w, w, 1),
    };
    let radius = (k.len() / 2) as isize;
    let last = len as isize - 1;

    for line in 0..lines {
        let base = line * line_step;
        for i in 0..len {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let j = (i as isize + ki as isize - radius).clamp(0, last) as usize;
                let idx = (base + j * step) * 4;
                for (a, &v) in acc.iter_mut().zip(&src[idx..idx + 4]) {
                    *a += u64::from(kw) * u64::from(v);
                }
            }
            let out = (base + i * step) * 4;
            for (d, a) in dst[out..out + 4].iter_mut().zip(acc) {
                *d = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
