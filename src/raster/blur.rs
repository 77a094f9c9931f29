use crate::foundation::error::{FilmError, FilmResult};
use crate::raster::buffer::RasterBuffer;

/// Gaussian blur capability.
///
/// `radius` is the standard deviation of the Gaussian, in pixels. A radius of zero is the
/// identity; negative or non-finite radii are rejected.
pub trait BlurOperator {
    /// Blur every channel of `buf` independently and return the result.
    fn gaussian_blur(&self, buf: &RasterBuffer, radius: f64) -> FilmResult<RasterBuffer>;
}

/// Separable CPU Gaussian blur with clamp-to-edge sampling.
///
/// Radii up to [`BOX_SIGMA_THRESHOLD`] use an exact Q16 fixed-point kernel. Wider blurs run
/// three running-sum box passes per axis instead, so their cost no longer grows with the radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaussianBlur;

impl BlurOperator for GaussianBlur {
    fn gaussian_blur(&self, buf: &RasterBuffer, radius: f64) -> FilmResult<RasterBuffer> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(FilmError::invalid_argument(format!(
                "blur radius must be finite and >= 0, got {radius}"
            )));
        }
        if radius == 0.0 {
            return Ok(buf.clone());
        }

        if radius > BOX_SIGMA_THRESHOLD {
            box_blur(buf, radius)
        } else {
            kernel_blur(buf, radius)
        }
    }
}

/// Largest sigma blurred with the exact kernel.
pub const BOX_SIGMA_THRESHOLD: f64 = 8.0;

pub(crate) fn kernel_blur(buf: &RasterBuffer, sigma: f64) -> FilmResult<RasterBuffer> {
    let kernel = gaussian_kernel_q16(sigma)?;
    let (w, h) = (buf.width(), buf.height());
    let ch = buf.channels();
    let mut tmp = vec![0u8; buf.data().len()];
    let mut out = vec![0u8; buf.data().len()];

    horizontal_pass(buf.data(), &mut tmp, w, h, ch, &kernel);
    vertical_pass(&tmp, &mut out, w, h, ch, &kernel);
    RasterBuffer::from_raw(w, h, buf.layout(), out)
}

/// Three successive box blurs whose combined variance approximates `sigma^2`.
pub(crate) fn box_blur(buf: &RasterBuffer, sigma: f64) -> FilmResult<RasterBuffer> {
    let widths = box_widths(sigma)?;
    let (w, h) = (buf.width() as usize, buf.height() as usize);
    let ch = buf.channels();
    let mut cur = buf.data().to_vec();
    let mut next = vec![0u8; cur.len()];

    for &bw in &widths {
        for y in 0..h {
            let row = y * w * ch;
            box_line(&cur, &mut next, row, ch, w, ch, bw);
        }
        std::mem::swap(&mut cur, &mut next);
    }
    for &bw in &widths {
        for x in 0..w {
            box_line(&cur, &mut next, x * ch, w * ch, h, ch, bw);
        }
        std::mem::swap(&mut cur, &mut next);
    }
    RasterBuffer::from_raw(buf.width(), buf.height(), buf.layout(), cur)
}

/// Odd box widths for a three-pass Gaussian approximation.
///
/// The first `m` passes use width `wl` and the rest `wl + 2`, with `m` chosen so the summed
/// variance `(w^2 - 1) / 12` of the passes lands as close to `sigma^2` as possible.
pub(crate) fn box_widths(sigma: f64) -> FilmResult<[usize; 3]> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilmError::invalid_argument("blur sigma must be > 0"));
    }
    let n = 3.0;
    let var12 = 12.0 * sigma * sigma;
    let mut wl = (var12 / n + 1.0).sqrt().floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wlf = wl as f64;
    let m = ((var12 - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0)).round();
    let m = m as i64;

    let mut widths = [0usize; 3];
    for (i, slot) in widths.iter_mut().enumerate() {
        *slot = if (i as i64) < m { wl as usize } else { wl as usize + 2 };
    }
    Ok(widths)
}

/// Box-filter one line of `len` pixels starting at `start`, `stride` bytes apart.
fn box_line(
    src: &[u8],
    dst: &mut [u8],
    start: usize,
    stride: usize,
    len: usize,
    ch: usize,
    width: usize,
) {
    let r = (width / 2) as i64;
    let last = len as i64 - 1;
    let at = |i: i64, c: usize| u32::from(src[start + (i.clamp(0, last) as usize) * stride + c]);
    let div = width as u32;

    for c in 0..ch {
        let mut sum: u32 = (-r..=r).map(|i| at(i, c)).sum();
        for x in 0..len {
            dst[start + x * stride + c] = ((sum + div / 2) / div).min(255) as u8;
            let xi = x as i64;
            sum = sum + at(xi + r + 1, c) - at(xi - r, c);
        }
    }
}

/// Weights for taps `-r..=r` with `r = ceil(3 * sigma)`, summing to exactly `1 << 16`.
pub(crate) fn gaussian_kernel_q16(sigma: f64) -> FilmResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilmError::invalid_argument("blur sigma must be > 0"));
    }

    let r = ((3.0 * sigma).ceil() as i64).max(1);
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(FilmError::invalid_argument("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, ch: usize, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let mut acc = [0u64; 4];
    for y in 0..i64::from(height) {
        for x in 0..w {
            acc[..ch].fill(0);
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i64 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * ch;
                for c in 0..ch {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * ch;
            for c in 0..ch {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, ch: usize, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let h = i64::from(height);
    let mut acc = [0u64; 4];
    for y in 0..h {
        for x in 0..w {
            acc[..ch].fill(0);
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * ch;
                for c in 0..ch {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * ch;
            for c in 0..ch {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
