//! Hand-written kernels for primitives whose OpenCV semantics the `image` and
//! `imageproc` crates do not offer directly
//!
//! All routines work on interleaved 8-bit buffers with an explicit channel
//! count, one line at a time, so the same code serves color and grayscale.

use crate::ops::{Contour, StructuringElement};
use image::{ImageBuffer, Pixel};

/// Out-of-range sample policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Border {
    /// `aaa|abcd|ddd`
    Replicate,
    /// `dcb|abcd|cba`
    Reflect101,
}

impl Border {
    fn index(self, i: i64, len: usize) -> usize {
        let len = len as i64;
        if len <= 1 {
            return 0;
        }
        match self {
            Self::Replicate => i.clamp(0, len - 1) as usize,
            Self::Reflect101 => {
                let mut i = i;
                loop {
                    if i < 0 {
                        i = -i;
                    } else if i >= len {
                        i = 2 * len - 2 - i;
                    } else {
                        return i as usize;
                    }
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Geometry of an interleaved buffer
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) channels: usize,
}

impl Layout {
    pub(crate) fn of<P: Pixel<Subpixel = u8>>(image: &ImageBuffer<P, Vec<u8>>) -> Self {
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            channels: usize::from(P::CHANNEL_COUNT),
        }
    }

    fn index(self, axis: Axis, line: usize, i: usize, channel: usize) -> usize {
        match axis {
            Axis::Horizontal => (line * self.width + i) * self.channels + channel,
            Axis::Vertical => (i * self.width + line) * self.channels + channel,
        }
    }
}

/// Apply a 1-D transform to every row or column of every channel
fn map_lines<T, U, F>(data: &[T], layout: Layout, axis: Axis, mut f: F) -> Vec<U>
where
    T: Copy,
    U: Copy + Default,
    F: FnMut(&[T], &mut Vec<U>),
{
    let mut out = vec![U::default(); data.len()];
    let (lines, len) = match axis {
        Axis::Horizontal => (layout.height, layout.width),
        Axis::Vertical => (layout.width, layout.height),
    };

    let mut line = Vec::with_capacity(len);
    let mut result = Vec::with_capacity(len);
    for l in 0..lines {
        for c in 0..layout.channels {
            line.clear();
            line.extend((0..len).map(|i| data[layout.index(axis, l, i, c)]));
            result.clear();
            f(&line, &mut result);
            for (i, value) in result.iter().enumerate() {
                out[layout.index(axis, l, i, c)] = *value;
            }
        }
    }
    out
}

/// Rebuild an image from a buffer produced for the same layout
pub(crate) fn rebuild<P: Pixel<Subpixel = u8>>(
    width: u32,
    height: u32,
    data: Vec<u8>,
) -> ImageBuffer<P, Vec<u8>> {
    ImageBuffer::from_raw(width, height, data).expect("filter output matches input layout")
}

fn convolve_line<T: Copy + Into<f32>>(line: &[T], kernel: &[f32], border: Border, out: &mut Vec<f32>) {
    let anchor = (kernel.len() / 2) as i64;
    for x in 0..line.len() as i64 {
        let mut acc = 0.0f32;
        for (k, weight) in kernel.iter().enumerate() {
            let sx = border.index(x + k as i64 - anchor, line.len());
            acc += *weight * line[sx].into();
        }
        out.push(acc);
    }
}

/// Separable convolution with the same kernel along both axes
///
/// Accumulates in `f32` across both passes and rounds once at the end.
pub(crate) fn convolve_separable(
    data: &[u8],
    layout: Layout,
    kernel: &[f32],
    border: Border,
) -> Vec<u8> {
    let horizontal = map_lines(data, layout, Axis::Horizontal, |line, out| {
        convolve_line(line, kernel, border, out);
    });
    let vertical = map_lines(&horizontal, layout, Axis::Vertical, |line, out| {
        convolve_line(line, kernel, border, out);
    });
    vertical
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Normalized 1-D box kernel
pub(crate) fn box_kernel(ksize: u32) -> Vec<f32> {
    let ksize = ksize.max(1);
    vec![1.0 / ksize as f32; ksize as usize]
}

/// Sigma used when the caller asks for it to be derived from the kernel size
pub(crate) fn gaussian_sigma_for(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian kernel of odd length `ksize`
pub(crate) fn gaussian_kernel_1d(ksize: u32, sigma: f32) -> Vec<f32> {
    let ksize = ksize.max(1) | 1;
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        gaussian_sigma_for(ksize)
    };
    let center = (ksize / 2) as i64;
    let sigma2 = sigma * sigma;

    let mut kernel: Vec<f32> = (0..i64::from(ksize))
        .map(|i| {
            let x = (i - center) as f32;
            (-(x * x) / (2.0 * sigma2)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    if sum != 0.0 {
        for v in &mut kernel {
            *v /= sum;
        }
    }
    kernel
}

/// Adaptive mean threshold on a single-channel buffer
///
/// A pixel is set when it exceeds the rounded mean of its `block_size`
/// neighbourhood minus `constant`.
pub(crate) fn adaptive_mean_threshold(
    data: &[u8],
    layout: Layout,
    max_value: u8,
    block_size: u32,
    constant: i32,
) -> Vec<u8> {
    let means = convolve_separable(data, layout, &box_kernel(block_size), Border::Replicate);
    data.iter()
        .zip(means)
        .map(|(src, mean)| {
            if i32::from(*src) - i32::from(mean) > -constant {
                max_value
            } else {
                0
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MorphOp {
    Dilate,
    Erode,
}

impl MorphOp {
    fn identity(self) -> u8 {
        match self {
            Self::Dilate => u8::MIN,
            Self::Erode => u8::MAX,
        }
    }

    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Self::Dilate => a.max(b),
            Self::Erode => a.min(b),
        }
    }
}

fn morph_line(line: &[u8], half: i64, op: MorphOp, out: &mut Vec<u8>) {
    let len = line.len() as i64;
    for x in 0..len {
        let lo = (x - half).max(0);
        let hi = (x + half).min(len - 1);
        let value = (lo..=hi).fold(op.identity(), |acc, i| op.pick(acc, line[i as usize]));
        out.push(value);
    }
}

/// Per-channel dilation or erosion with a rectangular element, as a row
/// pass followed by a column pass; samples outside the image are ignored
pub(crate) fn morphology(
    data: &[u8],
    layout: Layout,
    element: StructuringElement,
    op: MorphOp,
) -> Vec<u8> {
    let half_x = i64::from(element.width() / 2);
    let half_y = i64::from(element.height() / 2);
    let rows = map_lines(data, layout, Axis::Horizontal, |line, out| {
        morph_line(line, half_x, op, out);
    });
    map_lines(&rows, layout, Axis::Vertical, |line, out| {
        morph_line(line, half_y, op, out);
    })
}

/// BT.601 luma of an interleaved RGB buffer, 14-bit fixed point with rounding
pub(crate) fn luma_bt601(rgb: &[u8]) -> Vec<u8> {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;
    rgb.chunks_exact(3)
        .map(|px| {
            let y = R * u32::from(px[0]) + G * u32::from(px[1]) + B * u32::from(px[2]);
            ((y + (1 << (SHIFT - 1))) >> SHIFT) as u8
        })
        .collect()
}

/// One line of the stack blur: triangle-weighted mean of radius `radius`,
/// maintained incrementally with an outgoing and an incoming running sum
fn stack_blur_line(line: &[u8], radius: usize, out: &mut Vec<u8>) {
    let len = line.len() as i64;
    let r = radius as i64;
    let at = |i: i64| u64::from(line[i.clamp(0, len - 1) as usize]);
    let div = (radius as u64 + 1).pow(2);

    let mut sum: u64 = (-r..=r).map(|k| (r + 1 - k.abs()) as u64 * at(k)).sum();
    let mut sum_out: u64 = (-r..=0).map(at).sum();
    let mut sum_in: u64 = (1..=r + 1).map(at).sum();

    for x in 0..len {
        out.push(((sum + div / 2) / div) as u8);
        sum = sum + sum_in - sum_out;
        sum_out = sum_out + at(x + 1) - at(x - r);
        sum_in = sum_in + at(x + r + 2) - at(x + 1);
    }
}

/// Radius cap; larger requests are clamped so the 64-bit running sums
/// cannot overflow
pub(crate) const MAX_STACK_BLUR_RADIUS: u32 = u16::MAX as u32;

/// Stack blur with edge replication, horizontal pass then vertical pass
pub(crate) fn stack_blur(data: &[u8], layout: Layout, radius: u32) -> Vec<u8> {
    if radius == 0 || data.is_empty() {
        return data.to_vec();
    }
    let radius = radius.min(MAX_STACK_BLUR_RADIUS) as usize;
    let rows = map_lines(data, layout, Axis::Horizontal, |line, out| {
        stack_blur_line(line, radius, out);
    });
    map_lines(&rows, layout, Axis::Vertical, |line, out| {
        stack_blur_line(line, radius, out);
    })
}

/// Collapse straight runs of a closed contour to their end points
pub(crate) fn approximate_simple(points: &[(i32, i32)]) -> Contour {
    let mut deduped: Vec<(i32, i32)> = Vec::with_capacity(points.len());
    for &p in points {
        if deduped.last() != Some(&p) {
            deduped.push(p);
        }
    }
    while deduped.len() > 1 && deduped.first() == deduped.last() {
        deduped.pop();
    }

    let n = deduped.len();
    if n <= 2 {
        return Contour { points: deduped };
    }

    let step = |a: (i32, i32), b: (i32, i32)| ((b.0 - a.0).signum(), (b.1 - a.1).signum());
    let kept = (0..n)
        .filter(|&i| {
            let prev = deduped[(i + n - 1) % n];
            let cur = deduped[i];
            let next = deduped[(i + 1) % n];
            step(prev, cur) != step(cur, next)
        })
        .map(|i| deduped[i])
        .collect();

    Contour { points: kept }
}
