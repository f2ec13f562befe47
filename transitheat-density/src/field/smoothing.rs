//! separable gaussian low-pass filter over a 2D grid.
//!
//! the kernel is sampled at integer offsets in `[-radius, radius]` with
//! `radius = floor(truncate * sigma + 0.5)` and normalized to sum to 1.
//! samples beyond the grid edge are mirrored about the edge, including the
//! edge sample itself (`d c b a | a b c d | d c b a`), which keeps the total
//! mass of the grid unchanged.
use ndarray::{Array2, Axis};

/// normalized 1D gaussian weights, `2 * radius + 1` long
pub fn gaussian_kernel(sigma: f64, truncate: f64) -> Vec<f64> {
    let radius = (truncate * sigma + 0.5).floor() as usize;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-(radius as isize)..=radius as isize)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// smooths `input` with an isotropic gaussian of standard deviation `sigma`
/// cells. a non-positive sigma returns a copy of the input.
pub fn gaussian_filter(input: &Array2<f64>, sigma: f64, truncate: f64) -> Array2<f64> {
    if sigma <= 0.0 {
        return input.clone();
    }
    let kernel = gaussian_kernel(sigma, truncate);
    let rows = convolve_axis(input, &kernel, Axis(0));
    convolve_axis(&rows, &kernel, Axis(1))
}

/// 1D convolution of every lane of `input` that runs along `axis`
fn convolve_axis(input: &Array2<f64>, kernel: &[f64], axis: Axis) -> Array2<f64> {
    let radius = (kernel.len() / 2) as isize;
    let mut output = Array2::<f64>::zeros(input.raw_dim());
    for (src, mut dst) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let n = src.len();
        for (j, out) in dst.iter_mut().enumerate() {
            *out = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let offset = j as isize + k as isize - radius;
                    w * src[reflect_index(offset, n)]
                })
                .sum();
        }
    }
    output
}

/// maps any index onto `[0, n)` by mirroring about the grid edges
fn reflect_index(index: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = index.rem_euclid(period) as usize;
    if m >= n {
        2 * n - 1 - m
    } else {
        m
    }
}
