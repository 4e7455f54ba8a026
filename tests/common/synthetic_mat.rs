use mat_core::Mat;
use proptest::prelude::*;

/// Checkerboard with `cell`-sized squares; every channel carries the same
/// value, already quantized to the 8-bit grid.
pub fn checkerboard(rows: usize, cols: usize, channels: usize, cell: usize) -> Mat {
    assert!(cell > 0, "cell size must be positive");
    let mut m = Mat::zeros(rows, cols, channels).expect("valid checkerboard shape");
    for y in 0..rows {
        for x in 0..cols {
            let dark = ((x / cell) + (y / cell)) & 1 == 0;
            let v = if dark { 32.0 / 255.0 } else { 220.0 / 255.0 };
            m.pixel_mut(y, x).expect("pixel in range").fill(v);
        }
    }
    m
}

/// Samples on a quarter grid in [-16, 16): sums and products of these with
/// [`scalar_strategy`] values stay exactly representable in `f32`.
pub fn sample_strategy() -> impl Strategy<Value = f32> {
    (-64i32..64).prop_map(|v| v as f32 * 0.25)
}

pub fn scalar_strategy() -> impl Strategy<Value = f32> {
    (-8i32..8).prop_map(|v| v as f32 * 0.5)
}

pub fn shape_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..6, 1usize..6, 1usize..5)
}

pub fn mat_strategy(rows: usize, cols: usize, channels: usize) -> impl Strategy<Value = Mat> {
    proptest::collection::vec(sample_strategy(), rows * cols * channels)
        .prop_map(move |data| Mat::from_vec(rows, cols, channels, data).unwrap())
}

/// Three Mats sharing one random shape.
pub fn mat_triple() -> impl Strategy<Value = (Mat, Mat, Mat)> {
    shape_strategy().prop_flat_map(|(r, c, ch)| {
        (
            mat_strategy(r, c, ch),
            mat_strategy(r, c, ch),
            mat_strategy(r, c, ch),
        )
    })
}
