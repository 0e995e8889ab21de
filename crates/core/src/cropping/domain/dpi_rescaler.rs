/// Scales DPI per axis by the ratio of new to original size.
///
/// `original_size` components must be non-zero.
pub fn calculate_new_dpi(
    original_dpi: (f64, f64),
    original_size: (u32, u32),
    new_size: (u32, u32),
) -> (f64, f64) {
    let (original_width, original_height) = original_size;
    let (new_width, new_height) = new_size;

    (
        new_width as f64 / original_width as f64 * original_dpi.0,
        new_height as f64 / original_height as f64 * original_dpi.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::default_dpi((72.0, 72.0), (640, 480))]
    #[case::print_dpi((300.0, 300.0), (4032, 3024))]
    #[case::anisotropic((96.0, 120.0), (1, 1))]
    fn test_unchanged_size_keeps_dpi(#[case] dpi: (f64, f64), #[case] size: (u32, u32)) {
        let (x, y) = calculate_new_dpi(dpi, size, size);
        assert_relative_eq!(x, dpi.0, epsilon = 1e-9);
        assert_relative_eq!(y, dpi.1, epsilon = 1e-9);
    }

    #[test]
    fn test_axes_scale_independently() {
        let (x, y) = calculate_new_dpi((300.0, 200.0), (400, 400), (100, 200));
        assert_relative_eq!(x, 75.0);
        assert_relative_eq!(y, 100.0);
    }

    #[test]
    fn test_passport_crop_of_400px_image() {
        let (x, y) = calculate_new_dpi((72.0, 72.0), (400, 400), (155, 200));
        assert_relative_eq!(x, 27.9, epsilon = 1e-9);
        assert_relative_eq!(y, 36.0);
    }
}
