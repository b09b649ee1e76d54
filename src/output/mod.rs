// Output formatting — terminal display and report generation.

pub mod markdown;
pub mod terminal;

/// Render a proportional bar of `width` cells for `fraction` (clamped 0..=1).
///
/// `fill` is used for the filled part, spaces for the rest.
pub fn bar(fraction: f64, width: usize, fill: char) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", fill.to_string().repeat(filled), " ".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_proportions() {
        assert_eq!(bar(0.5, 10, '='), "=====     ");
        assert_eq!(bar(1.5, 4, '#'), "####");
        assert_eq!(bar(f64::NAN, 3, '='), "   ");
    }
}
