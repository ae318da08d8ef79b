use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{IndicatorError, Result};

pub const HUNDRED: Decimal = dec!(100);

/// Returns the `length` points that end `offset` points before the newest
/// one. The caller's sequence is only borrowed.
pub fn resize(data: &[Decimal], length: usize, offset: usize) -> Result<&[Decimal]> {
    let required = length.saturating_add(offset);
    if data.len() < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available: data.len(),
        });
    }

    let end = data.len() - offset;
    Ok(&data[end - length..end])
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(data: &[Decimal]) -> Decimal {
    if data.is_empty() {
        return Decimal::ZERO;
    }
    data.iter().sum::<Decimal>() / Decimal::from(data.len())
}

/// Mean absolute deviation around the arithmetic mean.
pub fn mean_deviation(data: &[Decimal]) -> Decimal {
    if data.is_empty() {
        return Decimal::ZERO;
    }
    let avg = mean(data);
    data.iter().map(|v| (*v - avg).abs()).sum::<Decimal>() / Decimal::from(data.len())
}

/// Population standard deviation.
pub fn std_dev(data: &[Decimal]) -> Decimal {
    if data.len() < 2 {
        return Decimal::ZERO;
    }
    let avg = mean(data);
    let variance = data
        .iter()
        .map(|v| {
            let diff = *v - avg;
            diff * diff
        })
        .sum::<Decimal>()
        / Decimal::from(data.len());

    decimal_sqrt(variance)
}

/// Newton's method square root for Decimal.
pub fn decimal_sqrt(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let mut guess = if value > Decimal::ONE {
        value / Decimal::TWO
    } else {
        Decimal::ONE
    };
    let epsilon = Decimal::new(1, 20);
    for _ in 0..200 {
        let next_guess = (guess + value / guess) / Decimal::TWO;
        let diff = (next_guess - guess).abs();
        guess = next_guess;
        if diff < epsilon {
            break;
        }
    }
    guess
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resize_trailing_window() {
        let data = [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
        assert_eq!(resize(&data, 3, 0).unwrap(), &[dec!(3), dec!(4), dec!(5)]);
        assert_eq!(resize(&data, 2, 2).unwrap(), &[dec!(2), dec!(3)]);
        assert_eq!(resize(&data, 5, 0).unwrap(), &data[..]);
        // the caller's slice is untouched
        assert_eq!(data.len(), 5);
    }

    #[test]
    fn test_resize_insufficient_data() {
        let data = [dec!(1), dec!(2)];
        let err = resize(&data, 2, 1).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::InsufficientData { required: 3, available: 2 }
        ));
    }

    #[test]
    fn test_resize_saturates_huge_requirements() {
        let data = [dec!(1)];
        let err = resize(&data, usize::MAX, 1).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::InsufficientData { required: usize::MAX, available: 1 }
        ));
    }

    #[test]
    fn test_mean_and_deviation() {
        let data = [dec!(3), dec!(6), dec!(9)];
        assert_eq!(mean(&data), dec!(6));
        assert_eq!(mean_deviation(&data), dec!(2));
        assert_eq!(mean(&[]), Decimal::ZERO);
        assert_eq!(mean_deviation(&[dec!(4)]), Decimal::ZERO);
    }

    #[test]
    fn test_std_dev_population() {
        let data = [dec!(30), dec!(35), dec!(40), dec!(38), dec!(32)];
        let sd = std_dev(&data);
        // variance = 68 / 5 = 13.6
        assert!((sd * sd - dec!(13.6)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_decimal_sqrt() {
        let result = decimal_sqrt(dec!(4));
        assert!((result - dec!(2)).abs() < dec!(0.0001));

        let result = decimal_sqrt(dec!(9));
        assert!((result - dec!(3)).abs() < dec!(0.0001));

        let result = decimal_sqrt(dec!(0.25));
        assert!((result - dec!(0.5)).abs() < dec!(0.0001));

        assert_eq!(decimal_sqrt(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(decimal_sqrt(dec!(-1)), Decimal::ZERO);
    }
}
