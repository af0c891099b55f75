//! Stable-width rounding shared by every table writer, matching the field
//! widths enumerated in the output contract: adherence 3dp, sleep/stress
//! 1dp, weight 2dp, RHR integer, HRV 1dp, labs 1-2dp.

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_requested_precision() {
        assert_eq!(round1(1.249), 1.2);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round3(0.12345), 0.123);
    }
}
