// utils/fees.rs

/// Gross amount used when a request completes without an agreed amount.
pub const DEFAULT_JOB_AMOUNT: i64 = 500;

/// Platform keeps a fixed 10% of the gross amount.
pub const PLATFORM_FEE_RATE: f64 = 0.10;

pub fn platform_fee(amount: i64) -> i64 {
    (amount as f64 * PLATFORM_FEE_RATE).round() as i64
}

pub fn net_amount(amount: i64) -> i64 {
    amount - platform_fee(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_fee() {
        assert_eq!(platform_fee(500), 50);
        assert_eq!(platform_fee(1000), 100);
        assert_eq!(platform_fee(999), 100);
        assert_eq!(platform_fee(0), 0);
    }

    #[test]
    fn test_net_amount() {
        assert_eq!(net_amount(500), 450);
        assert_eq!(net_amount(1000), 900);
    }

    #[test]
    fn test_default_amount_split() {
        let fee = platform_fee(DEFAULT_JOB_AMOUNT);
        assert_eq!(fee, 50);
        assert_eq!(DEFAULT_JOB_AMOUNT - fee, 450);
    }
}
