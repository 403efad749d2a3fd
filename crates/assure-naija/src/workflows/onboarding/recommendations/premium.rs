use std::fmt;

use serde::{Serialize, Serializer};

/// Monthly premium bounds in naira.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumRange {
    pub min: u32,
    pub max: u32,
}

impl PremiumRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for PremiumRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "₦{} - ₦{}/month",
            group_thousands(self.min),
            group_thousands(self.max)
        )
    }
}

impl Serialize for PremiumRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub(crate) fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(500), "500");
        assert_eq!(group_thousands(1500), "1,500");
        assert_eq!(group_thousands(25000), "25,000");
        assert_eq!(group_thousands(1_250_000), "1,250,000");
    }

    #[test]
    fn renders_naira_range() {
        assert_eq!(
            PremiumRange::new(500, 2000).to_string(),
            "₦500 - ₦2,000/month"
        );
        assert_eq!(
            serde_json::to_string(&PremiumRange::new(5000, 15000)).expect("serializes"),
            "\"₦5,000 - ₦15,000/month\""
        );
    }
}
