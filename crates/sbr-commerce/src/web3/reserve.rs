//! Reserve dashboard figures.

use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};
use crate::web3::{group_thousands, hundredths_label};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveStats {
    pub total_reserve: Money,
    /// Month-over-month reserve change, basis points.
    pub reserve_change_bps: i64,
    pub liters_per_btc: u32,
    pub participants: u32,
    /// Growth over the last 30 days, basis points.
    pub growth_bps: i64,
    pub total_value: Money,
    pub average_holding: Money,
    /// Water units per BTC unit in the reserve ratio, hundredths.
    pub water_ratio: i64,
}

impl ReserveStats {
    pub fn demo() -> Self {
        Self {
            total_reserve: Money::new(284_732_000_000, Currency::BTC),
            reserve_change_bps: 1250,
            liters_per_btc: 1250,
            participants: 1247,
            growth_bps: 1820,
            total_value: Money::from_major(185_075_800, Currency::USD),
            average_holding: Money::new(228_000_000, Currency::BTC),
            water_ratio: 125,
        }
    }

    /// Labelled, display-formatted figures in dashboard order.
    pub fn figures(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Total Reserve",
                format!("{} BTC", group_thousands(&self.total_reserve.display_trimmed())),
            ),
            ("Monthly Change", format!("+{}%", hundredths_label(self.reserve_change_bps))),
            (
                "Water Backing",
                format!("{} L per BTC", group_thousands(&self.liters_per_btc.to_string())),
            ),
            ("Participants", group_thousands(&self.participants.to_string())),
            ("Reserve Growth", format!("+{}%", hundredths_label(self.growth_bps))),
            (
                "Total Value",
                format!("${}", group_thousands(&self.total_value.display_trimmed())),
            ),
            (
                "Average Holding",
                format!("{} BTC", self.average_holding.display_trimmed()),
            ),
            ("Reserve Ratio", format!("1:{}", hundredths_label(self.water_ratio))),
        ]
    }
}

impl Default for ReserveStats {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_figures() {
        let figures = ReserveStats::demo().figures();
        let get = |label: &str| {
            figures
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("Total Reserve"), "2,847.32 BTC");
        assert_eq!(get("Water Backing"), "1,250 L per BTC");
        assert_eq!(get("Participants"), "1,247");
        assert_eq!(get("Reserve Growth"), "+18.2%");
        assert_eq!(get("Total Value"), "$185,075,800");
        assert_eq!(get("Average Holding"), "2.28 BTC");
        assert_eq!(get("Reserve Ratio"), "1:1.25");
    }
}
