use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rental tiers offered at every station
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BikeType {
    Basic,
    Premium,
    Electric,
}

impl BikeType {
    pub const ALL: [BikeType; 3] = [BikeType::Basic, BikeType::Premium, BikeType::Electric];

    /// Tag stored on bookings
    pub fn as_str(&self) -> &'static str {
        match self {
            BikeType::Basic => "basic",
            BikeType::Premium => "premium",
            BikeType::Electric => "electric",
        }
    }

    pub fn bike(&self) -> Bike {
        match self {
            BikeType::Basic => Bike {
                bike_type: *self,
                name: "Basic Bike",
                hourly_price: 5.0,
                features: &["Standard comfort", "City riding", "3-speed gear"],
                popular: false,
            },
            BikeType::Premium => Bike {
                bike_type: *self,
                name: "Premium Bike",
                hourly_price: 12.0,
                features: &["Enhanced comfort", "All-terrain", "21-speed gear", "GPS tracking"],
                popular: true,
            },
            BikeType::Electric => Bike {
                bike_type: *self,
                name: "Electric Bike",
                hourly_price: 20.0,
                features: &["Electric assist", "Extended range", "Smart display", "USB charging"],
                popular: false,
            },
        }
    }
}

impl fmt::Display for BikeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BikeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(BikeType::Basic),
            "premium" => Ok(BikeType::Premium),
            "electric" => Ok(BikeType::Electric),
            other => Err(other.to_string()),
        }
    }
}

/// Catalog entry for one tier
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    #[serde(rename = "id")]
    pub bike_type: BikeType,
    pub name: &'static str,
    pub hourly_price: f64,
    pub features: &'static [&'static str],
    pub popular: bool,
}

/// Every tier, in display order
pub fn catalog() -> Vec<Bike> {
    BikeType::ALL.iter().map(BikeType::bike).collect()
}
