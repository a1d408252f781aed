use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// Categories of bicycles a customer may bring in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BicycleType {
    #[serde(alias = "fixie")]
    Fixie,
    #[serde(alias = "single_speed", alias = "single-speed")]
    SingleSpeed,
    #[serde(alias = "race")]
    Race,
    #[serde(alias = "gravel")]
    Gravel,
    #[serde(alias = "ebike", alias = "e-bike")]
    Ebike,
}

impl BicycleType {
    pub const ALL: [BicycleType; 5] = [
        BicycleType::Fixie,
        BicycleType::SingleSpeed,
        BicycleType::Race,
        BicycleType::Gravel,
        BicycleType::Ebike,
    ];
}

impl fmt::Display for BicycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BicycleType::Fixie => write!(f, "FIXIE"),
            BicycleType::SingleSpeed => write!(f, "SINGLE_SPEED"),
            BicycleType::Race => write!(f, "RACE"),
            BicycleType::Gravel => write!(f, "GRAVEL"),
            BicycleType::Ebike => write!(f, "EBIKE"),
        }
    }
}

impl FromStr for BicycleType {
    type Err = OrderError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        match normalized.as_str() {
            "FIXIE" => Ok(BicycleType::Fixie),
            "SINGLE_SPEED" | "SINGLESPEED" => Ok(BicycleType::SingleSpeed),
            "RACE" => Ok(BicycleType::Race),
            "GRAVEL" => Ok(BicycleType::Gravel),
            "EBIKE" | "E_BIKE" => Ok(BicycleType::Ebike),
            _ => Err(OrderError::UnknownBicycleType(s.trim().to_string())),
        }
    }
}

/// A repair order. Immutable once built.
///
/// Equality is structural: two orders from the same customer for the same
/// bicycle type compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Order {
    customer: String,
    bicycle_type: BicycleType,
}

impl Order {
    /// Build an order, rejecting an empty or blank customer.
    pub fn new(customer: impl Into<String>, bicycle_type: BicycleType) -> Result<Self, OrderError> {
        let customer = customer.into();
        if customer.trim().is_empty() {
            return Err(OrderError::MissingCustomer);
        }
        Ok(Self {
            customer,
            bicycle_type,
        })
    }

    /// The customer who placed this order.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn bicycle_type(&self) -> BicycleType {
        self.bicycle_type
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.customer, self.bicycle_type)
    }
}

/// Raw intake data for an order, as it arrives from a script or a form.
///
/// Every field is optional here; [`Order::try_from`] decides whether the
/// record is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub bicycle_type: Option<BicycleType>,
}

impl OrderRequest {
    pub fn new(customer: impl Into<String>, bicycle_type: BicycleType) -> Self {
        Self {
            customer: Some(customer.into()),
            bicycle_type: Some(bicycle_type),
        }
    }
}

impl TryFrom<OrderRequest> for Order {
    type Error = OrderError;

    fn try_from(request: OrderRequest) -> Result<Self, Self::Error> {
        let customer = request.customer.ok_or(OrderError::MissingCustomer)?;
        let bicycle_type = request
            .bicycle_type
            .ok_or(OrderError::MissingBicycleType)?;
        Order::new(customer, bicycle_type)
    }
}
