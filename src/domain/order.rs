use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoffeeType {
    Arabica,
    Robusta,
    #[serde(rename = "Black Coffee")]
    BlackCoffee,
    Decaf,
}

impl CoffeeType {
    /// Selectable options, in menu order.
    pub const ALL: [CoffeeType; 4] = [
        CoffeeType::Arabica,
        CoffeeType::Robusta,
        CoffeeType::BlackCoffee,
        CoffeeType::Decaf,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CoffeeType::Arabica => "Arabica",
            CoffeeType::Robusta => "Robusta",
            CoffeeType::BlackCoffee => "Black Coffee",
            CoffeeType::Decaf => "Decaf",
        }
    }
}

impl fmt::Display for CoffeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown coffee type '{0}'")]
pub struct UnknownCoffeeType(pub String);

impl FromStr for CoffeeType {
    type Err = UnknownCoffeeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CoffeeType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCoffeeType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Picking,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Picking,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Picking => "Picking",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A committed order. Fields are private so an order cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    coffee_type: CoffeeType,
    weight: u32,
    amount: u32,
    delivery_date: NaiveDate,
    post_date: NaiveDate,
    status: OrderStatus,
}

impl Order {
    pub fn new(
        coffee_type: CoffeeType,
        weight: u32,
        amount: u32,
        delivery_date: NaiveDate,
        post_date: NaiveDate,
        status: OrderStatus,
    ) -> Self {
        Self {
            coffee_type,
            weight,
            amount,
            delivery_date,
            post_date,
            status,
        }
    }

    pub fn coffee_type(&self) -> CoffeeType {
        self.coffee_type
    }

    /// Weight in grams.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn delivery_date(&self) -> NaiveDate {
        self.delivery_date
    }

    pub fn post_date(&self) -> NaiveDate {
        self.post_date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }
}

/// Names of the draft's editable fields, as the form binds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    CoffeeType,
    Weight,
    Amount,
    DeliveryDate,
    PostDate,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::CoffeeType,
        DraftField::Weight,
        DraftField::Amount,
        DraftField::DeliveryDate,
        DraftField::PostDate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DraftField::CoffeeType => "coffeeType",
            DraftField::Weight => "weight",
            DraftField::Amount => "amount",
            DraftField::DeliveryDate => "deliveryDate",
            DraftField::PostDate => "postDate",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// One field-level edit of the draft. `None` clears the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    CoffeeType(Option<CoffeeType>),
    Weight(Option<u32>),
    Amount(Option<u32>),
    DeliveryDate(Option<NaiveDate>),
    PostDate(Option<NaiveDate>),
}

impl FieldUpdate {
    pub fn field(&self) -> DraftField {
        match self {
            FieldUpdate::CoffeeType(_) => DraftField::CoffeeType,
            FieldUpdate::Weight(_) => DraftField::Weight,
            FieldUpdate::Amount(_) => DraftField::Amount,
            FieldUpdate::DeliveryDate(_) => DraftField::DeliveryDate,
            FieldUpdate::PostDate(_) => DraftField::PostDate,
        }
    }

    /// The update that blanks `field`.
    pub fn cleared(field: DraftField) -> Self {
        match field {
            DraftField::CoffeeType => FieldUpdate::CoffeeType(None),
            DraftField::Weight => FieldUpdate::Weight(None),
            DraftField::Amount => FieldUpdate::Amount(None),
            DraftField::DeliveryDate => FieldUpdate::DeliveryDate(None),
            DraftField::PostDate => FieldUpdate::PostDate(None),
        }
    }
}

/// In-progress form input for the next order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub coffee_type: Option<CoffeeType>,
    pub weight: Option<u32>,
    pub amount: Option<u32>,
    pub delivery_date: Option<NaiveDate>,
    pub post_date: Option<NaiveDate>,
}

impl Default for Draft {
    fn default() -> Self {
        Self::empty()
    }
}

impl Draft {
    /// The blank form: no coffee type, zero weight and amount, no dates.
    pub fn empty() -> Self {
        Self {
            coffee_type: None,
            weight: Some(0),
            amount: Some(0),
            delivery_date: None,
            post_date: None,
        }
    }

    /// Overwrites exactly the field named by `update`.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::CoffeeType(v) => self.coffee_type = v,
            FieldUpdate::Weight(v) => self.weight = v,
            FieldUpdate::Amount(v) => self.amount = v,
            FieldUpdate::DeliveryDate(v) => self.delivery_date = v,
            FieldUpdate::PostDate(v) => self.post_date = v,
        }
    }

    pub fn missing_fields(&self) -> Vec<DraftField> {
        let present = [
            self.coffee_type.is_some(),
            self.weight.is_some(),
            self.amount.is_some(),
            self.delivery_date.is_some(),
            self.post_date.is_some(),
        ];
        DraftField::ALL
            .into_iter()
            .zip(present)
            .filter_map(|(field, ok)| (!ok).then_some(field))
            .collect()
    }

    /// Builds the committed order, or names every field still missing.
    pub fn to_order(&self, status: OrderStatus) -> Result<Order, DomainError> {
        match (
            self.coffee_type,
            self.weight,
            self.amount,
            self.delivery_date,
            self.post_date,
        ) {
            (Some(coffee_type), Some(weight), Some(amount), Some(delivery), Some(post)) => Ok(
                Order::new(coffee_type, weight, amount, delivery, post, status),
            ),
            _ => Err(DomainError::Validation {
                missing: self.missing_fields(),
            }),
        }
    }
}
