//! Status machines
//!
//! Closed status enums for tables, orders and order items, with exhaustive
//! transition tables. The storage layer persists the SCREAMING_SNAKE_CASE
//! form; an out-of-order transition is a [`TransitionError`], never a silent
//! write.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected status transition (entity was not in the required predecessor state)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition {from} -> {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

/// Dining table occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Free => "FREE",
            TableStatus::Occupied => "OCCUPIED",
        }
    }
}

/// Order lifecycle status
///
/// PENDING (open, accumulating items) → SERVED (every item served) →
/// PAID (cashier verified). COMPLETED is the terminal status of the
/// simplified flow without payment verification. PAID and COMPLETED are
/// terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Served,
    Paid,
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Served => "SERVED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    /// PAID and COMPLETED orders accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Completed)
    }

    /// Validate a transition against the closed edge set
    pub fn advance(self, to: OrderStatus) -> Result<OrderStatus, TransitionError> {
        let ok = matches!(
            (self, to),
            (OrderStatus::Pending, OrderStatus::Served)
                | (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Served, OrderStatus::Paid)
                | (OrderStatus::Served, OrderStatus::Completed)
        );
        if ok {
            Ok(to)
        } else {
            Err(TransitionError {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }
}

/// Order item preparation status, strictly forward-only:
/// PENDING → RECEIVED → COOKING → DONE → SERVED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Received,
    Cooking,
    Done,
    Served,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Pending => "PENDING",
            ItemStatus::Received => "RECEIVED",
            ItemStatus::Cooking => "COOKING",
            ItemStatus::Done => "DONE",
            ItemStatus::Served => "SERVED",
        }
    }

    /// The single successor state, if any (SERVED has none)
    pub fn next(self) -> Option<ItemStatus> {
        match self {
            ItemStatus::Pending => Some(ItemStatus::Received),
            ItemStatus::Received => Some(ItemStatus::Cooking),
            ItemStatus::Cooking => Some(ItemStatus::Done),
            ItemStatus::Done => Some(ItemStatus::Served),
            ItemStatus::Served => None,
        }
    }

    /// Validate a single forward step; skipping a stage is rejected
    pub fn advance(self, to: ItemStatus) -> Result<ItemStatus, TransitionError> {
        if self.next() == Some(to) {
            Ok(to)
        } else {
            Err(TransitionError {
                from: self.as_str(),
                to: to.as_str(),
            })
        }
    }
}

/// Payment method declared by the customer
///
/// Non-cash methods require an evidence slip at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }

    /// Cash is settled in person; everything else needs a slip to verify
    pub fn requires_slip(self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }
}
