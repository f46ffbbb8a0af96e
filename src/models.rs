// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
    Investment,
    Emi,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
            RecordKind::Investment => "investment",
            RecordKind::Emi => "emi",
        }
    }

    pub fn parse(s: &str) -> Option<RecordKind> {
        match s {
            "income" => Some(RecordKind::Income),
            "expense" => Some(RecordKind::Expense),
            "investment" => Some(RecordKind::Investment),
            "emi" => Some(RecordKind::Emi),
            _ => None,
        }
    }
}

/// Meaningful only on expense records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    Upi,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Upi => "UPI",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentMethod> {
        match s {
            "Cash" | "cash" => Some(PaymentMethod::Cash),
            "Credit Card" | "credit-card" => Some(PaymentMethod::CreditCard),
            "UPI" | "upi" => Some(PaymentMethod::Upi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }

    pub fn parse(s: &str) -> Option<Currency> {
        match s.to_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "INR" => Some(Currency::Inr),
            _ => None,
        }
    }
}

/// Loan terms attached to an EMI record. The JSON keys match the stored
/// payload format, which predates this schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiDetail {
    pub lender_name: String,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub tenure_months: u32,
    #[serde(rename = "emiStartDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "emiDate")]
    pub due_day: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDetail {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
}

/// Kind-specific payload, decoded and validated at the storage boundary.
/// The record kind selects the variant; there is no in-band tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecordDetail {
    Emi(EmiDetail),
    Investment(InvestmentDetail),
}

impl RecordDetail {
    pub fn emi(&self) -> Option<&EmiDetail> {
        match self {
            RecordDetail::Emi(d) => Some(d),
            _ => None,
        }
    }

    pub fn investment(&self) -> Option<&InvestmentDetail> {
        match self {
            RecordDetail::Investment(d) => Some(d),
            _ => None,
        }
    }
}

/// One ledger entry. `kind` is immutable after creation; changing it means
/// delete and recreate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub title: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub detail: Option<RecordDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: i64,
    pub name: String,
    pub last_four: String,
    pub network: Option<String>,
    pub credit_limit: Decimal,
    /// Drawn, unpaid balance. Independent of expense records paid by card;
    /// the two must never both be subtracted from net worth.
    pub current_balance: Decimal,
    pub color_theme: Option<String>,
    pub due_day: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wish {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub currency: Currency,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            display_name: String::new(),
            currency: Currency::Usd,
        }
    }
}

/// Per-month aggregate, always computed fresh and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub income: Decimal,
    /// Display spending: cash/UPI plus card-paid, for visibility.
    pub expenses: Decimal,
    pub investment: Decimal,
    pub emi: Decimal,
    /// Live sum of card balances at read time.
    pub credit_card_usage: Decimal,
    pub balance: Decimal,
}

/// Read-only projection of an EMI record plus its loan terms.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedEmi {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub monthly_amount: Decimal,
    pub total_amount: Decimal,
    pub months_paid: u32,
    pub remaining_months: u32,
    pub total_months: u32,
}

/// Read-only projection of an investment record under a valuation strategy.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedInvestment {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub invested_amount: Decimal,
    pub current_value: Decimal,
    pub change_amount: Decimal,
    pub change_percent: Decimal,
}
