// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{CreditCard, PaymentMethod, PeriodTotals, Record, RecordKind};

/// Aggregate a period's records plus the live card set into `PeriodTotals`.
///
/// Card-paid expenses are shown in `expenses` but excluded from the balance
/// subtraction: the card's outstanding balance already embodies card-paid
/// spending, and subtracting both would double-count. Money spent via a
/// tracked credit card is represented once, as card debt.
pub fn period_totals(records: &[Record], cards: &[CreditCard]) -> PeriodTotals {
    let mut income = Decimal::ZERO;
    let mut expense_non_card = Decimal::ZERO;
    let mut expense_card = Decimal::ZERO;
    let mut investment = Decimal::ZERO;
    let mut emi = Decimal::ZERO;

    for r in records {
        match r.kind {
            RecordKind::Income => income += r.amount,
            RecordKind::Expense => {
                if r.payment_method == Some(PaymentMethod::CreditCard) {
                    expense_card += r.amount;
                } else {
                    expense_non_card += r.amount;
                }
            }
            RecordKind::Investment => investment += r.amount,
            RecordKind::Emi => emi += r.amount,
        }
    }

    let credit_card_usage: Decimal = cards.iter().map(|c| c.current_balance).sum();

    PeriodTotals {
        income,
        expenses: expense_non_card + expense_card,
        investment,
        emi,
        credit_card_usage,
        balance: income - expense_non_card - investment - emi - credit_card_usage,
    }
}
