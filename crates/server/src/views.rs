//! Mapping from engine values to wire views.

use api_types::{balance::BalanceView, expense::ExpenseView, settlement::SettlementView};
use engine::{Expense, PersonBalance, Settlement};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Round to cents for display. Negative zero is folded into zero.
pub(crate) fn to_wire_amount(value: Decimal) -> f64 {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return 0.0;
    }
    rounded.to_f64().unwrap_or_default()
}

pub(crate) fn expense_view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount: to_wire_amount(expense.amount.to_decimal()),
        description: expense.description,
        paid_by: expense.payer.into_string(),
        participants: expense
            .participants
            .into_iter()
            .map(|person| person.into_string())
            .collect(),
        created_at: expense.created_at,
        updated_at: expense.updated_at,
    }
}

pub(crate) fn balance_view(balance: PersonBalance) -> BalanceView {
    BalanceView {
        person: balance.person.into_string(),
        balance: to_wire_amount(balance.balance),
    }
}

pub(crate) fn settlement_view(settlement: Settlement) -> SettlementView {
    SettlementView {
        from_person: settlement.from_person.into_string(),
        to_person: settlement.to_person.into_string(),
        amount: to_wire_amount(settlement.amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_amounts_are_rounded_to_cents() {
        let third = Decimal::from(100) / Decimal::from(3);
        assert_eq!(to_wire_amount(third), 33.33);
        assert_eq!(to_wire_amount(-third), -33.33);
        assert_eq!(to_wire_amount(Decimal::new(1005, 3)), 1.01);
    }

    #[test]
    fn tiny_negative_balance_is_plain_zero() {
        let value = to_wire_amount(Decimal::new(-1, 4));
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }
}
