//! Settlement planning.
//!
//! Turns net balances into a list of point-to-point transfers that clears
//! every debt. The plan is greedy: the largest creditor is paid by the largest
//! debtor first, for as much as both can take.
//!
//! Transfers are whole cents. Every open balance is rounded to the nearest
//! cent, then the rounded positions are nudged so they add up to the rounded
//! sum of the exact balances. A nudge only flips a person from one side of
//! their exact balance to the other (floor to ceil or back), so nobody is
//! asked for more than a cent beyond what they owe and a closed ledger still
//! settles to within a cent.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Balances, PersonId};

/// Balances within this distance of zero are considered settled (0.01).
pub const SETTLEMENT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A single proposed transfer from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from_person: PersonId,
    pub to_person: PersonId,
    /// Always positive, rounded to 2 decimals.
    pub amount: Decimal,
}

/// An open balance rounded to cents.
struct Position<'a> {
    person: &'a PersonId,
    exact: Decimal,
    cents: i64,
    /// `cents` minus the exact balance, in major units.
    error: Decimal,
}

impl<'a> Position<'a> {
    fn new(person: &'a PersonId, balance: Decimal) -> Self {
        let cents = to_cents(balance);
        Self {
            person,
            exact: balance,
            cents,
            error: Decimal::new(cents, 2) - balance,
        }
    }
}

fn to_cents(value: Decimal) -> i64 {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    i64::try_from(rounded.mantissa()).unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Moves positions by one cent until they sum to `target`.
///
/// A surplus is taken from people who were rounded up, a deficit is given to
/// people who were rounded down, largest rounding first; ties go to the
/// smaller person id. There are always enough of them because `target` lies
/// between the sums of the floors and of the ceilings.
fn remove_rounding_drift(positions: &mut [Position<'_>], target: i64) {
    let total: i128 = positions.iter().map(|p| i128::from(p.cents)).sum();
    let drift = total - i128::from(target);
    if drift == 0 {
        return;
    }

    let step: i64 = if drift > 0 { 1 } else { -1 };
    let mut eligible: Vec<&mut Position<'_>> = positions
        .iter_mut()
        .filter(|p| {
            if step > 0 {
                p.error > Decimal::ZERO
            } else {
                p.error < Decimal::ZERO
            }
        })
        .collect();
    eligible.sort_by(|a, b| {
        b.error
            .abs()
            .cmp(&a.error.abs())
            .then_with(|| a.person.cmp(b.person))
    });

    let moves = usize::try_from(drift.unsigned_abs()).unwrap_or(usize::MAX);
    for position in eligible.into_iter().take(moves) {
        position.cents -= step;
    }
}

/// Compute the transfers that bring every balance back to zero.
///
/// - People within [`SETTLEMENT_EPSILON`] of zero are settled and left out.
/// - Creditors and debtors are each sorted by descending amount (in cents);
///   ties keep person id order.
/// - Two cursors walk the lists, matching the current creditor and debtor for
///   the smaller of their remainders, and move on once a remainder is zero.
///
/// Total over finite input; never fails.
#[must_use]
pub fn compute_settlements(balances: &Balances) -> Vec<Settlement> {
    let mut positions: Vec<Position<'_>> = balances
        .iter()
        .filter(|(_, balance)| balance.abs() > SETTLEMENT_EPSILON)
        .map(|(person, balance)| Position::new(person, *balance))
        .collect();
    let target = to_cents(positions.iter().map(|p| p.exact).sum());
    remove_rounding_drift(&mut positions, target);

    let mut creditors: Vec<(&PersonId, i64)> = positions
        .iter()
        .filter(|p| p.cents > 0)
        .map(|p| (p.person, p.cents))
        .collect();
    let mut debtors: Vec<(&PersonId, i64)> = positions
        .iter()
        .filter(|p| p.cents < 0)
        .map(|p| (p.person, -p.cents))
        .collect();

    // Stable sorts: positions are already in person order.
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < creditors.len() && j < debtors.len() {
        let (creditor, credit) = creditors[i];
        let (debtor, debt) = debtors[j];

        let cents = credit.min(debt);
        settlements.push(Settlement {
            from_person: debtor.clone(),
            to_person: creditor.clone(),
            amount: Decimal::new(cents, 2),
        });

        creditors[i].1 -= cents;
        debtors[j].1 -= cents;
        if creditors[i].1 == 0 {
            i += 1;
        }
        if debtors[j].1 == 0 {
            j += 1;
        }
    }

    tracing::debug!(
        people = balances.len(),
        transfers = settlements.len(),
        "settlement plan computed"
    );
    settlements
}
