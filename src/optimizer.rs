use arrayvec::ArrayVec;
use log::trace;

use crate::network::{Minutes, Ticket};

/// A rider may buy at most this many tickets for one ride.
pub const MAX_TICKETS: usize = 3;

/// Indices into the price list, in the order the tickets were chosen.
pub type TicketSet = ArrayVec<usize, MAX_TICKETS>;

// Total price of up to three tickets in cents. Wide enough that no sum of
// `u64` prices can overflow it.
type Cost = u128;

fn ticket_cost(ticket: &Ticket) -> Cost {
    ticket.price.cents() as Cost
}

/// `None` stands for an empty set, which costs more than any real one.
fn set_cost(set: &TicketSet, tickets: &[Ticket]) -> Option<Cost> {
    if set.is_empty() {
        return None;
    }
    Some(set.iter().map(|&idx| ticket_cost(&tickets[idx])).sum())
}

fn no_dearer_than(cost: Cost, current: Option<Cost>) -> bool {
    current.map_or(true, |current| cost <= current)
}

/// The cheapest way to buy `MAX_TICKETS` or fewer tickets whose validity adds up to at least `duration`.
///
/// Returns `None` if no such set exists. Among equally priced sets of the same
/// size the one built from later tickets in the price list wins, and among
/// equally priced sets of different sizes the smaller one wins.
pub fn cheapest_tickets(duration: Minutes, tickets: &[Ticket]) -> Option<TicketSet> {
    if duration == 0 {
        return None;
    }
    let duration = duration as usize;

    // best[i][k] = cheapest set of exactly k + 1 tickets covering i + 1 minutes.
    let mut best: Vec<[TicketSet; MAX_TICKETS]> = vec![Default::default(); duration];
    trace!("Optimising over {} minutes and {} tickets.", duration, tickets.len());

    for i in 0..duration {
        let (covered, current) = best.split_at_mut(i);
        let current = &mut current[0];

        for (idx, ticket) in tickets.iter().enumerate() {
            let validity = ticket.validity as usize;

            if validity > i {
                if no_dearer_than(ticket_cost(ticket), set_cost(&current[0], tickets)) {
                    current[0].clear();
                    current[0].push(idx);
                }
                continue;
            }

            // Extend a smaller set that covers everything but the last `validity` minutes.
            let rest = &covered[i - validity];
            for k in 1..MAX_TICKETS {
                let smaller = &rest[k - 1];
                let Some(smaller_cost) = set_cost(smaller, tickets) else {
                    continue;
                };
                if no_dearer_than(smaller_cost + ticket_cost(ticket), set_cost(&current[k], tickets)) {
                    current[k] = smaller.clone();
                    current[k].push(idx);
                }
            }
        }
    }

    let last = best.pop()?;
    let mut answer: Option<(Cost, TicketSet)> = None;
    for set in last {
        let Some(cost) = set_cost(&set, tickets) else {
            continue;
        };
        if answer.as_ref().map_or(true, |(best_cost, _)| cost < *best_cost) {
            answer = Some((cost, set));
        }
    }
    answer.map(|(_, set)| set)
}
