//! Runner advancement helpers
//!
//! Every function takes the current occupancy by value and returns the new
//! occupancy plus the runners who scored, lead runner first. Placement is
//! always computed in full before it replaces the old bases.

use crate::models::{Base, Bases, DefensiveOutcome, PlayKind, PlayerId};

/// Batter to first; only runners forced by the batter move (walk / HBP).
pub fn force_batter(bases: Bases, batter: PlayerId) -> (Bases, Vec<PlayerId>) {
    let mut next = bases;
    let mut scored = Vec::new();
    if bases.first.is_some() {
        if bases.second.is_some() {
            if let Some(runner) = bases.third {
                scored.push(runner);
            }
            next.third = bases.second;
        }
        next.second = bases.first;
    }
    next.first = Some(batter);
    (next, scored)
}

/// Runner on `base` moves up one; anyone standing in the way is pushed
/// along the chain.
pub fn force_from(bases: Bases, base: Base) -> (Bases, Vec<PlayerId>) {
    let mut next = bases;
    let mut scored = Vec::new();
    if !bases.is_occupied(base) {
        return (next, scored);
    }

    // Walk to the end of the contiguous chain, then move it from the front.
    let mut chain = vec![base];
    let mut cursor = base;
    while let Some(ahead) = cursor.next() {
        if !bases.is_occupied(ahead) {
            break;
        }
        chain.push(ahead);
        cursor = ahead;
    }

    for b in chain.into_iter().rev() {
        let runner = next.take(b);
        match b.next() {
            Some(ahead) => next.set(ahead, runner),
            None => scored.extend(runner),
        }
    }
    (next, scored)
}

/// Every runner moves `n` bases, lead runner first.
pub fn advance_all(bases: Bases, n: u8) -> (Bases, Vec<PlayerId>) {
    let mut next = Bases::empty();
    let mut scored = Vec::new();
    for (base, runner) in bases.runners_lead_first() {
        match Base::from_index(base.index() + n as usize) {
            Some(target) => next.set(target, Some(runner)),
            None => scored.push(runner),
        }
    }
    (next, scored)
}

/// Place the batter `n` bases up after moving the runners `n` bases.
/// `n >= 4` clears the bases (everyone scores, batter last).
pub fn batter_takes(bases: Bases, batter: PlayerId, n: u8) -> (Bases, Vec<PlayerId>) {
    let (mut next, mut scored) = advance_all(bases, n);
    match n.checked_sub(1).and_then(|i| Base::from_index(i as usize)) {
        Some(base) => next.set(base, Some(batter)),
        None if n == 0 => {}
        None => scored.push(batter),
    }
    (next, scored)
}

/// Walk or hit-by-pitch outcome.
pub fn award_first(bases: Bases, batter: PlayerId, kind: PlayKind) -> DefensiveOutcome {
    let (next, scored) = force_batter(bases, batter);
    let mut outcome = DefensiveOutcome::new(kind, next);
    outcome.scored = scored;
    outcome
}
