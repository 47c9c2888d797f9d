//! Linear vesting with a cliff.
//!
//! Everything here is a pure function of a schedule and a timestamp so the
//! same curve backs `release`, `revoke` and the read-only queries.

use crate::storage::{VestingError, VestingSchedule};

/// Checks the terms of a new grant and returns its `cliff_end`.
///
/// Terms are rejected when `start + duration` or `amount * duration` would not
/// fit, which keeps every later evaluation of the curve overflow free.
pub fn validate_terms(
    start: u64,
    cliff: u64,
    duration: u64,
    amount: i128,
) -> Result<u64, VestingError> {
    if duration == 0 {
        return Err(VestingError::InvalidDuration);
    }
    if amount <= 0 {
        return Err(VestingError::InvalidAmount);
    }
    if cliff > duration {
        return Err(VestingError::CliffExceedsDuration);
    }
    start
        .checked_add(duration)
        .ok_or(VestingError::ArithmeticOverflow)?;
    amount
        .checked_mul(i128::from(duration))
        .ok_or(VestingError::ArithmeticOverflow)?;

    // cliff <= duration, so this cannot overflow once start + duration fits.
    Ok(start + cliff)
}

/// Amount vested at `now`, ignoring the cliff and any releases.
fn vested_amount(schedule: &VestingSchedule, now: u64) -> Result<i128, VestingError> {
    let end = schedule.start.saturating_add(schedule.duration);
    if now >= end {
        return Ok(schedule.amount_total);
    }
    if now <= schedule.start {
        return Ok(0);
    }

    let elapsed = i128::from(now - schedule.start);
    let duration = i128::from(schedule.duration);
    schedule
        .amount_total
        .checked_mul(elapsed)
        .map(|scaled| scaled / duration)
        .ok_or(VestingError::ArithmeticOverflow)
}

/// Tokens vested but not yet released at `now`.
///
/// Zero for revoked or uninitialized schedules and before `cliff_end`. Past
/// `start + duration` the whole unreleased remainder is returned. In between
/// the vested amount is `floor(amount_total * (now - start) / duration)`.
pub fn releasable_amount(schedule: &VestingSchedule, now: u64) -> Result<i128, VestingError> {
    if schedule.revoked || !schedule.initialized {
        return Ok(0);
    }
    if now < schedule.cliff_end {
        return Ok(0);
    }

    let vested = vested_amount(schedule, now)?;
    let releasable = vested
        .checked_sub(schedule.released)
        .ok_or(VestingError::ArithmeticOverflow)?;
    Ok(releasable.max(0))
}
