#![no_std]

mod events;
mod storage;
mod vesting;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env};

pub use events::{
    OwnershipTransferStartedEvent, OwnershipTransferredEvent, ReleasedEvent, RevokedEvent,
    VestingScheduleCreatedEvent, WithdrawnEvent,
};
pub use storage::{VestingError, VestingSchedule};

#[contract]
pub struct VestingLedgerContract;

fn require_owner(env: &Env, caller: &Address) -> Result<Address, VestingError> {
    let owner = storage::read_owner(env)?;
    if *caller != owner {
        return Err(VestingError::Unauthorized);
    }
    Ok(owner)
}

/// Custodied balance not backing any schedule.
fn withdrawable_amount(env: &Env, token: &Address) -> Result<i128, VestingError> {
    let balance = token::Client::new(env, token).balance(&env.current_contract_address());
    let available = balance
        .checked_sub(storage::read_total_committed(env))
        .ok_or(VestingError::ArithmeticOverflow)?;
    Ok(available.max(0))
}

fn transfer_out(env: &Env, token: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    }
}

#[contractimpl]
impl VestingLedgerContract {
    /// @notice Initializes the ledger for a single custodied token.
    /// @dev Can only be called once. The token is immutable afterwards.
    /// @param owner Administrative authority; must authenticate.
    /// @param token Token contract whose balance this ledger custodies.
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), VestingError> {
        if storage::is_initialized(&env) {
            return Err(VestingError::AlreadyInitialized);
        }
        owner.require_auth();

        // A ledger can never custody itself.
        if token == env.current_contract_address() {
            return Err(VestingError::InvalidToken);
        }

        storage::write_owner(&env, &owner);
        storage::write_token(&env, &token);
        storage::write_total_committed(&env, 0);
        storage::extend_instance_ttl(&env);

        log!(&env, "vesting ledger initialized: owner {} token {}", owner, token);
        Ok(())
    }

    /// @notice Commits part of the withdrawable balance to a new schedule.
    /// @dev Checks run in order and the first failure wins: existing grant,
    ///      duration, amount, cliff, overflow, then available funds.
    /// @param caller Must be the owner; must authenticate.
    /// @param beneficiary Recipient of the vested tokens.
    /// @param start Timestamp at which vesting starts accruing.
    /// @param cliff Seconds after `start` before anything is releasable.
    /// @param duration Seconds after `start` at which everything is vested.
    /// @param amount Total tokens granted.
    pub fn create_vesting_schedule(
        env: Env,
        caller: Address,
        beneficiary: Address,
        start: u64,
        cliff: u64,
        duration: u64,
        amount: i128,
    ) -> Result<(), VestingError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        require_owner(&env, &caller)?;

        let existing = storage::read_schedule(&env, &beneficiary);
        if existing.map_or(false, |s| s.initialized) {
            return Err(VestingError::ScheduleAlreadyExists);
        }

        let cliff_end = vesting::validate_terms(start, cliff, duration, amount)?;

        let token = storage::read_token(&env)?;
        if withdrawable_amount(&env, &token)? < amount {
            return Err(VestingError::InsufficientTokens);
        }
        let total_committed = storage::read_total_committed(&env)
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;

        let schedule = VestingSchedule {
            initialized: true,
            cliff_end,
            start,
            duration,
            amount_total: amount,
            released: 0,
            revoked: false,
        };
        storage::write_schedule(&env, &beneficiary, &schedule);
        storage::write_total_committed(&env, total_committed);
        storage::extend_instance_ttl(&env);

        events::schedule_created(&env, &beneficiary, amount);
        log!(&env, "vesting schedule created for {}: {}", beneficiary, amount);
        Ok(())
    }

    /// @notice Transfers vested tokens to a beneficiary.
    /// @param caller The beneficiary or the owner; must authenticate.
    /// @param beneficiary Schedule to release from.
    /// @param amount Tokens to release, at most the releasable amount.
    pub fn release(
        env: Env,
        caller: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), VestingError> {
        storage::require_initialized(&env)?;
        caller.require_auth();

        let owner = storage::read_owner(&env)?;
        if caller != beneficiary && caller != owner {
            return Err(VestingError::NotBeneficiaryOrOwner);
        }

        let mut schedule = storage::read_schedule(&env, &beneficiary)
            .ok_or(VestingError::ScheduleNotInitialized)?;
        if schedule.revoked {
            return Err(VestingError::ScheduleRevoked);
        }
        if !schedule.initialized {
            return Err(VestingError::ScheduleNotInitialized);
        }
        if amount < 0 {
            return Err(VestingError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        if amount > vesting::releasable_amount(&schedule, now)? {
            return Err(VestingError::AmountTooHigh);
        }

        schedule.released = schedule
            .released
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        let total_committed = storage::read_total_committed(&env)
            .checked_sub(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        let token = storage::read_token(&env)?;

        storage::write_schedule(&env, &beneficiary, &schedule);
        storage::write_total_committed(&env, total_committed);
        storage::extend_instance_ttl(&env);

        transfer_out(&env, &token, &beneficiary, amount);

        events::released(&env, &beneficiary, amount);
        log!(&env, "released {} to {}", amount, beneficiary);
        Ok(())
    }

    /// @notice Terminates a schedule and sweeps its unreleased balance.
    /// @dev Everything not yet released goes back to the owner, vested or not.
    ///      The schedule stays readable with `revoked` set.
    /// @param caller Must be the owner; must authenticate.
    /// @param beneficiary Schedule to revoke.
    /// @return swept Amount transferred to the owner.
    pub fn revoke(env: Env, caller: Address, beneficiary: Address) -> Result<i128, VestingError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        let owner = require_owner(&env, &caller)?;

        let mut schedule = storage::read_schedule(&env, &beneficiary)
            .ok_or(VestingError::ScheduleNotInitialized)?;
        if schedule.revoked {
            return Err(VestingError::ScheduleRevoked);
        }
        if !schedule.initialized {
            return Err(VestingError::ScheduleNotInitialized);
        }

        let swept = schedule.unreleased();
        let total_committed = storage::read_total_committed(&env)
            .checked_sub(swept)
            .ok_or(VestingError::ArithmeticOverflow)?;
        let token = storage::read_token(&env)?;

        schedule.revoked = true;
        schedule.initialized = false;
        storage::write_schedule(&env, &beneficiary, &schedule);
        storage::write_total_committed(&env, total_committed);
        storage::extend_instance_ttl(&env);

        transfer_out(&env, &token, &owner, swept);

        events::revoked(&env, &beneficiary, swept);
        log!(&env, "schedule of {} revoked, {} returned", beneficiary, swept);
        Ok(swept)
    }

    /// @notice Withdraws custodied tokens not committed to any schedule.
    /// @param caller Must be the owner; must authenticate.
    /// @param amount Tokens to withdraw, at most the withdrawable amount.
    pub fn withdraw(env: Env, caller: Address, amount: i128) -> Result<(), VestingError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        let owner = require_owner(&env, &caller)?;

        if amount < 0 {
            return Err(VestingError::InvalidAmount);
        }
        let token = storage::read_token(&env)?;
        if amount > withdrawable_amount(&env, &token)? {
            return Err(VestingError::InsufficientWithdrawable);
        }

        storage::extend_instance_ttl(&env);
        transfer_out(&env, &token, &owner, amount);

        events::withdrawn(&env, &owner, amount);
        log!(&env, "owner withdrew {}", amount);
        Ok(())
    }

    /// @notice Proposes a new owner. Takes effect once the candidate accepts.
    /// @dev A later proposal replaces the pending one. The current owner keeps
    ///      every privilege until acceptance.
    /// @param caller Must be the owner; must authenticate.
    /// @param candidate Proposed owner, distinct from the current one.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        candidate: Address,
    ) -> Result<(), VestingError> {
        storage::require_initialized(&env)?;
        caller.require_auth();
        let owner = require_owner(&env, &caller)?;
        if candidate == owner {
            return Err(VestingError::InvalidCandidate);
        }

        storage::write_pending_owner(&env, &candidate);
        storage::extend_instance_ttl(&env);

        events::ownership_transfer_started(&env, &owner, &candidate);
        log!(&env, "ownership transfer to {} requested", candidate);
        Ok(())
    }

    /// @notice Completes a pending ownership transfer.
    /// @param caller Must be the pending owner; must authenticate.
    pub fn accept_ownership(env: Env, caller: Address) -> Result<(), VestingError> {
        storage::require_initialized(&env)?;
        caller.require_auth();

        match storage::read_pending_owner(&env) {
            Some(pending) if pending == caller => {}
            _ => return Err(VestingError::NotPendingOwner),
        }

        let previous = storage::read_owner(&env)?;
        storage::write_owner(&env, &caller);
        storage::clear_pending_owner(&env);
        storage::extend_instance_ttl(&env);

        events::ownership_transferred(&env, &previous, &caller);
        log!(&env, "ownership transferred from {} to {}", previous, caller);
        Ok(())
    }

    /// @notice Returns the custodied token.
    pub fn get_token(env: Env) -> Result<Address, VestingError> {
        storage::read_token(&env)
    }

    /// @notice Returns the current owner.
    pub fn owner(env: Env) -> Result<Address, VestingError> {
        storage::read_owner(&env)
    }

    /// @notice Returns the proposed owner awaiting acceptance, if any.
    pub fn pending_owner(env: Env) -> Option<Address> {
        storage::read_pending_owner(&env)
    }

    /// @notice Reads the schedule of a beneficiary.
    /// @dev Returns a zero-valued, uninitialized record when none exists.
    pub fn get_vesting_schedule(env: Env, beneficiary: Address) -> VestingSchedule {
        storage::read_schedule(&env, &beneficiary).unwrap_or_else(VestingSchedule::empty)
    }

    /// @notice Total amount committed to schedules and not yet released.
    pub fn get_total_committed(env: Env) -> i128 {
        storage::read_total_committed(&env)
    }

    /// @notice Custodied balance minus the committed amount.
    pub fn get_withdrawable_amount(env: Env) -> Result<i128, VestingError> {
        let token = storage::read_token(&env)?;
        withdrawable_amount(&env, &token)
    }

    /// @notice Amount the beneficiary could release right now.
    /// @dev Zero for unknown beneficiaries, revoked schedules and before the cliff.
    ///      Reading a schedule extends its TTL.
    pub fn compute_releasable_amount(env: Env, beneficiary: Address) -> Result<i128, VestingError> {
        let schedule = match storage::read_schedule(&env, &beneficiary) {
            Some(schedule) => schedule,
            None => return Ok(0),
        };
        vesting::releasable_amount(&schedule, env.ledger().timestamp())
    }
}
