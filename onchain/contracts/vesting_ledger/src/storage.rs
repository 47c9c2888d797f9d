use soroban_sdk::{contracterror, contracttype, Address, Env};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
// Below the network's maximum entry TTL of 180 days.
pub(crate) const SCHEDULE_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub(crate) const SCHEDULE_LIFETIME_THRESHOLD: u32 = SCHEDULE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VestingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidToken = 3,
    /// Caller is not the owner.
    Unauthorized = 4,
    /// Release caller is neither the beneficiary nor the owner.
    NotBeneficiaryOrOwner = 5,
    NotPendingOwner = 6,
    ScheduleAlreadyExists = 7,
    InvalidDuration = 8,
    InvalidAmount = 9,
    CliffExceedsDuration = 10,
    ArithmeticOverflow = 11,
    /// Withdrawable balance cannot back a new schedule.
    InsufficientTokens = 12,
    /// Release request exceeds the releasable amount.
    AmountTooHigh = 13,
    InsufficientWithdrawable = 14,
    ScheduleRevoked = 15,
    ScheduleNotInitialized = 16,
    /// Ownership cannot be transferred to the current owner.
    InvalidCandidate = 17,
}

/// Per-beneficiary vesting grant. The beneficiary is the storage key, not a
/// field.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    /// Set on creation, cleared by revocation.
    pub initialized: bool,
    /// `start + cliff`; nothing is releasable before this timestamp.
    pub cliff_end: u64,
    pub start: u64,
    /// Seconds from `start` until the whole amount is vested.
    pub duration: u64,
    pub amount_total: i128,
    /// Cumulative amount transferred to the beneficiary.
    pub released: i128,
    pub revoked: bool,
}

impl VestingSchedule {
    /// Zero-valued record returned for beneficiaries without a schedule.
    pub fn empty() -> Self {
        VestingSchedule {
            initialized: false,
            cliff_end: 0,
            start: 0,
            duration: 0,
            amount_total: 0,
            released: 0,
            revoked: false,
        }
    }

    /// Amount still held for this schedule.
    pub fn unreleased(&self) -> i128 {
        self.amount_total.saturating_sub(self.released)
    }
}

#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    Owner,
    PendingOwner,
    Token,
    // Sum of `amount_total - released` over initialized schedules.
    TotalCommitted,
    Schedule(Address),
}

pub(crate) fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&StorageKey::Owner)
}

pub(crate) fn require_initialized(env: &Env) -> Result<(), VestingError> {
    if !is_initialized(env) {
        return Err(VestingError::NotInitialized);
    }
    Ok(())
}

pub(crate) fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub(crate) fn read_owner(env: &Env) -> Result<Address, VestingError> {
    env.storage()
        .instance()
        .get::<_, Address>(&StorageKey::Owner)
        .ok_or(VestingError::NotInitialized)
}

pub(crate) fn write_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&StorageKey::Owner, owner);
}

pub(crate) fn read_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&StorageKey::PendingOwner)
}

pub(crate) fn write_pending_owner(env: &Env, candidate: &Address) {
    env.storage()
        .instance()
        .set(&StorageKey::PendingOwner, candidate);
}

pub(crate) fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&StorageKey::PendingOwner);
}

pub(crate) fn read_token(env: &Env) -> Result<Address, VestingError> {
    env.storage()
        .instance()
        .get::<_, Address>(&StorageKey::Token)
        .ok_or(VestingError::NotInitialized)
}

pub(crate) fn write_token(env: &Env, token: &Address) {
    env.storage().instance().set(&StorageKey::Token, token);
}

pub(crate) fn read_total_committed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get::<_, i128>(&StorageKey::TotalCommitted)
        .unwrap_or(0)
}

pub(crate) fn write_total_committed(env: &Env, total: i128) {
    env.storage()
        .instance()
        .set(&StorageKey::TotalCommitted, &total);
}

fn extend_schedule_ttl(env: &Env, key: &StorageKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, SCHEDULE_LIFETIME_THRESHOLD, SCHEDULE_BUMP_AMOUNT);
}

/// Reads a schedule and keeps the entry alive.
pub(crate) fn read_schedule(env: &Env, beneficiary: &Address) -> Option<VestingSchedule> {
    let key = StorageKey::Schedule(beneficiary.clone());
    let schedule = env.storage().persistent().get(&key);
    if schedule.is_some() {
        extend_schedule_ttl(env, &key);
    }
    schedule
}

pub(crate) fn write_schedule(env: &Env, beneficiary: &Address, schedule: &VestingSchedule) {
    let key = StorageKey::Schedule(beneficiary.clone());
    env.storage().persistent().set(&key, schedule);
    extend_schedule_ttl(env, &key);
}
