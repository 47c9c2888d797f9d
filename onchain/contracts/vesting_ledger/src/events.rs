use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingScheduleCreatedEvent {
    pub beneficiary: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleasedEvent {
    pub beneficiary: Address,
    pub amount: i128,
}

/// `amount` is what was swept back to the owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevokedEvent {
    pub beneficiary: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferStartedEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

pub(crate) fn schedule_created(env: &Env, beneficiary: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("created"), beneficiary.clone()),
        VestingScheduleCreatedEvent {
            beneficiary: beneficiary.clone(),
            amount,
        },
    );
}

pub(crate) fn released(env: &Env, beneficiary: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("released"), beneficiary.clone()),
        ReleasedEvent {
            beneficiary: beneficiary.clone(),
            amount,
        },
    );
}

pub(crate) fn revoked(env: &Env, beneficiary: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("revoked"), beneficiary.clone()),
        RevokedEvent {
            beneficiary: beneficiary.clone(),
            amount,
        },
    );
}

pub(crate) fn withdrawn(env: &Env, owner: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), owner.clone()),
        WithdrawnEvent {
            owner: owner.clone(),
            amount,
        },
    );
}

pub(crate) fn ownership_transfer_started(env: &Env, previous_owner: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("own_start"), previous_owner.clone()),
        OwnershipTransferStartedEvent {
            previous_owner: previous_owner.clone(),
            new_owner: new_owner.clone(),
        },
    );
}

pub(crate) fn ownership_transferred(env: &Env, previous_owner: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("own_xfer"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner: previous_owner.clone(),
            new_owner: new_owner.clone(),
        },
    );
}
