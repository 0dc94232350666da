use std::{collections::HashMap, error::Error, fmt::Display, path::Path};

use crate::money::format_usd;

/// Composite account identity. A card number on its own is not enough to
/// address an account; the PIN is part of the key, so a wrong PIN looks
/// exactly like a missing account.
pub type CardKey = (u32, u32);

#[non_exhaustive]
#[derive(Debug, PartialEq)]
pub enum AtmError {
    /// An account already exists under the given card number and PIN.
    DuplicateAccount,

    /// No account exists under the given card number and PIN.
    AccountNotFound,

    /// Deposit or withdrawal amount was zero or negative.
    InvalidAmount,

    /// Withdrawal amount exceeds the current balance. Distinct from
    /// `InvalidAmount`: the request is well-formed but cannot be satisfied
    /// given the account's state.
    InsufficientFunds,

    /// A batch operation row is missing a field its kind requires
    /// (a `register` without a name, or a money operation without an amount).
    MalformedOperation,

    /// The ledger file could not be written.
    Io(String),
}

impl Error for AtmError {}
impl Display for AtmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Account {
    /// Display name, fixed at registration.
    pub owner_name: String,

    /// Using an `f64` here is not advised but done for simplicity.
    /// Balances should be stored with fixed precision to ensure
    /// correct and precise arithmetic operations.
    pub balance: f64,
}

impl Account {
    pub fn new(owner_name: String, balance: f64) -> Self {
        Account {
            owner_name,
            balance,
        }
    }
}

/// The account-and-transaction engine. Owns every account and its history;
/// the two maps always share the same key set.
///
/// Transaction records are stored as the exact line that will appear in an
/// exported ledger, so insertion order is chronological order and export is
/// a straight copy.
#[derive(Debug, Default)]
pub struct Atm {
    pub accounts: HashMap<CardKey, Account>,
    pub transactions: HashMap<CardKey, Vec<String>>,
}

impl Atm {
    pub fn new() -> Self {
        Atm {
            accounts: HashMap::new(),
            transactions: HashMap::new(),
        }
    }

    /// Creates an account and its empty transaction history under
    /// `(card_number, pin)`.
    ///
    /// The initial balance is taken as-is; no sign check is applied at
    /// registration.
    pub fn register_account(
        &mut self,
        card_number: u32,
        pin: u32,
        owner_name: &str,
        initial_balance: f64,
    ) -> Result<(), AtmError> {
        let key = (card_number, pin);

        if self.accounts.contains_key(&key) {
            return Err(AtmError::DuplicateAccount);
        }

        self.accounts
            .insert(key, Account::new(owner_name.to_owned(), initial_balance));
        self.transactions.insert(key, Vec::new());

        Ok(())
    }

    pub fn check_balance(&self, card_number: u32, pin: u32) -> Result<f64, AtmError> {
        self.accounts
            .get(&(card_number, pin))
            .map(|account| account.balance)
            .ok_or(AtmError::AccountNotFound)
    }

    pub fn deposit_cash(
        &mut self,
        card_number: u32,
        pin: u32,
        amount: f64,
    ) -> Result<(), AtmError> {
        self.mutate_balance(card_number, pin, TransactionKind::Deposit, amount)
    }

    pub fn withdraw_cash(
        &mut self,
        card_number: u32,
        pin: u32,
        amount: f64,
    ) -> Result<(), AtmError> {
        self.mutate_balance(card_number, pin, TransactionKind::Withdrawal, amount)
    }

    /// Writes the account's ledger to `path`: a header naming the owner,
    /// card number and PIN, followed by every transaction record in
    /// chronological order, one per line.
    pub fn print_ledger(
        &self,
        path: &Path,
        card_number: u32,
        pin: u32,
    ) -> Result<(), AtmError> {
        let key = (card_number, pin);
        let account = self.accounts.get(&key).ok_or(AtmError::AccountNotFound)?;

        let mut out = format!(
            "Name: {}\nCard Number: {}\nPIN: {}\n",
            account.owner_name, card_number, pin
        );
        for record in &self.transactions[&key] {
            out.push_str(record);
            out.push('\n');
        }

        std::fs::write(path, out).map_err(|e| AtmError::Io(e.to_string()))
    }

    /// Shared deposit/withdrawal path. All validation happens before any
    /// mutation: a rejected operation leaves both maps untouched.
    fn mutate_balance(
        &mut self,
        card_number: u32,
        pin: u32,
        kind: TransactionKind,
        amount: f64,
    ) -> Result<(), AtmError> {
        let key = (card_number, pin);
        let account = self
            .accounts
            .get_mut(&key)
            .ok_or(AtmError::AccountNotFound)?;

        if amount <= 0.0 {
            return Err(AtmError::InvalidAmount);
        }

        match kind {
            TransactionKind::Deposit => account.balance += amount,
            TransactionKind::Withdrawal => {
                if amount > account.balance {
                    return Err(AtmError::InsufficientFunds);
                }
                account.balance -= amount;
            }
        }

        let record = format!(
            "{} - Amount: {}, Updated Balance: {}",
            kind,
            format_usd(amount),
            format_usd(account.balance)
        );
        self.transactions
            .get_mut(&key)
            .expect("Transaction history should always exist for a registered account.")
            .push(record);

        Ok(())
    }
}
