use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::atm::{Atm, AtmError};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OpKind {
    /// Opens an account.
    ///
    /// A register row carries the owner's name and the opening balance:
    ///
    /// |type       |card     |pin  |name       |amount |
    /// |-----------|---------|-----|-----------|-------|
    /// |register   |12345678 |1234 |Sam Sepiol |300.30 |
    Register,

    /// Adds cash to an account. The amount must be positive.
    ///
    /// |type       |card     |pin  |name |amount |
    /// |-----------|---------|-----|-----|-------|
    /// |deposit    |12345678 |1234 |     |40.00  |
    Deposit,

    /// Takes cash out of an account. The amount must be positive and
    /// covered by the current balance.
    ///
    /// |type       |card     |pin  |name |amount |
    /// |-----------|---------|-----|-----|-------|
    /// |withdrawal |12345678 |1234 |     |200.40 |
    Withdrawal,

    /// Exports the account's ledger to `ledger_<card>.txt` in the output
    /// directory. Carries no name or amount.
    ///
    /// |type       |card     |pin  |name |amount |
    /// |-----------|---------|-----|-----|-------|
    /// |print      |12345678 |1234 |     |       |
    Print,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Op {
    /// Kind of operation. See `OpKind` for the row layouts.
    #[serde(rename = "type")]
    pub op_type: OpKind,

    pub card: u32,

    pub pin: u32,

    /// Owner name; only present on `register` rows.
    pub name: Option<String>,

    /// Money amount; present on `register`, `deposit` and `withdrawal` rows.
    pub amount: Option<f64>,
}

impl Op {
    fn get_amount(&self) -> Result<f64, AtmError> {
        self.amount.ok_or(AtmError::MalformedOperation)
    }

    fn get_name(&self) -> Result<&str, AtmError> {
        self.name.as_deref().ok_or(AtmError::MalformedOperation)
    }

    /// Applies one parsed CSV row to the ATM. A `print` row writes the
    /// account's ledger file into `out_dir`.
    pub fn apply_to(&self, atm: &mut Atm, out_dir: &Path) -> Result<(), AtmError> {
        match self.op_type {
            OpKind::Register => {
                atm.register_account(self.card, self.pin, self.get_name()?, self.get_amount()?)
            }
            OpKind::Deposit => atm.deposit_cash(self.card, self.pin, self.get_amount()?),
            OpKind::Withdrawal => atm.withdraw_cash(self.card, self.pin, self.get_amount()?),
            OpKind::Print => atm.print_ledger(&self.ledger_path(out_dir), self.card, self.pin),
        }
    }

    pub fn ledger_path(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("ledger_{}.txt", self.card))
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AccountRow {
    pub card: u32,
    pub pin: u32,
    pub name: String,
    pub balance: f64,
}

/// Flattens the ATM's account map into serializable summary rows.
pub fn account_rows(atm: &Atm) -> Vec<AccountRow> {
    let mut rows = atm
        .accounts
        .iter()
        .map(|(&(card, pin), account)| AccountRow {
            card,
            pin,
            name: account.owner_name.clone(),
            balance: account.balance,
        })
        .collect::<Vec<AccountRow>>();

    // HashMap iteration order is arbitrary; keep the summary stable.
    rows.sort_by_key(|row| (row.card, row.pin));
    rows
}
