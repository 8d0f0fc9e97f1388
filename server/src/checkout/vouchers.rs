//! Voucher redemption validation and discount math
//!
//! Pure stage: the engine resolves codes against the available vouchers
//! first, then this module rejects duplicates and already-consumed codes
//! and prices each voucher. Percentage vouchers discount the pre-discount
//! subtotal, so multiple vouchers are additive, never compounding.

use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::models::{Account, Voucher, VoucherId, VoucherKind};
use crate::db::repository::RepoError;

use super::POINT_VALUE;
use super::error::CheckoutError;

/// One requested code with its store lookup result attached.
#[derive(Debug)]
pub struct ResolvedVoucher {
    /// Code exactly as the client sent it
    pub code: String,
    /// Matching available voucher, if any
    pub voucher: Option<Voucher>,
}

/// Outcome of a validated voucher list.
#[derive(Debug, Clone)]
pub struct VoucherDiscount {
    /// Ids to append to the account's consumed set at settlement
    pub voucher_ids: Vec<VoucherId>,
    /// Summed discount contribution of every voucher
    pub discount: i64,
}

/// Validate the applied voucher list against the account's consumed set
/// and sum the discount contributions.
pub fn validate_vouchers(
    resolved: Vec<ResolvedVoucher>,
    account: &Account,
    subtotal: i64,
) -> Result<VoucherDiscount, CheckoutError> {
    let mut seen = HashSet::new();
    for entry in &resolved {
        if !seen.insert(entry.code.as_str()) {
            return Err(CheckoutError::InvalidVoucherList(entry.code.clone()));
        }
    }

    let mut voucher_ids = Vec::with_capacity(resolved.len());
    let mut discount: i64 = 0;

    for entry in resolved {
        let voucher = match entry.voucher {
            Some(voucher) => voucher,
            None => return Err(CheckoutError::VoucherNotFound(entry.code)),
        };
        let id = voucher.id.clone().ok_or_else(|| {
            CheckoutError::Storage(RepoError::Database(format!(
                "voucher {} has no record id",
                voucher.code
            )))
        })?;
        if account.has_used_voucher(&id) {
            return Err(CheckoutError::VoucherAlreadyUsed(entry.code));
        }

        discount += voucher_value(&voucher, subtotal);
        voucher_ids.push(id);
    }

    Ok(VoucherDiscount {
        voucher_ids,
        discount,
    })
}

/// Discount contribution of one voucher against the pre-discount subtotal.
fn voucher_value(voucher: &Voucher, subtotal: i64) -> i64 {
    match voucher.kind {
        VoucherKind::Points => voucher.value * POINT_VALUE,
        VoucherKind::Percentage => {
            // Half-up to a whole currency unit
            let share = Decimal::from(subtotal) * Decimal::from(voucher.value) / Decimal::from(100);
            share
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .unwrap_or(0)
        }
    }
}
