//! Switchboard on-demand price feeds.
//!
//! A pull feed keeps the median of its oracle submissions as an `i128`
//! scaled by `10^18`, stamped with the slot the median was signed at.
//! Games compare that value against their own `value * 10^exp` threshold
//! without leaving integer arithmetic.

use anchor_lang::prelude::*;
use switchboard_on_demand::PullFeedAccountData;

use crate::BettingError;

/// Decimal places of a pull feed result.
pub const FEED_DECIMALS: i32 = 18;

/// Current result of a pull feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OraclePrice {
    pub value: i128,
    pub slot: u64,
}

/// Program that owns pull feed accounts. Built with the `devnet` feature
/// this is the devnet deployment.
pub fn feed_program_id() -> Pubkey {
    let owner = <PullFeedAccountData as switchboard_on_demand::anchor_traits::Owner>::owner();
    Pubkey::new_from_array(owner.to_bytes())
}

/// Pull feeds are only trusted when the Switchboard program owns them.
pub fn check_feed_owner(feed: &AccountInfo) -> Result<()> {
    require_keys_eq!(*feed.owner, feed_program_id(), BettingError::OracleError);
    Ok(())
}

/// Fails unless `feed` holds a Switchboard pull feed.
pub fn ensure_feed(feed: &AccountInfo) -> Result<()> {
    check_feed_owner(feed)?;
    let data = feed.try_borrow_data()?;
    PullFeedAccountData::parse(data).map_err(|_| BettingError::OracleError)?;
    Ok(())
}

/// Read the feed result, rejecting feeds that were never updated or whose
/// result fell out of the feed's own staleness window.
pub fn load_feed_price(feed: &AccountInfo, current_slot: u64) -> Result<OraclePrice> {
    check_feed_owner(feed)?;
    let data = feed.try_borrow_data()?;
    let feed_data = PullFeedAccountData::parse(data).map_err(|_| BettingError::OracleError)?;

    let price = OraclePrice {
        value: feed_data.result.value,
        slot: feed_data.result.slot,
    };
    check_freshness(&price, feed_data.max_staleness as u64, current_slot)?;

    msg!("Feed price {} at slot {}", price.value, price.slot);
    Ok(price)
}

pub fn check_freshness(price: &OraclePrice, max_staleness: u64, current_slot: u64) -> Result<()> {
    require!(price.slot != 0, BettingError::OracleError);
    let oldest_accepted = current_slot.saturating_sub(max_staleness);
    require!(price.slot >= oldest_accepted, BettingError::StaleOracle);
    Ok(())
}

/// `price * 10^-18 > value * 10^exp`, exactly.
///
/// A side of the comparison that overflows `i128` is larger in magnitude
/// than anything the other side can hold, which decides the result.
pub fn price_exceeds_threshold(price: i128, value: u64, exp: i32) -> bool {
    let shift = exp as i64 + FEED_DECIMALS as i64;

    if shift >= 0 {
        let threshold = u32::try_from(shift)
            .ok()
            .and_then(|s| 10i128.checked_pow(s))
            .and_then(|scale| (value as i128).checked_mul(scale));
        match threshold {
            Some(threshold) => price > threshold,
            None => false,
        }
    } else {
        let scaled_price = u32::try_from(shift.unsigned_abs())
            .ok()
            .and_then(|s| 10i128.checked_pow(s))
            .and_then(|scale| price.checked_mul(scale));
        match scaled_price {
            Some(scaled_price) => scaled_price > value as i128,
            None => price > 0,
        }
    }
}
