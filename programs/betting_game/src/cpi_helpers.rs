//! CPI (Cross-Program Invocation) helpers for the Betting Game
//!
//! Other Solana programs call the Betting Game through the Anchor-generated
//! `cpi` module (enable the `cpi` feature). This module derives the
//! addresses they have to pass along.
//!
//! # Example
//!
//! ```ignore
//! use betting_game::cpi;
//! use betting_game::cpi::accounts::AddPlayer;
//!
//! // In your program's instruction handler:
//! let cpi_accounts = AddPlayer {
//!     player: ctx.accounts.player.to_account_info(),
//!     player_token: ctx.accounts.player_token.to_account_info(),
//!     bet_on: ctx.accounts.bet_on.to_account_info(),
//!     vault: ctx.accounts.vault.to_account_info(),
//!     player_data: ctx.accounts.player_data.to_account_info(),
//!     pda: ctx.accounts.game_authority.to_account_info(),
//!     system_program: ctx.accounts.system_program.to_account_info(),
//!     token_program: ctx.accounts.token_program.to_account_info(),
//! };
//!
//! let cpi_ctx = CpiContext::new(ctx.accounts.betting_program.to_account_info(), cpi_accounts);
//! betting_game::cpi::add_player(cpi_ctx, betting_game::PLAYER_BET_FOR, amount)?;
//! ```

use anchor_lang::prelude::*;

use crate::GAME_SEED;

/// Derive the game authority PDA address
/// (seeds: "BET_ON", dashboard, game id as u64 LE)
pub fn derive_game_authority_pda(
    dashboard: &Pubkey,
    game_id: u64,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[GAME_SEED, dashboard.as_ref(), &game_id.to_le_bytes()],
        program_id,
    )
}
