use anchor_lang::prelude::*;
use anchor_spl::token::{
    self, spl_token::instruction::AuthorityType, CloseAccount, SetAuthority, Token, TokenAccount,
    Transfer,
};

pub mod cpi_helpers;
pub mod oracle;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Seed prefix of the per-game authority that owns the vault.
pub const GAME_SEED: &[u8] = b"BET_ON";

/// Bytes reserved for the security symbol, e.g. `BTC/USD`.
pub const SECURITY_LEN: usize = 10;

/// Largest magnitude accepted for a threshold exponent.
pub const MAX_EXPONENT: i32 = 18;

// Comparators
pub const COMPARATOR_LESS_THAN_AT_EXPIRY: u8 = 0;
pub const COMPARATOR_GREATER_THAN_AT_EXPIRY: u8 = 1;

// Player bets
pub const PLAYER_BET_FOR: u8 = 1;
pub const PLAYER_BET_AGAINST: u8 = 2;

/// Betting Game
/// Two-sided pari-mutuel wagers on whether a security ends above or below
/// a threshold, settled against a Switchboard on-demand feed.

#[program]
pub mod betting_game {
    use super::*;

    /// Initialize a dashboard that numbers the games created under it.
    /// The account is allocated by the client beforehand.
    pub fn initialize_dashboard(ctx: Context<InitializeDashboard>) -> Result<()> {
        let dashboard_key = ctx.accounts.dashboard.key();

        let dashboard = &mut ctx.accounts.dashboard;
        dashboard.authority = ctx.accounts.authority.key();
        dashboard.address = dashboard_key;
        dashboard.count = 0;

        emit!(DashboardInitialized {
            dashboard: dashboard_key,
            authority: dashboard.authority,
        });

        Ok(())
    }

    /// Create a game
    /// security: feed symbol, at most 10 bytes (e.g. "BTC/USD")
    /// comparator: 0 = for wins below threshold, 1 = for wins above
    /// value, exp: threshold is value * 10^exp
    /// expiry, freeze: seconds from now until settlement / end of betting
    pub fn initialize(
        ctx: Context<Initialize>,
        security: String,
        comparator: u8,
        value: u64,
        exp: i32,
        expiry: u64,
        freeze: u64,
    ) -> Result<()> {
        msg!("Started");
        validate_schedule(expiry, freeze)?;
        let comparator = Comparator::try_from(comparator)?;
        let security_bytes = encode_security(&security)?;
        require!(
            exp.unsigned_abs() <= MAX_EXPONENT as u32,
            BettingError::InvalidExponent
        );
        oracle::ensure_feed(&ctx.accounts.oracle.to_account_info())?;

        let clock = Clock::get()?;
        let start = clock.unix_timestamp;
        let expiry_at = offset_timestamp(start, expiry)?;
        let freeze_at = offset_timestamp(start, freeze)?;

        let dashboard_key = ctx.accounts.dashboard.key();
        let dashboard = &mut ctx.accounts.dashboard;
        let game_id = dashboard.count;
        dashboard.count = dashboard
            .count
            .checked_add(1)
            .ok_or(BettingError::Overflow)?;

        let (pda, bump) =
            cpi_helpers::derive_game_authority_pda(&dashboard_key, game_id, ctx.program_id);

        let game_key = ctx.accounts.bet_on.key();
        let game = &mut ctx.accounts.bet_on;
        game.game_id = game_id;
        game.dashboard = dashboard_key;
        game.security = security_bytes;
        game.comparator = comparator;
        game.value = value;
        game.exp = exp;
        game.start = start;
        game.expiry = expiry_at;
        game.freeze = freeze_at;
        game.creator = ctx.accounts.creator.key();
        game.vault = ctx.accounts.vault.key();
        game.oracle = ctx.accounts.oracle.key();
        game.total_pot = 0;
        game.amount_for = 0;
        game.amount_against = 0;
        game.player_count = 0;
        game.players_for = 0;
        game.players_against = 0;
        game.unclaimed = 0;
        game.total_paid = 0;
        game.settled_price = 0;
        game.settled_at = 0;
        game.state = GameState::Running;
        game.bump = bump;

        msg!("Initialized game {}, moving vault authority to {}", game_id, pda);

        // The game authority owns the vault from here on
        let cpi_context = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            SetAuthority {
                current_authority: ctx.accounts.creator.to_account_info(),
                account_or_mint: ctx.accounts.vault.to_account_info(),
            },
        );
        token::set_authority(cpi_context, AuthorityType::AccountOwner, Some(pda))?;

        emit!(GameCreated {
            game: game_key,
            game_id,
            dashboard: dashboard_key,
            creator: ctx.accounts.creator.key(),
            security,
            comparator,
            value,
            exp,
            start,
            expiry: expiry_at,
            freeze: freeze_at,
            vault: ctx.accounts.vault.key(),
            oracle: ctx.accounts.oracle.key(),
        });

        Ok(())
    }

    /// Stake `amount` tokens for (1) or against (2) the game's proposition
    pub fn add_player(ctx: Context<AddPlayer>, side: u8, amount: u64) -> Result<()> {
        let side = BetSide::try_from(side)?;
        require!(amount > 0, BettingError::InvalidAmount);

        let clock = Clock::get()?;
        let game = &ctx.accounts.bet_on;
        require!(
            betting_open(clock.unix_timestamp, game.freeze, game.expiry),
            BettingError::BettingFrozen
        );

        // Transfer stake to the vault
        let cpi_context = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.player_token.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.player.to_account_info(),
            },
        );
        token::transfer(cpi_context, amount)?;

        let game_key = ctx.accounts.bet_on.key();
        let player_key = ctx.accounts.player.key();

        let game = &mut ctx.accounts.bet_on;
        game.record_entry(side, amount)?;
        let game_id = game.game_id;
        let total_pot = game.total_pot;
        let amount_for = game.amount_for;
        let amount_against = game.amount_against;

        let entry = &mut ctx.accounts.player_data;
        entry.key = player_key;
        entry.game = game_key;
        entry.game_id = game_id;
        entry.side = side;
        entry.amount = amount;
        entry.created_at = clock.unix_timestamp;

        emit!(PlayerAdded {
            game: game_key,
            player: player_key,
            entry: ctx.accounts.player_data.key(),
            side,
            amount,
            total_pot,
            amount_for,
            amount_against,
        });

        Ok(())
    }

    /// Settle an expired game against its price feed. Anyone may call.
    #[access_control(can_execute(&ctx.accounts.bet_on))]
    pub fn execute(ctx: Context<Execute>, security: String) -> Result<()> {
        let game = &ctx.accounts.bet_on;
        require!(
            security_matches(&game.security, &security),
            BettingError::SecurityMismatch
        );

        let clock = Clock::get()?;
        let price = oracle::load_feed_price(&ctx.accounts.oracle.to_account_info(), clock.slot)?;
        let above = oracle::price_exceeds_threshold(price.value, game.value, game.exp);
        let state = resolve_outcome(game.comparator, above, game.amount_for, game.amount_against);

        let game_key = ctx.accounts.bet_on.key();
        let game = &mut ctx.accounts.bet_on;
        game.state = state;
        game.unclaimed = game.claimable_entries();
        game.settled_price = price.value;
        game.settled_at = clock.unix_timestamp;

        msg!(
            "Game {} on {} settled: {:?}, {} entries to pay",
            game.game_id,
            game.security_str(),
            state,
            game.unclaimed
        );

        emit!(GameSettled {
            game: game_key,
            state,
            price: price.value,
            price_slot: price.slot,
            amount_for: game.amount_for,
            amount_against: game.amount_against,
            unclaimed: game.unclaimed,
        });

        Ok(())
    }

    /// Pay out a winning (or refunded) entry and close it
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        let game = &ctx.accounts.bet_on;
        let entry = &ctx.accounts.player_data;

        let payout = calculate_payout(
            game.state,
            entry.side,
            entry.amount,
            game.total_pot,
            game.amount_for,
            game.amount_against,
        )?;
        require!(
            ctx.accounts.vault.amount >= payout,
            BettingError::InsufficientVaultBalance
        );

        let dashboard_key = game.dashboard;
        let game_id_bytes = game.game_id.to_le_bytes();
        let bump = [game.bump];
        let seeds = &[GAME_SEED, dashboard_key.as_ref(), &game_id_bytes, &bump];
        let signer = &[&seeds[..]];

        if payout > 0 {
            let cpi_context = CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.player_token.to_account_info(),
                    authority: ctx.accounts.pda.to_account_info(),
                },
                signer,
            );
            token::transfer(cpi_context, payout)?;
        }

        let stake = ctx.accounts.player_data.amount;
        let side = ctx.accounts.player_data.side;
        let game_key = ctx.accounts.bet_on.key();

        let game = &mut ctx.accounts.bet_on;
        game.unclaimed = game
            .unclaimed
            .checked_sub(1)
            .ok_or(BettingError::Overflow)?;
        game.total_paid = game
            .total_paid
            .checked_add(payout)
            .ok_or(BettingError::Overflow)?;

        emit!(WinningsWithdrawn {
            game: game_key,
            player: ctx.accounts.player.key(),
            side,
            stake,
            payout,
            unclaimed: game.unclaimed,
        });

        Ok(())
    }

    /// Close a losing entry to reclaim its rent
    pub fn close_losing_entry(ctx: Context<CloseLosingEntry>) -> Result<()> {
        let game = &ctx.accounts.bet_on;
        let entry = &ctx.accounts.player_data;
        require!(
            is_losing_entry(game.state, entry.side),
            BettingError::NotALoser
        );

        emit!(LosingEntryClosed {
            game: ctx.accounts.bet_on.key(),
            player: ctx.accounts.player.key(),
            side: entry.side,
            stake: entry.amount,
        });

        Ok(())
    }

    /// Close a settled game once every payable entry was paid.
    /// Whatever is left in the vault (rounding remainders) goes to the creator,
    /// together with the rent of the vault and the game account.
    pub fn close_game(ctx: Context<CloseGame>) -> Result<()> {
        let game = &ctx.accounts.bet_on;
        let dashboard_key = game.dashboard;
        let game_id = game.game_id;
        let game_id_bytes = game_id.to_le_bytes();
        let bump = [game.bump];
        let seeds = &[GAME_SEED, dashboard_key.as_ref(), &game_id_bytes, &bump];
        let signer = &[&seeds[..]];

        let swept = ctx.accounts.vault.amount;
        if swept > 0 {
            let cpi_context = CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.creator_token.to_account_info(),
                    authority: ctx.accounts.pda.to_account_info(),
                },
                signer,
            );
            token::transfer(cpi_context, swept)?;
        }

        let cpi_context = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            CloseAccount {
                account: ctx.accounts.vault.to_account_info(),
                destination: ctx.accounts.creator.to_account_info(),
                authority: ctx.accounts.pda.to_account_info(),
            },
            signer,
        );
        token::close_account(cpi_context)?;

        let total_paid = ctx.accounts.bet_on.total_paid;
        msg!(
            "Closed game {}, paid {} to players, swept {}",
            game_id,
            total_paid,
            swept
        );

        emit!(GameClosed {
            game: ctx.accounts.bet_on.key(),
            creator: ctx.accounts.creator.key(),
            total_paid,
            swept,
        });

        Ok(())
    }
}

// === Helper Functions ===

fn can_execute(bet_on: &BetOn) -> Result<()> {
    let clock = Clock::get()?;
    require!(
        clock.unix_timestamp >= bet_on.expiry,
        BettingError::BetNotExpired
    );
    Ok(())
}

/// Both offsets must be set and betting must close no later than expiry.
pub fn validate_schedule(expiry: u64, freeze: u64) -> Result<()> {
    if freeze == 0 || expiry == 0 {
        msg!("Freezing or expiry offset is 0");
        return err!(BettingError::CannotInitiate);
    }
    if freeze > expiry {
        msg!("Freezed after expiry");
        return err!(BettingError::CannotInitiate);
    }
    Ok(())
}

pub fn offset_timestamp(start: i64, offset: u64) -> Result<i64> {
    i64::try_from(offset)
        .ok()
        .and_then(|offset| start.checked_add(offset))
        .ok_or_else(|| BettingError::Overflow.into())
}

/// Zero-padded symbol bytes.
pub fn encode_security(security: &str) -> Result<[u8; SECURITY_LEN]> {
    let bytes = security.as_bytes();
    require!(
        !bytes.is_empty() && bytes.len() <= SECURITY_LEN,
        BettingError::InvalidSecurity
    );
    let mut encoded = [0u8; SECURITY_LEN];
    encoded[..bytes.len()].copy_from_slice(bytes);
    Ok(encoded)
}

pub fn security_matches(stored: &[u8; SECURITY_LEN], security: &str) -> bool {
    encode_security(security)
        .map(|encoded| encoded == *stored)
        .unwrap_or(false)
}

/// The game PDA becomes the vault's only authority once it takes custody,
/// so nobody else may be left able to move or close it.
pub fn vault_is_unencumbered(vault: &token::spl_token::state::Account) -> bool {
    vault.delegate.is_none() && vault.close_authority.is_none()
}

pub fn betting_open(now: i64, freeze: i64, expiry: i64) -> bool {
    now <= freeze && now <= expiry
}

/// Winner of a game given whether the feed ended strictly above the
/// threshold. A winning side nobody staked on fails the game.
pub fn resolve_outcome(
    comparator: Comparator,
    above: bool,
    amount_for: u64,
    amount_against: u64,
) -> GameState {
    let for_wins = match comparator {
        Comparator::LessThanAtExpiry => !above,
        Comparator::GreaterThanAtExpiry => above,
    };

    let (state, winning_pool) = if for_wins {
        (GameState::ForWins, amount_for)
    } else {
        (GameState::AgainstWins, amount_against)
    };

    if winning_pool == 0 {
        GameState::Failed
    } else {
        state
    }
}

pub fn is_winning_entry(state: GameState, side: BetSide) -> bool {
    matches!(
        (state, side),
        (GameState::ForWins, BetSide::For) | (GameState::AgainstWins, BetSide::Against)
    )
}

pub fn is_losing_entry(state: GameState, side: BetSide) -> bool {
    matches!(
        (state, side),
        (GameState::ForWins, BetSide::Against) | (GameState::AgainstWins, BetSide::For)
    )
}

/// Winners share the whole pot pro-rata to their stake; a failed game
/// refunds every stake.
pub fn calculate_payout(
    state: GameState,
    side: BetSide,
    amount: u64,
    total_pot: u64,
    amount_for: u64,
    amount_against: u64,
) -> Result<u64> {
    match state {
        GameState::Running => err!(BettingError::GameNotSettled),
        GameState::Failed => Ok(amount),
        GameState::ForWins | GameState::AgainstWins => {
            require!(is_winning_entry(state, side), BettingError::NotAWinner);
            let winning_pool = match side {
                BetSide::For => amount_for,
                BetSide::Against => amount_against,
            };
            require!(winning_pool > 0, BettingError::NotAWinner);

            let payout = (amount as u128)
                .checked_mul(total_pot as u128)
                .ok_or(BettingError::Overflow)?
                .checked_div(winning_pool as u128)
                .ok_or(BettingError::Overflow)?;
            u64::try_from(payout).map_err(|_| BettingError::Overflow.into())
        }
    }
}

// === Account Structures ===

#[derive(Accounts)]
pub struct InitializeDashboard<'info> {
    #[account(zero)]
    pub dashboard: Account<'info, Dashboard>,

    pub authority: Signer<'info>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(mut)]
    pub dashboard: Account<'info, Dashboard>,

    #[account(
        mut,
        constraint = vault.owner == creator.key() @ BettingError::VaultNotOwnedByCreator,
        constraint = vault.amount == 0 @ BettingError::VaultNotEmpty,
        constraint = vault_is_unencumbered(&vault) @ BettingError::VaultEncumbered
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        space = 8 + BetOn::INIT_SPACE
    )]
    pub bet_on: Account<'info, BetOn>,

    /// CHECK: Parsed as a Switchboard pull feed by the handler
    pub oracle: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct AddPlayer<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        mut,
        constraint = player_token.owner == player.key() @ BettingError::NotEntryOwner,
        constraint = player_token.mint == vault.mint @ BettingError::MintMismatch
    )]
    pub player_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = bet_on.state == GameState::Running @ BettingError::GameNotRunning
    )]
    pub bet_on: Account<'info, BetOn>,

    #[account(
        mut,
        address = bet_on.vault @ BettingError::InvalidVault,
        constraint = vault.owner == pda.key() @ BettingError::InvalidVault
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = player,
        space = 8 + PlayerData::INIT_SPACE
    )]
    pub player_data: Account<'info, PlayerData>,

    /// CHECK: Game authority PDA, owner of the vault
    #[account(
        seeds = [GAME_SEED, bet_on.dashboard.as_ref(), &bet_on.game_id.to_le_bytes()],
        bump = bet_on.bump
    )]
    pub pda: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct Execute<'info> {
    pub executor: Signer<'info>,

    #[account(
        mut,
        constraint = bet_on.state == GameState::Running @ BettingError::GameNotRunning
    )]
    pub bet_on: Account<'info, BetOn>,

    /// CHECK: Must be the feed the game was created with; parsed by the handler
    #[account(address = bet_on.oracle @ BettingError::OracleMismatch)]
    pub oracle: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        mut,
        constraint = player_token.owner == player.key() @ BettingError::NotEntryOwner,
        constraint = player_token.mint == vault.mint @ BettingError::MintMismatch
    )]
    pub player_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = bet_on.state != GameState::Running @ BettingError::GameNotSettled
    )]
    pub bet_on: Account<'info, BetOn>,

    #[account(
        mut,
        close = player,
        constraint = player_data.key == player.key() @ BettingError::NotEntryOwner,
        constraint = player_data.game == bet_on.key() @ BettingError::WrongGame
    )]
    pub player_data: Account<'info, PlayerData>,

    #[account(
        mut,
        address = bet_on.vault @ BettingError::InvalidVault,
        constraint = vault.owner == pda.key() @ BettingError::InvalidVault
    )]
    pub vault: Account<'info, TokenAccount>,

    /// CHECK: Game authority PDA, signs the payout
    #[account(
        seeds = [GAME_SEED, bet_on.dashboard.as_ref(), &bet_on.game_id.to_le_bytes()],
        bump = bet_on.bump
    )]
    pub pda: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct CloseLosingEntry<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        constraint = bet_on.state != GameState::Running @ BettingError::GameNotSettled
    )]
    pub bet_on: Account<'info, BetOn>,

    #[account(
        mut,
        close = player,
        constraint = player_data.key == player.key() @ BettingError::NotEntryOwner,
        constraint = player_data.game == bet_on.key() @ BettingError::WrongGame
    )]
    pub player_data: Account<'info, PlayerData>,
}

#[derive(Accounts)]
pub struct CloseGame<'info> {
    #[account(
        mut,
        address = bet_on.creator @ BettingError::Unauthorized
    )]
    pub creator: Signer<'info>,

    #[account(
        mut,
        constraint = creator_token.owner == creator.key() @ BettingError::Unauthorized,
        constraint = creator_token.mint == vault.mint @ BettingError::MintMismatch
    )]
    pub creator_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        close = creator,
        constraint = bet_on.state != GameState::Running @ BettingError::GameNotSettled,
        constraint = bet_on.unclaimed == 0 @ BettingError::UnclaimedEntries
    )]
    pub bet_on: Account<'info, BetOn>,

    #[account(
        mut,
        address = bet_on.vault @ BettingError::InvalidVault,
        constraint = vault.owner == pda.key() @ BettingError::InvalidVault
    )]
    pub vault: Account<'info, TokenAccount>,

    /// CHECK: Game authority PDA, owner of the vault
    #[account(
        seeds = [GAME_SEED, bet_on.dashboard.as_ref(), &bet_on.game_id.to_le_bytes()],
        bump = bet_on.bump
    )]
    pub pda: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

// === State Accounts ===

#[account]
#[derive(InitSpace)]
pub struct Dashboard {
    pub authority: Pubkey,
    pub address: Pubkey,
    pub count: u64,
}

#[account]
#[derive(InitSpace)]
pub struct BetOn {
    pub game_id: u64,
    pub dashboard: Pubkey,
    pub security: [u8; SECURITY_LEN],
    pub comparator: Comparator,
    pub value: u64,
    pub exp: i32,
    pub start: i64,
    pub expiry: i64,
    pub freeze: i64,
    pub creator: Pubkey,
    pub vault: Pubkey,
    pub oracle: Pubkey,
    pub total_pot: u64,
    pub amount_for: u64,
    pub amount_against: u64,
    pub player_count: u32,
    pub players_for: u32,
    pub players_against: u32,
    pub unclaimed: u32,         // Entries still owed a payout after settlement
    pub total_paid: u64,        // Sum of withdrawals, refunds included
    pub settled_price: i128,    // Feed value at settlement, 18 decimals
    pub settled_at: i64,
    pub state: GameState,
    pub bump: u8,
}

impl BetOn {
    pub fn record_entry(&mut self, side: BetSide, amount: u64) -> Result<()> {
        match side {
            BetSide::For => {
                self.amount_for = self
                    .amount_for
                    .checked_add(amount)
                    .ok_or(BettingError::Overflow)?;
                self.players_for = self
                    .players_for
                    .checked_add(1)
                    .ok_or(BettingError::Overflow)?;
            }
            BetSide::Against => {
                self.amount_against = self
                    .amount_against
                    .checked_add(amount)
                    .ok_or(BettingError::Overflow)?;
                self.players_against = self
                    .players_against
                    .checked_add(1)
                    .ok_or(BettingError::Overflow)?;
            }
        }
        self.total_pot = self
            .total_pot
            .checked_add(amount)
            .ok_or(BettingError::Overflow)?;
        self.player_count = self
            .player_count
            .checked_add(1)
            .ok_or(BettingError::Overflow)?;
        Ok(())
    }

    /// Entries entitled to a withdrawal in the current state.
    pub fn claimable_entries(&self) -> u32 {
        match self.state {
            GameState::Running => 0,
            GameState::ForWins => self.players_for,
            GameState::AgainstWins => self.players_against,
            GameState::Failed => self.player_count,
        }
    }

    pub fn security_str(&self) -> &str {
        let len = self
            .security
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(SECURITY_LEN);
        std::str::from_utf8(&self.security[..len]).unwrap_or("")
    }
}

#[account]
#[derive(InitSpace)]
pub struct PlayerData {
    pub key: Pubkey,
    pub game: Pubkey,
    pub game_id: u64,
    pub side: BetSide,
    pub amount: u64,
    pub created_at: i64,
}

// === Types ===

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum Comparator {
    LessThanAtExpiry,
    GreaterThanAtExpiry,
}

impl TryFrom<u8> for Comparator {
    type Error = anchor_lang::error::Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            COMPARATOR_LESS_THAN_AT_EXPIRY => Ok(Comparator::LessThanAtExpiry),
            COMPARATOR_GREATER_THAN_AT_EXPIRY => Ok(Comparator::GreaterThanAtExpiry),
            _ => {
                msg!("Unknown comparator {}", code);
                err!(BettingError::UnknownComparator)
            }
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum BetSide {
    For,
    Against,
}

impl TryFrom<u8> for BetSide {
    type Error = anchor_lang::error::Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            PLAYER_BET_FOR => Ok(BetSide::For),
            PLAYER_BET_AGAINST => Ok(BetSide::Against),
            _ => err!(BettingError::UnknownBet),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum GameState {
    Running,
    ForWins,
    AgainstWins,
    Failed,
}

// === Events ===

#[event]
pub struct DashboardInitialized {
    pub dashboard: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct GameCreated {
    pub game: Pubkey,
    pub game_id: u64,
    pub dashboard: Pubkey,
    pub creator: Pubkey,
    pub security: String,
    pub comparator: Comparator,
    pub value: u64,
    pub exp: i32,
    pub start: i64,
    pub expiry: i64,
    pub freeze: i64,
    pub vault: Pubkey,
    pub oracle: Pubkey,
}

#[event]
pub struct PlayerAdded {
    pub game: Pubkey,
    pub player: Pubkey,
    pub entry: Pubkey,
    pub side: BetSide,
    pub amount: u64,
    pub total_pot: u64,
    pub amount_for: u64,
    pub amount_against: u64,
}

#[event]
pub struct GameSettled {
    pub game: Pubkey,
    pub state: GameState,
    pub price: i128,
    pub price_slot: u64,
    pub amount_for: u64,
    pub amount_against: u64,
    pub unclaimed: u32,
}

#[event]
pub struct WinningsWithdrawn {
    pub game: Pubkey,
    pub player: Pubkey,
    pub side: BetSide,
    pub stake: u64,
    pub payout: u64,
    pub unclaimed: u32,
}

#[event]
pub struct LosingEntryClosed {
    pub game: Pubkey,
    pub player: Pubkey,
    pub side: BetSide,
    pub stake: u64,
}

#[event]
pub struct GameClosed {
    pub game: Pubkey,
    pub creator: Pubkey,
    pub total_paid: u64,
    pub swept: u64,
}

// === Errors ===

#[error_code]
pub enum BettingError {
    #[msg("You are Unauthorized")]
    Unauthorized,
    #[msg("Betting frozen")]
    BettingFrozen,
    #[msg("Cannot initiate: freeze and expiry offsets must be set, freeze no later than expiry")]
    CannotInitiate,
    #[msg("Unknown comparator")]
    UnknownComparator,
    #[msg("Security symbol must be 1-10 bytes")]
    InvalidSecurity,
    #[msg("Threshold exponent out of range")]
    InvalidExponent,
    #[msg("Unknown Bet")]
    UnknownBet,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Cannot execute yet bet is not expired")]
    BetNotExpired,
    #[msg("Game is not running")]
    GameNotRunning,
    #[msg("Game has not been settled")]
    GameNotSettled,
    #[msg("Security does not match the game")]
    SecurityMismatch,
    #[msg("Oracle does not match the game")]
    OracleMismatch,
    #[msg("Error Getting Prices")]
    OracleError,
    #[msg("Oracle price is stale")]
    StaleOracle,
    #[msg("Vault does not belong to this game")]
    InvalidVault,
    #[msg("Vault must be owned by the creator")]
    VaultNotOwnedByCreator,
    #[msg("Vault must be empty")]
    VaultNotEmpty,
    #[msg("Vault must not have a delegate or close authority")]
    VaultEncumbered,
    #[msg("Token mint does not match the vault")]
    MintMismatch,
    #[msg("Not the entry owner")]
    NotEntryOwner,
    #[msg("Entry belongs to another game")]
    WrongGame,
    #[msg("Your bet did not win")]
    NotAWinner,
    #[msg("Entry is owed a payout")]
    NotALoser,
    #[msg("Some entries have not withdrawn yet")]
    UnclaimedEntries,
    #[msg("Vault has insufficient balance for this payout")]
    InsufficientVaultBalance,
    #[msg("Arithmetic overflow")]
    Overflow,
}
