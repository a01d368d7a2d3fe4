use anchor_lang::prelude::*;
use anchor_lang::{AccountDeserialize, AccountSerialize, Discriminator, InstructionData, Space};

use betting_game::cpi_helpers::derive_game_authority_pda;
use betting_game::{
    calculate_payout, encode_security, instruction, resolve_outcome, BetOn, BetSide, Comparator,
    Dashboard, GameState, PlayerData, GAME_SEED, ID,
};

fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let hash = solana_sha256_hasher::hash(preimage.as_bytes()).to_bytes();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

fn empty_game() -> BetOn {
    BetOn {
        game_id: 7,
        dashboard: Pubkey::new_unique(),
        security: encode_security("SOL/USD").unwrap(),
        comparator: Comparator::GreaterThanAtExpiry,
        value: 150,
        exp: 0,
        start: 1_700_000_000,
        expiry: 1_700_000_060,
        freeze: 1_700_000_030,
        creator: Pubkey::new_unique(),
        vault: Pubkey::new_unique(),
        oracle: Pubkey::new_unique(),
        total_pot: 0,
        amount_for: 0,
        amount_against: 0,
        player_count: 0,
        players_for: 0,
        players_against: 0,
        unclaimed: 0,
        total_paid: 0,
        settled_price: 0,
        settled_at: 0,
        state: GameState::Running,
        bump: 0,
    }
}

#[test]
fn test_game_authority_pda_matches_seeds() {
    let dashboard = Pubkey::new_unique();
    let (pda, bump) = derive_game_authority_pda(&dashboard, 3, &ID);

    let expected = Pubkey::create_program_address(
        &[GAME_SEED, dashboard.as_ref(), &3u64.to_le_bytes(), &[bump]],
        &ID,
    )
    .unwrap();
    assert_eq!(pda, expected);
}

#[test]
fn test_game_authority_pda_is_unique_per_game() {
    let dashboard = Pubkey::new_unique();
    let other_dashboard = Pubkey::new_unique();

    let (first, _) = derive_game_authority_pda(&dashboard, 0, &ID);
    let (second, _) = derive_game_authority_pda(&dashboard, 1, &ID);
    let (same_id_elsewhere, _) = derive_game_authority_pda(&other_dashboard, 0, &ID);

    assert_ne!(first, second);
    assert_ne!(first, same_id_elsewhere);
    assert_eq!(derive_game_authority_pda(&dashboard, 0, &ID).0, first);
}

#[test]
fn test_instruction_discriminators() {
    assert_eq!(
        instruction::InitializeDashboard::DISCRIMINATOR,
        sighash("global", "initialize_dashboard")
    );
    assert_eq!(
        instruction::Initialize::DISCRIMINATOR,
        sighash("global", "initialize")
    );
    assert_eq!(
        instruction::AddPlayer::DISCRIMINATOR,
        sighash("global", "add_player")
    );
    assert_eq!(instruction::Execute::DISCRIMINATOR, sighash("global", "execute"));
    assert_eq!(instruction::Withdraw::DISCRIMINATOR, sighash("global", "withdraw"));
}

#[test]
fn test_add_player_instruction_data() {
    let data = instruction::AddPlayer {
        side: betting_game::PLAYER_BET_AGAINST,
        amount: 9,
    }
    .data();

    assert_eq!(data.len(), 8 + 1 + 8);
    assert_eq!(&data[..8], instruction::AddPlayer::DISCRIMINATOR);
    assert_eq!(data[8], 2);
    assert_eq!(&data[9..], &9u64.to_le_bytes());
}

#[test]
fn test_initialize_instruction_data() {
    let data = instruction::Initialize {
        security: "BTC/USD".to_string(),
        comparator: betting_game::COMPARATOR_GREATER_THAN_AT_EXPIRY,
        value: 60_000,
        exp: -2,
        expiry: 60,
        freeze: 30,
    }
    .data();

    // discriminator, string (len + bytes), comparator, value, exp, expiry, freeze
    assert_eq!(data.len(), 8 + 4 + 7 + 1 + 8 + 4 + 8 + 8);
    assert_eq!(&data[8..12], &7u32.to_le_bytes());
    assert_eq!(&data[12..19], b"BTC/USD");
    assert_eq!(data[19], 1);
    assert_eq!(&data[20..28], &60_000u64.to_le_bytes());
    assert_eq!(&data[28..32], &(-2i32).to_le_bytes());
}

#[test]
fn test_account_space() {
    assert_eq!(Dashboard::INIT_SPACE, 32 + 32 + 8);
    assert_eq!(PlayerData::INIT_SPACE, 32 + 32 + 8 + 1 + 8 + 8);
    assert_eq!(BetOn::INIT_SPACE, 257);

    assert_eq!(BetOn::DISCRIMINATOR, sighash("account", "BetOn"));
    assert_eq!(PlayerData::DISCRIMINATOR, sighash("account", "PlayerData"));
}

#[test]
fn test_game_account_fits_allocation() {
    let mut game = empty_game();
    game.total_pot = u64::MAX;
    game.settled_price = i128::MIN;
    game.state = GameState::AgainstWins;

    let mut buf = Vec::new();
    game.try_serialize(&mut buf).unwrap();
    assert_eq!(buf.len(), 8 + BetOn::INIT_SPACE);

    let decoded = BetOn::try_deserialize(&mut buf.as_slice()).unwrap();
    assert_eq!(decoded.security_str(), "SOL/USD");
    assert_eq!(decoded.settled_price, i128::MIN);
    assert_eq!(decoded.state, GameState::AgainstWins);
}

#[test]
fn test_payouts_conserve_pot() {
    let mut game = empty_game();
    let stakes = [
        (BetSide::For, 1_000),
        (BetSide::For, 333),
        (BetSide::For, 7),
        (BetSide::Against, 2_500),
        (BetSide::Against, 1),
    ];
    for (side, amount) in stakes {
        game.record_entry(side, amount).unwrap();
    }
    assert_eq!(game.total_pot, game.amount_for + game.amount_against);

    // price ended above the threshold, "for" backed a rise
    game.state = resolve_outcome(game.comparator, true, game.amount_for, game.amount_against);
    assert_eq!(game.state, GameState::ForWins);
    assert_eq!(game.claimable_entries(), 3);

    let mut paid = 0u64;
    for (side, amount) in stakes {
        match calculate_payout(
            game.state,
            side,
            amount,
            game.total_pot,
            game.amount_for,
            game.amount_against,
        ) {
            Ok(payout) => {
                assert!(payout >= amount);
                paid += payout;
            }
            Err(_) => assert_eq!(side, BetSide::Against),
        }
    }

    let dust = game.total_pot - paid;
    assert!(dust < game.players_for as u64);
}

#[test]
fn test_failed_game_refunds_every_stake() {
    let mut game = empty_game();
    game.record_entry(BetSide::Against, 40).unwrap();
    game.record_entry(BetSide::Against, 2).unwrap();

    // nobody backed the winning side
    game.state = resolve_outcome(game.comparator, true, game.amount_for, game.amount_against);
    assert_eq!(game.state, GameState::Failed);
    assert_eq!(game.claimable_entries(), 2);

    let refunds: u64 = [40, 2]
        .iter()
        .map(|amount| {
            calculate_payout(
                game.state,
                BetSide::Against,
                *amount,
                game.total_pot,
                game.amount_for,
                game.amount_against,
            )
            .unwrap()
        })
        .sum();
    assert_eq!(refunds, game.total_pot);
}
