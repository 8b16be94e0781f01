use gemhall_core::{
    affordable_cards, legal_actions, DevelopmentCard, Event, GameState, GameStatus, PlayerState,
    Tier,
};

pub fn print_help() {
    println!("== Commands ==");
    println!("  take <color>... [return <color>...]   e.g. take d s e | take 2r | take r o e return g");
    println!("  reserve <card-id> [return ...]        reserve a face-up card");
    println!("  reserve deck <1-3> [return ...]       reserve blind from a deck");
    println!("  buy <card-id>                          buy from the board or your reserve");
    println!("  board | state [--json] | log | hint");
    println!("  reset | new | help | quit");
    println!("colors: d(iamond) s(apphire) e(merald) r(uby) o(nyx) g(old)");
}

pub fn print_board(state: &GameState) {
    println!("== Board ==");
    for tier in Tier::ALL.into_iter().rev() {
        let slots: Vec<String> = state
            .board
            .row(tier)
            .iter()
            .map(|slot| match slot {
                Some(card) => card_label(card),
                None => "(empty)".to_string(),
            })
            .collect();
        println!(
            "tier {tier} [{:>2} left] {}",
            state.deck_len(tier),
            slots.join(" | ")
        );
    }
    let nobles: Vec<String> = state
        .nobles
        .iter()
        .map(|noble| format!("{} {}pt <{}>", noble.id, noble.points, noble.cost))
        .collect();
    println!("nobles: {}", nobles.join(" | "));
    println!("bank: {}", state.bank);
}

pub fn print_state(state: &GameState) {
    print_board(state);
    println!("== Players ==");
    for (seat, player) in state.players.iter().enumerate() {
        let marker = if seat == state.current_player_index && state.status == GameStatus::Playing {
            ">"
        } else {
            " "
        };
        print_player(marker, player);
    }
    println!(
        "turn {} | target {} points{}",
        state.turn,
        state.target_points,
        match state.final_round_trigger.as_deref() {
            Some(id) => format!(" | final round (triggered by {id})"),
            None => String::new(),
        }
    );
    if state.status == GameStatus::Finished {
        println!("winners: {}", state.winner_ids.join(", "));
    }
}

fn print_player(marker: &str, player: &PlayerState) {
    println!(
        "{marker} {} ({}) {} pts | tokens {} [{}] | bonus {} | nobles {}",
        player.name,
        player.id,
        player.points,
        player.tokens,
        player.token_total(),
        player.discounts,
        player.nobles.len()
    );
    if !player.reserved.is_empty() {
        let reserved: Vec<String> = player.reserved.iter().map(card_label).collect();
        println!("    reserved: {}", reserved.join(" | "));
    }
}

fn card_label(card: &DevelopmentCard) -> String {
    format!(
        "{} {}/{}pt <{}>",
        card.id,
        card.gem.name(),
        card.points,
        card.cost
    )
}

pub fn print_log(state: &GameState) {
    println!("== Log (newest first) ==");
    for entry in &state.logs {
        println!(
            "#{:<3} turn {:<3} [{}] {}",
            entry.seq, entry.turn, entry.player_id, entry.message
        );
    }
}

pub fn print_hint(state: &GameState) {
    let Some(player) = state.current_player() else {
        println!("no game in progress");
        return;
    };
    let affordable: Vec<String> = affordable_cards(state, &player.id)
        .iter()
        .map(|source| source.card_id().to_string())
        .collect();
    if affordable.is_empty() {
        println!("{} cannot afford any card yet", player.name);
    } else {
        println!("{} can buy: {}", player.name, affordable.join(", "));
    }
    println!("{} legal actions available", legal_actions(state).len());
}

pub fn print_prompt_header(state: &GameState) {
    match state.status {
        GameStatus::Setup => println!("no game; type 'new' to start"),
        GameStatus::Finished => println!("game over; type 'new' for a rematch"),
        GameStatus::Playing => {
            if let Some(player) = state.current_player() {
                println!(
                    "-- {}'s turn ({} pts, {} tokens) --",
                    player.name,
                    player.points,
                    player.token_total()
                );
            }
        }
    }
}

pub fn describe_event(state: &GameState, event: &Event) -> Option<String> {
    let name = |id: &str| {
        state
            .player(id)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    let line = match event {
        Event::NobleVisited {
            player_id,
            noble_id,
            points,
        } => format!("noble {noble_id} visits {} (+{points})", name(player_id)),
        Event::FinalRoundTriggered { player_id, points } => format!(
            "{} reached {points} points: everyone else gets one more turn",
            name(player_id)
        ),
        Event::GameFinished { winner_ids } => {
            let names: Vec<String> = winner_ids.iter().map(|id| name(id)).collect();
            format!("game over! winner: {}", names.join(" and "))
        }
        Event::CardPurchased {
            player_id,
            card_id,
            payment,
            ..
        } => format!("{} bought {card_id} paying {payment}", name(player_id)),
        Event::GameStarted {
            players,
            target_points,
        } => format!("new game for {players} players, first to {target_points} points"),
        Event::TokensTaken { .. }
        | Event::CardReserved { .. }
        | Event::TurnPassed { .. }
        | Event::GameReset => return None,
    };
    Some(line)
}
