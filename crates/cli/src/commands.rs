use gemhall_core::{GameState, PurchaseSource, ReserveSource, Tier, Token, TokenBundle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveTarget {
    Card(String),
    Deck(Tier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Take {
        take: TokenBundle,
        returns: TokenBundle,
    },
    Reserve {
        target: ReserveTarget,
        returns: TokenBundle,
    },
    Buy {
        card_id: String,
    },
    State {
        json: bool,
    },
    Board,
    Hint,
    Log,
    Reset,
    NewGame,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();
    let command = match cmd {
        "take" | "t" => {
            let (take, returns) = split_returns(&args)?;
            if take.is_empty() {
                return Err("usage: take <color>... [return <color>...]".to_string());
            }
            Command::Take {
                take: parse_tokens(take)?,
                returns: parse_tokens(returns)?,
            }
        }
        "reserve" | "r" => {
            let (target, returns) = split_returns(&args)?;
            let target = match target {
                ["deck", tier] => ReserveTarget::Deck(parse_tier(tier)?),
                [card_id] => ReserveTarget::Card(card_id.to_string()),
                _ => return Err("usage: reserve <card-id> | reserve deck <1-3>".to_string()),
            };
            Command::Reserve {
                target,
                returns: parse_tokens(returns)?,
            }
        }
        "buy" | "b" => match args.as_slice() {
            [card_id] => Command::Buy {
                card_id: card_id.to_string(),
            },
            _ => return Err("usage: buy <card-id>".to_string()),
        },
        "state" | "s" => Command::State {
            json: args.contains(&"--json"),
        },
        "json" => Command::State { json: true },
        "board" | "ls" => Command::Board,
        "hint" | "moves" => Command::Hint,
        "log" => Command::Log,
        "reset" => Command::Reset,
        "new" => Command::NewGame,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try help)")),
    };
    Ok(Some(command))
}

fn split_returns<'a>(args: &'a [&'a str]) -> Result<(&'a [&'a str], &'a [&'a str]), String> {
    match args.iter().position(|arg| *arg == "return" || *arg == "ret") {
        Some(index) => {
            let returns = &args[index + 1..];
            if returns.is_empty() {
                return Err("nothing listed after 'return'".to_string());
            }
            Ok((&args[..index], returns))
        }
        None => Ok((args, &[])),
    }
}

/// Each word adds one token; `ruby ruby` or `2ruby` is a double.
pub fn parse_tokens(words: &[&str]) -> Result<TokenBundle, String> {
    let mut bundle = TokenBundle::default();
    for word in words {
        let digits = word.chars().take_while(|ch| ch.is_ascii_digit()).count();
        let (count, name) = word.split_at(digits);
        let count = if count.is_empty() {
            1
        } else {
            count
                .parse::<u32>()
                .map_err(|_| format!("invalid count in '{word}'"))?
        };
        let token = parse_token(name).ok_or_else(|| format!("unknown token '{name}'"))?;
        bundle[token] = bundle[token]
            .checked_add(count)
            .ok_or_else(|| format!("too many {token} tokens"))?;
    }
    Ok(bundle)
}

fn parse_token(name: &str) -> Option<Token> {
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "d" | "white" => Some(Token::Diamond),
        "s" | "blue" => Some(Token::Sapphire),
        "e" | "green" => Some(Token::Emerald),
        "r" | "red" => Some(Token::Ruby),
        "o" | "black" => Some(Token::Onyx),
        "g" | "*" => Some(Token::Gold),
        other => Token::from_name(other),
    }
}

fn parse_tier(value: &str) -> Result<Tier, String> {
    value
        .parse::<u8>()
        .ok()
        .and_then(Tier::from_number)
        .ok_or_else(|| format!("invalid tier '{value}', expected 1-3"))
}

pub fn reserve_source(state: &GameState, target: &ReserveTarget) -> Result<ReserveSource, String> {
    match target {
        ReserveTarget::Deck(tier) => Ok(ReserveSource::Deck { tier: *tier }),
        ReserveTarget::Card(card_id) => board_tier(state, card_id)
            .map(|tier| ReserveSource::Board {
                tier,
                card_id: card_id.clone(),
            })
            .ok_or_else(|| format!("{card_id} is not on the board")),
    }
}

/// Board cards win over reserved ones; ids are unique so at most one matches.
pub fn purchase_source(
    state: &GameState,
    player_id: &str,
    card_id: &str,
) -> Result<PurchaseSource, String> {
    if let Some(tier) = board_tier(state, card_id) {
        return Ok(PurchaseSource::Board {
            tier,
            card_id: card_id.to_string(),
        });
    }
    let reserved = state
        .player(player_id)
        .is_some_and(|player| player.reserved_position(card_id).is_some());
    if reserved {
        return Ok(PurchaseSource::Reserved {
            card_id: card_id.to_string(),
        });
    }
    Err(format!("{card_id} is neither on the board nor reserved"))
}

fn board_tier(state: &GameState, card_id: &str) -> Option<Tier> {
    Tier::ALL
        .into_iter()
        .find(|tier| state.board.find(*tier, card_id).is_some())
}
