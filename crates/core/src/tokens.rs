use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// The five gem colors. Cards produce them as discounts; tokens of these
/// colors are the regular currency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Gem {
    Diamond,
    Sapphire,
    Emerald,
    Ruby,
    Onyx,
}

impl Gem {
    pub const ALL: [Gem; 5] = [
        Gem::Diamond,
        Gem::Sapphire,
        Gem::Emerald,
        Gem::Ruby,
        Gem::Onyx,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Gem::Diamond => "diamond",
            Gem::Sapphire => "sapphire",
            Gem::Emerald => "emerald",
            Gem::Ruby => "ruby",
            Gem::Onyx => "onyx",
        }
    }

    pub fn from_name(value: &str) -> Option<Gem> {
        Gem::ALL
            .into_iter()
            .find(|gem| gem.name().eq_ignore_ascii_case(value.trim()))
    }

    pub fn token(self) -> Token {
        match self {
            Gem::Diamond => Token::Diamond,
            Gem::Sapphire => Token::Sapphire,
            Gem::Emerald => Token::Emerald,
            Gem::Ruby => Token::Ruby,
            Gem::Onyx => Token::Onyx,
        }
    }
}

impl fmt::Display for Gem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token kinds: one per gem color plus the gold wildcard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Diamond,
    Sapphire,
    Emerald,
    Ruby,
    Onyx,
    Gold,
}

impl Token {
    pub const ALL: [Token; 6] = [
        Token::Diamond,
        Token::Sapphire,
        Token::Emerald,
        Token::Ruby,
        Token::Onyx,
        Token::Gold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Token::Diamond => "diamond",
            Token::Sapphire => "sapphire",
            Token::Emerald => "emerald",
            Token::Ruby => "ruby",
            Token::Onyx => "onyx",
            Token::Gold => "gold",
        }
    }

    pub fn from_name(value: &str) -> Option<Token> {
        Token::ALL
            .into_iter()
            .find(|token| token.name().eq_ignore_ascii_case(value.trim()))
    }

    /// The gem color behind this token, `None` for gold.
    pub fn gem(self) -> Option<Gem> {
        match self {
            Token::Diamond => Some(Gem::Diamond),
            Token::Sapphire => Some(Gem::Sapphire),
            Token::Emerald => Some(Gem::Emerald),
            Token::Ruby => Some(Gem::Ruby),
            Token::Onyx => Some(Gem::Onyx),
            Token::Gold => None,
        }
    }
}

impl From<Gem> for Token {
    fn from(gem: Gem) -> Self {
        gem.token()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a subtraction would drive a token count below zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not enough {token} tokens: have {available}, need {requested}")]
pub struct InsufficientTokens {
    pub token: Token,
    pub available: u32,
    pub requested: u32,
}

/// Count of every token kind. Counts are unsigned, so a bundle can never hold
/// a negative entry; `subtract` is the only place an overdraft is detected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TokenBundle {
    #[serde(default)]
    pub diamond: u32,
    #[serde(default)]
    pub sapphire: u32,
    #[serde(default)]
    pub emerald: u32,
    #[serde(default)]
    pub ruby: u32,
    #[serde(default)]
    pub onyx: u32,
    #[serde(default)]
    pub gold: u32,
}

impl TokenBundle {
    pub fn from_pairs(pairs: &[(Token, u32)]) -> Self {
        let mut bundle = Self::default();
        for &(token, amount) in pairs {
            bundle[token] = bundle[token].saturating_add(amount);
        }
        bundle
    }

    pub fn single(token: Token, amount: u32) -> Self {
        Self::from_pairs(&[(token, amount)])
    }

    /// Every gem color at `gems`, gold at `gold`.
    pub fn stocked(gems: u32, gold: u32) -> Self {
        Self {
            diamond: gems,
            sapphire: gems,
            emerald: gems,
            ruby: gems,
            onyx: gems,
            gold,
        }
    }

    pub fn add(&self, delta: &TokenBundle) -> TokenBundle {
        let mut next = *self;
        for token in Token::ALL {
            next[token] = next[token].saturating_add(delta[token]);
        }
        next
    }

    pub fn subtract(&self, delta: &TokenBundle) -> Result<TokenBundle, InsufficientTokens> {
        let mut next = *self;
        for token in Token::ALL {
            let available = self[token];
            let requested = delta[token];
            next[token] = available.checked_sub(requested).ok_or(InsufficientTokens {
                token,
                available,
                requested,
            })?;
        }
        Ok(next)
    }

    /// Saturates at `u32::MAX` so oversized requests stay rejectable.
    pub fn total(&self) -> u32 {
        Token::ALL
            .into_iter()
            .fold(0u32, |sum, token| sum.saturating_add(self[token]))
    }

    pub fn has_at_least(&self, requested: &TokenBundle) -> bool {
        Token::ALL
            .into_iter()
            .all(|token| self[token] >= requested[token])
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero entries in canonical token order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, u32)> + '_ {
        Token::ALL
            .into_iter()
            .map(|token| (token, self[token]))
            .filter(|(_, amount)| *amount > 0)
    }
}

impl Index<Token> for TokenBundle {
    type Output = u32;

    fn index(&self, token: Token) -> &u32 {
        match token {
            Token::Diamond => &self.diamond,
            Token::Sapphire => &self.sapphire,
            Token::Emerald => &self.emerald,
            Token::Ruby => &self.ruby,
            Token::Onyx => &self.onyx,
            Token::Gold => &self.gold,
        }
    }
}

impl IndexMut<Token> for TokenBundle {
    fn index_mut(&mut self, token: Token) -> &mut u32 {
        match token {
            Token::Diamond => &mut self.diamond,
            Token::Sapphire => &mut self.sapphire,
            Token::Emerald => &mut self.emerald,
            Token::Ruby => &mut self.ruby,
            Token::Onyx => &mut self.onyx,
            Token::Gold => &mut self.gold,
        }
    }
}

impl fmt::Display for TokenBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("nothing");
        }
        let mut first = true;
        for (token, amount) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{amount} {token}")?;
        }
        Ok(())
    }
}

/// Per-gem counts with no gold entry: card costs, noble thresholds and
/// player discounts. Absent entries deserialize as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GemCounts {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub diamond: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub sapphire: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub emerald: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ruby: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub onyx: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl GemCounts {
    pub fn from_pairs(pairs: &[(Gem, u32)]) -> Self {
        let mut counts = Self::default();
        for &(gem, amount) in pairs {
            counts[gem] = counts[gem].saturating_add(amount);
        }
        counts
    }

    pub fn increment(&mut self, gem: Gem) {
        self[gem] = self[gem].saturating_add(1);
    }

    pub fn total(&self) -> u32 {
        Gem::ALL
            .into_iter()
            .fold(0u32, |sum, gem| sum.saturating_add(self[gem]))
    }

    /// True when every entry of `self` is at least the matching entry of `threshold`.
    pub fn covers(&self, threshold: &GemCounts) -> bool {
        Gem::ALL.into_iter().all(|gem| self[gem] >= threshold[gem])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gem, u32)> + '_ {
        Gem::ALL
            .into_iter()
            .map(|gem| (gem, self[gem]))
            .filter(|(_, amount)| *amount > 0)
    }
}

impl Index<Gem> for GemCounts {
    type Output = u32;

    fn index(&self, gem: Gem) -> &u32 {
        match gem {
            Gem::Diamond => &self.diamond,
            Gem::Sapphire => &self.sapphire,
            Gem::Emerald => &self.emerald,
            Gem::Ruby => &self.ruby,
            Gem::Onyx => &self.onyx,
        }
    }
}

impl IndexMut<Gem> for GemCounts {
    fn index_mut(&mut self, gem: Gem) -> &mut u32 {
        match gem {
            Gem::Diamond => &mut self.diamond,
            Gem::Sapphire => &mut self.sapphire,
            Gem::Emerald => &mut self.emerald,
            Gem::Ruby => &mut self.ruby,
            Gem::Onyx => &mut self.onyx,
        }
    }
}

impl fmt::Display for GemCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (gem, amount) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{amount}{}", &gem.name()[..1])?;
        }
        if first {
            f.write_str("free")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_rejects_overdraft_and_names_the_token() {
        let held = TokenBundle::from_pairs(&[(Token::Ruby, 1), (Token::Gold, 2)]);
        let err = held
            .subtract(&TokenBundle::single(Token::Ruby, 2))
            .unwrap_err();
        assert_eq!(err.token, Token::Ruby);
        assert_eq!(err.available, 1);
        assert_eq!(err.requested, 2);
    }

    #[test]
    fn add_then_subtract_restores_bundle() {
        let base = TokenBundle::stocked(4, 5);
        let delta = TokenBundle::from_pairs(&[(Token::Diamond, 1), (Token::Onyx, 2)]);
        let restored = base.add(&delta).subtract(&delta).expect("subtract");
        assert_eq!(restored, base);
        assert_eq!(base.total(), 25);
    }

    #[test]
    fn has_at_least_compares_every_kind() {
        let bank = TokenBundle::stocked(4, 0);
        assert!(bank.has_at_least(&TokenBundle::single(Token::Emerald, 4)));
        assert!(!bank.has_at_least(&TokenBundle::single(Token::Gold, 1)));
    }

    #[test]
    fn names_round_trip_case_insensitively() {
        assert_eq!(Token::from_name("GOLD"), Some(Token::Gold));
        assert_eq!(Gem::from_name(" Onyx "), Some(Gem::Onyx));
        assert_eq!(Gem::from_name("gold"), None);
        assert_eq!(Token::Sapphire.gem(), Some(Gem::Sapphire));
    }

    #[test]
    fn gem_counts_cover_thresholds() {
        let discounts = GemCounts::from_pairs(&[(Gem::Ruby, 3), (Gem::Onyx, 4)]);
        assert!(discounts.covers(&GemCounts::from_pairs(&[(Gem::Ruby, 3)])));
        assert!(!discounts.covers(&GemCounts::from_pairs(&[(Gem::Diamond, 1)])));
        assert_eq!(discounts.to_string(), "3r 4o");
    }
}
