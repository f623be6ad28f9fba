//! Sidequest tier gating.
//!
//! Mini-games are unlocked by subscription tier, and a 20% roll after the
//! leaderboard view decides whether one is offered at all.

use crate::types::Tier;
use rand::Rng;

/// Fixed probability that a sidequest is offered after the leaderboard
pub const SIDEQUEST_TRIGGER_CHANCE: f64 = 0.2;

/// Starter sidequests, available on every tier
const BASIC_SIDEQUESTS: &[&str] = &["glory-grab", "wack-a-chupacabra", "wretched-wiring"];

const PRO_SIDEQUESTS: &[&str] = &[
    "glory-grab",
    "wack-a-chupacabra",
    "wretched-wiring",
    "cryptic-compliments",
    "chupacabra-challenge",
    "lab-escape",
    "face-the-chupacabra",
];

const PREMIUM_SIDEQUESTS: &[&str] = &[
    "glory-grab",
    "wack-a-chupacabra",
    "wretched-wiring",
    "cryptic-compliments",
    "chupacabra-challenge",
    "lab-escape",
    "face-the-chupacabra",
    "curtain-call",
    "crime-wall",
    "monster-name-generator",
];

/// Sidequests unlocked for a tier
pub fn available_for(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Basic => BASIC_SIDEQUESTS,
        Tier::Pro => PRO_SIDEQUESTS,
        Tier::Premium => PREMIUM_SIDEQUESTS,
    }
}

pub fn is_unlocked(tier: Tier, sidequest_id: &str) -> bool {
    available_for(tier).contains(&sidequest_id)
}

/// 20% roll deciding whether to offer a sidequest
pub fn should_trigger<R: Rng>(rng: &mut R) -> bool {
    rng.random::<f64>() < SIDEQUEST_TRIGGER_CHANCE
}

/// Uniform pick among the tier's unlocked sidequests
pub fn pick_sidequest<R: Rng>(tier: Tier, rng: &mut R) -> &'static str {
    let available = available_for(tier);
    available[rng.random_range(0..available.len())]
}
