//! Maps guess counts onto the 0-4 strength scale and crack-time estimates.

use serde::Serialize;

use crate::guesses::saturate;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_MONTH: f64 = 2_592_000.0;
const SECONDS_PER_YEAR: f64 = 31_536_000.0;
const SECONDS_PER_CENTURY: f64 = 3_153_600_000.0;

/// Discrete strength class, from trivially guessable to very strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Score {
    VeryWeak = 0,
    Weak = 1,
    Medium = 2,
    Strong = 3,
    VeryStrong = 4,
}

impl Score {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }

    /// One-line verdict for this tier.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very weak password. Easily guessable.",
            Self::Weak => "Weak password. Could be cracked quickly.",
            Self::Medium => "Medium strength password. Could be better.",
            Self::Strong => "Strong password. Good job!",
            Self::VeryStrong => "Very strong password. Excellent!",
        }
    }

    /// Longer explanation of what the tier means in practice.
    pub fn description(&self) -> &'static str {
        match self {
            Self::VeryWeak => {
                "This password can be cracked almost instantly. It's likely a common password, too short, or uses very predictable patterns."
            }
            Self::Weak => {
                "This password doesn't provide adequate protection. It would be vulnerable to common cracking methods and could be breached quickly."
            }
            Self::Medium => {
                "This password offers moderate protection. While not immediately vulnerable, it could still be cracked with dedicated effort."
            }
            Self::Strong => {
                "This password provides good protection against most attack methods. It would require significant time and resources to crack."
            }
            Self::VeryStrong => {
                "Excellent! This password offers exceptional protection. It would be extremely difficult to crack through brute force methods."
            }
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.value()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a guess count. Monotonic: more guesses never lowers the score.
pub fn guesses_to_score(guesses: f64) -> Score {
    if guesses < 1e3 {
        Score::VeryWeak
    } else if guesses < 1e6 {
        Score::Weak
    } else if guesses < 1e8 {
        Score::Medium
    } else if guesses < 1e10 {
        Score::Strong
    } else {
        Score::VeryStrong
    }
}

/// Attacker model, by guessing throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttackProfile {
    #[serde(rename = "online_throttling_100_per_hour")]
    OnlineThrottled,
    #[serde(rename = "online_no_throttling_10_per_second")]
    OnlineUnthrottled,
    #[serde(rename = "offline_slow_hashing_1e4_per_second")]
    OfflineSlowHash,
    #[serde(rename = "offline_fast_hashing_1e10_per_second")]
    OfflineFastHash,
}

impl AttackProfile {
    pub const ALL: [AttackProfile; 4] = [
        Self::OnlineThrottled,
        Self::OnlineUnthrottled,
        Self::OfflineSlowHash,
        Self::OfflineFastHash,
    ];

    pub fn guesses_per_second(&self) -> f64 {
        match self {
            Self::OnlineThrottled => 100.0 / SECONDS_PER_HOUR,
            Self::OnlineUnthrottled => 10.0,
            Self::OfflineSlowHash => 1e4,
            Self::OfflineFastHash => 1e10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrackTime {
    pub profile: AttackProfile,
    pub seconds: f64,
    pub display: String,
}

/// Crack time for every attacker profile, in [`AttackProfile::ALL`] order.
pub fn estimate_attack_times(guesses: f64) -> Vec<CrackTime> {
    AttackProfile::ALL
        .iter()
        .map(|&profile| {
            let seconds = saturate(guesses / profile.guesses_per_second());
            CrackTime { profile, seconds, display: display_time(seconds) }
        })
        .collect()
}

/// Human-readable duration, coarsening to "centuries" past one hundred years.
pub fn display_time(seconds: f64) -> String {
    if seconds < SECONDS_PER_MINUTE {
        format!("{:.1} seconds", seconds)
    } else if seconds < SECONDS_PER_HOUR {
        format!("{:.1} minutes", seconds / SECONDS_PER_MINUTE)
    } else if seconds < SECONDS_PER_DAY {
        format!("{:.1} hours", seconds / SECONDS_PER_HOUR)
    } else if seconds < SECONDS_PER_MONTH {
        format!("{:.1} days", seconds / SECONDS_PER_DAY)
    } else if seconds < SECONDS_PER_YEAR {
        format!("{:.1} months", seconds / SECONDS_PER_MONTH)
    } else if seconds < SECONDS_PER_CENTURY {
        format!("{:.1} years", seconds / SECONDS_PER_YEAR)
    } else {
        "centuries".to_string()
    }
}
