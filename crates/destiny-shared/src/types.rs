use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEVICE_TOKEN_PREFIX, DEVICE_TOKEN_RANDOM_LEN};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// Catalog identifier, dense over 0..28
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ConstellationId(pub u8);

impl ConstellationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ConstellationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-device pseudo-random identifier used to deduplicate deliveries.
///
/// Not a security token: two devices colliding only makes the unique
/// channel slightly undercount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DeviceToken(String);

impl DeviceToken {
    /// Generate a fresh token from the current time and the thread RNG.
    pub fn generate() -> Self {
        Self::generate_at(Utc::now().timestamp_millis(), &mut rand::thread_rng())
    }

    /// `dev_<base36 millis>_<random base36>`
    pub fn generate_at<R: Rng + ?Sized>(epoch_millis: i64, rng: &mut R) -> Self {
        let stamp = to_base36(epoch_millis.max(0) as u64);
        let suffix: String = (0..DEVICE_TOKEN_RANDOM_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{DEVICE_TOKEN_PREFIX}_{stamp}_{suffix}"))
    }

    /// Wrap a value read back from storage. Blank values count as absent.
    pub fn from_stored(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// The four guardian groups. Display-only: nothing branches on it except
/// theming.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    /// Guardian beast of the quarter.
    pub fn guardian(self) -> &'static str {
        match self {
            Self::East => "青龙",
            Self::North => "玄武",
            Self::West => "白虎",
            Self::South => "朱雀",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::East => "东方",
            Self::North => "北方",
            Self::West => "西方",
            Self::South => "南方",
        }
    }

    /// Card accent color (hex).
    pub fn accent_color(self) -> &'static str {
        match self {
            Self::East => "#00bfa5",
            Self::North => "#2979ff",
            Self::West => "#ff8800",
            Self::South => "#ff3333",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.label(), self.guardian())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_token_shape() {
        let mut rng = StepRng::new(0, 0);
        let token = DeviceToken::generate_at(36, &mut rng);
        assert_eq!(token.as_str(), "dev_10_00000000");
    }

    #[test]
    fn test_generated_tokens_differ() {
        let a = DeviceToken::generate();
        let b = DeviceToken::generate();
        assert!(a.as_str().starts_with("dev_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_stored_rejects_blank() {
        assert!(DeviceToken::from_stored("   ").is_none());
        assert_eq!(
            DeviceToken::from_stored(" dev_x_y ").unwrap().as_str(),
            "dev_x_y"
        );
    }
}
