//! Random password generation.

use async_trait::async_trait;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use toolbox_core::{parse_tool_args, Tool, ToolError, ToolResult};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
/// Characters that are easy to misread: `i l 1 L o 0 O`.
pub const SIMILAR: &str = "il1Lo0O";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const MAX_COUNT: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password length must be between 4 and 128, got {0}")]
    InvalidLength(usize),
    #[error("Password count must be between 1 and 20, got {0}")]
    InvalidCount(usize),
    #[error("Select at least one character type")]
    NoCharacterClass,
}

fn default_length() -> usize {
    16
}

fn default_count() -> usize {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordOptions {
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_true")]
    pub uppercase: bool,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_true")]
    pub numbers: bool,
    #[serde(default)]
    pub symbols: bool,
    #[serde(default)]
    pub exclude_similar: bool,
    #[serde(default = "default_count")]
    pub count: usize,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: default_length(),
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: false,
            exclude_similar: false,
            count: default_count(),
        }
    }
}

impl PasswordOptions {
    /// Union of the selected character classes, minus look-alikes if requested.
    pub fn charset(&self) -> Vec<char> {
        let classes = [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ];

        classes
            .iter()
            .filter(|(selected, _)| *selected)
            .flat_map(|(_, chars)| chars.chars())
            .filter(|c| !(self.exclude_similar && SIMILAR.contains(*c)))
            .collect()
    }

    fn validate(&self) -> Result<(), PasswordError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(PasswordError::InvalidLength(self.length));
        }
        if !(1..=MAX_COUNT).contains(&self.count) {
            return Err(PasswordError::InvalidCount(self.count));
        }
        Ok(())
    }
}

pub fn generate<R: Rng + ?Sized>(
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<String, PasswordError> {
    options.validate()?;
    let charset = options.charset();
    if charset.is_empty() {
        return Err(PasswordError::NoCharacterClass);
    }

    (0..options.length)
        .map(|_| charset.choose(rng).copied().ok_or(PasswordError::NoCharacterClass))
        .collect()
}

pub fn generate_many<R: Rng + ?Sized>(
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<Vec<String>, PasswordError> {
    options.validate()?;
    (0..options.count).map(|_| generate(options, rng)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
        }
    }
}

/// Rough strength estimate from length and the number of character classes used.
pub fn strength(password: &str) -> Strength {
    let length = password.chars().count();
    let classes = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    match (length, classes) {
        (len, cls) if len >= 16 && cls >= 3 => Strength::Strong,
        (len, cls) if len >= 12 && cls >= 4 => Strength::Strong,
        (len, cls) if len >= 8 && cls >= 2 => Strength::Medium,
        _ => Strength::Weak,
    }
}

pub struct PasswordTool;

impl PasswordTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PasswordTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for PasswordTool {
    fn name(&self) -> &str {
        "password-generator"
    }

    fn description(&self) -> &str {
        "Generate random passwords from the selected character classes, optionally excluding look-alike characters (i l 1 L o 0 O)."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "length": {
                    "type": "integer",
                    "minimum": MIN_LENGTH,
                    "maximum": MAX_LENGTH,
                    "default": 16
                },
                "count": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_COUNT,
                    "default": 1
                },
                "uppercase": { "type": "boolean", "default": true },
                "lowercase": { "type": "boolean", "default": true },
                "numbers": { "type": "boolean", "default": true },
                "symbols": { "type": "boolean", "default": false },
                "exclude_similar": { "type": "boolean", "default": false }
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let options: PasswordOptions = parse_tool_args(args)?;
        let outcome = generate_many(&options, &mut rand::thread_rng())
            .map(|passwords| format_passwords(&passwords));
        Ok(ToolResult::from_outcome(outcome))
    }
}

/// One password per line, then a blank line and the strength of each, so the
/// password block can be copied as is.
pub fn format_passwords(passwords: &[String]) -> String {
    let strengths: Vec<&str> = passwords
        .iter()
        .map(|password| strength(password).as_str())
        .collect();
    format!("{}\n\nStrength: {}", passwords.join("\n"), strengths.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn length_always_matches() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in [MIN_LENGTH, 12, 64, MAX_LENGTH] {
            let options = PasswordOptions {
                length,
                symbols: true,
                ..Default::default()
            };
            let password = generate(&options, &mut rng).unwrap();
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn only_selected_classes_are_used() {
        let mut rng = StdRng::seed_from_u64(42);
        let options = PasswordOptions {
            length: 128,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: true,
            ..Default::default()
        };
        let password = generate(&options, &mut rng).unwrap();
        assert!(password
            .chars()
            .all(|c| NUMBERS.contains(c) || SYMBOLS.contains(c)));
    }

    #[test]
    fn exclude_similar_removes_look_alikes() {
        let options = PasswordOptions {
            exclude_similar: true,
            ..Default::default()
        };
        let charset = options.charset();
        for c in SIMILAR.chars() {
            assert!(!charset.contains(&c), "{c} should be excluded");
        }
        assert_eq!(charset.len(), 26 + 26 + 10 - SIMILAR.len());

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let password = generate(
                &PasswordOptions {
                    length: 64,
                    ..options.clone()
                },
                &mut rng,
            )
            .unwrap();
            assert!(!password.chars().any(|c| SIMILAR.contains(c)));
        }
    }

    #[test]
    fn rejects_invalid_options() {
        let mut rng = StdRng::seed_from_u64(0);
        let none = PasswordOptions {
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
            ..Default::default()
        };
        assert_eq!(generate(&none, &mut rng), Err(PasswordError::NoCharacterClass));

        let short = PasswordOptions {
            length: 3,
            ..Default::default()
        };
        assert_eq!(generate(&short, &mut rng), Err(PasswordError::InvalidLength(3)));

        let many = PasswordOptions {
            count: 21,
            ..Default::default()
        };
        assert_eq!(
            generate_many(&many, &mut rng),
            Err(PasswordError::InvalidCount(21))
        );
    }

    #[test]
    fn generate_many_returns_count_passwords() {
        let mut rng = StdRng::seed_from_u64(9);
        let options = PasswordOptions {
            count: 5,
            ..Default::default()
        };
        assert_eq!(generate_many(&options, &mut rng).unwrap().len(), 5);
    }

    #[test]
    fn strength_levels() {
        assert_eq!(strength("abc"), Strength::Weak);
        assert_eq!(strength("abcdefgh1"), Strength::Medium);
        assert_eq!(strength("Abcdefgh1!xy"), Strength::Strong);
        assert_eq!(strength("Abcdefghijklmnop1"), Strength::Strong);
    }

    #[tokio::test]
    async fn execute_lists_one_password_per_line() {
        let result = PasswordTool::new()
            .execute(json!({"length": 10, "count": 3}))
            .await
            .unwrap();
        assert!(result.success);

        let (block, summary) = result.result.split_once("\n\n").unwrap();
        let passwords: Vec<&str> = block.lines().collect();
        assert_eq!(passwords.len(), 3);
        assert!(passwords.iter().all(|p| p.chars().count() == 10));
        assert!(summary.starts_with("Strength: "));
        assert_eq!(summary.matches(", ").count(), 2);
    }

    #[test]
    fn password_lines_carry_no_annotations() {
        let output = format_passwords(&["Abcdefgh1!xy".to_string(), "abc".to_string()]);
        assert_eq!(output, "Abcdefgh1!xy\nabc\n\nStrength: strong, weak");
    }
}
