//! Runtime configuration from environment variables and command-line flags.
//!
//! Flags override the environment. Malformed values are errors rather than
//! silently falling back to defaults.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const USAGE: &str = "\
drop-tetris - falling-block puzzle game for the terminal

USAGE:
    drop-tetris [OPTIONS]

OPTIONS:
    --seed <N>       Deterministic shape sequence        [env: DROP_TETRIS_SEED]
    --mute           Start with sound muted              [env: DROP_TETRIS_MUTED]
    --trace <PATH>   Write every snapshot as JSON lines  [env: DROP_TETRIS_TRACE]
    --log <PATH>     Write logs to a file                [env: DROP_TETRIS_LOG]
    -h, --help       Print this help

    DROP_TETRIS_LOG_LEVEL sets the log filter (default: info).

KEYS:
    arrows / hjkl / wasd   move, up rotates
    space  hard drop       c  hold      p  pause
    m      mute            enter / r    start
    q      quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub muted: bool,
    pub trace_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            muted: false,
            trace_path: None,
            log_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Environment plus `args` (without the program name).
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn load(args: &[String]) -> Result<Option<Self>> {
        let mut config = Self::from_env()?;
        if config.apply_args(args)? {
            Ok(Some(config))
        } else {
            Ok(None)
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var("DROP_TETRIS_SEED")
            .map(|s| parse_seed(&s))
            .transpose()?;
        let muted = var("DROP_TETRIS_MUTED")
            .map(|s| parse_flag("DROP_TETRIS_MUTED", &s))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            seed,
            muted,
            trace_path: var("DROP_TETRIS_TRACE").map(PathBuf::from),
            log_path: var("DROP_TETRIS_LOG").map(PathBuf::from),
            log_level: var("DROP_TETRIS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Apply command-line flags. Returns false if `--help` was given.
    pub fn apply_args(&mut self, args: &[String]) -> Result<bool> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => return Ok(false),
                "--mute" => self.muted = true,
                "--seed" => {
                    i += 1;
                    let v = value(args, i, "--seed")?;
                    self.seed = Some(parse_seed(v)?);
                }
                "--trace" => {
                    i += 1;
                    self.trace_path = Some(PathBuf::from(value(args, i, "--trace")?));
                }
                "--log" => {
                    i += 1;
                    self.log_path = Some(PathBuf::from(value(args, i, "--log")?));
                }
                other => return Err(anyhow!("unknown argument: {} (try --help)", other)),
            }
            i += 1;
        }
        Ok(true)
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn parse_seed(s: &str) -> Result<u64> {
    s.parse::<u64>()
        .map_err(|_| anyhow!("invalid seed: {}", s))
}

fn parse_flag(name: &str, s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("invalid {} value: {}", name, s)),
    }
}
