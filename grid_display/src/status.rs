// status.rs - Status line and help text

const KEYS: &str = "q h/? space r l";

pub const HELP_LINES: [&str; 5] = [
    "space  pause / resume",
    "h ?    toggle this help",
    "r      restart with a fresh board",
    "l      reload the configured pattern",
    "q      quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar<'a> {
    pub generation : u64,
    pub paused     : bool,
    pub source     : &'a str,
    pub notice     : &'a str,
}

impl StatusBar<'_> {
    /// `gen:<n> | state:<running|paused> | source:<src> | keys:...`, plus the
    /// notice when there is one.
    pub fn render(&self) -> String {
        let state = if self.paused { "paused" } else { "running" };
        let mut line = format!(
            "gen:{} | state:{} | source:{} | keys:{}",
            self.generation, state, self.source, KEYS
        );
        if !self.notice.is_empty() {
            line.push_str(" | ");
            line.push_str(self.notice);
        }
        line
    }
}
