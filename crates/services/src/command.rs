//! The command table and the line tokenizer.

/// Every verb a session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Help,
    List,
    Show,
    Add,
    Delete,
    Edit,
    Test,
    Play,
    Credits,
    Quit,
}

/// Static description of a verb, used for lookup and for `help`.
#[derive(Debug)]
pub struct VerbSpec {
    pub verb: Verb,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub takes_id: bool,
    pub description: &'static str,
}

impl VerbSpec {
    /// Usage as shown by `help`, e.g. `h|help` or `show <id>`.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut usage = String::new();
        for alias in self.aliases {
            usage.push_str(alias);
            usage.push('|');
        }
        usage.push_str(self.name);
        if self.takes_id {
            usage.push_str(" <id>");
        }
        usage
    }
}

pub const VERBS: &[VerbSpec] = &[
    VerbSpec {
        verb: Verb::Help,
        name: "help",
        aliases: &["h"],
        takes_id: false,
        description: "Show this help.",
    },
    VerbSpec {
        verb: Verb::List,
        name: "list",
        aliases: &[],
        takes_id: false,
        description: "List the existing quizzes.",
    },
    VerbSpec {
        verb: Verb::Show,
        name: "show",
        aliases: &[],
        takes_id: true,
        description: "Show the question and the answer of the given quiz.",
    },
    VerbSpec {
        verb: Verb::Add,
        name: "add",
        aliases: &[],
        takes_id: false,
        description: "Add a new quiz interactively.",
    },
    VerbSpec {
        verb: Verb::Delete,
        name: "delete",
        aliases: &[],
        takes_id: true,
        description: "Delete the given quiz.",
    },
    VerbSpec {
        verb: Verb::Edit,
        name: "edit",
        aliases: &[],
        takes_id: true,
        description: "Edit the given quiz.",
    },
    VerbSpec {
        verb: Verb::Test,
        name: "test",
        aliases: &[],
        takes_id: true,
        description: "Try the given quiz.",
    },
    VerbSpec {
        verb: Verb::Play,
        name: "play",
        aliases: &["p"],
        takes_id: false,
        description: "Answer every quiz once, in random order, until a mistake.",
    },
    VerbSpec {
        verb: Verb::Credits,
        name: "credits",
        aliases: &[],
        takes_id: false,
        description: "Credits.",
    },
    VerbSpec {
        verb: Verb::Quit,
        name: "quit",
        aliases: &["q"],
        takes_id: false,
        description: "Leave the session.",
    },
];

impl Verb {
    /// Case-insensitive lookup by name or alias.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Verb> {
        let word = word.to_lowercase();
        VERBS
            .iter()
            .find(|spec| spec.name == word || spec.aliases.contains(&word.as_str()))
            .map(|spec| spec.verb)
    }

    #[must_use]
    pub fn spec(self) -> &'static VerbSpec {
        VERBS
            .iter()
            .find(|spec| spec.verb == self)
            .unwrap_or(&VERBS[0])
    }
}

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Blank input; the session simply prompts again.
    Empty,
    Known { verb: Verb, arg: Option<String> },
    Unknown(String),
}

impl CommandLine {
    /// Split `line` into a verb and its first argument. Extra tokens are
    /// ignored.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            return CommandLine::Empty;
        };
        match Verb::lookup(word) {
            Some(verb) => CommandLine::Known {
                verb,
                arg: tokens.next().map(str::to_owned),
            },
            None => CommandLine::Unknown(word.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verb_and_argument() {
        assert_eq!(
            CommandLine::parse("show 3"),
            CommandLine::Known {
                verb: Verb::Show,
                arg: Some("3".into())
            }
        );
        assert_eq!(
            CommandLine::parse("  SHOW   12x  extra "),
            CommandLine::Known {
                verb: Verb::Show,
                arg: Some("12x".into())
            }
        );
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(Verb::lookup("h"), Some(Verb::Help));
        assert_eq!(Verb::lookup("P"), Some(Verb::Play));
        assert_eq!(Verb::lookup("q"), Some(Verb::Quit));
        assert_eq!(Verb::lookup("s"), None);
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(CommandLine::parse("   "), CommandLine::Empty);
        assert_eq!(
            CommandLine::parse("dance now"),
            CommandLine::Unknown("dance".into())
        );
    }

    #[test]
    fn every_verb_has_exactly_one_spec() {
        for spec in VERBS {
            assert_eq!(VERBS.iter().filter(|s| s.verb == spec.verb).count(), 1);
            assert_eq!(spec.verb.spec().name, spec.name);
        }
        assert_eq!(Verb::Show.spec().usage(), "show <id>");
        assert_eq!(Verb::Help.spec().usage(), "h|help");
    }
}
