use owo_colors::{OwoColorize, Stream};
use std::fmt::{self, Display};

/// How a command went, rendered as a kaomoji on stderr
#[derive(Clone, Copy, Debug)]
pub enum Mood {
    Happy,
    Sad,
}

impl Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Happy => "(^///^)"
                .if_supports_color(Stream::Stderr, |text| text.green())
                .fmt(f),
            Self::Sad => "(┬┬﹏┬┬)"
                .if_supports_color(Stream::Stderr, |text| text.red())
                .fmt(f),
        }
    }
}

/// Header name, highlighted when printed to a terminal
#[inline]
pub fn header_name(name: &str) -> impl Display + '_ {
    name.if_supports_color(Stream::Stdout, |text| text.cyan())
}

#[cfg(test)]
mod test {
    use super::{Mood, header_name};

    #[test]
    fn renders_plain_text() {
        assert!(Mood::Happy.to_string().contains("(^///^)"));
        assert!(Mood::Sad.to_string().contains("(┬┬﹏┬┬)"));
        assert!(header_name("capability-invocation").to_string().contains("capability-invocation"));
    }
}
