//! Daily motivational quote lookup.
//!
//! The quote shown for a date is a pure function of that date: the day of
//! the year (January 1st counts as 1) indexes the static table modulo its
//! length, so the same calendar day always shows the same quote.

use chrono::{Datelike, NaiveDate};

/// A quote and its author, when known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: Option<&'static str>,
}

/// The quote table the daily lookup cycles through
pub const QUOTES: [Quote; 31] = [
    Quote {
        text: "You are in danger of living a life so comfortable and soft, that you will die without ever realizing your true potential.",
        author: Some("David Goggins"),
    },
    Quote {
        text: "The most important conversations you'll ever have are the ones you'll have with yourself.",
        author: Some("David Goggins"),
    },
    Quote {
        text: "We live in an external world. Everything, you have to see it, touch it. The internal world is a world that you can't see, you can't touch, but it's the most important world.",
        author: Some("David Goggins"),
    },
    Quote {
        text: "Suffering is a test. That's all it is. Suffering is the true test of life.",
        author: Some("David Goggins"),
    },
    Quote {
        text: "The only way you gain mental toughness is to do things you're not happy doing. If you continue doing things that you're satisfied and make you happy, you're not getting stronger.",
        author: Some("David Goggins"),
    },
    Quote {
        text: "The way to get started is to quit talking and begin doing.",
        author: Some("Walt Disney"),
    },
    Quote {
        text: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        author: Some("Winston Churchill"),
    },
    Quote {
        text: "Don't watch the clock; do what it does. Keep going.",
        author: Some("Sam Levenson"),
    },
    Quote {
        text: "The future belongs to those who believe in the beauty of their dreams.",
        author: Some("Eleanor Roosevelt"),
    },
    Quote {
        text: "It is during our darkest moments that we must focus to see the light.",
        author: Some("Aristotle"),
    },
    Quote {
        text: "Believe you can and you're halfway there.",
        author: Some("Theodore Roosevelt"),
    },
    Quote {
        text: "The only impossible journey is the one you never begin.",
        author: Some("Tony Robbins"),
    },
    Quote {
        text: "In the middle of difficulty lies opportunity.",
        author: Some("Albert Einstein"),
    },
    Quote {
        text: "What lies behind us and what lies before us are tiny matters compared to what lies within us.",
        author: Some("Ralph Waldo Emerson"),
    },
    Quote {
        text: "Life is what happens to you while you're busy making other plans.",
        author: Some("John Lennon"),
    },
    Quote {
        text: "The best time to plant a tree was 20 years ago. The second best time is now.",
        author: Some("Chinese Proverb"),
    },
    Quote {
        text: "Your limitation—it's only your imagination.",
        author: None,
    },
    Quote {
        text: "Push yourself, because no one else is going to do it for you.",
        author: None,
    },
    Quote {
        text: "Great things never come from comfort zones.",
        author: None,
    },
    Quote {
        text: "Dream it. Wish it. Do it.",
        author: None,
    },
    Quote {
        text: "Success doesn't just find you. You have to go out and get it.",
        author: None,
    },
    Quote {
        text: "The harder you work for something, the greater you'll feel when you achieve it.",
        author: None,
    },
    Quote {
        text: "Dream bigger. Do bigger.",
        author: None,
    },
    Quote {
        text: "Don't stop when you're tired. Stop when you're done.",
        author: None,
    },
    Quote {
        text: "Wake up with determination. Go to bed with satisfaction.",
        author: None,
    },
    Quote {
        text: "Do something today that your future self will thank you for.",
        author: None,
    },
    Quote {
        text: "Little things make big days.",
        author: None,
    },
    Quote {
        text: "It's going to be hard, but hard does not mean impossible.",
        author: None,
    },
    Quote {
        text: "Don't wait for opportunity. Create it.",
        author: None,
    },
    Quote {
        text: "Sometimes we're tested not to show our weaknesses, but to discover our strengths.",
        author: None,
    },
    Quote {
        text: "The key to success is to focus on goals, not obstacles.",
        author: None,
    },
];

/// The quote for a calendar day, stable for that day
pub fn quote_for_date(date: NaiveDate) -> &'static Quote {
    let day_of_year = date.ordinal() as usize;
    &QUOTES[day_of_year % QUOTES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_date_yields_same_quote() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(quote_for_date(date), quote_for_date(date));
    }

    #[test]
    fn test_january_first_counts_as_day_one() {
        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(*quote_for_date(jan1), QUOTES[1 % QUOTES.len()]);
    }

    #[test]
    fn test_lookup_cycles_through_the_table() {
        // Day 31 and day 62 land on the same slot for a 31-entry table
        let jan31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let mar3 = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(quote_for_date(jan31), quote_for_date(mar3));
    }

    #[test]
    fn test_every_quote_has_text() {
        for quote in &QUOTES {
            assert!(!quote.text.is_empty());
        }
    }
}
