//! Keyword-matched canned replies.
//!
//! Two rule lists share the same rules: the intercept list is checked before
//! any generation call, the fallback list is used when generation fails.
//! Matching is a case-insensitive substring check, first matching rule wins.

/// Topic of a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Developer,
    Identity,
    Greeting,
    SmallTalk,
    Gratitude,
    Farewell,
    Help,
    Music,
    Mechanism,
    Features,
}

impl ReplyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyCategory::Developer => "developer",
            ReplyCategory::Identity => "identity",
            ReplyCategory::Greeting => "greeting",
            ReplyCategory::SmallTalk => "small_talk",
            ReplyCategory::Gratitude => "gratitude",
            ReplyCategory::Farewell => "farewell",
            ReplyCategory::Help => "help",
            ReplyCategory::Music => "music",
            ReplyCategory::Mechanism => "mechanism",
            ReplyCategory::Features => "features",
        }
    }
}

#[derive(Debug)]
pub struct CannedRule {
    pub category: ReplyCategory,
    pub phrases: &'static [&'static str],
    pub reply: &'static str,
}

impl CannedRule {
    fn matches(&self, lowered: &str) -> bool {
        self.phrases.iter().any(|phrase| lowered.contains(phrase))
    }
}

const DEVELOPER: CannedRule = CannedRule {
    category: ReplyCategory::Developer,
    phrases: &[
        "who made you",
        "who created you",
        "who developed you",
        "who built you",
        "your creator",
        "your developer",
        "who programmed you",
    ],
    reply: "I was developed by KRISHNA-5478 (https://github.com/KRISHNA-5478) and Mohini Srivastava (https://github.com/mohinisri23). I'm an AI-powered music recommendation chatbot that analyzes your emotions and suggests music to match your mood.",
};

const IDENTITY: CannedRule = CannedRule {
    category: ReplyCategory::Identity,
    phrases: &[
        "who are you",
        "what are you",
        "your name",
        "what's your name",
        "what is your name",
    ],
    reply: "I'm MoodMelody, an AI-powered chatbot designed to analyze your emotions and recommend music that matches your mood. I was developed by KRISHNA-5478 (https://github.com/KRISHNA-5478) and Mohini Srivastava (https://github.com/mohinisri23).",
};

const MECHANISM: CannedRule = CannedRule {
    category: ReplyCategory::Mechanism,
    phrases: &["how do you work", "how does this work", "how it works"],
    reply: "I analyze the sentiment of your messages to determine your emotional state. Then, I map that emotion to a music genre and recommend Spotify playlists that match your mood. I was developed by KRISHNA-5478 (https://github.com/KRISHNA-5478) and Mohini Srivastava (https://github.com/mohinisri23) to help people discover music that resonates with how they're feeling.",
};

const GREETING: CannedRule = CannedRule {
    category: ReplyCategory::Greeting,
    phrases: &["hello", "hi", "hey", "greetings"],
    reply: "Hello there! How are you feeling today?",
};

const SMALL_TALK: CannedRule = CannedRule {
    category: ReplyCategory::SmallTalk,
    phrases: &["how are you", "how're you", "how do you do"],
    reply: "I'm doing well, thanks for asking! How about you?",
};

const GRATITUDE: CannedRule = CannedRule {
    category: ReplyCategory::Gratitude,
    phrases: &["thank", "thanks", "thx"],
    reply: "You're welcome! Happy to help.",
};

const FAREWELL: CannedRule = CannedRule {
    category: ReplyCategory::Farewell,
    phrases: &["bye", "goodbye", "see you"],
    reply: "Goodbye! Have a great day!",
};

const HELP: CannedRule = CannedRule {
    category: ReplyCategory::Help,
    phrases: &["help", "assist", "support"],
    reply: "I can help analyze your mood and recommend music that matches how you're feeling. Just tell me how you're doing or what's on your mind.",
};

const MUSIC: CannedRule = CannedRule {
    category: ReplyCategory::Music,
    phrases: &["music", "song", "playlist", "recommend"],
    reply: "I'd be happy to recommend some music for you! Just share how you're feeling, and I'll suggest music that matches your mood.",
};

const FEATURES: CannedRule = CannedRule {
    category: ReplyCategory::Features,
    phrases: &["feature", "can you do", "what can you do"],
    reply: "I can analyze your emotions through our conversation, recommend music based on your mood, and answer general questions about myself. I was developed by KRISHNA-5478 (https://github.com/KRISHNA-5478) and Mohini Srivastava (https://github.com/mohinisri23) to help connect emotions with music.",
};

/// Questions answered directly, without asking the generator.
const INTERCEPT_RULES: &[CannedRule] = &[DEVELOPER, IDENTITY, MECHANISM];

/// Rules tried, in order, when the generator is unavailable.
const FALLBACK_RULES: &[CannedRule] = &[
    DEVELOPER, IDENTITY, GREETING, SMALL_TALK, GRATITUDE, FAREWELL, HELP, MUSIC, MECHANISM,
    FEATURES,
];

/// Reply used by the fallback responder when no rule matches.
pub const DEFAULT_REPLY: &str = "I understand. Tell me more about how you're feeling, and I can recommend some music that might match your mood. If you have questions about me, feel free to ask! I was developed by KRISHNA-5478 (https://github.com/KRISHNA-5478) and Mohini Srivastava (https://github.com/mohinisri23).";

fn first_match(rules: &'static [CannedRule], text: &str) -> Option<&'static CannedRule> {
    let lowered = text.to_lowercase();
    rules.iter().find(|rule| rule.matches(&lowered))
}

/// Canned answer for questions that never go to the generator.
pub fn intercept(text: &str) -> Option<&'static CannedRule> {
    first_match(INTERCEPT_RULES, text)
}

/// Rule-based reply used when the generator cannot answer.
///
/// Returns the matched rule, or `None` when [`DEFAULT_REPLY`] applies.
pub fn fallback_rule(text: &str) -> Option<&'static CannedRule> {
    first_match(FALLBACK_RULES, text)
}

pub fn fallback(text: &str) -> &'static str {
    fallback_rule(text)
        .map(|rule| rule.reply)
        .unwrap_or(DEFAULT_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intercept_matches_authorship_case_insensitively() {
        let rule = intercept("Hey, WHO MADE YOU?").unwrap();
        assert_eq!(rule.category, ReplyCategory::Developer);
        assert_eq!(rule.reply, DEVELOPER.reply);
    }

    #[test]
    fn intercept_matches_identity_and_mechanism() {
        assert_eq!(
            intercept("what is your name").unwrap().category,
            ReplyCategory::Identity
        );
        assert_eq!(
            intercept("so how does this work?").unwrap().category,
            ReplyCategory::Mechanism
        );
    }

    #[test]
    fn intercept_ignores_other_topics() {
        assert!(intercept("hello").is_none());
        assert!(intercept("thanks a lot").is_none());
        assert!(intercept("").is_none());
    }

    #[test]
    fn intercept_order_prefers_developer_over_identity() {
        let rule = intercept("who are you and who made you").unwrap();
        assert_eq!(rule.category, ReplyCategory::Developer);
    }

    #[test]
    fn fallback_greeting() {
        assert_eq!(fallback("hello"), "Hello there! How are you feeling today?");
    }

    #[test]
    fn fallback_categories() {
        assert_eq!(
            fallback_rule("thx!").unwrap().category,
            ReplyCategory::Gratitude
        );
        assert_eq!(
            fallback_rule("goodbye").unwrap().category,
            ReplyCategory::Farewell
        );
        assert_eq!(
            fallback_rule("can you assist me").unwrap().category,
            ReplyCategory::Help
        );
        assert_eq!(
            fallback_rule("play a song").unwrap().category,
            ReplyCategory::Music
        );
        assert_eq!(
            fallback_rule("list your features").unwrap().category,
            ReplyCategory::Features
        );
    }

    #[test]
    fn fallback_greeting_wins_over_small_talk() {
        // "hi" is matched as a substring, and greetings come first
        assert_eq!(
            fallback_rule("how are you this morning").unwrap().category,
            ReplyCategory::Greeting
        );
        assert_eq!(
            fallback_rule("how are you").unwrap().category,
            ReplyCategory::SmallTalk
        );
    }

    #[test]
    fn fallback_default_when_nothing_matches() {
        assert!(fallback_rule("the weather is grey").is_none());
        assert_eq!(fallback("the weather is grey"), DEFAULT_REPLY);
        assert_eq!(fallback(""), DEFAULT_REPLY);
    }
}
